//! # MIB Types
//!
//! Small validated primitives shared by the directory crates.
//!
//! - [`NonEmptyText`]: a trimmed string guaranteed to hold at least one non-whitespace character.
//!   Used for optional doctor fields so that "absent" and "empty" collapse into `None`.
//! - [`Letter`]: an ASCII letter used by the alphabet quick-filter.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when creating a [`Letter`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LetterError {
    #[error("letter cannot be empty")]
    Empty,
    #[error("expected a single letter, got {0:?}")]
    NotSingle(String),
    #[error("expected an ASCII letter A-Z, got {0:?}")]
    NotAlphabetic(char),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Like [`NonEmptyText::new`], but maps empty input to `None`.
    pub fn optional(input: impl AsRef<str>) -> Option<Self> {
        Self::new(input).ok()
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// An upper-case ASCII letter `A`-`Z`.
///
/// Input is accepted in either case and stored upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter(char);

impl Letter {
    /// Creates a letter from a single character.
    ///
    /// # Errors
    ///
    /// Returns `LetterError::NotAlphabetic` for anything outside `a-z`/`A-Z`.
    pub fn new(c: char) -> Result<Self, LetterError> {
        if c.is_ascii_alphabetic() {
            Ok(Self(c.to_ascii_uppercase()))
        } else {
            Err(LetterError::NotAlphabetic(c))
        }
    }

    /// Parses a letter from text such as a query parameter.
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, LetterError> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(LetterError::Empty),
            (Some(c), None) => Self::new(c),
            (Some(_), Some(_)) => Err(LetterError::NotSingle(trimmed.to_owned())),
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// Returns true if `text` starts with this letter, ignoring case.
    pub fn starts(self, text: &str) -> bool {
        text.chars()
            .next()
            .is_some_and(|c| c.to_ascii_uppercase() == self.0)
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Letter {
    type Err = LetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Letter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Letter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Letter::parse(&s).map_err(serde::de::Error::custom)
    }
}
