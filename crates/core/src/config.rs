//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services. Environment
//! variables are read by the binaries only, through [`CoreConfig::from_env_values`], never during
//! request handling.

use crate::constants::{
    DEFAULT_DOCTORS_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_IMAGE_BASE, DEFAULT_PAGE_SIZE,
    DEFAULT_PLACEHOLDER_IMAGE,
};
use crate::paginate::PageSize;
use crate::{DirectoryError, DirectoryResult};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    doctors_url: String,
    page_size: NonZeroUsize,
    image_base: String,
    placeholder_image: String,
    http_timeout: Option<Duration>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidInput` if:
    /// - `doctors_url` is empty or not an `http`/`https` URL,
    /// - `page_size` is zero.
    pub fn new(doctors_url: impl Into<String>, page_size: usize) -> DirectoryResult<Self> {
        let doctors_url = doctors_url.into().trim().trim_end_matches('/').to_string();

        if doctors_url.is_empty() {
            return Err(DirectoryError::InvalidInput(
                "doctors_url cannot be empty".into(),
            ));
        }
        if !(doctors_url.starts_with("http://") || doctors_url.starts_with("https://")) {
            return Err(DirectoryError::InvalidInput(format!(
                "doctors_url must start with http:// or https://, got {doctors_url}"
            )));
        }
        let page_size = NonZeroUsize::new(page_size).ok_or_else(|| {
            DirectoryError::InvalidInput("page_size must be greater than zero".into())
        })?;

        Ok(Self {
            doctors_url,
            page_size,
            image_base: DEFAULT_IMAGE_BASE.into(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.into(),
            http_timeout: Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
        })
    }

    /// Builds a config from raw environment values.
    ///
    /// Every argument is the raw value of the matching `MIB_*` variable; `None` or blank means
    /// "use the default".
    pub fn from_env_values(
        doctors_url: Option<String>,
        page_size: Option<String>,
        image_base: Option<String>,
        placeholder_image: Option<String>,
        http_timeout_secs: Option<String>,
    ) -> DirectoryResult<Self> {
        let doctors_url = non_blank(doctors_url).unwrap_or_else(|| DEFAULT_DOCTORS_URL.into());
        let page_size = parse_number("MIB_PAGE_SIZE", page_size)?.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut cfg = Self::new(doctors_url, page_size)?;

        if let Some(base) = non_blank(image_base) {
            cfg = cfg.with_image_base(base);
        }
        if let Some(placeholder) = non_blank(placeholder_image) {
            cfg = cfg.with_placeholder_image(placeholder);
        }
        if let Some(secs) = parse_number::<u64>("MIB_HTTP_TIMEOUT_SECS", http_timeout_secs)? {
            cfg = cfg.with_http_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }

        Ok(cfg)
    }

    pub fn with_image_base(mut self, image_base: impl Into<String>) -> Self {
        self.image_base = image_base.into();
        self
    }

    pub fn with_placeholder_image(mut self, placeholder_image: impl Into<String>) -> Self {
        self.placeholder_image = placeholder_image.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Base URL of the Doctor Repository, without a trailing slash.
    pub fn doctors_url(&self) -> &str {
        &self.doctors_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Page size used when a request does not ask for one.
    pub fn default_page_size(&self) -> PageSize {
        PageSize::Fixed(self.page_size)
    }

    pub fn image_base(&self) -> &str {
        &self.image_base
    }

    pub fn placeholder_image(&self) -> &str {
        &self.placeholder_image
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(
    name: &str,
    value: Option<String>,
) -> DirectoryResult<Option<T>> {
    non_blank(value)
        .map(|v| {
            v.parse::<T>().map_err(|_| {
                DirectoryError::InvalidInput(format!("{name} must be a non-negative integer, got {v}"))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_env_is_unset() {
        let cfg = CoreConfig::from_env_values(None, None, None, None, None).unwrap();

        assert_eq!(cfg.doctors_url(), DEFAULT_DOCTORS_URL);
        assert_eq!(cfg.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.image_base(), DEFAULT_IMAGE_BASE);
        assert_eq!(cfg.placeholder_image(), DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(
            cfg.http_timeout(),
            Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let cfg = CoreConfig::new("https://backend.example/", 8).unwrap();
        assert_eq!(cfg.doctors_url(), "https://backend.example");
    }

    #[test]
    fn rejects_zero_page_size() {
        let result = CoreConfig::new("http://localhost:5000", 0);
        match result {
            Err(DirectoryError::InvalidInput(msg)) => assert!(msg.contains("page_size")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_http_url() {
        assert!(CoreConfig::new("ftp://example", 8).is_err());
        assert!(CoreConfig::new("   ", 8).is_err());
    }

    #[test]
    fn rejects_unparseable_page_size() {
        let result = CoreConfig::from_env_values(None, Some("eight".into()), None, None, None);
        match result {
            Err(DirectoryError::InvalidInput(msg)) => assert!(msg.contains("MIB_PAGE_SIZE")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg =
            CoreConfig::from_env_values(None, None, None, None, Some("0".into())).unwrap();
        assert_eq!(cfg.http_timeout(), None);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = CoreConfig::from_env_values(
            Some("https://backend-doctor.example".into()),
            Some("12".into()),
            Some("/static/".into()),
            Some("/static/none.png".into()),
            Some("3".into()),
        )
        .unwrap();

        assert_eq!(cfg.doctors_url(), "https://backend-doctor.example");
        assert_eq!(cfg.page_size(), 12);
        assert_eq!(cfg.image_base(), "/static/");
        assert_eq!(cfg.placeholder_image(), "/static/none.png");
        assert_eq!(cfg.http_timeout(), Some(Duration::from_secs(3)));
    }
}
