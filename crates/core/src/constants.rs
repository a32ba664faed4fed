//! Constants used throughout the directory core crate.
//!
//! Defaults for configuration, the alphabet bar, and fixed display text live here so the REST API
//! and CLI render the same values.

/// Default base URL of the Doctor Repository.
pub const DEFAULT_DOCTORS_URL: &str = "http://localhost:5000";

/// Default address for the REST API.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default number of doctors per page.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Prefix joined to a doctor's `image_url` on the detail view.
pub const DEFAULT_IMAGE_BASE: &str = "/images/";

/// Image shown when a doctor has no `image_url`.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/default.jpg";

/// Default per-request timeout for the HTTP repository, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Collection path on the Doctor Repository.
pub const DOCTORS_PATH: &str = "doctors";

/// Letters offered by the alphabet quick-filter, in display order.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Label of the alphabet entry that clears the letter filter.
pub const ALL_LETTERS_LABEL: &str = "All";

/// Shown on the detail view when a doctor has no `more_info`.
pub const NO_MORE_INFO: &str = "No additional information available.";
