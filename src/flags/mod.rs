//! Country flag images
//!
//! Flags live in a public object-storage bucket as `<country>.png`, with the
//! country code lower-cased.

mod client;

pub use client::HttpFlagSource;

use std::future::Future;

use hyper::body::Bytes;

use crate::lookup::Lookup;

/// Longest country segment forwarded upstream
const MAX_COUNTRY_LEN: usize = 8;

/// Upstream holding one PNG per country
pub trait FlagSource: Send + Sync + 'static {
    /// Fetch the flag image for an already validated `country`
    fn fetch(&self, country: &str) -> impl Future<Output = Lookup<Bytes>> + Send;
}

/// URL of the flag image for `country` under `base_url`
pub fn flag_url(base_url: &str, country: &str) -> String {
    format!(
        "{}/{}.png",
        base_url.trim_end_matches('/'),
        country.to_ascii_lowercase()
    )
}

/// Whether `country` may be forwarded to the bucket
///
/// Accepts short ASCII alphanumeric codes: ISO 3166 alpha-2 codes and the
/// edge's pseudo codes such as `XX` and `T1`.
pub fn is_valid_country(country: &str) -> bool {
    !country.is_empty()
        && country.len() <= MAX_COUNTRY_LEN
        && country.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_url_lowercases() {
        assert_eq!(
            flag_url("https://flags.example.net", "DE"),
            "https://flags.example.net/de.png"
        );
        assert_eq!(
            flag_url("https://flags.example.net/", "us"),
            "https://flags.example.net/us.png"
        );
    }

    #[test]
    fn test_country_validation() {
        assert!(is_valid_country("us"));
        assert!(is_valid_country("GB"));
        assert!(is_valid_country("T1"));
        assert!(!is_valid_country(""));
        assert!(!is_valid_country("../etc/passwd"));
        assert!(!is_valid_country("us/extra"));
        assert!(!is_valid_country("de.png?x=1"));
        assert!(!is_valid_country("averyveryverylongcode"));
    }
}
