use crate::utils::error::{Result, ScrapeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::config(format!(
            "{field_name}: URL cannot be empty"
        )));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::config(format!(
                "{field_name}: unsupported URL scheme '{scheme}'"
            ))),
        },
        Err(e) => Err(ScrapeError::config(format!(
            "{field_name}: invalid URL '{url_str}': {e}"
        ))),
    }
}

pub fn validate_positive(field_name: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(ScrapeError::config(format!(
            "{field_name}: must be greater than zero"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_base_url("base_url", "https://www.spielerplus.de/").is_ok());
        assert!(validate_base_url("base_url", "http://localhost:8080").is_ok());
    }

    #[test]
    fn rejects_empty_and_bad_schemes() {
        assert!(validate_base_url("base_url", "").is_err());
        assert!(validate_base_url("base_url", "ftp://example.com").is_err());
        assert!(validate_base_url("base_url", "not a url").is_err());
    }

    #[test]
    fn rejects_zero() {
        assert!(validate_positive("timeout_secs", 0).is_err());
        assert!(validate_positive("timeout_secs", 30).is_ok());
    }
}
