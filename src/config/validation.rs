// src/config/validation.rs

use crate::constants::MAX_PER_PAGE;
use crate::errors::ConfigError;
use url::Url;

/// Parses the GitLab base URL, accepting only `http` and `https`.
pub(super) fn parse_base_url(raw: Option<&str>) -> Result<Url, ConfigError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::Missing("--gitlab-url".to_string()))?;
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        option: "--gitlab-url".to_string(),
        reason: format!("'{}' is not a valid URL: {}", raw, e),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            option: "--gitlab-url".to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", url.scheme()),
        });
    }
    Ok(url)
}

/// Returns the value if it is present and not blank.
pub(super) fn require_non_empty(value: Option<String>, option: &str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::Missing(option.to_string()))
}

/// Checks the numeric options that clap cannot bound on its own.
pub(super) fn validate_ranges(
    per_page: u32,
    jobs: usize,
    max_depth: usize,
) -> Result<(), ConfigError> {
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(ConfigError::InvalidValue {
            option: "--per-page".to_string(),
            reason: format!("must be between 1 and {}", MAX_PER_PAGE),
        });
    }
    if jobs == 0 {
        return Err(ConfigError::InvalidValue {
            option: "--jobs".to_string(),
            reason: "must be 1 or greater".to_string(),
        });
    }
    if max_depth == 0 {
        return Err(ConfigError::InvalidValue {
            option: "--max-depth".to_string(),
            reason: "must be 1 or greater".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_required() {
        assert_eq!(
            parse_base_url(None),
            Err(ConfigError::Missing("--gitlab-url".to_string()))
        );
        assert_eq!(
            parse_base_url(Some("  ")),
            Err(ConfigError::Missing("--gitlab-url".to_string()))
        );
    }

    #[test]
    fn test_url_scheme_is_checked() {
        let err = parse_base_url(Some("ftp://gitlab.example.com")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));

        let err = parse_base_url(Some("gitlab.example.com")).unwrap_err();
        assert!(err.to_string().contains("not a valid URL"));

        assert!(parse_base_url(Some("http://localhost:8080")).is_ok());
    }

    #[test]
    fn test_ranges() {
        assert!(validate_ranges(100, 1, 64).is_ok());
        assert!(validate_ranges(1, 16, 1).is_ok());

        let err = validate_ranges(0, 1, 64).unwrap_err();
        assert!(err.to_string().contains("--per-page"));
        let err = validate_ranges(1000, 1, 64).unwrap_err();
        assert!(err.to_string().contains("between 1 and 100"));
        let err = validate_ranges(100, 0, 64).unwrap_err();
        assert!(err.to_string().contains("--jobs"));
        let err = validate_ranges(100, 1, 0).unwrap_err();
        assert!(err.to_string().contains("--max-depth"));
    }

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(
            require_non_empty(Some(" backend ".to_string()), "--group"),
            Ok("backend".to_string())
        );
    }
}
