//! Web URL value: absolute http(s) URL with a host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest URL accepted, matching common browser limits.
pub const MAX_URL_LENGTH: usize = 2083;

/// A well-formed web URL. Keeps the text exactly as submitted; parsing only validates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebUrl(String);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("URL must be at most {} characters", MAX_URL_LENGTH)]
    TooLong,
    #[error("invalid URL: {0}")]
    Malformed(String),
    #[error("URL scheme must be http or https, got '{0}'")]
    Scheme(String),
    #[error("URL must have a host")]
    MissingHost,
}

impl WebUrl {
    pub fn parse(s: &str) -> Result<Self, UrlError> {
        if s.len() > MAX_URL_LENGTH {
            return Err(UrlError::TooLong);
        }
        let parsed = url::Url::parse(s).map_err(|e| UrlError::Malformed(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(UrlError::Scheme(other.to_string())),
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingHost);
        }
        Ok(WebUrl(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WebUrl {
    type Error = UrlError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        WebUrl::parse(&s)
    }
}

impl From<WebUrl> for String {
    fn from(u: WebUrl) -> Self {
        u.0
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(WebUrl::parse("https://www.linkedin.com/in/someone").is_ok());
        assert!(WebUrl::parse("http://example.com").is_ok());
    }

    #[test]
    fn keeps_text_as_submitted() {
        let u = WebUrl::parse("https://example.com").unwrap();
        assert_eq!(u.as_str(), "https://example.com");
    }

    #[test]
    fn rejects_non_urls() {
        assert!(matches!(WebUrl::parse("not-a-url"), Err(UrlError::Malformed(_))));
        assert!(matches!(WebUrl::parse(""), Err(UrlError::Malformed(_))));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(WebUrl::parse("ftp://example.com/x"), Err(UrlError::Scheme(_))));
        assert!(matches!(WebUrl::parse("mailto:a@b.com"), Err(UrlError::Scheme(_))));
    }

    #[test]
    fn rejects_overlong() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(WebUrl::parse(&long), Err(UrlError::TooLong));
    }

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(UrlError::TooLong.to_string(), "URL must be at most 2083 characters");
        let scheme = WebUrl::parse("ftp://example.com").unwrap_err();
        assert_eq!(scheme.to_string(), "URL scheme must be http or https, got 'ftp'");
        assert_eq!(
            WebUrl::parse("not-a-url").unwrap_err().to_string(),
            "invalid URL: relative URL without a base"
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<WebUrl, _> = serde_json::from_str("\"https://a.io\"");
        assert!(ok.is_ok());
        let bad: Result<WebUrl, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
