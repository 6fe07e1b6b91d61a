//! Request URI parsing and reassembly.
//!
//! Request URIs are parsed with the `url` crate, which lower-cases the host and
//! drops default ports but keeps percent-encoded path and query bytes verbatim.

use url::Url;

/// Errors that can occur while parsing a request URI.
#[derive(Debug, thiserror::Error)]
pub enum UriError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses an absolute `http`/`https` request URI.
///
/// # Errors
///
/// Returns [`UriError::InvalidFormat`] for unparseable input,
/// [`UriError::UnsupportedProtocol`] for other schemes and
/// [`UriError::MissingHost`] when no host is present.
///
/// # Examples
///
/// ```ignore
/// let url = parse_request_uri("HTTP://Site.com:80/My-Page?a=B").unwrap();
/// assert_eq!(url.host_str(), Some("site.com"));
/// assert_eq!(url.path(), "/My-Page");
/// ```
pub fn parse_request_uri(input: &str) -> Result<Url, UriError> {
    let url = Url::parse(input.trim()).map_err(|e| UriError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UriError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UriError::MissingHost);
    }

    Ok(url)
}

/// `host[:port]` of the URL, omitting default ports.
pub fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

/// `scheme://host[:port]` of the URL.
pub fn origin(url: &Url) -> String {
    format!("{}://{}", url.scheme(), authority(url))
}

/// Rebuilds the URL with `path` replacing its path. The query is kept and
/// the fragment dropped.
pub fn with_path(url: &Url, path: &str) -> String {
    let mut out = format!("{}{}", origin(url), path);
    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }
    out
}

/// Path plus query string, as the host's internal request path.
pub fn path_and_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_http() {
        let url = parse_request_uri("http://site.com/My-Page").unwrap();
        assert_eq!(url.path(), "/My-Page");
        assert_eq!(authority(&url), "site.com");
    }

    #[test]
    fn test_parse_lowercases_host_and_drops_default_port() {
        let url = parse_request_uri("HTTPS://SITE.COM:443/Path").unwrap();
        assert_eq!(origin(&url), "https://site.com");
        assert_eq!(url.path(), "/Path");
    }

    #[test]
    fn test_parse_keeps_custom_port() {
        let url = parse_request_uri("http://localhost:8080/test").unwrap();
        assert_eq!(authority(&url), "localhost:8080");
    }

    #[test]
    fn test_parse_preserves_percent_encoding() {
        let url = parse_request_uri("http://site.com/caf%C3%A9?q=a%20b").unwrap();
        assert_eq!(path_and_query(&url), "/caf%C3%A9?q=a%20b");
    }

    #[test]
    fn test_parse_invalid_url() {
        let result = parse_request_uri("not a valid uri");
        assert!(matches!(result.unwrap_err(), UriError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_empty_string() {
        let result = parse_request_uri("");
        assert!(matches!(result.unwrap_err(), UriError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_ftp_protocol() {
        let result = parse_request_uri("ftp://site.com/file.txt");
        assert!(matches!(result.unwrap_err(), UriError::UnsupportedProtocol));
    }

    #[test]
    fn test_parse_javascript_protocol() {
        let result = parse_request_uri("javascript:alert('xss')");
        assert!(matches!(result.unwrap_err(), UriError::UnsupportedProtocol));
    }

    #[test]
    fn test_with_path_keeps_query_and_drops_fragment() {
        let url = parse_request_uri("http://site.com/My-Page?a=B#top").unwrap();
        assert_eq!(with_path(&url, "/my-page"), "http://site.com/my-page?a=B");
    }
}
