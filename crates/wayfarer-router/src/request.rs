//! The navigation request type.
//!
//! [`NavRequest`] carries the URL being navigated to: the path the
//! registry matches against, plus the query string for loaders that want
//! it. One request value describes one navigation event.

/// A navigation request, built from a URI reference such as
/// `/apps/abc123/logs?tab=errors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRequest {
    path: String,
    query_string: String,
}

impl NavRequest {
    /// Creates a request from a URI reference. Everything after the first
    /// `?` is treated as the query string.
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        match uri.split_once('?') {
            Some((path, query)) => Self {
                path: path.to_string(),
                query_string: query.to_string(),
            },
            None => Self {
                path: uri,
                query_string: String::new(),
            },
        }
    }

    /// Returns the path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string (without the leading `?`), empty if
    /// there was none.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Reassembles the full URI reference.
    pub fn uri(&self) -> String {
        if self.query_string.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_only() {
        let req = NavRequest::new("/apps/abc123");
        assert_eq!(req.path(), "/apps/abc123");
        assert_eq!(req.query_string(), "");
        assert_eq!(req.uri(), "/apps/abc123");
    }

    #[test]
    fn test_path_and_query() {
        let req = NavRequest::new("/apps/abc123/logs?tab=errors&page=2");
        assert_eq!(req.path(), "/apps/abc123/logs");
        assert_eq!(req.query_string(), "tab=errors&page=2");
        assert_eq!(req.uri(), "/apps/abc123/logs?tab=errors&page=2");
    }

    #[test]
    fn test_only_first_question_mark_splits() {
        let req = NavRequest::new("/search?q=a?b");
        assert_eq!(req.path(), "/search");
        assert_eq!(req.query_string(), "q=a?b");
    }
}
