//! Request path splitting.

use std::fmt;

/// Non-empty path segments of a request path.
///
/// `"/a//b/"` becomes `["a", "b"]`; `"/"` becomes an empty sequence, which
/// resolves to the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathComponents(Vec<String>);

impl PathComponents {
    /// Split a slash-delimited path, dropping empty segments.
    pub fn parse(path: &str) -> Self {
        Self(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<String>> for PathComponents {
    fn from(components: Vec<String>) -> Self {
        Self(components.into_iter().filter(|c| !c.is_empty()).collect())
    }
}

impl fmt::Display for PathComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_empty_segments() {
        let path = PathComponents::parse("//db///host/");
        assert_eq!(path.as_slice(), &["db".to_string(), "host".to_string()]);
    }

    #[test]
    fn test_root_is_empty() {
        assert!(PathComponents::parse("/").is_empty());
        assert!(PathComponents::parse("").is_empty());
    }

    #[test]
    fn test_from_vec_filters_empty() {
        let path = PathComponents::from(vec!["a".to_string(), String::new(), "b".to_string()]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_string(), "[a, b]");
    }
}
