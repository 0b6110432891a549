//! Dotted/indexed field paths for validation error messages.

use std::fmt;

// -----------------------------------------------------------------------------
// FieldPath

/// The location of a field within a nested document.
///
/// Paths are built incrementally while deserialization descends into nested
/// structures: `root().field("author").field("tags").index(1)` renders as
/// `author.tags[1]`. A path lives only for the duration of one
/// deserialization call; it is rendered into an error message at the point
/// of failure and never stored anywhere else.
///
/// # Examples
///
/// ```
/// use forma_core::FieldPath;
///
/// let path = FieldPath::root().field("tags").index(1);
/// assert_eq!(path.as_str(), "tags[1]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// The document root. Renders as `<root>` in messages.
    #[inline]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns the path extended by a named field.
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_owned())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Returns the path extended by a sequence index.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Whether this is the document root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The rendered path. Empty for the root.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for FieldPath {
    #[inline]
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::FieldPath;

    #[test]
    fn builds_dotted_and_indexed_segments() {
        let path = FieldPath::root().field("author").field("posts").index(0).field("title");
        assert_eq!(path.as_str(), "author.posts[0].title");
    }

    #[test]
    fn root_renders_as_placeholder() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert_eq!(FieldPath::root().field("age").to_string(), "age");
    }

    #[test]
    fn index_at_root() {
        assert_eq!(FieldPath::root().index(3).as_str(), "[3]");
    }
}
