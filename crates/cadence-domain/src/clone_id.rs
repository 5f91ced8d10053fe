//! Clone identifiers

use std::fmt;

/// Opaque identifier of a voice clone
///
/// Identifiers are issued by the backend; the client only checks that they
/// are usable as a single URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CloneId(String);

impl CloneId {
    /// Create a CloneId
    ///
    /// # Examples
    ///
    /// ```
    /// use cadence_domain::CloneId;
    ///
    /// let id = CloneId::new("V1StGXR8_Z5jdHi6B-myT").unwrap();
    /// assert_eq!(id.as_str(), "V1StGXR8_Z5jdHi6B-myT");
    /// assert!(CloneId::new("").is_err());
    /// assert!(CloneId::new("a/b").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.is_empty() {
            return Err("Clone ID must not be empty".to_string());
        }
        if id.chars().any(|c| c == '/' || c.is_whitespace()) {
            return Err(format!("Invalid clone ID: {:?}", id));
        }
        Ok(Self(id))
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CloneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CloneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CloneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_whitespace() {
        assert!(CloneId::new("a b").is_err());
        assert!(CloneId::new(" ").is_err());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = CloneId::new("a").unwrap();
        let b = CloneId::new("b").unwrap();
        assert!(a < b);
    }
}
