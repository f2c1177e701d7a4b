use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype_string {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the inner string as a str slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

newtype_string!(DocumentId, "Identifies one uploaded document.");
newtype_string!(UserId, "Identifies the owning user of a document.");
newtype_string!(ConversationId, "Identifies a conversation bound to a document.");
newtype_string!(JobId, "Identifies a queued unit of work.");
newtype_string!(
    IndexName,
    "Opaque handle locating a document's derived search index. Globally unique and immutable once assigned."
);

/// Classification of a source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A network URL (`http://` or `https://`); fetched over HTTP.
    RemoteUrl,
    /// A filesystem path, typically a temporary upload that must be
    /// cleaned up after podcast generation.
    LocalPath,
}

/// Where a document's raw bytes live. Opaque to the pipelines except for
/// the remote-vs-local distinction, which drives temp-file cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLocation(String);

impl SourceLocation {
    /// Create a source location from a raw URI or path string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the inner string as a str slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the location by scheme prefix.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            SourceKind::RemoteUrl
        } else {
            SourceKind::LocalPath
        }
    }

    /// Whether this location refers to a local file.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.kind() == SourceKind::LocalPath
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SourceLocation {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SourceLocation {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_from_str() {
        let id = DocumentId::from("doc-1");
        assert_eq!(id.as_str(), "doc-1");
        assert_eq!(&*id, "doc-1");
    }

    #[test]
    fn newtype_serde_roundtrip() {
        let idx = IndexName::new("idx-abc");
        let json = serde_json::to_string(&idx).unwrap();
        assert_eq!(json, "\"idx-abc\"");
        let back: IndexName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, idx);
    }

    #[test]
    fn newtype_display() {
        let id = JobId::new("job-42");
        assert_eq!(format!("{id}"), "job-42");
    }

    #[test]
    fn source_location_kinds() {
        assert_eq!(
            SourceLocation::from("https://cdn.example.com/a.pdf").kind(),
            SourceKind::RemoteUrl
        );
        assert_eq!(
            SourceLocation::from("http://host/a.pdf").kind(),
            SourceKind::RemoteUrl
        );
        assert_eq!(
            SourceLocation::from("uploads/1693-a.pdf").kind(),
            SourceKind::LocalPath
        );
        assert!(SourceLocation::from("/tmp/a.pdf").is_local());
    }
}
