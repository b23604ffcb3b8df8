//! Newtype domain identifiers.
//!
//! Every name that identifies something on the Codacy side is a distinct
//! newtype wrapping a primitive. This prevents accidentally passing, for
//! example, a [`BranchName`] where a [`RepositoryName`] is expected even
//! though both are strings under the hood.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// Returned when an empty string is decoded into a string identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identifier must not be empty")]
pub struct EmptyIdentifier;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and a
// TryFrom<String> that decoding goes through.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifier;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(EmptyIdentifier)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: server-assigned integers
// ---------------------------------------------------------------------------

/// A pull request number as assigned by the git provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a new pull request number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single export run.
///
/// Generated fresh for every CLI invocation and recorded on the root span so
/// all requests from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed (configuration / Git names)
// ---------------------------------------------------------------------------

string_id! {
    /// The git provider key used in Codacy URLs (e.g. `"gh"`, `"gl"`, `"bb"`).
    GitProvider
}

string_id! {
    /// The organization name as known to the git provider.
    OrganizationName
}

string_id! {
    /// A repository name, unique within its organization.
    RepositoryName
}

string_id! {
    /// A Git branch name (e.g. `"main"`, `"feature/login"`).
    BranchName
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_reject_empty_values() {
        assert!(RepositoryName::new("").is_none());
        assert!(BranchName::new(String::new()).is_none());
        assert_eq!(RepositoryName::new("api").unwrap().as_str(), "api");
    }

    #[test]
    fn string_ids_deserialize_from_plain_strings() {
        let name: RepositoryName = serde_json::from_str("\"web-app\"").unwrap();
        assert_eq!(name.to_string(), "web-app");
    }

    #[test]
    fn string_ids_refuse_to_decode_empty_strings() {
        let err = serde_json::from_str::<RepositoryName>("\"\"").unwrap_err();
        assert!(err.to_string().contains("identifier must not be empty"));
        assert!(serde_json::from_str::<BranchName>("\"\"").is_err());
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new_random(), RunId::new_random());
    }
}
