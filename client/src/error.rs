//! Error and warning types for the search client.

use std::fmt;


/// Which backend call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRole {
    Primary,
    Count,
    Directory,
}

impl fmt::Display for QueryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryRole::Primary => write!(f, "primary"),
            QueryRole::Count => write!(f, "count"),
            QueryRole::Directory => write!(f, "directory"),
        }
    }
}


#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Required attributes missing or invalid at construction time. Fatal:
    /// the session cannot be built.
    #[error("invalid configuration: {detail}")]
    Configuration { detail: String },

    /// The backend could not be reached for the named query.
    #[error("backend unreachable during the {role} query: {source}")]
    Network {
        role: QueryRole,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend answered the named query with an error payload.
    #[error("{role} query failed with status {status}: {reason}")]
    BackendQuery {
        role: QueryRole,
        status: u16,
        reason: String,
    },

    /// The backend answered with something that is not a usable JSON
    /// response body.
    #[error("{role} query returned an unusable response: {detail}")]
    MalformedResponse { role: QueryRole, detail: String },

    /// The count response referenced a collection the directory does not
    /// know. Data integrity, never ignored.
    #[error("collection directory has no title for collection id {id:?}")]
    UnknownCollection { id: String },
}


/// Non-fatal problems found while decoding a URL query string. The
/// offending parameter is dropped and the warning logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateDecodeWarning {
    #[error("duplicate search key {key:?} does not end with \"[]\"")]
    DuplicateScalarKey { key: String },

    #[error("search key {key:?} has an unusable value {value:?}")]
    InvalidNumber { key: String, value: String },
}
