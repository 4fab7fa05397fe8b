//! Validation outcomes.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Error text attached to every internal link whose target is missing.
pub const NOT_FOUND_MESSAGE: &str = "File not found in repository";

/// The outcome of checking one link. Each variant carries only its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// A same-document `#fragment` link.
    InternalAnchor,
    /// A repository path that exists.
    InternalOk {
        /// Normalized, repository-relative path that was found.
        resolved_path: String,
    },
    /// A repository path that could not be fetched.
    InternalNotFound {
        /// Normalized path that was looked up.
        attempted_path: String,
        /// Failure detail.
        error: String,
    },
    /// An external URL that answered with an HTTP status.
    External {
        /// Status code of the final response.
        code: u16,
    },
    /// An external URL that could not be probed at all.
    Unreachable {
        /// Transport failure description.
        error: String,
    },
}

impl LinkStatus {
    /// Whether this outcome counts as a working link.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::InternalAnchor | Self::InternalOk { .. } => true,
            Self::External { code } => (200..300).contains(code),
            Self::InternalNotFound { .. } | Self::Unreachable { .. } => false,
        }
    }

    /// Symbolic label as shown in reports and JSON output.
    ///
    /// External results render their numeric code; probe failures render `0`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::InternalAnchor => "INTERNAL_ANCHOR".into(),
            Self::InternalOk { .. } => "INTERNAL_OK".into(),
            Self::InternalNotFound { .. } => "INTERNAL_NOT_FOUND".into(),
            Self::External { code } => code.to_string(),
            Self::Unreachable { .. } => "0".into(),
        }
    }

    /// Failure detail, when the check produced one.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::InternalNotFound { error, .. } | Self::Unreachable { error } => Some(error),
            _ => None,
        }
    }
}

/// One checked link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// The link exactly as written in the source file.
    pub url: String,
    /// Path of the file the link was found in.
    pub filename: String,
    /// What the check found.
    pub status: LinkStatus,
}

impl LinkRecord {
    /// Creates a record.
    pub fn new(url: impl Into<String>, filename: impl Into<String>, status: LinkStatus) -> Self {
        Self { url: url.into(), filename: filename.into(), status }
    }

    /// Shorthand for `self.status.is_valid()`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}

impl Serialize for LinkRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LinkRecord", 7)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("filename", &self.filename)?;
        match &self.status {
            LinkStatus::External { code } => state.serialize_field("status", code)?,
            LinkStatus::Unreachable { .. } => state.serialize_field("status", &0u16)?,
            other => state.serialize_field("status", &other.label())?,
        }
        state.serialize_field("valid", &self.is_valid())?;
        match &self.status {
            LinkStatus::InternalOk { resolved_path } => {
                state.serialize_field("resolvedPath", resolved_path)?;
                state.skip_field("attemptedPath")?;
            }
            LinkStatus::InternalNotFound { attempted_path, .. } => {
                state.skip_field("resolvedPath")?;
                state.serialize_field("attemptedPath", attempted_path)?;
            }
            _ => {
                state.skip_field("resolvedPath")?;
                state.skip_field("attemptedPath")?;
            }
        }
        match self.status.error() {
            Some(error) => state.serialize_field("error", error)?,
            None => state.skip_field("error")?,
        }
        state.end()
    }
}
