//! Output contract of the command layer.
//!
//! Every command answers with a success flag and a human-readable message; the
//! front end shows the message as-is.

use serde::{Deserialize, Serialize};

use crate::error::PathError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
}

impl CommandResponse {
    #[inline]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[inline]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Failure carrying the error's own description.
    pub fn from_error(err: &PathError) -> Self {
        Self::fail(err.to_string())
    }
}

impl From<PathError> for CommandResponse {
    fn from(err: PathError) -> Self {
        Self::from_error(&err)
    }
}

/// `"<label> (<n>):\n<a>, <b>, ..."` listing used by the query commands.
pub fn format_listing<T: std::fmt::Display>(label: &str, items: &[T]) -> String {
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{label} ({}):\n{joined}", items.len())
}
