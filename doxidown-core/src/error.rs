//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting Doxygen XML
///
/// Schema violations are deliberately fatal: once the assumed Doxygen output
/// contract is broken, cross-reference integrity of the whole run can no
/// longer be guaranteed. Unknown-but-optional constructs are *not* errors;
/// they are reported through [`crate::parse::ParseSession`] diagnostics and
/// the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The raw XML could not be parsed at all
    Xml(String),
    /// A mandatory child/attribute is missing, duplicated or malformed
    Schema {
        /// Name of the offending XML element
        element: String,
        message: String,
    },
}

impl ConvertError {
    /// Shorthand for a schema violation on a named element.
    pub fn schema(element: &str, message: impl Into<String>) -> Self {
        ConvertError::Schema {
            element: element.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Xml(msg) => write!(f, "XML error: {msg}"),
            ConvertError::Schema { element, message } => {
                write!(f, "Schema violation in <{element}>: {message}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}
