use serde::{Deserialize, Serialize};

/// Field name used for validation segments that do not name a field
pub const GENERAL_FIELD: &str = "general";

/// A single invalid input field in a validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Parse a validation message of the form `field: message; field: message`
///
/// Segments are split on `;` and trimmed; blank segments are skipped. Each
/// segment is split on its first `:`. A segment without a colon is reported
/// under the [`GENERAL_FIELD`] name. Segments whose trimmed field or message
/// is empty are dropped, then one trailing period is removed from the
/// message. Output order matches input order.
///
/// ```
/// use keystone_fault::{FieldError, parse_field_errors};
///
/// let fields = parse_field_errors("email: is required; name: is required.");
/// assert_eq!(
///     fields,
///     vec![
///         FieldError::new("email", "is required"),
///         FieldError::new("name", "is required"),
///     ]
/// );
/// ```
pub fn parse_field_errors(input: &str) -> Vec<FieldError> {
    input
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            let Some((field, message)) = segment.split_once(':') else {
                return Some(FieldError::new(GENERAL_FIELD, segment));
            };

            let field = field.trim();
            let message = message.trim();
            if field.is_empty() || message.is_empty() {
                return None;
            }

            Some(FieldError::new(field, message.strip_suffix('.').unwrap_or(message)))
        })
        .collect()
}
