use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reasons a transcription request is rejected
///
/// Every variant is recoverable by the caller: correct the input and retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is absent
    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),

    /// A field typed against a closed set holds a non-member
    #[error("invalid value {value} for field '{field}': not a known {domain}")]
    InvalidEnumMember {
        field: &'static str,
        value: Value,
        domain: &'static str,
    },

    /// A numeric field is outside its permitted range
    #[error("value {value} for field '{field}' is outside the range {range}")]
    OutOfRangeValue {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    /// Individually valid fields that cannot be combined
    #[error("conflicting fields '{}' and '{}': {rule}", .fields[0], .fields[1])]
    InconsistentFieldCombination {
        fields: [&'static str; 2],
        rule: &'static str,
    },

    /// A field holds the wrong kind of JSON value
    #[error("field '{field}' must be {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },

    /// The request carries a field the service does not accept
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

impl ValidationError {
    /// Name of the field the error is about (the first one for combinations)
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequiredField(field)
            | Self::InvalidEnumMember { field, .. }
            | Self::OutOfRangeValue { field, .. }
            | Self::InvalidFieldType { field, .. } => field,
            Self::InconsistentFieldCombination { fields, .. } => fields[0],
            Self::UnknownField(field) => field,
        }
    }

    /// Machine-readable error code
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::InvalidEnumMember { .. } => "invalid_enum_member",
            Self::OutOfRangeValue { .. } => "out_of_range_value",
            Self::InconsistentFieldCombination { .. } => "inconsistent_field_combination",
            Self::InvalidFieldType { .. } => "invalid_field_type",
            Self::UnknownField(_) => "unknown_field",
        }
    }
}
