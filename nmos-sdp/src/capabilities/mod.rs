//! Generic matching of actual values against receiver capability constraints.
//!
//! A constraint is the JSON value published for one capability key in a
//! constraint set of an IS-04 receiver's `caps`:
//!
//! | Shape | Example | Meaning |
//! |-------|---------|---------|
//! | absent | `null` | unconstrained |
//! | scalar | `"video/H264"` | exact match |
//! | enumeration | `["42E01E", "4D0028"]` or `{"enum": [...]}` | membership |
//! | range | `{"minimum": 1, "maximum": 5}` | inclusive bounds, either optional |
//!
//! Any other shape cannot be satisfied.
//!
//! ## Specifications
//!
//! * [NMOS Parameter Registers - Capabilities](https://specs.amwa.tv/nmos-parameter-registers/branches/main/capabilities/)
//! * [BCP-004-01 Receiver Capabilities](https://specs.amwa.tv/bcp-004-01/)


use std::cmp::Ordering;

use serde_json::Value;

/// Constrains the media type, e.g. "video/H264".
pub const CAP_FORMAT_MEDIA_TYPE: &str = "urn:x-nmos:cap:format:media_type";

/// Enables or disables a whole constraint set; defaults to enabled.
pub const CAP_META_ENABLED: &str = "urn:x-nmos:cap:meta:enabled";

const CONSTRAINT_ENUM: &str = "enum";
const CONSTRAINT_MINIMUM: &str = "minimum";
const CONSTRAINT_MAXIMUM: &str = "maximum";

/// Recognized shape of a constraint expression.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Constraint<'a> {
    /// No constraint expression; anything is acceptable
    Absent,
    /// The actual value must equal this value
    Scalar(&'a Value),
    /// The actual value must equal one of these values
    Enumeration(&'a [Value]),
    /// The actual value must lie within the inclusive bounds that are present
    Range {
        minimum: Option<&'a Value>,
        maximum: Option<&'a Value>,
    },
    /// Both an enumeration and a range, all of which must hold
    EnumerationAndRange {
        values: &'a [Value],
        minimum: Option<&'a Value>,
        maximum: Option<&'a Value>,
    },
    /// A shape that no actual value can satisfy
    Unrecognized,
}

impl<'a> Constraint<'a> {
    pub fn classify(con: &'a Value) -> Self {
        match con {
            Value::Null => Constraint::Absent,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Constraint::Scalar(con),
            Value::Array(values) => Constraint::Enumeration(values),
            Value::Object(object) => {
                let values = match object.get(CONSTRAINT_ENUM) {
                    None => None,
                    Some(Value::Array(values)) => Some(values.as_slice()),
                    Some(_) => return Constraint::Unrecognized,
                };
                let minimum = object.get(CONSTRAINT_MINIMUM);
                let maximum = object.get(CONSTRAINT_MAXIMUM);
                let bounded = minimum.is_some() || maximum.is_some();

                match (values, bounded) {
                    (Some(values), false) => Constraint::Enumeration(values),
                    (None, true) => Constraint::Range { minimum, maximum },
                    (Some(values), true) => Constraint::EnumerationAndRange {
                        values,
                        minimum,
                        maximum,
                    },
                    (None, false) => Constraint::Unrecognized,
                }
            }
        }
    }
}

/// Returns true if the string value satisfies the constraint.
///
/// Ranges are not meaningful for strings and are never satisfied.
pub fn match_string_constraint(actual: &str, con: &Value) -> bool {
    match Constraint::classify(con) {
        Constraint::Absent => true,
        Constraint::Scalar(value) => value.as_str() == Some(actual),
        Constraint::Enumeration(values) => values.iter().any(|v| v.as_str() == Some(actual)),
        Constraint::Range { .. }
        | Constraint::EnumerationAndRange { .. }
        | Constraint::Unrecognized => false,
    }
}

/// Returns true if the integer value satisfies the constraint.
///
/// Scalars, enumeration members and bounds must be JSON numbers; bounds may be
/// fractional.
pub fn match_integer_constraint(actual: i64, con: &Value) -> bool {
    match Constraint::classify(con) {
        Constraint::Absent => true,
        Constraint::Scalar(value) => integer_eq(actual, value),
        Constraint::Enumeration(values) => values.iter().any(|v| integer_eq(actual, v)),
        Constraint::Range { minimum, maximum } => in_range(actual, minimum, maximum),
        Constraint::EnumerationAndRange {
            values,
            minimum,
            maximum,
        } => values.iter().any(|v| integer_eq(actual, v)) && in_range(actual, minimum, maximum),
        Constraint::Unrecognized => false,
    }
}

/// Returns false only if the constraint set is explicitly disabled.
pub fn is_constraint_set_enabled(constraint_set: &Value) -> bool {
    constraint_set
        .get(CAP_META_ENABLED)
        .and_then(Value::as_bool)
        .unwrap_or(true)
}

fn compare(actual: i64, value: &Value) -> Option<Ordering> {
    let Value::Number(n) = value else {
        return None;
    };

    if let Some(i) = n.as_i64() {
        Some(actual.cmp(&i))
    } else if let Some(u) = n.as_u64() {
        Some(i128::from(actual).cmp(&i128::from(u)))
    } else {
        n.as_f64().and_then(|f| (actual as f64).partial_cmp(&f))
    }
}

fn integer_eq(actual: i64, value: &Value) -> bool {
    compare(actual, value) == Some(Ordering::Equal)
}

fn in_range(actual: i64, minimum: Option<&Value>, maximum: Option<&Value>) -> bool {
    let above_min = minimum.is_none_or(|min| compare(actual, min).is_some_and(Ordering::is_ge));
    let below_max = maximum.is_none_or(|max| compare(actual, max).is_some_and(Ordering::is_le));

    above_min && below_max
}
