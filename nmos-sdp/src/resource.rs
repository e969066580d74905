//! Typed access to fields of IS-04 resources (flows, senders) held as JSON.

use serde_json::Value;
use shared::error::{Error, Result};

fn field<'a>(resource: &'a Value, name: &str) -> Result<&'a Value> {
    resource
        .get(name)
        .ok_or_else(|| Error::ErrMissingResourceField(name.to_owned()))
}

pub(crate) fn field_u32(resource: &Value, name: &str) -> Result<u32> {
    field(resource, name)?
        .as_u64()
        .and_then(|value| u32::try_from(value).ok())
        .ok_or_else(|| Error::ErrInvalidResourceField(name.to_owned()))
}

pub(crate) fn field_u64_or(resource: &Value, name: &str, default: u64) -> Result<u64> {
    match resource.get(name) {
        None => Ok(default),
        Some(value) => value
            .as_u64()
            .ok_or_else(|| Error::ErrInvalidResourceField(name.to_owned())),
    }
}

pub(crate) fn field_str<'a>(resource: &'a Value, name: &str) -> Result<&'a str> {
    field(resource, name)?
        .as_str()
        .ok_or_else(|| Error::ErrInvalidResourceField(name.to_owned()))
}

/// Rejects resource values too wide for the format parameter they become.
pub(crate) fn at_most<T: PartialOrd>(name: &str, value: T, max: T) -> Result<T> {
    if value <= max {
        Ok(value)
    } else {
        Err(Error::ErrInvalidResourceField(name.to_owned()))
    }
}
