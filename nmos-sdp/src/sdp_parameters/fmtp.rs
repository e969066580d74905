use std::slice;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared::error::{Error, Result};

/// Format specific parameters of one payload type, i.e. the `key=value`
/// tokens of an `a=fmtp` attribute.
///
/// The order of the pairs is significant on the wire and is preserved.
/// Keys are unique: pushing an existing key replaces its value in place.
/// The JSON form is an array of `[key, value]` pairs, and deserializing it
/// applies the same rule.
///
/// <https://tools.ietf.org/html/rfc4566#section-6>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Fmtp(Vec<(String, String)>);

impl Fmtp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, or replaces the value of an existing one keeping its position.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Returns the value of the first parameter with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> slice::Iter<'_, (String, String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Fmtp
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fmtp = Fmtp::new();
        for (key, value) in iter {
            fmtp.push(key, value);
        }
        fmtp
    }
}

impl Serialize for Fmtp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fmtp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let pairs = Vec::<(String, String)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Fmtp {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Formats `value` as uppercase hexadecimal, zero-padded to `width` digits.
pub(crate) fn make_hex(value: u64, width: usize) -> String {
    format!("{value:0width$X}")
}

/// Parses a hexadecimal format parameter of exactly `width` digits; digits are
/// case-insensitive.
pub(crate) fn parse_hex(name: &str, value: &str, width: usize) -> Result<u64> {
    if value.len() != width || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(name, value));
    }
    u64::from_str_radix(value, 16).map_err(|_| invalid(name, value))
}

/// Parses a decimal format parameter; signs and whitespace are not accepted.
pub(crate) fn parse_decimal<T: FromStr>(name: &str, value: &str) -> Result<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(name, value));
    }
    value.parse::<T>().map_err(|_| invalid(name, value))
}

pub(crate) fn invalid(name: &str, value: &str) -> Error {
    Error::ErrInvalidFormatParameter {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}
