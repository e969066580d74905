//! Format descriptors and validation of SDP parameters against receiver capabilities.
//!
//! Each supported media type is described by a static [`Format`]: its absence
//! policy, its parser and its constraint table. Validation selects the format
//! by the media type of the SDP parameters and never needs to know which codec
//! it is dealing with; the codecs themselves are listed in [`crate::codec`].


use std::fmt;

use log::{debug, trace, warn};
use serde_json::Value;
use shared::error::{ConstraintMismatch, Error, Result};

use crate::capabilities::{
    is_constraint_set_enabled, match_integer_constraint, match_string_constraint,
};
use crate::codec::{CodecParameters, DEFAULT_FORMATS};
use crate::media_type::{get_media_type, media_type_eq};
use crate::sdp_parameters::{Fmtp, SdpParameters};

/// Video format URN.
///
/// <https://specs.amwa.tv/nmos-parameter-registers/branches/main/formats/>
pub const FORMAT_VIDEO: &str = "urn:x-nmos:format:video";

const RECEIVER_FORMAT: &str = "format";
const RECEIVER_CAPS: &str = "caps";
const CAPS_MEDIA_TYPES: &str = "media_types";
const CAPS_CONSTRAINT_SETS: &str = "constraint_sets";

/// How a parser treats format parameters that are absent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AbsencePolicy {
    /// Absent parameters take their default value.
    Tolerant,
    /// Every parameter is required; absence is a parse failure naming the parameter.
    Strict,
}

impl AbsencePolicy {
    /// Looks up a format parameter, failing under the strict policy if it is absent.
    pub fn lookup<'a>(self, fmtp: &'a Fmtp, name: &str) -> Result<Option<&'a str>> {
        match (fmtp.get(name), self) {
            (Some(value), _) => Ok(Some(value)),
            (None, AbsencePolicy::Tolerant) => Ok(None),
            (None, AbsencePolicy::Strict) => Err(Error::ErrMissingFormatParameter(name.to_owned())),
        }
    }
}

/// An offered value that a capability constraint is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintValue {
    String(String),
    Integer(i64),
}

impl ConstraintValue {
    pub fn matches(&self, con: &Value) -> bool {
        match self {
            ConstraintValue::String(s) => match_string_constraint(s, con),
            ConstraintValue::Integer(i) => match_integer_constraint(*i, con),
        }
    }
}

impl From<ConstraintValue> for Value {
    fn from(value: ConstraintValue) -> Self {
        match value {
            ConstraintValue::String(s) => Value::String(s),
            ConstraintValue::Integer(i) => Value::from(i),
        }
    }
}

/// One entry of a constraint table.
#[derive(Copy, Clone)]
pub struct CapabilityConstraint {
    /// Capability URN, e.g. "urn:x-nmos:cap:format:profile_level_id"
    pub key: &'static str,
    /// Extracts the offered value from the SDP parameters and their parsed form;
    /// `None` if the parsed parameters belong to another codec.
    pub value: fn(&SdpParameters, &CodecParameters) -> Option<ConstraintValue>,
}

impl CapabilityConstraint {
    pub fn matches(&self, sdp: &SdpParameters, params: &CodecParameters, con: &Value) -> bool {
        (self.value)(sdp, params).is_some_and(|actual| actual.matches(con))
    }
}

impl fmt::Debug for CapabilityConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityConstraint")
            .field("key", &self.key)
            .finish()
    }
}

/// Describes how SDP parameters of one media type are parsed and validated.
pub struct Format {
    /// e.g. "video/H264"
    pub media_type: &'static str,
    /// e.g. "urn:x-nmos:format:video"
    pub format: &'static str,
    pub policy: AbsencePolicy,
    pub parse: fn(&SdpParameters, AbsencePolicy) -> Result<CodecParameters>,
    pub constraints: &'static [CapabilityConstraint],
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Format")
            .field("media_type", &self.media_type)
            .field("format", &self.format)
            .field("policy", &self.policy)
            .field("constraints", &self.constraints)
            .finish()
    }
}

impl Format {
    pub fn matches_media_type(&self, sdp: &SdpParameters) -> bool {
        media_type_eq(self.media_type, &get_media_type(sdp))
    }

    /// Parses the format parameters according to this format's absence policy.
    pub fn parse_sdp_parameters(&self, sdp: &SdpParameters) -> Result<CodecParameters> {
        (self.parse)(sdp, self.policy)
    }

    /// Validates SDP parameters against a single constraint set.
    ///
    /// Fails with a usage error if the SDP parameters are not of this format's
    /// media type, with a malformed parameter error if they cannot be parsed, and
    /// with the first failing constraint otherwise. Keys that the constraint table
    /// does not recognize are ignored.
    pub fn validate(&self, constraint_set: &Value, sdp: &SdpParameters) -> Result<()> {
        self.check_media_type(sdp)?;
        let params = self.parse_sdp_parameters(sdp)?;
        self.match_constraint_set(constraint_set, sdp, &params)
    }

    /// Validates SDP parameters against an IS-04 receiver: its `format`, its
    /// `caps.media_types` and its `caps.constraint_sets`, of which at least one
    /// enabled constraint set must be satisfied.
    pub fn validate_receiver(&self, receiver: &Value, sdp: &SdpParameters) -> Result<()> {
        self.check_media_type(sdp)?;
        let params = self.parse_sdp_parameters(sdp)?;

        if let Some(format) = receiver.get(RECEIVER_FORMAT) {
            let format = format.as_str().unwrap_or_default();
            if format != self.format {
                return Err(Error::ErrUnexpectedFormat {
                    expected: self.format.to_owned(),
                    actual: format.to_owned(),
                });
            }
        }

        let caps = receiver.get(RECEIVER_CAPS);

        if let Some(media_types) = caps.and_then(|caps| caps.get(CAPS_MEDIA_TYPES)) {
            let media_type = get_media_type(sdp);
            let listed = media_types.as_array().is_some_and(|media_types| {
                media_types
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|listed| media_type_eq(listed, &media_type))
            });
            if !listed {
                return Err(Error::ErrUnsupportedMediaType(media_type));
            }
        }

        let Some(constraint_sets) = caps.and_then(|caps| caps.get(CAPS_CONSTRAINT_SETS)) else {
            return Ok(());
        };
        let constraint_sets = constraint_sets
            .as_array()
            .ok_or(Error::ErrInvalidConstraintSet)?;

        let mut first_mismatch = None;
        for (index, constraint_set) in constraint_sets.iter().enumerate() {
            if !is_constraint_set_enabled(constraint_set) {
                debug!("skipping disabled constraint set {index}");
                continue;
            }

            match self.match_constraint_set(constraint_set, sdp, &params) {
                Ok(()) => return Ok(()),
                Err(err) if err.is_constraint_mismatch() => {
                    debug!("constraint set {index} not satisfied: {err}");
                    first_mismatch.get_or_insert(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(first_mismatch.unwrap_or(Error::ErrNoMatchingConstraintSet))
    }

    fn check_media_type(&self, sdp: &SdpParameters) -> Result<()> {
        if self.matches_media_type(sdp) {
            Ok(())
        } else {
            let actual = get_media_type(sdp);
            warn!("{} validator invoked on {actual}", self.media_type);
            Err(Error::ErrUnexpectedMediaType {
                expected: self.media_type.to_owned(),
                actual,
            })
        }
    }

    /// Evaluates the constraint table in order against the keys present in the
    /// constraint set, stopping at the first mismatch.
    fn match_constraint_set(
        &self,
        constraint_set: &Value,
        sdp: &SdpParameters,
        params: &CodecParameters,
    ) -> Result<()> {
        let constraint_set = match constraint_set {
            Value::Null => return Ok(()),
            Value::Object(constraint_set) => constraint_set,
            _ => return Err(Error::ErrInvalidConstraintSet),
        };

        for constraint in self.constraints {
            let Some(con) = constraint_set.get(constraint.key) else {
                continue;
            };

            let actual = (constraint.value)(sdp, params);
            trace!("{}: {:?} against {}", constraint.key, actual, con);

            if !actual.as_ref().is_some_and(|actual| actual.matches(con)) {
                let mismatch = ConstraintMismatch {
                    key: constraint.key.to_owned(),
                    expected: con.clone(),
                    actual: actual.map_or(Value::Null, Value::from),
                };
                debug!("{mismatch}");
                return Err(Error::ErrConstraintMismatch(mismatch));
            }
        }

        Ok(())
    }
}

/// A set of formats keyed by media type, selected at validation time by the
/// media type of the SDP parameters.
///
/// A registry is built once and is read-only afterwards, so it can be shared
/// across threads without locking.
#[derive(Default, Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<&'static Format>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a format; each media type can be registered once.
    pub fn register_format(&mut self, format: &'static Format) -> Result<()> {
        if self.find_format(format.media_type).is_some() {
            return Err(Error::ErrFormatAlreadyRegistered(
                format.media_type.to_owned(),
            ));
        }
        self.formats.push(format);
        Ok(())
    }

    /// Registers the [`DEFAULT_FORMATS`].
    pub fn register_default_formats(&mut self) -> Result<()> {
        for &format in DEFAULT_FORMATS {
            self.register_format(format)?;
        }
        Ok(())
    }

    pub fn formats(&self) -> &[&'static Format] {
        &self.formats
    }

    pub fn find_format(&self, media_type: &str) -> Option<&'static Format> {
        find_format(&self.formats, media_type)
    }

    /// Validates SDP parameters of any registered media type against a constraint set.
    pub fn validate_sdp_parameters(
        &self,
        constraint_set: &Value,
        sdp: &SdpParameters,
    ) -> Result<()> {
        format_for(&self.formats, sdp)?.validate(constraint_set, sdp)
    }

    /// Validates SDP parameters of any registered media type against an IS-04 receiver.
    pub fn validate_receiver(&self, receiver: &Value, sdp: &SdpParameters) -> Result<()> {
        format_for(&self.formats, sdp)?.validate_receiver(receiver, sdp)
    }
}

fn find_format(formats: &[&'static Format], media_type: &str) -> Option<&'static Format> {
    formats
        .iter()
        .copied()
        .find(|format| media_type_eq(format.media_type, media_type))
}

pub(crate) fn format_for(
    formats: &[&'static Format],
    sdp: &SdpParameters,
) -> Result<&'static Format> {
    let media_type = get_media_type(sdp);
    find_format(formats, &media_type).ok_or(Error::ErrUnsupportedMediaType(media_type))
}
