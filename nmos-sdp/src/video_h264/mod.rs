//! "video/H264" format parameters.
//!
//! ## Specifications
//!
//! * [RFC 6184](https://tools.ietf.org/html/rfc6184) - RTP Payload Format for H.264 Video
//! * [IANA video/H264](https://www.iana.org/assignments/media-types/video/H264)


use std::fmt;

use serde_json::Value;
use shared::error::{Error, Result};

use crate::capabilities::CAP_FORMAT_MEDIA_TYPE;
use crate::codec::CodecParameters;
use crate::format::{AbsencePolicy, CapabilityConstraint, ConstraintValue, FORMAT_VIDEO, Format};
use crate::media_type::{MEDIA_TYPE_VIDEO_H264, get_media_type};
use crate::resource::{at_most, field_str, field_u32};
use crate::sdp_parameters::fmtp::{invalid, make_hex, parse_decimal, parse_hex};
use crate::sdp_parameters::{Fmtp, PayloadType, Rtpmap, SdpParameters, TsRefClk};

/// `a=rtpmap` encoding name
pub const ENCODING_NAME_H264: &str = "H264";
/// `a=rtpmap` clock rate
pub const CLOCK_RATE_H264: u32 = 90000;

/// fmtp "profile-level-id", 6 hex digits
pub const FMTP_PROFILE_LEVEL_ID: &str = "profile-level-id";
/// fmtp "packetization-mode", 0, 1 or 2
pub const FMTP_PACKETIZATION_MODE: &str = "packetization-mode";
/// fmtp "sprop-parameter-sets", comma separated base64 NAL units
pub const FMTP_SPROP_PARAMETER_SETS: &str = "sprop-parameter-sets";

/// Constrains the profile-level-id (number)
pub const CAP_FORMAT_PROFILE_LEVEL_ID: &str = "urn:x-nmos:cap:format:profile_level_id";
/// Constrains the packetization mode (string, see [`PacketizationMode`])
pub const CAP_TRANSPORT_PACKETIZATION_MODE: &str = "urn:x-nmos:cap:transport:packetization_mode";

const PROFILE_LEVEL_ID_HEX_DIGITS: usize = 6;
/// profile_idc, profile-iop and level_idc, one byte each
const PROFILE_LEVEL_ID_MAX: u32 = 0xFF_FFFF;

const FLOW_PROFILE_LEVEL_ID: &str = "profile_level_id";
const SENDER_PACKETIZATION_MODE: &str = "packetization_mode";

const SINGLE_NAL_UNIT_MODE_STR: &str = "single_nal_unit_mode";
const NON_INTERLEAVED_MODE_STR: &str = "non_interleaved_mode";
const INTERLEAVED_MODE_STR: &str = "interleaved_mode";

/// Packetization mode.
///
/// On the wire the mode is the integer enumerant of the "packetization-mode"
/// format parameter; in IS-04 resources and receiver capabilities it is a name
/// such as "non_interleaved_mode".
///
/// <https://tools.ietf.org/html/rfc6184#section-6>
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PacketizationMode {
    /// Single NAL Unit Mode
    #[default]
    SingleNalUnit = 0,
    /// Non-Interleaved Mode
    NonInterleaved = 1,
    /// Interleaved Mode
    Interleaved = 2,
}

impl PacketizationMode {
    /// The NMOS name of the mode.
    pub fn name(&self) -> &'static str {
        match *self {
            PacketizationMode::SingleNalUnit => SINGLE_NAL_UNIT_MODE_STR,
            PacketizationMode::NonInterleaved => NON_INTERLEAVED_MODE_STR,
            PacketizationMode::Interleaved => INTERLEAVED_MODE_STR,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            SINGLE_NAL_UNIT_MODE_STR => Some(PacketizationMode::SingleNalUnit),
            NON_INTERLEAVED_MODE_STR => Some(PacketizationMode::NonInterleaved),
            INTERLEAVED_MODE_STR => Some(PacketizationMode::Interleaved),
            _ => None,
        }
    }
}

impl TryFrom<u32> for PacketizationMode {
    type Error = Error;

    fn try_from(v: u32) -> Result<Self> {
        match v {
            0 => Ok(PacketizationMode::SingleNalUnit),
            1 => Ok(PacketizationMode::NonInterleaved),
            2 => Ok(PacketizationMode::Interleaved),
            _ => Err(invalid(FMTP_PACKETIZATION_MODE, &v.to_string())),
        }
    }
}

impl From<PacketizationMode> for u32 {
    fn from(mode: PacketizationMode) -> Self {
        mode as u32
    }
}

impl fmt::Display for PacketizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Additional "video/H264" parameters.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct VideoH264Parameters {
    /// profile_idc, constraint flags and level_idc; 0 when not signalled.
    /// At most 24 bits.
    pub profile_level_id: u32,
    pub packetization_mode: PacketizationMode,
    pub sprop_parameter_sets: String,
}

impl VideoH264Parameters {
    /// Constructs "video/H264" parameters from the IS-04 flow and sender.
    ///
    /// "If no profile-level-id is present, the Baseline profile, without additional
    /// constraints at Level 1, MUST be inferred." The flow's value is used as is, so a
    /// zero profile-level-id is not signalled and the receiver infers the default.
    /// <https://tools.ietf.org/html/rfc6184#section-8.1>
    pub fn from_resources(
        flow: &Value,
        sender: &Value,
        sprop_parameter_sets: &str,
    ) -> Result<Self> {
        let profile_level_id = at_most(
            FLOW_PROFILE_LEVEL_ID,
            field_u32(flow, FLOW_PROFILE_LEVEL_ID)?,
            PROFILE_LEVEL_ID_MAX,
        )?;
        let name = field_str(sender, SENDER_PACKETIZATION_MODE)?;
        let packetization_mode = PacketizationMode::from_name(name).ok_or_else(|| {
            Error::ErrInvalidResourceField(SENDER_PACKETIZATION_MODE.to_owned())
        })?;

        Ok(Self {
            profile_level_id,
            packetization_mode,
            sprop_parameter_sets: sprop_parameter_sets.to_owned(),
        })
    }
}

pub(crate) fn make_sdp_profile_level_id(profile_level_id: u32) -> String {
    make_hex(u64::from(profile_level_id), PROFILE_LEVEL_ID_HEX_DIGITS)
}

/// Constructs SDP parameters for "video/H264".
///
/// "profile-level-id" is only included when non-zero and "sprop-parameter-sets"
/// only when non-empty; "packetization-mode" is always included.
pub fn make_video_h264_sdp_parameters(
    session_name: &str,
    params: &VideoH264Parameters,
    payload_type: PayloadType,
    media_stream_ids: Vec<String>,
    ts_refclk: Vec<TsRefClk>,
) -> SdpParameters {
    let rtpmap = Rtpmap {
        payload_type,
        encoding_name: ENCODING_NAME_H264.to_owned(),
        clock_rate: CLOCK_RATE_H264,
    };

    let mut fmtp = Fmtp::new();
    if params.profile_level_id != 0 {
        fmtp.push(
            FMTP_PROFILE_LEVEL_ID,
            make_sdp_profile_level_id(params.profile_level_id),
        );
    }
    fmtp.push(
        FMTP_PACKETIZATION_MODE,
        u32::from(params.packetization_mode).to_string(),
    );
    if !params.sprop_parameter_sets.is_empty() {
        fmtp.push(
            FMTP_SPROP_PARAMETER_SETS,
            params.sprop_parameter_sets.as_str(),
        );
    }

    SdpParameters::video(session_name, rtpmap, fmtp, media_stream_ids, ts_refclk)
}

/// Gets the "video/H264" parameters from the SDP parameters.
///
/// All format parameters are optional; absent ones take their default value.
pub fn get_video_h264_parameters(sdp: &SdpParameters) -> Result<VideoH264Parameters> {
    parse_fmtp(&sdp.fmtp, VIDEO_H264.policy)
}

fn parse_fmtp(fmtp: &Fmtp, policy: AbsencePolicy) -> Result<VideoH264Parameters> {
    let mut params = VideoH264Parameters::default();

    if let Some(value) = policy.lookup(fmtp, FMTP_PROFILE_LEVEL_ID)? {
        let profile_level_id =
            parse_hex(FMTP_PROFILE_LEVEL_ID, value, PROFILE_LEVEL_ID_HEX_DIGITS)?;
        params.profile_level_id = u32::try_from(profile_level_id)
            .map_err(|_| invalid(FMTP_PROFILE_LEVEL_ID, value))?;
    }

    if let Some(value) = policy.lookup(fmtp, FMTP_PACKETIZATION_MODE)? {
        let mode = parse_decimal::<u32>(FMTP_PACKETIZATION_MODE, value)?;
        params.packetization_mode = PacketizationMode::try_from(mode)
            .map_err(|_| invalid(FMTP_PACKETIZATION_MODE, value))?;
    }

    if let Some(value) = policy.lookup(fmtp, FMTP_SPROP_PARAMETER_SETS)? {
        params.sprop_parameter_sets = value.to_owned();
    }

    Ok(params)
}

fn parse_sdp_parameters(sdp: &SdpParameters, policy: AbsencePolicy) -> Result<CodecParameters> {
    parse_fmtp(&sdp.fmtp, policy).map(CodecParameters::H264)
}

// there are lots of other format parameter constraints that could be validated
// against the sprop-parameter-sets
static H264_CONSTRAINTS: &[CapabilityConstraint] = &[
    CapabilityConstraint {
        key: CAP_FORMAT_MEDIA_TYPE,
        value: |sdp, _| Some(ConstraintValue::String(get_media_type(sdp))),
    },
    CapabilityConstraint {
        key: CAP_FORMAT_PROFILE_LEVEL_ID,
        value: |_, params| {
            params
                .as_h264()
                .map(|h264| ConstraintValue::Integer(i64::from(h264.profile_level_id)))
        },
    },
    CapabilityConstraint {
        key: CAP_TRANSPORT_PACKETIZATION_MODE,
        value: |_, params| {
            params
                .as_h264()
                .map(|h264| ConstraintValue::String(h264.packetization_mode.name().to_owned()))
        },
    },
];

/// "video/H264": tolerant of absent format parameters.
pub static VIDEO_H264: Format = Format {
    media_type: MEDIA_TYPE_VIDEO_H264,
    format: FORMAT_VIDEO,
    policy: AbsencePolicy::Tolerant,
    parse: parse_sdp_parameters,
    constraints: H264_CONSTRAINTS,
};

/// Validates SDP parameters for "video/H264" against a receiver constraint set.
///
/// This function can only be used with "video/H264" SDP parameters; any other media
/// type is a usage error.
pub fn validate_video_h264_sdp_parameters(
    constraint_set: &Value,
    sdp: &SdpParameters,
) -> Result<()> {
    VIDEO_H264.validate(constraint_set, sdp)
}
