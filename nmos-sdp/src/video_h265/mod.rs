//! "video/H265" format parameters.
//!
//! ## Specifications
//!
//! * [RFC 7798](https://datatracker.ietf.org/doc/html/rfc7798) - RTP Payload Format for HEVC
//! * [RFC 7798 Section 7.1](https://datatracker.ietf.org/doc/html/rfc7798#section-7.1) - Media Type Registration
//! * VSF TR-05:2017 for the order of the format parameters


use serde_json::Value;
use shared::error::Result;

use crate::capabilities::CAP_FORMAT_MEDIA_TYPE;
use crate::codec::CodecParameters;
use crate::format::{AbsencePolicy, CapabilityConstraint, ConstraintValue, FORMAT_VIDEO, Format};
use crate::media_type::{MEDIA_TYPE_VIDEO_H265, get_media_type};
use crate::resource::{at_most, field_u32, field_u64_or};
use crate::sdp_parameters::fmtp::{make_hex, parse_decimal, parse_hex};
use crate::sdp_parameters::{Fmtp, PayloadType, Rtpmap, SdpParameters, TsRefClk};

/// `a=rtpmap` encoding name
pub const ENCODING_NAME_H265: &str = "H265";
/// `a=rtpmap` clock rate
pub const CLOCK_RATE_H265: u32 = 90000;

pub const FMTP_PROFILE_ID: &str = "profile-id";
pub const FMTP_PROFILE_SPACE: &str = "profile-space";
pub const FMTP_LEVEL_ID: &str = "level-id";
pub const FMTP_TIER_FLAG: &str = "tier-flag";
/// 12 hex digits, the six bytes of general_progressive_source_flag through
/// general_reserved_zero_43bits
pub const FMTP_INTEROP_CONSTRAINTS: &str = "interop-constraints";
pub const FMTP_SPROP_VPS: &str = "sprop-vps";
pub const FMTP_SPROP_SPS: &str = "sprop-sps";
pub const FMTP_SPROP_PPS: &str = "sprop-pps";

pub const CAP_FORMAT_PROFILE_ID: &str = "urn:x-nmos:cap:format:profile_id";
pub const CAP_FORMAT_PROFILE_SPACE: &str = "urn:x-nmos:cap:format:profile_space";
pub const CAP_FORMAT_LEVEL_ID: &str = "urn:x-nmos:cap:format:level_id";
pub const CAP_FORMAT_TIER_FLAG: &str = "urn:x-nmos:cap:format:tier_flag";

const INTEROP_CONSTRAINTS_HEX_DIGITS: usize = 12;
const INTEROP_CONSTRAINTS_MAX: u64 = 0xFFFF_FFFF_FFFF;

const FLOW_PROFILE_ID: &str = "profile_id";
const FLOW_PROFILE_SPACE: &str = "profile_space";
const FLOW_LEVEL_ID: &str = "level_id";
const FLOW_TIER_FLAG: &str = "tier_flag";
const FLOW_INTEROP_CONSTRAINTS: &str = "interop_constraints";

/// Additional "video/H265" parameters.
///
/// <https://datatracker.ietf.org/doc/html/rfc7798#section-7.1>
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct VideoH265Parameters {
    pub profile_id: u32,
    pub profile_space: u32,
    pub level_id: u32,
    pub tier_flag: u32,
    /// At most 48 bits.
    pub interop_constraints: u64,
    pub sprop_vps: String,
    pub sprop_sps: String,
    pub sprop_pps: String,
}

impl VideoH265Parameters {
    /// Constructs "video/H265" parameters from the IS-04 flow and the parameter sets.
    pub fn from_resources(
        flow: &Value,
        sprop_vps: &str,
        sprop_sps: &str,
        sprop_pps: &str,
    ) -> Result<Self> {
        Ok(Self {
            profile_id: field_u32(flow, FLOW_PROFILE_ID)?,
            profile_space: field_u32(flow, FLOW_PROFILE_SPACE)?,
            level_id: field_u32(flow, FLOW_LEVEL_ID)?,
            tier_flag: field_u32(flow, FLOW_TIER_FLAG)?,
            interop_constraints: at_most(
                FLOW_INTEROP_CONSTRAINTS,
                field_u64_or(flow, FLOW_INTEROP_CONSTRAINTS, 0)?,
                INTEROP_CONSTRAINTS_MAX,
            )?,
            sprop_vps: sprop_vps.to_owned(),
            sprop_sps: sprop_sps.to_owned(),
            sprop_pps: sprop_pps.to_owned(),
        })
    }
}

pub(crate) fn make_sdp_interop_constraints(interop_constraints: u64) -> String {
    make_hex(interop_constraints, INTEROP_CONSTRAINTS_HEX_DIGITS)
}

/// Constructs SDP parameters for "video/H265".
///
/// Every format parameter is always included, in the order of VSF TR-05.
pub fn make_video_h265_sdp_parameters(
    session_name: &str,
    params: &VideoH265Parameters,
    payload_type: PayloadType,
    media_stream_ids: Vec<String>,
    ts_refclk: Vec<TsRefClk>,
) -> SdpParameters {
    let rtpmap = Rtpmap {
        payload_type,
        encoding_name: ENCODING_NAME_H265.to_owned(),
        clock_rate: CLOCK_RATE_H265,
    };

    let fmtp: Fmtp = [
        (FMTP_PROFILE_ID, params.profile_id.to_string()),
        (FMTP_PROFILE_SPACE, params.profile_space.to_string()),
        (FMTP_LEVEL_ID, params.level_id.to_string()),
        (FMTP_TIER_FLAG, params.tier_flag.to_string()),
        (
            FMTP_INTEROP_CONSTRAINTS,
            make_sdp_interop_constraints(params.interop_constraints),
        ),
        (FMTP_SPROP_VPS, params.sprop_vps.clone()),
        (FMTP_SPROP_SPS, params.sprop_sps.clone()),
        (FMTP_SPROP_PPS, params.sprop_pps.clone()),
    ]
    .into_iter()
    .collect();

    SdpParameters::video(session_name, rtpmap, fmtp, media_stream_ids, ts_refclk)
}

/// Gets the "video/H265" parameters from the SDP parameters.
///
/// Every format parameter is required; the first one found missing is named in
/// the error.
pub fn get_video_h265_parameters(sdp: &SdpParameters) -> Result<VideoH265Parameters> {
    parse_fmtp(&sdp.fmtp, VIDEO_H265.policy)
}

fn parse_fmtp(fmtp: &Fmtp, policy: AbsencePolicy) -> Result<VideoH265Parameters> {
    let mut params = VideoH265Parameters::default();

    if let Some(value) = policy.lookup(fmtp, FMTP_PROFILE_ID)? {
        params.profile_id = parse_decimal(FMTP_PROFILE_ID, value)?;
    }
    if let Some(value) = policy.lookup(fmtp, FMTP_PROFILE_SPACE)? {
        params.profile_space = parse_decimal(FMTP_PROFILE_SPACE, value)?;
    }
    if let Some(value) = policy.lookup(fmtp, FMTP_LEVEL_ID)? {
        params.level_id = parse_decimal(FMTP_LEVEL_ID, value)?;
    }
    if let Some(value) = policy.lookup(fmtp, FMTP_TIER_FLAG)? {
        params.tier_flag = parse_decimal(FMTP_TIER_FLAG, value)?;
    }
    if let Some(value) = policy.lookup(fmtp, FMTP_INTEROP_CONSTRAINTS)? {
        params.interop_constraints = parse_hex(
            FMTP_INTEROP_CONSTRAINTS,
            value,
            INTEROP_CONSTRAINTS_HEX_DIGITS,
        )?;
    }
    if let Some(value) = policy.lookup(fmtp, FMTP_SPROP_VPS)? {
        params.sprop_vps = value.to_owned();
    }
    if let Some(value) = policy.lookup(fmtp, FMTP_SPROP_SPS)? {
        params.sprop_sps = value.to_owned();
    }
    if let Some(value) = policy.lookup(fmtp, FMTP_SPROP_PPS)? {
        params.sprop_pps = value.to_owned();
    }

    Ok(params)
}

fn parse_sdp_parameters(sdp: &SdpParameters, policy: AbsencePolicy) -> Result<CodecParameters> {
    parse_fmtp(&sdp.fmtp, policy).map(CodecParameters::H265)
}

fn h265_integer(
    params: &CodecParameters,
    field: fn(&VideoH265Parameters) -> u32,
) -> Option<ConstraintValue> {
    params
        .as_h265()
        .map(|h265| ConstraintValue::Integer(i64::from(field(h265))))
}

static H265_CONSTRAINTS: &[CapabilityConstraint] = &[
    CapabilityConstraint {
        key: CAP_FORMAT_MEDIA_TYPE,
        value: |sdp, _| Some(ConstraintValue::String(get_media_type(sdp))),
    },
    CapabilityConstraint {
        key: CAP_FORMAT_PROFILE_ID,
        value: |_, params| h265_integer(params, |h265| h265.profile_id),
    },
    CapabilityConstraint {
        key: CAP_FORMAT_PROFILE_SPACE,
        value: |_, params| h265_integer(params, |h265| h265.profile_space),
    },
    CapabilityConstraint {
        key: CAP_FORMAT_LEVEL_ID,
        value: |_, params| h265_integer(params, |h265| h265.level_id),
    },
    CapabilityConstraint {
        key: CAP_FORMAT_TIER_FLAG,
        value: |_, params| h265_integer(params, |h265| h265.tier_flag),
    },
];

/// "video/H265": every format parameter is required.
pub static VIDEO_H265: Format = Format {
    media_type: MEDIA_TYPE_VIDEO_H265,
    format: FORMAT_VIDEO,
    policy: AbsencePolicy::Strict,
    parse: parse_sdp_parameters,
    constraints: H265_CONSTRAINTS,
};

/// Validates SDP parameters for "video/H265" against a receiver constraint set.
///
/// This function can only be used with "video/H265" SDP parameters; any other media
/// type is a usage error.
pub fn validate_video_h265_sdp_parameters(
    constraint_set: &Value,
    sdp: &SdpParameters,
) -> Result<()> {
    VIDEO_H265.validate(constraint_set, sdp)
}
