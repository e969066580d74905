//! NMOS SDP - format parameters and receiver capability matching.
//!
//! This crate translates between the typed encoding parameters of a media stream
//! and the SDP format parameters (`a=fmtp`) exchanged during IS-05 connection
//! negotiation, and decides whether offered parameters satisfy the capability
//! constraints an IS-04 receiver publishes.
//!
//! # Supported Formats
//!
//! | Media type | Parameters | Absence policy | Specification |
//! |------------|------------|----------------|---------------|
//! | `video/H264` | [`VideoH264Parameters`] | tolerant | RFC 6184 |
//! | `video/H265` | [`VideoH265Parameters`] | strict | RFC 7798 |
//!
//! # Flow
//!
//! ```text
//! resources ──make_*_sdp_parameters──► SdpParameters ──get_*_parameters──► CodecParameters
//!                                                                               │
//!                          receiver caps ──► constraint table + matcher ◄───────┘
//! ```
//!
//! # Example
//!
//! ```
//! use nmos_sdp::{
//!     PacketizationMode, VideoH264Parameters, make_video_h264_sdp_parameters,
//!     validate_sdp_parameters,
//! };
//! use serde_json::json;
//!
//! # fn main() -> shared::error::Result<()> {
//! let params = VideoH264Parameters {
//!     profile_level_id: 0x42E01F,
//!     packetization_mode: PacketizationMode::NonInterleaved,
//!     sprop_parameter_sets: String::new(),
//! };
//! let sdp = make_video_h264_sdp_parameters("camera 1", &params, 96, vec![], vec![]);
//! assert_eq!(sdp.fmtp.get("profile-level-id"), Some("42E01F"));
//!
//! let constraint_set = json!({
//!     "urn:x-nmos:cap:transport:packetization_mode": { "enum": ["non_interleaved_mode"] }
//! });
//! validate_sdp_parameters(&constraint_set, &sdp)?;
//! # Ok(())
//! # }
//! ```
#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod capabilities;
pub mod codec;
pub mod format;
pub mod media_type;
pub(crate) mod resource;
pub mod sdp_parameters;
pub mod video_h264;
pub mod video_h265;

pub use capabilities::{Constraint, match_integer_constraint, match_string_constraint};
pub use codec::{
    CodecParameters, DEFAULT_FORMATS, make_sdp_parameters, validate_receiver_sdp_parameters,
    validate_sdp_parameters,
};
pub use format::{AbsencePolicy, CapabilityConstraint, ConstraintValue, Format, FormatRegistry};
pub use media_type::get_media_type;
pub use sdp_parameters::{Fmtp, PayloadType, Rtpmap, SdpMediaType, SdpParameters, TsRefClk};
pub use video_h264::{
    PacketizationMode, VIDEO_H264, VideoH264Parameters, get_video_h264_parameters,
    make_video_h264_sdp_parameters, validate_video_h264_sdp_parameters,
};
pub use video_h265::{
    VIDEO_H265, VideoH265Parameters, get_video_h265_parameters, make_video_h265_sdp_parameters,
    validate_video_h265_sdp_parameters,
};
