//! The supported codecs.
//!
//! The format dispatcher only knows [`Format`] descriptors and the opaque
//! [`CodecParameters`] their parsers produce. Supporting another codec means a
//! module with its own [`Format`], a variant here, and an entry in
//! [`DEFAULT_FORMATS`].

#[cfg(test)]
mod codec_test;

use serde_json::Value;
use shared::error::Result;

use crate::format::{Format, format_for};
use crate::sdp_parameters::{PayloadType, SdpParameters, TsRefClk};
use crate::video_h264::{VIDEO_H264, VideoH264Parameters, make_video_h264_sdp_parameters};
use crate::video_h265::{VIDEO_H265, VideoH265Parameters, make_video_h265_sdp_parameters};

/// Formats supported out of the box.
pub static DEFAULT_FORMATS: &[&Format] = &[&VIDEO_H264, &VIDEO_H265];

/// Typed format parameters of one of the supported codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecParameters {
    H264(VideoH264Parameters),
    H265(VideoH265Parameters),
}

impl CodecParameters {
    pub fn as_h264(&self) -> Option<&VideoH264Parameters> {
        match self {
            CodecParameters::H264(params) => Some(params),
            _ => None,
        }
    }

    pub fn as_h265(&self) -> Option<&VideoH265Parameters> {
        match self {
            CodecParameters::H265(params) => Some(params),
            _ => None,
        }
    }

    /// The format these parameters belong to.
    pub fn format(&self) -> &'static Format {
        match self {
            CodecParameters::H264(_) => &VIDEO_H264,
            CodecParameters::H265(_) => &VIDEO_H265,
        }
    }
}

impl From<VideoH264Parameters> for CodecParameters {
    fn from(params: VideoH264Parameters) -> Self {
        CodecParameters::H264(params)
    }
}

impl From<VideoH265Parameters> for CodecParameters {
    fn from(params: VideoH265Parameters) -> Self {
        CodecParameters::H265(params)
    }
}

/// Constructs SDP parameters for whichever codec the parameters belong to.
pub fn make_sdp_parameters(
    session_name: &str,
    params: &CodecParameters,
    payload_type: PayloadType,
    media_stream_ids: Vec<String>,
    ts_refclk: Vec<TsRefClk>,
) -> SdpParameters {
    match params {
        CodecParameters::H264(params) => make_video_h264_sdp_parameters(
            session_name,
            params,
            payload_type,
            media_stream_ids,
            ts_refclk,
        ),
        CodecParameters::H265(params) => make_video_h265_sdp_parameters(
            session_name,
            params,
            payload_type,
            media_stream_ids,
            ts_refclk,
        ),
    }
}

/// Validates SDP parameters of any of the [`DEFAULT_FORMATS`] against a constraint set.
pub fn validate_sdp_parameters(constraint_set: &Value, sdp: &SdpParameters) -> Result<()> {
    format_for(DEFAULT_FORMATS, sdp)?.validate(constraint_set, sdp)
}

/// Validates SDP parameters of any of the [`DEFAULT_FORMATS`] against an IS-04 receiver.
pub fn validate_receiver_sdp_parameters(receiver: &Value, sdp: &SdpParameters) -> Result<()> {
    format_for(DEFAULT_FORMATS, sdp)?.validate_receiver(receiver, sdp)
}
