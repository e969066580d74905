#[cfg(test)]
mod sdp_parameters_test;

pub mod fmtp;
pub mod ts_refclk;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use fmtp::Fmtp;
pub use ts_refclk::TsRefClk;

const SDP_MEDIA_TYPE_AUDIO_STR: &str = "audio";
const SDP_MEDIA_TYPE_VIDEO_STR: &str = "video";
const SDP_MEDIA_TYPE_APPLICATION_STR: &str = "application";
const UNSPECIFIED_STR: &str = "Unspecified";

/// PayloadType identifies the format of the RTP payload and determines
/// its interpretation by the application.
/// <https://tools.ietf.org/html/rfc3550#section-3>
pub type PayloadType = u8;

/// The `<media>` field of an SDP media description (`m=` line).
///
/// <https://tools.ietf.org/html/rfc4566#section-5.14>
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SdpMediaType {
    #[default]
    Unspecified,
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "application")]
    Application,
}

impl From<&str> for SdpMediaType {
    fn from(raw: &str) -> Self {
        match raw {
            SDP_MEDIA_TYPE_AUDIO_STR => SdpMediaType::Audio,
            SDP_MEDIA_TYPE_VIDEO_STR => SdpMediaType::Video,
            SDP_MEDIA_TYPE_APPLICATION_STR => SdpMediaType::Application,
            _ => SdpMediaType::Unspecified,
        }
    }
}

impl fmt::Display for SdpMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            SdpMediaType::Audio => SDP_MEDIA_TYPE_AUDIO_STR,
            SdpMediaType::Video => SDP_MEDIA_TYPE_VIDEO_STR,
            SdpMediaType::Application => SDP_MEDIA_TYPE_APPLICATION_STR,
            SdpMediaType::Unspecified => UNSPECIFIED_STR,
        };
        write!(f, "{s}")
    }
}

/// Payload type binding, i.e.
/// `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
///
/// <https://tools.ietf.org/html/rfc4566#section-6>
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rtpmap {
    pub payload_type: PayloadType,
    pub encoding_name: String,
    pub clock_rate: u32,
}

/// The subset of an SDP media description that carries the format of one
/// RTP stream: its payload type binding and format specific parameters,
/// together with the session level data that travels with it.
///
/// Instances are produced by the `make_*_sdp_parameters` builders and consumed
/// by the `get_*_parameters` parsers and the capability validators.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdpParameters {
    /// `s=<session name>`
    pub session_name: String,
    /// `m=<media> ...`
    pub media_type: SdpMediaType,
    /// `a=rtpmap:...`
    pub rtpmap: Rtpmap,
    /// `a=fmtp:<format> <format specific parameters>`, in wire order
    pub fmtp: Fmtp,
    /// `a=mid:<identification-tag>` values of the grouped media streams
    pub media_stream_ids: Vec<String>,
    /// `a=ts-refclk:...` values, in wire order
    pub ts_refclk: Vec<TsRefClk>,
}

impl SdpParameters {
    /// Creates video SDP parameters with the given payload type binding.
    pub fn video(
        session_name: &str,
        rtpmap: Rtpmap,
        fmtp: Fmtp,
        media_stream_ids: Vec<String>,
        ts_refclk: Vec<TsRefClk>,
    ) -> Self {
        Self {
            session_name: session_name.to_owned(),
            media_type: SdpMediaType::Video,
            rtpmap,
            fmtp,
            media_stream_ids,
            ts_refclk,
        }
    }
}
