use unicase::UniCase;

use crate::sdp_parameters::SdpParameters;

/// H.264 video media type.
///
/// <https://www.iana.org/assignments/media-types/video/H264>
/// Note: media type matching is case-insensitive.
pub const MEDIA_TYPE_VIDEO_H264: &str = "video/H264";

/// H.265/HEVC video media type.
///
/// <https://www.iana.org/assignments/media-types/video/H265>
/// Note: media type matching is case-insensitive.
pub const MEDIA_TYPE_VIDEO_H265: &str = "video/H265";

/// Returns the media type ("<media>/<encoding name>") described by the SDP parameters.
pub fn get_media_type(sdp: &SdpParameters) -> String {
    format!("{}/{}", sdp.media_type, sdp.rtpmap.encoding_name)
}

/// Media types and encoding names are case-insensitive.
/// <https://tools.ietf.org/html/rfc4855#section-3>
pub fn media_type_eq(a: &str, b: &str) -> bool {
    UniCase::new(a) == UniCase::new(b)
}
