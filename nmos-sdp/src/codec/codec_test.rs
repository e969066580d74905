use super::*;
use crate::video_h264::{PacketizationMode, get_video_h264_parameters};
use crate::video_h265::get_video_h265_parameters;
use serde_json::json;
use shared::error::Error;

fn h264_params() -> VideoH264Parameters {
    VideoH264Parameters {
        profile_level_id: 0x42E01F,
        packetization_mode: PacketizationMode::NonInterleaved,
        sprop_parameter_sets: String::new(),
    }
}

fn h265_params() -> VideoH265Parameters {
    VideoH265Parameters {
        profile_id: 1,
        profile_space: 0,
        level_id: 93,
        tier_flag: 0,
        interop_constraints: 0xB00000000000,
        sprop_vps: "QAEMAf//AWAAAAMAkAAAAwAAAwBdlZgJ".to_owned(),
        sprop_sps: "QgEBAWAAAAMAkAAAAwAAAwBdoAKAgC0WWVmkkyvAQEAAAAMAQAAABkI=".to_owned(),
        sprop_pps: "RAHBcrRiQA==".to_owned(),
    }
}

#[test]
fn test_default_formats() {
    let media_types: Vec<&str> = DEFAULT_FORMATS.iter().map(|f| f.media_type).collect();
    assert_eq!(media_types, vec!["video/H264", "video/H265"]);
}

#[test]
fn test_codec_parameters() -> Result<()> {
    let h264_sdp = make_video_h264_sdp_parameters("h264", &h264_params(), 96, vec![], vec![]);
    let h265_sdp = make_video_h265_sdp_parameters("h265", &h265_params(), 97, vec![], vec![]);
    let h264 = CodecParameters::from(get_video_h264_parameters(&h264_sdp)?);
    let h265 = CodecParameters::from(get_video_h265_parameters(&h265_sdp)?);

    assert_eq!(h264.as_h264(), Some(&h264_params()));
    assert!(h264.as_h265().is_none());
    assert_eq!(h265.as_h265(), Some(&h265_params()));
    assert!(h265.as_h264().is_none());
    assert_eq!(h264.format().media_type, "video/H264");
    assert_eq!(h265.format().media_type, "video/H265");

    assert_eq!(VIDEO_H264.parse_sdp_parameters(&h264_sdp)?, h264);
    assert_eq!(VIDEO_H265.parse_sdp_parameters(&h265_sdp)?, h265);

    Ok(())
}

#[test]
fn test_make_sdp_parameters() {
    let tests = vec![
        (
            CodecParameters::from(h264_params()),
            make_video_h264_sdp_parameters("stream", &h264_params(), 96, vec![], vec![]),
        ),
        (
            CodecParameters::from(h265_params()),
            make_video_h265_sdp_parameters("stream", &h265_params(), 96, vec![], vec![]),
        ),
    ];

    for (params, expected) in tests {
        let sdp = make_sdp_parameters("stream", &params, 96, vec![], vec![]);
        assert_eq!(sdp, expected, "{params:?}");
    }
}

#[test]
fn test_validate_sdp_parameters_dispatch() {
    let h264_sdp = make_video_h264_sdp_parameters("h264", &h264_params(), 96, vec![], vec![]);
    let h265_sdp = make_video_h265_sdp_parameters("h265", &h265_params(), 97, vec![], vec![]);
    let constraint_set = json!({
        "urn:x-nmos:cap:format:profile_level_id": 4382751,
        "urn:x-nmos:cap:format:level_id": { "minimum": 90, "maximum": 123 },
    });

    assert_eq!(validate_sdp_parameters(&constraint_set, &h264_sdp), Ok(()));
    assert_eq!(validate_sdp_parameters(&constraint_set, &h265_sdp), Ok(()));

    let mut sdp = h264_sdp;
    sdp.rtpmap.encoding_name = "VP8".to_owned();
    assert_eq!(
        validate_sdp_parameters(&constraint_set, &sdp),
        Err(Error::ErrUnsupportedMediaType("video/VP8".to_owned()))
    );
}

#[test]
fn test_validate_receiver_sdp_parameters_dispatch() {
    let sdp = make_video_h265_sdp_parameters("h265", &h265_params(), 97, vec![], vec![]);
    let receiver = json!({
        "format": "urn:x-nmos:format:video",
        "caps": {
            "media_types": ["video/H265"],
            "constraint_sets": [{ "urn:x-nmos:cap:format:level_id": { "maximum": 90 } }],
        },
    });

    let err = validate_receiver_sdp_parameters(&receiver, &sdp).unwrap_err();
    let mismatch = err.constraint_mismatch().expect("constraint mismatch");
    assert_eq!(mismatch.key, "urn:x-nmos:cap:format:level_id");
    assert_eq!(mismatch.actual, json!(93));
}
