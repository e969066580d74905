use criterion::{Criterion, criterion_group, criterion_main};
use nmos_sdp::{
    FormatRegistry, PacketizationMode, VideoH264Parameters, VideoH265Parameters,
    get_video_h264_parameters, get_video_h265_parameters, make_video_h264_sdp_parameters,
    make_video_h265_sdp_parameters, validate_sdp_parameters,
};
use serde_json::json;

fn benchmark_video_h264(c: &mut Criterion) {
    let params = VideoH264Parameters {
        profile_level_id: 0x42E01F,
        packetization_mode: PacketizationMode::NonInterleaved,
        sprop_parameter_sets: "Z0IAH5WoFAFuQA==,aM48gA==".to_owned(),
    };

    let sdp = make_video_h264_sdp_parameters("h264", &params, 96, vec![], vec![]);
    let p = get_video_h264_parameters(&sdp).unwrap();
    if params != p {
        panic!("make or get not correct: \nparams: {params:?} \nvs \np: {p:?}");
    }

    let constraint_set = json!({
        "urn:x-nmos:cap:format:media_type": "video/H264",
        "urn:x-nmos:cap:format:profile_level_id": { "enum": [0x42E01E, 0x42E01F, 0x4D0028] },
        "urn:x-nmos:cap:transport:packetization_mode": "non_interleaved_mode",
    });

    ///////////////////////////////////////////////////////////////////////////////////////////////
    c.bench_function("H264 MakeSdpParameters", |b| {
        b.iter(|| {
            let _ = make_video_h264_sdp_parameters("h264", &params, 96, vec![], vec![]);
        })
    });

    ///////////////////////////////////////////////////////////////////////////////////////////////
    c.bench_function("H264 GetParameters", |b| {
        b.iter(|| {
            let _ = get_video_h264_parameters(&sdp).unwrap();
        })
    });

    ///////////////////////////////////////////////////////////////////////////////////////////////
    c.bench_function("H264 Validate", |b| {
        b.iter(|| {
            validate_sdp_parameters(&constraint_set, &sdp).unwrap();
        })
    });
}

fn benchmark_video_h265(c: &mut Criterion) {
    let params = VideoH265Parameters {
        profile_id: 1,
        profile_space: 0,
        level_id: 123,
        tier_flag: 0,
        interop_constraints: 0xB00000000000,
        sprop_vps: "QAEMAf//AWAAAAMAkAAAAwAAAwBdlZgJ".to_owned(),
        sprop_sps: "QgEBAWAAAAMAkAAAAwAAAwBdoAKAgC0WWVmkkyvAQEAAAAMAQAAABkI=".to_owned(),
        sprop_pps: "RAHBcrRiQA==".to_owned(),
    };

    let sdp = make_video_h265_sdp_parameters("h265", &params, 98, vec![], vec![]);
    let p = get_video_h265_parameters(&sdp).unwrap();
    if params != p {
        panic!("make or get not correct: \nparams: {params:?} \nvs \np: {p:?}");
    }

    let mut registry = FormatRegistry::new();
    registry.register_default_formats().unwrap();

    let receiver = json!({
        "format": "urn:x-nmos:format:video",
        "caps": {
            "media_types": ["video/H264", "video/H265"],
            "constraint_sets": [
                { "urn:x-nmos:cap:format:media_type": "video/H264" },
                { "urn:x-nmos:cap:meta:enabled": false },
                {
                    "urn:x-nmos:cap:format:media_type": "video/H265",
                    "urn:x-nmos:cap:format:profile_id": 1,
                    "urn:x-nmos:cap:format:level_id": { "minimum": 90, "maximum": 153 },
                    "urn:x-nmos:cap:format:tier_flag": 0,
                },
            ],
        },
    });

    ///////////////////////////////////////////////////////////////////////////////////////////////
    c.bench_function("H265 MakeSdpParameters", |b| {
        b.iter(|| {
            let _ = make_video_h265_sdp_parameters("h265", &params, 98, vec![], vec![]);
        })
    });

    ///////////////////////////////////////////////////////////////////////////////////////////////
    c.bench_function("H265 GetParameters", |b| {
        b.iter(|| {
            let _ = get_video_h265_parameters(&sdp).unwrap();
        })
    });

    ///////////////////////////////////////////////////////////////////////////////////////////////
    c.bench_function("H265 ValidateReceiver", |b| {
        b.iter(|| {
            registry.validate_receiver(&receiver, &sdp).unwrap();
        })
    });
}

criterion_group!(benches, benchmark_video_h264, benchmark_video_h265);
criterion_main!(benches);
