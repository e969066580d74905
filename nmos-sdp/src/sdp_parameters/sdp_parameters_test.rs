use super::fmtp::*;
use super::*;
use serde_json::json;
use shared::error::Error;

#[test]
fn test_fmtp_preserves_insertion_order() {
    let mut fmtp = Fmtp::new();
    fmtp.push("sprop-parameter-sets", "Z0IAH5WoFAFuQA==,aM48gA==");
    fmtp.push("profile-level-id", "42E01F");
    fmtp.push("packetization-mode", "1");

    let expected = vec![
        "sprop-parameter-sets",
        "profile-level-id",
        "packetization-mode",
    ];
    assert_eq!(fmtp.keys().collect::<Vec<_>>(), expected);
    assert_eq!(fmtp.len(), 3);
    assert!(!fmtp.is_empty());
}

#[test]
fn test_fmtp_push_existing_key_replaces_in_place() {
    let mut fmtp: Fmtp = [("profile-level-id", "42E01F"), ("packetization-mode", "0")]
        .into_iter()
        .collect();
    fmtp.push("profile-level-id", "640028");

    assert_eq!(fmtp.len(), 2);
    assert_eq!(fmtp.get("profile-level-id"), Some("640028"));
    assert_eq!(fmtp.keys().next(), Some("profile-level-id"));
}

#[test]
fn test_fmtp_get() {
    let fmtp: Fmtp = [("level-id", "93")].into_iter().collect();

    assert_eq!(fmtp.get("level-id"), Some("93"));
    assert_eq!(fmtp.get("Level-Id"), None);
    assert_eq!(fmtp.get("profile-id"), None);
    assert!(fmtp.contains_key("level-id"));
    assert!(Fmtp::new().is_empty());
}

#[test]
fn test_make_hex() {
    let tests = vec![
        (0x42E01E, 6, "42E01E"),
        (0x1F, 6, "00001F"),
        (0, 6, "000000"),
        (0, 12, "000000000000"),
        (0xB00000000000, 12, "B00000000000"),
        (0x4D0028, 6, "4D0028"),
    ];

    for (value, width, expected) in tests {
        assert_eq!(make_hex(value, width), expected, "{value:#x}/{width}");
    }
}

#[test]
fn test_parse_hex() {
    assert_eq!(parse_hex("profile-level-id", "42E01E", 6), Ok(0x42E01E));
    assert_eq!(parse_hex("profile-level-id", "42e01f", 6), Ok(0x42E01F));
    assert_eq!(parse_hex("interop-constraints", "000000000000", 12), Ok(0));
    assert_eq!(
        parse_hex("interop-constraints", "B00000000000", 12),
        Ok(0xB00000000000)
    );

    let tests = vec![
        ("", 6),
        ("xyz", 6),
        ("42E01G", 6),
        ("42E01", 6),
        ("142E01E", 6),
        ("0042E01E", 6),
        ("+42E01", 6),
        (" 42E01E", 6),
        ("42E01E ", 6),
        ("FFFFFFFFFFFFFFFF", 12),
    ];

    for (value, width) in tests {
        assert_eq!(
            parse_hex("profile-level-id", value, width),
            Err(Error::ErrInvalidFormatParameter {
                name: "profile-level-id".to_owned(),
                value: value.to_owned(),
            }),
            "{value:?}"
        );
    }
}

#[test]
fn test_parse_decimal() {
    assert_eq!(parse_decimal::<u32>("level-id", "93"), Ok(93));
    assert_eq!(parse_decimal::<u32>("level-id", "0"), Ok(0));

    for value in ["", "5D", "-1", "+1", " 120 ", "1.0", "4294967296"] {
        assert_eq!(
            parse_decimal::<u32>("level-id", value),
            Err(Error::ErrInvalidFormatParameter {
                name: "level-id".to_owned(),
                value: value.to_owned(),
            }),
            "{value:?}"
        );
    }
}

#[test]
fn test_sdp_media_type() {
    let tests = vec![
        ("audio", SdpMediaType::Audio),
        ("video", SdpMediaType::Video),
        ("application", SdpMediaType::Application),
        ("Unspecified", SdpMediaType::Unspecified),
    ];

    for (s, media_type) in tests {
        assert_eq!(SdpMediaType::from(s), media_type);
        assert_eq!(media_type.to_string(), s);
    }
    assert_eq!(SdpMediaType::from("text"), SdpMediaType::Unspecified);
}

#[test]
fn test_ts_refclk() {
    let ptp = TsRefClk::ptp(
        ts_refclk::PTP_VERSION_IEEE1588_2008,
        "08-00-11-FF-FE-21-E1-B0",
        0,
    );
    assert_eq!(
        ptp,
        TsRefClk::Ptp {
            version: "IEEE1588-2008".to_owned(),
            server: "08-00-11-FF-FE-21-E1-B0:0".to_owned(),
        }
    );
    assert!(!ptp.is_traceable());
    let traceable = TsRefClk::ptp_traceable(ts_refclk::PTP_VERSION_IEEE1588_2008);
    assert!(traceable.is_traceable());
    assert!(!TsRefClk::local_mac("CA-FE-01-CA-FE-02").is_traceable());
}

#[test]
fn test_sdp_parameters_serde() -> shared::error::Result<()> {
    let sdp = SdpParameters::video(
        "camera 1",
        Rtpmap {
            payload_type: 96,
            encoding_name: "H264".to_owned(),
            clock_rate: 90000,
        },
        [("packetization-mode", "1")].into_iter().collect(),
        vec!["PRIMARY".to_owned()],
        vec![TsRefClk::local_mac("CA-FE-01-CA-FE-02")],
    );

    let value = serde_json::to_value(&sdp)?;
    assert_eq!(value["media_type"], json!("video"));
    assert_eq!(value["fmtp"], json!([["packetization-mode", "1"]]));
    assert_eq!(
        value["ts_refclk"],
        json!([{ "clock_source": "localmac", "mac_address": "CA-FE-01-CA-FE-02" }])
    );

    let parsed: SdpParameters = serde_json::from_value(value)?;
    assert_eq!(parsed, sdp);

    Ok(())
}

#[test]
fn test_fmtp_deserialize_keeps_keys_unique() -> shared::error::Result<()> {
    let fmtp: Fmtp = serde_json::from_value(json!([
        ["packetization-mode", "1"],
        ["profile-level-id", "42E01F"],
        ["packetization-mode", "2"],
    ]))?;

    let keys: Vec<&str> = fmtp.keys().collect();
    assert_eq!(keys, vec!["packetization-mode", "profile-level-id"]);
    assert_eq!(fmtp.get("packetization-mode"), Some("2"));
    assert_eq!(
        serde_json::to_value(&fmtp)?,
        json!([["packetization-mode", "2"], ["profile-level-id", "42E01F"]])
    );

    Ok(())
}
