use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::Parser;
use serde_json::Value;

use nmos_sdp::{Fmtp, FormatRegistry, Rtpmap, SdpParameters};

// Check offered SDP parameters against an IS-04 receiver:
//      cargo run --example validate-sdp-parameters -- --receiver receiver.json --sdp sdp.json
// or against a single constraint set, building the SDP parameters from fmtp pairs:
//      cargo run --example validate-sdp-parameters -- --constraint-set caps.json \
//          --encoding-name H264 --fmtp profile-level-id=42E01F --fmtp packetization-mode=1

#[derive(Parser)]
#[command(name = "Validate SDP Parameters")]
#[command(author = "nmos-sdp contributors")]
#[command(version = "0.1.0")]
#[command(about = "An example of SDP parameter validation", long_about = None)]
struct Cli {
    /// IS-04 receiver JSON file, with format and caps
    #[arg(long, required_unless_present = "constraint_set")]
    receiver: Option<PathBuf>,
    /// Constraint set JSON file
    #[arg(long, conflicts_with = "receiver")]
    constraint_set: Option<PathBuf>,

    /// SDP parameters JSON file
    #[arg(long, conflicts_with_all = ["encoding_name", "fmtp"])]
    sdp: Option<PathBuf>,
    #[arg(long, default_value_t = format!("H264"))]
    encoding_name: String,
    #[arg(long, default_value_t = 96)]
    payload_type: u8,
    /// Format parameter as key=value, may be repeated
    #[arg(long, value_parser = parse_fmtp_pair)]
    fmtp: Vec<(String, String)>,

    #[arg(short, long)]
    debug: bool,
    #[arg(long, default_value_t = format!("INFO"))]
    log_level: String,
}

fn parse_fmtp_pair(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{s}'"))?;
    Ok((key.to_owned(), value.to_owned()))
}

fn read_json(path: &PathBuf) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.debug {
        let log_level = log::LevelFilter::from_str(&cli.log_level)?;
        env_logger::Builder::new()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{}:{} [{}] - {}",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0),
                    record.level(),
                    record.args()
                )
            })
            .filter(None, log_level)
            .init();
    }

    let sdp = match &cli.sdp {
        Some(path) => serde_json::from_value(read_json(path)?)?,
        None => SdpParameters::video(
            "validate-sdp-parameters",
            Rtpmap {
                payload_type: cli.payload_type,
                encoding_name: cli.encoding_name.clone(),
                clock_rate: 90000,
            },
            cli.fmtp.iter().cloned().collect::<Fmtp>(),
            vec![],
            vec![],
        ),
    };

    let mut registry = FormatRegistry::new();
    registry.register_default_formats()?;

    let result = if let Some(path) = &cli.receiver {
        registry.validate_receiver(&read_json(path)?, &sdp)
    } else if let Some(path) = &cli.constraint_set {
        registry.validate_sdp_parameters(&read_json(path)?, &sdp)
    } else {
        return Err(anyhow!("--receiver or --constraint-set is required"));
    };

    match result {
        Ok(()) => {
            let media_type = nmos_sdp::get_media_type(&sdp);
            println!("{media_type} parameters satisfy the receiver capabilities");
        }
        Err(err) => {
            if let Some(mismatch) = err.constraint_mismatch() {
                println!("{}", serde_json::to_string_pretty(mismatch)?);
            }
            return Err(err.into());
        }
    }

    Ok(())
}
