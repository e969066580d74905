use serde::{Deserialize, Serialize};

/// IEEE 1588-2008 (PTPv2)
pub const PTP_VERSION_IEEE1588_2008: &str = "IEEE1588-2008";

const PTP_TRACEABLE: &str = "traceable";

/// Reference clock signalled by an `a=ts-refclk` attribute.
///
/// ## Specifications
///
/// * [RFC 7273](https://tools.ietf.org/html/rfc7273#section-4.8)
/// * SMPTE ST 2110-10:2017 Section 8.2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "clock_source")]
pub enum TsRefClk {
    /// `ptp=<ptp version>:<ptp server>`, where the server is either
    /// `<grandmaster clock identity>:<domain>` or `traceable`
    #[serde(rename = "ptp")]
    Ptp { version: String, server: String },
    /// `localmac=<mac address>`
    #[serde(rename = "localmac")]
    LocalMac { mac_address: String },
}

impl TsRefClk {
    pub fn ptp(version: &str, grandmaster_clock_identity: &str, domain: u8) -> Self {
        TsRefClk::Ptp {
            version: version.to_owned(),
            server: format!("{grandmaster_clock_identity}:{domain}"),
        }
    }

    pub fn ptp_traceable(version: &str) -> Self {
        TsRefClk::Ptp {
            version: version.to_owned(),
            server: PTP_TRACEABLE.to_owned(),
        }
    }

    pub fn local_mac(mac_address: &str) -> Self {
        TsRefClk::LocalMac {
            mac_address: mac_address.to_owned(),
        }
    }

    pub fn is_traceable(&self) -> bool {
        matches!(self, TsRefClk::Ptp { server, .. } if server == PTP_TRACEABLE)
    }
}
