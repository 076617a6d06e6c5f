use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use super::{Error, Result};

/// AIS radio channel selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AisChannel {
    /// No channel preference
    #[serde(rename = "NONE")]
    NoPreference,
    /// AIS channel A
    #[default]
    #[serde(rename = "A")]
    A,
    /// AIS channel B
    #[serde(rename = "B")]
    B,
    /// Both AIS channels
    #[serde(rename = "BOTH")]
    Both,
}

impl AisChannel {
    /// Numeric index used by the BBM and ABB channel fields
    pub fn index(&self) -> u8 {
        match self {
            AisChannel::NoPreference => 0,
            AisChannel::A => 1,
            AisChannel::B => 2,
            AisChannel::Both => 3,
        }
    }

    /// Channel letter for fields that name a single channel, if there is one
    pub fn letter(&self) -> Option<char> {
        match self {
            AisChannel::A => Some('A'),
            AisChannel::B => Some('B'),
            AisChannel::NoPreference | AisChannel::Both => None,
        }
    }

    /// Name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            AisChannel::NoPreference => "NONE",
            AisChannel::A => "A",
            AisChannel::B => "B",
            AisChannel::Both => "BOTH",
        }
    }
}

impl fmt::Display for AisChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AisChannel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "0" => Ok(AisChannel::NoPreference),
            "A" | "1" => Ok(AisChannel::A),
            "B" | "2" => Ok(AisChannel::B),
            "BOTH" | "3" => Ok(AisChannel::Both),
            other => Err(Error::config(format!("unknown AIS channel '{}'", other))),
        }
    }
}

/// How a station puts messages on air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BroadcastMethod {
    /// A TSA slot reservation followed by the VDM fragments it schedules
    TsaVdm,
    /// Binary broadcast message sentences
    Bbm,
}

impl BroadcastMethod {
    /// Name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            BroadcastMethod::TsaVdm => "TSA_VDM",
            BroadcastMethod::Bbm => "BBM",
        }
    }
}

impl fmt::Display for BroadcastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BroadcastMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TSA_VDM" => Ok(BroadcastMethod::TsaVdm),
            "BBM" => Ok(BroadcastMethod::Bbm),
            other => Err(Error::config(format!(
                "an invalid VDES-1000 broadcast method '{}' was detected",
                other
            ))),
        }
    }
}

/// Configuration of a single VDES station connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Station name, used for lookups and logging
    pub name: String,
    /// Broadcast method
    #[serde(serialize_with = "super::serde::serialize_broadcast_method")]
    #[serde(deserialize_with = "super::serde::deserialize_broadcast_method")]
    pub broadcast_method: BroadcastMethod,
    /// Transceiver host name or IPv4 address
    pub address: String,
    /// Transceiver UDP port
    pub port: u16,
    /// Source identifier placed in the IEC 61162-450 tag block
    #[serde(default)]
    pub source_id: Option<String>,
    /// Channel used when the caller does not pick one
    #[serde(default)]
    pub channel: AisChannel,
    /// Talker identifier of the emitted sentences
    #[serde(default = "default_talker_id")]
    pub talker_id: String,
}

fn default_talker_id() -> String {
    super::DEFAULT_TALKER_ID.to_string()
}

impl StationConfig {
    /// Creates a station configuration with default channel and talker id
    pub fn new(
        name: impl Into<String>,
        broadcast_method: BroadcastMethod,
        address: impl Into<String>,
        port: u16,
    ) -> Self {
        StationConfig {
            name: name.into(),
            broadcast_method,
            address: address.into(),
            port,
            source_id: None,
            channel: AisChannel::default(),
            talker_id: default_talker_id(),
        }
    }

    /// Sets the tag block source identifier
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Sets the default channel
    pub fn with_channel(mut self, channel: AisChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Host and port in the form accepted by the resolver
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Configuration for the whole gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Stations to open connections to
    #[serde(default)]
    pub stations: Vec<StationConfig>,
}

impl GatewayConfig {
    /// Parses a configuration from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let config: GatewayConfig = serde_json::from_str(text)
            .map_err(|e| Error::config(format!("Failed to parse gateway configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Checks that station names are unique and ports are usable
    pub fn validate(&self) -> Result<()> {
        for (i, station) in self.stations.iter().enumerate() {
            if station.port == 0 {
                return Err(Error::config(format!("station '{}' has port 0", station.name)));
            }
            if self.stations[..i].iter().any(|s| s.name == station.name) {
                return Err(Error::config(format!("duplicate station name '{}'", station.name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_index_and_letter() {
        assert_eq!(AisChannel::NoPreference.index(), 0);
        assert_eq!(AisChannel::A.index(), 1);
        assert_eq!(AisChannel::B.index(), 2);
        assert_eq!(AisChannel::Both.index(), 3);
        assert_eq!(AisChannel::A.letter(), Some('A'));
        assert_eq!(AisChannel::Both.letter(), None);
    }

    #[test]
    fn test_channel_parsing() {
        assert_eq!("a".parse::<AisChannel>().unwrap(), AisChannel::A);
        assert_eq!("BOTH".parse::<AisChannel>().unwrap(), AisChannel::Both);
        assert!("C".parse::<AisChannel>().unwrap_err().is_config());
    }

    #[test]
    fn test_broadcast_method_parsing() {
        assert_eq!("tsa_vdm".parse::<BroadcastMethod>().unwrap(), BroadcastMethod::TsaVdm);
        assert_eq!("BBM".parse::<BroadcastMethod>().unwrap(), BroadcastMethod::Bbm);
        let err = "ABM".parse::<BroadcastMethod>().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_gateway_config_from_json() {
        let config = GatewayConfig::from_json(r#"{
            "stations": [
                {"name": "North", "broadcast_method": "TSA_VDM", "address": "127.0.0.1", "port": 5000, "source_id": "0001"},
                {"name": "South", "broadcast_method": "bbm", "address": "localhost", "port": 5001, "channel": "B"}
            ]
        }"#).unwrap();

        assert_eq!(config.stations.len(), 2);
        assert_eq!(config.stations[0].broadcast_method, BroadcastMethod::TsaVdm);
        assert_eq!(config.stations[0].source_id.as_deref(), Some("0001"));
        assert_eq!(config.stations[0].channel, AisChannel::A);
        assert_eq!(config.stations[0].talker_id, "AI");
        assert_eq!(config.stations[1].broadcast_method, BroadcastMethod::Bbm);
        assert_eq!(config.stations[1].channel, AisChannel::B);
        assert_eq!(config.stations[1].source_id, None);
    }

    #[test]
    fn test_gateway_config_rejects_unknown_method() {
        let err = GatewayConfig::from_json(r#"{
            "stations": [{"name": "X", "broadcast_method": "SMOKE", "address": "127.0.0.1", "port": 5000}]
        }"#).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_gateway_config_rejects_duplicates() {
        let station = StationConfig::new("X", BroadcastMethod::Bbm, "127.0.0.1", 5000);
        let config = GatewayConfig { stations: vec![station.clone(), station] };
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_station_config_round_trip() {
        let station = StationConfig::new("X", BroadcastMethod::TsaVdm, "10.0.0.1", 5000)
            .with_source_id("0007")
            .with_channel(AisChannel::Both);
        let json = serde_json::to_string(&station).unwrap();
        assert!(json.contains("\"TSA_VDM\""));
        assert!(json.contains("\"BOTH\""));
        let back: StationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
        assert_eq!(back.endpoint(), "10.0.0.1:5000");
    }
}
