//! AIS message 21: Aid-to-Navigation report

use std::str::FromStr;

use chrono::{DateTime, Timelike, Utc};

use crate::core::{Error, Result};
use crate::util::{int_to_binary, pad_to_six_bit_boundary, string_to_binary, SIX_BIT_VOCABULARY};
use super::message::Message;

/// Characters of the name carried in the fixed name field
pub const NAME_FIELD_CHARS: usize = 20;

/// Scale between decimal degrees and the 1/10000 minute position fields
const POSITION_SCALE: f64 = 600_000.0;

/// Type of Aid-to-Navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtonType {
    #[default]
    Default,
    Wreck,
    NorthCardinal,
    EastCardinal,
    SouthCardinal,
    WestCardinal,
    PortHandMark,
    StarboardHandMark,
    PreferredPort,
    PreferredStarboard,
    IsolatedDanger,
    SafeWater,
    SpecialMark,
}

impl AtonType {
    const ALL: [AtonType; 13] = [
        AtonType::Default,
        AtonType::Wreck,
        AtonType::NorthCardinal,
        AtonType::EastCardinal,
        AtonType::SouthCardinal,
        AtonType::WestCardinal,
        AtonType::PortHandMark,
        AtonType::StarboardHandMark,
        AtonType::PreferredPort,
        AtonType::PreferredStarboard,
        AtonType::IsolatedDanger,
        AtonType::SafeWater,
        AtonType::SpecialMark,
    ];

    /// Code transmitted in the 5-bit type field
    pub fn code(&self) -> u8 {
        match self {
            AtonType::Default => 0,
            AtonType::Wreck => 4,
            AtonType::NorthCardinal => 20,
            AtonType::EastCardinal => 21,
            AtonType::SouthCardinal => 22,
            AtonType::WestCardinal => 23,
            AtonType::PortHandMark => 24,
            AtonType::StarboardHandMark => 25,
            AtonType::PreferredPort => 26,
            AtonType::PreferredStarboard => 27,
            AtonType::IsolatedDanger => 28,
            AtonType::SafeWater => 29,
            AtonType::SpecialMark => 30,
        }
    }

    /// Descriptive name, as used by S-125 data sets
    pub fn description(&self) -> &'static str {
        match self {
            AtonType::Default => "Default",
            AtonType::Wreck => "Emergency Wreck Marking Buoy",
            AtonType::NorthCardinal => "Cardinal Mark N",
            AtonType::EastCardinal => "Cardinal Mark E",
            AtonType::SouthCardinal => "Cardinal Mark S",
            AtonType::WestCardinal => "Cardinal Mark W",
            AtonType::PortHandMark => "Port hand Mark",
            AtonType::StarboardHandMark => "Starboard hand Mark",
            AtonType::PreferredPort => "Preferred Channel Port hand",
            AtonType::PreferredStarboard => "Preferred Channel Starboard hand",
            AtonType::IsolatedDanger => "Isolated Danger",
            AtonType::SafeWater => "Safe Water",
            AtonType::SpecialMark => "Special Mark",
        }
    }

    /// Looks a type up by its transmitted code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }
}

impl FromStr for AtonType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.description().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::encoding(format!("unknown AtoN type '{}'", s)))
    }
}

/// AIS message 21 describing a physical or virtual Aid-to-Navigation
#[derive(Debug, Clone, PartialEq)]
pub struct AtonReport {
    mmsi: u32,
    aton_type: AtonType,
    name: String,
    latitude: f64,
    longitude: f64,
    length: u32,
    width: u32,
    raim: bool,
    virtual_aton: bool,
    timestamp: DateTime<Utc>,
}

impl AtonReport {
    /// Creates a report for the AtoN at the given position
    ///
    /// Fails if the name holds characters outside the AIS 6-bit vocabulary.
    pub fn new(
        mmsi: u32,
        aton_type: AtonType,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self> {
        let name = name.into();
        if let Some(c) = name
            .chars()
            .find(|c| !SIX_BIT_VOCABULARY.contains(c.to_ascii_uppercase()))
        {
            return Err(Error::encoding(format!(
                "AtoN name '{}' contains '{}' which has no 6-bit representation",
                name, c
            )));
        }

        Ok(AtonReport {
            mmsi,
            aton_type,
            name,
            latitude,
            longitude,
            length: 0,
            width: 0,
            raim: false,
            virtual_aton: false,
            timestamp: Utc::now(),
        })
    }

    /// Sets the physical dimensions in metres
    pub fn with_dimensions(mut self, length: u32, width: u32) -> Self {
        self.length = length;
        self.width = width;
        self
    }

    /// Marks the AtoN as virtual
    pub fn with_virtual(mut self, virtual_aton: bool) -> Self {
        self.virtual_aton = virtual_aton;
        self
    }

    /// Sets the RAIM flag
    pub fn with_raim(mut self, raim: bool) -> Self {
        self.raim = raim;
        self
    }

    /// Sets the transmission timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn aton_type(&self) -> AtonType {
        self.aton_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn is_virtual(&self) -> bool {
        self.virtual_aton
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn encode_text(text: &str) -> String {
        // the constructor only admits vocabulary characters
        string_to_binary(text, true).unwrap_or_default()
    }
}

impl Message for AtonReport {
    fn mmsi(&self) -> u32 {
        self.mmsi
    }

    fn message_id(&self) -> u8 {
        21
    }

    fn binary_message_string(&self) -> String {
        let (name, extension) = match self.name.char_indices().nth(NAME_FIELD_CHARS) {
            Some((split, _)) => self.name.split_at(split),
            None => (self.name.as_str(), ""),
        };
        let (half_length, half_width) = if self.virtual_aton {
            (0, 0)
        } else {
            (i64::from(self.length / 2), i64::from(self.width / 2))
        };

        let mut bits = String::with_capacity(272 + extension.len() * 6);
        bits.push_str(&int_to_binary(21, 6)); // message id
        bits.push_str(&int_to_binary(0, 2)); // repeat indicator
        bits.push_str(&int_to_binary(i64::from(self.mmsi), 30));
        bits.push_str(&int_to_binary(i64::from(self.aton_type.code()), 5));
        bits.push_str(&Self::encode_text(&format!("{:<width$}", name, width = NAME_FIELD_CHARS)));
        bits.push_str(&int_to_binary(0, 1)); // position accuracy
        bits.push_str(&int_to_binary((self.longitude * POSITION_SCALE).round() as i64, 28));
        bits.push_str(&int_to_binary((self.latitude * POSITION_SCALE).round() as i64, 27));
        bits.push_str(&int_to_binary(half_length, 9)); // to bow
        bits.push_str(&int_to_binary(half_length, 9)); // to stern
        bits.push_str(&int_to_binary(half_width, 6)); // to port
        bits.push_str(&int_to_binary(half_width, 6)); // to starboard
        bits.push_str(&int_to_binary(0, 4)); // fix type
        bits.push_str(&int_to_binary(i64::from(self.timestamp.second()), 6));
        bits.push_str(&int_to_binary(0, 1)); // off position
        bits.push_str(&int_to_binary(0, 8)); // AtoN status
        bits.push_str(&int_to_binary(i64::from(self.raim), 1));
        bits.push_str(&int_to_binary(i64::from(self.virtual_aton), 1));
        bits.push_str(&int_to_binary(0, 2)); // assigned mode, spare
        bits.push_str(&Self::encode_text(extension));
        pad_to_six_bit_boundary(&bits)
    }
}
