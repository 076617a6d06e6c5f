//! Sentence formats
//!
//! Every sentence renders as `!` + talker id + formatter code followed by its
//! comma separated fields. Absent optional fields render as empty text
//! between the commas; they are never dropped.

use std::fmt;

use crate::core::{AisChannel, DEFAULT_TALKER_ID};
use super::armor::fill_bits;
use super::checksum::checksum;

/// Default TSA transmission priority
pub const DEFAULT_TSA_PRIORITY: u8 = 2;

fn write_payload(f: &mut fmt::Formatter<'_>, payload: &[u8]) -> fmt::Result {
    for byte in payload {
        write!(f, "{}", *byte as char)?;
    }
    Ok(())
}

fn write_optional<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: &Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{}", value),
        None => Ok(()),
    }
}

/// VDM: VHF data-link message carrying one fragment of an armored payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdmSentence {
    pub talker_id: String,
    pub sentences_total: u32,
    pub sentence_num: u32,
    pub sequence_id: Option<u8>,
    pub channel: AisChannel,
    pub payload: Vec<u8>,
}

impl VdmSentence {
    pub const FORMATTER_CODE: &'static str = "VDM";

    pub fn new(sentences_total: u32, sentence_num: u32, channel: AisChannel, payload: impl Into<Vec<u8>>) -> Self {
        VdmSentence {
            talker_id: DEFAULT_TALKER_ID.to_string(),
            sentences_total,
            sentence_num,
            sequence_id: None,
            channel,
            payload: payload.into(),
        }
    }

    pub fn with_talker_id(mut self, talker_id: impl Into<String>) -> Self {
        self.talker_id = talker_id.into();
        self
    }

    pub fn with_sequence_id(mut self, sequence_id: Option<u8>) -> Self {
        self.sequence_id = sequence_id;
        self
    }

    pub fn fill_bits(&self) -> u8 {
        fill_bits(self.payload.len())
    }
}

impl fmt::Display for VdmSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}{},{},{},", self.talker_id, Self::FORMATTER_CODE, self.sentences_total, self.sentence_num)?;
        write_optional(f, &self.sequence_id)?;
        f.write_str(",")?;
        write_optional(f, &self.channel.letter())?;
        f.write_str(",")?;
        write_payload(f, &self.payload)?;
        write!(f, ",{}", self.fill_bits())
    }
}

/// BBM: binary broadcast message handed to the transceiver for transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BbmSentence {
    pub talker_id: String,
    pub sentences_total: u32,
    pub sentence_num: u32,
    pub sequence_id: Option<u8>,
    pub channel: AisChannel,
    pub message_id: u8,
    pub payload: Vec<u8>,
}

impl BbmSentence {
    pub const FORMATTER_CODE: &'static str = "BBM";

    pub fn new(
        sentences_total: u32,
        sentence_num: u32,
        channel: AisChannel,
        message_id: u8,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        BbmSentence {
            talker_id: DEFAULT_TALKER_ID.to_string(),
            sentences_total,
            sentence_num,
            sequence_id: None,
            channel,
            message_id,
            payload: payload.into(),
        }
    }

    pub fn with_talker_id(mut self, talker_id: impl Into<String>) -> Self {
        self.talker_id = talker_id.into();
        self
    }

    pub fn with_sequence_id(mut self, sequence_id: Option<u8>) -> Self {
        self.sequence_id = sequence_id;
        self
    }

    pub fn fill_bits(&self) -> u8 {
        fill_bits(self.payload.len())
    }
}

impl fmt::Display for BbmSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}{},{},{},", self.talker_id, Self::FORMATTER_CODE, self.sentences_total, self.sentence_num)?;
        write_optional(f, &self.sequence_id)?;
        write!(f, ",{},{},", self.channel.index(), self.message_id)?;
        write_payload(f, &self.payload)?;
        write!(f, ",{}", self.fill_bits())
    }
}

/// ABB: application specific broadcast binary message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbSentence {
    pub talker_id: String,
    pub sentences_total: u32,
    pub sentence_num: u32,
    pub sequence_id: u32,
    pub source_id: Option<u32>,
    pub channel: AisChannel,
    pub asm_id: Option<String>,
    pub transmission_format: u8,
    pub payload: Vec<u8>,
}

impl AbbSentence {
    pub const FORMATTER_CODE: &'static str = "ABB";

    pub fn new(
        sentences_total: u32,
        sentence_num: u32,
        sequence_id: u32,
        channel: AisChannel,
        transmission_format: u8,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        AbbSentence {
            talker_id: DEFAULT_TALKER_ID.to_string(),
            sentences_total,
            sentence_num,
            sequence_id,
            source_id: None,
            channel,
            asm_id: None,
            transmission_format,
            payload: payload.into(),
        }
    }

    pub fn with_talker_id(mut self, talker_id: impl Into<String>) -> Self {
        self.talker_id = talker_id.into();
        self
    }

    pub fn with_source_id(mut self, source_id: Option<u32>) -> Self {
        self.source_id = source_id;
        self
    }

    pub fn with_asm_id(mut self, asm_id: Option<String>) -> Self {
        self.asm_id = asm_id;
        self
    }

    pub fn fill_bits(&self) -> u8 {
        fill_bits(self.payload.len())
    }
}

impl fmt::Display for AbbSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "!{}{},{:02},{:02},{},",
            self.talker_id,
            Self::FORMATTER_CODE,
            self.sentences_total,
            self.sentence_num,
            self.sequence_id
        )?;
        write_optional(f, &self.source_id)?;
        write!(f, ",{},", self.channel.index())?;
        write_optional(f, &self.asm_id)?;
        write!(f, ",{},", self.transmission_format)?;
        write_payload(f, &self.payload)?;
        write!(f, ",{}", self.fill_bits())
    }
}

/// TSA: transmit slot assignment scheduling a group of VDM sentences
///
/// The scheduled sentences travel with the TSA so the connection knows what
/// to transmit after it, but they are not part of its rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsaSentence {
    pub talker_id: String,
    pub unique_id: Option<String>,
    pub vdm_link: u8,
    pub channel: AisChannel,
    pub utc_hhmm: Option<String>,
    pub start_slot: Option<String>,
    pub priority: Option<u8>,
    pub sentences: Vec<Sentence>,
}

impl TsaSentence {
    pub const FORMATTER_CODE: &'static str = "TSA";

    pub fn new(vdm_link: u8, channel: AisChannel) -> Self {
        TsaSentence {
            talker_id: DEFAULT_TALKER_ID.to_string(),
            unique_id: None,
            vdm_link,
            channel,
            utc_hhmm: None,
            start_slot: None,
            priority: None,
            sentences: Vec::new(),
        }
    }

    pub fn with_talker_id(mut self, talker_id: impl Into<String>) -> Self {
        self.talker_id = talker_id.into();
        self
    }

    /// Sentences scheduled by this slot assignment
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    fn channel_letter(&self) -> char {
        match self.channel {
            AisChannel::B => 'B',
            _ => 'A',
        }
    }
}

impl fmt::Display for TsaSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}{},", self.talker_id, Self::FORMATTER_CODE)?;
        write_optional(f, &self.unique_id)?;
        write!(f, ",{},{},", self.vdm_link, self.channel_letter())?;
        write_optional(f, &self.utc_hhmm)?;
        f.write_str(",")?;
        write_optional(f, &self.start_slot)?;
        write!(f, ",{}", self.priority.unwrap_or(DEFAULT_TSA_PRIORITY))
    }
}

/// Any sentence the gateway can transmit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    Vdm(VdmSentence),
    Bbm(BbmSentence),
    Abb(AbbSentence),
    Tsa(TsaSentence),
}

impl Sentence {
    /// Two letter talker identifier
    pub fn talker_id(&self) -> &str {
        match self {
            Sentence::Vdm(s) => &s.talker_id,
            Sentence::Bbm(s) => &s.talker_id,
            Sentence::Abb(s) => &s.talker_id,
            Sentence::Tsa(s) => &s.talker_id,
        }
    }

    /// Three letter formatter code
    pub fn formatter_code(&self) -> &'static str {
        match self {
            Sentence::Vdm(_) => VdmSentence::FORMATTER_CODE,
            Sentence::Bbm(_) => BbmSentence::FORMATTER_CODE,
            Sentence::Abb(_) => AbbSentence::FORMATTER_CODE,
            Sentence::Tsa(_) => TsaSentence::FORMATTER_CODE,
        }
    }

    /// Rendered sentence followed by `*` and its checksum
    pub fn to_string_with_checksum(&self) -> String {
        let body = self.to_string();
        let checksum = checksum(&body);
        format!("{}*{}", body, checksum)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Vdm(s) => fmt::Display::fmt(s, f),
            Sentence::Bbm(s) => fmt::Display::fmt(s, f),
            Sentence::Abb(s) => fmt::Display::fmt(s, f),
            Sentence::Tsa(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl From<VdmSentence> for Sentence {
    fn from(sentence: VdmSentence) -> Self {
        Sentence::Vdm(sentence)
    }
}

impl From<BbmSentence> for Sentence {
    fn from(sentence: BbmSentence) -> Self {
        Sentence::Bbm(sentence)
    }
}

impl From<AbbSentence> for Sentence {
    fn from(sentence: AbbSentence) -> Self {
        Sentence::Abb(sentence)
    }
}

impl From<TsaSentence> for Sentence {
    fn from(sentence: TsaSentence) -> Self {
        Sentence::Tsa(sentence)
    }
}
