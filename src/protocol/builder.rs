//! Sentence builders
//!
//! Builders turn a [`Message`] into the ordered list of sentences that carry
//! it. The armored payload is cut into contiguous slices of at most
//! [`MAX_PAYLOAD_CHARS`] characters, one slice per sentence, numbered from 0.
//! A message with an empty payload produces no sentences at all.

use chrono::{DateTime, Utc};

use crate::core::{AisChannel, DEFAULT_TALKER_ID, MAX_PAYLOAD_CHARS};
use super::message::Message;
use super::sentence::{BbmSentence, Sentence, TsaSentence, VdmSentence};

/// Cuts an armored payload into `(sentences_total, sentence_num, slice)` parts
fn fragments(payload: &[u8], max_chars: usize) -> impl Iterator<Item = (u32, u32, &[u8])> {
    let max_chars = max_chars.max(1);
    let total = payload.len().div_ceil(max_chars) as u32;
    payload
        .chunks(max_chars)
        .enumerate()
        .map(move |(num, chunk)| (total, num as u32, chunk))
}

/// Formats a UTC time as the `hhmm` field of a TSA sentence
pub fn utc_hhmm(time: DateTime<Utc>) -> String {
    time.format("%H%M").to_string()
}

/// Builds the VDM fragments of a message
#[derive(Debug, Clone)]
pub struct VdmSentenceBuilder {
    talker_id: String,
    sequence_id: Option<u8>,
    channel: AisChannel,
    max_payload_chars: usize,
}

impl Default for VdmSentenceBuilder {
    fn default() -> Self {
        VdmSentenceBuilder {
            talker_id: DEFAULT_TALKER_ID.to_string(),
            sequence_id: None,
            channel: AisChannel::default(),
            max_payload_chars: MAX_PAYLOAD_CHARS,
        }
    }
}

impl VdmSentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn talker_id(mut self, talker_id: impl Into<String>) -> Self {
        self.talker_id = talker_id.into();
        self
    }

    pub fn sequence_id(mut self, sequence_id: impl Into<Option<u8>>) -> Self {
        self.sequence_id = sequence_id.into();
        self
    }

    pub fn channel(mut self, channel: AisChannel) -> Self {
        self.channel = channel;
        self
    }

    pub fn max_payload_chars(mut self, max_payload_chars: usize) -> Self {
        self.max_payload_chars = max_payload_chars;
        self
    }

    pub fn build(&self, message: &dyn Message) -> Vec<VdmSentence> {
        self.build_payload(&message.binary_message(true))
    }

    /// Fragments an already armored payload
    pub fn build_payload(&self, payload: &[u8]) -> Vec<VdmSentence> {
        fragments(payload, self.max_payload_chars)
            .map(|(total, num, chunk)| {
                VdmSentence::new(total, num, self.channel, chunk)
                    .with_talker_id(self.talker_id.clone())
                    .with_sequence_id(self.sequence_id)
            })
            .collect()
    }
}

/// Builds the BBM fragments of a message
#[derive(Debug, Clone)]
pub struct BbmSentenceBuilder {
    talker_id: String,
    sequence_id: Option<u8>,
    channel: AisChannel,
    message_id: Option<u8>,
    max_payload_chars: usize,
}

impl Default for BbmSentenceBuilder {
    fn default() -> Self {
        BbmSentenceBuilder {
            talker_id: DEFAULT_TALKER_ID.to_string(),
            sequence_id: None,
            channel: AisChannel::default(),
            message_id: None,
            max_payload_chars: MAX_PAYLOAD_CHARS,
        }
    }
}

impl BbmSentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn talker_id(mut self, talker_id: impl Into<String>) -> Self {
        self.talker_id = talker_id.into();
        self
    }

    pub fn sequence_id(mut self, sequence_id: impl Into<Option<u8>>) -> Self {
        self.sequence_id = sequence_id.into();
        self
    }

    pub fn channel(mut self, channel: AisChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Overrides the message id, which otherwise comes from the message
    pub fn message_id(mut self, message_id: u8) -> Self {
        self.message_id = Some(message_id);
        self
    }

    pub fn max_payload_chars(mut self, max_payload_chars: usize) -> Self {
        self.max_payload_chars = max_payload_chars;
        self
    }

    pub fn build(&self, message: &dyn Message) -> Vec<BbmSentence> {
        self.build_payload(&message.binary_message(true), message.message_id())
    }

    /// Fragments an already armored payload of the given AIS message id
    pub fn build_payload(&self, payload: &[u8], message_id: u8) -> Vec<BbmSentence> {
        let message_id = self.message_id.unwrap_or(message_id);
        fragments(payload, self.max_payload_chars)
            .map(|(total, num, chunk)| {
                BbmSentence::new(total, num, self.channel, message_id, chunk)
                    .with_talker_id(self.talker_id.clone())
                    .with_sequence_id(self.sequence_id)
            })
            .collect()
    }
}

/// Builds a TSA sentence together with the sentences it schedules
///
/// The scheduled sentences are either given directly or built as the VDM
/// fragments of a message, linked through the TSA's `vdm_link`.
#[derive(Debug, Clone)]
pub struct TsaSentenceBuilder<'a> {
    talker_id: String,
    unique_id: Option<String>,
    vdm_link: u8,
    channel: AisChannel,
    utc_hhmm: Option<String>,
    start_slot: Option<String>,
    priority: Option<u8>,
    sentences: Option<Vec<Sentence>>,
    message: Option<&'a dyn Message>,
}

impl Default for TsaSentenceBuilder<'_> {
    fn default() -> Self {
        TsaSentenceBuilder {
            talker_id: DEFAULT_TALKER_ID.to_string(),
            unique_id: None,
            vdm_link: 0,
            channel: AisChannel::default(),
            utc_hhmm: None,
            start_slot: None,
            priority: None,
            sentences: None,
            message: None,
        }
    }
}

impl<'a> TsaSentenceBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn talker_id(mut self, talker_id: impl Into<String>) -> Self {
        self.talker_id = talker_id.into();
        self
    }

    pub fn unique_id(mut self, unique_id: impl Into<Option<String>>) -> Self {
        self.unique_id = unique_id.into();
        self
    }

    pub fn vdm_link(mut self, vdm_link: u8) -> Self {
        self.vdm_link = vdm_link;
        self
    }

    pub fn channel(mut self, channel: AisChannel) -> Self {
        self.channel = channel;
        self
    }

    pub fn utc_time(mut self, time: DateTime<Utc>) -> Self {
        self.utc_hhmm = Some(utc_hhmm(time));
        self
    }

    pub fn start_slot(mut self, start_slot: impl Into<String>) -> Self {
        self.start_slot = Some(start_slot.into());
        self
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Schedules an already built list of sentences
    pub fn sentences(mut self, sentences: Vec<Sentence>) -> Self {
        self.sentences = Some(sentences);
        self
    }

    /// Schedules the VDM fragments of a message
    pub fn message(mut self, message: &'a dyn Message) -> Self {
        self.message = Some(message);
        self
    }

    pub fn build(self) -> TsaSentence {
        let sentences = match (self.sentences, self.message) {
            (Some(sentences), _) => sentences,
            (None, Some(message)) => VdmSentenceBuilder::new()
                .talker_id(self.talker_id.clone())
                .sequence_id(self.vdm_link)
                .channel(self.channel)
                .build(message)
                .into_iter()
                .map(Sentence::from)
                .collect(),
            (None, None) => Vec::new(),
        };

        let mut tsa = TsaSentence::new(self.vdm_link, self.channel).with_talker_id(self.talker_id);
        tsa.unique_id = self.unique_id;
        tsa.utc_hhmm = self.utc_hhmm;
        tsa.start_slot = self.start_slot;
        tsa.priority = self.priority;
        tsa.sentences = sentences;
        tsa
    }
}

/// Renders a message as one checksummed VDM sentence, for diagnostics
///
/// Returns `None` when the message has no payload.
pub fn render_single_vdm(message: &dyn Message, channel: AisChannel) -> Option<String> {
    let payload = message.binary_message(true);
    if payload.is_empty() {
        return None;
    }
    Some(Sentence::from(VdmSentence::new(1, 1, channel, payload)).to_string_with_checksum())
}
