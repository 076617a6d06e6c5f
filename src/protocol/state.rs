use std::fmt;

use crate::core::{GROUP_ID_MODULUS, SEQUENCE_ID_MODULUS};

/// Group id a fresh connection starts from
pub const INITIAL_GROUP_ID: u8 = 1;

/// Phase of the transmission in flight on a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransmissionPhase {
    /// No transmission in flight
    #[default]
    Idle,
    /// Packing and armoring the message
    Encoding,
    /// Cutting the payload into sentences
    Fragmenting,
    /// Framing each sentence and writing datagrams
    Sending,
}

impl TransmissionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TransmissionPhase::Idle => "Idle",
            TransmissionPhase::Encoding => "Encoding",
            TransmissionPhase::Fragmenting => "Fragmenting",
            TransmissionPhase::Sending => "Sending",
        }
    }

    /// Whether moving to `next` follows the Idle, Encoding, Fragmenting,
    /// Sending cycle. Sending a prebuilt batch skips straight to Sending.
    pub fn can_advance_to(&self, next: TransmissionPhase) -> bool {
        use TransmissionPhase::*;
        matches!(
            (self, next),
            (Idle, Encoding)
                | (Idle, Sending)
                | (Encoding, Fragmenting)
                | (Fragmenting, Sending)
                | (Fragmenting, Idle)
                | (Sending, Sending)
                | (Sending, Idle)
        )
    }
}

impl fmt::Display for TransmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rolling counters of one destination connection
///
/// The group id wraps modulo 99 and both sequence ids wrap modulo 10. The
/// value a sentence carries is the one read before the counter advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceState {
    pub group_id: u8,
    pub vdm_sequence_id: u8,
    pub bbm_sequence_id: u8,
}

impl Default for SequenceState {
    fn default() -> Self {
        SequenceState {
            group_id: INITIAL_GROUP_ID,
            vdm_sequence_id: 0,
            bbm_sequence_id: 0,
        }
    }
}

impl SequenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the group id after a batch, returning the id the batch used
    pub fn advance_group(&mut self) -> u8 {
        let used = self.group_id;
        self.group_id = (self.group_id + 1) % GROUP_ID_MODULUS;
        used
    }

    /// Advances the VDM sequence id, returning the id the fragments used
    pub fn advance_vdm(&mut self) -> u8 {
        let used = self.vdm_sequence_id;
        self.vdm_sequence_id = (self.vdm_sequence_id + 1) % SEQUENCE_ID_MODULUS;
        used
    }

    /// Advances the BBM sequence id, returning the id the fragments used
    pub fn advance_bbm(&mut self) -> u8 {
        let used = self.bbm_sequence_id;
        self.bbm_sequence_id = (self.bbm_sequence_id + 1) % SEQUENCE_ID_MODULUS;
        used
    }
}
