//! Protocol implementation module
//!
//! This module defines the AIS messages the gateway transmits, their packing
//! into armored payloads, the BBM/TSA/VDM/ABB sentence formats, fragmentation,
//! tag block framing and the per-connection counters.

pub mod armor;
pub mod aton;
pub mod builder;
pub mod checksum;
pub mod codec;
pub mod envelope;
pub mod message;
pub mod sentence;
pub mod state;

pub use self::armor::{encode_bit_string, fill_bits};
pub use self::aton::{AtonReport, AtonType};
pub use self::builder::{render_single_vdm, BbmSentenceBuilder, TsaSentenceBuilder, VdmSentenceBuilder};
pub use self::checksum::checksum;
pub use self::codec::EnvelopeCodec;
pub use self::envelope::Envelope;
pub use self::message::{AddressedBinaryMessage, BroadcastBinaryMessage, Message};
pub use self::sentence::{AbbSentence, BbmSentence, Sentence, TsaSentence, VdmSentence};
pub use self::state::{SequenceState, TransmissionPhase};
