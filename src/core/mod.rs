//! Core types and traits for the VDES gateway
//!
//! This module contains the fundamental building blocks used throughout the library.

pub mod error;
pub mod types;
pub mod serde;

pub use self::error::{Error, Result};
pub use self::types::{
    AisChannel,
    BroadcastMethod,
    GatewayConfig,
    StationConfig,
};

/// Default talker identifier for sentences emitted by the gateway
pub const DEFAULT_TALKER_ID: &str = "AI";

/// Maximum armored payload characters carried by a single sentence
pub const MAX_PAYLOAD_CHARS: usize = 60;

/// VDM and BBM sequence identifiers wrap at this modulus
pub const SEQUENCE_ID_MODULUS: u8 = 10;

/// IEC 61162-450 group identifiers wrap at this modulus
pub const GROUP_ID_MODULUS: u8 = 99;
