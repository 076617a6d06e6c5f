//! VDES gateway: AIS broadcast over VDES-1000 transceivers
//!
//! This library encodes AIS messages into armored payloads, fragments them
//! into BBM or TSA/VDM sentences, frames each sentence in an IEC 61162-450
//! tag block and sends it as a UDP datagram to the configured stations.
pub mod core;
pub mod network;
pub mod protocol;
pub mod util;

// Re-export commonly used items
pub use crate::core::{AisChannel, BroadcastMethod, Error, GatewayConfig, Result, StationConfig};
pub use crate::network::{Gateway, VdesConnection};
pub use crate::protocol::{
    AddressedBinaryMessage, AtonReport, AtonType, BroadcastBinaryMessage, Message, Sentence,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
