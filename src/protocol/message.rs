use std::fmt;

use crate::util::{byte_to_binary, int_to_binary, pad_right, pad_to_six_bit_boundary};
use super::armor;

/// Designated area code placed in binary messages (international)
pub const DESIGNATED_AREA_CODE: i64 = 1;

/// Function identifier placed in binary messages
pub const FUNCTION_ID: i64 = 1;

/// An AIS message that can be put on air by the gateway
///
/// Implementors only describe their logical bit layout; packing, armoring and
/// fragmentation happen downstream.
pub trait Message: Send + Sync + fmt::Debug {
    /// Source MMSI
    fn mmsi(&self) -> u32;

    /// AIS message id (6, 8, 21, ...)
    fn message_id(&self) -> u8;

    /// Logical content as a string of `'0'`/`'1'`, padded to a multiple of 6
    fn binary_message_string(&self) -> String;

    /// Packed content, 6-bit armored or raw 8-bit
    ///
    /// Raw packing zero-pads the content up to a whole number of bytes.
    fn binary_message(&self, six_bit: bool) -> Vec<u8> {
        let bits = self.binary_message_string();
        if six_bit {
            armor::encode_bit_string(&bits, true)
        } else {
            let width = bits.len().div_ceil(8) * 8;
            armor::encode_bit_string(&pad_right(&bits, width), false)
        }
    }
}

/// AIS message 6: binary data addressed to a single station
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedBinaryMessage {
    mmsi: u32,
    dest_mmsi: u32,
    payload: Vec<u8>,
}

impl AddressedBinaryMessage {
    /// Creates a new addressed binary message
    pub fn new(mmsi: u32, dest_mmsi: u32, payload: impl Into<Vec<u8>>) -> Self {
        AddressedBinaryMessage {
            mmsi,
            dest_mmsi,
            payload: payload.into(),
        }
    }

    /// Destination MMSI
    pub fn dest_mmsi(&self) -> u32 {
        self.dest_mmsi
    }

    /// Application payload
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl Message for AddressedBinaryMessage {
    fn mmsi(&self) -> u32 {
        self.mmsi
    }

    fn message_id(&self) -> u8 {
        6
    }

    fn binary_message_string(&self) -> String {
        let mut bits = String::with_capacity(88 + self.payload.len() * 8);
        bits.push_str(&int_to_binary(6, 6)); // message id
        bits.push_str(&int_to_binary(0, 2)); // repeat indicator
        bits.push_str(&int_to_binary(i64::from(self.mmsi), 30));
        bits.push_str(&int_to_binary(0, 2)); // sequence number
        bits.push_str(&int_to_binary(i64::from(self.dest_mmsi), 30));
        bits.push_str(&int_to_binary(0, 1)); // retransmit
        bits.push_str(&int_to_binary(0, 1)); // spare
        bits.push_str(&int_to_binary(DESIGNATED_AREA_CODE, 10));
        bits.push_str(&int_to_binary(FUNCTION_ID, 6));
        for byte in &self.payload {
            bits.push_str(&byte_to_binary(*byte));
        }
        pad_to_six_bit_boundary(&bits)
    }
}

/// AIS message 8: binary data broadcast to every station in range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastBinaryMessage {
    mmsi: u32,
    payload: Vec<u8>,
}

impl BroadcastBinaryMessage {
    /// Creates a new broadcast binary message
    pub fn new(mmsi: u32, payload: impl Into<Vec<u8>>) -> Self {
        BroadcastBinaryMessage {
            mmsi,
            payload: payload.into(),
        }
    }

    /// Application payload
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl Message for BroadcastBinaryMessage {
    fn mmsi(&self) -> u32 {
        self.mmsi
    }

    fn message_id(&self) -> u8 {
        8
    }

    fn binary_message_string(&self) -> String {
        let mut bits = String::with_capacity(56 + self.payload.len() * 8);
        bits.push_str(&int_to_binary(8, 6)); // message id
        bits.push_str(&int_to_binary(0, 2)); // repeat indicator
        bits.push_str(&int_to_binary(i64::from(self.mmsi), 30));
        bits.push_str(&int_to_binary(0, 2)); // spare
        bits.push_str(&int_to_binary(DESIGNATED_AREA_CODE, 10));
        bits.push_str(&int_to_binary(FUNCTION_ID, 6));
        for byte in &self.payload {
            bits.push_str(&byte_to_binary(*byte));
        }
        pad_to_six_bit_boundary(&bits)
    }
}
