use bytes::BytesMut;
use tokio_util::codec::Encoder;
use std::fmt::Write;

use crate::core::Error;
use super::envelope::Envelope;

/// Largest payload a single UDP datagram can carry
pub const MAX_DATAGRAM_SIZE: usize = 65507;

/// Envelope codec writing framed sentences into a datagram buffer
///
/// Each encoded envelope is meant to be sent as exactly one datagram, so no
/// delimiter or length prefix is written.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeCodec;

impl EnvelopeCodec {
    /// Creates a new envelope codec
    pub fn new() -> Self {
        EnvelopeCodec
    }
}

impl Encoder<&Envelope> for EnvelopeCodec {
    type Error = Error;

    fn encode(&mut self, item: &Envelope, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();
        write!(dst, "{}", item).map_err(|e| Error::encoding(format!("Failed to render envelope: {}", e)))?;

        let written = dst.len() - start;
        if written > MAX_DATAGRAM_SIZE {
            dst.truncate(start);
            return Err(Error::encoding(format!(
                "Envelope of {} bytes exceeds the datagram limit of {} bytes",
                written, MAX_DATAGRAM_SIZE
            )));
        }

        Ok(())
    }
}

impl Encoder<Envelope> for EnvelopeCodec {
    type Error = Error;

    fn encode(&mut self, item: Envelope, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Encoder::<&Envelope>::encode(self, &item, dst)
    }
}
