use std::net::SocketAddr;
use bytes::BytesMut;
use tokio::net::{lookup_host, UdpSocket};
use tokio::sync::Mutex;
use tokio_util::codec::Encoder;

use crate::core::{AisChannel, BroadcastMethod, Error, Result, StationConfig};
use crate::protocol::{
    builder::{BbmSentenceBuilder, TsaSentenceBuilder, VdmSentenceBuilder},
    codec::EnvelopeCodec,
    envelope::Envelope,
    message::Message,
    sentence::Sentence,
    state::{SequenceState, TransmissionPhase},
};

/// Mutable state guarded by the connection lock
struct Inner {
    /// UDP socket, `None` once the connection is closed
    socket: Option<UdpSocket>,
    /// Rolling group and sequence counters
    state: SequenceState,
    /// Phase of the transmission in flight
    phase: TransmissionPhase,
    /// Envelope codec
    codec: EnvelopeCodec,
    /// Buffer holding the datagram being sent
    send_buffer: BytesMut,
}

impl Inner {
    fn enter(&mut self, station: &str, next: TransmissionPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "transmission phase {} cannot move to {}",
            self.phase,
            next
        );
        tracing::trace!(station = %station, from = %self.phase, to = %next, "Transmission phase");
        self.phase = next;
    }

    /// Puts the machine back to Idle if a previous send was cancelled midway
    fn recover(&mut self, station: &str) {
        if self.phase != TransmissionPhase::Idle {
            tracing::warn!(station = %station, phase = %self.phase, "Previous transmission was interrupted");
            self.phase = TransmissionPhase::Idle;
        }
    }
}

/// Connection to a single VDES-1000 transceiver
///
/// Every rendered sentence is framed in an IEC 61162-450 tag block and sent
/// as one UDP datagram. The whole of a send, counter updates included, runs
/// under one lock so concurrent sends to the same station never interleave
/// or reuse a group or sequence id. Sends to different stations are
/// independent.
pub struct VdesConnection {
    /// Station this connection talks to
    config: StationConfig,
    /// Resolved transceiver address
    remote: SocketAddr,
    /// Local address the socket is bound to
    local_addr: SocketAddr,
    /// Socket, counters and buffers
    inner: Mutex<Inner>,
}

impl VdesConnection {
    /// Resolves the station address and opens a UDP socket towards it
    pub async fn connect(config: StationConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        let remote = lookup_host(endpoint.as_str())
            .await
            .map_err(|e| {
                Error::config(format!("Failed to resolve station '{}' at {}: {}", config.name, endpoint, e))
            })?
            .next()
            .ok_or_else(|| Error::config(format!("No address found for station '{}' at {}", config.name, endpoint)))?;

        let bind_addr = if remote.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        tracing::debug!(station = %config.name, addr = %bind_addr, "Binding UDP socket");

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            tracing::error!(station = %config.name, addr = %bind_addr, error = %e, "Failed to bind UDP socket");
            Error::Io(e)
        })?;

        let local_addr = socket.local_addr().map_err(|e| {
            tracing::error!(station = %config.name, error = %e, "Failed to get local address");
            Error::network(format!("Failed to get local address: {}", e))
        })?;

        tracing::debug!(
            station = %config.name,
            local = %local_addr,
            remote = %remote,
            method = %config.broadcast_method,
            "VDES connection established"
        );

        Ok(VdesConnection {
            config,
            remote,
            local_addr,
            inner: Mutex::new(Inner {
                socket: Some(socket),
                state: SequenceState::new(),
                phase: TransmissionPhase::Idle,
                codec: EnvelopeCodec::new(),
                send_buffer: BytesMut::with_capacity(256),
            }),
        })
    }

    /// Station configuration
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Station name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Broadcast method used by [`send_message`](Self::send_message)
    pub fn broadcast_method(&self) -> BroadcastMethod {
        self.config.broadcast_method
    }

    /// Resolved transceiver address
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }

    /// Local address of the socket
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Snapshot of the rolling counters
    pub async fn counters(&self) -> SequenceState {
        self.inner.lock().await.state
    }

    /// Phase of the transmission in flight
    pub async fn phase(&self) -> TransmissionPhase {
        self.inner.lock().await.phase
    }

    /// Whether [`close`](Self::close) has been called
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.socket.is_none()
    }

    /// Releases the socket. Closing twice is a no-op.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        if inner.socket.take().is_some() {
            tracing::debug!(station = %self.config.name, local = %self.local_addr, "VDES connection closed");
        }
    }

    /// Transmits a message with the station's broadcast method
    ///
    /// `None` sends nothing and leaves the counters untouched. Returns the
    /// number of datagrams handed to the socket; datagrams that fail to send
    /// are logged and dropped.
    pub async fn send_message(&self, message: Option<&dyn Message>, channel: AisChannel) -> Result<usize> {
        let Some(message) = message else {
            tracing::debug!(station = %self.config.name, "No message to send");
            return Ok(0);
        };

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        self.ensure_open(inner)?;
        inner.recover(&self.config.name);

        inner.enter(&self.config.name, TransmissionPhase::Encoding);
        let payload = message.binary_message(true);
        tracing::debug!(
            station = %self.config.name,
            mmsi = message.mmsi(),
            message_id = message.message_id(),
            channel = %channel,
            bytes = payload.len(),
            "Encoded message"
        );

        let sent = match self.config.broadcast_method {
            BroadcastMethod::TsaVdm => self.send_with_tsa_vdm(inner, &payload, channel).await,
            BroadcastMethod::Bbm => self.send_with_bbm(inner, &payload, message.message_id(), channel).await,
        };
        inner.enter(&self.config.name, TransmissionPhase::Idle);

        tracing::info!(
            station = %self.config.name,
            method = %self.config.broadcast_method,
            mmsi = message.mmsi(),
            datagrams = sent,
            "Message dispatched"
        );
        Ok(sent)
    }

    /// Transmits a prebuilt batch of sentences as one tag block group
    ///
    /// An empty batch sends nothing and leaves the counters untouched.
    pub async fn send_sentences(&self, sentences: &[Sentence]) -> Result<usize> {
        if sentences.is_empty() {
            return Ok(0);
        }

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        self.ensure_open(inner)?;
        inner.recover(&self.config.name);

        let sent = self.send_batch(inner, sentences).await;
        inner.enter(&self.config.name, TransmissionPhase::Idle);
        Ok(sent)
    }

    fn ensure_open(&self, inner: &Inner) -> Result<()> {
        if inner.socket.is_none() {
            return Err(Error::invalid_state(format!("connection to station '{}' is closed", self.config.name)));
        }
        Ok(())
    }

    /// TSA first as a batch of its own, then the VDM fragments it schedules
    async fn send_with_tsa_vdm(&self, inner: &mut Inner, payload: &[u8], channel: AisChannel) -> usize {
        inner.enter(&self.config.name, TransmissionPhase::Fragmenting);
        let vdm_link = inner.state.vdm_sequence_id;
        let vdms = VdmSentenceBuilder::new()
            .talker_id(self.config.talker_id.clone())
            .sequence_id(vdm_link)
            .channel(channel)
            .build_payload(payload)
            .into_iter()
            .map(Sentence::from)
            .collect();
        let mut tsa = TsaSentenceBuilder::new()
            .talker_id(self.config.talker_id.clone())
            .vdm_link(vdm_link)
            .channel(channel)
            .sentences(vdms)
            .build();

        if !tsa.sentences.is_empty() {
            inner.state.advance_vdm();
        }
        tracing::debug!(
            station = %self.config.name,
            sequence_id = vdm_link,
            fragments = tsa.sentences.len(),
            "Built TSA/VDM sentences"
        );

        let vdms = std::mem::take(&mut tsa.sentences);
        let mut sent = self.send_batch(inner, &[Sentence::from(tsa)]).await;
        sent += self.send_batch(inner, &vdms).await;
        sent
    }

    async fn send_with_bbm(&self, inner: &mut Inner, payload: &[u8], message_id: u8, channel: AisChannel) -> usize {
        inner.enter(&self.config.name, TransmissionPhase::Fragmenting);
        let sequence_id = inner.state.bbm_sequence_id;
        let bbms: Vec<Sentence> = BbmSentenceBuilder::new()
            .talker_id(self.config.talker_id.clone())
            .sequence_id(sequence_id)
            .channel(channel)
            .build_payload(payload, message_id)
            .into_iter()
            .map(Sentence::from)
            .collect();

        if !bbms.is_empty() {
            inner.state.advance_bbm();
        }
        tracing::debug!(
            station = %self.config.name,
            sequence_id = sequence_id,
            fragments = bbms.len(),
            "Built BBM sentences"
        );

        self.send_batch(inner, &bbms).await
    }

    /// Frames and sends each sentence, then advances the group id
    async fn send_batch(&self, inner: &mut Inner, sentences: &[Sentence]) -> usize {
        if sentences.is_empty() {
            return 0;
        }
        inner.enter(&self.config.name, TransmissionPhase::Sending);

        let total = sentences.len();
        let group_id = inner.state.group_id;
        let mut sent = 0;

        for (i, sentence) in sentences.iter().enumerate() {
            let envelope = Envelope::for_sentence(total, i + 1, group_id, self.config.source_id.clone(), sentence);

            inner.send_buffer.clear();
            if let Err(e) = inner.codec.encode(&envelope, &mut inner.send_buffer) {
                tracing::error!(station = %self.config.name, group_id = group_id, error = %e, "Dropping datagram");
                continue;
            }

            let Some(socket) = inner.socket.as_ref() else {
                break;
            };

            tracing::trace!(
                station = %self.config.name,
                local = %self.local_addr,
                remote = %self.remote,
                bytes = inner.send_buffer.len(),
                group_id = group_id,
                "Sending datagram"
            );

            match socket.send_to(&inner.send_buffer, self.remote).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    tracing::error!(
                        station = %self.config.name,
                        remote = %self.remote,
                        group_id = group_id,
                        error = %e,
                        "Failed to send datagram, dropping it"
                    );
                }
            }
        }

        inner.state.advance_group();
        sent
    }
}

impl std::fmt::Debug for VdesConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VdesConnection")
            .field("station", &self.config.name)
            .field("method", &self.config.broadcast_method)
            .field("local_addr", &self.local_addr)
            .field("remote", &self.remote)
            .finish()
    }
}
