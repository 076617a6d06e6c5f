#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test subscriber once; `RUST_LOG` controls the output
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Binds a loopback socket standing in for a VDES-1000 transceiver
pub async fn transceiver() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

/// Receives one datagram as text
pub async fn recv_datagram(socket: &UdpSocket) -> String {
    let mut buf = vec![0u8; 4096];
    let (n, _) = timeout(Duration::from_secs(2), socket.recv_from(&mut buf))
        .await
        .expect("timed out waiting for datagram")
        .unwrap();
    String::from_utf8(buf[..n].to_vec()).unwrap()
}

/// Asserts that nothing arrives within a short window
pub async fn assert_no_datagram(socket: &UdpSocket) {
    let mut buf = vec![0u8; 4096];
    assert!(timeout(Duration::from_millis(150), socket.recv_from(&mut buf)).await.is_err());
}

/// Splits a datagram into its tag block body and its sentence
pub fn split_envelope(datagram: &str) -> (String, String) {
    let rest = datagram.strip_prefix('\\').expect("missing tag block start");
    let (tag, sentence) = rest.split_once('\\').expect("missing tag block end");
    (tag.to_string(), sentence.to_string())
}

/// Parses `g:<total>-<num>-<group>` out of a tag block body
pub fn group_fields(tag: &str) -> (usize, usize, u8) {
    let body = tag.split('*').next().unwrap();
    let group = body.split(',').next().unwrap().strip_prefix("g:").unwrap();
    let mut parts = group.split('-').map(|p| p.parse::<usize>().unwrap());
    let total = parts.next().unwrap();
    let num = parts.next().unwrap();
    let group_id = parts.next().unwrap() as u8;
    (total, num, group_id)
}
