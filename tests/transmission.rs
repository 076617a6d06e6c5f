mod common;

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::Write;
use vdes_gateway::protocol::{checksum, fill_bits};
use vdes_gateway::{
    AddressedBinaryMessage, AisChannel, AtonReport, AtonType, BroadcastBinaryMessage, BroadcastMethod,
    Gateway, GatewayConfig, Message, StationConfig, VdesConnection,
};

use common::{assert_no_datagram, group_fields, init_tracing, recv_datagram, split_envelope, transceiver};

fn assert_checksummed(text: &str) -> &str {
    let (body, cs) = text.rsplit_once('*').expect("missing checksum");
    assert_eq!(checksum(body), cs, "bad checksum on {}", text);
    body
}

/// Payload field of a rendered VDM or BBM sentence
fn payload_field(sentence: &str) -> String {
    let fields: Vec<&str> = sentence.split(',').collect();
    fields[fields.len() - 2].to_string()
}

#[tokio::test]
async fn tsa_vdm_multi_fragment_transmission() {
    init_tracing();
    let (rx, port) = transceiver().await;
    let config = StationConfig::new("tsa", BroadcastMethod::TsaVdm, "127.0.0.1", port).with_source_id("VDES1");
    let conn = VdesConnection::connect(config).await.unwrap();

    let mut rng = StdRng::seed_from_u64(1000);
    let content: Vec<u8> = (0..150).map(|_| rng.gen()).collect();
    let message = BroadcastBinaryMessage::new(992350001, content);
    let armored = message.binary_message(true);
    let fragments = armored.len().div_ceil(60);
    assert!(fragments > 1);

    let sent = conn.send_message(Some(&message), AisChannel::A).await.unwrap();
    assert_eq!(sent, fragments + 1);

    let (tag, tsa) = split_envelope(&recv_datagram(&rx).await);
    assert_eq!(group_fields(assert_checksummed(&tag)), (1, 1, 1));
    assert!(tag.contains(",s:VDES1*"));
    assert_eq!(assert_checksummed(&tsa), "!AITSA,,0,A,,,2");

    let mut reassembled = String::new();
    for num in 1..=fragments {
        let (tag, vdm) = split_envelope(&recv_datagram(&rx).await);
        assert_eq!(group_fields(assert_checksummed(&tag)), (fragments, num, 2));
        let body = assert_checksummed(&vdm);
        assert!(body.starts_with(&format!("!AIVDM,{},{},0,A,", fragments, num - 1)), "{}", body);
        let payload = payload_field(body);
        assert!(payload.len() <= 60);
        assert!(body.ends_with(&format!(",{}", fill_bits(payload.len()))));
        reassembled.push_str(&payload);
    }
    assert_eq!(reassembled.as_bytes(), armored.as_slice());
    assert_no_datagram(&rx).await;

    let counters = conn.counters().await;
    assert_eq!(counters.vdm_sequence_id, 1);
    assert_eq!(counters.group_id, 3);
}

#[tokio::test]
async fn bbm_sequence_ids_advance_per_message() {
    init_tracing();
    let (rx, port) = transceiver().await;
    let config = StationConfig::new("bbm", BroadcastMethod::Bbm, "127.0.0.1", port);
    let conn = VdesConnection::connect(config).await.unwrap();

    let message = AddressedBinaryMessage::new(123456789, 987654321, b"XXX".to_vec());
    for expected in 0..12u8 {
        assert_eq!(conn.send_message(Some(&message), AisChannel::B).await.unwrap(), 1);
        let (tag, bbm) = split_envelope(&recv_datagram(&rx).await);
        let (_, _, group_id) = group_fields(&tag);
        assert_eq!(group_id, expected + 1);
        let body = assert_checksummed(&bbm);
        assert_eq!(body, format!("!AIBBM,1,0,{},2,6,61mg=5CcNJ;4045HF5P,4", expected % 10));
    }
}

#[tokio::test]
async fn aton_report_over_bbm() {
    init_tracing();
    let (rx, port) = transceiver().await;
    let config = StationConfig::new("aton", BroadcastMethod::Bbm, "127.0.0.1", port).with_source_id("src");
    let conn = VdesConnection::connect(config).await.unwrap();

    let report = AtonReport::new(992359598, AtonType::SafeWater, "A VERY LONG NAME FOR A BUOY", 51.5, -0.1)
        .unwrap()
        .with_dimensions(10, 4);
    let armored = report.binary_message(true);

    conn.send_message(Some(&report), AisChannel::A).await.unwrap();
    let (_, bbm) = split_envelope(&recv_datagram(&rx).await);
    let body = assert_checksummed(&bbm);
    assert!(body.starts_with("!AIBBM,1,0,0,1,21,"), "{}", body);
    assert_eq!(payload_field(body).as_bytes(), armored.as_slice());
}

#[tokio::test]
async fn gateway_from_configuration_file() {
    init_tracing();
    let (rx_a, port_a) = transceiver().await;
    let (rx_b, port_b) = transceiver().await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "stations": [
                {{ "name": "north", "broadcast_method": "bbm", "address": "127.0.0.1", "port": {}, "source_id": "N1" }},
                {{ "name": "south", "broadcast_method": "TSA_VDM", "address": "127.0.0.1", "port": {}, "channel": "B" }}
            ]
        }}"#,
        port_a, port_b
    )
    .unwrap();

    let config = GatewayConfig::from_file(file.path()).unwrap();
    assert_eq!(config.stations[1].channel, AisChannel::B);
    assert_eq!(config.stations[1].talker_id, "AI");

    let gateway = Gateway::connect(config).await.unwrap();
    let message = BroadcastBinaryMessage::new(123456789, b"XXX".to_vec());
    let results = gateway.broadcast(Some(&message)).await;
    assert!(results.iter().all(|(_, r)| r.is_ok()));

    let (tag, bbm) = split_envelope(&recv_datagram(&rx_a).await);
    assert!(tag.contains(",s:N1*"));
    assert!(bbm.starts_with("!AIBBM,1,0,0,1,8,81mg=5@0@EQHF0,2*"));

    let (_, tsa) = split_envelope(&recv_datagram(&rx_b).await);
    assert_eq!(tsa, "!AITSA,,0,B,,,2*0E");
    let (_, vdm) = split_envelope(&recv_datagram(&rx_b).await);
    assert_eq!(vdm, "!AIVDM,1,0,0,B,81mg=5@0@EQHF0,2*07");

    gateway.shutdown().await;
    let err = gateway.send_to("north", Some(&message), None).await.unwrap_err();
    assert!(matches!(err, vdes_gateway::Error::InvalidState(_)));
}

#[test]
fn invalid_broadcast_method_in_configuration() {
    let err = GatewayConfig::from_json(
        r#"{ "stations": [ { "name": "x", "broadcast_method": "CARRIER_PIGEON", "address": "127.0.0.1", "port": 4000 } ] }"#,
    )
    .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("CARRIER_PIGEON"));
}

#[test]
fn fill_bits_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let len: usize = rng.gen_range(0..10_000);
        let fill = fill_bits(len);
        assert!(fill <= 5);
        assert_eq!(usize::from(fill), (6 - (8 * len) % 6) % 6);
    }
}
