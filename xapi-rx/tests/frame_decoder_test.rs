//! 帧解码器集成测试
//!
//! 覆盖完整帧、校验失败、重同步、模式2转义、未知帧类型以及实例隔离

use xapi_core::{ApiMode, ByteEvent, DecodedFrame, DecoderConfig, CHECKSUM_FAILURE_MARKER};
use xapi_rx::{DecoderState, FrameDecoder};

const AT_REQUEST_BC: [u8; 8] = [0x7E, 0x00, 0x04, 0x08, 0x01, 0x42, 0x43, 0x71];

fn decode(mode: ApiMode, bytes: &[u8]) -> Vec<DecodedFrame> {
    let mut decoder = FrameDecoder::new(DecoderConfig::new(mode));
    decoder.decode_all(&ByteEvent::sequence(bytes, 1))
}

#[test]
fn test_well_formed_at_request() {
    for mode in [ApiMode::Unescaped, ApiMode::Escaped] {
        let frames = decode(mode, &AT_REQUEST_BC);
        assert_eq!(frames.len(), 1, "mode {mode}");

        let frame = &frames[0];
        assert_eq!(frame.frame_type, "Local AT command request");
        assert!(frame.summary.contains("\"BC\""));
        assert!(frame.summary.contains("(Bytes Transmitted)"));
        assert!(!frame.summary.contains(CHECKSUM_FAILURE_MARKER));
        assert!(frame.checksum_ok());
        assert_eq!(frame.body, vec![0x08, 0x01, 0x42, 0x43]);
        assert_eq!(
            frame.label(),
            "Local AT command request, \"BC\" (Bytes Transmitted) "
        );
        assert_eq!(frame.payload_or_placeholder(), "-");
    }
}

#[test]
fn test_frame_spans_delimiter_to_checksum() {
    let mut stream = vec![0x00, 0x00, 0x00];
    stream.extend_from_slice(&AT_REQUEST_BC);
    let events = ByteEvent::sequence(&stream, 100);

    let frames = FrameDecoder::default().decode_all(&events);
    assert_eq!(frames[0].start_time, 300);
    assert_eq!(frames[0].end_time, 1100);
}

#[test]
fn test_checksum_failure_is_reported_not_dropped() {
    let intact = decode(ApiMode::Unescaped, &AT_REQUEST_BC);
    assert_eq!(intact.len(), 1);
    assert!(intact[0].checksum_ok());
    assert!(!intact[0].summary.contains(CHECKSUM_FAILURE_MARKER));

    let mut corrupted = AT_REQUEST_BC;
    corrupted[7] ^= 0x01;

    let mut decoder = FrameDecoder::default();
    let frames = decoder.decode_all(&ByteEvent::sequence(&corrupted, 1));
    assert_eq!(frames.len(), 1);
    assert!(!frames[0].checksum_ok());
    assert!(frames[0].summary.ends_with(CHECKSUM_FAILURE_MARKER));
    assert_eq!(decoder.stats().checksum_failures, 1);
}

#[test]
fn test_resync_on_stray_delimiter() {
    // 第一帧在帧体中途被新的定界符打断
    let mut stream = vec![0x7E, 0x00, 0x04, 0x08, 0x01];
    stream.extend_from_slice(&AT_REQUEST_BC);

    let mut decoder = FrameDecoder::new(DecoderConfig::new(ApiMode::Escaped));
    let frames = decoder.decode_all(&ByteEvent::sequence(&stream, 1));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].body, vec![0x08, 0x01, 0x42, 0x43]);
    assert!(frames[0].checksum_ok());
    assert_eq!(frames[0].start_time, 5);
    assert_eq!(decoder.stats().resyncs, 1);
    assert_eq!(decoder.state(), DecoderState::Idle);
}

#[test]
fn test_resync_from_length_state() {
    let mut stream = vec![0x7E, 0x00];
    stream.extend_from_slice(&AT_REQUEST_BC);
    let frames = decode(ApiMode::Escaped, &stream);
    assert_eq!(frames.len(), 1);
    assert!(frames[0].checksum_ok());
}

#[test]
fn test_delimiter_is_body_data_in_unescaped_mode() {
    // body = 8A 7E, sum = 0x108 -> 0x08, checksum = 0xF7
    let frames = decode(ApiMode::Unescaped, &[0x7E, 0x00, 0x02, 0x8A, 0x7E, 0xF7]);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].body, vec![0x8A, 0x7E]);
    assert_eq!(frames[0].summary, "0x7e");
}

#[test]
fn test_escaped_delimiter_value_in_body() {
    let frames = decode(ApiMode::Escaped, &[0x7E, 0x00, 0x02, 0x8A, 0x7D, 0x5E, 0xF7]);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].body, vec![0x8A, 0x7E]);
    assert_eq!(frames[0].label(), "Modem status, 0x7e");
    assert!(frames[0].checksum_ok());
}

#[test]
fn test_escaped_checksum_byte() {
    // body = 8A 64, sum = 0xEE, 校验字节0x11需转义为 7D 31
    let frames = decode(ApiMode::Escaped, &[0x7E, 0x00, 0x02, 0x8A, 0x64, 0x7D, 0x31]);
    assert_eq!(frames.len(), 1);
    assert!(frames[0].checksum_ok());
}

#[test]
fn test_dangling_escape_at_end_of_stream() {
    let mut decoder = FrameDecoder::new(DecoderConfig::new(ApiMode::Escaped));
    let frames = decoder.decode_all(&ByteEvent::sequence(&[0x7E, 0x00, 0x02, 0x8A, 0x64, 0x7D], 1));
    assert!(frames.is_empty());
    assert!(decoder.is_mid_frame());
    assert!(decoder.context().escape_pending);
}

#[test]
fn test_unknown_frame_type() {
    // body = 05, checksum = 0xFA
    let frames = decode(ApiMode::Unescaped, &[0x7E, 0x00, 0x01, 0x05, 0xFA]);
    assert_eq!(frames.len(), 1);
    assert!(frames[0].label().contains("0x5"));
    assert_eq!(frames[0].frame_type, "Unknown frame type 0x5");
    assert_eq!(frames[0].payload_or_placeholder(), "-");
    assert!(frames[0].checksum_ok());
}

#[test]
fn test_receive_packet_payload_field() {
    let mut body = vec![0x90, 0x00, 0x13, 0xA2, 0x00, 0x41, 0x52, 0x63, 0x74, 0xFF, 0xFE, 0x01];
    body.extend_from_slice(b"OK");
    let sum = body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));

    let mut stream = vec![0x7E, 0x00, body.len() as u8];
    stream.extend_from_slice(&body);
    stream.push(0xFF - sum);

    let frames = decode(ApiMode::Unescaped, &stream);
    assert_eq!(
        frames[0].label(),
        "Receive packet,  2 bytes payload, receive options 0x01"
    );
    assert_eq!(frames[0].payload_or_placeholder(), "4f 4b ");
}

#[test]
fn test_independent_instances_produce_identical_output() {
    let mut stream = vec![0x11, 0x7E, 0x00, 0x04, 0x08];
    stream.extend_from_slice(&AT_REQUEST_BC);
    stream.extend_from_slice(&[0x7E, 0x00, 0x01, 0x05, 0xFA]);
    stream.extend_from_slice(&[0x7E, 0x00, 0x02, 0x8A]);
    let events = ByteEvent::sequence(&stream, 3);

    for mode in [ApiMode::Unescaped, ApiMode::Escaped] {
        let mut a = FrameDecoder::new(DecoderConfig::new(mode));
        let mut b = FrameDecoder::new(DecoderConfig::new(mode));

        // 交错驱动两个实例，确认没有共享状态
        let mut out_a = Vec::new();
        let mut out_b = Vec::new();
        for event in &events {
            out_a.extend(a.decode(event));
            out_b.extend(b.decode(event));
        }
        assert_eq!(out_a, out_b);
        assert_eq!(a.stats(), b.stats());
    }
}

#[test]
fn test_decoded_frame_serializes_to_json() {
    let frames = decode(ApiMode::Unescaped, &AT_REQUEST_BC);
    let json = serde_json::to_value(&frames[0]).unwrap();
    assert_eq!(json["frame_type"], "Local AT command request");
    assert_eq!(json["checksum"], 0xFF);
    assert_eq!(json["payload"], serde_json::Value::Null);
}
