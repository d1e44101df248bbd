//! 帧元数据模块
//!
//! 定义字节事件、解码结果以及API帧的固定常量

use serde::{Deserialize, Serialize};

pub mod at_command;
pub mod frame_type;

pub use at_command::{at_command_description, AT_COMMANDS};
pub use frame_type::FrameType;

/// 帧起始定界符
pub const DELIMITER: u8 = 0x7E;
/// 模式2转义标记
pub const ESCAPE: u8 = 0x7D;
/// 模式2转义异或掩码
pub const ESCAPE_XOR: u8 = 0x20;
/// 模式2中除定界符与转义标记外还需要转义的字节（XON/XOFF）
pub const XON: u8 = 0x11;
pub const XOFF: u8 = 0x13;

/// 帧体字节与校验字节的8位和应等于此值
pub const CHECKSUM_VALID: u8 = 0xFF;
/// 帧类型未定义独立载荷时的占位符
pub const PAYLOAD_PLACEHOLDER: &str = "-";
/// 校验失败时追加到摘要的标记
pub const CHECKSUM_FAILURE_MARKER: &str = ", CRC FAILURE!";

/// 时间标记，由上游解码器提供的单调计数
pub type Timestamp = u64;

/// 字节事件：一个数据字节及其起止时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteEvent {
    pub value: u8,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl ByteEvent {
    pub fn new(value: u8, start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            value,
            start_time,
            end_time,
        }
    }

    /// 按字节序号生成等间隔时间标记，字节i占用 [i*tick, (i+1)*tick)
    pub fn sequence(bytes: &[u8], tick: Timestamp) -> Vec<ByteEvent> {
        bytes
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let start = i as Timestamp * tick;
                ByteEvent::new(value, start, start + tick)
            })
            .collect()
    }
}

/// 解码完成的API帧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFrame {
    /// 定界符的起始时间
    pub start_time: Timestamp,
    /// 校验字节的结束时间
    pub end_time: Timestamp,
    /// 帧类型名称
    pub frame_type: String,
    /// 帧类型码，帧体为空时为None
    pub frame_type_code: Option<u8>,
    /// 格式化摘要
    pub summary: String,
    /// 独立载荷（空格分隔的两位十六进制）
    pub payload: Option<String>,
    /// 帧体字节与校验字节之和的低8位
    pub checksum: u8,
    /// 原始帧体（不含定界符、长度和校验字节）
    pub body: Vec<u8>,
}

impl DecodedFrame {
    pub fn checksum_ok(&self) -> bool {
        self.checksum == CHECKSUM_VALID
    }

    /// 显示标签：帧类型名称与摘要
    pub fn label(&self) -> String {
        format!("{}, {}", self.frame_type, self.summary)
    }

    pub fn payload_or_placeholder(&self) -> &str {
        self.payload.as_deref().unwrap_or(PAYLOAD_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame(checksum: u8, payload: Option<String>) -> DecodedFrame {
        DecodedFrame {
            start_time: 0,
            end_time: 8,
            frame_type: "Modem status".to_string(),
            frame_type_code: Some(0x8A),
            summary: "0x6".to_string(),
            payload,
            checksum,
            body: vec![0x8A, 0x06],
        }
    }

    #[test]
    fn test_label_joins_name_and_summary() {
        let frame = sample_frame(0xFF, None);
        assert_eq!(frame.label(), "Modem status, 0x6");
        assert!(frame.checksum_ok());
    }

    #[test]
    fn test_payload_placeholder() {
        assert_eq!(sample_frame(0xFF, None).payload_or_placeholder(), "-");
        let frame = sample_frame(0x12, Some("01 02 ".to_string()));
        assert_eq!(frame.payload_or_placeholder(), "01 02 ");
        assert!(!frame.checksum_ok());
    }

    #[test]
    fn test_byte_event_sequence() {
        let events = ByteEvent::sequence(&[0x7E, 0x00], 10);
        assert_eq!(events[0], ByteEvent::new(0x7E, 0, 10));
        assert_eq!(events[1], ByteEvent::new(0x00, 10, 20));
    }
}
