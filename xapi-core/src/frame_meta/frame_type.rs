//! API帧类型定义

use serde::{Deserialize, Serialize};

/// 接收包（0x90）固定头部长度，载荷从此偏移开始
pub const RECEIVE_PACKET_HEADER_LEN: usize = 12;
/// 接收包中接收选项字节的偏移
pub const RECEIVE_OPTIONS_OFFSET: usize = 11;
/// 发送请求（0x10）固定头部长度，载荷从此偏移开始
pub const TRANSMIT_REQUEST_HEADER_LEN: usize = 14;
/// 发送请求中发送选项字节的偏移
pub const TRANSMIT_OPTIONS_OFFSET: usize = 13;

/// 已知的API帧类型
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    LocalAtCommandRequest = 0x08,
    TransmitRequest = 0x10,
    LocalAtCommandResponse = 0x88,
    ModemStatus = 0x8A,
    ReceivePacket = 0x90,
}

impl FrameType {
    pub const ALL: [FrameType; 5] = [
        FrameType::LocalAtCommandRequest,
        FrameType::TransmitRequest,
        FrameType::LocalAtCommandResponse,
        FrameType::ModemStatus,
        FrameType::ReceivePacket,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    /// 帧类型显示名称
    pub const fn name(self) -> &'static str {
        match self {
            FrameType::LocalAtCommandRequest => "Local AT command request",
            FrameType::TransmitRequest => "Transmit request",
            FrameType::LocalAtCommandResponse => "Local AT command response",
            FrameType::ModemStatus => "Modem status",
            FrameType::ReceivePacket => "Receive packet",
        }
    }
}
