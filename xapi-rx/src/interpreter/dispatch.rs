//! 帧类型分派表

use xapi_core::FrameType;

use super::handlers;
use super::Summary;

/// 帧类型处理函数：输入完整帧体（首字节为帧类型码）
pub type InterpretFn = fn(&[u8]) -> Summary;

/// 分派表项
pub struct FrameHandler {
    pub frame_type: FrameType,
    pub interpret: InterpretFn,
}

/// 帧类型码到处理函数的静态分派表
pub static DISPATCH_TABLE: &[FrameHandler] = &[
    FrameHandler {
        frame_type: FrameType::LocalAtCommandRequest,
        interpret: handlers::at_command_request,
    },
    FrameHandler {
        frame_type: FrameType::TransmitRequest,
        interpret: handlers::transmit_request,
    },
    FrameHandler {
        frame_type: FrameType::LocalAtCommandResponse,
        interpret: handlers::at_command_response,
    },
    FrameHandler {
        frame_type: FrameType::ModemStatus,
        interpret: handlers::modem_status,
    },
    FrameHandler {
        frame_type: FrameType::ReceivePacket,
        interpret: handlers::receive_packet,
    },
];

pub fn lookup_handler(code: u8) -> Option<&'static FrameHandler> {
    DISPATCH_TABLE
        .iter()
        .find(|handler| handler.frame_type.code() == code)
}
