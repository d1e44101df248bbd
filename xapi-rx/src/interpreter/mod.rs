//! 帧解释模块
//!
//! 每完成一帧调用一次：按帧类型码查分派表，把帧体映射为可读的描述

pub mod dispatch;
pub mod handlers;

pub use dispatch::{lookup_handler, FrameHandler, InterpretFn, DISPATCH_TABLE};

use xapi_core::{DecodedFrame, Timestamp, CHECKSUM_FAILURE_MARKER, CHECKSUM_VALID};

/// 帧体短于帧类型固定头部时追加的标记
pub const TRUNCATED_MARKER: &str = ", truncated frame";
/// 帧体为空时的帧类型名称
pub const EMPTY_FRAME_NAME: &str = "Empty frame";

/// 帧类型处理函数的输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub payload: Option<String>,
    /// 帧体缺少该帧类型要求的字段
    pub truncated: bool,
}

impl Summary {
    pub fn text(text: String) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    pub fn truncated(text: String) -> Self {
        Self {
            text,
            payload: None,
            truncated: true,
        }
    }
}

/// 一帧的解释结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub frame_type: String,
    pub frame_type_code: Option<u8>,
    pub summary: String,
    pub payload: Option<String>,
}

impl Interpretation {
    pub fn into_frame(
        self,
        start_time: Timestamp,
        end_time: Timestamp,
        checksum: u8,
        body: Vec<u8>,
    ) -> DecodedFrame {
        DecodedFrame {
            start_time,
            end_time,
            frame_type: self.frame_type,
            frame_type_code: self.frame_type_code,
            summary: self.summary,
            payload: self.payload,
            checksum,
            body,
        }
    }
}

/// 解释一个完整帧体
///
/// 未知帧类型和校验失败都不会丢弃帧，而是在名称或摘要中标出。
pub fn interpret_frame(body: &[u8], checksum: u8) -> Interpretation {
    let (frame_type, frame_type_code, mut summary) = match body.first() {
        None => (EMPTY_FRAME_NAME.to_string(), None, Summary::default()),
        Some(&code) => match lookup_handler(code) {
            Some(handler) => (
                handler.frame_type.name().to_string(),
                Some(code),
                (handler.interpret)(body),
            ),
            None => {
                log::debug!("Unknown frame type {:#x}", code);
                (
                    format!("Unknown frame type {:#x}", code),
                    Some(code),
                    Summary::default(),
                )
            }
        },
    };

    if summary.truncated {
        log::warn!(
            "{} body too short ({} bytes)",
            frame_type,
            body.len()
        );
        summary.text.push_str(TRUNCATED_MARKER);
    }

    if checksum != CHECKSUM_VALID {
        log::warn!("{} checksum mismatch: sum is {:#04x}", frame_type, checksum);
        summary.text.push_str(CHECKSUM_FAILURE_MARKER);
    }

    Interpretation {
        frame_type,
        frame_type_code,
        summary: summary.text,
        payload: summary.payload,
    }
}
