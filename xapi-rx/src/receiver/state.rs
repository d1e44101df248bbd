//! 帧重组状态机
//!
//! 状态转移写成纯函数 `(上下文, 字节) -> (新上下文, 输出)`，
//! 持有状态的 [`FrameDecoder`](super::FrameDecoder) 只是在其外层保存上下文。
//!
//! 状态序列：`Idle -> LengthHigh -> LengthLow -> Body -> Checksum -> Idle`

use bytes::BytesMut;
use xapi_core::{
    utils::bytes_to_hex, ApiMode, ByteEvent, DecodedFrame, Timestamp, DELIMITER, ESCAPE,
    ESCAPE_XOR,
};

use crate::interpreter::interpret_frame;

/// 长度高字节的乘数
///
/// 现有抓包工具对长度高字节乘以10而不是256。长度小于256的帧两种算法结果一致，
/// 更长的帧会被截短解析。
pub const LENGTH_HIGH_MULTIPLIER: u16 = 10;

/// 解析阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecoderState {
    /// 等待定界符
    #[default]
    Idle,
    /// 等待长度高字节
    LengthHigh,
    /// 等待长度低字节
    LengthLow,
    /// 接收帧体
    Body,
    /// 等待校验字节
    Checksum,
}

/// 跨字节事件保存的解码上下文
///
/// 长度解析完成后 `body.len() + remaining` 恒等于声明的帧长度。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderContext {
    pub state: DecoderState,
    /// 模式2下已收到转义标记，下一个字节需要异或还原
    pub escape_pending: bool,
    /// 长度解析中为累计长度，进入帧体后为剩余字节数
    pub remaining: u16,
    /// 校验和累加器，完成时截取低8位
    pub checksum: u32,
    pub body: BytesMut,
    /// 定界符的起始时间
    pub start_time: Timestamp,
}

impl DecoderContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 单个字节的处理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// 校验阶段完成时输出的帧
    pub frame: Option<DecodedFrame>,
    /// 帧中途收到定界符，强制回到Idle
    pub resynced: bool,
    /// 该字节是转义标记，被暂存而未进入状态机
    pub escape_held: bool,
}

/// 处理一个字节事件
///
/// 模式2下先做反转义：待转义时异或0x20；收到0x7D时只置位标志；
/// 收到未转义的0x7E时强制回到Idle，再以同一字节进入状态分派。
pub fn transition(
    mut ctx: DecoderContext,
    event: &ByteEvent,
    mode: ApiMode,
) -> (DecoderContext, Step) {
    let mut byte = event.value;
    let mut step = Step::default();

    if mode.is_escaped() {
        if ctx.escape_pending {
            byte ^= ESCAPE_XOR;
            ctx.escape_pending = false;
        } else if byte == ESCAPE {
            ctx.escape_pending = true;
            step.escape_held = true;
            return (ctx, step);
        } else if byte == DELIMITER {
            if ctx.state != DecoderState::Idle {
                log::debug!(
                    "Delimiter in state {:?} at t={}, resynchronizing ({} body bytes dropped)",
                    ctx.state,
                    event.start_time,
                    ctx.body.len()
                );
                step.resynced = true;
            }
            ctx.state = DecoderState::Idle;
        }
    }

    match ctx.state {
        DecoderState::Idle => {
            if byte == DELIMITER {
                ctx.checksum = 0;
                ctx.start_time = event.start_time;
                ctx.state = DecoderState::LengthHigh;
            }
        }
        DecoderState::LengthHigh => {
            ctx.remaining = u16::from(byte) * LENGTH_HIGH_MULTIPLIER;
            ctx.state = DecoderState::LengthLow;
        }
        DecoderState::LengthLow => {
            ctx.remaining += u16::from(byte);
            ctx.body = BytesMut::with_capacity(ctx.remaining as usize);
            log::trace!("Frame length {} at t={}", ctx.remaining, ctx.start_time);
            // 长度为0时没有帧体，直接等待校验字节
            ctx.state = if ctx.remaining == 0 {
                DecoderState::Checksum
            } else {
                DecoderState::Body
            };
        }
        DecoderState::Body => {
            ctx.body.extend_from_slice(&[byte]);
            ctx.checksum += u32::from(byte);
            ctx.remaining -= 1;
            if ctx.remaining == 0 {
                ctx.state = DecoderState::Checksum;
            }
        }
        DecoderState::Checksum => {
            ctx.checksum += u32::from(byte);
            ctx.checksum &= 0xFF;
            let checksum = ctx.checksum as u8;
            let body = std::mem::take(&mut ctx.body).to_vec();
            let interpretation = interpret_frame(&body, checksum);
            log::debug!(
                "Frame [{}..{}] {}: {}",
                ctx.start_time,
                event.end_time,
                interpretation.frame_type,
                bytes_to_hex(&body)
            );
            step.frame = Some(interpretation.into_frame(ctx.start_time, event.end_time, checksum, body));
            ctx.state = DecoderState::Idle;
        }
    }

    (ctx, step)
}
