//! 帧解码器
//!
//! 持有解码上下文、配置和统计，对外提供逐字节解码与惰性帧序列

use serde::Serialize;
use xapi_core::{ByteEvent, DecodedFrame, DecoderConfig, FrameType, StreamDecoder};

use super::state::{transition, DecoderContext, DecoderState};

/// 解码统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecoderStats {
    /// 已处理的字节数（含转义标记）
    pub bytes_consumed: u64,
    /// 已输出的帧数
    pub frames_decoded: u64,
    /// 校验失败的帧数
    pub checksum_failures: u64,
    /// 帧中途收到定界符导致的重同步次数
    pub resyncs: u64,
    /// 模式2下暂存的转义标记数
    pub escapes: u64,
    /// 未知帧类型的帧数
    pub unknown_frame_types: u64,
}

/// API帧解码器
///
/// 每个字节流使用一个实例；实例之间不共享任何状态。
#[derive(Debug, Clone, Default)]
pub struct FrameDecoder {
    config: DecoderConfig,
    context: DecoderContext,
    stats: DecoderStats,
}

impl FrameDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            context: DecoderContext::new(),
            stats: DecoderStats::default(),
        }
    }

    /// 处理一个字节事件，完成一帧时返回该帧
    pub fn decode(&mut self, event: &ByteEvent) -> Option<DecodedFrame> {
        let context = std::mem::take(&mut self.context);
        let (context, step) = transition(context, event, self.config.api_mode);
        self.context = context;

        self.stats.bytes_consumed += 1;
        if step.resynced {
            self.stats.resyncs += 1;
        }
        if step.escape_held {
            self.stats.escapes += 1;
        }

        let frame = step.frame?;
        self.stats.frames_decoded += 1;
        if !frame.checksum_ok() {
            self.stats.checksum_failures += 1;
        }
        if frame.frame_type_code.and_then(FrameType::from_code).is_none() {
            self.stats.unknown_frame_types += 1;
        }
        Some(frame)
    }

    /// 批量解码，返回所有完成的帧
    pub fn decode_all(&mut self, events: &[ByteEvent]) -> Vec<DecodedFrame> {
        self.frames(events.iter().copied()).collect()
    }

    /// 将字节事件序列包装为惰性的帧序列
    pub fn frames<I>(&mut self, events: I) -> Frames<'_, I::IntoIter>
    where
        I: IntoIterator<Item = ByteEvent>,
    {
        Frames {
            decoder: self,
            events: events.into_iter(),
        }
    }

    /// 丢弃进行中的帧并清零统计
    pub fn reset(&mut self) {
        self.context = DecoderContext::new();
        self.stats = DecoderStats::default();
    }

    pub fn state(&self) -> DecoderState {
        self.context.state
    }

    /// 是否处于帧中途或持有未完成的转义
    pub fn is_mid_frame(&self) -> bool {
        self.context.state != DecoderState::Idle || self.context.escape_pending
    }

    pub fn context(&self) -> &DecoderContext {
        &self.context
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }
}

impl StreamDecoder for FrameDecoder {
    type Output = DecodedFrame;

    fn decode(&mut self, event: &ByteEvent) -> Option<DecodedFrame> {
        FrameDecoder::decode(self, event)
    }

    fn reset(&mut self) {
        FrameDecoder::reset(self);
    }

    fn name(&self) -> &'static str {
        "XBee API"
    }
}

/// 惰性帧序列，按需从底层字节事件中拉取
pub struct Frames<'a, I> {
    decoder: &'a mut FrameDecoder,
    events: I,
}

impl<I> Iterator for Frames<'_, I>
where
    I: Iterator<Item = ByteEvent>,
{
    type Item = DecodedFrame;

    fn next(&mut self) -> Option<Self::Item> {
        for event in self.events.by_ref() {
            if let Some(frame) = self.decoder.decode(&event) {
                return Some(frame);
            }
        }
        None
    }
}
