//! XAPI Core Library
//!
//! This crate provides the shared data model for decoding XBee-style API
//! frames: byte events, decoded frame records, the static frame-type and
//! AT-command tables, decoder configuration and the protocol error type.

pub mod config;
pub mod error;
pub mod frame_meta;
pub mod utils;

// 导出错误类型
pub use error::ProtocolError;

// 导出配置与帧元数据类型，便于其他模块使用
pub use config::{ApiMode, DecoderConfig};
pub use frame_meta::*;

/// 字节流解码器接口 - 上游逐字节输入，完成一帧时输出
pub trait StreamDecoder {
    /// 解码输出类型
    type Output;

    /// 处理一个字节事件，返回零个或一个输出
    fn decode(&mut self, event: &ByteEvent) -> Option<Self::Output>;

    /// 丢弃所有进行中的状态
    fn reset(&mut self);

    /// 解码器名称
    fn name(&self) -> &'static str;
}
