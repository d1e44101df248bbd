//! 接收模块
//!
//! 提供逐字节的API帧重组状态机及其持有状态的包装

pub mod decoder;
pub mod state;

pub use decoder::{DecoderStats, FrameDecoder, Frames};
pub use state::{transition, DecoderContext, DecoderState, Step, LENGTH_HIGH_MULTIPLIER};
