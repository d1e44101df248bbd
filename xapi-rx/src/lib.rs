//! XAPI Receiver
//!
//! This crate turns a stream of byte events into decoded XBee API frames:
//! the frame reassembly state machine, the frame-type interpreter and a
//! frame generator for building test traffic.

pub mod interpreter;
pub mod receiver;
pub mod traffic_generator;

pub use interpreter::{interpret_frame, FrameHandler, Interpretation, DISPATCH_TABLE};
pub use receiver::{transition, DecoderContext, DecoderState, DecoderStats, FrameDecoder, Frames, Step};
pub use traffic_generator::{FrameBuilder, TrafficGenerator};
