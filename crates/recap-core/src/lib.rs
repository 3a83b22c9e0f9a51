//! # recap-core
//!
//! The caption-bot core: per-chat session state machine, debounce
//! scheduler, caption transformation pipeline, global replacement
//! registry, and output batcher, driven by a single engine event loop.
//!
//! The messaging platform sits behind the [`gateway::Gateway`] trait;
//! nothing in this crate knows about wire formats.

pub mod batch;
pub mod caption;
pub mod command;
pub mod engine;
pub mod gateway;
pub mod replace;
pub mod session;

pub use engine::{spawn, EngineConfig, EngineHandle, Event, IncomingMedia};
pub use gateway::{Gateway, GatewayError};
