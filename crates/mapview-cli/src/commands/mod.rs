//! Command implementations.
//!
//! Each command module provides an `execute` function taking its parsed
//! arguments.

pub mod decode;
pub mod demo;
pub mod encode;
pub mod serve;

pub use decode::execute as decode_execute;
pub use demo::execute as demo_execute;
pub use encode::execute as encode_execute;
pub use serve::execute as serve_execute;
