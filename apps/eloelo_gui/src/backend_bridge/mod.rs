//! Backend worker: owns the tokio runtime, the command transport and the ui stream.

pub mod commands;
pub mod latest;
pub mod runtime;
