//! Reads log15-compatible JSON log events off a byte stream and renders them
//! as compact, severity-filtered terminal lines.

pub mod cli;
pub mod decode;
pub mod filter;
pub mod format;
pub mod mapping;
pub mod pipeline;
pub mod record;
pub mod sink;
