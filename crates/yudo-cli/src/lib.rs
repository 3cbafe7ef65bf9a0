//! yudo CLI library.
//!
//! This crate provides the command implementations behind the `yudo`
//! binary, plus the pieces they share: the configuration store, the
//! area-code dataset, ID-number checksums, byte encoders and the
//! confirmation gate shown before large outputs.

pub mod adcode;
pub mod binary;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod idcard;
pub mod range_args;
