//! CLI command implementations

pub mod adc;
pub mod bit;
pub mod chars;
pub mod conf;
pub mod gend;
pub mod gendt;
pub mod idc;
pub mod product;
pub mod url;
