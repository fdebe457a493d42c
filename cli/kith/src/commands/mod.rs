//! CLI command implementations.

pub mod check;
pub mod demo;
pub mod encode;
pub mod init;
pub mod inspect;
