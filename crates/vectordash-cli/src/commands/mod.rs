//! CLI command implementations.

pub mod chunk;
pub mod compare;
pub mod history;
pub mod init;
pub mod search;
pub mod templates;
