//! sqltosh - SQL-flavored interactive shell for browsing the filesystem
//!
//! This crate provides:
//! - A tokenizer and dispatcher for `select`/`insert`/`update`/`delete`
//! - Column resolution against a fixed directory-listing schema
//! - Directory enumeration with per-entry stat metadata
//! - MySQL-style diagnostics and box-drawn result tables

#[cfg(not(unix))]
compile_error!("sqltosh supports Linux and macOS only");

pub mod catalog;
pub mod error;
pub mod format;
pub mod lexer;
pub mod metadata;
pub mod render;
pub mod resolver;
pub mod shell;
pub mod sort;

pub use catalog::{Catalog, Column, Command, Statement};
pub use error::{SqlError, SqlResult};
pub use lexer::{parse, StatementBuffer};
pub use metadata::{EntryType, FileRecord};
pub use render::RenderSettings;
pub use shell::{Flow, Output, Shell};
