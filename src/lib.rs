// Allow some clippy lints project-wide for code style consistency
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod paginator;

pub use paginator::{PageLink, PageOptions, PageSummary, Paginator, RequestedPage, parse_page};
