//! # taskdesk
//!
//! A command-line client for a remote task service: list, filter, create and
//! complete tasks, and ask free-form questions the backend answers from task
//! data.
//!
//! ## Features
//!
//! - **Filtered views**: status, due window, free-text search and category
//! - **Session cache**: one in-flight request per view, lazy invalidation
//! - **Settle-time invalidation**: lists change only after the server confirms
//!   a mutation
//! - **Voice notes**: create tasks from recorded audio
//! - **Questions**: ask about your tasks and see the related ones
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::commands::Cli;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
