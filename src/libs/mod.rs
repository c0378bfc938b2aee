//! Core library modules for taskdesk.
//!
//! ## Layers
//!
//! - **Data model**: [`task`], [`filter`], [`audio`]
//! - **Synchronization core**: [`cache`] (keyed task lists), [`mutation`]
//!   (create/complete with invalidation), [`ask`] (stateless questions)
//! - **Session**: [`board`] wires the core together for one user session
//! - **Infrastructure**: [`config`], [`data_storage`], [`messages`], [`view`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::api::TasksApi;
//! use taskdesk::libs::{board::Board, config::Config, filter::{Status, TaskFilter}};
//! use std::rc::Rc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = TasksApi::new(&Config::resolve(None)?)?;
//! let mut board = Board::new(Rc::new(api), TaskFilter::new().with_status(Some(Status::Todo)));
//! let tasks = board.tasks().await?;
//! # Ok(())
//! # }
//! ```

pub mod ask;
pub mod audio;
pub mod board;
pub mod cache;
pub mod config;
pub mod data_storage;
pub mod filter;
pub mod messages;
pub mod mutation;
pub mod task;
pub mod view;
