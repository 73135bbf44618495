// SPDX-License-Identifier: GPL-3.0-only

//! camloc - camera and location access with a permission-gated screen controller
//!
//! A single screen selector (`Home`, `Camera`, `Location`) that requests
//! camera and location permissions, captures a photo or a one-shot position
//! fix, and shows the result.
//!
//! # Architecture
//!
//! - [`app`]: screen controller (state machine, messages, tasks, view)
//! - [`backends`]: camera and location providers, permission prompts
//! - [`terminal`]: terminal display surface
//! - [`config`]: user configuration
//! - [`storage`]: photo directory and file URIs
//!
//! # Example
//!
//! ```no_run
//! use camloc::app::{AppModel, AppRuntime, Message};
//! use camloc::backends::PermissionPrompter;
//! use camloc::Config;
//!
//! # async fn demo() {
//! let model = AppModel::from_config(&Config::default(), PermissionPrompter::disconnected());
//! let mut app = AppRuntime::new(model);
//! app.dispatch(Message::AccessLocation);
//! app.settle().await;
//! println!("{:?}", app.model().location());
//! # }
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{AppModel, AppRuntime, Message, Screen};
pub use config::Config;
pub use errors::{AppError, AppResult};
