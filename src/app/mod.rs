// SPDX-License-Identifier: GPL-3.0-only

//! Screen controller
//!
//! This module contains the application state, message handling and view
//! rendering. It has no dependency on any particular display surface.
//!
//! # Architecture
//!
//! - `state`: `AppModel`, `Message`, `Screen` and the capture gate
//! - `update`: message dispatcher
//! - `handlers`: navigation, camera and location handlers
//! - `task`: deferred async work returned from `update`
//! - `runtime`: executes tasks and feeds their results back
//! - `view`: surface-independent rendering of the current screen
//!
//! # Flow
//!
//! ```text
//! key press ─► Message ─► AppModel::update ─► Task ─► AppRuntime (tokio)
//!                 ▲                                        │
//!                 └──────────── result message ◄───────────┘
//! ```

mod handlers;
pub mod runtime;
mod state;
pub mod task;
mod update;
pub mod view;

pub use runtime::AppRuntime;
pub use state::{
    AppModel, CameraGate, Diagnostic, FlowGuard, LocationRequest, Message, Screen,
};
pub use task::Task;
pub use view::{View, ViewAction};
