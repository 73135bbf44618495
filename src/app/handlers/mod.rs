// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by functional domain. Each returns the follow-up
//! [`Task`](crate::app::Task) for the runtime to execute.

pub mod camera;
pub mod location;
pub mod navigation;
