// SPDX-License-Identifier: GPL-3.0-only

//! Message loop
//!
//! [`AppRuntime`] owns the controller, spawns the futures of every task
//! `update` returns and feeds their results back in, one message at a time.
//! The controller is only ever touched from the caller's thread.
//!
//! Must be created inside a tokio runtime context.

use crate::app::state::{AppModel, Message};
use tokio::sync::mpsc;
use tracing::trace;

pub struct AppRuntime {
    model: AppModel,
    sender: mpsc::UnboundedSender<Option<Message>>,
    receiver: mpsc::UnboundedReceiver<Option<Message>>,
    in_flight: usize,
}

impl AppRuntime {
    pub fn new(model: AppModel) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            model,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Number of spawned futures that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply `message` and spawn the resulting work
    pub fn dispatch(&mut self, message: Message) {
        trace!(?message, "Dispatching");
        let task = self.model.update(message);

        for future in task.into_futures() {
            self.in_flight += 1;
            let sender = self.sender.clone();
            tokio::spawn(async move {
                // Always report, even without a message, so in_flight stays exact
                let _ = sender.send(future.await);
            });
        }
    }

    /// Dispatch every completed result without waiting; returns how many
    /// futures finished
    pub fn pump(&mut self) -> usize {
        let mut completed = 0;
        while let Ok(result) = self.receiver.try_recv() {
            completed += 1;
            self.complete(result);
        }
        completed
    }

    /// Wait for the next future to finish and dispatch its result
    ///
    /// Returns `false` when nothing is in flight.
    pub async fn step(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.receiver.recv().await {
            Some(result) => {
                self.complete(result);
                true
            }
            None => false,
        }
    }

    /// Run until no work is left in flight
    ///
    /// Does not return while a provider call is suspended indefinitely.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    fn complete(&mut self, result: Option<Message>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Some(message) = result {
            self.dispatch(message);
        }
    }
}
