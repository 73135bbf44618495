// SPDX-License-Identifier: GPL-3.0-only

//! Runtime permissions
//!
//! Providers resolve a permission request according to a [`PermissionPolicy`].
//! With [`PermissionPolicy::Prompt`] the request is forwarded as a
//! [`PermissionPrompt`] to whichever surface owns the receiving end of the
//! [`PermissionPrompter`] channel (terminal dialog, stdin question). The
//! request suspends until that surface answers.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// A platform capability guarded by a runtime permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Camera,
    Location,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Camera => write!(f, "camera"),
            Capability::Location => write!(f, "location"),
        }
    }
}

/// Outcome of the latest request for a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Never requested in this session
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// Answer to a single permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionResponse {
    Granted,
    Denied,
}

impl PermissionResponse {
    pub fn is_granted(self) -> bool {
        self == PermissionResponse::Granted
    }
}

impl From<PermissionResponse> for PermissionStatus {
    fn from(response: PermissionResponse) -> Self {
        match response {
            PermissionResponse::Granted => PermissionStatus::Granted,
            PermissionResponse::Denied => PermissionStatus::Denied,
        }
    }
}

/// How a provider answers permission requests
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PermissionPolicy {
    /// Always grant without asking
    Grant,
    /// Always deny without asking
    Deny,
    /// Ask the user through the active surface
    #[default]
    Prompt,
}

/// A pending question to the user
///
/// Dropping the prompt without answering denies the request.
pub struct PermissionPrompt {
    pub capability: Capability,
    responder: oneshot::Sender<PermissionResponse>,
}

impl fmt::Debug for PermissionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionPrompt")
            .field("capability", &self.capability)
            .field("abandoned", &self.is_abandoned())
            .finish()
    }
}

impl PermissionPrompt {
    /// Question shown to the user
    pub fn message(&self) -> String {
        format!("Allow camloc to access your {}?", self.capability)
    }

    /// Answer the prompt
    pub fn respond(self, response: PermissionResponse) {
        info!(capability = %self.capability, ?response, "Permission prompt answered");
        if self.responder.send(response).is_err() {
            debug!(
                capability = %self.capability,
                "Permission answer arrived after request was dropped"
            );
        }
    }

    /// The requesting flow was cancelled and no longer waits for an answer
    pub fn is_abandoned(&self) -> bool {
        self.responder.is_closed()
    }
}

/// Sending half of the prompt channel, shared by all providers
#[derive(Debug, Clone)]
pub struct PermissionPrompter {
    sender: Option<mpsc::UnboundedSender<PermissionPrompt>>,
}

impl PermissionPrompter {
    /// Create a prompter and the receiver a UI surface listens on
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PermissionPrompt>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// A prompter nobody listens to; every prompt is denied
    pub fn disconnected() -> Self {
        Self { sender: None }
    }

    /// Ask the user and wait for the answer
    pub async fn ask(&self, capability: Capability) -> PermissionResponse {
        let Some(sender) = &self.sender else {
            warn!(%capability, "No surface can show permission prompts, denying");
            return PermissionResponse::Denied;
        };

        let (responder, answer) = oneshot::channel();
        if sender
            .send(PermissionPrompt {
                capability,
                responder,
            })
            .is_err()
        {
            warn!(%capability, "Permission prompt surface is gone, denying");
            return PermissionResponse::Denied;
        }

        debug!(%capability, "Waiting for permission prompt answer");
        answer.await.unwrap_or(PermissionResponse::Denied)
    }

    /// Resolve a request according to `policy`
    pub async fn resolve(
        &self,
        policy: PermissionPolicy,
        capability: Capability,
    ) -> PermissionResponse {
        let response = match policy {
            PermissionPolicy::Grant => PermissionResponse::Granted,
            PermissionPolicy::Deny => PermissionResponse::Denied,
            PermissionPolicy::Prompt => self.ask(capability).await,
        };
        debug!(%capability, ?policy, ?response, "Permission request resolved");
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_policies_never_prompt() {
        let (prompter, mut prompts) = PermissionPrompter::channel();
        assert_eq!(
            prompter
                .resolve(PermissionPolicy::Grant, Capability::Camera)
                .await,
            PermissionResponse::Granted
        );
        assert_eq!(
            prompter
                .resolve(PermissionPolicy::Deny, Capability::Location)
                .await,
            PermissionResponse::Denied
        );
        assert!(prompts.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_prompt_waits_for_answer() {
        let (prompter, mut prompts) = PermissionPrompter::channel();
        let request = tokio::spawn(async move {
            prompter
                .resolve(PermissionPolicy::Prompt, Capability::Location)
                .await
        });

        let prompt = prompts.recv().await.unwrap();
        assert_eq!(prompt.capability, Capability::Location);
        prompt.respond(PermissionResponse::Granted);

        assert_eq!(request.await.unwrap(), PermissionResponse::Granted);
    }

    #[tokio::test]
    async fn test_dropped_prompt_denies() {
        let (prompter, mut prompts) = PermissionPrompter::channel();
        let request = tokio::spawn(async move { prompter.ask(Capability::Camera).await });

        drop(prompts.recv().await.unwrap());

        assert_eq!(request.await.unwrap(), PermissionResponse::Denied);
    }

    #[tokio::test]
    async fn test_disconnected_prompter_denies() {
        let prompter = PermissionPrompter::disconnected();
        assert_eq!(
            prompter.ask(Capability::Camera).await,
            PermissionResponse::Denied
        );
    }
}
