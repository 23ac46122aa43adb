//! User confirmation for destructive operations.

use async_trait::async_trait;

/// Asks the user to confirm an action before any request is sent.
#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Return `true` when the user accepts `prompt`.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Accepts every prompt. Used for non-interactive runs (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

#[async_trait]
impl Confirmation for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
