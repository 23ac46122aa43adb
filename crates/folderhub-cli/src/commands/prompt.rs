//! Interactive delete confirmation.

use async_trait::async_trait;
use tracing::warn;

use folderhub_core::traits::Confirmation;

/// Asks on the terminal, defaulting to "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

#[async_trait]
impl Confirmation for TerminalPrompt {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                warn!(error = %e, "Input error, treating as declined");
                false
            }
            Err(e) => {
                warn!(error = %e, "Prompt task failed, treating as declined");
                false
            }
        }
    }
}
