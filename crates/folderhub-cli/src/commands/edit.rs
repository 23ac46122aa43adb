//! Mutating commands: mkdir, mv, rename, rm.

use std::sync::Arc;

use clap::Args;

use super::prompt::TerminalPrompt;
use crate::output::{self, OutputFormat};
use folderhub_core::AppResult;
use folderhub_core::config::AppConfig;
use folderhub_core::error::ErrorKind;
use folderhub_core::traits::{AlwaysConfirm, Confirmation};
use folderhub_core::types::EntityId;

/// Arguments for `mkdir`
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,
    /// Parent folder id (omit for top level)
    #[arg(short, long)]
    pub parent: Option<String>,
}

/// Arguments for `mv`
#[derive(Debug, Args)]
pub struct MvArgs {
    /// Id of the folder or image to move
    pub source: String,
    /// Destination folder id (omit to move to top level)
    pub target: Option<String>,
}

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Id of the folder or image
    pub id: String,
    /// New name
    pub name: String,
}

/// Arguments for `rm`
#[derive(Debug, Args)]
pub struct RmArgs {
    /// Id of the folder or image
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute `mkdir`
pub async fn execute_mkdir(args: &MkdirArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let engine = super::connect(config, Arc::new(AlwaysConfirm)).await?;
    let parent = super::folder_arg(args.parent.as_deref());

    let outcome = engine.create_folder(parent.as_ref(), &args.name).await?;
    output::print_outcome(&outcome, "Created folder", format);
    Ok(())
}

/// Execute `mv`
pub async fn execute_mv(args: &MvArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let engine = super::connect(config, Arc::new(AlwaysConfirm)).await?;
    let target = super::folder_arg(args.target.as_deref());

    let outcome = engine
        .move_entity(&EntityId::from(args.source.as_str()), target.as_ref())
        .await?;
    output::print_outcome(&outcome, "Moved", format);
    Ok(())
}

/// Execute `rename`
pub async fn execute_rename(
    args: &RenameArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let engine = super::connect(config, Arc::new(AlwaysConfirm)).await?;

    let outcome = engine
        .rename(&EntityId::from(args.id.as_str()), &args.name)
        .await?;
    output::print_outcome(&outcome, "Renamed to", format);
    Ok(())
}

/// Execute `rm`
pub async fn execute_rm(args: &RmArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let confirmation: Arc<dyn Confirmation> = if args.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(TerminalPrompt)
    };
    let engine = super::connect(config, confirmation).await?;

    match engine.delete(&EntityId::from(args.id.as_str())).await {
        Ok(outcome) => {
            output::print_outcome(&outcome, "Deleted", format);
            Ok(())
        }
        Err(e) if e.kind == ErrorKind::Declined => {
            println!("Cancelled.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
