//! CLI command definitions and dispatch.

pub mod edit;
pub mod prompt;
pub mod search;
pub mod tree;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use folderhub_core::AppResult;
use folderhub_core::config::AppConfig;
use folderhub_core::traits::Confirmation;
use folderhub_core::types::EntityId;
use folderhub_remote::HttpBackend;
use folderhub_service::MutationEngine;

/// FolderHub: browse and edit an image folder library
#[derive(Debug, Parser)]
#[command(name = "folderhub", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment, selects `config/<env>.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Backend base URL, overriding the configured one
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the folder tree
    Tree(tree::TreeArgs),
    /// List the contents of a folder
    Ls(tree::LsArgs),
    /// Create a folder
    Mkdir(edit::MkdirArgs),
    /// Move a folder or image
    Mv(edit::MvArgs),
    /// Rename a folder or image
    Rename(edit::RenameArgs),
    /// Delete a folder or image
    Rm(edit::RmArgs),
    /// Upload images into a folder
    Upload(upload::UploadArgs),
    /// Search images
    Search(search::SearchArgs),
}

impl Cli {
    /// Load configuration for the selected environment and apply flag
    /// overrides.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        let mut config = AppConfig::load(&self.env)?;
        if let Some(base_url) = &self.base_url {
            config.remote.base_url = base_url.clone();
        }
        Ok(config)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Tree(args) => tree::execute_tree(args, config, self.format).await,
            Commands::Ls(args) => tree::execute_ls(args, config, self.format).await,
            Commands::Mkdir(args) => edit::execute_mkdir(args, config, self.format).await,
            Commands::Mv(args) => edit::execute_mv(args, config, self.format).await,
            Commands::Rename(args) => edit::execute_rename(args, config, self.format).await,
            Commands::Rm(args) => edit::execute_rm(args, config, self.format).await,
            Commands::Upload(args) => upload::execute(args, config, self.format).await,
            Commands::Search(args) => search::execute(args, config, self.format).await,
        }
    }
}

/// Helper: connect to the backend and load the tree.
pub async fn connect(
    config: &AppConfig,
    confirmation: Arc<dyn Confirmation>,
) -> AppResult<MutationEngine> {
    let backend = HttpBackend::new(&config.remote)?;
    let engine = MutationEngine::new(Arc::new(backend), confirmation);
    let count = engine.reload().await?;
    tracing::debug!(entities = count, "Tree loaded");
    Ok(engine)
}

/// Helper: parse an optional folder argument; absent means the root.
pub fn folder_arg(folder: Option<&str>) -> Option<EntityId> {
    folder
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(EntityId::from)
}
