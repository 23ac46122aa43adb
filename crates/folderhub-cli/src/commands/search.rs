//! Image search.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use folderhub_core::AppResult;
use folderhub_core::config::AppConfig;
use folderhub_core::traits::AlwaysConfirm;
use folderhub_core::types::{EntityId, EntityKind, FileSummary};

/// Arguments for `search`
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query
    pub query: String,
    /// Restrict the search to one folder
    #[arg(short, long)]
    pub folder: Option<String>,
}

/// Search hit display row
#[derive(Debug, Serialize, Tabled)]
struct SearchRow {
    /// Namespaced id
    id: String,
    /// Title
    title: String,
    /// Preview reference
    url: String,
}

impl From<FileSummary> for SearchRow {
    fn from(hit: FileSummary) -> Self {
        Self {
            id: EntityId::tag(&hit.id, EntityKind::File).to_string(),
            title: hit.title,
            url: hit.url.unwrap_or_default(),
        }
    }
}

/// Execute `search`
pub async fn execute(args: &SearchArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let engine = super::connect(config, Arc::new(AlwaysConfirm)).await?;
    let folder = super::folder_arg(args.folder.as_deref());

    let hits = engine.search(&args.query, folder.as_ref()).await?;
    let rows: Vec<SearchRow> = hits.into_iter().map(SearchRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
