//! Read-only views: the folder tree and folder listings.

use std::fmt::Write as _;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use crate::output::{self, EntityRow, OutputFormat};
use folderhub_core::AppResult;
use folderhub_core::config::AppConfig;
use folderhub_core::traits::AlwaysConfirm;
use folderhub_core::types::{EntityId, EntityKind};
use folderhub_index::EntityIndex;

/// Arguments for `tree`
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Folder to start from (defaults to the root)
    pub folder: Option<String>,
    /// Max depth below the starting folder
    #[arg(short, long)]
    pub depth: Option<usize>,
}

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder to list (defaults to the root)
    pub folder: Option<String>,
}

/// A subtree, as printed by `tree`.
#[derive(Debug, Serialize)]
pub struct TreeNode {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// Build the subtree below `id`, stopping `depth` levels down.
pub fn build_tree(index: &EntityIndex, id: &EntityId, depth: Option<usize>) -> AppResult<TreeNode> {
    let entity = index.require(id)?;
    let children = if entity.is_folder() && depth != Some(0) {
        index
            .contents(id)?
            .into_iter()
            .map(|child| build_tree(index, &child.id, depth.map(|d| d - 1)))
            .collect::<AppResult<Vec<_>>>()?
    } else {
        Vec::new()
    };

    Ok(TreeNode {
        id: entity.id.clone(),
        name: entity.display_name.clone(),
        kind: entity.kind(),
        children,
    })
}

/// Render a subtree as indented lines; folders end in `/`.
pub fn render_tree(node: &TreeNode) -> String {
    let mut out = String::new();
    render_into(node, 0, &mut out);
    out
}

fn render_into(node: &TreeNode, level: usize, out: &mut String) {
    let suffix = if node.kind == EntityKind::Folder { "/" } else { "" };
    let _ = writeln!(
        out,
        "{:indent$}{}{suffix}  [{}]",
        "",
        node.name,
        node.id,
        indent = level * 2
    );
    for child in &node.children {
        render_into(child, level + 1, out);
    }
}

/// Breadcrumb of `id`: folder names from the top level down to `id`.
pub fn breadcrumb(index: &EntityIndex, id: &EntityId) -> AppResult<String> {
    if id.is_root() {
        return Ok("/".to_string());
    }
    let mut names: Vec<&str> = index
        .ancestors(id)?
        .into_iter()
        .map(|e| e.display_name.as_str())
        .collect();
    names.reverse();
    names.push(index.require(id)?.display_name.as_str());
    Ok(format!("/{}", names.join("/")))
}

/// Execute `tree`
pub async fn execute_tree(args: &TreeArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let engine = super::connect(config, Arc::new(AlwaysConfirm)).await?;
    let start = super::folder_arg(args.folder.as_deref()).unwrap_or_else(EntityId::root);

    let store = engine.store();
    let index = store.read().await;
    let tree = build_tree(&index, &start, args.depth)?;

    match format {
        OutputFormat::Table => print!("{}", render_tree(&tree)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
    }
    Ok(())
}

/// Execute `ls`
pub async fn execute_ls(args: &LsArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let engine = super::connect(config, Arc::new(AlwaysConfirm)).await?;
    let folder = super::folder_arg(args.folder.as_deref()).unwrap_or_else(EntityId::root);

    let store = engine.store();
    let index = store.read().await;
    index.require_folder(&folder)?;
    let rows: Vec<EntityRow> = index
        .contents(&folder)?
        .into_iter()
        .map(EntityRow::from)
        .collect();

    if format == OutputFormat::Table {
        output::print_kv("Path", &breadcrumb(&index, &folder)?);
    }
    output::print_list(&rows, format);
    Ok(())
}
