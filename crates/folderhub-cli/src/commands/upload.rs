//! Image upload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use clap::Args;

use crate::output::{self, EntityRow, OutputFormat};
use folderhub_core::AppResult;
use folderhub_core::config::AppConfig;
use folderhub_core::error::{AppError, ErrorKind};
use folderhub_core::traits::AlwaysConfirm;
use folderhub_core::types::UploadBlob;

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Image files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Destination folder id (omit for top level)
    #[arg(short, long)]
    pub folder: Option<String>,
}

/// Read every file into an upload blob titled after its file stem.
pub async fn read_blobs(paths: &[PathBuf]) -> AppResult<Vec<UploadBlob>> {
    let mut blobs = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to read {}", path.display()),
                e,
            )
        })?;
        blobs.push(UploadBlob::new(file_name(path)?, Bytes::from(content)));
    }
    Ok(blobs)
}

fn file_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::validation(format!("{} is not a file", path.display())))
}

/// Execute `upload`
pub async fn execute(args: &UploadArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let blobs = read_blobs(&args.files).await?;
    let engine = super::connect(config, Arc::new(AlwaysConfirm)).await?;
    let folder = super::folder_arg(args.folder.as_deref());

    let created = engine.upload_files(folder.as_ref(), &blobs).await?;
    if format == OutputFormat::Table {
        output::print_success(&format!("Uploaded {} of {} files", created.len(), blobs.len()));
    }
    let rows: Vec<EntityRow> = created.iter().map(EntityRow::from).collect();
    output::print_list(&rows, format);
    Ok(())
}
