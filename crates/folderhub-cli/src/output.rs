//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use folderhub_entity::Entity;
use folderhub_service::MutationOutcome;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// One entity as a table row.
#[derive(Debug, Serialize, Tabled)]
pub struct EntityRow {
    /// Namespaced id
    id: String,
    /// Folder or image
    kind: String,
    /// Display name
    name: String,
    /// Preview reference, images only
    url: String,
}

impl From<&Entity> for EntityRow {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.to_string(),
            kind: entity.kind().to_string(),
            name: entity.display_name.clone(),
            url: entity.resource_url().unwrap_or_default().to_string(),
        }
    }
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Report what a mutation did.
pub fn print_outcome(outcome: &MutationOutcome, action: &str, format: OutputFormat) {
    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&outcome.entity())
            .unwrap_or_else(|_| "null".to_string());
        println!("{json}");
        return;
    }

    match outcome {
        MutationOutcome::Applied(entity) => {
            print_success(&format!("{action} '{}' ({})", entity.display_name, entity.id));
        }
        MutationOutcome::Unchanged => print_warning("Nothing to do"),
        MutationOutcome::Conflict(resolution) => {
            print_warning(
                resolution
                    .message
                    .as_deref()
                    .unwrap_or("The name was already taken"),
            );
            print_kv("Stored as", &resolution.entity.display_name);
            print_kv("Id", resolution.entity.id.as_str());
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}
