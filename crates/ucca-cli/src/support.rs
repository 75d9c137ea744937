use crate::config::Settings;
use serde::Serialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use ucca_kernel::{ActionEntry, AuthorityDocument, ControllerEntry, Row};

pub fn settings_or_exit(config: Option<&str>) -> Settings {
    Settings::load(config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn load_document_or_exit(authority: &str) -> (AuthorityDocument, PathBuf) {
    let path = PathBuf::from(authority);
    if !path.exists() {
        eprintln!("error: authority document not found: {}", path.display());
        std::process::exit(1);
    }
    let document = AuthorityDocument::load(&path).unwrap_or_else(|e| {
        eprintln!("error: failed to load {}: {e}", path.display());
        std::process::exit(1);
    });
    (document, path)
}

pub fn parse_rows_or_exit(rows: &[String]) -> Vec<Row> {
    if rows.is_empty() {
        return Row::ALL.to_vec();
    }
    let mut parsed: Vec<Row> = rows
        .iter()
        .map(|raw| {
            raw.parse().unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(1);
            })
        })
        .collect();
    parsed.sort();
    parsed.dedup();
    parsed
}

pub fn print_json<T: Serialize>(payload: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).expect("json serialization")
    );
}

/// Controller kinds and action labels, kept after the document is consumed.
pub struct Catalog {
    controllers: Vec<ControllerEntry>,
    actions: Vec<ActionEntry>,
}

impl Catalog {
    pub fn of(document: &AuthorityDocument) -> Self {
        Self {
            controllers: document.controllers.clone(),
            actions: document.actions.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        let controllers: Vec<Value> = self
            .controllers
            .iter()
            .map(|entry| {
                json!({
                    "id": entry.id,
                    "kind": entry.kind,
                    "actionCount": entry.actions.len(),
                })
            })
            .collect();
        let actions: Vec<Value> = self
            .actions
            .iter()
            .map(|entry| {
                json!({
                    "id": entry.id,
                    "label": entry.label(),
                    "discrete": entry.discrete,
                })
            })
            .collect();
        json!({
            "controllers": controllers,
            "actions": actions,
        })
    }

    pub fn print(&self) {
        println!("  Controllers ({}):", self.controllers.len());
        for entry in &self.controllers {
            if entry.kind.is_empty() {
                println!("    - {}", entry.id);
            } else {
                println!("    - {} ({})", entry.id, entry.kind);
            }
        }
        println!("  Actions ({}):", self.actions.len());
        for entry in &self.actions {
            let kind = if entry.discrete { "discrete" } else { "continuous" };
            println!("    - {}: {} ({kind})", entry.id, entry.label());
        }
    }
}
