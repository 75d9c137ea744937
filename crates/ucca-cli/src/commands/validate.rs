use crate::support::{Catalog, load_document_or_exit, print_json};
use serde_json::json;
use ucca_kernel::validate::authority_violations;

pub fn run(authority: String, json_output: bool) {
    let (document, path) = load_document_or_exit(&authority);
    let team = document.team.clone();
    let catalog = Catalog::of(&document);
    let (tuple, interchangeable) = document.into_parts().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let violations = authority_violations(&tuple);
    let lines: Vec<String> = violations.iter().map(ToString::to_string).collect();
    for violation in &violations {
        tracing::warn!(%violation, "authority tuple violation");
    }

    if json_output {
        print_json(&json!({
            "authorityPath": path.display().to_string(),
            "team": team,
            "valid": violations.is_empty(),
            "controllerCount": tuple.controllers.len(),
            "actionCount": tuple.actions.len(),
            "interchangeableClassCount": interchangeable.classes().len(),
            "catalog": catalog.to_json(),
            "violations": &violations,
            "messages": lines,
        }));
    } else {
        println!("ucca validate");
        println!("  Source: {}", path.display());
        if let Some(team) = &team {
            println!("  Team: {team}");
        }
        catalog.print();
        println!(
            "  Valid: {}",
            if violations.is_empty() { "yes" } else { "no" }
        );
        if !lines.is_empty() {
            println!("  Violations ({}):", lines.len());
            for line in &lines {
                println!("    - {line}");
            }
        }
    }

    if !violations.is_empty() {
        std::process::exit(1);
    }
}
