use crate::support::{Catalog, load_document_or_exit, print_json};
use serde_json::json;
use ucca_kernel::Row;

pub fn run(authority: String, json_output: bool) {
    let (document, path) = load_document_or_exit(&authority);
    let team = document.team.clone();
    let catalog = Catalog::of(&document);
    let enumerator = document.into_enumerator().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let counts = enumerator.row_counts();
    let digest = enumerator.digest();
    let classes: Vec<Vec<String>> = enumerator
        .interchangeable()
        .classes()
        .into_iter()
        .map(|class| class.into_iter().map(|c| c.to_string()).collect())
        .collect();
    let shared_classes: Vec<&Vec<String>> = classes.iter().filter(|c| c.len() > 1).collect();

    if json_output {
        print_json(&json!({
            "authorityPath": path.display().to_string(),
            "team": team,
            "controllerCount": enumerator.authority().controllers.len(),
            "actionCount": enumerator.authority().actions.len(),
            "rowCounts": counts,
            "total": counts.total(),
            "digest": digest,
            "interchangeableClasses": classes,
            "catalog": catalog.to_json(),
        }));
    } else {
        println!("ucca summary");
        println!("  Source: {}", path.display());
        if let Some(team) = &team {
            println!("  Team: {team}");
        }
        catalog.print();
        for row in Row::ALL {
            println!("  {} ({}): {}", row, row.tag(), counts.get(row));
        }
        println!("  Total: {}", counts.total());
        println!("  Digest: {digest}");
        if !shared_classes.is_empty() {
            println!("  Interchangeable:");
            for class in shared_classes {
                println!("    - {}", class.join(", "));
            }
        }
    }
}
