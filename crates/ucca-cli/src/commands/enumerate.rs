use crate::support::{load_document_or_exit, parse_rows_or_exit};
use std::io::Write;
use std::ops::ControlFlow;
use ucca_kernel::Ucca;

pub struct Args {
    pub authority: String,
    pub rows: Vec<String>,
    pub limit: Option<usize>,
    pub json: bool,
}

pub fn run(args: Args) {
    let rows = parse_rows_or_exit(&args.rows);
    let (document, path) = load_document_or_exit(&args.authority);
    let enumerator = document.into_enumerator().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_failed = false;
    let limit = args.limit;
    let json_output = args.json;
    let mut written = 0usize;

    let mut sink = |ucca: Ucca| {
        if limit.is_some_and(|max| written >= max) {
            return ControlFlow::Break(());
        }
        let line = if json_output {
            serde_json::to_string(&ucca.to_record()).expect("json serialization")
        } else {
            ucca.to_string()
        };
        if writeln!(out, "{line}").is_err() {
            // Downstream closed the pipe.
            write_failed = true;
            return ControlFlow::Break(());
        }
        written += 1;
        ControlFlow::Continue(())
    };
    let outcome = enumerator.enumerate_rows(&rows, &mut sink);

    tracing::info!(
        source = %path.display(),
        written,
        offered = outcome.offered,
        stopped_early = outcome.stopped_early,
        "enumerate complete"
    );
    if write_failed {
        std::process::exit(1);
    }
}
