//! CLI handler for the analyze command.

use anyhow::{Context, Result};
use tracing::debug;

use crate::analysis::analyze;
use crate::cli::args::AnalyzeCliArgs;
use crate::config::Config;
use crate::db::{self, AnalysisRepository};
use crate::report::{self, ReportOptions};
use crate::transcript::loader;

pub fn handle_analyze_command(args: AnalyzeCliArgs, config: &Config) -> Result<()> {
    let rows = loader::load_path(&args.file)?;
    debug!("Loaded {} transcript rows from {:?}", rows.len(), args.file);

    let bundle = analyze(&rows);

    let source = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("transcript")
        .to_string();

    let rendered = if args.json {
        serde_json::to_string_pretty(&bundle).context("Failed to serialize analysis bundle")?
    } else {
        let display_title = args.title.clone().unwrap_or_else(|| source.clone());
        let options = ReportOptions {
            show_key_points: config.report.show_key_points,
        };
        report::render(&display_title, &bundle, &options)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output to {:?}", path))?;
            println!("Wrote analysis to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if !args.no_save {
        let conn = db::init_db()?;
        let id =
            AnalysisRepository::insert(&conn, &source, args.title.as_deref(), rows.len(), &bundle)?;
        AnalysisRepository::prune(&conn, config.storage.history_limit as i64)?;
        // Keep stdout clean for piped report/JSON output.
        eprintln!("Saved as analysis #{id}");
    }

    Ok(())
}
