//! CLI handlers for browsing stored analysis runs.

use anyhow::{anyhow, Result};

use crate::cli::args::{HistoryCliArgs, ShowCliArgs};
use crate::config::Config;
use crate::db::{self, AnalysisRepository};
use crate::report::{self, ReportOptions};

pub fn handle_history_command(args: HistoryCliArgs) -> Result<()> {
    let conn = db::init_db()?;
    let analyses = AnalysisRepository::list(&conn, args.query.as_deref(), args.limit)?;

    if analyses.is_empty() {
        println!("No analyses found matching your criteria.");
        return Ok(());
    }

    println!("Found {} analysis run(s):\n", analyses.len());

    for analysis in analyses {
        let title = analysis.title.as_deref().unwrap_or("Untitled");
        println!(
            "#{} {} [{}] {} rows | {} actions, {} decisions, {} questions | {} min - {}",
            analysis.id,
            title,
            analysis.source,
            analysis.row_count,
            analysis.action_items,
            analysis.decisions,
            analysis.questions,
            analysis.duration_minutes,
            analysis.created_at
        );
    }

    println!("\nTo view a run, use: meetric show <ID>");

    Ok(())
}

pub fn handle_show_command(args: ShowCliArgs, config: &Config) -> Result<()> {
    let conn = db::init_db()?;
    let stored = AnalysisRepository::get(&conn, args.id)?
        .ok_or_else(|| anyhow!("Analysis with ID {} not found", args.id))?;

    let bundle = stored.bundle()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    let title = stored.title.clone().unwrap_or_else(|| stored.source.clone());
    let options = ReportOptions {
        show_key_points: config.report.show_key_points,
    };
    println!("{}", report::render(&title, &bundle, &options));

    Ok(())
}
