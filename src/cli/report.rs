//! CLI command for the expense breakdown report

use clap::Args;
use serde::Serialize;
use std::io::IsTerminal;

use super::load_snapshots;
use crate::api::ExpenseBackend;
use crate::config::settings::Settings;
use crate::dashboard::Dashboard;
use crate::display::format_breakdown;
use crate::error::ExpenseResult;
use crate::reports::ReportRow;

/// Report options
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,

    /// Only show the N largest categories
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    total: f64,
    rows: &'a [ReportRow],
}

/// Handle the report command
pub fn handle_report_command<B: ExpenseBackend>(
    dashboard: &mut Dashboard<B>,
    settings: &Settings,
    args: ReportArgs,
) -> ExpenseResult<()> {
    load_snapshots(dashboard)?;

    let breakdown = dashboard.breakdown();
    let rows = match args.top {
        Some(n) => breakdown.top(n),
        None => &breakdown.rows,
    };

    if args.json {
        let json = serde_json::to_string_pretty(&ReportJson {
            total: breakdown.total,
            rows,
        })?;
        println!("{}", json);
    } else {
        let ansi = std::io::stdout().is_terminal();
        print!(
            "{}",
            format_breakdown(breakdown, rows, &settings.currency_symbol, ansi)
        );
    }

    Ok(())
}
