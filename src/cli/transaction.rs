//! Transaction CLI commands
//!
//! Implements CLI commands for listing and editing transactions. Every
//! command reloads from the backend first so ids and categories resolve
//! against current data.

use clap::Subcommand;

use super::{load_snapshots, parse_amount, parse_date};
use crate::api::ExpenseBackend;
use crate::config::settings::Settings;
use crate::dashboard::Dashboard;
use crate::display::{
    format_amount, format_totals, format_transaction_details, format_transaction_list,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{TransactionInput, TransactionKind};
use crate::services::{
    find_transaction, resolve_category_ids, TransactionFilter, TransactionTotals,
};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions with income, expense and balance totals
    List {
        /// Only show "income" or "expense"
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Record a new transaction
    Add {
        /// Amount (e.g., "12000" or "12,000")
        amount: String,
        /// Category label or ID (repeatable)
        #[arg(short, long = "category", required = true)]
        categories: Vec<String>,
        /// Description
        #[arg(short, long)]
        description: String,
        /// "income" or "expense"
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit a transaction; omitted fields keep their value
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// Replace categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

fn parse_kind(value: &str) -> ExpenseResult<TransactionKind> {
    value.parse().map_err(ExpenseError::Validation)
}

/// Handle a transaction command
pub fn handle_transaction_command<B: ExpenseBackend>(
    dashboard: &mut Dashboard<B>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> ExpenseResult<()> {
    let currency = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        TransactionCommands::List { kind, from, to } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let from = from.as_deref().map(parse_date).transpose()?;
            let to = to.as_deref().map(parse_date).transpose()?;
            let filter = TransactionFilter::new(kind, from, to)?;

            load_snapshots(dashboard)?;
            let mut shown = filter.apply(dashboard.transactions());
            shown.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));

            print!("{}", format_transaction_list(&shown, currency, date_format));
            let totals = TransactionTotals::from_transactions(shown.iter().copied());
            println!("{}", format_totals(&totals, currency));
        }

        TransactionCommands::Show { id } => {
            load_snapshots(dashboard)?;
            let txn = find_transaction(dashboard.transactions(), &id)?;
            print!("{}", format_transaction_details(txn, currency, date_format));
        }

        TransactionCommands::Add {
            amount,
            categories,
            description,
            kind,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let kind = parse_kind(&kind)?;
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => chrono::Local::now().date_naive(),
            };

            load_snapshots(dashboard)?;
            let category_ids = resolve_category_ids(dashboard.categories(), &categories)?;
            let input = TransactionInput::new(kind, category_ids, description, amount, date)?;
            dashboard.add_transaction(&input)?;

            println!(
                "Recorded {} of {} on {}",
                kind,
                format_amount(amount, currency),
                date
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            categories,
            description,
            kind,
            date,
        } => {
            load_snapshots(dashboard)?;
            let txn = find_transaction(dashboard.transactions(), &id)?;
            let txn_id = txn.id;
            let mut input = TransactionInput::from_transaction(txn);

            if let Some(amount) = amount {
                input.amount = parse_amount(&amount)?;
            }
            if !categories.is_empty() {
                input.category_ids = resolve_category_ids(dashboard.categories(), &categories)?;
            }
            if let Some(description) = description {
                input.description = description.trim().to_string();
            }
            if let Some(kind) = kind {
                input.kind = parse_kind(&kind)?;
            }
            if let Some(date) = date {
                input.occurred_on = parse_date(&date)?;
            }

            dashboard.update_transaction(txn_id, &input)?;
            println!("Updated transaction: {}", txn_id);
        }

        TransactionCommands::Delete { id } => {
            load_snapshots(dashboard)?;
            let txn_id = find_transaction(dashboard.transactions(), &id)?.id;
            dashboard.delete_transaction(txn_id)?;
            println!("Deleted transaction: {}", txn_id);
        }
    }

    Ok(())
}
