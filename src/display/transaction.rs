//! Transaction display formatting
//!
//! Table view for the transaction list and a detail view for a single record.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_amount, format_date, truncate};
use crate::models::Transaction;

const DESCRIPTION_WIDTH: usize = 30;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format transactions as a table
pub fn format_transaction_list(
    transactions: &[&Transaction],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        id: t.id.to_string(),
        date: format_date(t.occurred_on, date_format),
        kind: t.kind.to_string(),
        amount: format_amount(t.amount, currency),
        categories: t.category_labels(),
        description: truncate(&t.description, DESCRIPTION_WIDTH),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a single transaction
pub fn format_transaction_details(txn: &Transaction, currency: &str, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!("  Amount:      {}\n", format_amount(txn.amount, currency)));
    output.push_str(&format!(
        "  Date:        {}\n",
        format_date(txn.occurred_on, date_format)
    ));

    let categories = if txn.categories.is_empty() {
        "(none)".to_string()
    } else {
        txn.category_labels()
    };
    output.push_str(&format!("  Categories:  {}\n", categories));

    if !txn.description.is_empty() {
        output.push_str(&format!("  Description: {}\n", txn.description));
    }

    output
}
