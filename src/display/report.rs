//! Report formatting utilities for terminal output
//!
//! Renders the expense breakdown as a bar chart with one colored swatch per
//! category, plus the amount and totals helpers shared by other views.

use crate::reports::{ExpenseBreakdown, HslColor, ReportRow};
use crate::services::TransactionTotals;

const BAR_WIDTH: usize = 24;
const REPORT_WIDTH: usize = 60;

/// Format an amount with thousands separators and a currency suffix
///
/// Whole amounts print without decimals; anything else keeps two places.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let hundredths = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(hundredths / 100);
    let fraction = hundredths % 100;

    let sign = if amount < 0.0 && hundredths > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}{}{}", sign, whole, currency)
    } else {
        format!("{}{}.{:02}{}", sign, whole, fraction, currency)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// A colored dot for the category, or a plain one without ANSI colors
pub fn swatch(color: HslColor, ansi: bool) -> String {
    if ansi {
        let (r, g, b) = color.to_rgb();
        format!("\x1b[38;2;{};{};{}m●\x1b[0m", r, g, b)
    } else {
        "●".to_string()
    }
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Format the breakdown chart
///
/// `rows` is usually `breakdown.rows` or a `top(n)` slice of it; bars are
/// scaled against the largest row of the whole breakdown.
pub fn format_breakdown(
    breakdown: &ExpenseBreakdown,
    rows: &[ReportRow],
    currency: &str,
    ansi: bool,
) -> String {
    if breakdown.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    let max_amount = breakdown.max_amount();

    let mut output = String::new();
    output.push_str("Expense Breakdown\n");
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{} {}  {}  {:>14}  {:>3}%\n",
            swatch(row.color, ansi),
            pad_right(&row.label, label_width),
            format_bar(row.amount, max_amount, BAR_WIDTH),
            format_amount(row.amount, currency),
            row.percentage
        ));
    }

    if rows.len() < breakdown.rows.len() {
        output.push_str(&format!(
            "  ... and {} more\n",
            breakdown.rows.len() - rows.len()
        ));
    }

    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "  {}  {}\n",
        pad_right("Total", label_width),
        format_amount(breakdown.total, currency)
    ));

    output
}

/// Format income, expense and balance on one line
pub fn format_totals(totals: &TransactionTotals, currency: &str) -> String {
    format!(
        "Income: {}  Expense: {}  Balance: {}",
        format_amount(totals.income, currency),
        format_amount(totals.expense, currency),
        format_amount(totals.balance(), currency)
    )
}
