//! Expense Breakdown
//!
//! Aggregates expense transactions by category: grand total, each category's
//! share of it, and a display color per category. This is the data behind the
//! breakdown chart and is recomputed from fresh snapshots on every change.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::{Category, CategoryId, Transaction};

/// Saturation used for every report color
const SATURATION: u8 = 70;

/// Lightness used for every report color
const LIGHTNESS: u8 = 50;

/// A display color on the HSL wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    /// Hue in degrees, `0.0..360.0`
    pub hue: f64,
    /// Saturation percentage
    pub saturation: u8,
    /// Lightness percentage
    pub lightness: u8,
}

impl HslColor {
    /// Evenly spaced hue for slot `index` out of `count`
    pub fn evenly_spaced(index: usize, count: usize) -> Self {
        let hue = if count == 0 {
            0.0
        } else {
            (index as f64 * 360.0) / count as f64
        };

        Self {
            hue,
            saturation: SATURATION,
            lightness: LIGHTNESS,
        }
    }

    /// Convert to 8-bit RGB for terminal truecolor output
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;
        let h = self.hue.rem_euclid(360.0) / 60.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl Serialize for HslColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One category's share of total expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub category_id: CategoryId,
    pub label: String,
    /// Sum of the expense amounts filed under this category
    pub amount: f64,
    /// `round(amount / total * 100)`
    pub percentage: u8,
    pub color: HslColor,
}

/// Expense totals per category, largest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseBreakdown {
    /// Sum of all expense amounts
    pub total: f64,
    /// Categories with non-zero spending, sorted by amount descending
    pub rows: Vec<ReportRow>,
}

impl ExpenseBreakdown {
    /// An empty breakdown with a zero total
    pub fn empty() -> Self {
        Self {
            total: 0.0,
            rows: Vec::new(),
        }
    }

    /// Aggregate expense transactions by category
    ///
    /// A transaction filed under several categories counts its full amount
    /// toward each of them, so row amounts may sum to more than `total`.
    /// Non-finite amounts count as zero. Colors are assigned from the order
    /// rows are emitted in, before sorting.
    pub fn compute(categories: &[Category], transactions: &[Transaction]) -> Self {
        if categories.is_empty() || transactions.is_empty() {
            return Self::empty();
        }

        let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();

        let total: f64 = expenses.iter().map(|t| t.effective_amount()).sum();
        if total <= 0.0 {
            return Self::empty();
        }

        let mut rows: Vec<ReportRow> = Vec::new();
        for category in categories {
            let amount: f64 = expenses
                .iter()
                .filter(|t| t.has_category(category.id))
                .map(|t| t.effective_amount())
                .sum();

            if amount <= 0.0 {
                continue;
            }

            let percentage = ((amount / total) * 100.0).round().clamp(0.0, 100.0) as u8;

            rows.push(ReportRow {
                category_id: category.id,
                label: category.label.clone(),
                amount,
                percentage,
                color: HslColor::evenly_spaced(rows.len(), categories.len()),
            });
        }

        // Vec::sort_by is stable, so equal amounts keep category order
        rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        Self { total, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `limit` largest rows
    pub fn top(&self, limit: usize) -> &[ReportRow] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Largest row amount, used to scale bar charts
    pub fn max_amount(&self) -> f64 {
        self.rows.first().map(|r| r.amount).unwrap_or(0.0)
    }
}

impl Default for ExpenseBreakdown {
    fn default() -> Self {
        Self::empty()
    }
}
