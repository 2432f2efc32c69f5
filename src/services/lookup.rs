//! Resolve user-typed names and ids against loaded snapshots

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId, Transaction, TransactionId};

/// Find a category by label (case-insensitive) or id
pub fn find_category<'a>(categories: &'a [Category], query: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.matches(query))
}

/// Resolve every query to a category id, failing on the first unknown one
///
/// Duplicates are dropped while keeping first-mention order.
pub fn resolve_category_ids(
    categories: &[Category],
    queries: &[String],
) -> ExpenseResult<Vec<CategoryId>> {
    let mut ids = Vec::with_capacity(queries.len());
    for query in queries {
        let category =
            find_category(categories, query).ok_or_else(|| ExpenseError::category_not_found(query))?;
        if !ids.contains(&category.id) {
            ids.push(category.id);
        }
    }
    Ok(ids)
}

/// Find a transaction by id (`12` or `txn-12`)
pub fn find_transaction<'a>(
    transactions: &'a [Transaction],
    query: &str,
) -> ExpenseResult<&'a Transaction> {
    let id: TransactionId = query.parse().map_err(|_| {
        ExpenseError::Validation(format!("'{}' is not a transaction id", query))
    })?;

    transactions
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| ExpenseError::transaction_not_found(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn categories() -> Vec<Category> {
        vec![
            Category::new(1, "Food"),
            Category::new(2, "Transport"),
            Category::new(3, "교통비"),
        ]
    }

    #[test]
    fn test_find_category() {
        let cats = categories();
        assert_eq!(find_category(&cats, "food").unwrap().id, CategoryId::new(1));
        assert_eq!(find_category(&cats, "2").unwrap().label, "Transport");
        assert_eq!(find_category(&cats, "교통비").unwrap().id, CategoryId::new(3));
        assert!(find_category(&cats, "Rent").is_none());
    }

    #[test]
    fn test_resolve_category_ids() {
        let cats = categories();
        let ids = resolve_category_ids(
            &cats,
            &["transport".to_string(), "1".to_string(), "Transport".to_string()],
        )
        .unwrap();
        assert_eq!(ids, vec![CategoryId::new(2), CategoryId::new(1)]);

        let err = resolve_category_ids(&cats, &["Rent".to_string()]).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Category not found: Rent");
    }

    #[test]
    fn test_find_transaction() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let txns = vec![
            Transaction::new(10, TransactionKind::Expense, 1.0, day),
            Transaction::new(11, TransactionKind::Income, 2.0, day),
        ];

        assert_eq!(find_transaction(&txns, "11").unwrap().id, TransactionId::new(11));
        assert_eq!(find_transaction(&txns, "txn-10").unwrap().id, TransactionId::new(10));
        assert!(find_transaction(&txns, "12").unwrap_err().is_not_found());
        assert!(find_transaction(&txns, "abc").unwrap_err().is_validation());
    }
}
