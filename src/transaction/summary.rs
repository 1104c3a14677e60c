//! Summary totals over a filtered transaction list.

use rust_decimal::Decimal;

use super::{core::TransactionKind, query::TransactionRow};

/// The totals displayed in the summary cards.
///
/// All sums are exact decimal arithmetic; no amount ever passes through binary
/// floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSummary {
    /// The sum of amounts over expense transactions.
    pub total_expenses: Decimal,
    /// The sum of amounts over income transactions.
    pub total_income: Decimal,
    /// Income minus expenses. Negative when more was spent than earned.
    pub net_savings: Decimal,
    /// The number of transactions summarized.
    pub count: usize,
}

/// Reduce `rows` to its summary totals.
///
/// An empty list yields all-zero totals, not an error.
pub fn summarize(rows: &[TransactionRow]) -> TransactionSummary {
    let mut total_expenses = Decimal::ZERO;
    let mut total_income = Decimal::ZERO;

    for row in rows {
        match row.kind {
            TransactionKind::Expense => total_expenses += row.amount,
            TransactionKind::Income => total_income += row.amount,
        }
    }

    TransactionSummary {
        total_expenses,
        total_income,
        net_savings: total_income - total_expenses,
        count: rows.len(),
    }
}

#[cfg(test)]
mod summarize_tests {
    use rust_decimal::Decimal;
    use time::macros::{date, datetime};

    use crate::transaction::{
        RangeSelector, TransactionKind, filter_transactions, query::TransactionRow, resolve_range,
    };

    use super::{TransactionSummary, summarize};

    fn row(
        id: i64,
        amount: &str,
        kind: TransactionKind,
        date_time: time::PrimitiveDateTime,
    ) -> TransactionRow {
        TransactionRow {
            id,
            title: format!("transaction #{id}"),
            amount: amount.parse().unwrap(),
            kind,
            date_time,
            category_name: None,
            category_icon: None,
            category_color: None,
        }
    }

    #[test]
    fn sums_expenses_and_income_separately() {
        let rows = vec![
            row(1, "100", TransactionKind::Expense, datetime!(2024-01-05 10:00)),
            row(2, "500", TransactionKind::Income, datetime!(2024-01-10 09:00)),
            row(3, "50", TransactionKind::Expense, datetime!(2024-02-01 17:30)),
        ];

        let summary = summarize(&rows);

        assert_eq!(
            summary,
            TransactionSummary {
                total_expenses: Decimal::from(150),
                total_income: Decimal::from(500),
                net_savings: Decimal::from(350),
                count: 3,
            }
        );
    }

    #[test]
    fn empty_list_yields_zero_totals() {
        let summary = summarize(&[]);

        assert_eq!(
            summary,
            TransactionSummary {
                total_expenses: Decimal::ZERO,
                total_income: Decimal::ZERO,
                net_savings: Decimal::ZERO,
                count: 0,
            }
        );
    }

    #[test]
    fn net_savings_may_be_negative() {
        let rows = vec![
            row(1, "300", TransactionKind::Expense, datetime!(2024-01-05 10:00)),
            row(2, "100", TransactionKind::Income, datetime!(2024-01-10 09:00)),
        ];

        let summary = summarize(&rows);

        assert_eq!(summary.net_savings, Decimal::from(-200));
    }

    #[test]
    fn cent_amounts_sum_exactly() {
        // The classic float trap: 0.1 + 0.2 must be exactly 0.3.
        let rows = vec![
            row(1, "0.1", TransactionKind::Expense, datetime!(2024-01-05 10:00)),
            row(2, "0.2", TransactionKind::Expense, datetime!(2024-01-05 11:00)),
        ];

        let summary = summarize(&rows);

        assert_eq!(summary.total_expenses, "0.3".parse().unwrap());
    }

    #[test]
    fn summary_of_filtered_month_matches_scenario() {
        // Month of January 2024, reference date Jan 20: the February expense
        // drops out, leaving income 500 and expense 100.
        let rows = vec![
            row(1, "100", TransactionKind::Expense, datetime!(2024-01-05 10:00)),
            row(2, "500", TransactionKind::Income, datetime!(2024-01-10 09:00)),
            row(3, "50", TransactionKind::Expense, datetime!(2024-02-01 17:30)),
        ];
        let range = resolve_range(RangeSelector::Month, None, None, date!(2024 - 01 - 20))
            .unwrap();

        let visible = filter_transactions(&rows, range, "");
        let summary = summarize(&visible);

        let ids: Vec<_> = visible.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(
            summary,
            TransactionSummary {
                total_expenses: Decimal::from(100),
                total_income: Decimal::from(500),
                net_savings: Decimal::from(400),
                count: 2,
            }
        );
    }

    #[test]
    fn count_equals_filtered_list_length() {
        let rows = vec![
            row(1, "100", TransactionKind::Expense, datetime!(2024-01-05 10:00)),
            row(2, "500", TransactionKind::Income, datetime!(2024-01-10 09:00)),
            row(3, "50", TransactionKind::Expense, datetime!(2024-02-01 17:30)),
        ];

        let visible = filter_transactions(&rows, None, "50");
        let summary = summarize(&visible);

        assert_eq!(summary.count, visible.len());
        assert_eq!(
            summary.net_savings,
            summary.total_income - summary.total_expenses
        );
    }
}
