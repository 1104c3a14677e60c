//! Monthly income/expense aggregation for the dashboard trend chart.

use std::collections::HashMap;

use rust_decimal::Decimal;
use time::{Date, Month};

use crate::transaction::{TransactionKind, TransactionRow};

/// How many months the trend covers when the caller does not say otherwise.
pub const DEFAULT_MONTHS_BACK: u32 = 6;

/// The totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTrend {
    /// The first day of the month.
    pub month: Date,
    /// The sum of expense amounts in the month.
    pub total_expense: Decimal,
    /// The sum of income amounts in the month.
    pub total_income: Decimal,
}

/// Aggregate `rows` into per-month expense and income totals for the
/// `months_back` calendar months ending at `today`'s month.
///
/// Every month in the window gets an entry; months without transactions have
/// zero totals so the chart's x-axis is continuous. Transactions outside the
/// window are ignored.
pub fn monthly_trend(rows: &[TransactionRow], months_back: u32, today: Date) -> Vec<MonthlyTrend> {
    if months_back == 0 {
        return Vec::new();
    }

    let mut months = Vec::with_capacity(months_back as usize);
    let mut month = today.replace_day(1).expect("invalid month start date");
    for _ in 0..months_back {
        months.push(month);
        month = previous_month(month);
    }
    months.reverse();

    let mut totals: HashMap<Date, (Decimal, Decimal)> = HashMap::new();
    for row in rows {
        let row_month = row
            .date_time
            .date()
            .replace_day(1)
            .expect("invalid month start date");
        let entry = totals.entry(row_month).or_insert((Decimal::ZERO, Decimal::ZERO));

        match row.kind {
            TransactionKind::Expense => entry.0 += row.amount,
            TransactionKind::Income => entry.1 += row.amount,
        }
    }

    months
        .into_iter()
        .map(|month| {
            let (total_expense, total_income) =
                totals.get(&month).copied().unwrap_or_default();

            MonthlyTrend {
                month,
                total_expense,
                total_income,
            }
        })
        .collect()
}

fn previous_month(month_start: Date) -> Date {
    let (year, month) = match month_start.month() {
        Month::January => (month_start.year() - 1, Month::December),
        other => (month_start.year(), other.previous()),
    };

    Date::from_calendar_date(year, month, 1).expect("invalid month start date")
}

#[cfg(test)]
mod monthly_trend_tests {
    use rust_decimal::Decimal;
    use time::macros::{date, datetime};

    use crate::transaction::{TransactionKind, TransactionRow};

    use super::{MonthlyTrend, monthly_trend};

    fn row(
        id: i64,
        amount: i64,
        kind: TransactionKind,
        date_time: time::PrimitiveDateTime,
    ) -> TransactionRow {
        TransactionRow {
            id,
            title: format!("transaction #{id}"),
            amount: Decimal::from(amount),
            kind,
            date_time,
            category_name: None,
            category_icon: None,
            category_color: None,
        }
    }

    #[test]
    fn covers_requested_months_with_zero_fill() {
        let rows = vec![row(
            1,
            100,
            TransactionKind::Expense,
            datetime!(2024-05-10 12:00),
        )];

        let trend = monthly_trend(&rows, 3, date!(2024 - 06 - 15));

        assert_eq!(
            trend,
            vec![
                MonthlyTrend {
                    month: date!(2024 - 04 - 01),
                    total_expense: Decimal::ZERO,
                    total_income: Decimal::ZERO,
                },
                MonthlyTrend {
                    month: date!(2024 - 05 - 01),
                    total_expense: Decimal::from(100),
                    total_income: Decimal::ZERO,
                },
                MonthlyTrend {
                    month: date!(2024 - 06 - 01),
                    total_expense: Decimal::ZERO,
                    total_income: Decimal::ZERO,
                },
            ]
        );
    }

    #[test]
    fn splits_expenses_and_income() {
        let rows = vec![
            row(1, 100, TransactionKind::Expense, datetime!(2024-06-10 12:00)),
            row(2, 500, TransactionKind::Income, datetime!(2024-06-20 12:00)),
        ];

        let trend = monthly_trend(&rows, 1, date!(2024 - 06 - 30));

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].total_expense, Decimal::from(100));
        assert_eq!(trend[0].total_income, Decimal::from(500));
    }

    #[test]
    fn ignores_transactions_outside_the_window() {
        let rows = vec![
            row(1, 100, TransactionKind::Expense, datetime!(2023-06-10 12:00)),
            row(2, 50, TransactionKind::Expense, datetime!(2024-06-10 12:00)),
        ];

        let trend = monthly_trend(&rows, 2, date!(2024 - 06 - 15));

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].total_expense, Decimal::ZERO);
        assert_eq!(trend[1].total_expense, Decimal::from(50));
    }

    #[test]
    fn window_crosses_year_boundary() {
        let trend = monthly_trend(&[], 3, date!(2024 - 01 - 15));

        let months: Vec<_> = trend.iter().map(|entry| entry.month).collect();
        assert_eq!(
            months,
            vec![
                date!(2023 - 11 - 01),
                date!(2023 - 12 - 01),
                date!(2024 - 01 - 01)
            ]
        );
    }

    #[test]
    fn zero_months_back_yields_empty_trend() {
        let trend = monthly_trend(&[], 0, date!(2024 - 06 - 15));

        assert!(trend.is_empty());
    }
}
