//! Date-range resolution for transaction filtering.
//!
//! A [RangeSelector] plus an explicit reference date resolves to a concrete
//! inclusive [DateRange], or to no bound at all for [RangeSelector::All].
//! The reference date is always passed in by the caller so that resolution is
//! deterministic and testable; nothing in this module reads the wall clock.

use serde::Deserialize;
use time::{Date, Duration, Month};

use crate::Error;

/// The calendar window of transactions to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeSelector {
    /// No date bound; every transaction passes the date filter.
    All,
    /// The reference date only.
    Today,
    /// The seven calendar days before the reference date, through the
    /// reference date.
    Week,
    /// The first day of the reference date's month through the reference date.
    Month,
    /// The first day of the reference date's year through the reference date.
    Year,
    /// A caller-supplied inclusive start/end pair.
    Custom,
}

impl RangeSelector {
    /// The selector applied when the query string does not name one.
    pub fn default_selector() -> Self {
        Self::All
    }

    /// The string used in query parameters for this selector.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Custom => "custom",
        }
    }

    /// The label shown in the range dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Year => "This Year",
            Self::Custom => "Custom Range",
        }
    }
}

/// An inclusive calendar-day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first day of the interval.
    pub start: Date,
    /// The last day of the interval.
    pub end: Date,
}

impl DateRange {
    /// Whether `date` falls within the interval, inclusive of both ends.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolve `selector` against the reference date `today`.
///
/// Returns `None` for [RangeSelector::All], meaning no date bound. The custom
/// bounds are only read when `selector` is [RangeSelector::Custom] and are
/// taken verbatim, never clamped or swapped.
///
/// # Errors
/// Returns [Error::InvalidDateRange] if a custom range is missing either bound
/// or has its start after its end. Callers must keep the previously applied
/// range in that case.
pub fn resolve_range(
    selector: RangeSelector,
    custom_start: Option<Date>,
    custom_end: Option<Date>,
    today: Date,
) -> Result<Option<DateRange>, Error> {
    let range = match selector {
        RangeSelector::All => return Ok(None),
        RangeSelector::Today => DateRange {
            start: today,
            end: today,
        },
        RangeSelector::Week => DateRange {
            start: today - Duration::days(7),
            end: today,
        },
        RangeSelector::Month => DateRange {
            start: today.replace_day(1).expect("invalid month start date"),
            end: today,
        },
        RangeSelector::Year => DateRange {
            start: Date::from_calendar_date(today.year(), Month::January, 1)
                .expect("invalid year start date"),
            end: today,
        },
        RangeSelector::Custom => match (custom_start, custom_end) {
            (Some(start), Some(end)) if start <= end => DateRange { start, end },
            _ => return Err(Error::InvalidDateRange),
        },
    };

    Ok(Some(range))
}

#[cfg(test)]
mod resolve_range_tests {
    use time::macros::date;

    use crate::Error;

    use super::{DateRange, RangeSelector, resolve_range};

    #[test]
    fn all_is_unbounded() {
        let result = resolve_range(RangeSelector::All, None, None, date!(2024 - 01 - 20));

        assert_eq!(result, Ok(None));
    }

    #[test]
    fn today_is_a_single_day() {
        let today = date!(2024 - 01 - 20);

        let result = resolve_range(RangeSelector::Today, None, None, today);

        assert_eq!(
            result,
            Ok(Some(DateRange {
                start: today,
                end: today
            }))
        );
    }

    #[test]
    fn week_starts_seven_days_before_reference() {
        let result = resolve_range(RangeSelector::Week, None, None, date!(2024 - 01 - 20));

        assert_eq!(
            result,
            Ok(Some(DateRange {
                start: date!(2024 - 01 - 13),
                end: date!(2024 - 01 - 20)
            }))
        );
    }

    #[test]
    fn week_crosses_month_boundary() {
        let result = resolve_range(RangeSelector::Week, None, None, date!(2024 - 03 - 03));

        assert_eq!(
            result,
            Ok(Some(DateRange {
                start: date!(2024 - 02 - 25),
                end: date!(2024 - 03 - 03)
            }))
        );
    }

    #[test]
    fn month_starts_on_first_of_month() {
        let result = resolve_range(RangeSelector::Month, None, None, date!(2024 - 01 - 20));

        assert_eq!(
            result,
            Ok(Some(DateRange {
                start: date!(2024 - 01 - 01),
                end: date!(2024 - 01 - 20)
            }))
        );
    }

    #[test]
    fn year_starts_on_first_of_january() {
        let result = resolve_range(RangeSelector::Year, None, None, date!(2024 - 06 - 15));

        assert_eq!(
            result,
            Ok(Some(DateRange {
                start: date!(2024 - 01 - 01),
                end: date!(2024 - 06 - 15)
            }))
        );
    }

    #[test]
    fn custom_takes_bounds_verbatim() {
        let result = resolve_range(
            RangeSelector::Custom,
            Some(date!(2024 - 01 - 05)),
            Some(date!(2024 - 02 - 10)),
            date!(2024 - 06 - 15),
        );

        assert_eq!(
            result,
            Ok(Some(DateRange {
                start: date!(2024 - 01 - 05),
                end: date!(2024 - 02 - 10)
            }))
        );
    }

    #[test]
    fn custom_single_day_range_is_valid() {
        let day = date!(2024 - 01 - 05);

        let result = resolve_range(RangeSelector::Custom, Some(day), Some(day), day);

        assert_eq!(result, Ok(Some(DateRange { start: day, end: day })));
    }

    #[test]
    fn custom_with_inverted_bounds_fails() {
        let result = resolve_range(
            RangeSelector::Custom,
            Some(date!(2024 - 02 - 10)),
            Some(date!(2024 - 01 - 05)),
            date!(2024 - 06 - 15),
        );

        assert_eq!(result, Err(Error::InvalidDateRange));
    }

    #[test]
    fn custom_with_missing_start_fails() {
        let result = resolve_range(
            RangeSelector::Custom,
            None,
            Some(date!(2024 - 01 - 05)),
            date!(2024 - 06 - 15),
        );

        assert_eq!(result, Err(Error::InvalidDateRange));
    }

    #[test]
    fn custom_with_missing_end_fails() {
        let result = resolve_range(
            RangeSelector::Custom,
            Some(date!(2024 - 01 - 05)),
            None,
            date!(2024 - 06 - 15),
        );

        assert_eq!(result, Err(Error::InvalidDateRange));
    }

    #[test]
    fn resolution_is_deterministic() {
        let today = date!(2024 - 01 - 20);

        let first = resolve_range(RangeSelector::Month, None, None, today);
        let second = resolve_range(RangeSelector::Month, None, None, today);

        assert_eq!(first, second);
    }

    #[test]
    fn non_custom_selectors_ignore_custom_bounds() {
        let result = resolve_range(
            RangeSelector::Today,
            Some(date!(2020 - 01 - 01)),
            Some(date!(2020 - 12 - 31)),
            date!(2024 - 01 - 20),
        );

        assert_eq!(
            result,
            Ok(Some(DateRange {
                start: date!(2024 - 01 - 20),
                end: date!(2024 - 01 - 20)
            }))
        );
    }
}
