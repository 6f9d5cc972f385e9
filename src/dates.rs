//! Date-grid generation and query planning
//!
//! Both functions are pure: the same configuration always yields the
//! same grid and the same plan, which keeps the per-run request cap a
//! property of the plan instead of a counter threaded through I/O code.

use crate::models::DatePair;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

/// Build the ordered sequence of candidate departure/return pairs
///
/// Departure dates run from `start` to `end` inclusive and must match
/// the weekday filter when one is configured (an empty set allows every
/// day). Only the departure date is window-bound; return dates may fall
/// past `end`.
#[must_use]
pub fn build_date_grid(
    start: NaiveDate,
    end: NaiveDate,
    trip_length_nights: i64,
    weekdays: &HashSet<Weekday>,
) -> Vec<DatePair> {
    let mut grid = Vec::new();
    let mut day = start;
    while day <= end {
        if weekdays.is_empty() || weekdays.contains(&day.weekday()) {
            grid.push(DatePair::new(day, trip_length_nights));
        }
        day += Duration::days(1);
    }
    grid
}

/// Expand origins × date pairs into the bounded query plan
///
/// Origins form the outer loop and dates the inner one, so earlier
/// origins are fully searched before the budget truncates the tail.
/// The pricing client issues exactly one request per plan entry, which
/// makes the request budget impossible to exceed.
#[must_use]
pub fn plan_queries(
    origins: &[String],
    grid: &[DatePair],
    budget: usize,
) -> Vec<(String, DatePair)> {
    origins
        .iter()
        .flat_map(|origin| grid.iter().map(|pair| (origin.clone(), *pair)))
        .take(budget)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fri_sat() -> HashSet<Weekday> {
        HashSet::from([Weekday::Fri, Weekday::Sat])
    }

    #[test]
    fn test_grid_matches_weekday_filter_and_window() {
        let weekdays = fri_sat();
        let grid = build_date_grid(date("2026-08-20"), date("2026-10-10"), 14, &weekdays);

        assert!(!grid.is_empty());
        for pair in &grid {
            assert!(pair.departure >= date("2026-08-20"));
            assert!(pair.departure <= date("2026-10-10"));
            assert!(weekdays.contains(&pair.departure.weekday()));
            assert_eq!(pair.return_date, pair.departure + Duration::days(14));
        }
    }

    #[rstest]
    #[case("2026-08-21", true)] // Friday
    #[case("2026-08-22", true)] // Saturday
    #[case("2026-08-23", false)] // Sunday
    #[case("2026-08-24", false)] // Monday
    fn test_grid_departure_membership(#[case] departure: &str, #[case] expected: bool) {
        let grid = build_date_grid(date("2026-08-20"), date("2026-10-10"), 14, &fri_sat());
        let found = grid.iter().any(|pair| pair.departure == date(departure));
        assert_eq!(found, expected);
    }

    #[test]
    fn test_grid_includes_known_pair() {
        let grid = build_date_grid(date("2026-08-20"), date("2026-10-10"), 14, &fri_sat());
        assert!(grid.contains(&DatePair {
            departure: date("2026-08-21"),
            return_date: date("2026-09-04"),
        }));
    }

    #[test]
    fn test_grid_is_ordered_and_deduplicated() {
        let grid = build_date_grid(date("2026-08-20"), date("2026-10-10"), 14, &fri_sat());
        for window in grid.windows(2) {
            assert!(window[0].departure < window[1].departure);
        }
    }

    #[test]
    fn test_empty_weekday_set_allows_every_day() {
        let grid = build_date_grid(date("2026-09-01"), date("2026-09-20"), 14, &HashSet::new());
        assert_eq!(grid.len(), 20);
    }

    #[test]
    fn test_return_date_may_leave_window() {
        let end = date("2026-10-10");
        let grid = build_date_grid(date("2026-08-20"), end, 14, &fri_sat());
        let last = grid.last().unwrap();
        assert_eq!(last.departure, end); // 2026-10-10 is a Saturday
        assert!(last.return_date > end);
    }

    #[test]
    fn test_inverted_window_yields_empty_grid() {
        let grid = build_date_grid(date("2026-10-10"), date("2026-08-20"), 14, &fri_sat());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_plan_respects_budget() {
        let origins: Vec<String> = ["AUS", "IAH", "DFW", "SFO", "LAX"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let grid = build_date_grid(date("2026-09-01"), date("2026-09-20"), 14, &HashSet::new());
        assert_eq!(grid.len(), 20);

        // 5 origins x 20 pairs = 100 combinations, capped at 80
        let plan = plan_queries(&origins, &grid, 80);
        assert_eq!(plan.len(), 80);

        // Origins outer, dates inner: the first 20 entries are all AUS
        assert!(plan[..20].iter().all(|(origin, _)| origin == "AUS"));
        assert_eq!(plan[79], ("SFO".to_string(), grid[19]));

        // The fifth origin is dropped entirely
        assert!(plan.iter().all(|(origin, _)| origin != "LAX"));
    }

    #[test]
    fn test_plan_smaller_than_budget_is_complete() {
        let origins = vec!["AUS".to_string()];
        let grid = build_date_grid(date("2026-09-01"), date("2026-09-05"), 7, &HashSet::new());
        let plan = plan_queries(&origins, &grid, 80);
        assert_eq!(plan.len(), 5);
    }

    #[test]
    fn test_zero_budget_plans_nothing() {
        let origins = vec!["AUS".to_string()];
        let grid = build_date_grid(date("2026-09-01"), date("2026-09-05"), 7, &HashSet::new());
        assert!(plan_queries(&origins, &grid, 0).is_empty());
    }
}
