//! The period axis.
//!
//! [`build_axis`] turns the set of observed periods into the ascending,
//! gap-free row axis of a report. Months with no files still get a row, which
//! is how a missing document becomes visible.
//!
//! Tokens whose month is not a calendar month (`00`, `13`..`99`) are kept:
//! the calendar walk runs between the nearest legal months, and each observed
//! illegal token is merged in at its lexicographic position.

use dg_core::Period;

/// Builds the ascending, duplicate-free period axis for `observed`.
///
/// Returns an empty axis for empty input.
///
/// # Examples
///
/// ```
/// use dg_core::Period;
/// use dg_scanner::build_axis;
///
/// let observed = ["202311", "202402"].map(|t| t.parse::<Period>().unwrap());
/// let axis: Vec<String> = build_axis(observed).iter().map(ToString::to_string).collect();
/// assert_eq!(axis, ["202311", "202312", "202401", "202402"]);
/// ```
#[must_use]
pub fn build_axis(observed: impl IntoIterator<Item = Period>) -> Vec<Period> {
    let mut observed: Vec<Period> = observed.into_iter().collect();
    observed.sort_unstable();
    observed.dedup();

    let (Some(&min), Some(&max)) = (observed.first(), observed.last()) else {
        return Vec::new();
    };

    let mut axis = calendar_range(clamp_start(min), clamp_end(max));
    axis.extend(observed.into_iter().filter(|p| !p.is_calendar_month()));
    axis.sort_unstable();
    axis.dedup();
    axis
}

/// Every calendar month from `start` to `end` inclusive.
fn calendar_range(start: Option<Period>, end: Option<Period>) -> Vec<Period> {
    let (Some(mut current), Some(end)) = (start, end) else {
        return Vec::new();
    };

    let mut months = Vec::new();
    while current <= end {
        months.push(current);
        match current.next_calendar_month() {
            Some(next) => current = next,
            None => break,
        }
    }
    months
}

/// The first calendar month at or after `period`.
fn clamp_start(period: Period) -> Option<Period> {
    if period.is_calendar_month() {
        Some(period)
    } else {
        period.next_calendar_month()
    }
}

/// The last calendar month at or before `period`.
fn clamp_end(period: Period) -> Option<Period> {
    match period.month() {
        1..=12 => Some(period),
        0 => Period::new(period.year().checked_sub(1)?, 12).ok(),
        _ => Period::new(period.year(), 12).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periods(tokens: &[&str]) -> Vec<Period> {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    fn tokens(axis: &[Period]) -> String {
        axis.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_empty_axis() {
        assert!(build_axis(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_period() {
        let axis = build_axis(periods(&["202405"]));
        assert_eq!(tokens(&axis), "202405");
    }

    #[test]
    fn test_fills_gaps() {
        let axis = build_axis(periods(&["202403", "202401"]));
        assert_eq!(tokens(&axis), "202401 202402 202403");
    }

    #[test]
    fn test_year_rollover() {
        let axis = build_axis(periods(&["202311", "202402", "202311"]));
        insta::assert_snapshot!(tokens(&axis), @"202311 202312 202401 202402");
    }

    #[test]
    fn test_axis_length_is_inclusive_month_count() {
        let axis = build_axis(periods(&["201901", "202412"]));
        assert_eq!(axis.len(), 6 * 12);
        assert!(axis.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_illegal_month_thirteen() {
        let axis = build_axis(periods(&["202411", "202413", "202502"]));
        insta::assert_snapshot!(tokens(&axis), @"202411 202412 202413 202501 202502");
    }

    #[test]
    fn test_illegal_month_alone() {
        let axis = build_axis(periods(&["202413"]));
        assert_eq!(tokens(&axis), "202413");

        let axis = build_axis(periods(&["202400"]));
        assert_eq!(tokens(&axis), "202400");
    }

    #[test]
    fn test_illegal_month_zero_at_start() {
        let axis = build_axis(periods(&["202400", "202402"]));
        assert_eq!(tokens(&axis), "202400 202401 202402");
    }

    #[test]
    fn test_illegal_bounds_on_both_sides() {
        let axis = build_axis(periods(&["202399", "202400"]));
        assert_eq!(tokens(&axis), "202399 202400");
    }

    #[test]
    fn test_last_representable_year() {
        let axis = build_axis(periods(&["999911", "999912"]));
        assert_eq!(tokens(&axis), "999911 999912");
    }

    #[test]
    fn test_first_representable_year() {
        let axis = build_axis(periods(&["000000", "000001"]));
        assert_eq!(tokens(&axis), "000000 000001");
    }
}
