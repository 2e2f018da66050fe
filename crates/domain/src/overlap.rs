// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day overlap between a course cycle and the analysis period.
//!
//! The overlap is split into five components, one per relative position
//! of the cycle against the period. Each component has its own guard and
//! the guards are evaluated independently; callers sum whichever fire.

use crate::types::AnalysisPeriod;
use serde::{Deserialize, Serialize};
use time::Date;

/// The five day-overlap components (DACP1..DACP5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayOverlap {
    /// DACP1: the cycle starts before and ends after the period.
    #[serde(rename = "DACP1")]
    pub spans_period: i64,
    /// DACP2: the cycle starts inside the period and ends after it.
    #[serde(rename = "DACP2")]
    pub starts_inside: i64,
    /// DACP3: the cycle starts before the period and ends inside it.
    #[serde(rename = "DACP3")]
    pub ends_inside: i64,
    /// DACP4: the cycle lies entirely inside the period.
    #[serde(rename = "DACP4")]
    pub fully_inside: i64,
    /// DACP5: the cycle ends before the period starts.
    ///
    /// Not a day count: half the period length, used as a stale-cycle
    /// signal by the equalization pipeline.
    #[serde(rename = "DACP5")]
    pub precedes_period: f64,
}

impl DayOverlap {
    /// Returns the sum of all five components.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total(&self) -> f64 {
        let counted: i64 =
            self.spans_period + self.starts_inside + self.ends_inside + self.fully_inside;
        counted as f64 + self.precedes_period
    }
}

/// Counts the days from `start` to `end`, both inclusive.
///
/// Inverted ranges yield zero or a negative count.
#[must_use]
pub fn inclusive_days(start: Date, end: Date) -> i64 {
    (end - start).whole_days() + 1
}

/// Calculates the five overlap components of a cycle against a period.
///
/// # Arguments
///
/// * `cycle_start` - First day of the cycle (DIC)
/// * `cycle_end` - Last day of the cycle (DTC)
/// * `period` - The analysis period (DIP..DFP)
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn calculate_day_overlap(
    cycle_start: Date,
    cycle_end: Date,
    period: &AnalysisPeriod,
) -> DayOverlap {
    let dic: Date = cycle_start;
    let dtc: Date = cycle_end;
    let dip: Date = period.start();
    let dfp: Date = period.end();

    let spans_period: i64 = if dic < dip && dtc > dfp {
        inclusive_days(dip, dfp)
    } else {
        0
    };

    let starts_inside: i64 = if dic >= dip && dtc > dfp && dic < dfp {
        inclusive_days(dic, dfp)
    } else {
        0
    };

    let ends_inside: i64 = if dic < dip && dtc <= dfp && dtc >= dip {
        inclusive_days(dip, dtc)
    } else {
        0
    };

    let fully_inside: i64 = if dic >= dip && dtc <= dfp {
        inclusive_days(dic, dtc)
    } else {
        0
    };

    let precedes_period: f64 = if dic < dip && dtc < dip {
        inclusive_days(dip, dfp) as f64 / 2.0
    } else {
        0.0
    };

    DayOverlap {
        spans_period,
        starts_inside,
        ends_inside,
        fully_inside,
        precedes_period,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::Duration;
    use time::macros::date;

    fn period_2024() -> AnalysisPeriod {
        AnalysisPeriod::for_year(2024).unwrap()
    }

    #[test]
    fn test_inclusive_days() {
        assert_eq!(inclusive_days(date!(2024 - 01 - 01), date!(2024 - 01 - 01)), 1);
        assert_eq!(inclusive_days(date!(2024 - 01 - 01), date!(2024 - 12 - 31)), 366);
        assert_eq!(inclusive_days(date!(2024 - 01 - 02), date!(2024 - 01 - 01)), 0);
        assert_eq!(inclusive_days(date!(2024 - 01 - 10), date!(2024 - 01 - 01)), -8);
    }

    #[test]
    fn test_cycle_spans_period() {
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2023 - 03 - 01), date!(2025 - 02 - 28), &period_2024());
        assert_eq!(overlap.spans_period, 366);
        assert_eq!(overlap.starts_inside, 0);
        assert_eq!(overlap.ends_inside, 0);
        assert_eq!(overlap.fully_inside, 0);
        assert!(overlap.precedes_period.abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_starts_inside_period() {
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2024 - 08 - 01), date!(2026 - 07 - 31), &period_2024());
        // Aug 1 .. Dec 31 inclusive
        assert_eq!(overlap.starts_inside, 153);
        assert!((overlap.total() - 153.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_ends_inside_period() {
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2022 - 08 - 01), date!(2024 - 07 - 31), &period_2024());
        // Jan 1 .. Jul 31 inclusive in a leap year
        assert_eq!(overlap.ends_inside, 213);
        assert!((overlap.total() - 213.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_fully_inside_period() {
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2024 - 01 - 01), date!(2024 - 12 - 31), &period_2024());
        assert_eq!(overlap.fully_inside, 366);
        assert_eq!(overlap.spans_period, 0);
    }

    #[test]
    fn test_cycle_precedes_period() {
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2023 - 01 - 01), date!(2023 - 06 - 30), &period_2024());
        assert!((overlap.precedes_period - 183.0).abs() < f64::EPSILON);
        assert!((overlap.total() - 183.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_precedes_common_year_is_fractional() {
        let period: AnalysisPeriod = AnalysisPeriod::for_year(2023).unwrap();
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2021 - 01 - 01), date!(2022 - 06 - 30), &period);
        assert!((overlap.precedes_period - 182.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_after_period_counts_nothing() {
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2025 - 02 - 01), date!(2025 - 12 - 01), &period_2024());
        assert!(overlap.total().abs() < f64::EPSILON);
    }

    #[test]
    fn test_cycle_starting_on_last_day_and_ending_after() {
        // starts_inside requires the cycle to start strictly before the period end
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2024 - 12 - 31), date!(2025 - 06 - 30), &period_2024());
        assert!(overlap.total().abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_cycle_inside_period_yields_negative_count() {
        // Guards are evaluated literally; degenerate input is not rejected
        let overlap: DayOverlap =
            calculate_day_overlap(date!(2024 - 06 - 10), date!(2024 - 06 - 01), &period_2024());
        assert_eq!(overlap.fully_inside, -8);
    }

    #[test]
    fn test_at_most_one_component_fires_for_well_ordered_cycles() {
        let period: AnalysisPeriod = period_2024();
        let mut start: Date = date!(2022 - 11 - 15);

        while start <= date!(2025 - 02 - 15) {
            for length in [0_i64, 1, 30, 200, 400, 900] {
                let end: Date = start + Duration::days(length);
                let overlap: DayOverlap = calculate_day_overlap(start, end, &period);

                let fired: usize = [
                    overlap.spans_period,
                    overlap.starts_inside,
                    overlap.ends_inside,
                    overlap.fully_inside,
                ]
                .iter()
                .filter(|days| **days != 0)
                .count();

                assert!(fired <= 1, "{start} .. {end}: {overlap:?}");
                if fired == 1 {
                    assert!(overlap.precedes_period.abs() < f64::EPSILON);
                }
            }
            start += Duration::days(13);
        }
    }

    #[test]
    fn test_counted_days_never_exceed_period_length() {
        let period: AnalysisPeriod = period_2024();
        let mut start: Date = date!(2023 - 06 - 01);

        while start <= date!(2024 - 12 - 31) {
            let end: Date = start + Duration::days(500);
            let overlap: DayOverlap = calculate_day_overlap(start, end, &period);
            assert!(overlap.total() <= 366.0, "{start}: {overlap:?}");
            start += Duration::days(7);
        }
    }
}
