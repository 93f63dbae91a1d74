//! Disability-benefit work rules: Substantial Gainful Activity (SGA) limits and
//! Trial Work Period (TWP) service months.
//!
//! All amounts are monthly USD.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Service months that complete the trial work period.
pub const TWP_MONTHS: u32 = 9;

/// Rolling window, in months, that service months are counted in.
pub const TWP_WINDOW_MONTHS: i32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenefitThresholds {
    pub year: i32,
    pub sga_non_blind: f64,
    pub sga_blind: f64,
    pub twp_service_month: f64,
}

/// Sorted by year.
pub static THRESHOLDS: &[BenefitThresholds] = &[
    BenefitThresholds {
        year: 2023,
        sga_non_blind: 1470.0,
        sga_blind: 2460.0,
        twp_service_month: 1050.0,
    },
    BenefitThresholds {
        year: 2024,
        sga_non_blind: 1550.0,
        sga_blind: 2590.0,
        twp_service_month: 1110.0,
    },
    BenefitThresholds {
        year: 2025,
        sga_non_blind: 1620.0,
        sga_blind: 2700.0,
        twp_service_month: 1160.0,
    },
];

/// Thresholds for `year`; years outside the table use the nearest one.
pub fn thresholds_for(year: i32) -> &'static BenefitThresholds {
    THRESHOLDS
        .iter()
        .min_by_key(|t| (t.year - year).abs())
        .unwrap_or(&THRESHOLDS[THRESHOLDS.len() - 1])
}

impl BenefitThresholds {
    pub fn sga_limit(&self, blind: bool) -> f64 {
        if blind {
            self.sga_blind
        } else {
            self.sga_non_blind
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SgaStatus {
    AboveSga,
    BelowSga,
}

/// Gross earnings less impairment-related work expenses (IRWE), never negative.
pub fn countable_earnings(gross: f64, irwe: f64) -> f64 {
    (gross - irwe).max(0.0)
}

pub fn sga_status(countable: f64, year: i32, blind: bool) -> SgaStatus {
    if countable >= thresholds_for(year).sga_limit(blind) {
        SgaStatus::AboveSga
    } else {
        SgaStatus::BelowSga
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEarnings {
    /// First day of the month.
    pub month: NaiveDate,
    pub gross: f64,
    /// Impairment-related work expenses.
    pub irwe: f64,
}

impl MonthlyEarnings {
    pub fn countable(&self) -> f64 {
        countable_earnings(self.gross, self.irwe)
    }

    /// TWP service months are judged on gross earnings.
    pub fn is_service_month(&self) -> bool {
        self.gross >= thresholds_for(self.month.year()).twp_service_month
    }
}

fn month_index(d: NaiveDate) -> i32 {
    d.year() * 12 + d.month0() as i32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthAssessment {
    pub month: NaiveDate,
    pub gross: f64,
    pub countable: f64,
    pub service_month: bool,
    pub sga: SgaStatus,
}

/// Trial work period progress.
///
/// The period completes in the first month that brings any rolling 60-month
/// window to nine service months, and stays complete after that. Until then,
/// only service months in the window ending at the latest month count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialWorkTracker {
    /// Every service month seen, oldest first.
    pub service_months: Vec<NaiveDate>,
    pub window_end: Option<NaiveDate>,
}

impl TrialWorkTracker {
    pub fn from_months(records: &[MonthlyEarnings]) -> Self {
        let mut service_months: Vec<NaiveDate> = records
            .iter()
            .filter(|r| r.is_service_month())
            .map(|r| r.month)
            .collect();
        service_months.sort();
        service_months.dedup();

        Self {
            service_months,
            window_end: records.iter().map(|r| r.month).max(),
        }
    }

    /// Month in which the ninth service month of some 60-month window landed.
    pub fn completed_in(&self) -> Option<NaiveDate> {
        let n = TWP_MONTHS as usize;
        self.service_months
            .windows(n)
            .find(|w| month_index(w[n - 1]) - month_index(w[0]) < TWP_WINDOW_MONTHS)
            .map(|w| w[n - 1])
    }

    pub fn is_complete(&self) -> bool {
        self.completed_in().is_some()
    }

    /// Service months in the current window, or all nine once complete.
    pub fn used(&self) -> u32 {
        if self.is_complete() {
            return TWP_MONTHS;
        }
        let Some(end) = self.window_end else {
            return 0;
        };
        let end_idx = month_index(end);
        self.service_months
            .iter()
            .filter(|m| end_idx - month_index(**m) < TWP_WINDOW_MONTHS)
            .count() as u32
    }

    pub fn remaining(&self) -> u32 {
        TWP_MONTHS.saturating_sub(self.used())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenefitsReport {
    pub blind: bool,
    pub months: Vec<MonthAssessment>,
    pub trial_work: TrialWorkTracker,
}

impl BenefitsReport {
    pub fn assess(records: &[MonthlyEarnings], blind: bool) -> Self {
        let mut sorted = records.to_vec();
        sorted.sort_by_key(|r| r.month);

        let months = sorted
            .iter()
            .map(|r| {
                let countable = r.countable();
                MonthAssessment {
                    month: r.month,
                    gross: r.gross,
                    countable,
                    service_month: r.is_service_month(),
                    sga: sga_status(countable, r.month.year(), blind),
                }
            })
            .collect();

        Self {
            blind,
            months,
            trial_work: TrialWorkTracker::from_months(&sorted),
        }
    }

    pub fn months_above_sga(&self) -> usize {
        self.months
            .iter()
            .filter(|m| m.sga == SgaStatus::AboveSga)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32, gross: f64) -> MonthlyEarnings {
        MonthlyEarnings {
            month: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            gross,
            irwe: 0.0,
        }
    }

    #[test]
    fn threshold_lookup_uses_nearest_year() {
        assert_eq!(thresholds_for(2024).sga_non_blind, 1550.0);
        assert_eq!(thresholds_for(2019).year, 2023);
        assert_eq!(thresholds_for(2030).year, 2025);
    }

    #[test]
    fn sga_boundary_is_inclusive() {
        assert_eq!(sga_status(1620.0, 2025, false), SgaStatus::AboveSga);
        assert_eq!(sga_status(1619.99, 2025, false), SgaStatus::BelowSga);
        assert_eq!(sga_status(2000.0, 2025, true), SgaStatus::BelowSga);
    }

    #[test]
    fn irwe_reduces_countable_earnings() {
        assert_eq!(countable_earnings(1800.0, 300.0), 1500.0);
        assert_eq!(countable_earnings(100.0, 300.0), 0.0);
    }

    #[test]
    fn service_months_use_year_specific_threshold() {
        assert!(month(2024, 6, 1110.0).is_service_month());
        assert!(!month(2025, 6, 1110.0).is_service_month());
    }

    #[test]
    fn twp_completes_after_nine_service_months() {
        let records: Vec<_> = (1..=10).map(|m| month(2025, m, 1200.0)).collect();
        let twp = TrialWorkTracker::from_months(&records);
        assert_eq!(twp.used(), 9);
        assert!(twp.is_complete());
        assert_eq!(twp.remaining(), 0);
        assert_eq!(twp.completed_in(), NaiveDate::from_ymd_opt(2025, 9, 1));
    }

    #[test]
    fn months_outside_window_do_not_count() {
        let records = vec![month(2020, 1, 5000.0), month(2024, 12, 1200.0), month(2025, 1, 1200.0)];
        let twp = TrialWorkTracker::from_months(&records);
        assert_eq!(twp.used(), 2);
        assert_eq!(twp.remaining(), 7);
    }

    #[test]
    fn completion_survives_leaving_the_window() {
        let mut records: Vec<_> = (1..=9).map(|m| month(2015, m, 1200.0)).collect();
        records.push(month(2025, 6, 200.0));
        let twp = TrialWorkTracker::from_months(&records);
        assert!(twp.is_complete());
        assert_eq!(twp.completed_in(), NaiveDate::from_ymd_opt(2015, 9, 1));
        assert_eq!(twp.remaining(), 0);
    }

    #[test]
    fn spread_out_service_months_do_not_complete() {
        // Nine service months, but never nine inside one 60-month window.
        let records: Vec<_> = (0..9).map(|i| month(2000 + i * 3, 1, 5000.0)).collect();
        let twp = TrialWorkTracker::from_months(&records);
        assert!(!twp.is_complete());
        assert_eq!(twp.completed_in(), None);
        assert_eq!(twp.used(), 2);
    }

    #[test]
    fn report_sorts_months() {
        let records = vec![month(2025, 3, 1700.0), month(2025, 1, 500.0)];
        let report = BenefitsReport::assess(&records, false);
        assert_eq!(report.months[0].month, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(report.months_above_sga(), 1);
        assert_eq!(report.trial_work.used(), 1);
    }

    #[test]
    fn empty_history() {
        let twp = TrialWorkTracker::from_months(&[]);
        assert_eq!(twp.used(), 0);
        assert_eq!(twp.window_end, None);
    }
}
