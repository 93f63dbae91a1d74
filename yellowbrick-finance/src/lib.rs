pub mod benefits;
pub mod earnings;
pub mod entity_tax;

pub use benefits::{
    countable_earnings, sga_status, thresholds_for, BenefitThresholds, BenefitsReport,
    MonthAssessment, MonthlyEarnings, SgaStatus, TrialWorkTracker, TWP_MONTHS,
    TWP_WINDOW_MONTHS,
};
pub use earnings::parse_earnings_csv;
pub use entity_tax::EntityType;
