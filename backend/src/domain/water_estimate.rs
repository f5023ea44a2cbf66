//! Household water-use estimator.
//!
//! Rough daily/weekly/monthly litres from shower time, toilet flushes and
//! dish-washing time, using fixed average flow rates.

use tracing::info;

use shared::{SavedWaterEstimate, WaterUseBreakdown, WaterUseEstimate};

use crate::domain::commands::water::WaterHabits;
use crate::domain::current_timestamp;
use crate::storage::keys::WATER_ESTIMATES;
use crate::storage::LocalRecordStore;

/// Litres per minute
pub const SHOWER_FLOW: f64 = 9.0;
/// Litres per flush
pub const FLUSH_VOLUME: f64 = 6.0;
/// Litres per 10 minutes of running tap
pub const DISH_FLOW_PER_10_MIN: f64 = 8.0;

/// Minutes cut from the shower in the savings tip
const TIP_SHOWER_MINUTES: f64 = 2.0;

pub const ESTIMATE_SAVED_MESSAGE: &str = "Estimate saved locally ✅";
pub const ESTIMATE_NOT_SAVED_MESSAGE: &str = "Could not save the estimate locally.";

/// Upper bound for every daily input (minutes, or flushes at one a minute)
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Clamp a daily input into `0..=MINUTES_PER_DAY`; NaN counts as zero
fn daily_amount(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MINUTES_PER_DAY)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimate water use. Negative or NaN inputs count as zero and inputs are
/// capped at [`MINUTES_PER_DAY`], so every figure stays finite. Totals are
/// rounded to one decimal, the breakdown is not.
pub fn estimate_water_use(habits: &WaterHabits) -> WaterUseEstimate {
    let shower = daily_amount(habits.shower_minutes) * SHOWER_FLOW;
    let toilet = daily_amount(habits.flushes) * FLUSH_VOLUME;
    let dishes = daily_amount(habits.dishes_minutes) * (DISH_FLOW_PER_10_MIN / 10.0);

    let daily = round1(shower + toilet + dishes);
    WaterUseEstimate {
        daily,
        weekly: round1(daily * 7.0),
        monthly: round1(daily * 30.0),
        breakdown: WaterUseBreakdown { shower, toilet, dishes },
    }
}

pub fn savings_tip() -> String {
    format!(
        "Tip: cutting shower time by {} min saves ~{} L per shower.",
        TIP_SHOWER_MINUTES,
        TIP_SHOWER_MINUTES * SHOWER_FLOW
    )
}

#[derive(Clone)]
pub struct WaterEstimateService {
    store: LocalRecordStore,
}

impl WaterEstimateService {
    pub fn new(store: LocalRecordStore) -> Self {
        Self { store }
    }

    pub fn estimate(&self, habits: &WaterHabits) -> WaterUseEstimate {
        estimate_water_use(habits)
    }

    /// Estimate and keep the result in the estimate history
    pub fn save_estimate(&self, habits: &WaterHabits) -> (WaterUseEstimate, bool) {
        let res = estimate_water_use(habits);
        let record = SavedWaterEstimate {
            shower: daily_amount(habits.shower_minutes),
            flushes: daily_amount(habits.flushes),
            dishes: daily_amount(habits.dishes_minutes),
            res: res.clone(),
            at: current_timestamp(),
        };
        let saved = self.store.prepend(&WATER_ESTIMATES, record);
        info!(daily = res.daily, saved, "water estimate saved");
        (res, saved)
    }

    /// Saved estimates, newest first
    pub fn saved_estimates(&self) -> Vec<SavedWaterEstimate> {
        self.store.load(&WATER_ESTIMATES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use std::sync::Arc;

    fn habits(shower_minutes: f64, flushes: f64, dishes_minutes: f64) -> WaterHabits {
        WaterHabits {
            shower_minutes,
            flushes,
            dishes_minutes,
        }
    }

    #[test]
    fn test_typical_household() {
        let estimate = estimate_water_use(&habits(8.0, 5.0, 15.0));
        // 72 + 30 + 12
        assert_eq!(estimate.breakdown.shower, 72.0);
        assert_eq!(estimate.breakdown.toilet, 30.0);
        assert!((estimate.breakdown.dishes - 12.0).abs() < 1e-9);
        assert_eq!(estimate.daily, 114.0);
        assert_eq!(estimate.weekly, 798.0);
        assert_eq!(estimate.monthly, 3420.0);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        let estimate = estimate_water_use(&habits(0.0, 0.0, 3.0));
        assert_eq!(estimate.daily, 2.4);
        assert_eq!(estimate.weekly, 16.8);
        assert_eq!(estimate.monthly, 72.0);

        // 0.25 min * 9 = 2.25, halves round up
        let estimate = estimate_water_use(&habits(0.25, 0.0, 0.0));
        assert_eq!(estimate.daily, 2.3);
    }

    #[test]
    fn test_negative_and_nan_inputs_count_as_zero() {
        let estimate = estimate_water_use(&habits(-5.0, f64::NAN, 0.0));
        assert_eq!(estimate.daily, 0.0);
        assert_eq!(estimate.breakdown.shower, 0.0);
        assert_eq!(estimate.breakdown.toilet, 0.0);
    }

    #[test]
    fn test_huge_inputs_are_capped_at_a_day() {
        let estimate = estimate_water_use(&habits(1e308, f64::INFINITY, 2000.0));
        assert_eq!(estimate.breakdown.shower, 1440.0 * 9.0);
        assert_eq!(estimate.breakdown.toilet, 1440.0 * 6.0);
        assert!(estimate.daily.is_finite());
        assert!(estimate.monthly.is_finite());
    }

    #[test]
    fn test_saved_huge_estimate_reads_back() {
        let store = LocalRecordStore::new(Arc::new(InMemoryStorage::new()));
        let service = WaterEstimateService::new(store);

        let (estimate, saved) = service.save_estimate(&habits(1e308, 1.0, 0.0));
        assert!(saved);

        let history = service.saved_estimates();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].shower, MINUTES_PER_DAY);
        assert_eq!(history[0].res, estimate);
    }

    #[test]
    fn test_savings_tip() {
        assert_eq!(savings_tip(), "Tip: cutting shower time by 2 min saves ~18 L per shower.");
    }

    #[test]
    fn test_save_estimate_keeps_inputs() {
        let store = LocalRecordStore::new(Arc::new(InMemoryStorage::new()));
        let service = WaterEstimateService::new(store);

        let (estimate, saved) = service.save_estimate(&habits(5.0, 4.0, 10.0));
        assert!(saved);

        let history = service.saved_estimates();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].shower, 5.0);
        assert_eq!(history[0].flushes, 4.0);
        assert_eq!(history[0].res, estimate);
    }
}
