//! Water-quality checker.
//!
//! Classifies pH, turbidity and nitrate readings against typical
//! drinking-water guidance and keeps a short history of checks.

use tracing::info;

use shared::WaterCheck;

use crate::domain::commands::water::{WaterCheckReport, WaterSample};
use crate::domain::current_timestamp;
use crate::error::ValidationError;
use crate::storage::keys::WATER_CHECKS;
use crate::storage::LocalRecordStore;

pub const PH_SAFE_MIN: f64 = 6.5;
pub const PH_SAFE_MAX: f64 = 8.5;
/// NTU
pub const TURBIDITY_LOW_MAX: f64 = 5.0;
/// NTU
pub const TURBIDITY_MODERATE_MAX: f64 = 50.0;
/// mg/L
pub const NITRATE_SAFE_MAX: f64 = 10.0;

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

pub fn classify_ph(ph: f64) -> &'static str {
    if (PH_SAFE_MIN..=PH_SAFE_MAX).contains(&ph) {
        "pH: within typical safe range (6.5–8.5)."
    } else if ph < PH_SAFE_MIN {
        "pH: acidic — may be a concern for pipes and ecosystems."
    } else {
        "pH: alkaline — could affect taste and treatment needs."
    }
}

pub fn classify_turbidity(turbidity: f64) -> &'static str {
    if turbidity <= TURBIDITY_LOW_MAX {
        "Turbidity: low — water looks clear."
    } else if turbidity <= TURBIDITY_MODERATE_MAX {
        "Turbidity: moderate — may indicate particles; treatment recommended."
    } else {
        "Turbidity: high — unsafe without treatment."
    }
}

pub fn classify_nitrate(nitrate: f64) -> &'static str {
    if nitrate <= NITRATE_SAFE_MAX {
        "Nitrate: within typical safe limits for drinking water (≤10 mg/L)."
    } else {
        "Nitrate: elevated — may be unsafe for infants and should be investigated."
    }
}

/// One message per measurement present, in pH, turbidity, nitrate order
pub fn classify(sample: &WaterSample) -> Result<Vec<String>, ValidationError> {
    let ph = present(sample.ph);
    let turbidity = present(sample.turbidity);
    let nitrate = present(sample.nitrate);

    if ph.is_none() && turbidity.is_none() && nitrate.is_none() {
        return Err(ValidationError::NoMeasurements);
    }

    let messages = [
        ph.map(classify_ph),
        turbidity.map(classify_turbidity),
        nitrate.map(classify_nitrate),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect();

    Ok(messages)
}

#[derive(Clone)]
pub struct WaterQualityService {
    store: LocalRecordStore,
}

impl WaterQualityService {
    pub fn new(store: LocalRecordStore) -> Self {
        Self { store }
    }

    /// Classify `sample` and save it to the check history
    pub fn check(&self, sample: WaterSample) -> Result<WaterCheckReport, ValidationError> {
        let messages = classify(&sample)?;

        let record = WaterCheck {
            ph: present(sample.ph),
            turbidity: present(sample.turbidity),
            nitrate: present(sample.nitrate),
            at: current_timestamp(),
        };
        let saved = self.store.prepend(&WATER_CHECKS, record);
        info!(measurements = messages.len(), saved, "water quality check completed");

        Ok(WaterCheckReport { messages, saved })
    }

    /// Saved checks, newest first
    pub fn recent_checks(&self) -> Vec<WaterCheck> {
        self.store.load(&WATER_CHECKS)
    }
}
