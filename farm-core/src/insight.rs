//! Synthetic satellite observation generator
//!
//! Demo data source used when the satellite vendor is unreachable or no
//! credentials are configured. Scores are drawn from a PRNG seeded by
//! (farmer_id, date), so the same farmer and day always produce the same
//! observation, with a month-of-year offset so values follow a plausible
//! growing-season curve.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::types::{FarmerId, HealthStatus, Observation};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn seed_for(farmer_id: &FarmerId, observed_on: NaiveDate) -> u64 {
    let key = format!("{}:{}", farmer_id.0, observed_on);
    fnv1a(key.as_bytes())
}

/// Seasonal NDVI offset by calendar month, peaking mid-monsoon
fn seasonal_offset(month: u32) -> f64 {
    match month {
        1 | 2 => -0.05,
        3 | 4 => 0.00,
        5 | 6 => 0.05,
        7 | 8 | 9 => 0.10,
        10 => 0.05,
        _ => -0.02,
    }
}

fn clamp_unit(value: f64) -> Decimal {
    Decimal::from_f64_retain(value.clamp(0.0, 1.0))
        .unwrap_or(Decimal::ZERO)
        .round_dp(3)
}

/// Generate a deterministic observation for a farmer on a given date
pub fn generate(farmer_id: &FarmerId, observed_on: NaiveDate) -> Observation {
    let mut rng = StdRng::seed_from_u64(seed_for(farmer_id, observed_on));
    let ndvi = rng.gen_range(0.15..0.85) + seasonal_offset(observed_on.month());
    let moisture = rng.gen_range(0.10..0.70);
    Observation {
        ndvi: clamp_unit(ndvi),
        moisture: clamp_unit(moisture),
    }
}

/// Recommendation text for a health/moisture combination
///
/// Static lookup, keyed by NDVI bucket and a coarse moisture band
/// (low < 0.25, adequate < 0.5, high otherwise).
pub fn recommendation_for(health: HealthStatus, moisture: Decimal) -> &'static str {
    let low = moisture < Decimal::new(25, 2);
    let high = moisture >= Decimal::new(5, 1);
    match health {
        HealthStatus::Bare => {
            if low {
                "Field appears fallow and dry. Consider soil moisture conservation before the next sowing window."
            } else {
                "Field appears fallow. Conditions are suitable for land preparation."
            }
        }
        HealthStatus::Stressed => {
            if low {
                "Crop is under stress with low soil moisture. Irrigate within the next 2-3 days if possible."
            } else if high {
                "Crop is stressed despite adequate water. Check for pest damage or nutrient deficiency."
            } else {
                "Crop vigor is below normal. Scout the field and consider a foliar nutrient application."
            }
        }
        HealthStatus::Moderate => {
            if low {
                "Growth is on track but moisture is dropping. Plan irrigation within the week."
            } else {
                "Growth is on track. Maintain the current schedule and monitor for weeds."
            }
        }
        HealthStatus::Healthy => {
            if high {
                "Crop is thriving. Watch drainage after heavy rain to avoid waterlogging."
            } else {
                "Crop is thriving. No action needed; next review in 10 days."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let farmer = FarmerId("farmer_0001".to_string());
        let day = date(2025, 7, 14);
        let a = generate(&farmer, day);
        let b = generate(&farmer, day);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_inputs_differ() {
        let farmer = FarmerId("farmer_0001".to_string());
        let other = FarmerId("farmer_0002".to_string());
        let day = date(2025, 7, 14);
        assert_ne!(generate(&farmer, day), generate(&other, day));
        assert_ne!(generate(&farmer, day), generate(&farmer, date(2025, 7, 15)));
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let farmer = FarmerId("farmer_range".to_string());
        for month in 1..=12 {
            for day in [1, 15, 28] {
                let obs = generate(&farmer, date(2025, month, day));
                assert!(obs.ndvi >= Decimal::ZERO && obs.ndvi <= Decimal::ONE);
                assert!(obs.moisture >= Decimal::ZERO && obs.moisture <= Decimal::ONE);
            }
        }
    }

    #[test]
    fn test_recommendation_lookup_covers_all_buckets() {
        for health in [
            HealthStatus::Bare,
            HealthStatus::Stressed,
            HealthStatus::Moderate,
            HealthStatus::Healthy,
        ] {
            for moisture in ["0.1", "0.3", "0.6"] {
                let text = recommendation_for(health, moisture.parse().unwrap());
                assert!(!text.is_empty());
            }
        }
    }
}
