//! Carbon credit calculation
//!
//! The estimate is a fixed lookup-table multiply: per-practice rates in
//! tCO2e per acre per year, scaled by acreage and a crop multiplier,
//! priced at a flat USD rate. The tables are configuration data, frozen
//! under [`crate::constants::CREDIT_METHODOLOGY_VERSION`].

use rust_decimal::Decimal;

use crate::error::{FarmError, FarmResult};
use crate::types::{CreditEstimate, PracticeContribution};

/// Flat price per tonne CO2-equivalent
pub fn price_usd_per_tco2e() -> Decimal {
    Decimal::new(15, 0)
}

/// Annual sequestration rate for a practice, tCO2e per acre
///
/// Unknown practices return None and contribute nothing.
pub fn practice_rate(practice: &str) -> Option<Decimal> {
    let rate = match practice {
        "cover_cropping" => Decimal::new(5, 1),      // 0.5
        "no_till" => Decimal::new(3, 1),             // 0.3
        "crop_rotation" => Decimal::new(2, 1),       // 0.2
        "agroforestry" => Decimal::new(12, 1),       // 1.2
        "reduced_fertilizer" => Decimal::new(4, 1),  // 0.4
        "composting" => Decimal::new(35, 2),         // 0.35
        "water_management" => Decimal::new(25, 2),   // 0.25
        _ => return None,
    };
    Some(rate)
}

/// All practices with a defined rate
pub fn known_practices() -> &'static [&'static str] {
    &[
        "cover_cropping",
        "no_till",
        "crop_rotation",
        "agroforestry",
        "reduced_fertilizer",
        "composting",
        "water_management",
    ]
}

/// Crop multiplier applied to the summed practice rates
///
/// Unknown crops use 1.0.
pub fn crop_multiplier(crop: &str) -> Decimal {
    match crop.to_ascii_lowercase().as_str() {
        "rice" | "paddy" => Decimal::new(13, 1),
        "wheat" => Decimal::new(10, 1),
        "maize" => Decimal::new(11, 1),
        "cotton" => Decimal::new(9, 1),
        "sugarcane" => Decimal::new(12, 1),
        "pulses" => Decimal::new(115, 2),
        _ => Decimal::ONE,
    }
}

/// Estimate annual credits for a set of practices on one holding
///
/// credits = sum(practice rates) * acreage * crop multiplier.
/// Acreage must be strictly positive. Duplicate practices are counted
/// once.
pub fn estimate(practices: &[String], acreage: Decimal, crop: &str) -> FarmResult<CreditEstimate> {
    if acreage <= Decimal::ZERO {
        return Err(FarmError::Validation(format!(
            "Acreage must be positive, got {acreage}"
        )));
    }

    let multiplier = crop_multiplier(crop);
    let mut seen: Vec<&str> = Vec::with_capacity(practices.len());
    let mut breakdown = Vec::new();
    let mut total = Decimal::ZERO;

    for practice in practices {
        let practice = practice.as_str();
        if seen.contains(&practice) {
            continue;
        }
        seen.push(practice);

        let Some(rate) = practice_rate(practice) else {
            continue;
        };
        // Fixed scales keep the serialized amounts stable
        let mut credits = rate * acreage * multiplier;
        credits.rescale(4);
        total += credits;
        breakdown.push(PracticeContribution {
            practice: practice.to_string(),
            rate,
            credits_tco2e: credits,
        });
    }

    total.rescale(4);
    let mut value = total * price_usd_per_tco2e();
    value.rescale(2);

    Ok(CreditEstimate {
        credits_tco2e: total,
        value_usd: value,
        crop_multiplier: multiplier,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_documented_single_practice_value() {
        // cover_cropping on 10 acres of wheat: 0.5 * 10 * 1.0 = 5 tCO2e, 75 USD
        let est = estimate(&["cover_cropping".to_string()], dec("10"), "wheat").unwrap();
        assert_eq!(est.credits_tco2e, dec("5.0000"));
        assert_eq!(est.value_usd, dec("75.00"));
        assert_eq!(est.breakdown.len(), 1);
    }

    #[test]
    fn test_crop_multiplier_applies() {
        // no_till on 4 acres of rice: 0.3 * 4 * 1.3 = 1.56 tCO2e
        let est = estimate(&["no_till".to_string()], dec("4"), "rice").unwrap();
        assert_eq!(est.credits_tco2e, dec("1.5600"));
        assert_eq!(est.crop_multiplier, dec("1.3"));
    }

    #[test]
    fn test_practices_sum() {
        // (0.5 + 0.3 + 1.2) * 2 * 1.0 = 4.0
        let practices = vec![
            "cover_cropping".to_string(),
            "no_till".to_string(),
            "agroforestry".to_string(),
        ];
        let est = estimate(&practices, dec("2"), "millet").unwrap();
        assert_eq!(est.credits_tco2e, dec("4.0000"));
        assert_eq!(est.value_usd, dec("60.00"));
    }

    #[test]
    fn test_unknown_practice_contributes_zero() {
        let practices = vec!["no_till".to_string(), "biochar".to_string()];
        let est = estimate(&practices, dec("1"), "wheat").unwrap();
        assert_eq!(est.credits_tco2e, dec("0.3000"));
        assert_eq!(est.breakdown.len(), 1);
    }

    #[test]
    fn test_duplicate_practice_counted_once() {
        let practices = vec!["no_till".to_string(), "no_till".to_string()];
        let est = estimate(&practices, dec("1"), "wheat").unwrap();
        assert_eq!(est.credits_tco2e, dec("0.3000"));
    }

    #[test]
    fn test_unknown_crop_uses_unit_multiplier() {
        assert_eq!(crop_multiplier("turmeric"), Decimal::ONE);
    }

    #[test]
    fn test_nonpositive_acreage_rejected() {
        assert!(estimate(&["no_till".to_string()], Decimal::ZERO, "wheat").is_err());
        assert!(estimate(&["no_till".to_string()], dec("-1"), "wheat").is_err());
    }

    #[test]
    fn test_all_known_practices_have_rates() {
        for practice in known_practices() {
            assert!(practice_rate(practice).is_some(), "missing rate for {practice}");
        }
    }
}
