//! Carbon credit enrollment types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{CreditId, FarmerId};

/// Tri-state verification status
///
/// pending -> verified | rejected only; a decided enrollment never
/// returns to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: VerificationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Verified) | (Self::Pending, Self::Rejected)
        )
    }
}

/// One farmer enrollment in the carbon program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRecord {
    pub credit_id: CreditId,
    pub farmer_id: FarmerId,
    /// Self-reported practices ("cover_cropping", "no_till", ...)
    pub practices: Vec<String>,
    pub acreage: Decimal,
    pub crop: String,
    /// Estimated annual credits in tonnes CO2-equivalent
    pub credits_tco2e: Decimal,
    /// Estimated annual value in USD
    pub value_usd: Decimal,
    pub verification_status: VerificationStatus,
    /// Reference returned by the carbon registry, when submission succeeded
    pub registry_ref: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contribution of one practice to an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeContribution {
    pub practice: String,
    /// Rate in tCO2e per acre per year
    pub rate: Decimal,
    /// rate * acreage * crop multiplier
    pub credits_tco2e: Decimal,
}

/// Result of a credit calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditEstimate {
    pub credits_tco2e: Decimal,
    pub value_usd: Decimal,
    pub crop_multiplier: Decimal,
    pub breakdown: Vec<PracticeContribution>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_transitions() {
        assert!(VerificationStatus::Pending.can_transition_to(VerificationStatus::Verified));
        assert!(VerificationStatus::Pending.can_transition_to(VerificationStatus::Rejected));
        assert!(!VerificationStatus::Verified.can_transition_to(VerificationStatus::Pending));
        assert!(!VerificationStatus::Rejected.can_transition_to(VerificationStatus::Verified));
        assert!(!VerificationStatus::Verified.can_transition_to(VerificationStatus::Rejected));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Verified,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(VerificationStatus::parse(status.as_str()), Some(status));
        }
    }
}
