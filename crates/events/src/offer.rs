//! Offer inputs: the advance rate value object and the add/edit payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tradeline_core::{DomainError, DomainResult, ValueObject};

/// Fraction of a financial event's amount advanced by a financing offer.
///
/// Always in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AdvanceRate(f64);

impl AdvanceRate {
    pub fn new(rate: f64) -> DomainResult<Self> {
        if !rate.is_finite() || rate <= 0.0 || rate > 1.0 {
            return Err(DomainError::invalid_input(format!(
                "advance_rate must be in (0, 1], got {rate}"
            )));
        }
        Ok(Self(rate))
    }

    /// Build from a whole-number style percentage as entered in the offer form
    /// (`1..=100`).
    pub fn from_percent(percent: f64) -> DomainResult<Self> {
        if !percent.is_finite() || !(1.0..=100.0).contains(&percent) {
            return Err(DomainError::invalid_input(format!(
                "advance rate percentage must be between 1 and 100, got {percent}"
            )));
        }
        Self::new(percent / 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Percentage rounded to a whole number, for display.
    pub fn whole_percent(&self) -> u32 {
        self.as_percent().round() as u32
    }
}

impl ValueObject for AdvanceRate {}

impl TryFrom<f64> for AdvanceRate {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdvanceRate> for f64 {
    fn from(value: AdvanceRate) -> Self {
        value.0
    }
}

impl core::fmt::Display for AdvanceRate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.whole_percent())
    }
}

/// Fields an operator supplies when attaching a new offer.
///
/// `advance_rate` is the raw fraction; it is validated when the offer is
/// created. `expiry_date >= event_date` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferFields {
    pub advance_rate: f64,
    pub event_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl OfferFields {
    pub fn validated_rate(&self) -> DomainResult<AdvanceRate> {
        AdvanceRate::new(self.advance_rate)
    }
}

/// Partial update of an offer.
///
/// Only the mergeable fields exist here; `event_id` and `parent_event_id` are
/// not patchable, and any such keys in a JSON patch are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl OfferPatch {
    pub fn is_empty(&self) -> bool {
        self.advance_rate.is_none() && self.event_date.is_none() && self.expiry_date.is_none()
    }

    pub fn validated_rate(&self) -> DomainResult<Option<AdvanceRate>> {
        self.advance_rate.map(AdvanceRate::new).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rate_bounds() {
        assert!(AdvanceRate::new(1.0).is_ok());
        assert!(AdvanceRate::new(0.01).is_ok());
        for bad in [0.0, -0.5, 1.0001, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                AdvanceRate::new(bad),
                Err(DomainError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn percent_conversion() {
        let rate = AdvanceRate::from_percent(85.0).unwrap();
        assert!((rate.value() - 0.85).abs() < 1e-12);
        assert_eq!(rate.whole_percent(), 85);
        assert_eq!(rate.to_string(), "85%");
        assert!(AdvanceRate::from_percent(0.5).is_err());
        assert!(AdvanceRate::from_percent(101.0).is_err());
    }

    #[test]
    fn rate_deserialization_is_validated() {
        assert!(serde_json::from_str::<AdvanceRate>("0.8").is_ok());
        assert!(serde_json::from_str::<AdvanceRate>("1.5").is_err());
    }

    #[test]
    fn patch_ignores_identity_keys() {
        let patch: OfferPatch = serde_json::from_str(
            r#"{"event_id": "HIJACK", "parent_event_id": "F9", "advance_rate": 0.7}"#,
        )
        .unwrap();
        assert_eq!(
            patch,
            OfferPatch {
                advance_rate: Some(0.7),
                ..OfferPatch::default()
            }
        );
    }

    #[test]
    fn empty_patch() {
        assert!(OfferPatch::default().is_empty());
        assert_eq!(OfferPatch::default().validated_rate(), Ok(None));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a rate is accepted exactly when it lies in (0, 1], and an
        /// accepted rate survives a JSON round trip unchanged.
        #[test]
        fn rate_accepted_iff_in_unit_interval(rate in -2.0f64..3.0) {
            match AdvanceRate::new(rate) {
                Ok(accepted) => {
                    prop_assert!(rate > 0.0 && rate <= 1.0);
                    let json = serde_json::to_string(&accepted).unwrap();
                    prop_assert_eq!(serde_json::from_str::<AdvanceRate>(&json).unwrap(), accepted);
                }
                Err(err) => {
                    prop_assert!(rate <= 0.0 || rate > 1.0);
                    prop_assert!(matches!(err, DomainError::InvalidInput(_)));
                }
            }
        }

        /// Property: every whole percentage in 1..=100 maps back to itself.
        #[test]
        fn whole_percentages_round_trip(percent in 1u32..=100) {
            let rate = AdvanceRate::from_percent(f64::from(percent)).unwrap();
            prop_assert_eq!(rate.whole_percent(), percent);
        }
    }
}
