//! Actual price / discount / offer price reconciliation.

use serde::{Deserialize, Serialize};

use super::format::{coerce_number, fixed2, parse_field};

/// The three mutually dependent price inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceField {
    ActualPrice,
    Discount,
    OfferPrice,
}

impl PriceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::ActualPrice => "actualPrice",
            PriceField::Discount => "discount",
            PriceField::OfferPrice => "offerPrice",
        }
    }
}

/// Keeps actual price, discount percent and offer price consistent.
///
/// Editing the discount derives the offer price, editing the offer price
/// derives the discount. Editing the actual price derives nothing on its own.
/// Derivation needs a positive actual price; otherwise every field keeps
/// whatever text was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceReconciler {
    actual_price: String,
    discount: String,
    offer_price: String,
    last_changed: Option<PriceField>,
}

impl PriceReconciler {
    /// Create a reconciler with empty fields.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actual_price(&self) -> &str {
        &self.actual_price
    }

    pub fn discount(&self) -> &str {
        &self.discount
    }

    pub fn offer_price(&self) -> &str {
        &self.offer_price
    }

    /// The field the user touched last, if any.
    pub fn last_changed(&self) -> Option<PriceField> {
        self.last_changed
    }

    /// Current text of a field.
    pub fn get(&self, field: PriceField) -> &str {
        match field {
            PriceField::ActualPrice => &self.actual_price,
            PriceField::Discount => &self.discount,
            PriceField::OfferPrice => &self.offer_price,
        }
    }

    /// Apply a user edit and recompute the dependent field.
    ///
    /// Returns the field that was rewritten, if any.
    pub fn edit(&mut self, field: PriceField, value: impl Into<String>) -> Option<PriceField> {
        let value = value.into();
        match field {
            PriceField::ActualPrice => self.actual_price = value,
            PriceField::Discount => self.discount = value,
            PriceField::OfferPrice => self.offer_price = value,
        }
        self.last_changed = Some(field);
        self.reconcile()
    }

    fn reconcile(&mut self) -> Option<PriceField> {
        let actual = parse_field(&self.actual_price).filter(|a| *a > 0.0)?;

        match self.last_changed? {
            PriceField::ActualPrice => None,
            PriceField::Discount => {
                let discount = parse_field(&self.discount).filter(|d| *d >= 0.0)?;
                self.offer_price = fixed2(actual - actual * (discount / 100.0));
                tracing::trace!(offer_price = %self.offer_price, "derived offer price");
                Some(PriceField::OfferPrice)
            }
            PriceField::OfferPrice => {
                let offer = parse_field(&self.offer_price).filter(|o| *o >= 0.0)?;
                self.discount = fixed2((actual - offer) / actual * 100.0);
                tracing::trace!(discount = %self.discount, "derived discount");
                Some(PriceField::Discount)
            }
        }
    }

    /// Offer price sent on submission.
    ///
    /// Always recomputed from the actual price and discount text, whatever
    /// the offer field currently shows. Empty inputs count as zero and
    /// unparseable inputs yield `NaN`.
    pub fn submission_offer_price(&self) -> String {
        let actual = coerce_number(&self.actual_price);
        let discount = coerce_number(&self.discount);
        fixed2(actual - actual * (discount / 100.0))
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_actual(actual: &str) -> PriceReconciler {
        let mut prices = PriceReconciler::new();
        prices.edit(PriceField::ActualPrice, actual);
        prices
    }

    #[test]
    fn test_discount_derives_offer_price() {
        let mut prices = with_actual("1000");
        let changed = prices.edit(PriceField::Discount, "20");
        assert_eq!(changed, Some(PriceField::OfferPrice));
        assert_eq!(prices.offer_price(), "800.00");
        assert_eq!(prices.last_changed(), Some(PriceField::Discount));
    }

    #[test]
    fn test_offer_price_derives_discount() {
        let mut prices = with_actual("1000");
        let changed = prices.edit(PriceField::OfferPrice, "750");
        assert_eq!(changed, Some(PriceField::Discount));
        assert_eq!(prices.discount(), "25.00");
    }

    #[test]
    fn test_actual_price_edit_derives_nothing() {
        let mut prices = with_actual("1000");
        prices.edit(PriceField::Discount, "10");
        assert_eq!(prices.offer_price(), "900.00");

        let changed = prices.edit(PriceField::ActualPrice, "2000");
        assert_eq!(changed, None);
        assert_eq!(prices.offer_price(), "900.00");
        assert_eq!(prices.discount(), "10");
    }

    #[test]
    fn test_invalid_actual_price_suppresses_recomputation() {
        for actual in ["", "abc", "0", "-50"] {
            let mut prices = with_actual(actual);
            assert_eq!(prices.edit(PriceField::Discount, "20"), None);
            assert_eq!(prices.offer_price(), "");
            assert_eq!(prices.discount(), "20");
        }
    }

    #[test]
    fn test_negative_inputs_are_held_as_typed() {
        let mut prices = with_actual("1000");
        assert_eq!(prices.edit(PriceField::Discount, "-5"), None);
        assert_eq!(prices.edit(PriceField::OfferPrice, "-1"), None);
        assert_eq!(prices.discount(), "-5");
        assert_eq!(prices.offer_price(), "-1");
    }

    #[test]
    fn test_offer_above_actual_gives_negative_discount() {
        let mut prices = with_actual("100");
        prices.edit(PriceField::OfferPrice, "150");
        assert_eq!(prices.discount(), "-50.00");

        prices.edit(PriceField::OfferPrice, "100.001");
        assert_eq!(prices.discount(), "-0.00");
    }

    #[test]
    fn test_offer_price_formula_over_grid() {
        for actual in [1.0, 99.99, 250.0, 1234.56, 1000.0] {
            for discount in [0.0, 12.5, 33.0, 50.0, 99.0, 100.0] {
                let mut prices = with_actual(&actual.to_string());
                prices.edit(PriceField::Discount, discount.to_string());
                assert_eq!(
                    prices.offer_price(),
                    fixed2(actual - actual * (discount / 100.0)),
                    "actual={} discount={}",
                    actual,
                    discount
                );
            }
        }
    }

    #[test]
    fn test_discount_formula_over_grid() {
        for actual in [10.0, 499.0, 1000.0] {
            for fraction in [0.0, 0.25, 0.5, 0.9, 1.0] {
                let offer = actual * fraction;
                let mut prices = with_actual(&actual.to_string());
                prices.edit(PriceField::OfferPrice, offer.to_string());
                assert_eq!(prices.discount(), fixed2((actual - offer) / actual * 100.0));
            }
        }
    }

    #[test]
    fn test_submission_recomputes_from_discount() {
        let mut prices = with_actual("1000");
        prices.edit(PriceField::Discount, "20");
        // Manual override of the displayed offer price loses at submit time.
        prices.offer_price = "799".to_string();
        assert_eq!(prices.submission_offer_price(), "800.00");
    }

    #[test]
    fn test_submission_with_empty_and_garbage_inputs() {
        let prices = with_actual("1000");
        assert_eq!(prices.submission_offer_price(), "1000.00");

        let prices = PriceReconciler::new();
        assert_eq!(prices.submission_offer_price(), "0.00");

        let mut prices = with_actual("1000");
        prices.edit(PriceField::Discount, "ten");
        assert_eq!(prices.submission_offer_price(), "NaN");
    }
}
