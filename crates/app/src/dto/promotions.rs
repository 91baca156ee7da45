//! Promotion DTOs.

use decimal_percentage::Percentage;
use encore::{
    discounts::PromotionDiscount,
    promotions::{PromotionCode, PromotionId, UsageBudget, ValidityWindow},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::dto::{NormalizeError, RawAmount, RawId, first_present, fold_variant, required};

/// Promotion as returned by `POST /promotions/validate`.
///
/// Every spelling is read independently; see [`normalize_promotion`] for
/// which one wins when several are sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPromotion {
    pub id: Option<RawId>,

    #[serde(rename = "_id")]
    pub object_id: Option<RawId>,

    #[serde(alias = "promotion_id")]
    pub promotion_id: Option<RawId>,

    pub code: Option<String>,

    #[serde(alias = "promo_code")]
    pub promo_code: Option<String>,

    #[serde(alias = "discount_type")]
    pub discount_type: Option<String>,

    #[serde(rename = "type")]
    pub type_name: Option<String>,

    #[serde(alias = "discount_value")]
    pub discount_value: Option<RawAmount>,

    pub value: Option<RawAmount>,

    pub discount: Option<RawAmount>,

    #[serde(alias = "max_discount")]
    pub max_discount: Option<RawAmount>,

    #[serde(alias = "max_discount_amount")]
    pub max_discount_amount: Option<RawAmount>,

    #[serde(alias = "minimum_order")]
    pub minimum_order: Option<RawAmount>,

    #[serde(alias = "min_order_amount")]
    pub min_order_amount: Option<RawAmount>,

    #[serde(alias = "min_order")]
    pub min_order: Option<RawAmount>,

    #[serde(alias = "valid_from")]
    pub valid_from: Option<Timestamp>,

    #[serde(alias = "start_date")]
    pub start_date: Option<Timestamp>,

    #[serde(alias = "valid_to")]
    pub valid_to: Option<Timestamp>,

    #[serde(alias = "end_date")]
    pub end_date: Option<Timestamp>,

    #[serde(alias = "usage_limit")]
    pub usage_limit: Option<u32>,

    #[serde(alias = "max_usage")]
    pub max_usage: Option<u32>,

    #[serde(alias = "used_count")]
    pub used_count: Option<u32>,

    #[serde(alias = "usage_count")]
    pub usage_count: Option<u32>,
}

/// Body of `POST /promotions/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromotionRequest<'a> {
    /// Code as entered
    pub code: &'a str,

    /// Draft subtotal in minor units
    pub subtotal: i64,

    /// ISO currency of `subtotal`
    pub currency: &'static str,

    /// Moment the code would be redeemed
    pub at: Timestamp,
}

impl<'a> ValidatePromotionRequest<'a> {
    /// Build the request for `code` against `subtotal` at `at`.
    pub fn new(code: &'a str, subtotal: Money<'_, Currency>, at: Timestamp) -> Self {
        Self {
            code: code.trim(),
            subtotal: subtotal.to_minor_units(),
            currency: subtotal.currency().iso_alpha_code,
            at,
        }
    }
}

/// Normalise a promotion priced in `currency`.
///
/// When a field arrives under several spellings the `discount*`/`valid*`
/// names win over the legacy ones: `id` over `_id` over `promotionId`, `code`
/// over `promoCode`, `discountType` over `type`, `discountValue` over `value`
/// over `discount`, `maxDiscount` over `maxDiscountAmount`, `minimumOrder`
/// over `minOrderAmount` over `minOrder`, `validFrom`/`validTo` over
/// `startDate`/`endDate`, `usageLimit` over `maxUsage` and `usedCount` over
/// `usageCount`.
///
/// Percentages arrive as percent points (`10` means 10%). A missing minimum
/// order is zero, a missing window bound is open, and a missing usage limit is
/// uncapped.
///
/// # Errors
///
/// Returns a [`NormalizeError`] for a missing id, code, discount type or
/// value, an unknown discount type, or an unreadable or negative amount.
pub fn normalize_promotion(
    raw: RawPromotion,
    currency: &'static Currency,
) -> Result<PromotionCode<'static>, NormalizeError> {
    let id = required("id", [raw.id, raw.object_id, raw.promotion_id])?;
    let code = required("code", [raw.code, raw.promo_code])?;
    let discount_type = required("discount type", [raw.discount_type, raw.type_name])?;
    let discount_value = required(
        "discount value",
        [raw.discount_value, raw.value, raw.discount],
    )?;

    let discount = match fold_variant(&discount_type).as_str() {
        "percent" | "percentage" | "percent_off" | "%" => {
            let points = discount_value.to_decimal("discount value")?;

            if points.is_sign_negative() && !points.is_zero() {
                return Err(NormalizeError::NegativeAmount("discount value"));
            }

            PromotionDiscount::PercentageOff(Percentage::from(points / Decimal::ONE_HUNDRED))
        }
        "fixed" | "amount" | "fixed_amount" | "amount_off" | "flat" => {
            PromotionDiscount::AmountOff(discount_value.to_money("discount value", currency)?)
        }
        _ => {
            return Err(NormalizeError::UnknownVariant {
                field: "discount type",
                value: discount_type,
            });
        }
    };

    let minimum_order = match first_present([
        raw.minimum_order,
        raw.min_order_amount,
        raw.min_order,
    ]) {
        Some(amount) => amount.to_money("minimum order", currency)?,
        None => Money::from_minor(0, currency),
    };

    let validity = ValidityWindow::new(
        first_present([raw.valid_from, raw.start_date]).unwrap_or(Timestamp::MIN),
        first_present([raw.valid_to, raw.end_date]).unwrap_or(Timestamp::MAX),
    );

    let mut promotion = PromotionCode::new(
        PromotionId::new(id.into_string()),
        code.trim(),
        discount,
        minimum_order,
        validity,
    );

    if let Some(max_discount) = first_present([raw.max_discount, raw.max_discount_amount]) {
        promotion = promotion.with_max_discount(max_discount.to_money("max discount", currency)?);
    }

    if let Some(limit) = first_present([raw.usage_limit, raw.max_usage]) {
        promotion = promotion.with_usage(UsageBudget::with_redemption_limit(
            limit,
            first_present([raw.used_count, raw.usage_count]).unwrap_or_default(),
        ));
    }

    Ok(promotion)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::VND;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_promotion_normalises() -> TestResult {
        let raw: RawPromotion = serde_json::from_str(
            r#"{
                "_id": "p1",
                "promoCode": " KARAOKE10 ",
                "discountType": "Percentage",
                "discountValue": 10,
                "maxDiscount": 200000,
                "minOrderAmount": "500,000",
                "startDate": "2026-11-01T00:00:00Z",
                "endDate": "2026-11-30T23:59:59Z",
                "usageLimit": 100,
                "usedCount": 42
            }"#,
        )?;

        let promotion = normalize_promotion(raw, VND)?;

        assert_eq!(promotion.code(), "KARAOKE10");
        assert_eq!(promotion.minimum_order(), Money::from_minor(500_000, VND));
        assert_eq!(
            promotion.max_discount(),
            Some(Money::from_minor(200_000, VND))
        );
        assert_eq!(promotion.usage().remaining(), Some(58));
        assert_eq!(
            promotion.discount_for(Money::from_minor(850_000, VND))?,
            Money::from_minor(85_000, VND)
        );

        Ok(())
    }

    #[test]
    fn fixed_promotion_with_open_window_normalises() -> TestResult {
        let raw: RawPromotion = serde_json::from_str(
            r#"{ "id": 9, "code": "BIG", "type": "fixed_amount", "value": 2000000 }"#,
        )?;

        let promotion = normalize_promotion(raw, VND)?;

        assert_eq!(
            promotion.discount(),
            &PromotionDiscount::AmountOff(Money::from_minor(2_000_000, VND))
        );
        assert_eq!(promotion.validity(), ValidityWindow::always());
        assert!(promotion.usage().remaining().is_none());

        Ok(())
    }

    #[test]
    fn promotion_sent_with_two_spellings_normalises() -> TestResult {
        let raw: RawPromotion = serde_json::from_str(
            r#"{
                "id": "p1",
                "_id": "65f0c2",
                "code": "KARAOKE10",
                "promoCode": "OLD10",
                "discountType": "percent",
                "type": "fixed",
                "discountValue": 10,
                "value": 50000,
                "minimumOrder": 500000,
                "minOrder": 100000,
                "usageLimit": 10,
                "maxUsage": 99,
                "usedCount": 10
            }"#,
        )?;

        let promotion = normalize_promotion(raw, VND)?;

        assert_eq!(promotion.id().as_str(), "p1");
        assert_eq!(promotion.code(), "KARAOKE10");
        assert_eq!(promotion.minimum_order(), Money::from_minor(500_000, VND));
        assert!(promotion.usage().is_exhausted());
        assert_eq!(
            promotion.discount_for(Money::from_minor(850_000, VND))?,
            Money::from_minor(85_000, VND)
        );

        Ok(())
    }

    #[test]
    fn unknown_discount_type_is_rejected() -> TestResult {
        let raw: RawPromotion = serde_json::from_str(
            r#"{ "id": 1, "code": "X", "discountType": "bogo", "discountValue": 1 }"#,
        )?;

        assert!(matches!(
            normalize_promotion(raw, VND),
            Err(NormalizeError::UnknownVariant {
                field: "discount type",
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn validate_request_serialises_in_camel_case() -> TestResult {
        let at: Timestamp = "2026-11-01T12:00:00Z".parse()?;
        let request =
            ValidatePromotionRequest::new(" KARAOKE10", Money::from_minor(850_000, VND), at);

        let json = serde_json::to_value(&request)?;

        assert_eq!(json["code"], "KARAOKE10");
        assert_eq!(json["subtotal"], 850_000);
        assert_eq!(json["currency"], "VND");
        assert_eq!(json["at"], "2026-11-01T12:00:00Z");

        Ok(())
    }
}
