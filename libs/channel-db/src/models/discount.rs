use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{Result, StoreError};
use crate::listing::{FieldFilter, Listable};
use crate::listing::status::derive_status;
use crate::store::Record;
use crate::utils::{self, DayBound, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountType {
    Percentage,
    #[serde(rename = "Fixed Amount")]
    FixedAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountStatus {
    Active,
    Inactive,
    Expired,
}

impl DiscountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for DiscountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "expired" => Ok(Self::Expired),
            other => Err(StoreError::validation(format!(
                "Unknown discount status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicableFor {
    #[default]
    All,
    Hospitals,
    Doctors,
    Specializations,
}

impl FromStr for ApplicableFor {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "hospitals" => Ok(Self::Hospitals),
            "doctors" => Ok(Self::Doctors),
            "specializations" => Ok(Self::Specializations),
            other => Err(StoreError::validation(format!(
                "Unknown applicableFor value: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: String,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<f64>,
    pub expiry_date: DateTime<Utc>,
    pub member_only: bool,
    /// Persisted on/off switch. Never read directly for display, see `status`.
    pub enabled: bool,
    /// Derived from `expiry_date` and `enabled`.
    pub status: DiscountStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
    pub usage_count: u32,
    pub applicable_for: ApplicableFor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discount {
    /// Builds an unsaved discount from create input. The store assigns the id;
    /// the caller still has to validate.
    pub(crate) fn from_new(input: NewDiscount, now: DateTime<Utc>) -> Self {
        let enabled = input.enabled.unwrap_or(true);
        Self {
            id: String::new(),
            code: input.code,
            description: input.description,
            discount_type: input.discount_type,
            percentage: input.percentage,
            fixed_amount: input.fixed_amount,
            expiry_date: input.expiry_date,
            member_only: input.member_only,
            enabled,
            status: derive_status(input.expiry_date, enabled, now),
            usage_limit: input.usage_limit,
            usage_count: 0,
            applicable_for: input.applicable_for,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recomputes `status` against `now`.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.status = derive_status(self.expiry_date, self.enabled, now);
    }

    /// Checks the cross-field rules and normalizes the amount fields for
    /// the chosen `discount_type`.
    pub(crate) fn validate(&mut self) -> Result<()> {
        self.code = require_text("code", &self.code)?.to_uppercase();
        self.description = require_text("description", &self.description)?;

        match self.discount_type {
            DiscountType::Percentage => {
                if !self.percentage.is_finite() || self.percentage <= 0.0 || self.percentage > 100.0
                {
                    return Err(StoreError::validation(
                        "Discount percentage must be between 0 and 100",
                    ));
                }
                self.fixed_amount = None;
            }
            DiscountType::FixedAmount => match self.fixed_amount {
                Some(amount) if amount.is_finite() && amount > 0.0 => self.percentage = 0.0,
                _ => {
                    return Err(StoreError::validation(
                        "Fixed amount must be greater than 0",
                    ));
                }
            },
        }

        if let Some(limit) = self.usage_limit {
            if limit == 0 {
                return Err(StoreError::validation("Usage limit must be at least 1"));
            }
            if self.usage_count > limit {
                return Err(StoreError::validation(
                    "Usage count cannot exceed the usage limit",
                ));
            }
        }

        Ok(())
    }
}

impl Record for Discount {
    const ENTITY: &'static str = "Discount";

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Listable for Discount {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.description.as_str()]
    }

    fn refresh_status(&mut self, now: DateTime<Utc>) {
        self.refresh(now);
    }
}

/// Creatable fields of a discount.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscount {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub fixed_amount: Option<f64>,
    #[serde(deserialize_with = "utils::deserialize_end_of_day")]
    pub expiry_date: DateTime<Utc>,
    #[serde(default)]
    pub member_only: bool,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub applicable_for: ApplicableFor,
    /// Starts switched on unless told otherwise.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// The older `validFrom`/`validTo` payload some clients still send.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDiscount {
    pub code: String,
    pub description: String,
    pub discount_percentage: f64,
    pub valid_from: String,
    pub valid_to: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<LegacyDiscount> for NewDiscount {
    type Error = StoreError;

    fn try_from(legacy: LegacyDiscount) -> Result<Self> {
        let valid_from = utils::parse_instant(&legacy.valid_from, DayBound::Start)?;
        let valid_to = utils::parse_instant(&legacy.valid_to, DayBound::End)?;
        if valid_to < valid_from {
            return Err(StoreError::validation(
                "Valid to date must be after valid from date",
            ));
        }

        let enabled = match legacy.status.as_deref() {
            Some(status) => status.parse::<DiscountStatus>()? != DiscountStatus::Inactive,
            None => true,
        };

        Ok(Self {
            code: legacy.code,
            description: legacy.description,
            discount_type: DiscountType::Percentage,
            percentage: legacy.discount_percentage,
            fixed_amount: None,
            expiry_date: valid_to,
            member_only: false,
            usage_limit: None,
            applicable_for: ApplicableFor::All,
            enabled: Some(enabled),
        })
    }
}

/// Either payload shape accepted on create. A `validFrom` key selects the
/// legacy shape so field errors surface from the struct actually meant.
#[derive(Debug, Clone)]
pub enum DiscountPayload {
    Current(NewDiscount),
    Legacy(LegacyDiscount),
}

impl<'de> Deserialize<'de> for DiscountPayload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("validFrom").is_some() {
            LegacyDiscount::deserialize(value)
                .map(Self::Legacy)
                .map_err(de::Error::custom)
        } else {
            NewDiscount::deserialize(value)
                .map(Self::Current)
                .map_err(de::Error::custom)
        }
    }
}

impl TryFrom<DiscountPayload> for NewDiscount {
    type Error = StoreError;

    fn try_from(payload: DiscountPayload) -> Result<Self> {
        match payload {
            DiscountPayload::Current(new) => Ok(new),
            DiscountPayload::Legacy(legacy) => legacy.try_into(),
        }
    }
}

/// Partial update. Absent fields keep their stored value; the enabled flag
/// is only changed through toggling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPatch {
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub percentage: Option<f64>,
    #[serde(default, deserialize_with = "utils::double_option")]
    pub fixed_amount: Option<Option<f64>>,
    #[serde(default, deserialize_with = "utils::deserialize_opt_end_of_day")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub member_only: Option<bool>,
    #[serde(default, deserialize_with = "utils::double_option")]
    pub usage_limit: Option<Option<u32>>,
    pub applicable_for: Option<ApplicableFor>,
}

impl DiscountPatch {
    pub(crate) fn apply(self, discount: &mut Discount) {
        if let Some(code) = self.code {
            discount.code = code;
        }
        if let Some(description) = self.description {
            discount.description = description;
        }
        if let Some(discount_type) = self.discount_type {
            discount.discount_type = discount_type;
        }
        if let Some(percentage) = self.percentage {
            discount.percentage = percentage;
        }
        if let Some(fixed_amount) = self.fixed_amount {
            discount.fixed_amount = fixed_amount;
        }
        if let Some(expiry_date) = self.expiry_date {
            discount.expiry_date = expiry_date;
        }
        if let Some(member_only) = self.member_only {
            discount.member_only = member_only;
        }
        if let Some(usage_limit) = self.usage_limit {
            discount.usage_limit = usage_limit;
        }
        if let Some(applicable_for) = self.applicable_for {
            discount.applicable_for = applicable_for;
        }
    }
}

/// Discount-specific list filters.
#[derive(Debug, Clone, Default)]
pub struct DiscountFilter {
    pub status: Option<DiscountStatus>,
    pub applicable_for: Option<ApplicableFor>,
}

impl FieldFilter<Discount> for DiscountFilter {
    fn matches(&self, discount: &Discount) -> bool {
        self.status.is_none_or(|s| discount.status == s)
            && self.applicable_for.is_none_or(|a| discount.applicable_for == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Discount {
        let at = Utc.with_ymd_and_hms(2025, 5, 15, 10, 0, 0).unwrap();
        Discount {
            id: "d1".to_string(),
            code: " summer2025 ".to_string(),
            description: "Summer Special".to_string(),
            discount_type: DiscountType::Percentage,
            percentage: 15.0,
            fixed_amount: Some(100.0),
            expiry_date: Utc.with_ymd_and_hms(2025, 8, 31, 23, 59, 59).unwrap(),
            member_only: false,
            enabled: true,
            status: DiscountStatus::Active,
            usage_limit: None,
            usage_count: 0,
            applicable_for: ApplicableFor::All,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn validate_normalizes_code_and_clears_fixed_amount() {
        let mut d = sample();
        d.validate().unwrap();
        assert_eq!(d.code, "SUMMER2025");
        assert_eq!(d.fixed_amount, None);
    }

    #[test]
    fn percentage_must_be_within_range() {
        for bad in [0.0, -5.0, 100.5, f64::NAN] {
            let mut d = sample();
            d.percentage = bad;
            assert!(d.validate().is_err(), "percentage {bad} should be rejected");
        }
        let mut d = sample();
        d.percentage = 100.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn fixed_amount_type_needs_positive_amount() {
        let mut d = sample();
        d.discount_type = DiscountType::FixedAmount;
        d.fixed_amount = None;
        assert!(d.validate().is_err());

        d.fixed_amount = Some(500.0);
        d.validate().unwrap();
        assert_eq!(d.percentage, 0.0);
    }

    #[test]
    fn usage_count_cannot_exceed_limit() {
        let mut d = sample();
        d.usage_limit = Some(2);
        d.usage_count = 3;
        assert!(d.validate().is_err());

        d.usage_limit = Some(0);
        d.usage_count = 0;
        assert!(d.validate().is_err());
    }

    #[test]
    fn legacy_payload_converts_to_current_shape() {
        let payload: DiscountPayload = serde_json::from_value(serde_json::json!({
            "code": "NEWYEAR25",
            "description": "New Year Promotion",
            "discountPercentage": 25,
            "validFrom": "2025-12-25T00:00:00Z",
            "validTo": "2026-01-05T23:59:59Z",
            "status": "Inactive"
        }))
        .unwrap();
        let new: NewDiscount = payload.try_into().unwrap();

        assert_eq!(new.percentage, 25.0);
        assert_eq!(new.discount_type, DiscountType::Percentage);
        assert_eq!(new.enabled, Some(false));
        assert_eq!(
            new.expiry_date,
            Utc.with_ymd_and_hms(2026, 1, 5, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn legacy_payload_rejects_inverted_range() {
        let legacy = LegacyDiscount {
            code: "X".to_string(),
            description: "x".to_string(),
            discount_percentage: 10.0,
            valid_from: "2025-06-01".to_string(),
            valid_to: "2025-05-01".to_string(),
            status: None,
        };
        assert!(NewDiscount::try_from(legacy).is_err());
    }

    #[test]
    fn current_payload_accepts_date_only_expiry() {
        let payload: DiscountPayload = serde_json::from_value(serde_json::json!({
            "code": "DOC500",
            "description": "Doctor fee off",
            "discountType": "Fixed Amount",
            "fixedAmount": 500,
            "expiryDate": "2026-03-31",
            "applicableFor": "Doctors"
        }))
        .unwrap();
        let new: NewDiscount = payload.try_into().unwrap();

        assert_eq!(new.discount_type, DiscountType::FixedAmount);
        assert_eq!(new.applicable_for, ApplicableFor::Doctors);
        assert_eq!(
            new.expiry_date,
            Utc.with_ymd_and_hms(2026, 3, 31, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn payload_errors_name_the_bad_field() {
        let err = serde_json::from_value::<DiscountPayload>(serde_json::json!({
            "code": "DOC500",
            "description": "Doctor fee off",
            "discountType": "Percentage",
            "percentage": 10,
            "expiryDate": "2026-13-45"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Invalid date: 2026-13-45"), "{err}");

        let err = serde_json::from_value::<DiscountPayload>(serde_json::json!({
            "code": "NEWYEAR25",
            "description": "New Year Promotion",
            "validFrom": "2025-12-25",
            "validTo": "2026-01-05"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("discountPercentage"), "{err}");
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let patch: DiscountPatch =
            serde_json::from_value(serde_json::json!({ "usageLimit": null })).unwrap();
        let mut d = sample();
        d.usage_limit = Some(10);
        patch.apply(&mut d);
        assert_eq!(d.usage_limit, None);

        let patch: DiscountPatch =
            serde_json::from_value(serde_json::json!({ "description": "Changed" })).unwrap();
        let mut d = sample();
        d.usage_limit = Some(10);
        patch.apply(&mut d);
        assert_eq!(d.usage_limit, Some(10));
        assert_eq!(d.description, "Changed");
    }

    #[test]
    fn serializes_camel_case_with_display_names() {
        let mut d = sample();
        d.discount_type = DiscountType::FixedAmount;
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["discountType"], "Fixed Amount");
        assert_eq!(json["expiryDate"], "2025-08-31T23:59:59Z");
        assert_eq!(json["status"], "Active");
    }
}
