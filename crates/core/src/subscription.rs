//! Subscription entity, request payloads and their validators.
//!
//! Validation is fail-fast and runs fields in a fixed order:
//! `service_name`, `price`, `user_id`, `start_date`, `end_date`.
//! Period queries check `start`, `end`, `user_id`, `service_name`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::month_date::MonthDate;
use crate::types::DbId;

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Subscription";

/// Maximum length of `service_name` (the column is `VARCHAR(255)`).
pub const MAX_SERVICE_NAME_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A stored subscription. Dates serialize as `MM-YYYY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MonthDate>,
}

/// A validated subscription that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthDate,
    pub end_date: Option<MonthDate>,
}

impl NewSubscription {
    /// Attach the id generated by the store.
    pub fn with_id(self, id: DbId) -> Subscription {
        Subscription {
            id,
            service_name: self.service_name,
            price: self.price,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of create and update requests, before validation.
///
/// Missing fields fall back to empty values so they are reported by the
/// validator with the field name instead of as a malformed body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionInput {
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Body of a period-total request, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PeriodInput {
    pub service_name: Option<String>,
    pub start: String,
    pub end: String,
    pub user_id: Option<String>,
}

/// A validated period-total query. `None` filters match every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodQuery {
    pub start: MonthDate,
    pub end: MonthDate,
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

/// Response body of a period-total request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodTotal {
    pub total: i64,
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate a create request.
pub fn validate_for_create(input: &SubscriptionInput) -> Result<NewSubscription, CoreError> {
    Ok(NewSubscription {
        service_name: validate_service_name(&input.service_name)?,
        price: validate_price(input.price)?,
        user_id: validate_user_id("user_id", &input.user_id)?,
        start_date: validate_month("start_date", &input.start_date)?,
        end_date: validate_optional_month("end_date", input.end_date.as_deref())?,
    })
}

/// Validate an update request against the record it replaces.
///
/// All mutable fields are replaced; the id is kept from `existing`.
/// No ordering between `start_date` and `end_date` is enforced.
pub fn validate_for_update(
    existing: &Subscription,
    input: &SubscriptionInput,
) -> Result<Subscription, CoreError> {
    validate_for_create(input).map(|fields| fields.with_id(existing.id))
}

/// Validate a period-total request. Empty filter strings mean "no filter".
pub fn validate_period(input: &PeriodInput) -> Result<PeriodQuery, CoreError> {
    let start = validate_month("start", &input.start)?;
    let end = validate_month("end", &input.end)?;

    let user_id = match non_empty(input.user_id.as_deref()) {
        Some(raw) => Some(validate_user_id("user_id", raw)?),
        None => None,
    };
    let service_name = non_empty(input.service_name.as_deref()).map(str::to_string);

    Ok(PeriodQuery {
        start,
        end,
        user_id,
        service_name,
    })
}

fn validate_service_name(raw: &str) -> Result<String, CoreError> {
    if raw.trim().is_empty() {
        return Err(CoreError::validation("service_name", "must not be empty"));
    }
    if raw.chars().count() > MAX_SERVICE_NAME_LENGTH {
        return Err(CoreError::validation(
            "service_name",
            format!("must be at most {MAX_SERVICE_NAME_LENGTH} characters"),
        ));
    }
    Ok(raw.to_string())
}

fn validate_price(raw: i64) -> Result<i32, CoreError> {
    if raw <= 0 {
        return Err(CoreError::validation("price", "must be greater than 0"));
    }
    i32::try_from(raw)
        .map_err(|_| CoreError::validation("price", "exceeds the maximum storable price"))
}

/// Only the hyphenated 8-4-4-4-12 form is accepted. The urn, braced and
/// simple forms are all of a different length.
fn validate_user_id(field: &'static str, raw: &str) -> Result<Uuid, CoreError> {
    let invalid = || CoreError::validation(field, "must be a valid UUID");
    if raw.len() != uuid::fmt::Hyphenated::LENGTH {
        return Err(invalid());
    }
    Uuid::parse_str(raw).map_err(|_| invalid())
}

fn validate_month(field: &'static str, raw: &str) -> Result<MonthDate, CoreError> {
    MonthDate::parse(raw).map_err(|e| e.for_field(field))
}

fn validate_optional_month(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<MonthDate>, CoreError> {
    non_empty(raw)
        .map(|value| validate_month(field, value))
        .transpose()
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !value.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const USER: &str = "f47ac10b-58cc-4372-a567-0e02b2c3d479";

    fn input() -> SubscriptionInput {
        SubscriptionInput {
            service_name: "netflix".into(),
            price: 100,
            user_id: USER.into(),
            start_date: "01-2025".into(),
            end_date: None,
        }
    }

    fn field_of(err: CoreError) -> &'static str {
        match err {
            CoreError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_input_passes() {
        let sub = validate_for_create(&input()).unwrap();
        assert_eq!(sub.service_name, "netflix");
        assert_eq!(sub.price, 100);
        assert_eq!(sub.user_id.to_string(), USER);
        assert_eq!(sub.start_date.to_string(), "01-2025");
        assert_eq!(sub.end_date, None);
    }

    #[test]
    fn end_date_is_parsed_when_present() {
        let mut raw = input();
        raw.end_date = Some("12-2025".into());
        let sub = validate_for_create(&raw).unwrap();
        assert_eq!(sub.end_date.map(|d| d.to_string()).as_deref(), Some("12-2025"));
    }

    #[test]
    fn empty_end_date_is_treated_as_absent() {
        let mut raw = input();
        raw.end_date = Some(String::new());
        assert_eq!(validate_for_create(&raw).unwrap().end_date, None);
    }

    #[test]
    fn end_before_start_is_allowed() {
        let mut raw = input();
        raw.start_date = "06-2025".into();
        raw.end_date = Some("01-2025".into());
        assert!(validate_for_create(&raw).is_ok());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        for price in [0, -1, i64::MIN] {
            let mut raw = input();
            raw.price = price;
            assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "price");
        }
    }

    #[test]
    fn price_above_column_range_is_rejected() {
        let mut raw = input();
        raw.price = i64::from(i32::MAX) + 1;
        assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "price");

        raw.price = i64::from(i32::MAX);
        assert!(validate_for_create(&raw).is_ok());
    }

    #[test]
    fn blank_service_name_is_rejected() {
        for name in ["", "   "] {
            let mut raw = input();
            raw.service_name = name.into();
            assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "service_name");
        }
    }

    #[test]
    fn overlong_service_name_is_rejected() {
        let mut raw = input();
        raw.service_name = "x".repeat(MAX_SERVICE_NAME_LENGTH + 1);
        assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "service_name");
    }

    #[test]
    fn bad_user_id_is_rejected() {
        let bad = [
            "",
            "not-a-uuid",
            "f47ac10b-58cc-4372-a567",
            "urn:uuid:f47ac10b-58cc-4372-a567-0e02b2c3d479",
            "{f47ac10b-58cc-4372-a567-0e02b2c3d479}",
            "f47ac10b58cc4372a5670e02b2c3d479",
        ];
        for id in bad {
            let mut raw = input();
            raw.user_id = id.into();
            assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "user_id");
        }
    }

    #[test]
    fn bad_dates_name_their_field() {
        let mut raw = input();
        raw.start_date = "2025-01".into();
        assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "start_date");

        let mut raw = input();
        raw.end_date = Some("13-2025".into());
        assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "end_date");
    }

    #[test]
    fn first_failure_wins() {
        let raw = SubscriptionInput::default();
        assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "service_name");

        let mut raw = input();
        raw.price = 0;
        raw.user_id = "bad".into();
        raw.start_date = "bad".into();
        assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "price");
    }

    #[test]
    fn missing_json_fields_become_validation_errors() {
        let raw: SubscriptionInput =
            serde_json::from_value(serde_json::json!({"service_name": "spotify"})).unwrap();
        assert_eq!(field_of(validate_for_create(&raw).unwrap_err()), "price");
    }

    #[test]
    fn update_keeps_existing_id_and_replaces_fields() {
        let existing = validate_for_create(&input()).unwrap().with_id(7);

        let mut raw = input();
        raw.service_name = "spotify".into();
        raw.price = 250;
        raw.user_id = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".into();
        raw.start_date = "02-2025".into();
        raw.end_date = Some("03-2026".into());

        let updated = validate_for_update(&existing, &raw).unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.service_name, "spotify");
        assert_eq!(updated.price, 250);
        assert_eq!(updated.user_id.to_string(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
        assert_eq!(updated.start_date.to_string(), "02-2025");
        assert_eq!(updated.end_date.map(|d| d.to_string()).as_deref(), Some("03-2026"));
    }

    #[test]
    fn update_applies_the_same_rules() {
        let existing = validate_for_create(&input()).unwrap().with_id(1);
        let mut raw = input();
        raw.price = -5;
        assert_eq!(field_of(validate_for_update(&existing, &raw).unwrap_err()), "price");
    }

    #[test]
    fn entity_serializes_dates_as_month_year() {
        let sub = validate_for_create(&input()).unwrap().with_id(3);
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["start_date"], "01-2025");
        assert_eq!(json["user_id"], USER);
        assert!(json.get("end_date").is_none());
    }

    #[test]
    fn period_without_filters() {
        let query = validate_period(&PeriodInput {
            start: "01-2025".into(),
            end: "12-2025".into(),
            ..PeriodInput::default()
        })
        .unwrap();
        assert_eq!(query.start.to_string(), "01-2025");
        assert_eq!(query.end.to_string(), "12-2025");
        assert_eq!(query.user_id, None);
        assert_eq!(query.service_name, None);
    }

    #[test]
    fn period_empty_filters_are_ignored() {
        let query = validate_period(&PeriodInput {
            service_name: Some(String::new()),
            start: "01-2025".into(),
            end: "12-2025".into(),
            user_id: Some(String::new()),
        })
        .unwrap();
        assert_eq!(query.user_id, None);
        assert_eq!(query.service_name, None);
    }

    #[test]
    fn period_keeps_filters() {
        let query = validate_period(&PeriodInput {
            service_name: Some("netflix".into()),
            start: "01-2025".into(),
            end: "12-2025".into(),
            user_id: Some(USER.into()),
        })
        .unwrap();
        assert_eq!(query.user_id.map(|u| u.to_string()).as_deref(), Some(USER));
        assert_eq!(query.service_name.as_deref(), Some("netflix"));
    }

    #[test]
    fn period_rejects_bad_input() {
        let base = PeriodInput {
            start: "01-2025".into(),
            end: "12-2025".into(),
            ..PeriodInput::default()
        };

        let mut raw = base.clone();
        raw.start = "1-2025".into();
        assert_eq!(field_of(validate_period(&raw).unwrap_err()), "start");

        let mut raw = base.clone();
        raw.end = String::new();
        assert_eq!(field_of(validate_period(&raw).unwrap_err()), "end");

        for id in ["someone", "{f47ac10b-58cc-4372-a567-0e02b2c3d479}"] {
            let mut raw = base.clone();
            raw.user_id = Some(id.into());
            assert_matches!(
                validate_period(&raw),
                Err(CoreError::Validation { field: "user_id", .. })
            );
        }
    }
}
