//! Response assembly
//!
//! Shapes a [`QueryResult`] into the public reply. Each record is checked
//! against the public schema on the way out; a record that fails is left
//! out of `items` and reported in `warnings` instead of failing the page.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use validator::{Validate, ValidationErrors};

use crate::core::error::{DirectoryError, DirectoryResult};
use crate::core::query::{PaginationMeta, QueryResult};
use crate::core::record::Advocate;

/// 7 to 15 digits, no leading zero (E.164 without the `+`)
static PHONE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d{6,14}$").expect("phone pattern is valid"));

/// Public shape of a directory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateResponse {
    pub id: i64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub city: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub degree: String,
    #[validate(custom(function = "validate_specialties"))]
    pub specialties: Vec<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub years_of_experience: i32,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Advocate> for AdvocateResponse {
    fn from(advocate: Advocate) -> Self {
        Self {
            id: advocate.id,
            first_name: advocate.first_name,
            last_name: advocate.last_name,
            city: advocate.city,
            degree: advocate.degree,
            specialties: advocate.specialties,
            years_of_experience: advocate.years_of_experience,
            phone_number: advocate.phone_number,
            created_at: advocate.created_at,
            updated_at: advocate.updated_at,
        }
    }
}

fn validate_specialties(specialties: &[String]) -> Result<(), validator::ValidationError> {
    if specialties.iter().any(|tag| tag.trim().is_empty()) {
        return Err(validator::ValidationError::new("blank_specialty")
            .with_message("specialty tags must not be blank".into()));
    }
    Ok(())
}

fn validate_phone_number(phone_number: i64) -> Result<(), validator::ValidationError> {
    if !PHONE_DIGITS.is_match(&phone_number.to_string()) {
        return Err(validator::ValidationError::new("phone_number")
            .with_message("must be a 7 to 15 digit number".into()));
    }
    Ok(())
}

/// A record left out of the reply because it failed the public schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWarning {
    pub id: i64,
    pub field: String,
    pub message: String,
}

/// Reply for one list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvocateListResponse {
    pub items: Vec<AdvocateResponse>,

    #[serde(flatten)]
    pub pagination: PaginationMeta,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RecordWarning>,
}

/// Builds [`AdvocateListResponse`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseAssembler;

impl ResponseAssembler {
    /// Wrap a query result into the reply contract
    ///
    /// Fails with [`DirectoryError::Internal`] only when the page held
    /// records and none of them passed validation.
    pub fn assemble(&self, result: QueryResult) -> DirectoryResult<AdvocateListResponse> {
        let pagination = result.pagination();
        let fetched = result.items.len();

        let mut items = Vec::with_capacity(fetched);
        let mut warnings = Vec::new();

        for advocate in result.items {
            let response = AdvocateResponse::from(advocate);
            match response.validate() {
                Ok(()) => items.push(response),
                Err(errors) => {
                    for warning in record_warnings(response.id, &errors) {
                        tracing::warn!(
                            id = warning.id,
                            field = %warning.field,
                            message = %warning.message,
                            "record failed public schema validation"
                        );
                        warnings.push(warning);
                    }
                }
            }
        }

        if fetched > 0 && items.is_empty() {
            let detail = format!("all {} records on the page failed validation", fetched);
            tracing::error!(detail = %detail, "data integrity failure");
            return Err(DirectoryError::Internal(detail));
        }

        Ok(AdvocateListResponse {
            items,
            pagination,
            warnings,
        })
    }
}

fn record_warnings(id: i64, errors: &ValidationErrors) -> Vec<RecordWarning> {
    let mut warnings: Vec<RecordWarning> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| RecordWarning {
                id,
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();
    warnings.sort_by(|a, b| a.field.cmp(&b.field));
    warnings
}
