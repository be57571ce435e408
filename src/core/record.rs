//! Directory records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory entry as held by the store
///
/// `id`, `created_at` and `updated_at` are assigned by the store. Ids are
/// unique for the lifetime of a store and are never handed out twice, even
/// after a record is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advocate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Vec<String>,
    pub years_of_experience: i32,
    pub phone_number: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advocate {
    /// Build a stored record from its insertable part
    pub fn from_new(id: i64, new: NewAdvocate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            city: new.city,
            degree: new.degree,
            specialties: new.specialties,
            years_of_experience: new.years_of_experience,
            phone_number: new.phone_number,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The caller-supplied part of an [`Advocate`]
///
/// Used to seed stores; the query path never writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdvocate {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Vec<String>,
    pub years_of_experience: i32,
    pub phone_number: i64,
}

impl NewAdvocate {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        city: impl Into<String>,
        degree: impl Into<String>,
        specialties: &[&str],
        years_of_experience: i32,
        phone_number: i64,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            city: city.into(),
            degree: degree.into(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            years_of_experience,
            phone_number,
        }
    }
}
