//! Donor rows and the insert payload.

use crate::BloodGroup;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier assigned by the remote store.
///
/// Tables created through the hosted dashboard use either a bigint identity
/// or a uuid primary key, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum DonorId {
    /// Integer identity column
    Int(i64),
    /// Text/uuid key
    Text(String),
}

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DonorId::Int(id) => write!(f, "{}", id),
            DonorId::Text(id) => f.write_str(id),
        }
    }
}

/// A donor as read back from the directory.
///
/// Rows are read through [`DonorRow`], so null text columns and the older
/// `full_name`, `blood_type` and `last_donation_date` column names never
/// fail a whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(from = "DonorRow")]
pub struct Donor {
    /// Store-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DonorId>,
    /// Full name, empty when the row has none
    pub name: String,
    /// Blood group; unreadable values are dropped rather than failing the row
    pub blood_group: Option<BloodGroup>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// "City, State" free text, empty when the row has none
    pub location: String,
    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Date of the most recent donation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_donated: Option<NaiveDate>,
    /// Free-text availability flag ("available", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Row creation time, when the table tracks it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw table row. Every column is optional and nullable, and current and
/// legacy column names are read side by side; the current name wins when
/// both are filled in.
#[derive(Debug, Deserialize)]
struct DonorRow {
    #[serde(default)]
    id: Option<DonorId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_blood_group")]
    blood_group: Option<BloodGroup>,
    #[serde(default, deserialize_with = "lenient_blood_group")]
    blood_type: Option<BloodGroup>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    last_donated: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    last_donation_date: Option<NaiveDate>,
    #[serde(default)]
    availability: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<DonorRow> for Donor {
    fn from(row: DonorRow) -> Self {
        let name = row
            .name
            .filter(|n| !n.trim().is_empty())
            .or(row.full_name)
            .unwrap_or_default();

        Donor {
            id: row.id,
            name,
            blood_group: row.blood_group.or(row.blood_type),
            age: row.age,
            location: row.location.unwrap_or_default(),
            email: row.email,
            phone_number: row.phone_number,
            last_donated: row.last_donated.or(row.last_donation_date),
            availability: row.availability,
            created_at: row.created_at,
        }
    }
}

impl Donor {
    /// The preferred way to reach this donor: email first, then phone.
    pub fn contact(&self) -> Option<&str> {
        self.email
            .as_deref()
            .filter(|e| !e.is_empty())
            .or_else(|| self.phone_number.as_deref().filter(|p| !p.is_empty()))
    }
}

/// A validated registration, ready to be inserted.
///
/// Missing contact fields serialize as explicit `null` so the insert body
/// always names every column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewDonor {
    /// Full name, trimmed
    pub name: String,
    /// Blood group
    pub blood_group: BloodGroup,
    /// Age in years, within the accepted donor range
    pub age: u32,
    /// Location, trimmed
    pub location: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Date of the most recent donation
    pub last_donated: Option<NaiveDate>,
}

impl NewDonor {
    /// Build the row the store would return for this insert.
    pub fn into_donor(self, id: Option<DonorId>) -> Donor {
        Donor {
            id,
            name: self.name,
            blood_group: Some(self.blood_group),
            age: Some(self.age),
            location: self.location,
            email: self.email,
            phone_number: self.phone_number,
            last_donated: self.last_donated,
            availability: None,
            created_at: None,
        }
    }
}

fn lenient_blood_group<'de, D>(deserializer: D) -> Result<Option<BloodGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

// Accepts plain dates and full timestamps; only the date part is kept.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let date_part = s.get(..10).unwrap_or(&s);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }))
}
