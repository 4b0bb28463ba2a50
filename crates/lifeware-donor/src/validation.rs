//! Registration rules.
//!
//! The same rules run in the browser before submitting and on the server
//! before inserting, so a registration that reaches the store is always
//! complete.

use crate::{BloodGroup, NewDonor};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Youngest accepted donor age.
pub const MIN_DONOR_AGE: i64 = 18;
/// Oldest accepted donor age.
pub const MAX_DONOR_AGE: i64 = 65;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex")
});

/// A registration as submitted by the form.
///
/// Fields are kept as loosely typed as an HTML form produces them; the
/// age may arrive as a JSON number or as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DonorRegistration {
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Blood group text, e.g. `"O+"`
    #[serde(default)]
    pub blood_group: Option<String>,
    /// Age as entered
    #[serde(default, deserialize_with = "number_or_text")]
    pub age: Option<String>,
    /// "City, State"
    #[serde(default)]
    pub location: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Last donation date, `YYYY-MM-DD`
    #[serde(default)]
    pub last_donated: Option<String>,
}

/// Field name -> message, one entry per rejected field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Record a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    /// The message for a field, if it was rejected.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Drop the message for a field (the form clears it as the user types).
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// True when no field was rejected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl DonorRegistration {
    /// Check every field and produce the insert payload.
    ///
    /// All problems are reported at once rather than stopping at the first.
    pub fn validate(&self) -> Result<NewDonor, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Name is required");
        }

        let blood_group = match non_blank(&self.blood_group) {
            None => {
                errors.insert("blood_group", "Blood group is required");
                None
            }
            Some(raw) => match raw.parse::<BloodGroup>() {
                Ok(group) => Some(group),
                Err(_) => {
                    errors.insert("blood_group", "Please select a valid blood group");
                    None
                }
            },
        };

        let age = match non_blank(&self.age) {
            None => {
                errors.insert("age", "Age is required");
                None
            }
            Some(raw) => match raw.parse::<i64>() {
                Ok(age) if (MIN_DONOR_AGE..=MAX_DONOR_AGE).contains(&age) => Some(age as u32),
                Ok(_) => {
                    errors.insert(
                        "age",
                        format!(
                            "Age must be between {} and {}",
                            MIN_DONOR_AGE, MAX_DONOR_AGE
                        ),
                    );
                    None
                }
                Err(_) => {
                    errors.insert("age", "Age must be a number");
                    None
                }
            },
        };

        let location = self.location.trim();
        if location.is_empty() {
            errors.insert("location", "Location is required");
        }

        let email = non_blank(&self.email);
        let phone_number = non_blank(&self.phone_number);
        if email.is_none() && phone_number.is_none() {
            errors.insert("email", "Either email or phone number is required");
            errors.insert("phone_number", "Either email or phone number is required");
        }
        if let Some(email) = email {
            if !EMAIL_PATTERN.is_match(email) {
                errors.insert("email", "Please enter a valid email address");
            }
        }

        let last_donated = match non_blank(&self.last_donated) {
            None => None,
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert("last_donated", "Please enter a valid date");
                    None
                }
            },
        };

        match (blood_group, age) {
            (Some(blood_group), Some(age)) if errors.is_empty() => Ok(NewDonor {
                name: name.to_string(),
                blood_group,
                age,
                location: location.to_string(),
                email: email.map(str::to_string),
                phone_number: phone_number.map(str::to_string),
                last_donated,
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn number_or_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Int(n)) => Some(n.to_string()),
        // 34.0 from a number input is still 34; 34.5 is rejected later
        Some(Raw::Float(n)) if n.fract() == 0.0 => Some((n as i64).to_string()),
        Some(Raw::Float(n)) => Some(n.to_string()),
        Some(Raw::Text(s)) => Some(s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid() -> DonorRegistration {
        DonorRegistration {
            name: "  Priya Nair ".to_string(),
            blood_group: Some("B+".to_string()),
            age: Some("27".to_string()),
            location: "Kochi, KL".to_string(),
            email: Some("priya@example.com".to_string()),
            phone_number: None,
            last_donated: Some("2024-05-10".to_string()),
        }
    }

    #[test]
    fn test_valid_registration() {
        let donor = valid().validate().expect("registration should be valid");
        assert_eq!(donor.name, "Priya Nair");
        assert_eq!(donor.blood_group, BloodGroup::BPositive);
        assert_eq!(donor.age, 27);
        assert_eq!(donor.email.as_deref(), Some("priya@example.com"));
        assert_eq!(donor.phone_number, None);
        assert_eq!(donor.last_donated, NaiveDate::from_ymd_opt(2024, 5, 10));
    }

    #[rstest]
    #[case("17", false)]
    #[case("18", true)]
    #[case("40", true)]
    #[case("65", true)]
    #[case("66", false)]
    #[case("-3", false)]
    fn test_age_bounds(#[case] age: &str, #[case] accepted: bool) {
        let registration = DonorRegistration {
            age: Some(age.to_string()),
            ..valid()
        };
        let result = registration.validate();
        assert_eq!(result.is_ok(), accepted, "age {}", age);
        if let Err(errors) = result {
            assert_eq!(errors.get("age"), Some("Age must be between 18 and 65"));
        }
    }

    #[rstest]
    #[case(None, "Age is required")]
    #[case(Some("  "), "Age is required")]
    #[case(Some("twenty"), "Age must be a number")]
    fn test_age_presence(#[case] age: Option<&str>, #[case] message: &str) {
        let registration = DonorRegistration {
            age: age.map(str::to_string),
            ..valid()
        };
        let errors = registration.validate().unwrap_err();
        assert_eq!(errors.get("age"), Some(message));
    }

    #[test]
    fn test_requires_email_or_phone() {
        let registration = DonorRegistration {
            email: Some("   ".to_string()),
            phone_number: None,
            ..valid()
        };
        let errors = registration.validate().unwrap_err();
        assert_eq!(
            errors.get("email"),
            Some("Either email or phone number is required")
        );
        assert_eq!(
            errors.get("phone_number"),
            Some("Either email or phone number is required")
        );
    }

    #[test]
    fn test_phone_alone_is_enough() {
        let registration = DonorRegistration {
            email: None,
            phone_number: Some("+91 90000 00000".to_string()),
            ..valid()
        };
        let donor = registration.validate().unwrap();
        assert_eq!(donor.email, None);
        assert_eq!(donor.phone_number.as_deref(), Some("+91 90000 00000"));
    }

    #[test]
    fn test_rejects_malformed_email() {
        let registration = DonorRegistration {
            email: Some("priya-at-example".to_string()),
            ..valid()
        };
        let errors = registration.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_reports_every_problem_at_once() {
        let errors = DonorRegistration::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("blood_group"), Some("Blood group is required"));
        assert_eq!(errors.get("age"), Some("Age is required"));
        assert_eq!(errors.get("location"), Some("Location is required"));
        assert!(errors.get("email").is_some());
        assert!(errors.get("phone_number").is_some());
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_rejects_unknown_blood_group_and_bad_date() {
        let registration = DonorRegistration {
            blood_group: Some("Z+".to_string()),
            last_donated: Some("10/05/2024".to_string()),
            ..valid()
        };
        let errors = registration.validate().unwrap_err();
        assert_eq!(
            errors.get("blood_group"),
            Some("Please select a valid blood group")
        );
        assert_eq!(errors.get("last_donated"), Some("Please enter a valid date"));
    }

    #[test]
    fn test_age_accepts_json_number_or_text() {
        let from_number: DonorRegistration =
            serde_json::from_str(r#"{"name":"A","age":30}"#).unwrap();
        assert_eq!(from_number.age.as_deref(), Some("30"));

        let from_text: DonorRegistration =
            serde_json::from_str(r#"{"name":"A","age":"30"}"#).unwrap();
        assert_eq!(from_text.age.as_deref(), Some("30"));

        let missing: DonorRegistration = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(missing.age, None);
    }

    #[test]
    fn test_errors_serialize_as_object() {
        let mut errors = ValidationErrors::default();
        errors.insert("age", "Age is required");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value, serde_json::json!({"age": "Age is required"}));
        assert_eq!(errors.to_string(), "age: Age is required");
    }
}
