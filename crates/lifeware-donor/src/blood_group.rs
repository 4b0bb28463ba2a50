//! ABO/Rh blood groups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight ABO/Rh blood groups.
///
/// Serialized with the conventional spelling (`"A+"`, `"AB-"`, ...), which
/// is also what the donor table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum BloodGroup {
    /// A positive
    #[serde(rename = "A+")]
    APositive,
    /// A negative
    #[serde(rename = "A-")]
    ANegative,
    /// B positive
    #[serde(rename = "B+")]
    BPositive,
    /// B negative
    #[serde(rename = "B-")]
    BNegative,
    /// AB positive
    #[serde(rename = "AB+")]
    ABPositive,
    /// AB negative
    #[serde(rename = "AB-")]
    ABNegative,
    /// O positive
    #[serde(rename = "O+")]
    OPositive,
    /// O negative
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups, in the order forms list them.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::ABPositive,
        BloodGroup::ABNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// The wire/display spelling, e.g. `"AB+"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::ABPositive => "AB+",
            BloodGroup::ABNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name one of the eight groups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown blood group: '{0}'")]
pub struct ParseBloodGroupError(pub String);

impl FromStr for BloodGroup {
    type Err = ParseBloodGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        BloodGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == normalized)
            .ok_or_else(|| ParseBloodGroupError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_groups() {
        for group in BloodGroup::ALL {
            assert_eq!(group.as_str().parse::<BloodGroup>(), Ok(group));
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(" ab+ ".parse::<BloodGroup>(), Ok(BloodGroup::ABPositive));
        assert_eq!("o-".parse::<BloodGroup>(), Ok(BloodGroup::ONegative));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "C+".parse::<BloodGroup>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown blood group: 'C+'");
        assert!("".parse::<BloodGroup>().is_err());
        assert!("A".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn test_serde_uses_conventional_spelling() {
        let json = serde_json::to_string(&BloodGroup::ABNegative).unwrap();
        assert_eq!(json, "\"AB-\"");

        let group: BloodGroup = serde_json::from_str("\"B+\"").unwrap();
        assert_eq!(group, BloodGroup::BPositive);
    }
}
