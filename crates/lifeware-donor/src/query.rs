//! Directory filtering.

use crate::{BloodGroup, Donor};
use serde::{Deserialize, Serialize};

/// Criteria for narrowing the donor directory.
///
/// Absent (or blank) criteria match every donor. Text criteria are
/// case-insensitive substring matches; the blood group must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DonorQuery {
    /// Matches against name or location
    #[serde(default, alias = "q", skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    /// Exact blood group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    /// Matches against location only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl DonorQuery {
    /// Trim text criteria and drop the blank ones.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            search_query: clean(self.search_query),
            blood_group: self.blood_group,
            location: clean(self.location),
        }
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or("").is_empty();
        blank(&self.search_query) && self.blood_group.is_none() && blank(&self.location)
    }

    /// Does this donor satisfy every criterion?
    pub fn matches(&self, donor: &Donor) -> bool {
        let name = donor.name.to_lowercase();
        let location = donor.location.to_lowercase();

        let matches_query = match needle(&self.search_query) {
            Some(q) => name.contains(&q) || location.contains(&q),
            None => true,
        };
        let matches_group = match self.blood_group {
            Some(group) => donor.blood_group == Some(group),
            None => true,
        };
        let matches_location = match needle(&self.location) {
            Some(l) => location.contains(&l),
            None => true,
        };

        matches_query && matches_group && matches_location
    }

    /// The donors that satisfy every criterion, in their original order.
    pub fn apply(&self, donors: &[Donor]) -> Vec<Donor> {
        donors.iter().filter(|d| self.matches(d)).cloned().collect()
    }
}

fn needle(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_donors;

    fn query(q: Option<&str>, group: Option<BloodGroup>, location: Option<&str>) -> DonorQuery {
        DonorQuery {
            search_query: q.map(str::to_string),
            blood_group: group,
            location: location.map(str::to_string),
        }
    }

    fn names(donors: &[Donor]) -> Vec<&str> {
        donors.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let donors = demo_donors();
        let q = DonorQuery::default();
        assert!(q.is_empty());
        assert_eq!(q.apply(&donors).len(), donors.len());
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_location() {
        let donors = demo_donors();
        assert_eq!(
            names(&query(Some("EMILY"), None, None).apply(&donors)),
            vec!["Emily Rodriguez"]
        );
        assert_eq!(
            names(&query(Some("houston"), None, None).apply(&donors)),
            vec!["David Kim"]
        );
        // substring, not prefix
        assert_eq!(
            names(&query(Some("ngeles"), None, None).apply(&donors)),
            vec!["Michael Chen"]
        );
    }

    #[test]
    fn test_blood_group_is_exact() {
        let donors = demo_donors();
        let matched = query(None, Some(BloodGroup::OPositive), None).apply(&donors);
        assert_eq!(names(&matched), vec!["Sarah Johnson"]);

        let none = query(None, Some(BloodGroup::ABNegative), None).apply(&donors);
        assert!(none.is_empty());
    }

    #[test]
    fn test_location_filter_ignores_name() {
        let donors = demo_donors();
        // "Kim" is a name, not a location
        assert!(query(None, None, Some("kim")).apply(&donors).is_empty());
        assert_eq!(
            names(&query(None, None, Some(", az")).apply(&donors)),
            vec!["Lisa Thompson"]
        );
    }

    #[test]
    fn test_criteria_combine() {
        let donors = demo_donors();
        assert!(query(Some("sarah"), Some(BloodGroup::ANegative), None)
            .apply(&donors)
            .is_empty());
        assert_eq!(
            names(&query(Some("sarah"), Some(BloodGroup::OPositive), Some("york")).apply(&donors)),
            vec!["Sarah Johnson"]
        );
    }

    #[test]
    fn test_donor_without_group_only_matches_without_group_filter() {
        let mut donors = demo_donors();
        if let Some(sarah) = donors.iter_mut().find(|d| d.name == "Sarah Johnson") {
            sarah.blood_group = None;
        }
        assert!(query(None, Some(BloodGroup::OPositive), None)
            .apply(&donors)
            .is_empty());
        assert_eq!(query(Some("sarah"), None, None).apply(&donors).len(), 1);
    }

    #[test]
    fn test_normalized_drops_blank_text() {
        let q = query(Some("  "), None, Some(" Chicago ")).normalized();
        assert_eq!(q.search_query, None);
        assert_eq!(q.location.as_deref(), Some("Chicago"));
        assert!(!q.is_empty());
        assert!(query(Some(" "), None, Some("")).is_empty());
    }
}
