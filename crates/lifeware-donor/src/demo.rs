use crate::{BloodGroup, Donor, DonorId};
use chrono::NaiveDate;

/// The directory shown when no store is configured.
///
/// Ordered by name, like a real directory listing.
pub fn demo_donors() -> Vec<Donor> {
    let rows = [
        (4, "David Kim", BloodGroup::ABPositive, "Houston, TX", (2024, 2, 10)),
        (3, "Emily Rodriguez", BloodGroup::BPositive, "Chicago, IL", (2024, 1, 20)),
        (5, "Lisa Thompson", BloodGroup::ONegative, "Phoenix, AZ", (2024, 1, 25)),
        (2, "Michael Chen", BloodGroup::ANegative, "Los Angeles, CA", (2024, 2, 1)),
        (1, "Sarah Johnson", BloodGroup::OPositive, "New York, NY", (2024, 1, 15)),
    ];

    rows.into_iter()
        .map(|(id, name, group, location, (y, m, d))| Donor {
            id: Some(DonorId::Int(id)),
            name: name.to_string(),
            blood_group: Some(group),
            age: None,
            location: location.to_string(),
            email: None,
            phone_number: None,
            last_donated: NaiveDate::from_ymd_opt(y, m, d),
            availability: Some("available".to_string()),
            created_at: None,
        })
        .collect()
}
