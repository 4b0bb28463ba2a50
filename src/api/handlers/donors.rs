use crate::{
    types::{AppError, DonorCountResponse, DonorListResponse, Result},
    AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use lifeware_donor::{BloodGroup, Donor, DonorQuery, DonorRegistration};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query string accepted by `GET /api/donors`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DonorSearchParams {
    /// Case-insensitive text matched against name and location
    pub q: Option<String>,
    /// Exact blood group, e.g. `O+`
    pub blood_group: Option<String>,
    /// Case-insensitive location substring
    pub location: Option<String>,
}

impl DonorSearchParams {
    fn into_query(self) -> Result<DonorQuery> {
        let blood_group = match self.blood_group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<BloodGroup>()
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?,
            ),
        };

        Ok(DonorQuery {
            search_query: self.q,
            blood_group,
            location: self.location,
        })
    }
}

/// List donors, or search them when any filter is given
#[utoipa::path(
    get,
    path = "/api/donors",
    params(DonorSearchParams),
    responses(
        (status = 200, description = "Donors ordered by name", body = DonorListResponse),
        (status = 400, description = "Unknown blood group")
    ),
    tag = "donors"
)]
pub async fn list_donors(
    State(state): State<AppState>,
    Query(params): Query<DonorSearchParams>,
) -> Result<Json<DonorListResponse>> {
    let query = params.into_query()?;

    let listing = if query.is_empty() {
        state.donors.list_donors().await
    } else {
        state.donors.search_donors(query).await
    };

    Ok(Json(DonorListResponse {
        total: listing.donors.len(),
        donors: listing.donors,
        demo: listing.demo,
    }))
}

/// Number of registered donors
#[utoipa::path(
    get,
    path = "/api/donors/count",
    responses(
        (status = 200, description = "Donor count", body = DonorCountResponse)
    ),
    tag = "donors"
)]
pub async fn donor_count(State(state): State<AppState>) -> Json<DonorCountResponse> {
    Json(DonorCountResponse {
        count: state.donors.donor_count().await,
    })
}

/// Register a new donor
#[utoipa::path(
    post,
    path = "/api/donors",
    request_body = DonorRegistration,
    responses(
        (status = 201, description = "Donor registered", body = Donor),
        (status = 422, description = "Field validation failed"),
        (status = 502, description = "Database rejected the insert"),
        (status = 503, description = "Database not configured")
    ),
    tag = "donors"
)]
pub async fn register_donor(
    State(state): State<AppState>,
    Json(registration): Json<DonorRegistration>,
) -> Result<(StatusCode, Json<Donor>)> {
    let donor = state.donors.register_donor(registration).await?;
    Ok((StatusCode::CREATED, Json(donor)))
}
