//! HTTP API Handlers and Routes
//!
//! # API Endpoints
//!
//! ## Donors (`/api/donors`)
//! - `GET /api/donors` - List donors; `q`, `blood_group`, `location` filter
//! - `GET /api/donors/count` - Number of registered donors
//! - `POST /api/donors` - Register a donor
//!
//! ## Chat (`/api/chat`)
//! - `POST /api/chat` - Ask the health assistant (rate limited per client)
//! - `GET /api/chat/greeting` - Opening message
//!
//! ## Status
//! - `GET /api/health` - Liveness probe
//! - `GET /api/status` - Which backing services are configured
//!
//! The OpenAPI document is served at `/api/openapi.json`. With the
//! `swagger-ui` feature the interactive docs live at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::types::{
    ChatRequest, ChatResponse, ChatRole, ChatTurn, DonorCountResponse, DonorListResponse,
    GreetingResponse, StatusResponse,
};
use lifeware_donor::{BloodGroup, Donor, DonorId, DonorRegistration};
use utoipa::OpenApi;

/// OpenAPI description of the `/api` surface
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lifeware Collective API",
        description = "Blood donor directory and Thalassemia health assistant"
    ),
    paths(
        handlers::status::health_check,
        handlers::status::status,
        handlers::donors::list_donors,
        handlers::donors::donor_count,
        handlers::donors::register_donor,
        handlers::chat::chat,
        handlers::chat::greeting,
    ),
    components(schemas(
        BloodGroup,
        Donor,
        DonorId,
        DonorRegistration,
        DonorListResponse,
        DonorCountResponse,
        ChatRole,
        ChatTurn,
        ChatRequest,
        ChatResponse,
        GreetingResponse,
        StatusResponse,
    )),
    tags(
        (name = "donors", description = "Donor directory"),
        (name = "chat", description = "Lifela AI health assistant"),
        (name = "status", description = "Service health")
    )
)]
pub struct ApiDoc;
