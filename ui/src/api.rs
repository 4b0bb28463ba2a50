//! API client for communicating with the Lifeware server

use crate::state::AppState;
use crate::types::*;
use gloo_net::http::{Request, Response};
use leptos::prelude::*;
use leptos::task::spawn_local;
use lifeware_donor::{Donor, DonorQuery, DonorRegistration};

async fn error_message(resp: Response) -> String {
    let status = resp.status();
    match resp.json::<ApiError>().await {
        Ok(err) => err.error,
        Err(_) => format!("Request failed with status {}", status),
    }
}

/// GET a JSON resource
pub async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !resp.ok() {
        return Err(error_message(resp).await);
    }

    resp.json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn send_json<T: serde::Serialize>(url: &str, body: &T) -> Result<Response, String> {
    Request::post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))
}

/// POST a JSON body and decode a JSON reply
pub async fn post_json<T, R>(url: &str, body: &T) -> Result<R, String>
where
    T: serde::Serialize,
    R: serde::de::DeserializeOwned,
{
    let resp = send_json(url, body).await?;

    if !resp.ok() {
        return Err(error_message(resp).await);
    }

    resp.json::<R>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Fetch server status
pub async fn fetch_status(base_url: &str) -> Result<StatusResponse, String> {
    get_json(&format!("{}/api/status", base_url)).await
}

/// Fetch donors, filtered on the server when the query has any criteria
pub async fn fetch_donors(base_url: &str, query: &DonorQuery) -> Result<DonorListResponse, String> {
    let mut params = Vec::new();
    if let Some(q) = &query.search_query {
        params.push(format!("q={}", encode(q)));
    }
    if let Some(group) = &query.blood_group {
        params.push(format!("blood_group={}", encode(group.as_str())));
    }
    if let Some(location) = &query.location {
        params.push(format!("location={}", encode(location)));
    }

    let url = if params.is_empty() {
        format!("{}/api/donors", base_url)
    } else {
        format!("{}/api/donors?{}", base_url, params.join("&"))
    };
    get_json(&url).await
}

/// Fetch the number of registered donors
pub async fn fetch_count(base_url: &str) -> Result<usize, String> {
    let resp: DonorCountResponse = get_json(&format!("{}/api/donors/count", base_url)).await?;
    Ok(resp.count)
}

/// Submit a registration
pub async fn register(base_url: &str, registration: &DonorRegistration) -> Result<Donor, RegisterError> {
    let url = format!("{}/api/donors", base_url);
    let resp = send_json(&url, registration)
        .await
        .map_err(RegisterError::Failed)?;

    if resp.ok() {
        return resp
            .json::<Donor>()
            .await
            .map_err(|e| RegisterError::Failed(format!("Failed to parse response: {}", e)));
    }

    match resp.status() {
        422 => match resp.json::<ApiError>().await {
            Ok(ApiError {
                fields: Some(fields),
                ..
            }) => Err(RegisterError::Invalid(fields)),
            Ok(err) => Err(RegisterError::Failed(err.error)),
            Err(_) => Err(RegisterError::Failed("Please check the form".to_string())),
        },
        503 => Err(RegisterError::Failed(
            "Registration is unavailable until the database is configured.".to_string(),
        )),
        _ => Err(RegisterError::Failed(
            "Failed to register donor. Please try again.".to_string(),
        )),
    }
}

/// Send a chat message with the prior transcript
pub async fn send_chat(
    base_url: &str,
    message: &str,
    history: Vec<ChatTurn>,
) -> Result<ChatResponse, String> {
    let url = format!("{}/api/chat", base_url);
    let body = ChatRequest {
        message: message.to_string(),
        history,
    };
    post_json(&url, &body).await
}

/// Fetch the assistant's opening message
pub async fn fetch_greeting(base_url: &str) -> Result<String, String> {
    let resp: GreetingResponse = get_json(&format!("{}/api/chat/greeting", base_url)).await?;
    Ok(resp.message)
}

/// Load server status into app state
pub fn load_status(state: AppState) {
    spawn_local(async move {
        let base = state.api_base.get_untracked();
        match fetch_status(&base).await {
            Ok(status) => state.status.set(Some(status)),
            Err(e) => tracing::error!("Failed to load status: {}", e),
        }
    });
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}
