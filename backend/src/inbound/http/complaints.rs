//! Complaint handlers for logged-in users.
//!
//! ```text
//! POST /submitComplaint {"title":"Broken lift","summary":"...","rating":4}
//! GET /getAllComplaintsForUser
//! GET /viewComplaint?complaintID=<uuid>
//! ```
//!
//! Every handler requires a session established via `POST /login`; complaint
//! lookups are scoped to the logged-in user, so one user can never view
//! another's complaints.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Complaint, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{self, ComplaintSelector};

/// Complaint submission body for `POST /submitComplaint`.
///
/// Example JSON:
/// `{"title":"Broken lift","summary":"Stuck on floor 3 since Monday.","rating":4}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitComplaintRequest {
    pub title: String,
    pub summary: String,
    /// Severity rating between 1 and 5.
    #[schema(minimum = 1, maximum = 5, example = 4)]
    pub rating: i64,
}

/// Record a new complaint for the logged-in user.
#[utoipa::path(
    post,
    path = "/submitComplaint",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 201, description = "Complaint recorded", body = Complaint),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "User no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaint",
    security(("SessionCookie" = []))
)]
#[post("/submitComplaint")]
pub async fn submit_complaint(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let SubmitComplaintRequest {
        title,
        summary,
        rating,
    } = payload.into_inner();
    let draft = validation::complaint_draft(title, summary, rating)?;
    let complaint = state.store.submit_complaint(&user_id, draft).await?;
    tracing::info!(
        user_id = %user_id,
        complaint_id = %complaint.id(),
        "complaint submitted"
    );
    Ok(HttpResponse::Created().json(complaint))
}

/// List the logged-in user's complaints in submission order.
#[utoipa::path(
    get,
    path = "/getAllComplaintsForUser",
    responses(
        (status = 200, description = "The user's complaints, oldest first", body = [Complaint]),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "User no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "getAllComplaintsForUser",
    security(("SessionCookie" = []))
)]
#[get("/getAllComplaintsForUser")]
pub async fn get_all_complaints_for_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Complaint>>> {
    let user_id = session.require_user_id()?;
    let complaints = state.store.complaints_for_user(&user_id).await?;
    Ok(web::Json(complaints))
}

/// Fetch one of the logged-in user's complaints by identifier.
#[utoipa::path(
    get,
    path = "/viewComplaint",
    params(
        ("complaintID" = String, Query, description = "Identifier of the complaint to view")
    ),
    responses(
        (status = 200, description = "The selected complaint", body = Complaint),
        (status = 400, description = "Missing or malformed complaintID", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No such complaint for this user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "viewComplaint",
    security(("SessionCookie" = []))
)]
#[get("/viewComplaint")]
pub async fn view_complaint(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ComplaintSelector>,
) -> ApiResult<web::Json<Complaint>> {
    let user_id = session.require_user_id()?;
    let complaint_id = query.complaint_id()?;
    let complaint = state
        .store
        .complaint_for_user(&user_id, &complaint_id)
        .await?;
    Ok(web::Json(complaint))
}

#[cfg(test)]
#[path = "complaints_tests.rs"]
mod tests;
