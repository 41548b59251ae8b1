//! Admin endpoints for complaint triage.
//!
//! ```text
//! GET /getAllComplaintsForAdmin
//! PATCH /resolveComplaint?complaintID=<uuid>
//! ```
//!
//! Both endpoints authenticate with `Authorization: Bearer <token>` against
//! the configured admin token rather than a session cookie.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, get, patch, web};

use crate::domain::{Complaint, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::ComplaintSelector;

/// List every complaint across all users.
#[utoipa::path(
    get,
    path = "/getAllComplaintsForAdmin",
    responses(
        (status = 200, description = "All complaints in stable identifier order", body = [Complaint]),
        (status = 401, description = "Admin token required", body = Error),
        (status = 403, description = "Admin token rejected", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "getAllComplaintsForAdmin",
    security(("AdminBearer" = []))
)]
#[get("/getAllComplaintsForAdmin")]
pub async fn get_all_complaints_for_admin(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<Complaint>>> {
    state.admin.authorise(&req)?;
    let complaints = state.store.all_complaints().await?;
    Ok(web::Json(complaints))
}

/// Mark a complaint as resolved.
#[utoipa::path(
    patch,
    path = "/resolveComplaint",
    params(
        ("complaintID" = String, Query, description = "Identifier of the complaint to resolve")
    ),
    responses(
        (status = 200, description = "Complaint marked resolved", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing or malformed complaintID", body = Error),
        (status = 401, description = "Admin token required", body = Error),
        (status = 403, description = "Admin token rejected", body = Error),
        (status = 404, description = "No such complaint", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "resolveComplaint",
    security(("AdminBearer" = []))
)]
#[patch("/resolveComplaint")]
pub async fn resolve_complaint(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<ComplaintSelector>,
) -> ApiResult<HttpResponse> {
    state.admin.authorise(&req)?;
    let complaint_id = query.complaint_id()?;
    state.store.resolve_complaint(&complaint_id).await?;
    tracing::info!(complaint_id = %complaint_id, "complaint resolved");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Complaint resolved successfully"))
}
