use crate::error::AppError;
use crate::models::*;
use crate::services::{CodeDelivery, LeadService, LeadVerificationService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/leads/send-otp",
    tag = "lead",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Verification code issued", body = SendOtpResponse),
        (status = 400, description = "Missing or invalid lead fields"),
        (status = 502, description = "Code issued but the email could not be sent")
    )
)]
pub async fn send_otp(
    verification_service: web::Data<LeadVerificationService>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse> {
    let issued = match verification_service.request_code(request.into_inner()).await {
        Ok(issued) => issued,
        Err(e) => return Ok(e.error_response()),
    };

    match issued.delivery {
        CodeDelivery::Failed(reason) => {
            Ok(AppError::NotificationError(format!(
                "Verification code issued but email delivery failed: {reason}"
            ))
            .error_response())
        }
        delivery => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": SendOtpResponse {
                expires_in: issued.expires_in,
                email_sent: delivery == CodeDelivery::Emailed,
            },
            "message": "OTP sent successfully"
        }))),
    }
}

#[utoipa::path(
    post,
    path = "/leads/verify-otp",
    tag = "lead",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Lead verified and stored", body = VerifyOtpResponse),
        (status = 400, description = "OTP_NOT_FOUND, OTP_EXPIRED or OTP_MISMATCH"),
        (status = 500, description = "Lead could not be stored; the code stays usable")
    )
)]
pub async fn verify_otp(
    verification_service: web::Data<LeadVerificationService>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    match verification_service
        .confirm_code(&request.phone, &request.otp)
        .await
    {
        Ok(confirmed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": VerifyOtpResponse {
                lead: confirmed.lead,
                admin_notified: confirmed.admin_notified,
            },
            "message": "Lead verified successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/leads/all",
    tag = "lead",
    responses(
        (status = 200, description = "All leads, newest first", body = [LeadResponse])
    )
)]
pub async fn list_leads(lead_service: web::Data<LeadService>) -> Result<HttpResponse> {
    match lead_service.list_leads().await {
        Ok(leads) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "count": leads.len(),
            "data": leads
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/leads/{id}",
    tag = "lead",
    params(("id" = i64, Path, description = "Lead id")),
    request_body = UpdateLeadRequest,
    responses(
        (status = 200, description = "Lead updated", body = LeadResponse),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn update_lead(
    lead_service: web::Data<LeadService>,
    path: web::Path<i64>,
    request: web::Json<UpdateLeadRequest>,
) -> Result<HttpResponse> {
    match lead_service
        .update_lead(path.into_inner(), request.into_inner())
        .await
    {
        Ok(lead) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": lead,
            "message": "Lead updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/leads/{id}",
    tag = "lead",
    params(("id" = i64, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead deleted"),
        (status = 404, description = "Lead not found")
    )
)]
pub async fn delete_lead(
    lead_service: web::Data<LeadService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match lead_service.delete_lead(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Lead deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn lead_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/leads")
            .route("/send-otp", web::post().to(send_otp))
            .route("/verify-otp", web::post().to(verify_otp))
            .route("/all", web::get().to(list_leads))
            .route("/{id}", web::put().to(update_lead))
            .route("/{id}", web::delete().to(delete_lead)),
    );
}
