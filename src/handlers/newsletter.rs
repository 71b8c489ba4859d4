use crate::models::*;
use crate::services::NewsletterService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/newsletters",
    tag = "newsletter",
    request_body = CreateNewsletterRequest,
    responses(
        (status = 201, description = "Newsletter stored and sent", body = NewsletterResponse),
        (status = 400, description = "Invalid request or no active subscribers"),
        (status = 502, description = "An attachment could not be fetched")
    )
)]
pub async fn send_newsletter(
    newsletter_service: web::Data<NewsletterService>,
    request: web::Json<CreateNewsletterRequest>,
) -> Result<HttpResponse> {
    match newsletter_service.send_newsletter(request.into_inner()).await {
        Ok(newsletter) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": newsletter,
            "message": format!(
                "Newsletter sent to {} of {} subscribers",
                newsletter.delivered_count, newsletter.total_recipients
            )
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/newsletters",
    tag = "newsletter",
    responses(
        (status = 200, description = "Sent newsletters, newest first", body = [NewsletterResponse])
    )
)]
pub async fn list_newsletters(
    newsletter_service: web::Data<NewsletterService>,
) -> Result<HttpResponse> {
    match newsletter_service.list_newsletters().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "count": list.len(),
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/newsletters/{id}",
    tag = "newsletter",
    params(("id" = i64, Path, description = "Newsletter id")),
    responses(
        (status = 200, description = "Newsletter", body = NewsletterResponse),
        (status = 404, description = "Newsletter not found")
    )
)]
pub async fn get_newsletter(
    newsletter_service: web::Data<NewsletterService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match newsletter_service.get_newsletter(path.into_inner()).await {
        Ok(newsletter) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": newsletter
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/newsletters/{id}",
    tag = "newsletter",
    params(("id" = i64, Path, description = "Newsletter id")),
    responses(
        (status = 200, description = "Newsletter deleted"),
        (status = 404, description = "Newsletter not found")
    )
)]
pub async fn delete_newsletter(
    newsletter_service: web::Data<NewsletterService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match newsletter_service.delete_newsletter(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Newsletter deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn newsletter_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/newsletters")
            .route("", web::post().to(send_newsletter))
            .route("", web::get().to(list_newsletters))
            .route("/{id}", web::get().to(get_newsletter))
            .route("/{id}", web::delete().to(delete_newsletter)),
    );
}
