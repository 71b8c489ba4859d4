use crate::models::*;
use crate::services::SubscriberService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/subscribers",
    tag = "subscriber",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = SubscriberResponse),
        (status = 400, description = "Missing or invalid email"),
        (status = 409, description = "Email already subscribed")
    )
)]
pub async fn subscribe(
    subscriber_service: web::Data<SubscriberService>,
    request: web::Json<SubscribeRequest>,
) -> Result<HttpResponse> {
    match subscriber_service.subscribe(request.into_inner()).await {
        Ok(subscriber) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": subscriber,
            "message": "Subscribed successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscribers",
    tag = "subscriber",
    responses(
        (status = 200, description = "All subscribers, newest first", body = [SubscriberResponse])
    )
)]
pub async fn list_subscribers(
    subscriber_service: web::Data<SubscriberService>,
) -> Result<HttpResponse> {
    match subscriber_service.list_subscribers().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "count": list.len(),
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/subscribers/{id}/unsubscribe",
    tag = "subscriber",
    params(("id" = i64, Path, description = "Subscriber id")),
    responses(
        (status = 200, description = "Subscriber deactivated", body = SubscriberResponse),
        (status = 404, description = "Subscriber not found")
    )
)]
pub async fn unsubscribe(
    subscriber_service: web::Data<SubscriberService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match subscriber_service.unsubscribe(path.into_inner()).await {
        Ok(subscriber) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": subscriber,
            "message": "Unsubscribed successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscribers/unsubscribe/{token}",
    tag = "subscriber",
    params(("token" = String, Path, description = "Unsubscribe token from the email footer")),
    responses(
        (status = 200, description = "Subscriber deactivated"),
        (status = 404, description = "Unknown token")
    )
)]
pub async fn unsubscribe_by_token(
    subscriber_service: web::Data<SubscriberService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match subscriber_service.unsubscribe_by_token(&path).await {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "You have been unsubscribed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/subscribers/{id}",
    tag = "subscriber",
    params(("id" = i64, Path, description = "Subscriber id")),
    responses(
        (status = 200, description = "Subscriber deleted"),
        (status = 404, description = "Subscriber not found")
    )
)]
pub async fn delete_subscriber(
    subscriber_service: web::Data<SubscriberService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match subscriber_service.delete_subscriber(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Subscriber deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscriber_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscribers")
            .route("", web::post().to(subscribe))
            .route("", web::get().to(list_subscribers))
            .route("/unsubscribe/{token}", web::get().to(unsubscribe_by_token))
            .route("/{id}/unsubscribe", web::patch().to(unsubscribe))
            .route("/{id}", web::delete().to(delete_subscriber)),
    );
}
