use crate::models::*;
use crate::services::TestimonialService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/testimonials",
    tag = "testimonial",
    request_body = CreateTestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created", body = TestimonialResponse),
        (status = 400, description = "Missing name or message, or rating outside 1-5")
    )
)]
pub async fn create_testimonial(
    testimonial_service: web::Data<TestimonialService>,
    request: web::Json<CreateTestimonialRequest>,
) -> Result<HttpResponse> {
    match testimonial_service
        .create_testimonial(request.into_inner())
        .await
    {
        Ok(testimonial) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": testimonial,
            "message": "Testimonial created successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/testimonials",
    tag = "testimonial",
    responses(
        (status = 200, description = "All testimonials, newest first", body = [TestimonialResponse])
    )
)]
pub async fn list_testimonials(
    testimonial_service: web::Data<TestimonialService>,
) -> Result<HttpResponse> {
    match testimonial_service.list_testimonials().await {
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
    path = "/testimonials/public/list",
    tag = "testimonial",
    responses(
        (status = 200, description = "Latest active testimonials", body = [TestimonialResponse])
    )
)]
pub async fn list_public_testimonials(
    testimonial_service: web::Data<TestimonialService>,
) -> Result<HttpResponse> {
    match testimonial_service.list_public().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/testimonials/{id}",
    tag = "testimonial",
    params(("id" = i64, Path, description = "Testimonial id")),
    request_body = UpdateTestimonialRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = TestimonialResponse),
        (status = 404, description = "Testimonial not found")
    )
)]
pub async fn update_testimonial(
    testimonial_service: web::Data<TestimonialService>,
    path: web::Path<i64>,
    request: web::Json<UpdateTestimonialRequest>,
) -> Result<HttpResponse> {
    match testimonial_service
        .update_testimonial(path.into_inner(), request.into_inner())
        .await
    {
        Ok(testimonial) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": testimonial,
            "message": "Testimonial updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/testimonials/{id}",
    tag = "testimonial",
    params(("id" = i64, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial deleted"),
        (status = 404, description = "Testimonial not found")
    )
)]
pub async fn delete_testimonial(
    testimonial_service: web::Data<TestimonialService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match testimonial_service
        .delete_testimonial(path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Testimonial deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn testimonial_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/testimonials")
            .route("", web::post().to(create_testimonial))
            .route("", web::get().to(list_testimonials))
            .route("/public/list", web::get().to(list_public_testimonials))
            .route("/{id}", web::put().to(update_testimonial))
            .route("/{id}", web::delete().to(delete_testimonial)),
    );
}
