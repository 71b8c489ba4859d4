use crate::models::*;
use crate::services::FeaturedPropertyService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/featured-properties",
    tag = "featured-property",
    request_body = CreateFeaturedPropertyRequest,
    responses(
        (status = 201, description = "Featured property created", body = FeaturedPropertyResponse),
        (status = 400, description = "Missing field, image or invalid price"),
        (status = 409, description = "Slug already exists")
    )
)]
pub async fn create_featured_property(
    featured_service: web::Data<FeaturedPropertyService>,
    request: web::Json<CreateFeaturedPropertyRequest>,
) -> Result<HttpResponse> {
    match featured_service.create(request.into_inner()).await {
        Ok(property) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": property,
            "message": "Featured property created successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/featured-properties",
    tag = "featured-property",
    responses(
        (status = 200, description = "Active featured properties, newest first", body = [FeaturedPropertyResponse])
    )
)]
pub async fn list_featured_properties(
    featured_service: web::Data<FeaturedPropertyService>,
) -> Result<HttpResponse> {
    match featured_service.list_active().await {
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
    path = "/featured-properties/{slug}",
    tag = "featured-property",
    params(("slug" = String, Path, description = "Featured property slug")),
    responses(
        (status = 200, description = "Featured property", body = FeaturedPropertyResponse),
        (status = 404, description = "Missing or inactive")
    )
)]
pub async fn get_featured_property(
    featured_service: web::Data<FeaturedPropertyService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match featured_service.get_active(&path).await {
        Ok(property) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": property
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/featured-properties/{id}",
    tag = "featured-property",
    params(("id" = i64, Path, description = "Featured property id")),
    request_body = UpdateFeaturedPropertyRequest,
    responses(
        (status = 200, description = "Featured property updated", body = FeaturedPropertyResponse),
        (status = 404, description = "Featured property not found"),
        (status = 409, description = "Slug already exists")
    )
)]
pub async fn update_featured_property(
    featured_service: web::Data<FeaturedPropertyService>,
    path: web::Path<i64>,
    request: web::Json<UpdateFeaturedPropertyRequest>,
) -> Result<HttpResponse> {
    match featured_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(property) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": property,
            "message": "Featured property updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/featured-properties/{id}",
    tag = "featured-property",
    params(("id" = i64, Path, description = "Featured property id")),
    responses(
        (status = 200, description = "Featured property deleted"),
        (status = 404, description = "Featured property not found")
    )
)]
pub async fn delete_featured_property(
    featured_service: web::Data<FeaturedPropertyService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match featured_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Featured property deleted permanently"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn featured_property_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/featured-properties")
            .route("", web::post().to(create_featured_property))
            .route("", web::get().to(list_featured_properties))
            .route("/{slug}", web::get().to(get_featured_property))
            .route("/{id}", web::put().to(update_featured_property))
            .route("/{id}", web::delete().to(delete_featured_property)),
    );
}
