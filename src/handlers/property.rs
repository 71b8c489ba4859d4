use crate::models::*;
use crate::services::PropertyService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/properties",
    tag = "property",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = PropertyResponse),
        (status = 400, description = "Title, purpose and location are required"),
        (status = 409, description = "Slug already taken")
    )
)]
pub async fn create_property(
    property_service: web::Data<PropertyService>,
    request: web::Json<CreatePropertyRequest>,
) -> Result<HttpResponse> {
    match property_service.create_property(request.into_inner()).await {
        Ok(property) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": property,
            "message": "Property created successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/properties",
    tag = "property",
    params(PropertyQuery),
    responses(
        (status = 200, description = "Filtered page of properties, newest first")
    )
)]
pub async fn list_properties(
    property_service: web::Data<PropertyService>,
    query: web::Query<PropertyQuery>,
) -> Result<HttpResponse> {
    match property_service.list_properties(&query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/properties/{slug}",
    tag = "property",
    params(("slug" = String, Path, description = "Property slug")),
    responses(
        (status = 200, description = "Property", body = PropertyResponse),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    property_service: web::Data<PropertyService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match property_service.get_property(&path).await {
        Ok(property) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": property
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/properties/{slug}",
    tag = "property",
    params(("slug" = String, Path, description = "Property slug")),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = PropertyResponse),
        (status = 404, description = "Property not found"),
        (status = 409, description = "New title collides with another slug")
    )
)]
pub async fn update_property(
    property_service: web::Data<PropertyService>,
    path: web::Path<String>,
    request: web::Json<UpdatePropertyRequest>,
) -> Result<HttpResponse> {
    match property_service
        .update_property(&path, request.into_inner())
        .await
    {
        Ok(property) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": property,
            "message": "Property updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/properties/{slug}",
    tag = "property",
    params(("slug" = String, Path, description = "Property slug")),
    responses(
        (status = 200, description = "Property deleted"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn delete_property(
    property_service: web::Data<PropertyService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match property_service.delete_property(&path).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Property deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn property_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/properties")
            .route("", web::post().to(create_property))
            .route("", web::get().to(list_properties))
            .route("/{slug}", web::get().to(get_property))
            .route("/{slug}", web::patch().to(update_property))
            .route("/{slug}", web::delete().to(delete_property)),
    );
}
