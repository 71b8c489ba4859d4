use crate::models::*;
use crate::services::BlogService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/blogs/add",
    tag = "blog",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog post created", body = BlogResponse),
        (status = 400, description = "Missing required field or cover image"),
        (status = 409, description = "Slug already taken")
    )
)]
pub async fn create_blog(
    blog_service: web::Data<BlogService>,
    request: web::Json<CreateBlogRequest>,
) -> Result<HttpResponse> {
    match blog_service.create_blog(request.into_inner()).await {
        Ok(blog) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": blog,
            "message": "Blog post created successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/blogs/viewblog",
    tag = "blog",
    responses(
        (status = 200, description = "All blog posts, newest first", body = [BlogResponse])
    )
)]
pub async fn list_blogs(blog_service: web::Data<BlogService>) -> Result<HttpResponse> {
    match blog_service.list_blogs().await {
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
    path = "/blogs/related/{slug}",
    tag = "blog",
    params(("slug" = String, Path, description = "Slug of the post being read")),
    responses(
        (status = 200, description = "Up to four related posts", body = [BlogResponse]),
        (status = 404, description = "Blog post not found")
    )
)]
pub async fn related_blogs(
    blog_service: web::Data<BlogService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match blog_service.related_blogs(&path).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": list
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/blogs/{slug}",
    tag = "blog",
    params(("slug" = String, Path, description = "Blog slug")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog post updated", body = BlogResponse),
        (status = 404, description = "Blog post not found")
    )
)]
pub async fn update_blog(
    blog_service: web::Data<BlogService>,
    path: web::Path<String>,
    request: web::Json<UpdateBlogRequest>,
) -> Result<HttpResponse> {
    match blog_service.update_blog(&path, request.into_inner()).await {
        Ok(blog) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": blog,
            "message": "Blog post updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/blogs/{slug}/image",
    tag = "blog",
    params(("slug" = String, Path, description = "Blog slug")),
    request_body = UpdateCoverImageRequest,
    responses(
        (status = 200, description = "Cover image replaced", body = BlogResponse),
        (status = 400, description = "No image URL given"),
        (status = 404, description = "Blog post not found")
    )
)]
pub async fn update_cover_image(
    blog_service: web::Data<BlogService>,
    path: web::Path<String>,
    request: web::Json<UpdateCoverImageRequest>,
) -> Result<HttpResponse> {
    match blog_service
        .update_cover_image(&path, request.into_inner())
        .await
    {
        Ok(blog) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": blog,
            "message": "Cover image updated successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/blogs/{slug}",
    tag = "blog",
    params(("slug" = String, Path, description = "Blog slug")),
    responses(
        (status = 200, description = "Blog post deleted"),
        (status = 404, description = "Blog post not found")
    )
)]
pub async fn delete_blog(
    blog_service: web::Data<BlogService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match blog_service.delete_blog(&path).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Blog post deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn blog_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blogs")
            .route("/add", web::post().to(create_blog))
            .route("/viewblog", web::get().to(list_blogs))
            .route("/related/{slug}", web::get().to(related_blogs))
            .route("/{slug}", web::put().to(update_blog))
            .route("/{slug}", web::delete().to(delete_blog))
            .route("/{slug}/image", web::patch().to(update_cover_image)),
    );
}
