use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::leads::send_otp,
        handlers::leads::verify_otp,
        handlers::leads::list_leads,
        handlers::leads::update_lead,
        handlers::leads::delete_lead,
        handlers::subscriber::subscribe,
        handlers::subscriber::list_subscribers,
        handlers::subscriber::unsubscribe,
        handlers::subscriber::unsubscribe_by_token,
        handlers::subscriber::delete_subscriber,
        handlers::newsletter::send_newsletter,
        handlers::newsletter::list_newsletters,
        handlers::newsletter::get_newsletter,
        handlers::newsletter::delete_newsletter,
        handlers::property::create_property,
        handlers::property::list_properties,
        handlers::property::get_property,
        handlers::property::update_property,
        handlers::property::delete_property,
        handlers::testimonial::create_testimonial,
        handlers::testimonial::list_testimonials,
        handlers::testimonial::list_public_testimonials,
        handlers::testimonial::update_testimonial,
        handlers::testimonial::delete_testimonial,
        handlers::blog::create_blog,
        handlers::blog::list_blogs,
        handlers::blog::related_blogs,
        handlers::blog::update_blog,
        handlers::blog::update_cover_image,
        handlers::blog::delete_blog,
        handlers::featured_property::create_featured_property,
        handlers::featured_property::list_featured_properties,
        handlers::featured_property::get_featured_property,
        handlers::featured_property::update_featured_property,
        handlers::featured_property::delete_featured_property,
    ),
    components(
        schemas(
            SendOtpRequest,
            SendOtpResponse,
            VerifyOtpRequest,
            VerifyOtpResponse,
            LeadResponse,
            UpdateLeadRequest,
            SubscribeRequest,
            SubscriberResponse,
            AttachmentRef,
            CreateNewsletterRequest,
            NewsletterResponse,
            PropertyPurpose,
            CreatePropertyRequest,
            UpdatePropertyRequest,
            PropertyQuery,
            PropertyResponse,
            CreateTestimonialRequest,
            UpdateTestimonialRequest,
            TestimonialResponse,
            CreateBlogRequest,
            UpdateBlogRequest,
            UpdateCoverImageRequest,
            BlogResponse,
            CreateFeaturedPropertyRequest,
            UpdateFeaturedPropertyRequest,
            FeaturedPropertyResponse,
            ApiError,
        )
    ),
    tags(
        (name = "lead", description = "Phone-verified lead capture and lead admin API"),
        (name = "subscriber", description = "Newsletter subscriber API"),
        (name = "newsletter", description = "Newsletter sending API"),
        (name = "property", description = "Property listing API"),
        (name = "testimonial", description = "Testimonial API"),
        (name = "blog", description = "Blog post API"),
        (name = "featured-property", description = "Homepage featured property API"),
    ),
    info(
        title = "Oaklyn Backend API",
        version = "1.0.0",
        description = "Oaklyn Real Estates REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_lead_flow() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/leads/send-otp"));
        assert!(doc.paths.paths.contains_key("/leads/verify-otp"));
        assert!(doc.paths.paths.contains_key("/subscribers/unsubscribe/{token}"));
    }

    #[test]
    fn test_openapi_lists_content_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/blogs/related/{slug}"));
        assert!(doc.paths.paths.contains_key("/blogs/{slug}/image"));
        assert!(doc.paths.paths.contains_key("/featured-properties/{id}"));
    }
}
