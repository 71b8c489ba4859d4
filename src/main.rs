use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use oaklyn_backend::{
    config::Config,
    database::{PgLeadRepository, create_pool, run_migrations},
    external::{AttachmentFetcher, BrevoClient, HttpAttachmentFetcher, NotificationGateway},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {e}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().map_err(|e| startup_error("Failed to load configuration", e))?;

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| startup_error("Failed to create database connection pool", e))?;

    run_migrations(&pool)
        .await
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    // Outbound collaborators
    let notifier: Arc<dyn NotificationGateway> = Arc::new(
        BrevoClient::new(config.mail.clone())
            .map_err(|e| startup_error("Failed to build mail client", e))?,
    );
    let fetcher: Arc<dyn AttachmentFetcher> = Arc::new(
        HttpAttachmentFetcher::new(config.mail.timeout())
            .map_err(|e| startup_error("Failed to build attachment client", e))?,
    );

    let (otp_store, sweeper) =
        OtpStore::with_sweeper(config.otp.ttl(), config.otp.sweep_interval());
    let verification_service = LeadVerificationService::new(
        otp_store.clone(),
        Arc::new(PgLeadRepository::new(pool.clone())),
        notifier.clone(),
        config.site.brand_name.clone(),
        config.site.admin_email.clone(),
    );
    let lead_service = LeadService::new(pool.clone());
    let subscriber_service = SubscriberService::new(pool.clone());
    let newsletter_service = NewsletterService::new(
        pool.clone(),
        notifier.clone(),
        fetcher,
        config.site.backend_url.clone(),
    );
    let property_service = PropertyService::new(pool.clone());
    let testimonial_service = TestimonialService::new(pool.clone());
    let blog_service = BlogService::new(pool.clone());
    let featured_property_service = FeaturedPropertyService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(verification_service.clone()))
            .app_data(web::Data::new(lead_service.clone()))
            .app_data(web::Data::new(subscriber_service.clone()))
            .app_data(web::Data::new(newsletter_service.clone()))
            .app_data(web::Data::new(property_service.clone()))
            .app_data(web::Data::new(testimonial_service.clone()))
            .app_data(web::Data::new(blog_service.clone()))
            .app_data(web::Data::new(featured_property_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api")
                    .configure(handlers::lead_config)
                    .configure(handlers::subscriber_config)
                    .configure(handlers::newsletter_config)
                    .configure(handlers::property_config)
                    .configure(handlers::testimonial_config)
                    .configure(handlers::blog_config)
                    .configure(handlers::featured_property_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await;

    sweeper.shutdown().await;
    server
}
