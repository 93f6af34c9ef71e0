//! HTTP handlers and route configuration.

mod blogs;
mod health;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies get the same problem-details shape as other errors.
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    cfg.app_data(json_config).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Blog routes; writes are gated on the admin credential
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(blogs::list_posts))
                    .route("", web::post().to(blogs::create_post))
                    .route("/{id}", web::get().to(blogs::get_post))
                    .route("/{id}", web::put().to(blogs::update_post)),
            ),
    );
}
