//! HTTP handlers and route configuration.

mod health;
mod posts;


use actix_web::web;

/// Configure all application routes.
///
/// The listing and detail pages are served both at the site root and
/// under `/api`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .route("/posts/{slug}", web::get().to(posts::show))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/posts", web::get().to(posts::index))
                .route("/posts/{slug}", web::get().to(posts::show)),
        );
}
