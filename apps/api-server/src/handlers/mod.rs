//! HTTP handlers and route configuration.

mod auth;
mod health;
mod todos;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and ids become RFC 7807 400s.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    );

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/users", web::post().to(auth::sign_up))
            .route("/session", web::post().to(auth::login))
            // Authenticated routes
            .route("/me", web::get().to(auth::me))
            .service(
                web::scope("/todos")
                    .route("", web::get().to(todos::list))
                    .route("", web::post().to(todos::create))
                    .route("/{id}", web::get().to(todos::show))
                    .route("/{id}", web::put().to(todos::update))
                    .route("/{id}", web::delete().to(todos::delete)),
            ),
    );
}
