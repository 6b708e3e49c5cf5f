//! HTTP handlers and route configuration.

mod food;
mod health;
mod requests;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/food")
                    .route("", web::post().to(food::post_food))
                    .route("/available", web::get().to(food::available))
                    .route("/feed", web::get().to(food::feed))
                    .route("/mine", web::get().to(food::mine))
                    .route("/claimed", web::get().to(food::claimed))
                    .route("/inventory", web::get().to(food::inventory))
                    .route("/search", web::get().to(food::search))
                    .route("/dashboard", web::get().to(food::dashboard))
                    .route("/{id}/claim", web::post().to(food::claim))
                    .route("/{id}/ngo-claim", web::post().to(food::ngo_claim))
                    .route("/{id}/status", web::post().to(food::advance_status))
                    .route("/{id}/complete", web::post().to(food::complete))
                    .route("/{id}", web::delete().to(food::delete)),
            )
            .service(
                web::scope("/requests")
                    .route("", web::post().to(requests::create))
                    .route("/mine", web::get().to(requests::mine))
                    .route("/open", web::get().to(requests::open))
                    .route("/{id}/match", web::post().to(requests::match_food)),
            )
            .service(
                web::scope("/users")
                    .route("", web::post().to(users::register))
                    .route("/me", web::get().to(users::me))
                    .route("/me/type", web::put().to(users::set_type))
                    .route("/me/push-token", web::put().to(users::save_push_token)),
            ),
    );
}
