use actix_web::web;

use crate::handlers::requests;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/requests")
            .route("", web::post().to(requests::create_request))
            .route("", web::get().to(requests::get_requests))
            .route("/preview", web::get().to(requests::preview_days))
            .route("/{id}", web::get().to(requests::get_request))
            .route("/{id}/approve", web::post().to(requests::approve_request))
            .route("/{id}/decline", web::post().to(requests::decline_request))
            .route(
                "/{id}/republish",
                web::post().to(requests::republish_request),
            ),
    );
}
