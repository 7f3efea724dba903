use actix_web::web;

pub mod balances;
pub mod holidays;
pub mod requests;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(requests::configure)
            .configure(balances::configure)
            .configure(holidays::configure),
    );
}
