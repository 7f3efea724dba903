use actix_web::web;

use crate::handlers::balances;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/balances")
            .route(
                "/{employee_id}",
                web::get().to(balances::get_employee_balances),
            )
            .route("/{employee_id}", web::put().to(balances::set_allocation)),
    );
}
