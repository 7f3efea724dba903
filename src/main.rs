use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use leaveflow::domain::models::{Holiday, HolidayType, LeaveType};
use leaveflow::store::{
    BalanceRepository, DirectoryRepository, EmployeeContact, HolidayRepository, RequestRepository,
};
use leaveflow::{Config, LogNotifier, RequestService};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("LeaveFlow API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    println!("🚀 Starting LeaveFlow API server...");

    // Load configuration
    let config = Config::from_env()?;
    println!(
        "📋 Configuration loaded (environment: {})",
        config.environment
    );

    // Initialize stores and the orchestrator
    let requests = RequestRepository::new();
    let balances = BalanceRepository::new();
    let holidays = HolidayRepository::new();
    let directory = DirectoryRepository::new();

    let service = RequestService::new(
        requests.clone(),
        balances.clone(),
        holidays.clone(),
        directory.clone(),
        Arc::new(LogNotifier),
    );

    if config.is_development() {
        seed_demo_data(&balances, &holidays, &directory).await;
    }

    let service_data = web::Data::new(service);
    let balances_data = web::Data::new(balances);
    let holidays_data = web::Data::new(holidays);

    let address = config.server_address();
    println!("🌐 Listening on http://{}", address);

    HttpServer::new(move || {
        // Lock CORS down to the client origin outside development
        let cors = if config.is_production() {
            Cors::default()
                .allowed_origin(&config.client_base_url)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        };

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(service_data.clone())
            .app_data(balances_data.clone())
            .app_data(holidays_data.clone())
            .service(hello)
            .service(health)
            .configure(leaveflow::routes::configure)
    })
    .bind(&address)?
    .run()
    .await?;

    Ok(())
}

/// Development-mode seed so the server is usable out of the box: one demo
/// employee with vacation/sick allocations and a couple of holidays.
async fn seed_demo_data(
    balances: &BalanceRepository,
    holidays: &HolidayRepository,
    directory: &DirectoryRepository,
) {
    let year = Utc::now().year();
    let employee_id = Uuid::new_v4();

    directory
        .upsert(EmployeeContact {
            employee_id,
            name: "Demo Employee".to_string(),
            email: "demo.employee@example.com".to_string(),
        })
        .await;

    balances
        .set_allocation(employee_id, LeaveType::Vacation, year, BigDecimal::from(20))
        .await;
    balances
        .set_allocation(employee_id, LeaveType::Sick, year, BigDecimal::from(10))
        .await;
    balances
        .set_allocation(employee_id, LeaveType::Personal, year, BigDecimal::from(5))
        .await;

    if let Some(new_year) = NaiveDate::from_ymd_opt(year, 1, 1) {
        holidays
            .upsert(Holiday {
                date: new_year,
                kind: HolidayType::National,
                name: "New Year's Day".to_string(),
            })
            .await;
    }
    if let Some(christmas) = NaiveDate::from_ymd_opt(year, 12, 25) {
        holidays
            .upsert(Holiday {
                date: christmas,
                kind: HolidayType::National,
                name: "Christmas Day".to_string(),
            })
            .await;
    }

    println!("🌱 Seeded demo data (employee id: {})", employee_id);
}
