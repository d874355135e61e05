pub mod companies;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod interviews;
pub mod practice;
pub mod records;

use actix_web::web;

use error::ApiError;
use records::CollectionRecord;

/// Registers get/create/update/delete for one collection under `base`.
/// List routes and any fixed sub-paths must be registered first, since
/// `{base}/{id}` would otherwise shadow them.
fn record_routes<T: CollectionRecord>(cfg: &mut web::ServiceConfig, base: &str) {
    let item = format!("{}/{{id}}", base);

    cfg.route(base, web::post().to(records::create_record::<T>))
        .route(base, web::put().to(records::update_by_body::<T>))
        .route(base, web::delete().to(records::delete_by_body::<T>))
        .route(&item, web::get().to(records::get_record::<T>))
        .route(&item, web::put().to(records::update_record::<T>))
        .route(&item, web::delete().to(records::delete_record::<T>));
}

/// Mounts the whole HTTP API.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(health::hello))
    .route("/health", web::get().to(health::health))
    .route("/api/dashboard", web::get().to(dashboard::get_dashboard))
    .route("/api/companies", web::get().to(companies::list_companies))
    .route("/api/interviews", web::get().to(interviews::list_interviews))
    .route(
        "/api/interviews/upcoming",
        web::get().to(interviews::upcoming_interviews),
    )
    .route("/api/practice", web::get().to(practice::list_sessions))
    .route("/api/practice/recent", web::get().to(practice::recent_sessions));

    record_routes::<shared_types::Company>(cfg, "/api/companies");
    record_routes::<shared_types::Interview>(cfg, "/api/interviews");
    record_routes::<shared_types::PracticeSession>(cfg, "/api/practice");
}
