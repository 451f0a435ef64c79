use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::info;

use trustpage::api::services::{
    AppStartTime, health_routes, pages_routes, track_routes, visits_routes, webhook_routes,
};
use trustpage::config::{get_config, init_config};
use trustpage::services::quota::{AccountIdResolver, QuotaGate};
use trustpage::services::{BillingService, ViewTracker};
use trustpage::storage::StorageFactory;
use trustpage::system::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 记录程序启动时间
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();
    init_config();
    let config = get_config();

    // 日志 guard 需要存活到进程结束
    let _log_guard = init_logging(&config);

    let storage = StorageFactory::create()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Using storage backend: {}", storage.backend_name());

    let tracker = Arc::new(ViewTracker::new(storage.clone()));
    let billing = Arc::new(BillingService::new(storage.clone()));
    let quota_gate = Arc::new(QuotaGate::new(Arc::new(AccountIdResolver)));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(tracker.clone()))
            .app_data(web::Data::new(billing.clone()))
            .app_data(web::Data::new(quota_gate.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(
                web::scope("/api")
                    .service(track_routes())
                    .service(visits_routes())
                    .service(pages_routes())
                    .service(webhook_routes()),
            )
            .service(web::scope("/health").service(health_routes()))
    })
    .workers(config.server.cpu_count)
    .bind(bind_address)?
    .run()
    .await
}
