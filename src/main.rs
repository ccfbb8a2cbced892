use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, get};
use dotenvy::dotenv;

use cashew_payroll::config::Config;
use cashew_payroll::docs::ApiDoc;
use cashew_payroll::model::rates::RateSchedule;
use cashew_payroll::routes;

use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

fn load_rates(config: &Config) -> anyhow::Result<RateSchedule> {
    match &config.rates_file {
        Some(path) => RateSchedule::from_file(path),
        None => Ok(RateSchedule::builtin()),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // Rolling daily log, up before the rest of the config so its warnings land in it
    let file_appender = rolling::daily(Config::log_dir_from_env(), "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let config = Config::from_env();

    let schedule = load_rates(&config).map_err(|e| {
        error!(error = %format!("{e:#}"), "Failed to load statutory rates");
        std::io::Error::other(format!("{e:#}"))
    })?;
    for snapshot in schedule.snapshots() {
        info!(
            version = %snapshot.version,
            effective_from = %snapshot.effective_from,
            "Loaded rate snapshot"
        );
    }

    let server_addr = config.server_addr.clone();
    let schedule = Data::new(schedule);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(schedule.clone())
            .service(health)
            .configure(|cfg| routes::configure(cfg, config.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
