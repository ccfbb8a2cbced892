use crate::{api::payroll, config::Config, error::ApiError};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_default();
    Governor::new(&cfg)
}

/// JSON extractor settings: malformed bodies get the usual `{"message": ..}` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _| ApiError::BadPayload(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.app_data(json_config());

    let calculate_limiter = Arc::new(build_limiter(config.rate_calculate_per_min));

    cfg.service(
        web::scope(&config.api_prefix).service(
            web::scope("/payroll")
                // /payroll/calculate
                .service(
                    web::resource("/calculate")
                        .wrap(calculate_limiter)
                        .route(web::post().to(payroll::calculate_payroll)),
                )
                // /payroll/rates
                .service(web::resource("/rates").route(web::get().to(payroll::list_rates))),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rates::RateSchedule;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;
    use std::net::SocketAddr;

    fn config(prefix: &str, per_min: u32) -> Config {
        Config {
            server_addr: "127.0.0.1:0".to_string(),
            api_prefix: prefix.to_string(),
            rate_calculate_per_min: per_min,
            rates_file: None,
            log_dir: "logs".to_string(),
        }
    }

    fn peer() -> SocketAddr {
        "10.0.0.7:40000".parse().unwrap()
    }

    #[actix_web::test]
    async fn mounts_under_configured_prefix() {
        let cfg = config("/payroll-api", 100);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(RateSchedule::builtin()))
                .configure(|c| configure(c, cfg.clone())),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/payroll-api/payroll/rates")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/payroll/rates").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn limits_calculations_per_peer() {
        let cfg = config("/api", 2);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(RateSchedule::builtin()))
                .configure(|c| configure(c, cfg.clone())),
        )
        .await;

        let mut statuses = Vec::new();
        for _ in 0..3 {
            let req = test::TestRequest::post()
                .uri("/api/payroll/calculate")
                .peer_addr(peer())
                .set_json(json!({ "month": "2025-04", "earnings": { "basic": 1000 } }))
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }

        assert_eq!(statuses, [StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]);
    }
}
