//! Readiness check with a real database probe.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// Readiness check endpoint.
///
/// Pings PostgreSQL when one is configured; the in-memory store is always
/// ready.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = &state.db {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string())
            }),
        ));
    }

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{body::Body, http::Request, http::StatusCode};
    use core_config::{server::ServerConfig, AppInfo};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn memory_state() -> AppState {
        AppState {
            config: Config {
                app: AppInfo {
                    name: "products_api",
                    version: "0.0.0",
                },
                database: None,
                run_migrations: false,
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db: None,
        }
    }

    #[tokio::test]
    async fn test_ready_without_database() {
        let app = crate::api::ready_router(memory_state());

        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"status":"ready"}"#);
    }

    #[tokio::test]
    async fn test_products_are_served_from_memory() {
        let app = crate::api::routes(&memory_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/manufacture-cost/average")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"0.0");
    }
}
