use axum::{routing::get, Router};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use videodub_server::{
    api, catalog::VideoCatalog, config::Config, lifecycle::TranslationManager, migrator,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present (dotenvy)
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    videodub_server::telemetry::init_telemetry("videodub-server", &config.telemetry)?;

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let db = Database::connect(&config.database_url).await?;

    if config.run_migrations {
        migrator::Migrator::up(&db, None).await?;
    }

    videodub_server::metrics::init_metrics(&db).await;

    let catalog = VideoCatalog::new(db.clone());
    let manager =
        TranslationManager::new(db, catalog.clone()).with_policy(config.transition_policy);
    tracing::info!(policy = ?manager.policy(), "Translation lifecycle ready");

    let cors_origin = config.cors_origin.parse::<axum::http::HeaderValue>()?;

    let app = api::router(catalog, manager)
        .layer(prometheus_layer)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());

                    // "PATCH /translations/:id" rather than the concrete uri
                    let span_name = match matched_path {
                        Some(path) => format!("{} {}", request.method(), path),
                        None => format!("{} {}", request.method(), request.uri().path()),
                    };

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(|_request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(cors_origin)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        );

    let app = Router::new()
        .merge(app)
        .route("/metrics", get(|| async move { metric_handle.render() }));

    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
