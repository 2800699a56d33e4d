use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockbrief_core::domain::report::Report;
use stockbrief_core::domain::ticker::MAX_TICKERS;
use stockbrief_core::error::ReportError;
use stockbrief_core::market::HttpMarketData;
use stockbrief_core::pipeline::ReportEngine;
use stockbrief_core::summary::HttpSummaryClient;

const INDEX_HTML: &str = include_str!("index.html");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockbrief_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let market = HttpMarketData::from_settings(&settings)?;
    let summary = HttpSummaryClient::from_settings(&settings)?;

    let state = AppState {
        engine: Arc::new(ReportEngine::new(Arc::new(market), Arc::new(summary))),
        busy: Arc::new(AtomicBool::new(false)),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/report", post(generate_report))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    engine: Arc<ReportEngine>,
    busy: Arc<AtomicBool>,
}

/// Single-flight guard for the one report run this service drives at a time.
/// The flag is reset on drop, so every exit path, including panics, returns
/// the service to idle.
struct RunGuard(Arc<AtomicBool>);

impl RunGuard {
    fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Deserialize)]
struct ReportRequest {
    tickers: Vec<String>,
}

async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> Result<Json<Report>, ApiError> {
    let _guard = RunGuard::try_acquire(&state.busy).ok_or(ApiError::Busy)?;

    if req.tickers.len() > MAX_TICKERS {
        return Err(ReportError::Validation(format!(
            "at most {MAX_TICKERS} tickers are supported (got {})",
            req.tickers.len()
        ))
        .into());
    }

    let report = state
        .engine
        .generate(&req.tickers, chrono::Utc::now())
        .await
        .map_err(|err| {
            let detail = anyhow::Error::new(err.clone());
            sentry_anyhow::capture_anyhow(&detail);
            tracing::error!(error = %err, "report generation failed");
            ApiError::from(err)
        })?;

    tracing::info!(tickers = report.tickers.len(), "report generated");
    Ok(Json(report))
}

#[derive(Debug)]
enum ApiError {
    Busy,
    Pipeline(ReportError),
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Pipeline(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Busy => (
                StatusCode::CONFLICT,
                "a report is already being generated".to_string(),
            ),
            ApiError::Pipeline(err) => match &err {
                ReportError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                ReportError::DataFetch { .. } | ReportError::Summary(_) => {
                    (StatusCode::BAD_GATEWAY, err.to_string())
                }
                // Detail is already logged; the client gets a generic message.
                ReportError::Unexpected(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong; please try again later".to_string(),
                ),
            },
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &stockbrief_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbrief_core::domain::ticker::Ticker;
    use stockbrief_core::market::MarketDataClient;
    use stockbrief_core::summary::{ChatMessage, SummaryClient};
    use stockbrief_core::time::window::ReportWindow;

    struct FailingMarket;

    #[async_trait::async_trait]
    impl MarketDataClient for FailingMarket {
        async fn fetch_window(
            &self,
            ticker: &Ticker,
            _window: &ReportWindow,
        ) -> Result<String, ReportError> {
            Err(ReportError::DataFetch {
                ticker: ticker.to_string(),
                message: "provider down".to_string(),
            })
        }
    }

    struct StubSummary;

    #[async_trait::async_trait]
    impl SummaryClient for StubSummary {
        async fn summarize(&self, _messages: &[ChatMessage]) -> Result<String, ReportError> {
            Ok("stub narrative".to_string())
        }
    }

    fn failing_state() -> AppState {
        AppState {
            engine: Arc::new(ReportEngine::new(Arc::new(FailingMarket), Arc::new(StubSummary))),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    #[test]
    fn run_guard_is_exclusive_and_released_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));

        let guard = RunGuard::try_acquire(&flag).expect("first acquire");
        assert!(RunGuard::try_acquire(&flag).is_none());

        drop(guard);
        assert!(RunGuard::try_acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn busy_flag_resets_after_a_failed_run() {
        let state = failing_state();

        let res = generate_report(
            State(state.clone()),
            Json(ReportRequest {
                tickers: vec!["AAPL".to_string()],
            }),
        )
        .await;

        assert!(matches!(
            res,
            Err(ApiError::Pipeline(ReportError::DataFetch { .. }))
        ));
        assert!(!state.busy.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn rejects_more_than_three_tickers_before_running() {
        let state = failing_state();

        let tickers = vec!["A", "B", "C", "D"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let res = generate_report(State(state.clone()), Json(ReportRequest { tickers })).await;

        assert!(matches!(
            res,
            Err(ApiError::Pipeline(ReportError::Validation(_)))
        ));
        assert!(!state.busy.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn concurrent_invocation_is_rejected_as_busy() {
        let state = failing_state();
        let _held = RunGuard::try_acquire(&state.busy).unwrap();

        let res = generate_report(
            State(state.clone()),
            Json(ReportRequest {
                tickers: vec!["AAPL".to_string()],
            }),
        )
        .await;

        assert!(matches!(res, Err(ApiError::Busy)));
    }
}
