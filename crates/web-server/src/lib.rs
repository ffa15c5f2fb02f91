// In crates/web-server/src/lib.rs

use api_client::MarketDataSource;
use app_config::ServerSettings;
use axum::{
    Json, Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use std::sync::Arc;
use strategies::{Assessment, Strategy, TrendMomentum};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use types::{AnalysisResponse, CryptoParams, DEFAULT_COIN_ID, DEFAULT_FOREX_PAIR, ForexParams, Market};

pub mod error;
pub mod page;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all handlers.
///
/// Everything in it is read-only; each request fetches and analyzes its own
/// series.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MarketDataSource>,
    pub strategy: Arc<TrendMomentum>,
}

impl AppState {
    pub fn new(source: Arc<dyn MarketDataSource>, strategy: TrendMomentum) -> Self {
        Self {
            source,
            strategy: Arc::new(strategy),
        }
    }

    /// Fetches a series for the instrument and runs the strategy over it.
    pub async fn analyze(&self, market: Market, instrument: &str) -> Assessment {
        let data = match market {
            Market::Forex => self.source.fetch_forex_series(instrument).await,
            Market::Crypto => self.source.fetch_crypto_series(instrument).await,
        };
        let assessment = self.strategy.evaluate(&data);

        tracing::info!(
            ?market,
            instrument,
            signal = %assessment.signal,
            "Analysis complete."
        );
        assessment
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    // The JSON routes may be called from other origins.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/forex", get(api_forex_handler))
        .route("/crypto", get(api_crypto_handler));

    Router::new()
        .route("/", get(index_handler))
        .route("/analyze/forex", get(forex_page_handler))
        .route("/analyze/crypto", get(crypto_page_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(
            ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /`: both forms with their default values.
async fn index_handler() -> Html<String> {
    let inputs = page::Inputs {
        forex_pair: DEFAULT_FOREX_PAIR,
        coin_id: DEFAULT_COIN_ID,
    };
    Html(page::render(inputs, None))
}

/// The handler for `GET /analyze/forex?pair=...`.
async fn forex_page_handler(
    State(state): State<AppState>,
    Query(params): Query<ForexParams>,
) -> Html<String> {
    let pair = params.pair();
    let assessment = state.analyze(Market::Forex, &pair).await;

    let inputs = page::Inputs {
        forex_pair: &pair,
        coin_id: DEFAULT_COIN_ID,
    };
    let outcome = page::Outcome {
        market: Market::Forex,
        assessment: &assessment,
    };
    Html(page::render(inputs, Some(outcome)))
}

/// The handler for `GET /analyze/crypto?coin=...`.
async fn crypto_page_handler(
    State(state): State<AppState>,
    Query(params): Query<CryptoParams>,
) -> Html<String> {
    let coin = params.coin();
    let assessment = state.analyze(Market::Crypto, &coin).await;

    let inputs = page::Inputs {
        forex_pair: DEFAULT_FOREX_PAIR,
        coin_id: &coin,
    };
    let outcome = page::Outcome {
        market: Market::Crypto,
        assessment: &assessment,
    };
    Html(page::render(inputs, Some(outcome)))
}

/// Handler for `GET /api/forex?pair=...`
async fn api_forex_handler(
    State(state): State<AppState>,
    Query(params): Query<ForexParams>,
) -> Json<AnalysisResponse> {
    let pair = params.pair();
    let assessment = state.analyze(Market::Forex, &pair).await;
    Json(AnalysisResponse::new(Market::Forex, pair, assessment))
}

/// Handler for `GET /api/crypto?coin=...`
async fn api_crypto_handler(
    State(state): State<AppState>,
    Query(params): Query<CryptoParams>,
) -> Json<AnalysisResponse> {
    let coin = params.coin();
    let assessment = state.analyze(Market::Crypto, &coin).await;
    Json(AnalysisResponse::new(Market::Crypto, coin, assessment))
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router
/// until the process receives Ctrl-C.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Web server listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::ServeError)?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
