use std::process::ExitCode;
use std::sync::Arc;

use axum::{routing::get, Router};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use card_fetcher::config::Config;
use card_fetcher::fetch::{Scraper, ScraperConfig};
use card_fetcher::handlers;
use card_fetcher::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    // JSON logs in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("card_fetcher=info,tower_http=info"));
    if config.is_production {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let scraper = Scraper::new(ScraperConfig::from(&config)).expect("Failed to build scraper");
    info!(
        check_robots_txt = config.check_robots_txt,
        timeout_secs = config.fetch_timeout.as_secs(),
        max_retries = config.fetch_max_retries,
        "Scraper configured"
    );

    // A positional URL fetches one card and prints it instead of serving.
    if let Some(url) = std::env::args().nth(1) {
        return print_card(&scraper, &url).await;
    }

    let state = AppState {
        scraper: Arc::new(scraper),
    };

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = Router::new()
        .route("/", get(handlers::cards::get_card))
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.server_addr();
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");

    ExitCode::SUCCESS
}

async fn print_card(scraper: &Scraper, url: &str) -> ExitCode {
    let card = match scraper.fetch_card(url).await {
        Ok(card) => card,
        Err(e) => {
            eprintln!("Could not fetch: {e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&card) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Could not marshal json: {e}");
            ExitCode::FAILURE
        }
    }
}
