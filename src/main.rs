use axum::response::IntoResponse;
use axum::{middleware, routing::get, Extension, Json, Router};
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;
use secrets::Secrets;
use settings::Settings;
use static_toml::static_toml;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

static_toml! { static CONFIG = include_toml!("Config.toml"); }

mod destination;
mod error;
mod logging;
mod secrets;
mod settings;
mod twilio;
mod voice;

#[tokio::main]
async fn main() {
    // Intitialize environment and logger, real environment variables win over .env
    dotenv::dotenv().ok();
    env_logger::init();

    // Load the secrets and settings
    let secrets = Secrets::from_env();
    let settings = Settings::load();

    // Initialize the reqwest client used for Twilio API calls
    log::info!("Initializing the Reqwest client");
    let reqwest = ReqwestClient::builder()
        .timeout(settings.request_timeout)
        .build()
        .expect("Failed to build the Reqwest client");

    // Initialize the TCP listener
    log::info!("Connecting to the server at {}", settings.local_address);
    let tcp = TcpListener::bind(&settings.local_address)
        .await
        .expect("Failed to connect to the server");

    // Initialize the webserver routes
    log::info!("Initializing the webserver routes");
    let router = app(secrets, settings, reqwest);

    // Start the webserver
    log::info!("Starting the webserver");
    axum::serve(tcp, router.into_make_service())
        .await
        .expect("Failed to start the server");
}

pub fn app(secrets: Secrets, settings: Settings, reqwest: ReqwestClient) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/health_check", get(health_check))
        .merge(voice::router())
        .fallback(error_handler)
        .layer(middleware::from_fn(logging::log_exchange))
        .layer(cors)
        .layer(Extension(secrets))
        .layer(Extension(settings))
        .layer(Extension(reqwest))
}

pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn error_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}
