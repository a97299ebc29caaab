//! Servidor HTTP Axum para extração de lugares e ranking de países.
//!
//! | Rota | Método | Descrição |
//! |------|--------|-----------|
//! | `/health` | GET | status e número de chaves do índice |
//! | `/extract` | POST | `{text, mode?, country?}` → extração de um documento |
//! | `/extract/batch` | POST | `{texts, mode?, country?}` → uma extração por documento |
//! | `/demo-texts` | GET | textos de exemplo |
//!
//! Configuração por variáveis de ambiente: `GEOTEXT_ADDR` (padrão `0.0.0.0:3000`),
//! `GEOTEXT_RECORDS` (JSON de registros; sem ela usa o gazetteer de demonstração)
//! e `RUST_LOG` (padrão `info`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use geotext_core::{demo_records, demo_texts, ExtractOptions, Extraction, GeoText, RecordSet};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Configuração do servidor lida do ambiente.
#[derive(Debug, Clone)]
struct ServerConfig {
    addr: SocketAddr,
    records: Option<PathBuf>,
}

impl ServerConfig {
    fn from_env() -> anyhow::Result<Self> {
        let addr = std::env::var("GEOTEXT_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse::<SocketAddr>()
            .with_context(|| format!("GEOTEXT_ADDR inválido: '{addr}'"))?;
        let records = std::env::var_os("GEOTEXT_RECORDS").map(PathBuf::from);
        Ok(Self { addr, records })
    }

    fn load_records(&self) -> anyhow::Result<RecordSet> {
        match &self.records {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("falha ao ler {}", path.display()))?;
                RecordSet::from_json(&json)
                    .with_context(|| format!("falha ao carregar registros de {}", path.display()))
            }
            None => {
                warn!("GEOTEXT_RECORDS não definido, usando o gazetteer de demonstração");
                Ok(demo_records())
            }
        }
    }
}

/// Estado compartilhado da aplicação
struct AppState {
    geotext: GeoText,
}

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Deserialize)]
struct BatchRequest {
    texts: Vec<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Serialize)]
struct ExtractResponse {
    #[serde(flatten)]
    extraction: Extraction,
    mode: String,
    processing_ms: u64,
}

#[derive(Serialize)]
struct BatchResponse {
    results: Vec<Extraction>,
    mode: String,
    processing_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let records = config.load_records()?;
    let geotext = GeoText::new(&records);
    info!(keys = geotext.len(), "índice carregado");

    let app = app(Arc::new(AppState { geotext }));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("falha ao escutar em {}", config.addr))?;
    info!("🚀 Servidor geotext iniciado em http://{}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/extract", post(extract_handler))
        .route("/extract/batch", post(batch_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "keys": state.geotext.len(),
    }))
}

/// Extração de um documento via HTTP POST
async fn extract_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Response {
    let options = match ExtractOptions::parse(
        req.mode.as_deref().unwrap_or("default"),
        req.country.as_deref(),
    ) {
        Ok(options) => options,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    info!(mode = %options.mode, chars = req.text.len(), "extraindo");
    let started = Instant::now();
    let mode = options.mode.to_string();

    // Extração é síncrona: roda fora das threads do runtime
    let result =
        tokio::task::spawn_blocking(move || state.geotext.extract_with(&req.text, &options)).await;

    match result {
        Ok(extraction) => Json(ExtractResponse {
            extraction,
            mode,
            processing_ms: started.elapsed().as_millis() as u64,
        })
        .into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Vários documentos de uma vez, processados em paralelo
async fn batch_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> Response {
    let options = match ExtractOptions::parse(
        req.mode.as_deref().unwrap_or("default"),
        req.country.as_deref(),
    ) {
        Ok(options) => options,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    info!(mode = %options.mode, documents = req.texts.len(), "extraindo lote");
    let started = Instant::now();
    let mode = options.mode.to_string();

    let result =
        tokio::task::spawn_blocking(move || state.geotext.extract_many(&req.texts, &options)).await;

    match result {
        Ok(results) => Json(BatchResponse {
            results,
            mode,
            processing_ms: started.elapsed().as_millis() as u64,
        })
        .into_response(),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(title, text, mode)| {
            serde_json::json!({
                "title": title,
                "text": text,
                "mode": mode,
            })
        })
        .collect();
    Json(texts)
}
