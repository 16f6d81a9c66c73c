use crate::config::Config;
use crate::errors::AppError;
use crate::extractor::extract_from_text;
use crate::legacy::convert_to_legacy_format;
use crate::models::{EnhancedExtractedData, ExtractRequest, LegacyExtractedData};
use axum::{extract::State, http::StatusCode, Json};
use moka::future::Cache;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Extraction result cache keyed by SHA-256 digest of the input text.
    /// Value: serialized `EnhancedExtractedData` JSON.
    pub extraction_cache: Cache<String, String>,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "apolice-extractor",
            "version": "0.1.0"
        })),
    )
}

fn validate_request(state: &AppState, req: &ExtractRequest) -> Result<(), AppError> {
    if req.text.len() > state.config.max_text_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Document text exceeds {} bytes",
            state.config.max_text_bytes
        )));
    }
    Ok(())
}

/// Run the pipeline for a request, consulting the result cache first.
///
/// Extraction is pure over the input text, so the digest of the text is a
/// sound cache key.
async fn extract_cached(
    state: &Arc<AppState>,
    text: &str,
) -> Result<EnhancedExtractedData, AppError> {
    let key = hex::encode(Sha256::digest(text.as_bytes()));

    if let Some(cached) = state.extraction_cache.get(&key).await {
        if let Ok(data) = serde_json::from_str::<EnhancedExtractedData>(&cached) {
            tracing::debug!(key = %key, "extraction cache hit");
            return Ok(data);
        }
        // Stale or incompatible cached shape; fall through and overwrite.
    }

    let data = extract_from_text(text);
    let serialized = serde_json::to_string(&data)?;
    state.extraction_cache.insert(key, serialized).await;
    Ok(data)
}

/// POST /api/v1/extract
///
/// Extracts a structured policy record from raw document text. Always
/// returns a complete record; check `provenance` for defaulted fields.
pub async fn extract(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<EnhancedExtractedData>, AppError> {
    tracing::info!("POST /extract - {} bytes of text", req.text.len());
    validate_request(&state, &req)?;

    let data = extract_cached(&state, &req.text).await?;

    tracing::info!(
        "Extraction complete. Insurer: {}, installments: {}",
        data.seguradora,
        data.parcelas.len()
    );
    Ok(Json(data))
}

/// POST /api/v1/extract/legacy
///
/// Same pipeline, repackaged into the nested shape used by older consumers.
pub async fn extract_legacy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<LegacyExtractedData>, AppError> {
    tracing::info!("POST /extract/legacy - {} bytes of text", req.text.len());
    validate_request(&state, &req)?;

    let data = extract_cached(&state, &req.text).await?;
    Ok(Json(convert_to_legacy_format(&data)))
}
