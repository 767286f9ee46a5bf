//! Floor-plan detector client.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use seat_config::DetectorConfig;
use seat_core::entities::{AnalyzeRequest, AnalyzeResponse, Calibration};
use seat_schema::{ANALYZE_REQUEST, SchemaRegistry};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ClientError;
use crate::http::{IDEMPOTENCY_KEY, build_client, check_response, join_url, read_json};

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Read an image from disk, taking the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Io` if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(mime_for(path), data))
    }

    fn encoded(&self) -> EncodedImage<'_> {
        EncodedImage {
            mime_type: &self.mime_type,
            data: STANDARD.encode(&self.data),
        }
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodedImage<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeBody<'a> {
    idempotency_key: Uuid,
    calibration: &'a Calibration,
    image: EncodedImage<'a>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the floor-plan detector service.
pub struct DetectorClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    schemas: SchemaRegistry,
}

impl DetectorClient {
    /// Build a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotConfigured` for an empty base URL, or
    /// `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        if base_url.trim().is_empty() {
            return Err(ClientError::NotConfigured { service: "detector" });
        }
        Ok(Self {
            http: build_client(timeout_secs)?,
            base_url: base_url.to_string(),
            api_key: None,
            schemas: SchemaRegistry::new(),
        })
    }

    /// Build a client from the `[detector]` config section.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(config: &DetectorConfig) -> Result<Self, ClientError> {
        let client = Self::new(&config.base_url, config.timeout_secs)?;
        Ok(if config.has_api_key() {
            client.with_api_key(config.api_key.clone())
        } else {
            client
        })
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        join_url(&self.base_url, "analyze")
    }

    /// Send `image` for analysis under `request`'s idempotency key.
    ///
    /// The request is validated before sending and the response is
    /// validated before it is returned; the caller still clamps entities
    /// when admitting them into a session.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Contract` when either side violates its schema,
    /// and transport or status errors as described on [`ClientError`].
    pub async fn analyze(
        &self,
        request: &AnalyzeRequest,
        image: &ImagePayload,
    ) -> Result<AnalyzeResponse, ClientError> {
        self.schemas.validate_value(ANALYZE_REQUEST, request)?;

        let body = AnalyzeBody {
            idempotency_key: request.idempotency_key,
            calibration: &request.calibration,
            image: image.encoded(),
        };

        let mut builder = self
            .http
            .post(self.endpoint())
            .header(IDEMPOTENCY_KEY, request.idempotency_key.to_string())
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(
            key = %request.idempotency_key,
            mode = %request.calibration.mode,
            bytes = image.data.len(),
            "sending floor plan to detector"
        );
        let resp = check_response(builder.send().await?).await?;
        self.parse_response(&read_json(resp).await?)
    }

    /// Validate and decode a detector response body.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Contract` with every violation found.
    pub fn parse_response(&self, body: &serde_json::Value) -> Result<AnalyzeResponse, ClientError> {
        let response = self.schemas.parse_response(body).inspect_err(|e| {
            tracing::warn!(%e, "detector response failed validation");
        })?;
        tracing::debug!(
            run_id = %response.run_id,
            entities = response.entities.len(),
            analysis_ms = response.analysis_ms,
            "detector response accepted"
        );
        Ok(response)
    }
}
