//! Google Gemini API provider (Imagen stills, Veo video, Gemini captions).

use async_trait::async_trait;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::{
    AtelierConfig, DEFAULT_BASE_URL, DEFAULT_CAPTION_MODEL, DEFAULT_IMAGE_MODEL,
    DEFAULT_VIDEO_MODEL,
};
use crate::error::AtelierError;
use crate::prompt::caption_instruction;
use crate::types::{ArtifactKind, GeneratedImage, OperationError, VideoOperation};

use super::http::{build_client, google_headers, join_url, status_to_error};
use super::GenerationProvider;

const PROVIDER_NAME: &str = "google";
const DEFAULT_IMAGE_MIME: &str = "image/png";

pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_model: String,
    caption_model: String,
    video_model: String,
}

impl GoogleProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, AtelierError> {
        Ok(Self {
            client: build_client(None)?,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            caption_model: DEFAULT_CAPTION_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
        })
    }

    pub fn from_config(config: &AtelierConfig) -> Result<Self, AtelierError> {
        let api_key = config.require_api_key()?;
        Ok(Self {
            client: build_client(config.request_timeout)?,
            api_key: api_key.to_string(),
            base_url: config.base_url.clone(),
            image_model: config.image_model.clone(),
            caption_model: config.caption_model.clone(),
            video_model: config.video_model.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_caption_model(mut self, model: impl Into<String>) -> Self {
        self.caption_model = model.into();
        self
    }

    pub fn with_video_model(mut self, model: impl Into<String>) -> Self {
        self.video_model = model.into();
        self
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        join_url(&self.base_url, &format!("models/{model}:{method}"))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, AtelierError> {
        let resp = self
            .client
            .post(url)
            .headers(google_headers(&self.api_key))
            .json(body)
            .send()
            .await?;
        read_json(resp).await
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, AtelierError> {
        let resp = self
            .client
            .get(url)
            .headers(google_headers(&self.api_key))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body_text));
        }
        Ok(resp)
    }
}

#[async_trait]
impl GenerationProvider for GoogleProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn submit_image_batch(
        &self,
        prompt: &str,
        count: u32,
    ) -> Result<Vec<GeneratedImage>, AtelierError> {
        let url = self.model_url(&self.image_model, "predict");
        let body = serde_json::json!({
            "instances": [{ "prompt": prompt }],
            "parameters": { "sampleCount": count },
        });

        debug!(model = %self.image_model, count, "Google submit_image_batch");

        let data: PredictResponse = self.post_json(&url, &body).await?;
        if data.predictions.is_empty() {
            return Err(AtelierError::api(200, "No images in Imagen response"));
        }

        data.predictions
            .into_iter()
            .map(|p| -> Result<GeneratedImage, AtelierError> {
                let encoded = p.bytes_base64_encoded.ok_or_else(|| {
                    AtelierError::api(200, "Imagen prediction carried no image bytes")
                })?;
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| AtelierError::provider(PROVIDER_NAME, format!("Bad image payload: {e}")))?;
                Ok(GeneratedImage {
                    bytes,
                    mime_type: p.mime_type.unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
                })
            })
            .collect()
    }

    async fn submit_caption(
        &self,
        prompt: &str,
        kind: ArtifactKind,
    ) -> Result<String, AtelierError> {
        let url = self.model_url(&self.caption_model, "generateContent");
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": caption_instruction(prompt, kind) }],
            }],
        });

        debug!(model = %self.caption_model, %kind, "Google submit_caption");

        let data: GenerateContentResponse = self.post_json(&url, &body).await?;
        let text: String = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(AtelierError::api(200, "No caption text in Gemini response"));
        }
        Ok(text.to_string())
    }

    async fn submit_video_job(&self, prompt: &str) -> Result<VideoOperation, AtelierError> {
        let url = self.model_url(&self.video_model, "predictLongRunning");
        let body = serde_json::json!({
            "instances": [{ "prompt": prompt }],
            "parameters": { "sampleCount": 1 },
        });

        debug!(model = %self.video_model, "Google submit_video_job");

        let op: OperationWire = self.post_json(&url, &body).await?;
        Ok(op.into())
    }

    async fn refresh_video_job(
        &self,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, AtelierError> {
        let url = join_url(&self.base_url, &operation.name);

        debug!(operation = %operation.name, "Google refresh_video_job");

        let op: OperationWire = read_json(self.get(&url).await?).await?;
        Ok(op.into())
    }

    async fn fetch_video_bytes(&self, uri: &str) -> Result<Vec<u8>, AtelierError> {
        debug!(uri, "Google fetch_video_bytes");

        let resp = self.get(uri).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, AtelierError> {
    let status = resp.status();
    let body_text = resp.text().await?;
    if !status.is_success() {
        return Err(status_to_error(status.as_u16(), &body_text));
    }
    Ok(serde_json::from_str(&body_text)?)
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationWire {
    name: String,
    #[serde(default)]
    done: bool,
    response: Option<OperationResponse>,
    error: Option<StatusWire>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateVideoResponse {
    #[serde(default)]
    generated_samples: Vec<GeneratedSample>,
}

#[derive(Deserialize)]
struct GeneratedSample {
    video: Option<VideoRef>,
}

#[derive(Deserialize)]
struct VideoRef {
    uri: Option<String>,
}

#[derive(Deserialize)]
struct StatusWire {
    code: Option<i32>,
    #[serde(default)]
    message: String,
}

impl From<OperationWire> for VideoOperation {
    fn from(op: OperationWire) -> Self {
        let result_uri = op
            .response
            .and_then(|r| r.generate_video_response)
            .and_then(|r| r.generated_samples.into_iter().next())
            .and_then(|s| s.video)
            .and_then(|v| v.uri)
            .filter(|uri| !uri.is_empty());
        Self {
            name: op.name,
            done: op.done,
            result_uri,
            error: op.error.map(|e| OperationError {
                code: e.code,
                message: e.message,
            }),
        }
    }
}
