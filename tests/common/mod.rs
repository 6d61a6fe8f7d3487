//! Shared test helpers: scriptable provider and observable recorders.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use atelier::error::AtelierError;
use atelier::history::{ErrorSink, HistoryRecorder, HistoryWriter};
use atelier::provider::GenerationProvider;
use atelier::session::UserId;
use atelier::types::{
    ArtifactKind, GeneratedImage, HistoryEntry, NewHistoryEntry, OperationError, VideoOperation,
};

pub const VIDEO_URI: &str = "https://stub.test/files/video-1:download";

/// A provider call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ImageBatch { prompt: String, count: u32 },
    Caption { prompt: String, kind: ArtifactKind },
    SubmitVideo { prompt: String },
    Refresh { name: String },
    Fetch { uri: String },
}

/// Provider returning canned payloads and recording every call.
///
/// Video jobs are named `op-0` on submit and `op-k` after the k-th refresh.
pub struct StubProvider {
    images: Vec<GeneratedImage>,
    caption: String,
    caption_delay: Duration,
    fail_caption_on: Option<usize>,
    batch_error: Option<(u16, String)>,
    submit_error: Option<(u16, String)>,
    complete_after: u32,
    result_uri: Option<String>,
    operation_error: Option<String>,
    video_bytes: Vec<u8>,
    caption_calls: AtomicUsize,
    refreshes: AtomicUsize,
    calls: Mutex<Vec<Call>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            images: vec![
                stub_image(b"image-one", "image/png"),
                stub_image(b"image-two", "image/png"),
            ],
            caption: "Pedal into summer #bikes #red".to_string(),
            caption_delay: Duration::ZERO,
            fail_caption_on: None,
            batch_error: None,
            submit_error: None,
            complete_after: 1,
            result_uri: Some(VIDEO_URI.to_string()),
            operation_error: None,
            video_bytes: b"\x00\x00\x00\x18ftypmp42".to_vec(),
            caption_calls: AtomicUsize::new(0),
            refreshes: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_images(mut self, images: Vec<GeneratedImage>) -> Self {
        self.images = images;
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    pub fn with_caption_delay(mut self, delay: Duration) -> Self {
        self.caption_delay = delay;
        self
    }

    /// Fail the caption call with this zero-based index.
    pub fn failing_caption_on(mut self, index: usize) -> Self {
        self.fail_caption_on = Some(index);
        self
    }

    pub fn failing_batch(mut self, status: u16, message: &str) -> Self {
        self.batch_error = Some((status, message.to_string()));
        self
    }

    pub fn failing_submit(mut self, status: u16, message: &str) -> Self {
        self.submit_error = Some((status, message.to_string()));
        self
    }

    /// Report completion on the `n`-th refresh. Zero means done at submit.
    pub fn completing_after(mut self, n: u32) -> Self {
        self.complete_after = n;
        self
    }

    pub fn without_result(mut self) -> Self {
        self.result_uri = None;
        self
    }

    pub fn with_operation_error(mut self, message: &str) -> Self {
        self.operation_error = Some(message.to_string());
        self
    }

    pub fn video_bytes(&self) -> &[u8] {
        &self.video_bytes
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn refresh_names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Refresh { name } => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn caption_prompts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Caption { prompt, .. } => Some(prompt),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn log(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn operation(&self, k: u32) -> VideoOperation {
        let name = format!("op-{k}");
        if k < self.complete_after {
            return VideoOperation::pending(name);
        }
        let mut op = VideoOperation::completed(name, self.result_uri.clone());
        if let Some(ref message) = self.operation_error {
            op.result_uri = None;
            op.error = Some(OperationError {
                code: Some(3),
                message: message.clone(),
            });
        }
        op
    }
}

#[async_trait]
impl GenerationProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn submit_image_batch(
        &self,
        prompt: &str,
        count: u32,
    ) -> Result<Vec<GeneratedImage>, AtelierError> {
        self.log(Call::ImageBatch {
            prompt: prompt.to_string(),
            count,
        });
        if let Some((status, ref message)) = self.batch_error {
            return Err(AtelierError::api(status, message.clone()));
        }
        Ok(self.images.iter().take(count as usize).cloned().collect())
    }

    async fn submit_caption(
        &self,
        prompt: &str,
        kind: ArtifactKind,
    ) -> Result<String, AtelierError> {
        let index = self.caption_calls.fetch_add(1, Ordering::SeqCst);
        self.log(Call::Caption {
            prompt: prompt.to_string(),
            kind,
        });
        if !self.caption_delay.is_zero() {
            tokio::time::sleep(self.caption_delay).await;
        }
        if self.fail_caption_on == Some(index) {
            return Err(AtelierError::api(503, "caption model overloaded"));
        }
        Ok(self.caption.clone())
    }

    async fn submit_video_job(&self, prompt: &str) -> Result<VideoOperation, AtelierError> {
        self.log(Call::SubmitVideo {
            prompt: prompt.to_string(),
        });
        if let Some((status, ref message)) = self.submit_error {
            return Err(AtelierError::api(status, message.clone()));
        }
        Ok(self.operation(0))
    }

    async fn refresh_video_job(
        &self,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, AtelierError> {
        assert!(!operation.done, "refreshed a finished operation");
        self.log(Call::Refresh {
            name: operation.name.clone(),
        });
        let k = self.refreshes.fetch_add(1, Ordering::SeqCst) as u32 + 1;
        Ok(self.operation(k))
    }

    async fn fetch_video_bytes(&self, uri: &str) -> Result<Vec<u8>, AtelierError> {
        self.log(Call::Fetch {
            uri: uri.to_string(),
        });
        Ok(self.video_bytes.clone())
    }
}

pub fn stub_image(bytes: &[u8], mime_type: &str) -> GeneratedImage {
    GeneratedImage {
        bytes: bytes.to_vec(),
        mime_type: mime_type.to_string(),
    }
}

/// Recorder that forwards every stored entry to a channel.
pub struct ChannelRecorder {
    tx: mpsc::UnboundedSender<(UserId, HistoryEntry)>,
}

impl ChannelRecorder {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(UserId, HistoryEntry)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl HistoryRecorder for ChannelRecorder {
    async fn append(
        &self,
        user: &UserId,
        entry: NewHistoryEntry,
    ) -> Result<HistoryEntry, AtelierError> {
        let stored = entry.stamp();
        let _ = self.tx.send((user.clone(), stored.clone()));
        Ok(stored)
    }

    async fn list(&self, _user: &UserId) -> Result<Vec<HistoryEntry>, AtelierError> {
        Ok(Vec::new())
    }
}

/// Recorder that always fails.
pub struct FailingRecorder;

#[async_trait]
impl HistoryRecorder for FailingRecorder {
    async fn append(
        &self,
        _user: &UserId,
        _entry: NewHistoryEntry,
    ) -> Result<HistoryEntry, AtelierError> {
        Err(AtelierError::History("database unavailable".into()))
    }

    async fn list(&self, _user: &UserId) -> Result<Vec<HistoryEntry>, AtelierError> {
        Err(AtelierError::History("database unavailable".into()))
    }
}

/// Error sink that forwards reports to a channel.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<(UserId, String)>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(UserId, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ErrorSink for ChannelSink {
    fn report(&self, user: &UserId, error: &AtelierError) {
        let _ = self.tx.send((user.clone(), error.to_string()));
    }
}

/// Writer over a recorder that reports failures into `sink`.
pub fn writer_with_sink(
    recorder: Arc<dyn HistoryRecorder>,
    sink: Arc<dyn ErrorSink>,
) -> HistoryWriter {
    HistoryWriter::new(recorder).with_error_sink(sink)
}
