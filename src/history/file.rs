//! File-backed history: one JSON-lines log per user.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::HistoryRecorder;
use crate::error::AtelierError;
use crate::session::UserId;
use crate::types::{HistoryEntry, NewHistoryEntry};

/// Appends each entry as one JSON line to `<base_dir>/<stem>.jsonl`, where
/// the stem is the base64url-encoded user id.
#[derive(Debug, Clone)]
pub struct FileHistory {
    base_dir: PathBuf,
}

impl FileHistory {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn log_path(&self, user: &UserId) -> PathBuf {
        self.base_dir
            .join(format!("{}.jsonl", log_stem(user.as_str())))
    }
}

#[async_trait]
impl HistoryRecorder for FileHistory {
    async fn append(
        &self,
        user: &UserId,
        entry: NewHistoryEntry,
    ) -> Result<HistoryEntry, AtelierError> {
        let stored = entry.stamp();
        let mut line =
            serde_json::to_string(&stored).map_err(|e| history_error("encode entry", e))?;
        line.push('\n');

        let path = self.log_path(user);
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| history_error(self.base_dir.display(), e))?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| history_error(path.display(), e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| history_error(path.display(), e))?;
        file.flush()
            .await
            .map_err(|e| history_error(path.display(), e))?;
        Ok(stored)
    }

    async fn list(&self, user: &UserId) -> Result<Vec<HistoryEntry>, AtelierError> {
        let path = self.log_path(user);
        let raw = match fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(history_error(path.display(), err)),
        };
        let mut entries = raw
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str::<HistoryEntry>(line)
                    .map_err(|e| history_error(format_args!("{}:{}", path.display(), n + 1), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        entries.reverse();
        Ok(entries)
    }
}

fn history_error(context: impl Display, err: impl Display) -> AtelierError {
    AtelierError::History(format!("{context}: {err}"))
}

/// File stem for a user. Base64url keeps distinct ids in distinct files.
/// An unpadded encoding is never 9 characters long, so it cannot collide with `anonymous`.
fn log_stem(user: &str) -> String {
    if user.is_empty() {
        return "anonymous".to_string();
    }
    URL_SAFE_NO_PAD.encode(user.as_bytes())
}
