use anyhow::{Context, Result};
use chrono::Utc;
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// URL prefix under which stored recordings are served
pub const PUBLIC_PREFIX: &str = "/uploads/videos";

/// Metadata returned after a recording is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredVideo {
    pub filename: String,
    /// Server-relative path, e.g. `/uploads/videos/interview_1700000000000.webm`
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Absolute URL for playback
    pub url: String,
}

/// On-disk store for uploaded interview recordings
#[derive(Debug, Clone)]
pub struct VideoStore {
    dir: PathBuf,
    public_base_url: String,
}

impl VideoStore {
    pub async fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;

        Ok(Self {
            dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stream chunks into a freshly named file
    pub async fn save_stream<S, B, E>(&self, chunks: S) -> Result<StoredVideo>
    where
        S: Stream<Item = std::result::Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let (filename, file_path, file) = self.create_file().await?;

        let size = match write_chunks(file, chunks).await {
            Ok(size) => size,
            Err(e) => {
                let _ = fs::remove_file(&file_path).await;
                return Err(e);
            }
        };

        info!(
            "Stored video {} ({:.2}MB)",
            filename,
            size as f64 / 1024.0 / 1024.0
        );

        let path = format!("{}/{}", PUBLIC_PREFIX, filename);
        Ok(StoredVideo {
            url: format!("{}{}", self.public_base_url, path),
            filename,
            path,
            size,
        })
    }

    /// Save an in-memory blob
    pub async fn save_bytes(&self, bytes: &[u8]) -> Result<StoredVideo> {
        let chunks = futures::stream::iter([Ok::<_, std::io::Error>(bytes)]);
        self.save_stream(chunks).await
    }

    /// Create `interview_<unix-millis>.webm`, bumping the timestamp until the name is free
    async fn create_file(&self) -> Result<(String, PathBuf, File)> {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let filename = format!("interview_{}.webm", millis);
            let file_path = self.dir.join(&filename);

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .await
            {
                Ok(file) => return Ok((filename, file_path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => millis += 1,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to create {}", file_path.display()))
                }
            }
        }
    }
}

async fn write_chunks<S, B, E>(mut file: File, mut chunks: S) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut size = 0u64;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.context("Failed to read upload body")?;
        file.write_all(chunk.as_ref())
            .await
            .context("Failed to write video chunk")?;
        size += chunk.as_ref().len() as u64;
    }
    file.flush().await.context("Failed to flush video file")?;
    Ok(size)
}
