//! Request/response traffic log.
//!
//! Each handled request is written, together with its response, to its own
//! pretty-printed file named `<server>_<unix micros>.json`.

use serde_json::{Value, json};
use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct TrafficLog {
    dir: PathBuf,
    agent: String,
}

impl TrafficLog {
    pub fn new(dir: impl Into<PathBuf>, agent: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            agent: agent.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one entry. Failures are logged and otherwise ignored.
    pub async fn record(&self, request: &Value, response: &Value) {
        match self.try_record(request, response).await {
            Ok(path) => tracing::debug!(path = %path.display(), "logged traffic"),
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "failed to write traffic log")
            }
        }
    }

    async fn try_record(&self, request: &Value, response: &Value) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let now = OffsetDateTime::now_utc();
        let entry = json!({
            "timestamp": now.unix_timestamp_nanos() as f64 / 1e9,
            "timestamp_human": now.format(&Rfc3339).unwrap_or_default(),
            "agent": self.agent,
            "request": request,
            "response": response,
        });
        let data = serde_json::to_vec_pretty(&entry).map_err(io::Error::other)?;

        // Bump until the name is free.
        let mut micros = now.unix_timestamp_nanos() / 1_000;
        loop {
            let path = self.dir.join(format!("{}_{}.json", self.agent, micros));
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(&data).await?;
                    file.flush().await?;
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => micros += 1,
                Err(e) => return Err(e),
            }
        }
    }
}
