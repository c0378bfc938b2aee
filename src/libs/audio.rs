use crate::api::{ApiError, ApiResult};
use std::fs;
use std::path::Path;

/// A recorded voice note submitted in place of a structured draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, file_name: &str) -> Self {
        Self {
            bytes,
            file_name: file_name.to_string(),
            mime: mime_for(file_name).to_string(),
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("recording")
            .to_string();
        Ok(Self::new(bytes, &file_name))
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.bytes.is_empty() {
            return Err(ApiError::validation("audio recording is empty"));
        }
        Ok(())
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}
