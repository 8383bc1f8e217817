use super::{PageImage, ScanError, TextRecognizer};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs `tesseract stdin stdout -l <language>` with the page PNG piped in.
pub struct TesseractRecognizer {
    binary: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(binary: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &PageImage) -> Result<String, ScanError> {
        let recognition_error = |message: String| ScanError::Recognition {
            page: image.page_number,
            message,
        };

        let mut child = Command::new(&self.binary)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| recognition_error(format!("{} failed to start: {}", self.binary, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| recognition_error("stdin was not captured".to_string()))?;

        let png = &image.png;
        let write_stdin = async move {
            let result = stdin.write_all(png).await;
            drop(stdin);
            result
        };

        let (written, output) = tokio::join!(write_stdin, child.wait_with_output());
        let output = output.map_err(|e| recognition_error(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(recognition_error(stderr.trim().to_string()));
        }
        written.map_err(|e| recognition_error(format!("failed to send image: {}", e)))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
