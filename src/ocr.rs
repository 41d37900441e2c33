use std::{
    io,
    path::PathBuf,
    process::{Command, Stdio},
};

use image::DynamicImage;
use thiserror::Error;

pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },
    #[error("{binary} exited with {status}: {stderr}")]
    Engine {
        binary: String,
        status: String,
        stderr: String,
    },
    #[error("engine output was not valid UTF-8")]
    InvalidOutput,
    #[error("unable to stage image for recognition: {0}")]
    Staging(#[source] io::Error),
}

/// Text-extraction capability invoked on a cropped region.
///
/// Implementations may legitimately return an empty string; engine-level
/// failures (missing binary, bad model) surface as [`RecognitionError`].
pub trait TextRecognizer {
    fn recognize(&self, image: &DynamicImage, language: &str)
        -> Result<String, RecognitionError>;
}

/// Recognizer backed by the `tesseract` command-line binary.
///
/// The crop is staged as a temporary PNG and text is read from stdout.
pub struct TesseractCli {
    binary: PathBuf,
}

impl TesseractCli {
    pub fn new() -> Self {
        Self::with_binary("tesseract")
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Probes whether the engine binary can be executed at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(
        &self,
        image: &DynamicImage,
        language: &str,
    ) -> Result<String, RecognitionError> {
        let staged = tempfile::Builder::new()
            .prefix("imagerenamer-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(RecognitionError::Staging)?;
        image
            .save_with_format(staged.path(), image::ImageFormat::Png)
            .map_err(|err| RecognitionError::Staging(io::Error::other(err)))?;

        let binary = self.binary.display().to_string();
        let output = Command::new(&self.binary)
            .arg(staged.path())
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| RecognitionError::Spawn {
                binary: binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RecognitionError::Engine {
                binary,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| RecognitionError::InvalidOutput)
    }
}
