#![allow(dead_code)]

use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::Mutex,
};

use image::{DynamicImage, Rgba, RgbaImage};
use imagerenamer::ocr::{RecognitionError, TextRecognizer};

pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
    let pixel = Rgba(color);
    let buffer = RgbaImage::from_pixel(width, height, pixel);
    DynamicImage::ImageRgba8(buffer)
}

pub fn write_image(path: impl Into<PathBuf>, image: &DynamicImage) {
    image
        .save(path.into())
        .expect("failed to write image to disk");
}

/// Recognizer that replays a fixed sequence of texts, one per call.
/// Once the sequence is exhausted it keeps returning an empty string.
pub struct StubRecognizer {
    responses: Mutex<VecDeque<String>>,
}

impl StubRecognizer {
    pub fn new<I>(texts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            responses: Mutex::new(texts.into_iter().map(Into::into).collect()),
        }
    }
}

impl TextRecognizer for StubRecognizer {
    fn recognize(
        &self,
        _image: &DynamicImage,
        _language: &str,
    ) -> Result<String, RecognitionError> {
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Recognizer that always fails at the engine level.
pub struct BrokenRecognizer;

impl TextRecognizer for BrokenRecognizer {
    fn recognize(
        &self,
        _image: &DynamicImage,
        _language: &str,
    ) -> Result<String, RecognitionError> {
        Err(RecognitionError::InvalidOutput)
    }
}
