use imagerenamer::ocr::*;

mod common;
use common::solid_image;

#[test]
fn missing_binary_is_reported_as_unavailable() {
    let recognizer = TesseractCli::with_binary("/definitely/not/here/tesseract");
    assert!(!recognizer.is_available());
}

#[test]
fn missing_binary_fails_recognition_with_spawn_error() {
    let recognizer = TesseractCli::with_binary("/definitely/not/here/tesseract");
    let image = solid_image(8, 8, [255, 255, 255, 255]);
    let err = recognizer.recognize(&image, DEFAULT_LANGUAGE).unwrap_err();
    assert!(matches!(err, RecognitionError::Spawn { .. }));
}
