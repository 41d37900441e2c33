use std::{
    fs, io,
    path::{Path, PathBuf},
};

use eframe::egui::{self, Vec2};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    fs_utils::{collision_free_path, split_name},
    ocr::{RecognitionError, TextRecognizer},
    selection::SelectionRect,
    ui::Placement,
};

/// One source image in the batch: its path and decoded pixel dimensions.
/// Built once when the user's files are collected; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ImageRef {
    /// Reads the image header only; the full decode happens at rename time.
    pub fn probe(path: PathBuf) -> Result<Self, image::ImageError> {
        let (width, height) = image::image_dimensions(&path)?;
        Ok(Self {
            path,
            width,
            height,
        })
    }

    pub fn size(&self) -> Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }
}

/// Why one image in the batch could not be renamed.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("decode failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("recognition failed: {0}")]
    Recognition(#[from] RecognitionError),
    #[error("selection maps to an empty region of the image")]
    DegenerateRegion,
    #[error("rename failed: {0}")]
    Rename(#[source] io::Error),
}

/// Precondition failure: the batch never starts and no file is touched.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("select images and draw a region before renaming")]
    NoSelection,
}

#[derive(Debug)]
pub enum RenameStatus {
    Renamed(PathBuf),
    EmptyText,
    Failed(StepError),
}

#[derive(Debug)]
pub struct RenameOutcome {
    pub path: PathBuf,
    pub recognized: Option<String>,
    pub status: RenameStatus,
}

impl RenameOutcome {
    pub fn is_renamed(&self) -> bool {
        matches!(self.status, RenameStatus::Renamed(_))
    }

    /// Single-line description for the running status display.
    pub fn describe(&self) -> String {
        match &self.status {
            RenameStatus::Renamed(new_path) => format!(
                "{} -> {}",
                self.path.display(),
                new_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| new_path.display().to_string())
            ),
            RenameStatus::EmptyText => {
                format!("{}: no text recognized", self.path.display())
            }
            RenameStatus::Failed(err) => format!("{}: {err}", self.path.display()),
        }
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<RenameOutcome>,
}

impl BatchReport {
    pub fn renamed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_renamed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.renamed()
    }

    pub fn summary(&self) -> String {
        format!("{} renamed, {} failed", self.renamed(), self.failed())
    }
}

pub struct BatchConfig {
    /// Viewport each image's placement is computed against. Every image is
    /// scaled independently, so the one selection covers the same displayed
    /// area on each.
    pub viewport: Vec2,
    pub margin: f32,
    pub language: String,
    pub dry_run: bool,
}

/// Keeps Unicode alphanumerics and `. _ - ` (space); everything else is
/// dropped.
pub fn sanitize_stem(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect()
}

/// Runs the crop/recognize/rename loop over `images`, strictly in order.
///
/// A failing image is recorded and skipped; one bad decode or OCR result
/// never aborts the batch. `progress` fires once per image with its outcome.
pub fn run_batch<R>(
    images: &[ImageRef],
    selection: Option<&SelectionRect>,
    config: &BatchConfig,
    recognizer: &R,
    mut progress: impl FnMut(&RenameOutcome),
) -> Result<BatchReport, BatchError>
where
    R: TextRecognizer + ?Sized,
{
    let selection = selection.ok_or(BatchError::NoSelection)?;
    if images.is_empty() {
        return Err(BatchError::NoSelection);
    }

    let mut outcomes = Vec::with_capacity(images.len());
    for image_ref in images {
        let outcome = process_image(image_ref, selection, config, recognizer);
        match &outcome.status {
            RenameStatus::Renamed(new_path) => {
                info!(path = %image_ref.path.display(), new = %new_path.display(), "renamed");
            }
            RenameStatus::EmptyText => {
                info!(path = %image_ref.path.display(), "no text recognized");
            }
            RenameStatus::Failed(err) => {
                warn!(path = %image_ref.path.display(), error = %err, "skipped");
            }
        }
        progress(&outcome);
        outcomes.push(outcome);
    }

    Ok(BatchReport { outcomes })
}

fn process_image<R>(
    image_ref: &ImageRef,
    selection: &SelectionRect,
    config: &BatchConfig,
    recognizer: &R,
) -> RenameOutcome
where
    R: TextRecognizer + ?Sized,
{
    let mut recognized = None;
    let status = match rename_one(image_ref, selection, config, recognizer, &mut recognized) {
        Ok(status) => status,
        Err(err) => RenameStatus::Failed(err),
    };
    RenameOutcome {
        path: image_ref.path.clone(),
        recognized,
        status,
    }
}

fn rename_one<R>(
    image_ref: &ImageRef,
    selection: &SelectionRect,
    config: &BatchConfig,
    recognizer: &R,
    recognized: &mut Option<String>,
) -> Result<RenameStatus, StepError>
where
    R: TextRecognizer + ?Sized,
{
    let image = image::open(&image_ref.path).map_err(StepError::Decode)?;

    let placement = Placement::fit(
        egui::vec2(image.width() as f32, image.height() as f32),
        config.viewport,
        config.margin,
    );
    let region = placement.to_source(selection);
    let (x, y, w, h) = region.crop_bounds().ok_or(StepError::DegenerateRegion)?;
    let cropped = image.crop_imm(x, y, w, h);

    let text = recognizer.recognize(&cropped, &config.language)?;
    let text = text.trim().to_string();
    *recognized = Some(text.clone());

    let stem = sanitize_stem(&text);
    if stem.trim().is_empty() {
        return Ok(RenameStatus::EmptyText);
    }

    let dir = image_ref.path.parent().unwrap_or_else(|| Path::new(""));
    let ext = image_ref
        .path
        .file_name()
        .map(split_name)
        .and_then(|(_, ext)| ext);
    let new_path = collision_free_path(dir, &stem, ext.as_deref());

    if config.dry_run {
        info!(path = %image_ref.path.display(), target = %new_path.display(), "dry run");
        return Ok(RenameStatus::Renamed(new_path));
    }

    fs::rename(&image_ref.path, &new_path).map_err(StepError::Rename)?;
    Ok(RenameStatus::Renamed(new_path))
}
