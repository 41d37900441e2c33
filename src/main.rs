use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;
use rand::seq::SliceRandom;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use imagerenamer::app::{RenamerApp, SelectionCarry};
use imagerenamer::fs_utils::collect_images;
use imagerenamer::ocr::{TesseractCli, DEFAULT_LANGUAGE};
use imagerenamer::rename::ImageRef;
use imagerenamer::ui::DISPLAY_MARGIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum SortOrder {
    Filename,
    Randomize,
    Modified,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rename images in bulk from OCR of a selected region"
)]
struct Args {
    /// Directory that contains images to process
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Language hint passed to the recognition engine
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Tesseract binary to invoke
    #[arg(long, default_value = "tesseract")]
    tesseract: PathBuf,

    /// Fraction of the viewport the displayed image may occupy
    #[arg(long, default_value_t = DISPLAY_MARGIN)]
    margin: f32,

    /// Keep the selection when switching images, rescaled to the new image
    #[arg(short = 'k', long, default_value_t = false)]
    keep_selection: bool,

    /// Skip the actual renames and just log what would happen
    #[arg(short = 'd', long, default_value_t = false)]
    dry_run: bool,

    /// Recurse into subdirectories to find images (disabled by default)
    #[arg(short = 'r', long = "recursive", default_value_t = false)]
    recursive: bool,

    /// Invert order of processed images (ignored for randomize)
    #[arg(short = 'i', long = "inverse-order", default_value_t = false)]
    inverse: bool,

    /// Order in which images are processed
    #[arg(short = 'o', long, value_enum, default_value_t = SortOrder::Filename)]
    order: SortOrder,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut files = collect_images(&args.directory, args.recursive)?;
    if files.is_empty() {
        return Err(anyhow!(
            "No supported image files found in {}. Supported formats are: {}",
            args.directory.display(),
            imagerenamer::fs_utils::SUPPORTED_EXTENSIONS.join(", ")
        ));
    }
    match args.order {
        SortOrder::Filename => files.sort(),
        SortOrder::Randomize => files.shuffle(&mut rand::thread_rng()),
        SortOrder::Modified => {
            files.sort_by_key(|path| std::fs::metadata(path).and_then(|m| m.modified()).ok())
        }
    }
    if args.inverse && args.order != SortOrder::Randomize {
        files.reverse();
    }

    let images: Vec<ImageRef> = files
        .into_iter()
        .filter_map(|path| match ImageRef::probe(path.clone()) {
            Ok(image_ref) => Some(image_ref),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable image");
                None
            }
        })
        .collect();
    if images.is_empty() {
        return Err(anyhow!("None of the collected images could be read"));
    }

    let recognizer = TesseractCli::with_binary(&args.tesseract);
    if !recognizer.is_available() {
        warn!(
            binary = %args.tesseract.display(),
            "recognition engine not found; every image will fail until it is installed"
        );
    }

    let carry = if args.keep_selection {
        SelectionCarry::Rescale
    } else {
        SelectionCarry::Discard
    };
    let language = args.language;
    let margin = args.margin;
    let dry_run = args.dry_run;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 800.0)),
        ..Default::default()
    };

    eframe::run_native(
        "ImageRenamer",
        native_options,
        Box::new(move |cc| {
            match RenamerApp::new(cc, images, language, margin, dry_run, carry, recognizer) {
                Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
                Err(err) => {
                    eprintln!("{err:#}");
                    std::process::exit(1);
                }
            }
        }),
    )?;

    Ok(())
}
