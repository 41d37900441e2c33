pub mod canvas;

use std::time::Instant;

use anyhow::Result;
use eframe::{
    egui::{self, Color32, ViewportCommand},
    App, Frame,
};
use image::DynamicImage;

use crate::{
    ocr::TesseractCli,
    rename::{run_batch, BatchConfig, ImageRef},
    selection::SelectionRect,
    ui::{Placement, ResizeDebouncer},
};

use self::canvas::Canvas;

/// What happens to a drawn selection when the displayed image changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionCarry {
    /// Drop the rectangle; the next image starts clean.
    Discard,
    /// Remap the rectangle into the next image's placement, keeping its
    /// position relative to the displayed area.
    Rescale,
}

/// Applies the carry-over policy on an image change.
pub fn carry_selection(
    policy: SelectionCarry,
    from: Option<Placement>,
    to: Option<Placement>,
    rect: Option<SelectionRect>,
) -> Option<SelectionRect> {
    match policy {
        SelectionCarry::Discard => None,
        SelectionCarry::Rescale => match (from, to, rect) {
            (Some(from), Some(to), Some(rect)) => Some(from.rescale(&to, &rect)),
            _ => None,
        },
    }
}

pub fn to_color_image(img: &DynamicImage) -> egui::ColorImage {
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    egui::ColorImage::from_rgba_unmultiplied(size, &pixels)
}

struct KeyboardState {
    next_image: bool,
    prev_image: bool,
    rename: bool,
    escape: bool,
}

pub struct RenamerApp {
    pub files: Vec<ImageRef>,
    pub current_index: usize,
    pub language: String,
    pub margin: f32,
    pub dry_run: bool,
    pub carry: SelectionCarry,
    recognizer: TesseractCli,
    canvas: Canvas,
    placement: Option<Placement>,
    viewport: egui::Vec2,
    debouncer: ResizeDebouncer,
    texture: Option<egui::TextureHandle>,
    status: String,
}

impl RenamerApp {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        files: Vec<ImageRef>,
        language: String,
        margin: f32,
        dry_run: bool,
        carry: SelectionCarry,
        recognizer: TesseractCli,
    ) -> Result<Self> {
        let mut app = Self {
            files,
            current_index: 0,
            language,
            margin,
            dry_run,
            carry,
            recognizer,
            canvas: Canvas::new(),
            placement: None,
            viewport: egui::Vec2::ZERO,
            debouncer: ResizeDebouncer::default(),
            texture: None,
            status: String::from("Drag on the image to select the text region"),
        };
        app.load_current_image(&cc.egui_ctx);
        Ok(app)
    }

    fn current(&self) -> Option<&ImageRef> {
        self.files.get(self.current_index)
    }

    fn load_current_image(&mut self, ctx: &egui::Context) {
        let Some(image_ref) = self.current() else {
            self.texture = None;
            self.status = "No images loaded".into();
            return;
        };
        let path = image_ref.path.clone();
        match image::open(&path) {
            Ok(image) => {
                let color_image = to_color_image(&image);
                if let Some(texture) = self.texture.as_mut() {
                    texture.set(color_image, egui::TextureOptions::LINEAR);
                } else {
                    self.texture = Some(ctx.load_texture(
                        "imagerenamer-current",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                self.status = format!(
                    "Loaded {} ({}/{})",
                    path.display(),
                    self.current_index + 1,
                    self.files.len()
                );
            }
            Err(err) => {
                self.texture = None;
                self.status = format!("Failed to load {}: {err}", path.display());
            }
        }
        self.refresh_placement();
    }

    /// Recomputes the placement for the active image against the current
    /// viewport. Called on image change and after a debounced resize.
    fn refresh_placement(&mut self) {
        self.placement = self.current().map(|image_ref| {
            Placement::fit(image_ref.size(), self.viewport, self.margin)
        });
    }

    fn show_image_at(&mut self, ctx: &egui::Context, index: usize) {
        if index >= self.files.len() {
            return;
        }
        let old_placement = self.placement;
        self.current_index = index;
        self.load_current_image(ctx);
        let carried = carry_selection(
            self.carry,
            old_placement,
            self.placement,
            self.canvas.selector.rect(),
        );
        self.canvas.selector.set_rect(carried);
    }

    fn advance(&mut self, ctx: &egui::Context) {
        if self.current_index + 1 < self.files.len() {
            self.show_image_at(ctx, self.current_index + 1);
        } else {
            self.status = "Already at the last image".into();
        }
    }

    fn go_back(&mut self, ctx: &egui::Context) {
        if self.current_index > 0 {
            self.show_image_at(ctx, self.current_index - 1);
        } else {
            self.status = "Already at the first image".into();
        }
    }

    fn start_batch(&mut self) {
        let selection = self.canvas.selector.rect();
        let config = BatchConfig {
            viewport: self.viewport,
            margin: self.margin,
            language: self.language.clone(),
            dry_run: self.dry_run,
        };
        let report = run_batch(
            &self.files,
            selection.as_ref(),
            &config,
            &self.recognizer,
            |outcome| self.status = outcome.describe(),
        );
        match report {
            Ok(report) => {
                if !self.dry_run {
                    // Renamed files keep their session slot under the new path.
                    for (image_ref, outcome) in self.files.iter_mut().zip(&report.outcomes) {
                        if let crate::rename::RenameStatus::Renamed(new_path) = &outcome.status {
                            image_ref.path = new_path.clone();
                        }
                    }
                }
                self.status = format!("Batch finished: {}", report.summary());
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn handle_keyboard(ctx: &egui::Context) -> KeyboardState {
        ctx.input(|input| KeyboardState {
            next_image: input.key_pressed(egui::Key::Space),
            prev_image: input.key_pressed(egui::Key::Backspace),
            rename: input.key_pressed(egui::Key::Enter),
            escape: input.key_pressed(egui::Key::Escape),
        })
    }
}

impl App for RenamerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut Frame) {
        let _ = frame;

        let keys = Self::handle_keyboard(ctx);

        if keys.escape {
            if self.canvas.selector.rect().is_some() {
                self.canvas.clear();
                self.status = "Selection cleared".into();
            } else {
                ctx.send_viewport_cmd(ViewportCommand::Close);
                return;
            }
        }
        if keys.rename {
            self.start_batch();
        }
        if keys.next_image {
            self.advance(ctx);
        }
        if keys.prev_image {
            self.go_back(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            painter.rect_filled(response.rect, 0.0, Color32::BLACK);
            let origin = response.rect.min.to_vec2();

            let now = Instant::now();
            let viewport = response.rect.size();
            if self.placement.is_none() || self.viewport == egui::Vec2::ZERO {
                // First display: place immediately, nothing to debounce.
                self.viewport = viewport;
                self.refresh_placement();
            } else if viewport != self.viewport {
                self.viewport = viewport;
                self.debouncer.notify(viewport, now);
            }
            if let Some(viewport) = self.debouncer.take_ready(now) {
                let old_placement = self.placement;
                self.viewport = viewport;
                self.refresh_placement();
                if self.carry == SelectionCarry::Rescale {
                    if let (Some(from), Some(to), Some(rect)) =
                        (old_placement, self.placement, self.canvas.selector.rect())
                    {
                        self.canvas.selector.set_rect(Some(from.rescale(&to, &rect)));
                    }
                }
            }

            let draw_text_with_bg = |pos: egui::Pos2,
                                     align: egui::Align2,
                                     text: String,
                                     font: egui::FontId,
                                     color: Color32| {
                let galley = ctx.fonts_mut(|fonts| fonts.layout_no_wrap(text, font, color));
                let rect = align.anchor_size(pos, galley.size());
                painter.rect_filled(rect.expand(4.0), 4.0, Color32::from_black_alpha(178));
                painter.galley(rect.min, galley, Color32::WHITE);
            };

            if let (Some(texture), Some(placement)) = (&self.texture, self.placement) {
                let image_rect = placement.display_rect().translate(origin);
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );

                let image_response = ui.interact(
                    response.rect,
                    ui.id().with("image"),
                    egui::Sense::click_and_drag(),
                );
                if let Some(rect) = self.canvas.handle_pointer(&image_response, origin) {
                    let rect = rect.normalized();
                    self.status = format!(
                        "Selection: ({:.0}, {:.0}) - ({:.0}, {:.0})",
                        rect.left, rect.top, rect.right, rect.bottom
                    );
                }
                self.canvas.draw(&painter, origin);
            } else {
                painter.text(
                    response.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No image",
                    egui::FontId::proportional(24.0),
                    Color32::WHITE,
                );
            }

            draw_text_with_bg(
                response.rect.left_bottom() + egui::vec2(12.0, -12.0),
                egui::Align2::LEFT_BOTTOM,
                self.status.clone(),
                egui::FontId::monospace(16.0),
                Color32::WHITE,
            );

            draw_text_with_bg(
                response.rect.right_bottom() + egui::vec2(-12.0, -12.0),
                egui::Align2::RIGHT_BOTTOM,
                "Enter: Rename | Space: Next | Backspace: Prev | Esc: Clear/Quit".to_string(),
                egui::FontId::monospace(16.0),
                Color32::from_gray(200),
            );

            draw_text_with_bg(
                response.rect.left_top() + egui::vec2(12.0, 12.0),
                egui::Align2::LEFT_TOP,
                format!("Image {} of {}", self.current_index + 1, self.files.len()),
                egui::FontId::proportional(20.0),
                Color32::WHITE,
            );
        });

        if self.debouncer.is_pending() {
            ctx.request_repaint_after(crate::ui::RESIZE_DEBOUNCE);
        }
    }
}
