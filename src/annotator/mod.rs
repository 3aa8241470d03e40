// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interaction controller.
//!
//! [`Annotator`] owns the label store, the index counter, the live style
//! and the loaded image. Every pointer, keyboard and panel event maps to
//! one synchronous method here; each method that changes what is visible
//! redraws the overlay before returning.
//!
//! Methods return [`LabelerError`] directly so callers can inspect
//! failures. [`Annotator::dispatch`] is the UI entry point: it runs a
//! [`Command`] and reports any error to the output log instead.

pub mod keys;
pub mod output;

use crate::config::{LabelerConfig, DISPLAY_WIDTH_RANGE, FONT_SIZE_RANGE};
use crate::error::{LabelerError, Result};
use crate::io::export::{export_path, ExportFormat, ExportSink};
use crate::io::media::ImageProvider;
use crate::models::{
    label::{Label, Point},
    sequencer::IndexSequencer,
    store::LabelStore,
    style::{Color, StyleSnapshot},
};
use crate::render::compositor::{composite_for_export, render_overlay, RenderOptions};
use crate::render::surface::{CanvasSurface, Layer};
use image::RgbaImage;
use keys::{command_for_key, font_preset_size, KeyPress};
use output::OutputLog;
use std::path::{Path, PathBuf};

/// What a primary click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Label,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    /// Always removes the nearest label, whatever the mode.
    Middle,
}

/// Named operations reachable from buttons and shortcuts.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(PathBuf),
    Clear,
    Undo,
    Save,
    Rotate(Rotation),
    SetMode(Mode),
    FontPreset(u8),
    StepIndex(i64),
}

struct LoadedImage {
    path: PathBuf,
    /// Full resolution, with all rotations applied.
    source: RgbaImage,
    display_scale: f32,
}

pub struct Annotator<P, C, S> {
    images: P,
    canvas: C,
    sink: S,
    store: LabelStore,
    sequencer: IndexSequencer,
    style: StyleSnapshot,
    mode: Mode,
    image: Option<LoadedImage>,
    display_width: u32,
    render_options: RenderOptions,
    export_format: ExportFormat,
    output: OutputLog,
    revision: u64,
}

impl<P: ImageProvider, C: CanvasSurface, S: ExportSink> Annotator<P, C, S> {
    pub fn new(images: P, canvas: C, sink: S, config: &LabelerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            images,
            canvas,
            sink,
            store: LabelStore::new(),
            sequencer: IndexSequencer::new(config.start_index),
            style: config.initial_style()?,
            mode: Mode::Label,
            image: None,
            display_width: config.display_width,
            render_options: RenderOptions {
                stroke_width: config.stroke_width,
            },
            export_format: config.export_format,
            output: OutputLog::default(),
            revision: 0,
        })
    }

    pub fn labels(&self) -> &[Label] {
        self.store.all()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Style the next label will be created with.
    pub fn style(&self) -> &StyleSnapshot {
        &self.style
    }

    pub fn next_index(&self) -> u32 {
        self.sequencer.peek()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|img| img.path.as_path())
    }

    /// Size of the canvas the labels are placed on.
    pub fn display_size(&self) -> (u32, u32) {
        self.canvas.size()
    }

    /// Display pixels per source pixel.
    pub fn display_scale(&self) -> Option<f32> {
        self.image.as_ref().map(|img| img.display_scale)
    }

    pub fn display_width(&self) -> u32 {
        self.display_width
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputLog {
        &mut self.output
    }

    /// Bumped whenever the canvas content changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Flattened view of both layers, as it would be exported.
    pub fn composite(&self) -> RgbaImage {
        composite_for_export(&self.canvas)
    }

    /// Primary-button release at canvas coordinates `(x, y)`.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<()> {
        self.pointer_up_with(PointerButton::Primary, x, y)
    }

    pub fn pointer_up_with(&mut self, button: PointerButton, x: f64, y: f64) -> Result<()> {
        if self.image.is_none() {
            log::debug!("Ignoring click at ({:.1}, {:.1}): no image loaded", x, y);
            return Ok(());
        }
        let position = Point::new(x, y);

        match (button, self.mode) {
            (PointerButton::Primary, Mode::Label) => {
                let text = self.style.format_label(self.sequencer.peek())?;
                self.sequencer.next();
                log::debug!("Placed {} at ({:.1}, {:.1})", text, x, y);
                self.store
                    .append(Label::new(text, position, self.style.clone()));
            }
            (PointerButton::Primary, Mode::Remove) | (PointerButton::Middle, _) => {
                if let Some(removed) = self.store.remove_nearest(position) {
                    log::debug!("Removed {} nearest to ({:.1}, {:.1})", removed.text, x, y);
                }
            }
        }

        self.render();
        Ok(())
    }

    /// Pointer release from the UI. Errors are reported, not returned.
    pub fn click(&mut self, button: PointerButton, at: Point) {
        let result = match button {
            PointerButton::Primary => self.pointer_up(at.x, at.y),
            other => self.pointer_up_with(other, at.x, at.y),
        };
        if let Err(err) = result {
            self.report(&err);
        }
    }

    /// Remove the most recent label. The index counter is left as is.
    pub fn undo(&mut self) -> Result<Label> {
        let label = self.store.undo_last()?;
        log::debug!("Undid {}", label.text);
        self.render();
        Ok(label)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::info!("Mode: {:?}", mode);
        }
        self.mode = mode;
    }

    /// Rotate the image a quarter turn.
    ///
    /// Label positions are kept as they are, so after a rotation they no
    /// longer sit on the features they were placed on.
    pub fn rotate(&mut self, direction: Rotation) -> Result<()> {
        let image = self.image.as_mut().ok_or(LabelerError::NoImage)?;
        image.source = self
            .images
            .rotate90(&image.source, direction == Rotation::Clockwise);
        log::info!(
            "Rotated {:?}, now {}x{}",
            direction,
            image.source.width(),
            image.source.height()
        );
        self.redraw_base();
        self.render();
        Ok(())
    }

    /// Load a new image, discarding all labels.
    ///
    /// On a decode failure nothing changes.
    pub fn load_image(&mut self, path: &Path) -> Result<()> {
        let source = self.images.load(path)?;
        log::info!(
            "Loaded image: {} ({}x{})",
            path.display(),
            source.width(),
            source.height()
        );

        self.store.clear();
        self.image = Some(LoadedImage {
            path: path.to_path_buf(),
            source,
            display_scale: 1.0,
        });
        self.redraw_base();
        self.render();
        Ok(())
    }

    pub fn clear(&mut self) {
        if !self.store.is_empty() {
            log::info!("Cleared {} labels", self.store.len());
        }
        self.store.clear();
        self.canvas.clear_layer(Layer::Overlay);
        self.revision += 1;
    }

    /// Composite both layers and write them next to the source image.
    pub fn save(&mut self) -> Result<PathBuf> {
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| LabelerError::Export("no image loaded".to_string()))?;
        let path = export_path(&image.path, self.store.all(), self.export_format)?;

        let raster = composite_for_export(&self.canvas);
        self.sink.write_file(&path, &raster)?;
        log::info!(
            "Saved {} labels to {} ({}x{})",
            self.store.len(),
            path.display(),
            raster.width(),
            raster.height()
        );
        Ok(path)
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.style.prefix = prefix.into();
    }

    /// Accepted as typed; a malformed format is reported on the next click.
    pub fn set_number_format(&mut self, format: impl Into<String>) {
        self.style.number_format = format.into();
    }

    pub fn set_fill_color(&mut self, color: &str) -> Result<()> {
        self.style.fill_color = Color::parse(color)?;
        log::info!("Fill colour: {}", self.style.fill_color);
        Ok(())
    }

    pub fn set_stroke_color(&mut self, color: &str) -> Result<()> {
        self.style.stroke_color = Color::parse(color)?;
        log::info!("Stroke colour: {}", self.style.stroke_color);
        Ok(())
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.style.font_size = size.clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
    }

    pub fn set_index(&mut self, value: u32) {
        self.sequencer.set(value);
    }

    pub fn step_index(&mut self, delta: i64) {
        self.sequencer.step(delta);
    }

    /// Change the maximum display width, refitting a loaded image.
    pub fn set_display_width(&mut self, width: u32) {
        let width = width.clamp(*DISPLAY_WIDTH_RANGE.start(), *DISPLAY_WIDTH_RANGE.end());
        if width == self.display_width {
            return;
        }
        self.display_width = width;
        if self.image.is_some() {
            self.redraw_base();
            self.render();
        }
    }

    /// Translate a key press and run it. Returns whether the key was bound.
    pub fn handle_key(&mut self, press: KeyPress) -> bool {
        match command_for_key(press) {
            Some(command) => {
                self.dispatch(command);
                true
            }
            None => false,
        }
    }

    /// Run a command, reporting the outcome to the output log.
    ///
    /// Errors end here; nothing is propagated to the caller.
    pub fn dispatch(&mut self, command: Command) {
        let result = match command {
            Command::Load(path) => self.load_image(&path).map(|()| {
                let (w, h) = self.display_size();
                format!("Loaded {} ({}x{})", path.display(), w, h)
            }),
            Command::Clear => {
                self.clear();
                Ok("Cleared all labels".to_string())
            }
            Command::Undo => self.undo().map(|label| format!("Removed {}", label.text)),
            Command::Save => self.save().map(|path| format!("Saved to {}", path.display())),
            Command::Rotate(direction) => self.rotate(direction).map(|()| {
                let (w, h) = self.display_size();
                format!("Rotated to {}x{}", w, h)
            }),
            Command::SetMode(mode) => {
                self.set_mode(mode);
                Ok(format!("Mode: {:?}", mode))
            }
            Command::FontPreset(n) => {
                self.set_font_size(font_preset_size(n));
                Ok(format!("Font size: {}", self.style.font_size))
            }
            Command::StepIndex(delta) => {
                self.step_index(delta);
                Ok(format!("Next index: {}", self.sequencer.peek()))
            }
        };

        match result {
            Ok(message) => self.output.push(message),
            Err(err) => self.report(&err),
        }
    }

    /// Log an error and show it in the output panel.
    pub fn report(&mut self, err: &LabelerError) {
        match err {
            LabelerError::EmptyStore | LabelerError::NoImage => log::warn!("{}", err),
            _ => log::error!("{}", err),
        }
        self.output.push(format!("Error: {}", err));
    }

    /// Refit the source image to the display width and put it on the base layer.
    fn redraw_base(&mut self) {
        let Some(image) = self.image.as_mut() else {
            return;
        };
        let (display, scale) = self
            .images
            .resize_to_fit(&image.source, self.display_width);
        if scale < 1.0 {
            log::info!(
                "Image resized: {}x{} -> {}x{}",
                image.source.width(),
                image.source.height(),
                display.width(),
                display.height()
            );
        }
        image.display_scale = scale;
        self.canvas.put_image(&display);
        self.revision += 1;
    }

    fn render(&mut self) {
        render_overlay(&mut self.canvas, self.store.all(), self.render_options);
        self.revision += 1;
    }
}
