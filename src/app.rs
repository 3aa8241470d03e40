// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the egui panels to the [`Annotator`]: widget events
//! become annotator calls, and the composited canvas is uploaded as a
//! texture whenever the annotator reports a new revision.

use crate::annotator::{
    keys::{KeyModifiers, KeyPress},
    Annotator, Command,
};
use crate::config::LabelerConfig;
use crate::io::export::FileSink;
use crate::io::media::{self, DiskImages, IMAGE_EXTENSIONS, THUMBNAIL_SIZE};
use crate::io::serialization::{save_config, DEFAULT_CONFIG_FILE};
use crate::render::raster::{load_font, RasterCanvas};
use crate::ui::{canvas, files, properties, toolbar};
use std::path::{Path, PathBuf};

type DesktopAnnotator = Annotator<DiskImages, RasterCanvas, FileSink>;

/// Main application state.
pub struct LabelerApp {
    annotator: DesktopAnnotator,

    /// Startup configuration, the base for "Save Settings"
    config: LabelerConfig,

    /// Folder the image list is read from
    image_dir: PathBuf,

    /// Images in `image_dir`
    files: Vec<PathBuf>,

    /// Index into `files` of the highlighted entry
    selected_file: Option<usize>,

    /// Preview of the highlighted entry
    thumbnail: Option<egui::TextureHandle>,

    /// Composited canvas shown in the central panel
    canvas_texture: Option<egui::TextureHandle>,

    /// Annotator revision the canvas texture was built from
    shown_revision: Option<u64>,

    /// Text buffers behind the style panel
    form: properties::StyleForm,
}

impl LabelerApp {
    /// Create the application from a validated configuration.
    pub fn new(config: &LabelerConfig, image_dir: PathBuf) -> anyhow::Result<Self> {
        let font = load_font(config.font_path.as_deref())?;
        let annotator = Annotator::new(DiskImages, RasterCanvas::new(font), FileSink, config)?;
        let form = properties::StyleForm::from_style(
            annotator.style(),
            annotator.display_width(),
            annotator.next_index(),
        );

        let mut app = Self {
            annotator,
            config: config.clone(),
            image_dir: PathBuf::new(),
            files: Vec::new(),
            selected_file: None,
            thumbnail: None,
            canvas_texture: None,
            shown_revision: None,
            form,
        };
        app.open_folder(image_dir);
        Ok(app)
    }

    /// Read the image list of `dir` and select its first entry.
    fn open_folder(&mut self, dir: PathBuf) {
        match media::list_images(&dir) {
            Ok(files) => {
                log::info!("Found {} images in {}", files.len(), dir.display());
                self.files = files;
            }
            Err(e) => {
                log::error!("Failed to list {}: {}", dir.display(), e);
                self.annotator
                    .output_mut()
                    .push(format!("Error: cannot list {}: {}", dir.display(), e));
                self.files.clear();
            }
        }
        self.image_dir = dir;
        self.selected_file = None;
        self.thumbnail = None;
        // The thumbnail is built on the next frame, once a context exists.
        if !self.files.is_empty() {
            self.selected_file = Some(0);
        }
    }

    fn refresh_thumbnail(&mut self, ctx: &egui::Context) {
        if self.thumbnail.is_some() {
            return;
        }
        let Some(path) = self.selected_file.and_then(|i| self.files.get(i)) else {
            return;
        };
        match media::load_thumbnail(path, THUMBNAIL_SIZE) {
            Ok(thumb) => {
                let size = [thumb.width() as usize, thumb.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, thumb.as_raw());
                self.thumbnail =
                    Some(ctx.load_texture("thumbnail", color_image, egui::TextureOptions::LINEAR));
            }
            Err(e) => {
                log::warn!("No thumbnail for {}: {}", path.display(), e);
                self.selected_file = None;
            }
        }
    }

    /// Re-upload the canvas when the annotator changed it.
    fn refresh_canvas(&mut self, ctx: &egui::Context) {
        if !self.annotator.has_image() {
            self.canvas_texture = None;
            return;
        }
        if self.shown_revision == Some(self.annotator.revision()) {
            return;
        }

        let flattened = self.annotator.composite();
        let size = [flattened.width() as usize, flattened.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, flattened.as_raw());
        if let Some(texture) = self.canvas_texture.as_mut() {
            texture.set(color_image, egui::TextureOptions::LINEAR);
        } else {
            self.canvas_texture =
                Some(ctx.load_texture("canvas", color_image, egui::TextureOptions::LINEAR));
        }
        self.shown_revision = Some(self.annotator.revision());
    }

    /// Write the current style and folder to `labeler.yaml`.
    fn save_settings(&mut self) {
        let style = self.annotator.style();
        let settings = LabelerConfig {
            prefix: style.prefix.clone(),
            number_format: style.number_format.clone(),
            fill_color: style.fill_color.name().to_string(),
            stroke_color: style.stroke_color.name().to_string(),
            font_size: style.font_size,
            display_width: self.annotator.display_width(),
            start_index: self.annotator.next_index(),
            image_dir: Some(self.image_dir.clone()),
            ..self.config.clone()
        };

        let path = Path::new(DEFAULT_CONFIG_FILE);
        let message = match save_config(&settings, path) {
            Ok(()) => {
                log::info!("Saved settings to {}", path.display());
                self.config = settings;
                format!("Saved settings to {}", path.display())
            }
            Err(e) => {
                log::error!("Failed to save settings: {:#}", e);
                format!("Error: cannot save settings: {:#}", e)
            }
        };
        self.annotator.output_mut().push(message);
    }

    /// One-line summary shown under the canvas.
    fn status_line(&self) -> String {
        let Some(path) = self.annotator.image_path() else {
            return "No image loaded".to_string();
        };
        let (w, h) = self.annotator.display_size();
        let scale = self.annotator.display_scale().unwrap_or(1.0);
        format!(
            "{} | {}x{} ({:.0}%) | {} labels | mode {:?}",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            w,
            h,
            scale * 100.0,
            self.annotator.labels().len(),
            self.annotator.mode()
        )
    }

    fn load_selected(&mut self) {
        match self.selected_file.and_then(|i| self.files.get(i)) {
            Some(path) => self.annotator.dispatch(Command::Load(path.clone())),
            None => self
                .annotator
                .output_mut()
                .push("Error: no image selected".to_string()),
        }
    }

    fn apply_property(&mut self, action: properties::PropertiesAction) {
        use properties::PropertiesAction;

        let result = match action {
            PropertiesAction::Prefix(prefix) => {
                self.annotator.set_prefix(prefix);
                Ok(())
            }
            PropertiesAction::NumberFormat(format) => {
                self.annotator.set_number_format(format);
                Ok(())
            }
            PropertiesAction::FillColor(color) => self.annotator.set_fill_color(&color),
            PropertiesAction::StrokeColor(color) => self.annotator.set_stroke_color(&color),
            PropertiesAction::FontSize(size) => {
                self.annotator.set_font_size(size);
                Ok(())
            }
            PropertiesAction::DisplayWidth(width) => {
                self.annotator.set_display_width(width);
                Ok(())
            }
            PropertiesAction::Index(index) => {
                self.annotator.set_index(index);
                Ok(())
            }
        };

        if let Err(e) = result {
            self.annotator.report(&e);
            // Show the colour that is actually in effect again.
            let style = self.annotator.style();
            self.form.fill_color = style.fill_color.name().to_string();
            self.form.stroke_color = style.stroke_color.name().to_string();
        }
    }

    /// Forward shortcut keys to the annotator unless a text field has focus.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let presses: Vec<KeyPress> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Text(text) => text.chars().next().map(KeyPress::plain),
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } if modifiers.command || modifiers.alt => {
                        let ch = match key {
                            egui::Key::Z => 'z',
                            egui::Key::S => 's',
                            _ => return None,
                        };
                        Some(KeyPress {
                            key: ch,
                            modifiers: KeyModifiers {
                                ctrl: modifiers.command,
                                alt: modifiers.alt,
                            },
                        })
                    }
                    _ => None,
                })
                .collect()
        });

        for press in presses {
            self.annotator.handle_key(press);
        }
    }
}

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        // Keys may have moved these.
        self.form.index = self.annotator.next_index();
        self.form.font_size = self.annotator.style().font_size;

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .set_directory(&self.image_dir)
                            .pick_file()
                        {
                            self.annotator.dispatch(Command::Load(path));
                        }
                        ui.close_menu();
                    }
                    if ui.button("Open Folder...").clicked() {
                        if let Some(dir) = rfd::FileDialog::new()
                            .set_directory(&self.image_dir)
                            .pick_folder()
                        {
                            self.open_folder(dir);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save Labeled Image").clicked() {
                        self.annotator.dispatch(Command::Save);
                        ui.close_menu();
                    }
                    if ui.button("Save Settings").clicked() {
                        self.save_settings();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui.button("Undo (z)").clicked() {
                        self.annotator.dispatch(Command::Undo);
                        ui.close_menu();
                    }
                    if ui.button("Clear Labels (c)").clicked() {
                        self.annotator.dispatch(Command::Clear);
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.annotator.mode(), self.annotator.has_image())
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::SetMode(mode) => self.annotator.dispatch(Command::SetMode(mode)),
            toolbar::ToolbarAction::Load => self.load_selected(),
            toolbar::ToolbarAction::Clear => self.annotator.dispatch(Command::Clear),
            toolbar::ToolbarAction::Undo => self.annotator.dispatch(Command::Undo),
            toolbar::ToolbarAction::Save => self.annotator.dispatch(Command::Save),
            toolbar::ToolbarAction::Rotate(direction) => {
                self.annotator.dispatch(Command::Rotate(direction))
            }
            toolbar::ToolbarAction::None => {}
        }

        // Output log (bottom)
        egui::TopBottomPanel::bottom("output")
            .resizable(true)
            .default_height(90.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in self.annotator.output().lines() {
                            let text = egui::RichText::new(line).monospace();
                            if line.starts_with("Error:") {
                                ui.label(text.color(egui::Color32::LIGHT_RED));
                            } else {
                                ui.label(text);
                            }
                        }
                    });
            });

        // File list (left side)
        self.refresh_thumbnail(ctx);
        let files_action = egui::SidePanel::left("files")
            .default_width(320.0)
            .show(ctx, |ui| {
                files::show(ui, &self.files, self.selected_file, &self.thumbnail)
            })
            .inner;

        match files_action {
            files::FilesAction::Select(i) => {
                self.selected_file = Some(i);
                self.thumbnail = None;
            }
            files::FilesAction::Load(i) => {
                self.selected_file = Some(i);
                self.thumbnail = None;
                self.load_selected();
            }
            files::FilesAction::None => {}
        }

        // Style panel (right side)
        let property_actions = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, &mut self.form))
            .inner;

        for action in property_actions {
            self.apply_property(action);
        }

        // Main canvas (center)
        self.refresh_canvas(ctx);
        let next_label = self
            .annotator
            .style()
            .format_label(self.annotator.next_index())
            .unwrap_or_else(|_| "invalid format".to_string());
        let status = self.status_line();
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(
                    ui,
                    &self.canvas_texture,
                    self.annotator.mode(),
                    &next_label,
                    &status,
                )
            })
            .inner;

        if let canvas::CanvasAction::PointerUp(button, point) = canvas_action {
            self.annotator.click(button, point);
        }
    }
}
