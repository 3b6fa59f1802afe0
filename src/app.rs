use crate::command::Command;
use crate::controller::EditorController;
use crate::decoder::Decoder;
use crate::library::Library;
use crate::panels;
use crate::placed_image::PlacedImage;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::texture_cache::TextureCache;
use crate::tools::{StrokeStyle, Tool};
use egui::{Color32, Rect, TextureId};
use image::RgbaImage;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const PREFS_KEY: &str = "roomsketch_prefs";
const EXPORT_FILE: &str = "roomsketch-export.jpg";

/// Tool preferences that survive restarts. Scene content deliberately does
/// not; a fresh launch starts from an empty canvas.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct StylePrefs {
    tool: Tool,
    style: StrokeStyle,
    background_color: Color32,
}

impl Default for StylePrefs {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            style: StrokeStyle::default(),
            background_color: Color32::WHITE,
        }
    }
}

// Everything the rendered frame depends on besides the frame buffer itself.
#[derive(Clone, Copy, PartialEq)]
struct FrameStamp {
    scene: u64,
    controller: u64,
    tool: Tool,
    style: StrokeStyle,
}

/// A row of the furniture list as the tools panel shows it.
pub struct LibraryRow {
    pub id: Uuid,
    pub name: String,
    pub pending: bool,
    pub failed: bool,
}

/// The editor application: scene, interaction controller, renderer and the
/// collaborator stand-ins (file drop ingestion, JPEG export to disk).
pub struct SketchApp {
    scene: Scene,
    controller: EditorController,
    renderer: Renderer,
    library: Library,
    decoder: Decoder,
    textures: TextureCache,
    frame: Option<RgbaImage>,
    frame_stamp: Option<FrameStamp>,
    frame_version: u64,
    status: Option<String>,
    tool: Tool,
    style: StrokeStyle,
    background_color: Color32,
}

impl SketchApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let prefs: StylePrefs = cc
            .storage
            .and_then(|storage| storage.get_string(PREFS_KEY))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();

        Self {
            scene: Scene::new(),
            controller: EditorController::new(),
            renderer: Renderer::new(),
            library: Library::new(),
            decoder: Decoder::new(),
            textures: TextureCache::new(),
            frame: None,
            frame_stamp: None,
            frame_version: 0,
            status: None,
            tool: prefs.tool,
            style: prefs.style,
            background_color: prefs.background_color,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.tool = tool;
            self.controller.tool_changed();
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn style_mut(&mut self) -> &mut StrokeStyle {
        &mut self.style
    }

    pub fn background_color(&self) -> Color32 {
        self.background_color
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn apply_command(&mut self, command: Command) {
        command.apply(&mut self.scene);
    }

    /// Register a furniture photo and kick off its decode.
    pub fn add_furniture(&mut self, name: String, bytes: Arc<[u8]>) {
        let id = self.library.add(name, Arc::clone(&bytes));
        self.decoder.request(id, bytes);
    }

    pub fn library_rows(&self) -> Vec<LibraryRow> {
        self.library
            .items()
            .iter()
            .map(|item| LibraryRow {
                id: item.id(),
                name: item.name().to_owned(),
                pending: item.is_pending(),
                failed: item.is_failed(),
            })
            .collect()
    }

    /// Place a decoded furniture photo on the canvas at the default spot.
    pub fn place_item(&mut self, id: Uuid) {
        let Some(item) = self.library.get(id) else {
            return;
        };
        let Some(raster) = item.raster() else {
            return;
        };
        let placed = PlacedImage::at_default_placement(
            id,
            Some(Arc::clone(raster)),
            [raster.width(), raster.height()],
        );
        self.apply_command(Command::AddImage(placed));
    }

    /// Use a decoded photo as the room backdrop.
    pub fn set_backdrop(&mut self, id: Uuid) {
        let Some(raster) = self.library.get(id).and_then(|item| item.raster()) else {
            return;
        };
        let raster = Arc::clone(raster);
        self.apply_command(Command::SetBackgroundImage(raster));
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.background_color = color;
        self.apply_command(Command::SetBackgroundColor(color));
    }

    /// Flatten the committed scene and hand the encoded bytes to the
    /// generation collaborator (stand-in: a JPEG next to the working
    /// directory).
    pub fn export(&mut self) {
        match self.renderer.flatten(&self.scene) {
            Ok(flattened) => match std::fs::write(EXPORT_FILE, &flattened.bytes) {
                Ok(()) => {
                    info!(
                        "exported composition ({}, {} bytes) to {EXPORT_FILE}",
                        flattened.mime,
                        flattened.bytes.len()
                    );
                    self.status = Some(format!("Exported to {EXPORT_FILE}"));
                }
                Err(err) => {
                    warn!("could not write {EXPORT_FILE}: {err}");
                    self.status = Some(format!("Export failed: {err}"));
                }
            },
            Err(err) => {
                warn!("export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    /// Texture of the current canvas frame, re-rendered only when the scene
    /// or interaction state changed since the last frame.
    pub fn frame_texture(&mut self, ctx: &egui::Context) -> TextureId {
        let stamp = FrameStamp {
            scene: self.scene.version(),
            controller: self.controller.revision(),
            tool: self.tool,
            style: self.style,
        };
        if self.frame_stamp != Some(stamp) || self.frame.is_none() {
            self.frame = Some(self.renderer.render_frame(
                &self.scene,
                &self.controller,
                self.tool,
                self.style,
            ));
            self.frame_stamp = Some(stamp);
            self.frame_version = self.frame_version.wrapping_add(1);
        }
        let frame = self
            .frame
            .as_ref()
            .expect("frame was just rendered");
        self.textures.frame(ctx, self.frame_version, frame)
    }

    pub fn thumbnail_texture(&mut self, ctx: &egui::Context, id: Uuid) -> Option<TextureId> {
        let item = self.library.get(id)?;
        let thumbnail = item.thumbnail()?;
        Some(self.textures.thumbnail(ctx, id, thumbnail))
    }

    /// Translate raw pointer input over the canvas into controller events.
    /// Leaving the canvas (or the window) acts as an implicit pointer-up.
    pub fn handle_pointer(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        let (hover, pressed, released) = ctx.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });

        let mut commands: Vec<Command> = Vec::new();
        match hover {
            Some(screen) if canvas_rect.contains(screen) => {
                let pos = (screen - canvas_rect.min).to_pos2();
                if pressed {
                    self.controller
                        .pointer_down(pos, &self.scene, self.tool, self.style);
                } else if released {
                    commands.extend(self.controller.pointer_up());
                } else if self.controller.last_pointer() != Some(pos) {
                    commands.extend(self.controller.pointer_move(pos, &self.scene));
                }
                ctx.set_cursor_icon(self.controller.cursor(&self.scene, self.tool));
            }
            _ => {
                commands.extend(self.controller.pointer_leave());
            }
        }
        for command in commands {
            self.apply_command(command);
        }
    }

    fn drain_decodes(&mut self) {
        for outcome in self.decoder.poll() {
            if let Ok(raster) = &outcome.result {
                // A placement made before the decode finished gets its
                // pixels now.
                self.scene.attach_raster(outcome.id, raster);
            }
            self.library.resolve(outcome.id, outcome.result);
        }
    }

    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        for file in dropped {
            if !is_image_file(&file) {
                warn!("dropped file is not a supported image type: {}", file.name);
                continue;
            }
            let name = if !file.name.is_empty() {
                file.name.clone()
            } else {
                file.path
                    .as_ref()
                    .and_then(|path| path.file_name())
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "photo".to_owned())
            };
            let bytes: Option<Arc<[u8]>> = match (file.bytes, &file.path) {
                (Some(bytes), _) => Some(bytes),
                (None, Some(path)) => std::fs::read(path).ok().map(Arc::from),
                (None, None) => None,
            };
            match bytes {
                Some(bytes) => self.add_furniture(name, bytes),
                None => warn!("dropped file '{name}' had no readable bytes"),
            }
        }
    }
}

// MIME when the platform provides one, file extension otherwise.
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let Some(path) = &file.path else {
        return false;
    };
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        })
        .unwrap_or(false)
}

impl eframe::App for SketchApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let prefs = StylePrefs {
            tool: self.tool,
            style: self.style,
            background_color: self.background_color,
        };
        if let Ok(json) = serde_json::to_string(&prefs) {
            storage.set_string(PREFS_KEY, json);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_decodes();
        self.collect_dropped_files(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        if self.library.has_pending() {
            // Keep polling while decodes are in flight, even without input.
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
