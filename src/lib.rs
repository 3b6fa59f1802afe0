#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod controller;
pub mod decoder;
pub mod element;
pub mod error;
pub mod hit_testing;
pub mod library;
pub mod panels;
pub mod placed_image;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod texture_cache;
pub mod tools;

pub use app::SketchApp;
pub use command::Command;
pub use controller::{EditorController, InteractionState};
pub use element::{DrawnElement, ElementRef, PendingElement, ShapeKind};
pub use placed_image::PlacedImage;
pub use renderer::{Flattened, Renderer, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use scene::{Background, Scene};
pub use tools::{StrokeStyle, Tool};
