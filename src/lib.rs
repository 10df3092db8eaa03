#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod color_picker;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod history;
pub mod import;
pub mod input;
pub mod panels;
pub mod state;
pub mod surface;
pub mod text;
pub mod tools;
pub mod util;

pub use app::PaintApp;
pub use color::Rgb;
pub use config::PaintConfig;
pub use editor::{Editor, UiAction};
pub use error::{PaintError, PaintResult};
pub use history::History;
pub use input::{CanvasView, InputEvent, InputHandler};
pub use state::EditorState;
pub use surface::Surface;
pub use tools::{Shape, ToolKind, ToolState};
