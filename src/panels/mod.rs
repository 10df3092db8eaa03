mod central_panel;
mod text_overlay;
mod tools_panel;

pub use central_panel::central_panel;
pub use text_overlay::text_overlay;
pub use tools_panel::tools_panel;
