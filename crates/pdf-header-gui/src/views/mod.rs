pub mod canvas;
pub mod log_panel;
pub mod queue_panel;
pub mod sidebar;

pub use canvas::{CanvasState, show_canvas};
pub use log_panel::show_log_panel;
pub use queue_panel::show_queue_panel;
pub use sidebar::show_sidebar;
