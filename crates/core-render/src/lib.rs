//! Screen output for ved.
//!
//! * `viewport`: the wrap table mapping buffer positions to screen rows,
//!   plus the scroll offset that keeps the cursor visible.
//! * `status`: status line text (mode and position, prompt, one-shot
//!   message).
//! * `renderer`: draws a full frame through a `TerminalBackend`.
//!
//! The renderer only reads the buffer; the run loop decides when a frame
//! is due (after every dispatched key) and what the status line shows.

pub mod renderer;
pub mod status;
pub mod viewport;

pub use renderer::Renderer;
pub use status::{StatusContext, format_status};
pub use viewport::ViewportMapper;
