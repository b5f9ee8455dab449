//! HTML rendering for conversations.
//!
//! ```text
//! render/
//! ├── mod.rs        # Module facade (this file)
//! ├── renderer.rs   # Message -> HTML fragment, conversation rows
//! ├── markdown.rs   # Markdown body conversion (pulldown-cmark)
//! ├── template.rs   # Page shell and escaping helpers
//! └── styles.rs     # Inline CSS
//! ```
//!
//! Everything here is pure: no I/O, no shared state.

mod markdown;
mod renderer;
mod styles;
mod template;

pub use markdown::render_markdown;
pub use renderer::{render_conversation_list, render_message, render_messages};
pub use styles::{colors, generate_styles};
pub use template::{
    PageView, escape_angle_brackets, html_escape, render_document, render_page,
};
