//! Text helpers used by the markdown renderer and the code block component
//!
//! Each helper is a pure function with no shared state.

mod entities;
mod html;
mod streak;

pub use entities::*;
pub use html::*;
pub use streak::*;
