//! Command Handlers 实现

mod podcast_handlers;
mod script_handlers;

pub use podcast_handlers::*;
pub use script_handlers::*;
