pub mod document;
pub mod emit;
pub mod pipeline;
pub mod rules;
pub mod warning;

pub use document::{Document, DocumentNode, InlineNode};
pub use emit::Emitter;
pub use pipeline::Pipeline;
pub use warning::ParseWarning;
