pub mod config;
pub mod grammar;
pub mod node;
pub mod recognizer;
pub mod serializer;

pub use config::{Config, Mode};
pub use node::{Attributes, Shortcode};
pub use recognizer::{Recognized, Recognizer};
pub use serializer::Serializer;
