pub mod pairs;

pub use pairs::{DisplayMode, SentencePair};
