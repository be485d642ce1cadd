pub mod pair_parser;

// Re-export the main parsing function for convenience
pub use pair_parser::parse_translation_block;
