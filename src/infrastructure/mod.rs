pub mod entities;
pub mod ollama;
pub mod settings;
pub mod traits;
pub mod transcripts;
