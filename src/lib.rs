pub mod analyzer;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod report;
pub mod util;

pub use analyzer::DocumentAnalyzer;
pub use error::AnalysisError;
