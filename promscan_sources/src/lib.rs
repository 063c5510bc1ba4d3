pub mod config;
pub mod parser;
pub mod runner;

pub use config::{DocumentKind, QueryTarget, ScanSettings, SourceDocument};
pub use parser::{parse_document_from_file, parse_document_from_str};
pub use runner::{Diagnostic, DocumentResult, DocumentRunner};
