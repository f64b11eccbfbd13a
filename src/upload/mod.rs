mod client;
mod file_processor;
mod types;

pub use client::ApiClient;
pub use file_processor::{FileProcessor, IMAGE_EXTENSIONS};
pub use types::{AnalysisResult, FileReference, FileSummary, SelectedFile};
