pub mod archive_extractor;
pub mod discovery;
pub mod file_copier;
pub mod packaging_dir;
pub mod source_scanner;
pub mod stage_resolver;
pub mod summary;

pub use archive_extractor::ArchiveExtractor;
pub use discovery::discover_model_types;
pub use file_copier::{copy_source_files, CopyStats};
pub use packaging_dir::StagedPackaging;
pub use source_scanner::scan_document_files;
pub use stage_resolver::resolve_source_stage;
pub use summary::{summarize_packaging, ModelSummary};
