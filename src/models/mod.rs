pub mod batch;
pub mod model_type;
pub mod sample_catalog;

pub use batch::{BatchLayout, SourceStage, StageKind};
pub use model_type::{
    parse_tei_file_name, ModelType, NoMatchReason, TeiName, SEGMENTATION_MODEL,
    SEGMENTATION_SUFFIX, TEI_SUFFIX,
};
pub use sample_catalog::{encode_doi_for_filename, DownloadStatus, SampleCatalog};
