//! 编排层（Orchestration Layer）
//!
//! 每个子命令一条直线流程，只做调度和统计，具体能力在 `services/` 与 `clients/` 中。
//!
//! ```text
//! pdf_sampler         样本清单 CSV → 0_pdf/<encoded doi>.pdf
//! batch_packager      resolve → discover → staging → copy → commit → summary
//! training_submitter  0_pdf/*.pdf → GROBID createTraining → 1_generated/*.zip
//! archive_unpacker    1_generated/*.zip → 1_generated/<name>/
//! ```

pub mod archive_unpacker;
pub mod batch_packager;
pub mod pdf_sampler;
pub mod training_submitter;

pub use archive_unpacker::{unpack_batch, UnzipStats};
pub use batch_packager::{package_batch, PackageReport};
pub use pdf_sampler::{sample_pdfs, SamplePlan, SampleStats};
pub use training_submitter::{submit_batch, SubmitStats};
