//! 掃描檔匯入元件
//!
//! 複製掃描檔、以 exiv2 寫入 metadata，並可選擇產生預覽圖

mod dispatcher;
mod job;
mod main;
mod metadata_stamper;
mod pipeline;
mod preview_generator;
mod worker_pool;

#[cfg(test)]
mod test_support;

pub use dispatcher::{RunSummary, build_jobs, dispatch};
pub use job::{DestinationNaming, Job};
pub use main::ScanImporter;
pub use metadata_stamper::{FieldAssignment, MetadataStamper};
pub use pipeline::{JobFailure, JobOutput, JobRunner, Pipeline, PipelineStage};
pub use preview_generator::PreviewGenerator;
pub use worker_pool::{WorkerPool, WorkerReport};
