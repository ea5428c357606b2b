use super::job::Job;
use super::metadata_stamper::MetadataStamper;
use super::preview_generator::PreviewGenerator;
use crate::config::RunConfig;
use crate::tools::PartialOutput;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{debug, error};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Copy,
    Stamp,
    Preview,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Copy => "copy",
            Self::Stamp => "stamp",
            Self::Preview => "preview",
        })
    }
}

/// 單一工作失敗的原因與所在階段
#[derive(Debug)]
pub struct JobFailure {
    pub job: Job,
    pub stage: PipelineStage,
    pub error: anyhow::Error,
}

impl JobFailure {
    fn new(job: &Job, stage: PipelineStage, error: anyhow::Error) -> Self {
        Self {
            job: job.clone(),
            stage,
            error,
        }
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (slide {}): {:#}",
            self.stage,
            self.job.source_path.display(),
            self.job.slide_id,
            self.error
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutput {
    pub destination: PathBuf,
    pub preview: Option<PathBuf>,
}

/// worker 執行單一工作的介面
pub trait JobRunner: Send + Sync {
    fn run(&self, job: &Job) -> Result<JobOutput, JobFailure>;
}

/// 複製 → 寫入 metadata →（選用）產生預覽圖
pub struct Pipeline {
    config: Arc<RunConfig>,
    progress: ProgressBar,
}

impl Pipeline {
    #[must_use]
    pub const fn new(config: Arc<RunConfig>, progress: ProgressBar) -> Self {
        Self { config, progress }
    }

    fn stamp_and_preview(
        &self,
        job: &Job,
        destination: PartialOutput,
    ) -> Result<JobOutput, JobFailure> {
        MetadataStamper::new(&self.config)
            .stamp(destination.path(), job.slide_id)
            .map_err(|e| {
                error!("Failed to set tags in file {}", destination.path().display());
                JobFailure::new(job, PipelineStage::Stamp, e)
            })?;
        let destination = destination.keep();

        let preview = if self.config.generate_preview {
            let preview = PreviewGenerator::new(&self.config)
                .generate(&destination)
                .map_err(|e| {
                    error!("Failed to generate preview for {}", destination.display());
                    JobFailure::new(job, PipelineStage::Preview, e)
                })?;
            Some(preview)
        } else {
            None
        };

        Ok(JobOutput {
            destination,
            preview,
        })
    }
}

impl JobRunner for Pipeline {
    fn run(&self, job: &Job) -> Result<JobOutput, JobFailure> {
        let destination = PartialOutput::new(&job.with_suffix(&self.config.file_suffix));

        copy_file(&job.source_path, destination.path()).map_err(|e| {
            error!("Failed to copy file {}", job.source_path.display());
            JobFailure::new(job, PipelineStage::Copy, e)
        })?;

        let result = self.stamp_and_preview(job, destination);
        self.progress.inc(1);

        if let Ok(output) = &result {
            debug!(
                "完成: {} -> {}",
                job.source_path.display(),
                output.destination.display()
            );
        }
        result
    }
}

fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).with_context(|| {
        format!(
            "無法複製檔案: {} -> {}",
            source.display(),
            destination.display()
        )
    })?;
    Ok(())
}
