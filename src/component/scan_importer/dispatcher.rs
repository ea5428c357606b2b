use super::job::{DestinationNaming, Job};
use super::pipeline::{JobFailure, JobRunner};
use super::worker_pool::{WorkerPool, WorkerReport};
use anyhow::{Result, bail};
use log::warn;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// 將排序好的來源檔案與幻燈片編號依位置一一配對
///
/// 兩者長度不同或編號重複時直接回傳錯誤，不建立任何工作。
pub fn build_jobs(
    files: Vec<PathBuf>,
    slides: &[u32],
    naming: &DestinationNaming,
) -> Result<Vec<Job>> {
    if files.len() != slides.len() {
        bail!(
            "{} files found but {} slide numbers specified",
            files.len(),
            slides.len()
        );
    }

    let mut seen = HashSet::with_capacity(slides.len());
    if let Some(duplicate) = slides.iter().find(|&&slide| !seen.insert(slide)) {
        bail!("slide number {duplicate} specified more than once");
    }

    Ok(files
        .into_iter()
        .zip(slides)
        .map(|(source_path, &slide_id)| Job {
            source_path,
            destination_stem: naming.stem(slide_id),
            slide_id,
        })
        .collect())
}

/// 一次執行的統計
#[derive(Debug)]
pub struct RunSummary {
    pub total_jobs: usize,
    pub reports: Vec<WorkerReport>,
}

impl RunSummary {
    #[must_use]
    pub fn dequeued(&self) -> usize {
        self.reports.iter().map(|r| r.jobs_dequeued).sum()
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.reports.iter().map(|r| r.jobs_completed).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// 從未被任何 worker 取出的工作數
    #[must_use]
    pub fn stranded(&self) -> usize {
        self.total_jobs.saturating_sub(self.dequeued())
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobFailure> {
        self.reports.iter().filter_map(|r| r.failure.as_ref())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.stranded() == 0
    }
}

/// 啟動 worker、依序排入所有工作、關閉佇列後等待每個 worker 回報
pub fn dispatch(
    jobs: Vec<Job>,
    worker_count: usize,
    runner: Arc<dyn JobRunner>,
) -> Result<RunSummary> {
    let total_jobs = jobs.len();
    let pool = WorkerPool::start(worker_count, runner)?;

    let mut enqueued = 0;
    for job in jobs {
        if let Err(job) = pool.submit(job) {
            warn!(
                "所有 worker 都已停止，{} 起的 {} 個工作未排入佇列",
                job.source_path.display(),
                total_jobs - enqueued
            );
            break;
        }
        enqueued += 1;
    }

    let reports = pool.join();

    Ok(RunSummary {
        total_jobs,
        reports,
    })
}
