use super::dispatcher::{RunSummary, build_jobs, dispatch};
use super::job::{DestinationNaming, Job};
use super::pipeline::Pipeline;
use crate::config::RunConfig;
use crate::tools::scan_matching_files;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::sync::Arc;

/// 掃描檔匯入
///
/// 流程：
/// A. 掃描來源資料夾並排序
/// B. 與幻燈片編號配對為工作（數量不符即中止）
/// C. worker pool 平行執行 複製 → 寫入 metadata →（選用）預覽圖
/// D. 等待所有 worker 回報並輸出摘要
pub struct ScanImporter {
    config: Arc<RunConfig>,
    slides: Vec<u32>,
}

impl ScanImporter {
    #[must_use]
    pub fn new(config: RunConfig, slides: Vec<u32>) -> Self {
        Self {
            config: Arc::new(config),
            slides,
        }
    }

    /// 執行前檢查並建立工作清單，不會建立任何目的檔
    pub fn plan(&self) -> Result<Vec<Job>> {
        let files = scan_matching_files(&self.config.source_directory, &self.config.file_suffix)?;
        let naming = DestinationNaming::from_config(&self.config);
        build_jobs(files, &self.slides, &naming)
    }

    pub fn run(&self) -> Result<RunSummary> {
        let jobs = self.plan()?;

        println!(
            "Processing {} files from {} to {} with {} workers",
            jobs.len(),
            self.config.source_directory.display(),
            self.config.destination_directory.display(),
            self.config.worker_count
        );

        let progress = self.create_progress_bar(jobs.len());
        let pipeline = Arc::new(Pipeline::new(Arc::clone(&self.config), progress.clone()));

        let summary = dispatch(jobs, self.config.worker_count, pipeline)?;

        progress.finish_and_clear();
        println!("Done...");

        Ok(summary)
    }

    fn create_progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        if let Ok(progress_style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            progress_bar.set_style(progress_style.progress_chars("#>-"));
        }
        progress_bar.set_message("處理中...");
        progress_bar
    }

    pub fn print_summary(summary: &RunSummary) {
        println!();
        println!("{}", style("=== 匯入摘要 ===").cyan().bold());
        println!("  總計: {} 個檔案", summary.total_jobs);
        println!("  成功: {} 個", style(summary.completed()).green());

        let failed = summary.failed();
        if failed > 0 {
            println!("  失敗: {} 個", style(failed).red());
            for failure in summary.failures() {
                println!("    {failure}");
            }
        }

        let stranded = summary.stranded();
        if stranded > 0 {
            println!("  未處理: {} 個", style(stranded).yellow());
            warn!("{stranded} 個工作因 worker 停止而未被處理");
        }

        info!(
            "匯入完成 - 成功: {}, 失敗: {}, 未處理: {}",
            summary.completed(),
            failed,
            stranded
        );
    }
}
