use super::args::Args;
use super::types::{DEFAULT_SETTINGS_FILE, RunConfig, UserSettings};
use crate::tools::{parse_processing_date, validate_directory_exists};
use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local};
use std::fs;
use std::path::Path;

impl UserSettings {
    /// 讀取設定檔
    ///
    /// 未指定路徑時使用工作目錄下的 `settings.json`，檔案不存在則回傳預設值。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}

impl RunConfig {
    /// 合併命令列參數與設定檔，並檢查執行前的設定錯誤
    pub fn resolve(args: &Args, settings: UserSettings) -> Result<Self> {
        let processing_date = parse_processing_date(&args.date)?;
        validate_directory_exists(&args.dst_dir)?;

        if args.max_procs == 0 {
            bail!("worker 數量必須至少為 1");
        }
        if args.preview && args.suffix.eq_ignore_ascii_case(&settings.preview_suffix) {
            bail!(
                "預覽圖副檔名 ({}) 不可與來源副檔名 ({}) 相同",
                settings.preview_suffix,
                args.suffix
            );
        }

        Ok(Self {
            source_directory: args.src_dir.clone(),
            destination_directory: args.dst_dir.clone(),
            processing_date,
            current_year: Local::now().year(),
            film_type: args.film_type,
            batch_number: args.batch,
            file_suffix: args.suffix.clone(),
            worker_count: args.max_procs,
            description: args.description.clone(),
            comment: args.comment.clone(),
            photographer: args
                .photographer
                .clone()
                .unwrap_or(settings.photographer),
            generate_preview: args.preview,
            show_progress: args.progress,
            preview_suffix: settings.preview_suffix,
            tools: settings.tools,
        })
    }
}
