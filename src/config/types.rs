use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PHOTOGRAPHER: &str = "Unknown";
pub const DEFAULT_PREVIEW_SUFFIX: &str = "jpg";
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// 底片類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FilmType {
    /// 正片（幻燈片）
    #[default]
    #[value(name = "TR")]
    Tr,
    /// 彩色負片
    #[value(name = "CN")]
    Cn,
    /// 黑白負片
    #[value(name = "BW")]
    Bw,
}

impl FilmType {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tr => "TR",
            Self::Cn => "CN",
            Self::Bw => "BW",
        }
    }
}

impl fmt::Display for FilmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 外部工具指令
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExternalTools {
    /// 寫入／擷取／注入 metadata
    pub exiv2: PathBuf,
    /// RAW 解碼，輸出到 stdout
    pub raw_decoder: PathBuf,
    /// 從 stdin 讀取影像並輸出預覽檔
    pub converter: PathBuf,
}

impl Default for ExternalTools {
    fn default() -> Self {
        Self {
            exiv2: PathBuf::from("exiv2"),
            raw_decoder: PathBuf::from("dcraw"),
            converter: PathBuf::from("convert"),
        }
    }
}

/// 使用者設定檔（settings.json）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub photographer: String,
    pub preview_suffix: String,
    pub tools: ExternalTools,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            photographer: DEFAULT_PHOTOGRAPHER.to_string(),
            preview_suffix: DEFAULT_PREVIEW_SUFFIX.to_string(),
            tools: ExternalTools::default(),
        }
    }
}

/// 一次執行的完整設定，建立後不可變更，以 `Arc` 分享給所有 worker
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_directory: PathBuf,
    pub destination_directory: PathBuf,
    pub processing_date: NaiveDate,
    pub current_year: i32,
    pub film_type: FilmType,
    pub batch_number: u32,
    pub file_suffix: String,
    pub worker_count: usize,
    pub description: String,
    pub comment: String,
    pub photographer: String,
    pub generate_preview: bool,
    pub show_progress: bool,
    pub preview_suffix: String,
    pub tools: ExternalTools,
}
