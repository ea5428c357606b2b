use super::types::FilmType;
use crate::tools::default_processing_date;
use clap::Parser;
use clap::builder::TypedValueParser;
use std::path::PathBuf;

fn default_worker_count() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// 將掃描檔複製到目的資料夾、以規則命名並寫入 EXIF 資訊
#[derive(Parser, Debug, Clone)]
#[command(name = "scan_importer", author, version, about, long_about = None)]
pub struct Args {
    /// Source directory
    #[arg(short = 'i', long = "src-dir", default_value = ".")]
    pub src_dir: PathBuf,

    /// Destination directory
    #[arg(short = 'o', long = "dst-dir", default_value = ".")]
    pub dst_dir: PathBuf,

    /// Original processing date as 'Mon-YYYY' or 'Mon D, YYYY'
    #[arg(short = 'D', long = "date", default_value_t = default_processing_date())]
    pub date: String,

    /// Film type: TR = slide, CN = color neg, BW = B/W neg
    #[arg(short = 'T', long = "film-type", value_enum, default_value_t = FilmType::Tr)]
    pub film_type: FilmType,

    /// Processing box or batch number
    #[arg(short = 'b', long = "batch", default_value_t = 1)]
    pub batch: u32,

    /// File name suffix to match
    #[arg(short = 'S', long = "suffix", default_value = "dng")]
    pub suffix: String,

    /// Number of concurrent jobs
    #[arg(
        short = 'M',
        long = "max-procs",
        default_value_t = default_worker_count(),
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub max_procs: usize,

    /// Image description
    #[arg(short = 'd', long = "description", default_value = "")]
    pub description: String,

    /// User comments
    #[arg(short = 'c', long = "comment", default_value = "")]
    pub comment: String,

    /// Name of original photographer/artist (defaults to the settings file value)
    #[arg(short = 'p', long = "photographer")]
    pub photographer: Option<String>,

    /// Generate a preview image next to each copied file
    #[arg(short = 'P', long = "preview")]
    pub preview: bool,

    /// Show a progress bar
    #[arg(long = "progress")]
    pub progress: bool,

    /// Settings file with defaults and external tool paths
    #[arg(long = "settings")]
    pub settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Slide numbers, each a single number or an inclusive 'start-end' range
    #[arg(value_name = "SLIDES")]
    pub slides: Vec<String>,
}
