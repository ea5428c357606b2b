use crate::config::{FilmType, RunConfig};
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

/// 單一處理單位：來源檔案、目的檔名主幹（不含副檔名）與幻燈片編號
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source_path: PathBuf,
    pub destination_stem: PathBuf,
    pub slide_id: u32,
}

impl Job {
    /// 主幹加上副檔名，例如 `Scn-TR20240101-02-10.dng`
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.destination_stem.clone().into_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}

/// 目的檔命名規則 `Scn-<film><yyyy><mm><dd>-<batch>-<slide>`
#[derive(Debug, Clone)]
pub struct DestinationNaming {
    directory: PathBuf,
    prefix: String,
}

impl DestinationNaming {
    #[must_use]
    pub fn new(directory: &Path, film_type: FilmType, date: NaiveDate, batch_number: u32) -> Self {
        let prefix = format!(
            "Scn-{}{}{:02}{:02}-{:02}-",
            film_type,
            date.year(),
            date.month(),
            date.day(),
            batch_number
        );
        Self {
            directory: directory.to_path_buf(),
            prefix,
        }
    }

    #[must_use]
    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(
            &config.destination_directory,
            config.film_type,
            config.processing_date,
            config.batch_number,
        )
    }

    #[must_use]
    pub fn stem(&self, slide_id: u32) -> PathBuf {
        self.directory
            .join(format!("{}{:02}", self.prefix, slide_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_pads_slide_and_batch() {
        let naming = DestinationNaming::new(
            Path::new("/out"),
            FilmType::Tr,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            2,
        );
        assert_eq!(naming.stem(7), PathBuf::from("/out/Scn-TR20240101-02-07"));
        assert_eq!(naming.stem(123), PathBuf::from("/out/Scn-TR20240101-02-123"));
    }

    #[test]
    fn test_with_suffix_keeps_stem() {
        let job = Job {
            source_path: PathBuf::from("a.dng"),
            destination_stem: PathBuf::from("/out/Scn-CN19980307-11-05"),
            slide_id: 5,
        };
        assert_eq!(
            job.with_suffix("dng"),
            PathBuf::from("/out/Scn-CN19980307-11-05.dng")
        );
        assert_eq!(
            job.with_suffix("jpg"),
            PathBuf::from("/out/Scn-CN19980307-11-05.jpg")
        );
    }
}
