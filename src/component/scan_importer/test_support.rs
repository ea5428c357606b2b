use crate::config::{ExternalTools, FilmType, RunConfig};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn sample_config() -> RunConfig {
    RunConfig {
        source_directory: PathBuf::from("in"),
        destination_directory: PathBuf::from("out"),
        processing_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        current_year: 2026,
        film_type: FilmType::Tr,
        batch_number: 2,
        file_suffix: "dng".to_string(),
        worker_count: 1,
        description: String::new(),
        comment: String::new(),
        photographer: "Jo Doe".to_string(),
        generate_preview: false,
        show_progress: false,
        preview_suffix: "jpg".to_string(),
        tools: ExternalTools::default(),
    }
}

/// 在 `dir` 建立可執行的 shell 腳本，代替外部工具
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
