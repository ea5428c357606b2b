#![allow(dead_code)]

use chrono::NaiveDate;
use scan_importer::config::{ExternalTools, FilmType, RunConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// 建立可執行的 shell 腳本，代替外部工具
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// 每次寫入時在目的檔旁留下一份指令檔副本
pub const RECORDING_EXIV2: &str = r#"
case "$1" in
  -m) cp "$2" "$3.applied" ;;
  -f) touch "${3%.*}.exv" ;;
  -ia) test -f "${2%.*}.exv" || exit 3 ;;
esac
exit 0"#;

pub fn fake_tools(dir: &Path, exiv2: &str) -> ExternalTools {
    ExternalTools {
        exiv2: write_script(dir, "fake-exiv2", exiv2),
        raw_decoder: write_script(dir, "fake-dcraw", r#"cat "$3""#),
        converter: write_script(dir, "fake-convert", r#"exec cat > "$2""#),
    }
}

pub fn config(src: &Path, dst: &Path, tools: ExternalTools, worker_count: usize) -> RunConfig {
    RunConfig {
        source_directory: src.to_path_buf(),
        destination_directory: dst.to_path_buf(),
        processing_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        current_year: 2026,
        film_type: FilmType::Tr,
        batch_number: 2,
        file_suffix: "dng".to_string(),
        worker_count,
        description: String::new(),
        comment: String::new(),
        photographer: "Test Photographer".to_string(),
        generate_preview: false,
        show_progress: false,
        preview_suffix: "jpg".to_string(),
        tools,
    }
}

pub fn write_sources(src: &Path, names: &[&str]) {
    for name in names {
        fs::write(src.join(name), format!("pixels of {name}")).unwrap();
    }
}

pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(std::result::Result::ok)
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
