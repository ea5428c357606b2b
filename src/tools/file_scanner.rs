use super::path_validator::validate_directory_exists;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 掃描單一目錄（不遞迴）中副檔名符合 `suffix` 的一般檔案，依完整路徑字典序排序
///
/// 副檔名比對不分大小寫
pub fn scan_matching_files(directory: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    validate_directory_exists(directory)?;

    let wanted = format!(".{}", suffix.to_lowercase());
    let mut files = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.with_context(|| format!("無法讀取資料夾: {}", directory.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(&wanted) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
