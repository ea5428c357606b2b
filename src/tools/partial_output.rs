use log::{debug, error};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 未完成輸出檔案的守衛
///
/// 在 drop 時刪除檔案，除非先呼叫 [`PartialOutput::keep`]。
/// 錯誤路徑上保證清除，成功路徑上不做任何事。
#[derive(Debug)]
pub struct PartialOutput {
    path: PathBuf,
    armed: bool,
}

impl PartialOutput {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            armed: true,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保留檔案並回傳其路徑
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("已刪除未完成的輸出檔案: {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => error!("無法刪除未完成的輸出檔案 {}: {}", self.path.display(), e),
        }
    }
}
