use crate::config::RunConfig;
use anyhow::{Context, Result, bail};
use chrono::Datelike;
use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// 一筆 exiv2 `set` 指令：標籤、型別、已格式化的值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub tag: &'static str,
    pub tag_type: &'static str,
    pub value: String,
}

impl FieldAssignment {
    const fn new(tag: &'static str, tag_type: &'static str, value: String) -> Self {
        Self {
            tag,
            tag_type,
            value,
        }
    }

    #[must_use]
    pub fn command_line(&self) -> String {
        format!("set {} {} {}", self.tag, self.tag_type, self.value)
    }
}

/// 產生 metadata 指令檔並呼叫 exiv2 寫入目的檔
pub struct MetadataStamper<'a> {
    config: &'a RunConfig,
}

impl<'a> MetadataStamper<'a> {
    #[must_use]
    pub const fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// 依固定順序產生欄位；描述與註解僅在非空時加入
    #[must_use]
    pub fn field_assignments(&self, slide_id: u32) -> Vec<FieldAssignment> {
        let config = self.config;
        let date = config.processing_date;
        let mut fields = vec![
            FieldAssignment::new(
                "Exif.Image.Copyright",
                "Ascii",
                format!(
                    "Copyright {}, {}. All rights reserved",
                    config.current_year, config.photographer
                ),
            ),
            FieldAssignment::new("Exif.Image.Artist", "Ascii", config.photographer.clone()),
            FieldAssignment::new(
                "Exif.Photo.DateTimeOriginal",
                "Ascii",
                format!(
                    "{:04}:{:02}:{:02} 00:00:00",
                    date.year(),
                    date.month(),
                    date.day()
                ),
            ),
            FieldAssignment::new(
                "Exif.Image.DocumentName",
                "Ascii",
                format!(
                    "Processed date {}-{:02}-{:02}, batch {}, slide {}",
                    date.year(),
                    date.month(),
                    date.day(),
                    config.batch_number,
                    slide_id
                ),
            ),
        ];

        if !config.description.is_empty() {
            fields.push(FieldAssignment::new(
                "Exif.Image.ImageDescription",
                "Ascii",
                config.description.clone(),
            ));
        }
        if !config.comment.is_empty() {
            fields.push(FieldAssignment::new(
                "Exif.Photo.UserComment",
                "comment charset=Ascii",
                config.comment.clone(),
            ));
        }

        fields
    }

    /// 寫入 metadata；指令檔在任何結束路徑都會被刪除
    pub fn stamp(&self, target: &Path, slide_id: u32) -> Result<()> {
        let directory = target.parent().unwrap_or_else(|| Path::new("."));
        let mut command_file = tempfile::Builder::new()
            .prefix(".scan_importer-")
            .suffix(".cmds")
            .tempfile_in(directory)
            .with_context(|| format!("無法建立指令檔於: {}", directory.display()))?;

        for field in self.field_assignments(slide_id) {
            writeln!(command_file, "{}", field.command_line())
                .with_context(|| format!("無法寫入指令檔: {}", command_file.path().display()))?;
        }
        command_file.flush()?;
        let command_path = command_file.into_temp_path();

        debug!(
            "執行 {} -m {} {}",
            self.config.tools.exiv2.display(),
            command_path.display(),
            target.display()
        );

        let output = Command::new(&self.config.tools.exiv2)
            .arg("-m")
            .arg(command_path.as_os_str())
            .arg(target)
            .output()
            .with_context(|| format!("無法執行 {}", self.config.tools.exiv2.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            info!("output from exiv2: {}", stdout.trim());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("exiv2 [{}]: {}", target.display(), stderr.trim());
        }

        if !output.status.success() {
            bail!("exiv2 寫入失敗 ({}): {}", output.status, target.display());
        }

        Ok(())
    }
}
