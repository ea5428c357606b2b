use crate::config::RunConfig;
use crate::tools::{PartialOutput, ScopedChild};
use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// exiv2 擷取 metadata 時使用的副檔名
const SIDECAR_SUFFIX: &str = "exv";

/// 預覽圖產生器
///
/// 四個步驟：
/// A. RAW 解碼程序的 stdout 直接接到轉檔程序的 stdin
/// B. 等待兩個程序結束
/// C. 將原檔的 metadata 擷取為 sidecar
/// D. 將 sidecar 注入預覽圖
///
/// 任何步驟失敗都會刪除未完成的預覽圖，sidecar 一律刪除。
pub struct PreviewGenerator<'a> {
    config: &'a RunConfig,
}

impl<'a> PreviewGenerator<'a> {
    #[must_use]
    pub const fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn preview_path(&self, stamped: &Path) -> PathBuf {
        stamped.with_extension(&self.config.preview_suffix)
    }

    /// 預覽圖與原檔共用主幹，因此 sidecar 也是同一個路徑
    #[must_use]
    pub fn sidecar_path(stamped: &Path) -> PathBuf {
        stamped.with_extension(SIDECAR_SUFFIX)
    }

    pub fn generate(&self, stamped: &Path) -> Result<PathBuf> {
        let preview_path = self.preview_path(stamped);
        if preview_path == stamped {
            bail!("預覽圖會覆蓋目的檔: {}", stamped.display());
        }
        let preview = PartialOutput::new(&preview_path);

        self.decode_into(stamped, preview.path())?;
        self.copy_metadata(stamped, preview.path())?;

        Ok(preview.keep())
    }

    fn decode_into(&self, source: &Path, preview: &Path) -> Result<()> {
        let tools = &self.config.tools;

        let convert_child = Command::new(&tools.converter)
            .arg("-")
            .arg(preview)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("無法執行 {}", tools.converter.display()))?;
        let mut convert = ScopedChild::new("convert", convert_child);
        let pipe = convert
            .take_stdin()
            .context("無法取得轉檔程序的 stdin")?;
        // 轉檔程序的 stderr 需持續讀取，否則寫滿後會連帶卡住解碼程序
        let convert_stderr = convert.take_stderr().map(|mut stderr| {
            thread::spawn(move || {
                let mut buffer = Vec::new();
                let _ = stderr.read_to_end(&mut buffer);
                buffer
            })
        });

        let decode_child = {
            let mut decode = Command::new(&tools.raw_decoder);
            decode
                .args(["-c", "-w"])
                .arg(source)
                .stdout(Stdio::from(pipe))
                .stderr(Stdio::piped());
            // decode 在此區塊結束時 drop，父程序持有的寫入端隨之關閉
            decode
                .spawn()
                .with_context(|| format!("無法執行 {}", tools.raw_decoder.display()))?
        };

        let decoded = ScopedChild::new("raw decoder", decode_child)
            .wait_with_output()
            .with_context(|| format!("無法等待 {}", tools.raw_decoder.display()))?;
        log_diagnostics("raw decoder", source, &decoded.stderr);
        if !decoded.status.success() {
            bail!("RAW 解碼失敗 ({}): {}", decoded.status, source.display());
        }

        let converted = convert
            .wait_with_output()
            .with_context(|| format!("無法等待 {}", tools.converter.display()))?;
        let convert_diagnostics = convert_stderr
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();
        log_diagnostics("convert", preview, &convert_diagnostics);
        if !converted.status.success() {
            bail!("預覽圖轉檔失敗 ({}): {}", converted.status, preview.display());
        }

        debug!("預覽圖已產生: {}", preview.display());
        Ok(())
    }

    fn copy_metadata(&self, stamped: &Path, preview: &Path) -> Result<()> {
        let _sidecar = PartialOutput::new(&Self::sidecar_path(stamped));

        self.run_exiv2(&["-f", "-ea"], stamped)
            .context("metadata 擷取失敗")?;
        self.run_exiv2(&["-ia"], preview)
            .context("metadata 注入失敗")?;

        Ok(())
    }

    fn run_exiv2(&self, mode: &[&str], target: &Path) -> Result<()> {
        let exiv2 = &self.config.tools.exiv2;
        let output = Command::new(exiv2)
            .args(mode)
            .arg(target)
            .output()
            .with_context(|| format!("無法執行 {}", exiv2.display()))?;
        log_diagnostics("exiv2", target, &output.stderr);

        if !output.status.success() {
            bail!(
                "exiv2 {} 失敗 ({}): {}",
                mode.join(" "),
                output.status,
                target.display()
            );
        }
        Ok(())
    }
}

fn log_diagnostics(tool: &str, target: &Path, stderr: &[u8]) {
    let stderr = String::from_utf8_lossy(stderr);
    if !stderr.trim().is_empty() {
        warn!("{tool} [{}]: {}", target.display(), stderr.trim());
    }
}
