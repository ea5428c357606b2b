use log::warn;
use std::io;
use std::process::{Child, ChildStderr, ChildStdin, Output};

/// 子程序的生命週期守衛
///
/// 若在正常等待前被 drop，會終止並回收子程序，避免殭屍程序。
pub struct ScopedChild {
    name: &'static str,
    child: Option<Child>,
}

impl ScopedChild {
    #[must_use]
    pub fn new(name: &'static str, child: Child) -> Self {
        Self {
            name,
            child: Some(child),
        }
    }

    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.child.as_mut().and_then(|c| c.stdin.take())
    }

    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.as_mut().and_then(|c| c.stderr.take())
    }

    /// 等待子程序結束並收集剩餘的輸出
    pub fn wait_with_output(mut self) -> io::Result<Output> {
        match self.child.take() {
            Some(child) => child.wait_with_output(),
            None => Err(io::Error::other("child process already reaped")),
        }
    }
}

impl Drop for ScopedChild {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            warn!("終止程序 {} [{}]", self.name, child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
