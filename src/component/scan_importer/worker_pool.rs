use super::job::Job;
use super::pipeline::{JobFailure, JobRunner};
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// worker 結束時回報的結果
#[derive(Debug)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub jobs_dequeued: usize,
    pub jobs_completed: usize,
    /// 第一個（也是唯一一個）失敗；發生後 worker 不再取新工作
    pub failure: Option<JobFailure>,
}

impl WorkerReport {
    const fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            jobs_dequeued: 0,
            jobs_completed: 0,
            failure: None,
        }
    }
}

/// 固定數量的 worker 共用一個有界 FIFO 佇列
///
/// 所有 worker 在第一個工作排入前就已啟動。佇列關閉且清空後，
/// 每個 worker 透過完成通道回報一次。
pub struct WorkerPool {
    sender: Option<SyncSender<Job>>,
    reports: Receiver<WorkerReport>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// 啟動 `worker_count` 個 worker，佇列容量等於 worker 數
    pub fn start(worker_count: usize, runner: Arc<dyn JobRunner>) -> Result<Self> {
        let (sender, receiver) = mpsc::sync_channel::<Job>(worker_count);
        let receiver = Arc::new(Mutex::new(receiver));
        let (report_sender, reports) = mpsc::channel::<WorkerReport>();

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let receiver = Arc::clone(&receiver);
            let runner = Arc::clone(&runner);
            let report_sender = report_sender.clone();

            let handle = thread::Builder::new()
                .name(format!("worker-{worker_id}"))
                .spawn(move || {
                    let report = work(worker_id, &receiver, runner.as_ref());
                    let _ = report_sender.send(report);
                })
                .with_context(|| format!("無法啟動 worker {worker_id}"))?;
            handles.push(handle);
        }

        debug!("已啟動 {worker_count} 個 worker");

        Ok(Self {
            sender: Some(sender),
            reports,
            handles,
        })
    }

    /// 排入一個工作；佇列已滿時阻塞
    ///
    /// 所有 worker 都已停止時佇列斷開，工作原封退回。
    pub fn submit(&self, job: Job) -> Result<(), Job> {
        match &self.sender {
            Some(sender) => sender.send(job).map_err(|e| e.0),
            None => Err(job),
        }
    }

    /// 關閉佇列，等待每個 worker 的完成回報並回收執行緒
    pub fn join(mut self) -> Vec<WorkerReport> {
        drop(self.sender.take());

        let expected = self.handles.len();
        let mut reports = Vec::with_capacity(expected);
        while reports.len() < expected {
            match self.reports.recv() {
                Ok(report) => reports.push(report),
                // 所有回報端都已關閉：有 worker 異常終止
                Err(_) => break,
            }
        }

        for handle in self.handles.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                error!("{name} 異常終止，未送出完成回報");
            }
        }

        reports.sort_by_key(|r| r.worker_id);
        reports
    }
}

fn work(worker_id: usize, queue: &Mutex<Receiver<Job>>, runner: &dyn JobRunner) -> WorkerReport {
    let mut report = WorkerReport::new(worker_id);

    loop {
        let next = match queue.lock() {
            Ok(receiver) => receiver.recv(),
            Err(_) => {
                error!("worker {worker_id}: 佇列鎖已毀損，停止");
                break;
            }
        };
        // 佇列已關閉且清空
        let Ok(job) = next else {
            break;
        };
        report.jobs_dequeued += 1;

        match runner.run(&job) {
            Ok(_) => report.jobs_completed += 1,
            Err(failure) => {
                error!("worker {worker_id} 停止接收新工作: {failure}");
                report.failure = Some(failure);
                break;
            }
        }
    }

    info!(
        "worker {worker_id} 結束: 取得 {}，完成 {}",
        report.jobs_dequeued, report.jobs_completed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::scan_importer::pipeline::{JobOutput, PipelineStage};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 指定 slide 編號時回報失敗，其餘成功
    struct FakeRunner {
        fail_slide: Option<u32>,
        runs: AtomicUsize,
    }

    impl FakeRunner {
        fn new(fail_slide: Option<u32>) -> Arc<Self> {
            Arc::new(Self {
                fail_slide,
                runs: AtomicUsize::new(0),
            })
        }
    }

    impl JobRunner for FakeRunner {
        fn run(&self, job: &Job) -> Result<JobOutput, JobFailure> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if Some(job.slide_id) == self.fail_slide {
                return Err(JobFailure {
                    job: job.clone(),
                    stage: PipelineStage::Stamp,
                    error: anyhow::anyhow!("exiv2 exited with 1"),
                });
            }
            Ok(JobOutput {
                destination: job.destination_stem.clone(),
                preview: None,
            })
        }
    }

    fn job(slide_id: u32) -> Job {
        Job {
            source_path: PathBuf::from(format!("{slide_id}.dng")),
            destination_stem: PathBuf::from(format!("out/{slide_id}")),
            slide_id,
        }
    }

    #[test]
    fn test_all_jobs_processed() {
        let runner = FakeRunner::new(None);
        let pool = WorkerPool::start(4, runner.clone()).unwrap();
        for slide in 1..=20 {
            pool.submit(job(slide)).unwrap();
        }
        let reports = pool.join();

        assert_eq!(reports.len(), 4);
        assert_eq!(reports.iter().map(|r| r.jobs_completed).sum::<usize>(), 20);
        assert!(reports.iter().all(|r| r.failure.is_none()));
        assert_eq!(runner.runs.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn test_failed_worker_stops_and_peers_continue() {
        let runner = FakeRunner::new(Some(2));
        let pool = WorkerPool::start(3, runner).unwrap();
        for slide in 1..=3 {
            pool.submit(job(slide)).unwrap();
        }
        let reports = pool.join();

        let failed: Vec<_> = reports.iter().filter(|r| r.failure.is_some()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].failure.as_ref().unwrap().job.slide_id, 2);
        assert_eq!(reports.iter().map(|r| r.jobs_dequeued).sum::<usize>(), 3);
        assert_eq!(reports.iter().map(|r| r.jobs_completed).sum::<usize>(), 2);
    }

    #[test]
    fn test_submit_fails_once_every_worker_stopped() {
        let runner = FakeRunner::new(Some(1));
        let pool = WorkerPool::start(1, runner).unwrap();

        pool.submit(job(1)).unwrap();
        // 唯一的 worker 失敗後佇列斷開，後續排入最終會被退回
        let mut rejected = None;
        for slide in 2..=10 {
            if let Err(job) = pool.submit(job(slide)) {
                rejected = Some(job);
                break;
            }
        }
        let reports = pool.join();

        assert!(rejected.is_some());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].jobs_dequeued, 1);
        assert_eq!(reports[0].jobs_completed, 0);
    }

    #[test]
    fn test_empty_queue_still_reports_every_worker() {
        let pool = WorkerPool::start(5, FakeRunner::new(None)).unwrap();
        let reports = pool.join();

        assert_eq!(reports.len(), 5);
        assert_eq!(
            reports.iter().map(|r| r.worker_id).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
    }
}
