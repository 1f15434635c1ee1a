// THEORY:
// Months are independent: no chart reads another chart, and no day column reads
// another column. The `ParallelPipeline` exploits the first of those facts and runs
// many months at once while keeping each month's extraction a plain sequential call.
//
// Shape:
// - A dispatcher task receives `MonthTask`s and hands them round-robin to a fixed
//   set of workers (one per CPU by default).
// - Each worker pushes the CPU-bound scan onto tokio's blocking pool and replies on
//   the task's oneshot channel.
// - Callers get their results back in submission order. One month failing (a bad
//   image size, an invalid month) never cancels the others.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core_modules::chart_image::ChartImage;
use crate::error::{ExtractionError, Result};
use crate::pipeline::{ExtractionPipeline, MonthReport};

/// A decoded chart, shareable across worker threads.
pub type SharedChart = Arc<dyn ChartImage + Send + Sync>;

/// One chart to extract, with the month it shows.
#[derive(Clone)]
pub struct MonthJob {
    pub image: SharedChart,
    pub year: i32,
    pub month: u32,
}

impl MonthJob {
    pub fn new(image: SharedChart, year: i32, month: u32) -> Self {
        Self { image, year, month }
    }
}

struct MonthTask {
    job: MonthJob,
    result_sender: oneshot::Sender<Result<MonthReport>>,
}

/// Fixed-size pool of extraction workers. Must be created inside a tokio runtime.
pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<MonthTask>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(pipeline: ExtractionPipeline, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let pipeline = Arc::new(pipeline);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<MonthTask>();

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<MonthTask>())
            .unzip();

        // Dispatcher: round-robin over the workers. Dropping the pool closes
        // `task_sender`, which ends this loop and, in turn, every worker.
        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % worker_senders.len();
            }
        });

        let mut workers = Vec::with_capacity(worker_count);
        for (worker_id, mut worker_receiver) in worker_receivers.into_iter().enumerate() {
            let pipeline = Arc::clone(&pipeline);

            let worker = tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let MonthJob { image, year, month } = task.job;
                    debug!(worker_id, "extracting {year}-{month:02}");

                    let pipeline = Arc::clone(&pipeline);
                    let outcome = tokio::task::spawn_blocking(move || {
                        pipeline.extract_month_report(image.as_ref(), year, month)
                    })
                    .await
                    .unwrap_or_else(|err| {
                        Err(ExtractionError::Worker(format!(
                            "extraction of {year}-{month:02} did not complete: {err}"
                        )))
                    });

                    let _ = task.result_sender.send(outcome);
                }
            });

            workers.push(worker);
        }

        Self { task_sender, workers }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub async fn process_month(&self, job: MonthJob) -> Result<MonthReport> {
        let (result_sender, result_receiver) = oneshot::channel();

        self.task_sender
            .send(MonthTask { job, result_sender })
            .map_err(|_| ExtractionError::Worker("worker pool is shut down".to_string()))?;

        result_receiver
            .await
            .map_err(|_| ExtractionError::Worker("worker dropped the task".to_string()))?
    }
}

/// Runs many month extractions concurrently over one configuration.
pub struct ParallelPipeline {
    worker_pool: WorkerPool,
}

impl ParallelPipeline {
    /// One worker per logical CPU.
    pub fn new(pipeline: ExtractionPipeline) -> Self {
        Self::with_workers(pipeline, num_cpus::get())
    }

    pub fn with_workers(pipeline: ExtractionPipeline, worker_count: usize) -> Self {
        Self {
            worker_pool: WorkerPool::new(pipeline, worker_count),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_pool.worker_count()
    }

    pub async fn process_month(&self, job: MonthJob) -> Result<MonthReport> {
        self.worker_pool.process_month(job).await
    }

    /// Extracts every job; results line up with `jobs` by index.
    pub async fn extract_all(&self, jobs: Vec<MonthJob>) -> Vec<Result<MonthReport>> {
        join_all(jobs.into_iter().map(|job| self.worker_pool.process_month(job))).await
    }
}
