//! Background execution of generation jobs on a worker thread pool.
//!
//! Jobs are queued on a bounded channel and picked up by worker threads,
//! each of which builds a fresh generator per job and drives it through the
//! shared [`GeneratorHarness`]. Outcomes come back on a second bounded
//! channel and are drained by the owning thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::generator::{GeneratorHarness, JobError, JobReport, TerrainGenerator};
use crate::job::Job;

/// Builds one generator instance per job. The runner inspects nothing about
/// the job itself, so the factory is the place to dispatch on job parameters
/// (e.g. a `"generator"` name).
pub type GeneratorFactory = Arc<dyn Fn(&Job) -> Box<dyn TerrainGenerator> + Send + Sync>;

/// Terminal result of one background job.
#[derive(Debug)]
pub enum JobOutcome {
    Completed(JobReport),
    Failed(JobError),
}

impl JobOutcome {
    pub fn report(&self) -> Option<&JobReport> {
        match self {
            JobOutcome::Completed(report) => Some(report),
            JobOutcome::Failed(_) => None,
        }
    }
}

/// Runs generation jobs across a thread pool.
///
/// Workers live as long as the runner; dropping it closes the job channel
/// and lets the workers drain and exit.
pub struct JobRunner {
    job_sender: Sender<Job>,
    outcome_receiver: Receiver<JobOutcome>,
    in_flight: Arc<AtomicU64>,
}

impl JobRunner {
    /// Spawns `thread_count` workers over the harness and factory.
    ///
    /// `queue_capacity` bounds pending jobs; excess submissions are
    /// rejected. `outcome_capacity` bounds finished-but-undrained outcomes.
    pub fn new(
        harness: Arc<GeneratorHarness>,
        factory: GeneratorFactory,
        thread_count: usize,
        queue_capacity: usize,
        outcome_capacity: usize,
    ) -> Self {
        let (job_sender, job_receiver) = bounded::<Job>(queue_capacity);
        let (outcome_sender, outcome_receiver) = bounded::<JobOutcome>(outcome_capacity);
        let in_flight = Arc::new(AtomicU64::new(0));

        for _ in 0..thread_count.max(1) {
            let receiver = job_receiver.clone();
            let sender = outcome_sender.clone();
            let harness = Arc::clone(&harness);
            let factory = Arc::clone(&factory);
            let in_flight = Arc::clone(&in_flight);

            std::thread::Builder::new()
                .name("terrain-gen-worker".into())
                .spawn(move || {
                    while let Ok(job) = receiver.recv() {
                        let mut generator = factory(&job);
                        let outcome = match harness.run_job(generator.as_mut(), &job) {
                            Ok(report) => JobOutcome::Completed(report),
                            Err(error) => JobOutcome::Failed(error),
                        };
                        // If the receiving side is gone the outcome is lost,
                        // but the chunk saves already happened.
                        let _ = sender.send(outcome);
                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("failed to spawn terrain generation worker thread");
        }

        Self {
            job_sender,
            outcome_receiver,
            in_flight,
        }
    }

    /// Sizes the pool from the CPU count, leaving headroom for the caller.
    pub fn with_defaults(harness: Arc<GeneratorHarness>, factory: GeneratorFactory) -> Self {
        let cpus = num_cpus::get().max(2);
        let threads = (cpus - 1).max(1);
        Self::new(harness, factory, threads, 64, 128)
    }

    /// Queues a job for background execution.
    ///
    /// Returns `Err(job)` if the queue is full, handing the job back to the
    /// caller for retry or shedding.
    #[allow(clippy::result_large_err)]
    pub fn submit(&self, job: Job) -> Result<(), Job> {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        self.job_sender.try_send(job).map_err(|e| {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            e.into_inner()
        })
    }

    /// Drains every finished outcome without blocking.
    pub fn drain_outcomes(&self) -> Vec<JobOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.outcome_receiver.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Jobs queued or executing, not yet drained by the worker.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
