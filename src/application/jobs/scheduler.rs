//! LifecycleScheduler - Background service running the lifecycle jobs.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval_secs` | 3600 | Seconds between passes |
//! | `activation_reminder_days` | 3 | Pending days before the reminder |
//! | `waitlist_offer_hours` | 12 | Hours to claim an offered spot |
//!
//! ## Graceful Shutdown
//!
//! The scheduler listens on a watch channel and runs one final pass before
//! stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use super::{
    ActivationReminderJob, FreezeExpirationJob, JobReport, LifecycleJob, WaitlistExpirationJob,
};
use crate::config::LifecycleConfig;
use crate::domain::foundation::Timestamp;
use crate::ports::{MemberNotifier, MembershipRepository, WaitlistRepository};

/// Results of one scheduler pass over every job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Per-job reports, in run order.
    pub jobs: Vec<(&'static str, JobReport)>,
    /// Jobs that could not run at all.
    pub errored: Vec<&'static str>,
}

impl PassReport {
    /// Sum of every job's report.
    pub fn total(&self) -> JobReport {
        let mut total = JobReport::default();
        for (_, report) in &self.jobs {
            total += *report;
        }
        total
    }

    /// Report of the job called `name`, if it ran.
    pub fn job(&self, name: &str) -> Option<JobReport> {
        self.jobs
            .iter()
            .find(|(job, _)| *job == name)
            .map(|(_, report)| *report)
    }
}

/// Runs lifecycle jobs on a fixed interval.
pub struct LifecycleScheduler {
    jobs: Vec<Arc<dyn LifecycleJob>>,
    poll_interval: Duration,
}

impl LifecycleScheduler {
    /// Create a scheduler with no jobs.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            jobs: Vec::new(),
            poll_interval,
        }
    }

    /// Add a job; jobs run in the order they were added.
    pub fn with_job(mut self, job: Arc<dyn LifecycleJob>) -> Self {
        self.jobs.push(job);
        self
    }

    /// Scheduler with the reminder, freeze and waitlist jobs wired from `config`.
    pub fn standard(
        memberships: Arc<dyn MembershipRepository>,
        waitlist: Arc<dyn WaitlistRepository>,
        notifier: Arc<dyn MemberNotifier>,
        config: &LifecycleConfig,
    ) -> Self {
        Self::new(config.poll_interval())
            .with_job(Arc::new(ActivationReminderJob::new(
                memberships.clone(),
                notifier.clone(),
                config.activation_reminder_days,
            )))
            .with_job(Arc::new(FreezeExpirationJob::new(memberships, notifier.clone())))
            .with_job(Arc::new(WaitlistExpirationJob::new(
                waitlist,
                notifier,
                config.offer_window(),
            )))
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Names of the registered jobs, in run order.
    pub fn job_names(&self) -> Vec<&'static str> {
        self.jobs.iter().map(|job| job.name()).collect()
    }

    /// Run passes until the shutdown signal is received.
    ///
    /// A dropped sender counts as a shutdown signal.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            jobs = self.jobs.len(),
            "Lifecycle scheduler started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.run_once(Timestamp::now()).await;
                        tracing::info!("Lifecycle scheduler stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.run_once(Timestamp::now()).await;
                }
            }
        }
    }

    /// Run every job once at `now`.
    ///
    /// A failing job is logged and the remaining jobs still run.
    pub async fn run_once(&self, now: Timestamp) -> PassReport {
        let mut pass = PassReport::default();

        for job in &self.jobs {
            match job.run(now).await {
                Ok(report) => {
                    if report.is_empty() {
                        tracing::debug!(job = job.name(), "Nothing due");
                    } else {
                        tracing::info!(
                            job = job.name(),
                            processed = report.processed,
                            failed = report.failed,
                            "Lifecycle job finished"
                        );
                    }
                    pass.jobs.push((job.name(), report));
                }
                Err(e) => {
                    tracing::error!(job = job.name(), error = %e, "Lifecycle job failed");
                    pass.errored.push(job.name());
                }
            }
        }

        pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryMembershipRepository, InMemoryWaitlistRepository, RecordingNotifier};
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Job that counts its runs
    struct CountingJob {
        runs: AtomicUsize,
    }

    impl CountingJob {
        fn new() -> Self {
            Self {
                runs: AtomicUsize::new(0),
            }
        }

        fn runs(&self) -> usize {
            self.runs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LifecycleJob for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn run(&self, _now: Timestamp) -> Result<JobReport, DomainError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(JobReport {
                processed: 1,
                failed: 0,
            })
        }
    }

    /// Job whose listing always fails
    struct BrokenJob;

    #[async_trait]
    impl LifecycleJob for BrokenJob {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn run(&self, _now: Timestamp) -> Result<JobReport, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "Simulated listing failure"))
        }
    }

    #[tokio::test]
    async fn failing_job_does_not_stop_the_pass() {
        let counting = Arc::new(CountingJob::new());
        let scheduler = LifecycleScheduler::new(Duration::from_secs(60))
            .with_job(Arc::new(BrokenJob))
            .with_job(counting.clone());

        let pass = scheduler.run_once(Timestamp::now()).await;

        assert_eq!(pass.errored, vec!["broken"]);
        assert_eq!(pass.job("counting"), Some(JobReport { processed: 1, failed: 0 }));
        assert_eq!(counting.runs(), 1);
    }

    #[tokio::test]
    async fn standard_wires_all_jobs_from_config() {
        let config = LifecycleConfig {
            poll_interval_secs: 120,
            ..Default::default()
        };
        let scheduler = LifecycleScheduler::standard(
            Arc::new(InMemoryMembershipRepository::new()),
            Arc::new(InMemoryWaitlistRepository::new()),
            Arc::new(RecordingNotifier::new()),
            &config,
        );

        assert_eq!(scheduler.poll_interval(), Duration::from_secs(120));
        assert_eq!(
            scheduler.job_names(),
            vec!["activation_reminders", "freeze_expirations", "waitlist_expirations"]
        );
        let pass = scheduler.run_once(Timestamp::now()).await;
        assert_eq!(pass.total(), JobReport::default());
        assert!(pass.errored.is_empty());
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal_after_final_pass() {
        let counting = Arc::new(CountingJob::new());
        let scheduler = LifecycleScheduler::new(Duration::from_millis(10)).with_job(counting.clone());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        let before_shutdown = counting.runs();
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(before_shutdown >= 1);
        assert!(counting.runs() > before_shutdown);
    }

    #[tokio::test]
    async fn run_stops_when_sender_dropped() {
        let counting = Arc::new(CountingJob::new());
        let scheduler = LifecycleScheduler::new(Duration::from_secs(3600)).with_job(counting.clone());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });
        drop(shutdown_tx);

        handle.await.unwrap();
        assert!(counting.runs() >= 1);
    }
}
