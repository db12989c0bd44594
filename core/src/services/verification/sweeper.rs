//! Periodic sweep of expired verification codes
//!
//! A single repeating timer started once at process boot. Sweep errors
//! are logged and swallowed so the background task never dies; the
//! returned handle offers an explicit stop for clean shutdown and tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::VerificationCodeRepository;
use tb_shared::config::SweeperConfig;

/// Background sweeper for expired verification codes
pub struct CodeSweeper<V: VerificationCodeRepository + 'static> {
    repository: Arc<V>,
    config: SweeperConfig,
}

impl<V: VerificationCodeRepository> CodeSweeper<V> {
    /// Create a new sweeper
    pub fn new(repository: Arc<V>, config: SweeperConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// Number of expired rows deleted
    pub async fn run_sweep(&self) -> DomainResult<u64> {
        let deleted = self.repository.delete_expired(Utc::now()).await?;
        info!(deleted, event = "sweep_completed", "Verification code sweep completed");
        Ok(deleted)
    }

    /// Start the sweeper as a background task
    ///
    /// The task runs one sweep immediately, then once per configured
    /// interval, for the lifetime of the process or until the returned
    /// handle is stopped. Dropping the handle also stops the task.
    pub fn spawn(self: Arc<Self>) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        if !self.config.enabled {
            warn!("Verification code sweeper is disabled");
            let handle = tokio::spawn(async {});
            return SweeperHandle {
                shutdown: shutdown_tx,
                handle,
            };
        }

        let interval = Duration::from_secs(self.config.interval_seconds);

        let handle = tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Verification code sweeper started"
            );

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Never fail the task: errors are logged and the
                        // next tick tries again
                        if let Err(e) = self.run_sweep().await {
                            error!(error = %e, event = "sweep_failed", "Verification code sweep failed");
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            info!("Verification code sweeper stopped");
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            handle,
        }
    }
}

/// Handle to a running sweeper task
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for the task to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::verification_code::VerificationCode;
    use crate::repositories::MockVerificationCodeRepository;

    fn config(interval_seconds: u64) -> SweeperConfig {
        SweeperConfig {
            interval_seconds,
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_run_sweep_deletes_expired_rows() {
        let repo = Arc::new(MockVerificationCodeRepository::new());
        repo.insert(VerificationCode::new_with_expiration("a@x.com", -1))
            .await
            .unwrap();
        repo.insert(VerificationCode::new("b@x.com")).await.unwrap();

        let sweeper = CodeSweeper::new(repo.clone(), config(3600));
        assert_eq!(sweeper.run_sweep().await.unwrap(), 1);
        assert_eq!(sweeper.run_sweep().await.unwrap(), 0);
        assert_eq!(repo.count_for("b@x.com").await, 1);
    }

    #[tokio::test]
    async fn test_spawn_sweeps_on_boot_and_stops() {
        let repo = Arc::new(MockVerificationCodeRepository::new());
        repo.insert(VerificationCode::new_with_expiration("a@x.com", -1))
            .await
            .unwrap();

        let sweeper = Arc::new(CodeSweeper::new(repo.clone(), config(3600)));
        let handle = sweeper.spawn();

        // The first tick fires immediately; give the task a moment
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(repo.count_for("a@x.com").await, 0);

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_disabled_sweeper_spawns_inert_task() {
        let repo = Arc::new(MockVerificationCodeRepository::new());
        repo.insert(VerificationCode::new_with_expiration("a@x.com", -1))
            .await
            .unwrap();

        let sweeper = Arc::new(CodeSweeper::new(
            repo.clone(),
            SweeperConfig {
                interval_seconds: 1,
                enabled: false,
            },
        ));
        let handle = sweeper.spawn();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Nothing swept while disabled
        assert_eq!(repo.count_for("a@x.com").await, 1);
        handle.stop().await;
    }
}
