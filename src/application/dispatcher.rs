//! The poll loop.
//!
//! One control stream runs cycles back to back: fetch, normalize each record
//! in feed order, skip ineligible or already-announced tokens, announce the
//! rest, commit confirmed announcements to the ledger, persist, then sleep.
//! Cycles never overlap, and no error escapes a record or a cycle.

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::fetcher::Fetcher;
use super::ledger::Ledger;
use super::message::Announcement;
use super::notifier::Notifier;
use super::policy::DispatchPolicy;
use crate::domain::{normalize, RawRecord};

/// What happened to a single record within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// No usable address; can never be deduplicated.
    NoIdentity,
    /// No chat link; not eligible for announcement.
    NoContact,
    /// Already in the ledger.
    AlreadySeen,
    /// Announced and recorded in the ledger.
    Notified,
    /// Every delivery attempt failed; eligible again next cycle.
    Failed,
}

/// Per-cycle counters, logged once at the end of every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// The fetcher exhausted its attempts; nothing else happened.
    pub fetch_failed: bool,
    pub fetched: usize,
    pub notified: usize,
    pub failed: usize,
    pub skipped_no_identity: usize,
    pub skipped_no_contact: usize,
    pub skipped_seen: usize,
}

impl CycleSummary {
    fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::NoIdentity => self.skipped_no_identity += 1,
            RecordOutcome::NoContact => self.skipped_no_contact += 1,
            RecordOutcome::AlreadySeen => self.skipped_seen += 1,
            RecordOutcome::Notified => self.notified += 1,
            RecordOutcome::Failed => self.failed += 1,
        }
    }

    /// Total records that were not announced for any reason.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped_no_identity + self.skipped_no_contact + self.skipped_seen
    }

    fn log(&self, cycle: u64, ledger_size: usize) {
        if self.fetch_failed {
            warn!(cycle, "Cycle complete: no data received");
            return;
        }
        info!(
            cycle,
            fetched = self.fetched,
            notified = self.notified,
            failed = self.failed,
            skipped = self.skipped(),
            skipped_no_identity = self.skipped_no_identity,
            skipped_no_contact = self.skipped_no_contact,
            skipped_seen = self.skipped_seen,
            ledger = ledger_size,
            "Cycle complete"
        );
    }
}

/// Orchestrates fetch, dedup, notify and ledger persistence.
pub struct Dispatcher {
    fetcher: Fetcher,
    notifier: Notifier,
    ledger: Ledger,
    policy: DispatchPolicy,
}

impl Dispatcher {
    #[must_use]
    pub fn new(fetcher: Fetcher, notifier: Notifier, ledger: Ledger, policy: DispatchPolicy) -> Self {
        Self {
            fetcher,
            notifier,
            ledger,
            policy,
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Run cycles until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The stop request is observed before each cycle and during the
    /// inter-cycle sleep. The ledger is persisted once more before
    /// returning.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Ledger {
        let mut cycle: u64 = 0;
        info!(
            interval_secs = self.policy.poll_interval.as_secs(),
            ledger = self.ledger.len(),
            "Poll loop started"
        );

        loop {
            if *shutdown.borrow() {
                info!("Shutdown requested");
                break;
            }

            cycle += 1;
            let summary = self.run_cycle().await;
            summary.log(cycle, self.ledger.len());

            tokio::select! {
                _ = sleep(self.policy.poll_interval) => {}
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
            }
        }

        self.persist_ledger();
        info!(cycles = cycle, ledger = self.ledger.len(), "Poll loop stopped");
        self.ledger
    }

    /// Run one fetch/process/persist cycle.
    pub async fn run_cycle(&mut self) -> CycleSummary {
        let mut summary = CycleSummary::default();

        let records = match self.fetcher.fetch().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "No data received from feed");
                summary.fetch_failed = true;
                return summary;
            }
        };
        summary.fetched = records.len();

        for record in &records {
            let outcome = self.process_record(record).await;
            summary.record(outcome);
            if outcome == RecordOutcome::Notified
                && summary.notified % self.policy.persist_every.max(1) == 0
            {
                self.persist_ledger();
            }
        }

        self.persist_ledger();
        summary
    }

    /// Every step here is total, so one record can never abort the cycle:
    /// a delivery failure is reported as [`RecordOutcome::Failed`].
    async fn process_record(&mut self, record: &RawRecord) -> RecordOutcome {
        let token = normalize(record);

        if token.identity_key.is_none() {
            debug!(name = %token.display_name, "Skipping token without address");
            return RecordOutcome::NoIdentity;
        }
        let Some(announcement) = Announcement::new(&token) else {
            debug!(name = %token.display_name, "Skipping token without Telegram link");
            return RecordOutcome::NoContact;
        };
        let key = announcement.key();
        if self.ledger.contains(key) {
            debug!(name = %token.display_name, key = %key, "Skipping already announced token");
            return RecordOutcome::AlreadySeen;
        }

        let message = announcement.render(Utc::now());
        info!(name = %token.display_name, chain = %token.chain, key = %key, "Announcing new token");

        let delivery = self.notifier.notify(&message).await;
        sleep(self.policy.rate_limit_delay).await;

        if delivery.is_sent() {
            self.ledger.add(key);
            RecordOutcome::Notified
        } else {
            warn!(name = %token.display_name, key = %key, ?delivery, "Announcement not delivered");
            RecordOutcome::Failed
        }
    }

    fn persist_ledger(&self) {
        if let Err(e) = self.ledger.persist() {
            warn!(error = %e, location = %self.ledger.location(), "Failed to persist ledger");
        }
    }
}
