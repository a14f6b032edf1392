//! Slot allocation and waitlist overflow.
//!
//! [`Allocator::submit`] turns one form submission into exactly one of three
//! terminal outcomes: a confirmed registration in the next free slot, a
//! waitlist entry once the pool is full, or a structured failure. Store and
//! mail access go through the [`TabularStore`] and [`Mailer`] collaborators.
//!
//! The occupancy read and the row append are serialized by an
//! allocator-wide lock, so submissions handled by one process never observe
//! the same count. Notifications are sent after the lock is released and a
//! send failure never changes the outcome.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::EventConfig;
use crate::error::CoreError;
use crate::form::RegistrationForm;
use crate::mailer::{Mailer, OutgoingEmail};
use crate::messages;
use crate::outcome::{
    Confirmation, ConfirmationDetails, Failure, PublicStatus, SubmissionResult, WaitlistPlacement,
};
use crate::registration::{Registration, WaitlistEntry, REGISTRATION_HEADER, WAITLIST_HEADER};
use crate::store::{TabularStore, REGISTRATIONS, WAITLIST};
use crate::transaction::new_transaction_id;
use crate::types::Slot;

/// Where a submission landed before notifications go out.
enum Placement {
    Confirmed(Registration),
    Waitlisted { entry: WaitlistEntry, position: u64 },
}

/// Which catch boundary a failure belongs to.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Registration,
    Waitlist,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Registration => "registration",
            Stage::Waitlist => "waitlist",
        }
    }
}

/// Outcome of [`Allocator::initialize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub collections: Vec<String>,
    pub store_link: String,
}

/// Outcome of [`Allocator::check_connection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub success: bool,
    pub store_id: String,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Allocator {
    config: EventConfig,
    store: Arc<dyn TabularStore>,
    mailer: Arc<dyn Mailer>,
    slot_lock: Mutex<()>,
}

impl Allocator {
    pub fn new(config: EventConfig, store: Arc<dyn TabularStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config,
            store,
            mailer,
            slot_lock: Mutex::new(()),
        }
    }

    /// Handle one submission. Never returns an error: every failure is
    /// reported as [`SubmissionResult::Failed`].
    pub async fn submit(&self, form: &RegistrationForm) -> SubmissionResult {
        let transaction_id = new_transaction_id();
        tracing::info!(
            transaction_id = %transaction_id,
            band = %form.band_name,
            "Registration received"
        );

        let placement = {
            let _guard = self.slot_lock.lock().await;
            self.place(form).await
        };

        match placement {
            Ok(Placement::Confirmed(registration)) => {
                self.confirm(transaction_id, registration).await
            }
            Ok(Placement::Waitlisted { entry, position }) => {
                self.waitlisted(transaction_id, entry, position).await
            }
            Err((stage, err)) => self.fail(transaction_id, form, stage, err).await,
        }
    }

    /// Read-only occupancy snapshot. Store failures yield an `error` status.
    pub async fn public_status(&self) -> PublicStatus {
        let now = Utc::now();
        match self.counts().await {
            Ok((registrations, waitlist)) => {
                PublicStatus::from_counts(registrations, waitlist, self.config.max_slots, now)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read registration counts");
                PublicStatus::unavailable(self.config.max_slots, now, err.code())
            }
        }
    }

    /// Create both collections if they are missing.
    pub async fn initialize(&self) -> Result<InitReport, CoreError> {
        self.ensure_collections().await?;
        tracing::info!(store_id = %self.config.store_id, "Store initialized");
        Ok(InitReport {
            collections: vec![REGISTRATIONS.to_string(), WAITLIST.to_string()],
            store_link: self.config.store_link().to_string(),
        })
    }

    /// Probe the store by listing its collections.
    pub async fn check_connection(&self) -> ConnectionReport {
        match self.store.collections().await {
            Ok(collections) => ConnectionReport {
                success: true,
                store_id: self.config.store_id.clone(),
                collections,
                error: None,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Store connection check failed");
                ConnectionReport {
                    success: false,
                    store_id: self.config.store_id.clone(),
                    collections: Vec::new(),
                    error: Some(CoreError::from(err).code().to_string()),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    async fn place(&self, form: &RegistrationForm) -> Result<Placement, (Stage, CoreError)> {
        let at_registration = |err: CoreError| (Stage::Registration, err);

        self.ensure_collections().await.map_err(at_registration)?;
        let confirmed = self
            .store
            .data_row_count(REGISTRATIONS)
            .await
            .map_err(|e| at_registration(e.into()))?;

        if confirmed >= u64::from(self.config.max_slots) {
            return self
                .place_on_waitlist(form)
                .await
                .map_err(|err| (Stage::Waitlist, err));
        }

        let slot = Slot::try_from(confirmed + 1)
            .map_err(|_| at_registration(CoreError::Internal("slot overflow".into())))?;
        let registration = Registration::from_form(form, slot, Utc::now());
        let row = registration
            .to_row()
            .map_err(|e| at_registration(e.into()))?;
        self.store
            .append_row(REGISTRATIONS, row)
            .await
            .map_err(|e| at_registration(e.into()))?;

        Ok(Placement::Confirmed(registration))
    }

    async fn place_on_waitlist(&self, form: &RegistrationForm) -> Result<Placement, CoreError> {
        let entry = WaitlistEntry::from_form(form, Utc::now());
        let rows = self.store.append_row(WAITLIST, entry.to_row()).await?;
        Ok(Placement::Waitlisted {
            entry,
            position: rows.saturating_sub(1),
        })
    }

    async fn ensure_collections(&self) -> Result<(), CoreError> {
        self.store
            .ensure_collection(REGISTRATIONS, &REGISTRATION_HEADER)
            .await?;
        self.store
            .ensure_collection(WAITLIST, &WAITLIST_HEADER)
            .await?;
        Ok(())
    }

    async fn counts(&self) -> Result<(u64, u64), CoreError> {
        let registrations = self.store.data_row_count(REGISTRATIONS).await?;
        let waitlist = self.store.data_row_count(WAITLIST).await?;
        Ok((registrations, waitlist))
    }

    // -----------------------------------------------------------------------
    // Outcomes
    // -----------------------------------------------------------------------

    async fn confirm(&self, transaction_id: String, registration: Registration) -> SubmissionResult {
        let slot = registration.performance_order;
        tracing::info!(
            transaction_id = %transaction_id,
            registration_number = %registration.registration_number,
            slot,
            max_slots = self.config.max_slots,
            "Registration confirmed"
        );

        let alert = messages::registration_alert(&registration, &self.config, Utc::now());
        match messages::confirmation(&registration, &self.config) {
            Ok(confirmation) => {
                tokio::join!(
                    self.dispatch(&transaction_id, confirmation),
                    self.dispatch(&transaction_id, alert),
                );
            }
            Err(err) => {
                tracing::warn!(
                    transaction_id = %transaction_id,
                    error = %err,
                    "Confirmation render failed"
                );
                self.dispatch(&transaction_id, alert).await;
            }
        }

        SubmissionResult::Confirmed(Confirmation {
            success: true,
            transaction_id,
            message: format!(
                "Registration successful! Your band \"{}\" is registered as #{slot}.",
                registration.band_name
            ),
            registration_number: registration.registration_number,
            performance_order: slot,
            slot_used: slot,
            total_slots: self.config.max_slots,
            timestamp: Utc::now(),
            details: ConfirmationDetails {
                band_name: registration.band_name,
                leader_email: registration.leader_email,
                church_name: registration.church_name,
            },
        })
    }

    async fn waitlisted(
        &self,
        transaction_id: String,
        entry: WaitlistEntry,
        position: u64,
    ) -> SubmissionResult {
        tracing::info!(
            transaction_id = %transaction_id,
            band = %entry.band_name,
            position,
            "Slots full, added to waitlist"
        );

        self.dispatch(&transaction_id, messages::waitlist_alert(&entry, &self.config))
            .await;

        SubmissionResult::Waitlisted(WaitlistPlacement {
            success: false,
            is_waitlist: true,
            transaction_id,
            message: format!(
                "All {} registration slots are filled. Your registration has been added to the waiting list.",
                self.config.max_slots
            ),
            waitlist_position: position,
        })
    }

    async fn fail(
        &self,
        transaction_id: String,
        form: &RegistrationForm,
        stage: Stage,
        err: CoreError,
    ) -> SubmissionResult {
        tracing::error!(
            transaction_id = %transaction_id,
            stage = stage.as_str(),
            error = %err,
            "Submission failed"
        );

        self.dispatch(
            &transaction_id,
            messages::error_alert(
                &self.config,
                &transaction_id,
                &err.to_string(),
                &form.band_name,
                Utc::now(),
            ),
        )
        .await;

        SubmissionResult::Failed(Failure::new(transaction_id, err.code()))
    }

    /// Send one message, logging instead of propagating a failure.
    ///
    /// A send that outlives `notify_timeout` is abandoned and counted as failed.
    async fn dispatch(&self, transaction_id: &str, email: OutgoingEmail) -> bool {
        let subject = email.subject.clone();
        let budget = self.config.notify_timeout;
        match tokio::time::timeout(budget, self.mailer.send(email)).await {
            Ok(Ok(())) => {
                tracing::debug!(transaction_id, subject = %subject, "Notification sent");
                true
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    transaction_id,
                    subject = %subject,
                    error = %err,
                    "Notification send failed"
                );
                false
            }
            Err(_) => {
                tracing::warn!(
                    transaction_id,
                    subject = %subject,
                    timeout_ms = budget.as_millis() as u64,
                    "Notification send timed out"
                );
                false
            }
        }
    }
}
