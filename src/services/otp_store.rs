//! In-memory store of pending phone verifications.
//!
//! Each phone number has at most one pending entry: a six-digit code, an
//! absolute expiry and the lead payload that is committed once the code is
//! confirmed. Entries never touch durable storage; losing them only means the
//! visitor has to request a new code.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::LeadPayload;
use crate::tasks::{SweepTask, spawn_otp_sweeper};
use crate::utils::generate_six_digit_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("No pending verification code for this phone number")]
    NotFound,
    #[error("Verification code has expired")]
    Expired,
    #[error("Verification code does not match")]
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub payload: LeadPayload,
}

#[derive(Clone)]
pub struct OtpStore {
    ttl: chrono::Duration,
    entries: Arc<RwLock<HashMap<String, PendingVerification>>>,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::minutes(5)),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A store whose expiry sweep is already running every `sweep_every`.
    pub fn with_sweeper(ttl: Duration, sweep_every: Duration) -> (Self, SweepTask) {
        let store = Self::new(ttl);
        let sweeper = store.spawn_sweeper(sweep_every);
        (store, sweeper)
    }

    /// Starts sweeping expired entries from this store in the background.
    pub fn spawn_sweeper(&self, every: Duration) -> SweepTask {
        spawn_otp_sweeper(self.clone(), every)
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Issues a fresh code for `phone`, replacing any pending one.
    pub async fn issue(&self, phone: &str, payload: LeadPayload) -> String {
        self.issue_at(phone, payload, Utc::now()).await
    }

    pub async fn issue_at(&self, phone: &str, payload: LeadPayload, now: DateTime<Utc>) -> String {
        let code = generate_six_digit_code();
        let pending = PendingVerification {
            code: code.clone(),
            expires_at: now + self.ttl,
            payload,
        };

        self.entries.write().await.insert(phone.to_string(), pending);
        code
    }

    /// Checks `code` and, on a match, removes the entry and returns its payload.
    pub async fn verify(&self, phone: &str, code: &str) -> Result<LeadPayload, VerificationError> {
        self.verify_at(phone, code, Utc::now()).await
    }

    pub async fn verify_at(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<LeadPayload, VerificationError> {
        self.consume_at(phone, code, now)
            .await
            .map(|pending| pending.payload)
    }

    /// Like [`verify`](Self::verify) but hands back the whole entry so it can
    /// be [`reinstate`](Self::reinstate)d if committing the lead fails.
    pub async fn consume(
        &self,
        phone: &str,
        code: &str,
    ) -> Result<PendingVerification, VerificationError> {
        self.consume_at(phone, code, Utc::now()).await
    }

    async fn consume_at(
        &self,
        phone: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PendingVerification, VerificationError> {
        let mut entries = self.entries.write().await;

        let Entry::Occupied(entry) = entries.entry(phone.to_string()) else {
            return Err(VerificationError::NotFound);
        };

        if now > entry.get().expires_at {
            entry.remove();
            return Err(VerificationError::Expired);
        }

        // Wrong code keeps the entry so the visitor can retry inside the window
        if entry.get().code != code {
            return Err(VerificationError::Mismatch);
        }

        Ok(entry.remove())
    }

    /// Puts a consumed entry back unless a newer code was issued meanwhile.
    /// Returns whether the entry was restored.
    pub async fn reinstate(&self, phone: &str, pending: PendingVerification) -> bool {
        match self.entries.write().await.entry(phone.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(pending);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Drops every entry with `expires_at < now`; returns how many were removed.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, pending| pending.expires_at >= now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
impl OtpStore {
    pub(crate) async fn pending_code(&self, phone: &str) -> Option<String> {
        self.entries
            .read()
            .await
            .get(phone)
            .map(|pending| pending.code.clone())
    }

    pub(crate) async fn expires_at(&self, phone: &str) -> Option<DateTime<Utc>> {
        self.entries
            .read()
            .await
            .get(phone)
            .map(|pending| pending.expires_at)
    }
}
