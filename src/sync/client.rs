//! Remote archive collaborator.
//!
//! The archive server receives `{"records": [...], "sync_date": "..."}` as a
//! JSON POST authenticated with a bearer token; only HTTP 200 counts as an
//! acknowledgement.

use crate::config::SyncConfig;
use crate::errors::{AppError, AppResult};
use crate::models::access_record::{AccessRecord, ArchivedRecord};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

/// Successful hand-off, with whatever the server said about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveAck {
    pub diagnostic: Option<String>,
}

pub trait ArchiveClient {
    /// Configuration gate, checked before any record leaves the machine.
    fn check_ready(&self) -> AppResult<()> {
        Ok(())
    }

    /// Deliver the whole batch. No retries: a failure is reported as is.
    fn send_batch(&self, records: &[AccessRecord], sync_date: &str) -> AppResult<ArchiveAck>;

    /// Short label for the audit log.
    fn target(&self) -> String {
        "remote".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct ArchivePayload {
    pub records: Vec<ArchivedRecord>,
    pub sync_date: String,
}

impl ArchivePayload {
    pub fn new(records: &[AccessRecord], sync_date: &str) -> Self {
        Self {
            records: records.iter().map(AccessRecord::to_archived).collect(),
            sync_date: sync_date.to_string(),
        }
    }
}

/// Blocking HTTP implementation backed by `reqwest`.
pub struct HttpArchiveClient {
    cfg: SyncConfig,
}

impl HttpArchiveClient {
    pub fn new(cfg: &SyncConfig) -> Self {
        Self { cfg: cfg.clone() }
    }
}

impl ArchiveClient for HttpArchiveClient {
    fn check_ready(&self) -> AppResult<()> {
        self.cfg.check_ready()
    }

    fn send_batch(&self, records: &[AccessRecord], sync_date: &str) -> AppResult<ArchiveAck> {
        self.check_ready()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.cfg.timeout_secs.max(1)))
            .build()?;

        let payload = ArchivePayload::new(records, sync_date);
        let response = client
            .post(self.cfg.server_url.trim())
            .bearer_auth(&self.cfg.api_key)
            .json(&payload)
            .send()?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        let body = body.trim();

        if status == StatusCode::OK {
            Ok(ArchiveAck {
                diagnostic: (!body.is_empty()).then(|| body.to_string()),
            })
        } else {
            Err(AppError::Remote {
                status: Some(status.as_u16()),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("no response body").to_string()
                } else {
                    body.to_string()
                },
            })
        }
    }

    fn target(&self) -> String {
        self.cfg.server_url.trim().to_string()
    }
}
