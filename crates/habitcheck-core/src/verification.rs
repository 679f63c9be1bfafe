//! Verification records produced by the upstream evidence pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rule type that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationKind {
    Schedule,
    Frequency,
}

/// Evidence method used for an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMethod {
    Manual,
    Camera,
    Screenshot,
    Combo,
}

/// A single goal attempt.
///
/// `passed` is decided upstream; the aggregators only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    pub goal_id: String,
    /// Epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub passed: bool,
    pub kind: VerificationKind,
    pub method: VerificationMethod,
}

impl VerificationRecord {
    pub fn new(
        goal_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        passed: bool,
        kind: VerificationKind,
        method: VerificationMethod,
    ) -> Self {
        Self {
            goal_id: goal_id.into(),
            timestamp,
            passed,
            kind,
            method,
        }
    }
}
