//! Error types for the notice engine
//!
//! Missing jurisdiction data has no variant here: lookups
//! fail open to "no adjustment" instead of erroring.

use crate::jurisdiction::{PaymentMethod, TaxCategory};
use chrono::{NaiveDate, NaiveTime};
use shared_types::{NoticeStatus, ParseStatusError};
use std::path::PathBuf;
use thiserror::Error;

/// Regional configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read regional configuration from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse regional configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("jurisdiction id must not be empty")]
    EmptyJurisdictionId,

    #[error("malformed jurisdiction id {0:?} (expected e.g. GN_CONAKRY)")]
    MalformedJurisdictionId(String),

    #[error("duplicate jurisdiction id: {0}")]
    DuplicateJurisdiction(String),

    #[error("{jurisdiction}: preferred payment method {method} is not an allowed method")]
    PreferredMethodNotAllowed {
        jurisdiction: String,
        method: PaymentMethod,
    },

    #[error("{jurisdiction}: banking hours open at {open} but close at {close}")]
    InvalidBankingHours {
        jurisdiction: String,
        open: NaiveTime,
        close: NaiveTime,
    },

    #[error("{jurisdiction}: {category} rate {rate} is outside [0, 1]")]
    InvalidTaxRate {
        jurisdiction: String,
        category: TaxCategory,
        rate: f64,
    },
}

/// A create or update request was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    UnknownStatus(#[from] ParseStatusError),

    #[error("update does not change any field")]
    EmptyUpdate,

    #[error("effect date {effect_date} is before issue date {issue_date}")]
    EffectBeforeIssue {
        issue_date: NaiveDate,
        effect_date: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("notice {id} is archived and cannot be modified")]
    ArchivedImmutable { id: String },

    #[error("invalid notice transition: {from} -> {to}")]
    InvalidTransition {
        from: NoticeStatus,
        to: NoticeStatus,
    },
}

/// A single notice could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscalationError {
    #[error("notice {notice_id} has no effect date")]
    MissingEffectDate { notice_id: String },
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("notice not found: {0}")]
    NotFound(String),

    #[error("notice already exists: {0}")]
    Duplicate(String),

    #[error("notice store lock poisoned")]
    Poisoned,

    #[error("storage error: {0}")]
    Other(#[from] anyhow::Error),
}
