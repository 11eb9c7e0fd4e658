//! Form fields and the values computed from them.
//!
//! Stored fields are written by the form engine only; everything that can be
//! derived from them is recomputed on read.

use serde::{Deserialize, Serialize};

use crate::domain::{CandidateAccount, CosignatoryEntry};
use crate::format::parse_leading_int;

/// Fields whose writes are observed by the form engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Cosignatories,
    MinCosignatories,
    UseDefaultMinCosignatories,
    UseMinimumFee,
    MinimumFee,
    Fee,
    Password,
    MultisigAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub all_accounts: Vec<CandidateAccount>,
    pub multisig_account: String,
    pub cosignatories: Vec<CosignatoryEntry>,
    pub min_cosignatories: Option<String>,
    pub use_default_min_cosignatories: bool,
    pub due_by: String,
    /// Display buffer of the fee field.
    pub formatted_fee: String,
    /// Canonical fee in micro-NEM, kept in step with `formatted_fee`.
    pub fee: u64,
    pub minimum_fee: u64,
    pub use_minimum_fee: bool,
    pub password: String,
    pub fee_changed: bool,
    pub password_changed: bool,
    pub cosignatories_valid: bool,
    pub warning_shown: bool,
    pub min_cosignatories_zero: bool,
    pub min_cosignatories_overflow: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            all_accounts: Vec::new(),
            multisig_account: String::new(),
            cosignatories: Vec::new(),
            min_cosignatories: None,
            use_default_min_cosignatories: true,
            due_by: "1".to_owned(),
            formatted_fee: "0".to_owned(),
            fee: 0,
            minimum_fee: 0,
            use_minimum_fee: true,
            password: String::new(),
            fee_changed: false,
            password_changed: false,
            cosignatories_valid: false,
            warning_shown: false,
            min_cosignatories_zero: false,
            min_cosignatories_overflow: false,
        }
    }
}

impl FormState {
    /// Whole hours the transaction stays valid; unparseable input is 0.
    pub fn hours_due(&self) -> i32 {
        self.due_by
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.floor().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
            .unwrap_or(0)
    }

    /// Leading integer of `min_cosignatories`, or 0 when there is none.
    pub fn min_cosignatories_number(&self) -> i32 {
        self.min_cosignatories
            .as_deref()
            .and_then(parse_leading_int)
            .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(0)
    }

    pub fn fee_valid(&self) -> bool {
        self.fee >= self.minimum_fee
    }

    pub fn fee_error(&self) -> bool {
        !self.fee_valid() && self.fee_changed
    }

    pub fn password_valid(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn password_error(&self) -> bool {
        !self.password_valid() && self.password_changed
    }

    pub fn min_cosignatories_error(&self) -> bool {
        self.min_cosignatories_overflow || self.min_cosignatories_zero
    }

    pub fn form_valid(&self) -> bool {
        self.fee_valid()
            && self.password_valid()
            && !self.multisig_account.is_empty()
            && self.cosignatories_valid
            && !self.min_cosignatories_error()
    }

    pub fn candidate(&self, address: &str) -> Option<&CandidateAccount> {
        self.all_accounts.iter().find(|a| a.address == address)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            state: self.clone(),
            hours_due: self.hours_due(),
            min_cosignatories_number: self.min_cosignatories_number(),
            fee_valid: self.fee_valid(),
            fee_error: self.fee_error(),
            password_valid: self.password_valid(),
            password_error: self.password_error(),
            min_cosignatories_error: self.min_cosignatories_error(),
            form_valid: self.form_valid(),
        }
    }
}

/// Stored fields plus computed values, as shown by the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    #[serde(flatten)]
    pub state: FormState,
    pub hours_due: i32,
    pub min_cosignatories_number: i32,
    pub fee_valid: bool,
    pub fee_error: bool,
    pub password_valid: bool,
    pub password_error: bool,
    pub min_cosignatories_error: bool,
    pub form_valid: bool,
}
