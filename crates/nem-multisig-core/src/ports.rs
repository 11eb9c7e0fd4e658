use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ActiveAccount, CandidateAccount, FeeTicket, ModificationRequest, ValidateRequest};
use crate::state::FormSnapshot;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Payload handed to the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationPayload {
    pub tx_data: FormSnapshot,
    pub request_data: ModificationRequest,
}

pub trait WalletPort {
    fn wallet_name(&self) -> Result<String, PortError>;
    fn active_account(&self) -> Result<ActiveAccount, PortError>;
    fn all_accounts(&self) -> Result<Vec<CandidateAccount>, PortError>;
    /// Looks up a multisig account known to the wallet.
    fn multisig_account(&self, address: &str) -> Result<Option<CandidateAccount>, PortError>;
}

/// Fire-and-forget fee estimation. The outcome is delivered back to the form
/// with `ModificationForm::apply_fee_estimate` under the same ticket.
pub trait EstimationPort {
    fn submit(
        &self,
        ticket: FeeTicket,
        endpoint: &str,
        request: &ValidateRequest,
        silent: bool,
    ) -> Result<(), PortError>;
}

pub trait ConfirmationPort {
    fn present(&self, payload: ConfirmationPayload) -> Result<(), PortError>;
    fn open(&self) -> Result<(), PortError>;
}

pub trait MessagePort {
    fn show_message(&self, title: &str, body: &str) -> Result<(), PortError>;
}

pub trait AutocompletePort {
    /// Focuses the address field of `row` and attaches suggestion matching.
    fn attach(&self, row: usize) -> Result<(), PortError>;
}

pub trait ClockPort {
    fn now_ms(&self) -> Result<u64, PortError>;
}
