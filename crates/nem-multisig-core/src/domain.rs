use serde::{Deserialize, Serialize};

/// NIS transaction type for a multisig aggregate modification.
pub const AGGREGATE_MODIFICATION: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

/// One row of the cosignatory list.
///
/// `address` is always derived from `formatted_address`; only the canonical
/// form is used for validation and outgoing requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatoryEntry {
    pub address: String,
    pub formatted_address: String,
    pub read_only: bool,
    pub can_remove_row: bool,
    pub can_delete_cosig: bool,
    pub deleted: bool,
    pub error: bool,
}

impl CosignatoryEntry {
    /// Trailing row appended after every reset and by `add_cosignatory`.
    pub fn blank() -> Self {
        Self {
            can_remove_row: true,
            ..Self::default()
        }
    }

    /// Current cosignatory of an account that is already multisig.
    pub fn existing(formatted_address: String) -> Self {
        Self {
            formatted_address,
            read_only: true,
            can_delete_cosig: true,
            ..Self::default()
        }
    }

    /// The active wallet account seeded as first signer of a new multisig.
    pub fn signer(formatted_address: String) -> Self {
        Self {
            formatted_address,
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.address.is_empty()
    }
}

/// Account offered by the multisig account selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAccount {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_multisig: bool,
    #[serde(default)]
    pub cosignatories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveAccount {
    pub address: String,
    #[serde(default)]
    pub multisig_accounts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinCosignatoriesModification {
    pub relative_change: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosignatoryRef {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosignatoryModification {
    pub address: String,
    pub deleted: bool,
}

/// Body of the fee estimation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub wallet: String,
    pub multisig: String,
    pub cosignatories: Vec<CosignatoryRef>,
    pub min_cosignatories: MinCosignatoriesModification,
    pub hours_due: i32,
}

/// Response of the fee estimation call; `fee` is in micro-NEM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub fee: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    pub wallet: String,
    pub account: String,
    #[serde(rename = "type")]
    pub tx_type: u32,
    pub cosignatories: Vec<CosignatoryModification>,
    pub min_cosignatories: MinCosignatoriesModification,
    pub password: String,
    pub fee: u64,
    pub hours_due: i32,
}

/// Identifies one dispatched fee estimate.
///
/// `session` changes on every open/close of the form, `seq` grows with every
/// dispatch inside a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeeTicket {
    pub session: u64,
    pub seq: u64,
}
