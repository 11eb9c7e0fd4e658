use serde::{Deserialize, Serialize};

use nem_multisig_core::{ActiveAccount, CandidateAccount, PortError, WalletPort};

use crate::autocomplete::AddressBookEntry;

/// Everything the form needs to know about the open wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub wallet: String,
    pub active_account: ActiveAccount,
    pub accounts: Vec<CandidateAccount>,
    /// Multisig accounts known to the wallet, keyed by address.
    #[serde(default)]
    pub multisig_accounts: Vec<CandidateAccount>,
    #[serde(default)]
    pub address_book: Vec<AddressBookEntry>,
}

#[derive(Debug, Clone)]
pub struct WalletAdapter {
    snapshot: WalletSnapshot,
}

impl WalletAdapter {
    pub fn new(snapshot: WalletSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(json: &str) -> Result<Self, PortError> {
        let snapshot = serde_json::from_str(json)
            .map_err(|e| PortError::Validation(format!("invalid wallet snapshot: {e}")))?;
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &WalletSnapshot {
        &self.snapshot
    }
}

impl WalletPort for WalletAdapter {
    fn wallet_name(&self) -> Result<String, PortError> {
        Ok(self.snapshot.wallet.clone())
    }

    fn active_account(&self) -> Result<ActiveAccount, PortError> {
        Ok(self.snapshot.active_account.clone())
    }

    fn all_accounts(&self) -> Result<Vec<CandidateAccount>, PortError> {
        Ok(self.snapshot.accounts.clone())
    }

    fn multisig_account(&self, address: &str) -> Result<Option<CandidateAccount>, PortError> {
        Ok(self
            .snapshot
            .multisig_accounts
            .iter()
            .find(|a| a.address == address)
            .cloned())
    }
}
