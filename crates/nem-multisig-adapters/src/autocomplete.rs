use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use nem_multisig_core::{format_address, restore_address, AutocompletePort, PortError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookEntry {
    pub address: String,
    pub private_label: String,
}

impl AddressBookEntry {
    pub fn formatted_address(&self) -> String {
        format_address(&self.address)
    }
}

/// Address-book suggestions for cosignatory rows.
#[derive(Debug, Clone, Default)]
pub struct AddressBookAdapter {
    entries: Vec<AddressBookEntry>,
    attached: Arc<Mutex<Vec<usize>>>,
}

impl AddressBookAdapter {
    pub fn new(entries: Vec<AddressBookEntry>) -> Self {
        Self {
            entries,
            attached: Arc::default(),
        }
    }

    /// Rows that received suggestion matching, in attach order.
    pub fn attached_rows(&self) -> Result<Vec<usize>, PortError> {
        let g = self
            .attached
            .lock()
            .map_err(|e| PortError::Transport(format!("autocomplete lock poisoned: {e}")))?;
        Ok(g.clone())
    }

    /// Entries whose label or address contains `query`, ignoring case and
    /// address dashes.
    pub fn suggest(&self, query: &str) -> Vec<AddressBookEntry> {
        let label_query = query.trim().to_lowercase();
        let address_query = restore_address(query);
        if label_query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| {
                e.private_label.to_lowercase().contains(&label_query)
                    || (!address_query.is_empty() && e.address.contains(&address_query))
            })
            .cloned()
            .collect()
    }
}

impl AutocompletePort for AddressBookAdapter {
    fn attach(&self, row: usize) -> Result<(), PortError> {
        let mut g = self
            .attached
            .lock()
            .map_err(|e| PortError::Transport(format!("autocomplete lock poisoned: {e}")))?;
        g.push(row);
        Ok(())
    }
}
