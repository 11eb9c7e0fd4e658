use crate::format::{Separators, ADDRESS_LENGTH};

#[derive(Debug, Clone)]
pub struct FormConfig {
    pub estimate_endpoint: String,
    pub fee_debounce_ms: u64,
    pub address_length: usize,
    pub default_due_by: String,
    pub separators: Separators,
    pub self_reference_title: String,
    pub self_reference_warning: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            estimate_endpoint: "wallet/account/modification/validate".to_owned(),
            fee_debounce_ms: 500,
            address_length: ADDRESS_LENGTH,
            default_due_by: "1".to_owned(),
            separators: Separators::default(),
            self_reference_title: "Multisig account".to_owned(),
            self_reference_warning:
                "A multisig account cannot be one of its own cosignatories.".to_owned(),
        }
    }
}
