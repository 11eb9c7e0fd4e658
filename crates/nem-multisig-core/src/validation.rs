//! Cosignatory list and threshold checks.
//!
//! These functions only mark rows and report; the one-shot warning and the
//! resulting form flags are owned by the form engine.

use crate::domain::CosignatoryEntry;
use crate::format::parse_leading_int;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosignatoryCheck {
    pub valid: bool,
    /// Every row was well formed but at least one named the multisig account.
    pub self_reference: bool,
}

/// Flags every row whose canonical address is not exactly `address_length`
/// characters and clears the flag on the others.
pub fn structural_check(entries: &mut [CosignatoryEntry], address_length: usize) -> bool {
    let mut valid = true;
    for entry in entries.iter_mut() {
        entry.error = entry.address.chars().count() != address_length;
        valid &= !entry.error;
    }
    valid
}

/// Flags rows naming the multisig account itself; returns false if any did.
pub fn self_reference_check(entries: &mut [CosignatoryEntry], multisig_account: &str) -> bool {
    let mut valid = true;
    for entry in entries.iter_mut() {
        entry.error = entry.address == multisig_account;
        valid &= !entry.error;
    }
    valid
}

/// Structural pass, then the self-reference pass if the first one passed.
///
/// An unset multisig account cannot name any row: every row that survives
/// the structural pass is non-empty, so the second pass is skipped outright.
pub fn check_cosignatories(
    entries: &mut [CosignatoryEntry],
    multisig_account: &str,
    address_length: usize,
) -> CosignatoryCheck {
    if !structural_check(entries, address_length) {
        return CosignatoryCheck {
            valid: false,
            self_reference: false,
        };
    }
    if multisig_account.is_empty() {
        return CosignatoryCheck {
            valid: true,
            self_reference: false,
        };
    }
    let valid = self_reference_check(entries, multisig_account);
    CosignatoryCheck {
        valid,
        self_reference: !valid,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinCosignatoryFlags {
    pub zero: bool,
    pub overflow: bool,
}

/// `zero` for a missing, blank, non-numeric or zero threshold; `overflow`
/// when the threshold exceeds the number of rows.
pub fn min_cosignatory_flags(raw: Option<&str>, cosignatory_count: usize) -> MinCosignatoryFlags {
    let parsed = raw.and_then(parse_leading_int);
    MinCosignatoryFlags {
        zero: matches!(parsed, None | Some(0)),
        overflow: parsed.is_some_and(|v| v > 0 && v as u64 > cosignatory_count as u64),
    }
}
