use crate::domain::{
    CosignatoryModification, MinCosignatoriesModification, ModificationRequest,
    AGGREGATE_MODIFICATION,
};
use crate::state::FormState;

/// Aggregate modification request for the current form. Blank rows are
/// skipped; soft-deleted rows are sent with `deleted: true`.
pub fn modification_request(wallet: String, state: &FormState) -> ModificationRequest {
    ModificationRequest {
        wallet,
        account: state.multisig_account.clone(),
        tx_type: AGGREGATE_MODIFICATION,
        cosignatories: state
            .cosignatories
            .iter()
            .filter(|e| !e.is_blank())
            .map(|e| CosignatoryModification {
                address: e.address.clone(),
                deleted: e.deleted,
            })
            .collect(),
        min_cosignatories: MinCosignatoriesModification {
            relative_change: state.min_cosignatories_number(),
        },
        password: state.password.clone(),
        fee: state.fee,
        hours_due: state.hours_due(),
    }
}
