mod common;

use nem_multisig_core::{format_address, FeeQuote, PortError, Separators};

use common::{addr, answer_last_estimate, deliver_completed, open_form};

#[test]
fn rapid_list_edits_coalesce_into_one_refresh() {
    let mut form = open_form();
    assert_eq!(form.estimation.submitted().expect("submitted").len(), 1);

    form.set_cosignatory_address(1, "TA").expect("edit");
    form.clock.advance(100);
    form.set_cosignatory_address(1, "TAB").expect("edit");
    form.clock.advance(100);
    form.set_cosignatory_address(1, format_address(&addr("TABC")))
        .expect("edit");

    form.clock.advance(450);
    assert!(!form.tick().expect("tick"));
    form.clock.advance(50);
    assert!(form.tick().expect("tick"));
    assert!(!form.tick().expect("tick"));

    let submitted = form.estimation.submitted().expect("submitted");
    assert_eq!(submitted.len(), 2);
    let last = &submitted[1];
    assert!(last.silent);
    assert_eq!(last.request.cosignatories.len(), 2);
    assert_eq!(last.request.cosignatories[1].address, addr("TABC"));
}

#[test]
fn estimate_updates_minimum_fee_and_auto_fee() {
    let mut form = open_form();
    assert!(answer_last_estimate(&mut form, 6_000_000));

    let state = form.state();
    assert_eq!(state.minimum_fee, 6_000_000);
    assert_eq!(state.fee, 6_000_000);
    assert_eq!(state.formatted_fee, "6");
    assert_eq!(form.formatted_minimum_fee(), "6");
    assert!(state.fee_valid());
}

#[test]
fn manual_fee_is_not_overwritten_until_auto_fee_is_restored() {
    let mut form = open_form();
    answer_last_estimate(&mut form, 2_000_000);

    form.set_use_minimum_fee(false).expect("manual fee");
    form.set_formatted_fee("1.5").expect("user fee");
    assert_eq!(form.state().fee, 1_500_000);
    assert!(!form.state().fee_valid());
    assert!(form.state().fee_error());

    form.reset_fee(true).expect("refresh");
    answer_last_estimate(&mut form, 3_000_000);
    assert_eq!(form.state().minimum_fee, 3_000_000);
    assert_eq!(form.state().fee, 1_500_000);

    form.set_use_minimum_fee(true).expect("auto fee");
    assert_eq!(form.state().fee, 3_000_000);

    form.reset_fee(true).expect("refresh");
    answer_last_estimate(&mut form, 4_000_000);
    assert_eq!(form.state().fee, 4_000_000);
}

#[test]
fn numerically_equal_fee_edit_still_marks_fee_touched() {
    let mut form = open_form();
    assert!(!form.state().fee_changed);
    form.set_formatted_fee("0.0").expect("trailing zero edit");
    assert_eq!(form.state().fee, 0);
    assert_eq!(form.state().formatted_fee, "0.0");
    assert!(form.state().fee_changed);
}

#[test]
fn failed_estimate_keeps_previous_minimum_fee() {
    let mut form = open_form();
    answer_last_estimate(&mut form, 2_000_000);

    form.reset_fee(false).expect("refresh");
    let ticket = form
        .estimation
        .last_submitted()
        .expect("submitted")
        .expect("dispatched")
        .ticket;
    form.estimation
        .resolve(ticket, Err(PortError::Transport("node offline".to_owned())))
        .expect("resolve");
    assert!(!deliver_completed(&mut form));
    assert_eq!(form.state().minimum_fee, 2_000_000);
}

#[test]
fn older_response_cannot_override_newer_one() {
    let mut form = open_form();
    let first = form
        .estimation
        .last_submitted()
        .expect("submitted")
        .expect("dispatched")
        .ticket;
    form.reset_fee(true).expect("refresh");
    let second = form
        .estimation
        .last_submitted()
        .expect("submitted")
        .expect("dispatched")
        .ticket;

    assert!(form
        .apply_fee_estimate(second, Ok(FeeQuote { fee: 5_000_000 }))
        .expect("apply"));
    assert!(!form
        .apply_fee_estimate(first, Ok(FeeQuote { fee: 1 }))
        .expect("apply"));
    assert_eq!(form.state().minimum_fee, 5_000_000);
}

#[test]
fn responses_after_close_are_ignored() {
    let mut form = open_form();
    let ticket = form
        .estimation
        .last_submitted()
        .expect("submitted")
        .expect("dispatched")
        .ticket;
    form.set_cosignatory_address(1, "TX").expect("edit");
    form.close().expect("close");
    assert!(!form.fee_refresh_pending());

    form.clock.advance(10_000);
    assert!(!form.tick().expect("tick on closed form"));
    assert!(!form
        .apply_fee_estimate(ticket, Ok(FeeQuote { fee: 9_000_000 }))
        .expect("apply"));
    assert_eq!(form.state().minimum_fee, 0);

    form.open().expect("reopen");
    assert!(!form
        .apply_fee_estimate(ticket, Ok(FeeQuote { fee: 9_000_000 }))
        .expect("apply"));
    assert_eq!(form.state().minimum_fee, 0);
    assert!(answer_last_estimate(&mut form, 7_000_000));
    assert_eq!(form.state().minimum_fee, 7_000_000);
}

#[test]
fn validate_request_serializes_to_wire_shape() {
    let mut form = open_form();
    form.set_cosignatory_address(1, format_address(&addr("TNEXT")))
        .expect("edit");
    form.set_due_by("12.7");
    form.reset_fee(true).expect("refresh");

    let request = form
        .estimation
        .last_submitted()
        .expect("submitted")
        .expect("dispatched")
        .request;
    let json = serde_json::to_value(&request).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "wallet": "main-wallet",
            "multisig": common::active(),
            "cosignatories": [
                {"address": common::active()},
                {"address": addr("TNEXT")}
            ],
            "minCosignatories": {"relativeChange": 2},
            "hoursDue": 12
        })
    );
}

#[test]
fn estimate_is_requested_for_active_account_whatever_is_selected() {
    let mut form = open_form();
    form.set_multisig_account(&common::plain())
        .expect("select plain");
    form.reset_fee(true).expect("refresh");
    let request = form
        .estimation
        .last_submitted()
        .expect("submitted")
        .expect("dispatched")
        .request;
    assert_eq!(request.multisig, common::active());

    form.set_multisig_account(&common::multisig())
        .expect("select multisig");
    form.clock.advance(500);
    assert!(form.tick().expect("tick"));
    let request = form
        .estimation
        .last_submitted()
        .expect("submitted")
        .expect("dispatched")
        .request;
    assert_eq!(request.multisig, common::active());
    assert_eq!(request.cosignatories[1].address, common::cosig());
}

#[test]
fn separator_change_reformats_display_without_touching_fee() {
    let mut form = open_form();
    form.set_use_minimum_fee(false).expect("manual fee");
    form.set_formatted_fee("1,234.5").expect("fee");
    assert_eq!(form.state().fee, 1_234_500_000);

    form.on_separators_changed(Separators {
        thousand: '.',
        decimal: ',',
    });
    assert_eq!(form.state().formatted_fee, "1.234,5");
    assert_eq!(form.state().fee, 1_234_500_000);

    form.set_formatted_fee("2.000,25").expect("fee in new convention");
    assert_eq!(form.state().fee, 2_000_250_000);
}
