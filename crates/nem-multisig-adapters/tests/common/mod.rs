#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use nem_multisig_adapters::{
    AddressBookAdapter, AddressBookEntry, ConfirmationAdapter, EstimationAdapter, MessageAdapter,
    WalletAdapter, WalletSnapshot,
};
use nem_multisig_core::{
    ActiveAccount, CandidateAccount, ClockPort, FeeQuote, FormConfig, ModificationForm, PortError,
};

pub const START_MS: u64 = 1_739_750_400_000;

#[derive(Debug)]
pub struct TestClock {
    now: AtomicU64,
}

impl Default for TestClock {
    fn default() -> Self {
        Self {
            now: AtomicU64::new(START_MS),
        }
    }
}

impl TestClock {
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl ClockPort for TestClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(self.now.load(Ordering::SeqCst))
    }
}

pub type TestForm = ModificationForm<
    WalletAdapter,
    EstimationAdapter,
    ConfirmationAdapter,
    MessageAdapter,
    AddressBookAdapter,
    TestClock,
>;

/// 40 character canonical address starting with `prefix`.
pub fn addr(prefix: &str) -> String {
    format!("{prefix:A<40}")
}

pub fn active() -> String {
    addr("TACTIVE")
}

pub fn plain() -> String {
    addr("TPLAIN")
}

pub fn multisig() -> String {
    addr("TMULTI")
}

pub fn cosig() -> String {
    addr("TCOSIG")
}

pub fn outsider() -> String {
    addr("TOUTSIDER")
}

pub fn wallet_snapshot() -> WalletSnapshot {
    WalletSnapshot {
        wallet: "main-wallet".to_owned(),
        active_account: ActiveAccount {
            address: active(),
            multisig_accounts: vec![multisig(), addr("TUNKNOWN")],
        },
        accounts: vec![
            CandidateAccount {
                address: active(),
                label: Some("Primary".to_owned()),
                is_multisig: false,
                cosignatories: vec![],
            },
            CandidateAccount {
                address: plain(),
                label: None,
                is_multisig: false,
                cosignatories: vec![],
            },
            CandidateAccount {
                address: addr("TFOREIGNMULTI"),
                label: None,
                is_multisig: true,
                cosignatories: vec![plain()],
            },
        ],
        multisig_accounts: vec![CandidateAccount {
            address: multisig(),
            label: None,
            is_multisig: true,
            cosignatories: vec![active(), cosig()],
        }],
        address_book: vec![AddressBookEntry {
            address: outsider(),
            private_label: "Outsider".to_owned(),
        }],
    }
}

pub fn new_form() -> TestForm {
    let snapshot = wallet_snapshot();
    let address_book = AddressBookAdapter::new(snapshot.address_book.clone());
    ModificationForm::new(
        WalletAdapter::new(snapshot),
        EstimationAdapter::manual(),
        ConfirmationAdapter::default(),
        MessageAdapter::default(),
        address_book,
        TestClock::default(),
        FormConfig::default(),
    )
}

pub fn open_form() -> TestForm {
    let mut form = new_form();
    form.open().expect("open form");
    form
}

/// Answers the most recent estimate with `fee` and feeds it to the form.
pub fn answer_last_estimate(form: &mut TestForm, fee: u64) -> bool {
    let submitted = form
        .estimation
        .last_submitted()
        .expect("submitted estimates")
        .expect("an estimate was dispatched");
    form.estimation
        .resolve(submitted.ticket, Ok(FeeQuote { fee }))
        .expect("resolve estimate");
    deliver_completed(form)
}

pub fn deliver_completed(form: &mut TestForm) -> bool {
    let mut applied = false;
    for done in form.estimation.drain_completed().expect("drain completed") {
        applied |= form
            .apply_fee_estimate(done.ticket, done.outcome)
            .expect("apply estimate");
    }
    applied
}
