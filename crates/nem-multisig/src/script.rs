use std::thread;
use std::time::{Duration, Instant};

use eyre::{Result, WrapErr};
use serde::Deserialize;
use tracing::{debug, info};

use nem_multisig_adapters::{
    AddressBookAdapter, ConfirmationAdapter, EstimationAdapter, MessageAdapter,
    SystemClockAdapter, WalletAdapter,
};
use nem_multisig_core::{FeeQuote, ModificationForm, ModificationRequest, Separators};

const PUMP_INTERVAL_MS: u64 = 25;

pub type DriverForm = ModificationForm<
    WalletAdapter,
    EstimationAdapter,
    ConfirmationAdapter,
    MessageAdapter,
    AddressBookAdapter,
    SystemClockAdapter,
>;

/// One user interaction with the form, as read from a session script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    Open,
    Close,
    SelectAccount { address: String },
    AddCosignatory,
    RemoveCosignatory { index: usize },
    DeleteCosignatory { index: usize },
    SetCosignatory { index: usize, address: String },
    UseDefaultMinCosignatories { on: bool },
    SetMinCosignatories { value: Option<String> },
    SetDueBy { value: String },
    UseMinimumFee { on: bool },
    SetFee { value: String },
    SetPassword { value: String },
    SetSeparators { thousand: char, decimal: char },
    Wait { ms: u64 },
    Key { code: u32 },
    Submit,
}

/// Runs scripted events through a form, pumping the debounce timer and
/// fee estimate completions between events.
pub struct Session {
    form: DriverForm,
    offline_fee: Option<u64>,
    answered: usize,
    submitted: Option<ModificationRequest>,
}

impl Session {
    /// With `offline_fee` set, every dispatched estimate is answered locally
    /// with that fee.
    pub fn new(form: DriverForm, offline_fee: Option<u64>) -> Self {
        Self {
            form,
            offline_fee,
            answered: 0,
            submitted: None,
        }
    }

    pub fn form(&self) -> &DriverForm {
        &self.form
    }

    pub fn submitted(&self) -> Option<&ModificationRequest> {
        self.submitted.as_ref()
    }

    pub fn run(&mut self, events: &[FormEvent]) -> Result<()> {
        for (step, event) in events.iter().enumerate() {
            debug!(step, ?event, "applying form event");
            self.apply(event)
                .wrap_err_with(|| format!("event {step} ({event:?}) failed"))?;
            self.pump()?;
        }
        Ok(())
    }

    /// Keeps pumping for `ms` so in-flight estimates can land.
    pub fn wait(&mut self, ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(ms);
        let step = Duration::from_millis(PUMP_INTERVAL_MS.min(ms.max(1)));
        while Instant::now() < deadline {
            thread::sleep(step);
            self.pump()?;
        }
        Ok(())
    }

    fn apply(&mut self, event: &FormEvent) -> Result<()> {
        let form = &mut self.form;
        match event {
            FormEvent::Open => form.open()?,
            FormEvent::Close => form.close()?,
            FormEvent::SelectAccount { address } => form.set_multisig_account(address)?,
            FormEvent::AddCosignatory => form.add_cosignatory()?,
            FormEvent::RemoveCosignatory { index } => form.remove_cosignatory(*index)?,
            FormEvent::DeleteCosignatory { index } => form.delete_cosignatory(*index)?,
            FormEvent::SetCosignatory { index, address } => {
                form.set_cosignatory_address(*index, address.as_str())?
            }
            FormEvent::UseDefaultMinCosignatories { on } => {
                form.set_use_default_min_cosignatories(*on)?
            }
            FormEvent::SetMinCosignatories { value } => {
                form.set_min_cosignatories(value.as_deref())?
            }
            FormEvent::SetDueBy { value } => form.set_due_by(value.as_str()),
            FormEvent::UseMinimumFee { on } => form.set_use_minimum_fee(*on)?,
            FormEvent::SetFee { value } => form.set_formatted_fee(value.as_str())?,
            FormEvent::SetPassword { value } => form.set_password(value)?,
            FormEvent::SetSeparators { thousand, decimal } => {
                form.on_separators_changed(Separators {
                    thousand: *thousand,
                    decimal: *decimal,
                })
            }
            FormEvent::Wait { ms } => self.wait(*ms)?,
            FormEvent::Key { code } => {
                if let Some(request) = form.submit_on_enter(*code)? {
                    self.submitted = Some(request);
                }
            }
            FormEvent::Submit => {
                let request = form.send_transaction()?;
                info!(account = %request.account, "modification submitted");
                self.submitted = Some(request);
            }
        }
        Ok(())
    }

    fn pump(&mut self) -> Result<()> {
        self.form.tick()?;
        if let Some(fee) = self.offline_fee {
            let submitted = self.form.estimation.submitted()?;
            for estimate in submitted.iter().skip(self.answered) {
                self.form
                    .estimation
                    .resolve(estimate.ticket, Ok(FeeQuote { fee }))?;
            }
            self.answered = submitted.len();
        }
        for done in self.form.estimation.drain_completed()? {
            self.form.apply_fee_estimate(done.ticket, done.outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nem_multisig_core::FormConfig;

    fn addr(prefix: &str) -> String {
        format!("{prefix:A<40}")
    }

    fn offline_form() -> DriverForm {
        let wallet = WalletAdapter::from_json(
            &serde_json::json!({
                "wallet": "demo",
                "activeAccount": {"address": addr("TACTIVE")},
                "accounts": [
                    {"address": addr("TACTIVE")},
                    {"address": addr("TPLAIN"), "label": "Savings"}
                ]
            })
            .to_string(),
        )
        .expect("wallet snapshot");
        ModificationForm::new(
            wallet,
            EstimationAdapter::manual(),
            ConfirmationAdapter::default(),
            MessageAdapter::default(),
            AddressBookAdapter::default(),
            SystemClockAdapter,
            FormConfig::default(),
        )
    }

    #[test]
    fn parses_tagged_events() {
        let events: Vec<FormEvent> = serde_json::from_str(
            r#"[
                {"event": "open"},
                {"event": "set_cosignatory", "index": 1, "address": "TB-C"},
                {"event": "set_min_cosignatories", "value": null},
                {"event": "set_separators", "thousand": ".", "decimal": ","},
                {"event": "key", "code": 13}
            ]"#,
        )
        .expect("script");
        assert_eq!(events[0], FormEvent::Open);
        assert_eq!(
            events[1],
            FormEvent::SetCosignatory {
                index: 1,
                address: "TB-C".to_owned()
            }
        );
        assert_eq!(events[2], FormEvent::SetMinCosignatories { value: None });
        assert_eq!(
            events[3],
            FormEvent::SetSeparators {
                thousand: '.',
                decimal: ','
            }
        );
        assert_eq!(events[4], FormEvent::Key { code: 13 });
    }

    #[test]
    fn offline_session_submits_conversion() {
        let mut session = Session::new(offline_form(), Some(2_000_000));
        session
            .run(&[
                FormEvent::Open,
                FormEvent::SelectAccount {
                    address: addr("TPLAIN"),
                },
                FormEvent::SetCosignatory {
                    index: 1,
                    address: addr("TFRIEND"),
                },
                FormEvent::SetPassword {
                    value: "pw".to_owned(),
                },
                FormEvent::Submit,
            ])
            .expect("session");

        let request = session.submitted().expect("submitted");
        assert_eq!(request.account, addr("TPLAIN"));
        assert_eq!(request.fee, 2_000_000);
        assert_eq!(request.min_cosignatories.relative_change, 2);
        assert_eq!(
            session
                .form()
                .confirmation
                .open_count()
                .expect("open count"),
            1
        );
    }

    #[test]
    fn invalid_submit_reports_the_failing_event() {
        let mut session = Session::new(offline_form(), Some(0));
        let err = session
            .run(&[FormEvent::Open, FormEvent::Submit])
            .expect_err("empty form");
        assert!(err.to_string().contains("event 1"));
        assert!(session.submitted().is_none());
    }
}
