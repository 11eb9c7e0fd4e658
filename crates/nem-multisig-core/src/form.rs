use std::collections::HashSet;

use tracing::{debug, info, trace, warn};

use crate::builder::modification_request;
use crate::config::FormConfig;
use crate::domain::{CandidateAccount, CosignatoryEntry, FeeQuote, FeeTicket, ModificationRequest};
use crate::error::FormError;
use crate::fee::{validate_request, Debouncer, FeeTickets};
use crate::format::{format_address, restore_address, AmountFormat, Separators};
use crate::ports::{
    AutocompletePort, ClockPort, ConfirmationPayload, ConfirmationPort, EstimationPort,
    MessagePort, PortError, WalletPort,
};
use crate::state::{Field, FormState};
use crate::validation::{check_cosignatories, min_cosignatory_flags};

const ENTER_KEY: u32 = 13;

/// The convert/modify multisig form.
///
/// Owns the form state and its collaborators. Every public mutator writes a
/// field and then runs the observers of that field synchronously, so the
/// state is consistent again when the call returns.
pub struct ModificationForm<W, E, C, M, A, K>
where
    W: WalletPort,
    E: EstimationPort,
    C: ConfirmationPort,
    M: MessagePort,
    A: AutocompletePort,
    K: ClockPort,
{
    pub wallet: W,
    pub estimation: E,
    pub confirmation: C,
    pub messages: M,
    pub autocomplete: A,
    pub clock: K,
    config: FormConfig,
    amounts: AmountFormat,
    state: FormState,
    debounce: Debouncer,
    tickets: FeeTickets,
    alive: bool,
    running: HashSet<Field>,
}

impl<W, E, C, M, A, K> ModificationForm<W, E, C, M, A, K>
where
    W: WalletPort,
    E: EstimationPort,
    C: ConfirmationPort,
    M: MessagePort,
    A: AutocompletePort,
    K: ClockPort,
{
    pub fn new(
        wallet: W,
        estimation: E,
        confirmation: C,
        messages: M,
        autocomplete: A,
        clock: K,
        config: FormConfig,
    ) -> Self {
        Self {
            wallet,
            estimation,
            confirmation,
            messages,
            autocomplete,
            clock,
            amounts: AmountFormat::new(config.separators),
            debounce: Debouncer::new(config.fee_debounce_ms),
            config,
            state: FormState::default(),
            tickets: FeeTickets::default(),
            alive: false,
            running: HashSet::new(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.alive
    }

    pub fn fee_ticket_session(&self) -> u64 {
        self.tickets.session()
    }

    pub fn fee_refresh_pending(&self) -> bool {
        self.debounce.deadline().is_some()
    }

    pub fn formatted_minimum_fee(&self) -> String {
        self.amounts.format(self.state.minimum_fee)
    }

    // Lifecycle

    pub fn open(&mut self) -> Result<(), FormError> {
        self.tickets.new_session();
        self.debounce.cancel();
        self.alive = true;
        debug!(session = self.tickets.session(), "multisig form opened");
        self.reset_default_data()
    }

    /// Resets the form and drops anything still in flight. Responses to fee
    /// estimates dispatched before this call are ignored.
    pub fn close(&mut self) -> Result<(), FormError> {
        self.alive = false;
        self.tickets.new_session();
        self.reset_default_data()?;
        self.debounce.cancel();
        debug!(session = self.tickets.session(), "multisig form closed");
        Ok(())
    }

    pub fn reset_default_data(&mut self) -> Result<(), FormError> {
        let active = self.wallet.active_account()?;
        let mut candidates: Vec<CandidateAccount> = self
            .wallet
            .all_accounts()?
            .into_iter()
            .filter(|a| !a.is_multisig)
            .collect();
        for address in &active.multisig_accounts {
            if let Some(mut account) = self.wallet.multisig_account(address)? {
                account.is_multisig = true;
                candidates.push(account);
            }
        }
        self.state.all_accounts = candidates;
        self.reset_cosignatories()?;

        self.state.cosignatories_valid = false;
        self.state.warning_shown = false;
        self.set_multisig_account("")?;
        self.set_fee(0)?;
        self.write_minimum_fee(0)?;
        self.set_due_by(self.config.default_due_by.clone());
        self.set_password("")?;
        self.set_use_minimum_fee(true)?;
        self.set_use_default_min_cosignatories(true)?;
        let len = self.state.cosignatories.len();
        self.write_min_cosignatories(Some(len.to_string()))?;

        self.state.fee_changed = false;
        self.state.password_changed = true;
        self.reset_fee(true)
    }

    // Field writes

    pub fn set_multisig_account(&mut self, address: &str) -> Result<(), FormError> {
        let address = address.trim();
        if self.state.multisig_account == address {
            return Ok(());
        }
        self.state.multisig_account = address.to_owned();
        self.notify(Field::MultisigAccount)
    }

    /// Ignored while the threshold follows the list length.
    pub fn set_min_cosignatories(&mut self, raw: Option<&str>) -> Result<(), FormError> {
        if self.state.use_default_min_cosignatories {
            debug!("min cosignatories follows list length; edit ignored");
            return Ok(());
        }
        self.write_min_cosignatories(raw.map(str::to_owned))
    }

    pub fn set_use_default_min_cosignatories(&mut self, on: bool) -> Result<(), FormError> {
        if self.state.use_default_min_cosignatories == on {
            return Ok(());
        }
        self.state.use_default_min_cosignatories = on;
        self.notify(Field::UseDefaultMinCosignatories)
    }

    pub fn set_due_by(&mut self, due_by: impl Into<String>) {
        self.state.due_by = due_by.into();
    }

    /// Writes the fee display buffer. Dependents re-run even when the
    /// canonical amount does not change.
    pub fn set_formatted_fee(&mut self, display: impl Into<String>) -> Result<(), FormError> {
        let display = display.into();
        self.state.fee = self.amounts.parse(&display).unwrap_or(0);
        self.state.formatted_fee = display;
        self.notify(Field::Fee)
    }

    pub fn set_fee(&mut self, micro: u64) -> Result<(), FormError> {
        self.state.formatted_fee = self.amounts.format(micro);
        self.state.fee = micro;
        self.notify(Field::Fee)
    }

    pub fn set_use_minimum_fee(&mut self, on: bool) -> Result<(), FormError> {
        if self.state.use_minimum_fee == on {
            return Ok(());
        }
        self.state.use_minimum_fee = on;
        self.notify(Field::UseMinimumFee)
    }

    pub fn set_password(&mut self, password: &str) -> Result<(), FormError> {
        if self.state.password == password {
            return Ok(());
        }
        self.state.password = password.to_owned();
        self.notify(Field::Password)
    }

    /// Re-expresses the fee display buffer under new locale separators. The
    /// canonical fee is untouched.
    pub fn on_separators_changed(&mut self, separators: Separators) {
        let previous = self.amounts.separators();
        if previous == separators {
            return;
        }
        self.state.formatted_fee =
            AmountFormat::reformat(&self.state.formatted_fee, previous, separators);
        self.amounts.set_separators(separators);
    }

    fn write_min_cosignatories(&mut self, raw: Option<String>) -> Result<(), FormError> {
        if self.state.min_cosignatories == raw {
            return Ok(());
        }
        self.state.min_cosignatories = raw;
        self.notify(Field::MinCosignatories)
    }

    fn write_minimum_fee(&mut self, micro: u64) -> Result<(), FormError> {
        if self.state.minimum_fee == micro {
            return Ok(());
        }
        self.state.minimum_fee = micro;
        self.notify(Field::MinimumFee)
    }

    // Cosignatory list

    pub fn add_cosignatory(&mut self) -> Result<(), FormError> {
        self.state.cosignatories.push(CosignatoryEntry::blank());
        self.notify(Field::Cosignatories)?;
        let row = self.state.cosignatories.len() - 1;
        if let Err(e) = self.autocomplete.attach(row) {
            warn!(row, error = %e, "address autocomplete could not be attached");
        }
        self.reset_min_cosignatories()
    }

    pub fn remove_cosignatory(&mut self, index: usize) -> Result<(), FormError> {
        if !self.row(index)?.can_remove_row {
            return Err(FormError::RowNotRemovable(index));
        }
        self.state.cosignatories.remove(index);
        self.notify(Field::Cosignatories)?;
        self.reset_min_cosignatories()
    }

    /// Toggles removal of an existing cosignatory. The row stays in the list.
    pub fn delete_cosignatory(&mut self, index: usize) -> Result<(), FormError> {
        let entry = self.row_mut(index)?;
        if !entry.can_delete_cosig {
            return Err(FormError::RowNotDeletable(index));
        }
        entry.deleted = !entry.deleted;
        self.notify(Field::Cosignatories)
    }

    pub fn set_cosignatory_address(
        &mut self,
        index: usize,
        formatted: impl Into<String>,
    ) -> Result<(), FormError> {
        let entry = self.row_mut(index)?;
        if entry.read_only {
            return Err(FormError::RowReadOnly(index));
        }
        entry.formatted_address = formatted.into();
        self.notify(Field::Cosignatories)
    }

    pub fn reset_cosignatories(&mut self) -> Result<(), FormError> {
        let seeded: Vec<CosignatoryEntry> = match self.state.candidate(&self.state.multisig_account)
        {
            Some(account) if account.is_multisig => account
                .cosignatories
                .iter()
                .map(|a| CosignatoryEntry::existing(format_address(a)))
                .collect(),
            _ => {
                let active = self.wallet.active_account()?;
                vec![CosignatoryEntry::signer(format_address(&active.address))]
            }
        };
        self.state.cosignatories = seeded;
        self.notify(Field::Cosignatories)?;
        self.add_cosignatory()
    }

    pub fn reset_min_cosignatories(&mut self) -> Result<(), FormError> {
        if !self.state.use_default_min_cosignatories {
            return Ok(());
        }
        let len = self.state.cosignatories.len();
        self.write_min_cosignatories(Some(len.to_string()))
    }

    fn row(&self, index: usize) -> Result<&CosignatoryEntry, FormError> {
        let len = self.state.cosignatories.len();
        self.state
            .cosignatories
            .get(index)
            .ok_or(FormError::IndexOutOfRange { index, len })
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut CosignatoryEntry, FormError> {
        let len = self.state.cosignatories.len();
        self.state
            .cosignatories
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange { index, len })
    }

    // Validation

    pub fn do_cosignatory_check(&mut self) {
        let check = check_cosignatories(
            &mut self.state.cosignatories,
            &self.state.multisig_account,
            self.config.address_length,
        );
        self.state.cosignatories_valid = check.valid;
        if check.self_reference && !self.state.warning_shown {
            info!(
                account = %self.state.multisig_account,
                "multisig account listed as its own cosignatory"
            );
            if let Err(e) = self.messages.show_message(
                &self.config.self_reference_title,
                &self.config.self_reference_warning,
            ) {
                warn!(error = %e, "self-reference warning could not be shown");
            }
            self.state.warning_shown = true;
        }
    }

    fn refresh_min_cosignatory_flags(&mut self) {
        let flags = min_cosignatory_flags(
            self.state.min_cosignatories.as_deref(),
            self.state.cosignatories.len(),
        );
        self.state.min_cosignatories_zero = flags.zero;
        self.state.min_cosignatories_overflow = flags.overflow;
    }

    // Fee estimation

    /// Fires the debounced fee refresh once its deadline has passed. Returns
    /// whether a refresh was dispatched.
    pub fn tick(&mut self) -> Result<bool, FormError> {
        if !self.alive {
            return Ok(false);
        }
        let now = self.clock.now_ms()?;
        if !self.debounce.fire_if_due(now) {
            return Ok(false);
        }
        self.reset_fee(true)?;
        Ok(true)
    }

    pub fn reset_fee(&mut self, silent: bool) -> Result<(), FormError> {
        if !self.alive {
            debug!("form closed; fee refresh skipped");
            return Ok(());
        }
        let wallet = self.wallet.wallet_name()?;
        let active = self.wallet.active_account()?.address;
        let request = validate_request(wallet, active, &self.state);
        let ticket = self.tickets.issue();
        debug!(
            session = ticket.session,
            seq = ticket.seq,
            cosignatories = request.cosignatories.len(),
            "dispatching fee estimate"
        );
        if let Err(e) =
            self.estimation
                .submit(ticket, &self.config.estimate_endpoint, &request, silent)
        {
            report_fee_failure(&e, silent);
        }
        Ok(())
    }

    /// Applies the outcome of an earlier `reset_fee`. Returns whether the
    /// minimum fee was updated.
    pub fn apply_fee_estimate(
        &mut self,
        ticket: FeeTicket,
        outcome: Result<FeeQuote, PortError>,
    ) -> Result<bool, FormError> {
        if !self.alive {
            debug!(?ticket, "fee estimate arrived after close; ignored");
            return Ok(false);
        }
        if !self.tickets.accept(ticket) {
            debug!(?ticket, "stale fee estimate ignored");
            return Ok(false);
        }
        match outcome {
            Ok(quote) => {
                self.write_minimum_fee(quote.fee)?;
                Ok(true)
            }
            Err(e) => {
                report_fee_failure(&e, true);
                Ok(false)
            }
        }
    }

    fn schedule_fee_refresh(&mut self) -> Result<(), FormError> {
        let now = self.clock.now_ms()?;
        self.debounce.schedule(now);
        Ok(())
    }

    // Submit

    pub fn send_transaction(&mut self) -> Result<ModificationRequest, FormError> {
        if !self.alive {
            return Err(FormError::Closed);
        }
        if !self.state.form_valid() {
            return Err(FormError::FormInvalid);
        }
        let wallet = self.wallet.wallet_name()?;
        let request = modification_request(wallet, &self.state);
        info!(
            account = %request.account,
            cosignatories = request.cosignatories.len(),
            relative_change = request.min_cosignatories.relative_change,
            "presenting multisig modification for confirmation"
        );
        self.confirmation.present(ConfirmationPayload {
            tx_data: self.state.snapshot(),
            request_data: request.clone(),
        })?;
        self.confirmation.open()?;
        Ok(request)
    }

    /// Enter submits a valid form; anything else is ignored.
    pub fn submit_on_enter(
        &mut self,
        key_code: u32,
    ) -> Result<Option<ModificationRequest>, FormError> {
        if key_code != ENTER_KEY || !self.state.form_valid() {
            return Ok(None);
        }
        self.send_transaction().map(Some)
    }

    // Observers

    fn notify(&mut self, field: Field) -> Result<(), FormError> {
        if !self.running.insert(field) {
            trace!(?field, "observer already running");
            return Ok(());
        }
        let result = self.observe(field);
        self.running.remove(&field);
        result
    }

    fn observe(&mut self, field: Field) -> Result<(), FormError> {
        match field {
            Field::Cosignatories => {
                for entry in &mut self.state.cosignatories {
                    entry.address = restore_address(&entry.formatted_address);
                }
                self.schedule_fee_refresh()?;
                self.do_cosignatory_check();
                self.refresh_min_cosignatory_flags();
            }
            Field::MinCosignatories => self.refresh_min_cosignatory_flags(),
            Field::UseDefaultMinCosignatories => self.reset_min_cosignatories()?,
            Field::UseMinimumFee | Field::MinimumFee => {
                if self.state.use_minimum_fee {
                    self.set_fee(self.state.minimum_fee)?;
                }
            }
            Field::Fee => self.state.fee_changed = true,
            Field::Password => self.state.password_changed = true,
            Field::MultisigAccount => {
                self.reset_cosignatories()?;
                self.do_cosignatory_check();
            }
        }
        Ok(())
    }
}

fn report_fee_failure(error: &PortError, silent: bool) {
    if silent {
        debug!(error = %error, "fee estimate failed; minimum fee unchanged");
    } else {
        warn!(error = %error, "fee estimate failed; minimum fee unchanged");
    }
}
