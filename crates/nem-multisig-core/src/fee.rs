use crate::domain::{
    CosignatoryRef, FeeTicket, MinCosignatoriesModification, TimestampMs, ValidateRequest,
};
use crate::state::FormState;

/// Single restartable deadline. Scheduling again replaces the pending
/// deadline, so a burst of changes fires once, `delay_ms` after the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    deadline: Option<TimestampMs>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now_ms: u64) {
        self.deadline = Some(TimestampMs(now_ms.saturating_add(self.delay_ms)));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<TimestampMs> {
        self.deadline
    }

    /// Clears and reports the deadline once `now_ms` has reached it.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline.0 => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Issues fee tickets and decides which responses may still be applied.
#[derive(Debug, Clone, Default)]
pub struct FeeTickets {
    session: u64,
    next_seq: u64,
    last_applied: Option<u64>,
}

impl FeeTickets {
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Invalidates every ticket issued so far.
    pub fn new_session(&mut self) {
        self.session = self.session.saturating_add(1);
        self.next_seq = 0;
        self.last_applied = None;
    }

    pub fn issue(&mut self) -> FeeTicket {
        let ticket = FeeTicket {
            session: self.session,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.saturating_add(1);
        ticket
    }

    /// Accepts a response from the current session that is newer than the
    /// last one applied.
    pub fn accept(&mut self, ticket: FeeTicket) -> bool {
        if ticket.session != self.session {
            return false;
        }
        if self.last_applied.is_some_and(|last| ticket.seq <= last) {
            return false;
        }
        self.last_applied = Some(ticket.seq);
        true
    }
}

/// Fee validation request. `active_account` goes out as `multisig`; NCC
/// checks the modification against the wallet's active account.
pub fn validate_request(
    wallet: String,
    active_account: String,
    state: &FormState,
) -> ValidateRequest {
    ValidateRequest {
        wallet,
        multisig: active_account,
        cosignatories: state
            .cosignatories
            .iter()
            .filter(|e| !e.is_blank())
            .map(|e| CosignatoryRef {
                address: e.address.clone(),
            })
            .collect(),
        min_cosignatories: MinCosignatoriesModification {
            relative_change: state.min_cosignatories_number(),
        },
        hours_due: state.hours_due(),
    }
}
