use std::sync::{Arc, Mutex};

use nem_multisig_core::{ConfirmationPayload, ConfirmationPort, PortError};

/// Stands in for the confirmation dialog: keeps the last payload and counts
/// how often it was opened.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationAdapter {
    inner: Arc<Mutex<ConfirmationState>>,
}

#[derive(Debug, Default)]
struct ConfirmationState {
    payload: Option<ConfirmationPayload>,
    open_count: u32,
}

impl ConfirmationAdapter {
    pub fn payload(&self) -> Result<Option<ConfirmationPayload>, PortError> {
        let g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("confirmation lock poisoned: {e}")))?;
        Ok(g.payload.clone())
    }

    pub fn open_count(&self) -> Result<u32, PortError> {
        let g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("confirmation lock poisoned: {e}")))?;
        Ok(g.open_count)
    }
}

impl ConfirmationPort for ConfirmationAdapter {
    fn present(&self, payload: ConfirmationPayload) -> Result<(), PortError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("confirmation lock poisoned: {e}")))?;
        g.payload = Some(payload);
        Ok(())
    }

    fn open(&self) -> Result<(), PortError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("confirmation lock poisoned: {e}")))?;
        if g.payload.is_none() {
            return Err(PortError::Validation(
                "confirmation opened without a payload".to_owned(),
            ));
        }
        g.open_count = g.open_count.saturating_add(1);
        Ok(())
    }
}
