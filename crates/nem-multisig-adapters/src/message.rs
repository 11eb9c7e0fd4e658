use std::sync::{Arc, Mutex};

use tracing::info;

use nem_multisig_core::{MessagePort, PortError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownMessage {
    pub title: String,
    pub body: String,
}

/// Logs messages and keeps them for the host to display.
#[derive(Debug, Clone, Default)]
pub struct MessageAdapter {
    shown: Arc<Mutex<Vec<ShownMessage>>>,
}

impl MessageAdapter {
    pub fn shown(&self) -> Result<Vec<ShownMessage>, PortError> {
        let g = self
            .shown
            .lock()
            .map_err(|e| PortError::Transport(format!("message lock poisoned: {e}")))?;
        Ok(g.clone())
    }
}

impl MessagePort for MessageAdapter {
    fn show_message(&self, title: &str, body: &str) -> Result<(), PortError> {
        info!(title, body, "message");
        let mut g = self
            .shown
            .lock()
            .map_err(|e| PortError::Transport(format!("message lock poisoned: {e}")))?;
        g.push(ShownMessage {
            title: title.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}
