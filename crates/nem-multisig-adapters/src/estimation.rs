use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use nem_multisig_core::{EstimationPort, FeeQuote, FeeTicket, PortError, ValidateRequest};

use crate::AdapterConfig;

/// Fee estimation against the NCC `validate` endpoint.
///
/// Submissions never block: in HTTP mode the request runs on its own thread
/// and its outcome is parked until the host calls `drain_completed`. In
/// manual mode nothing is sent: submissions are recorded for `submitted` and
/// outcomes are supplied with `resolve`.
#[derive(Debug, Clone)]
pub struct EstimationAdapter {
    mode: EstimationMode,
    inner: Arc<Mutex<EstimationState>>,
}

#[derive(Debug, Clone)]
enum EstimationMode {
    Manual,
    Http(HttpRuntime),
}

#[derive(Debug, Clone)]
struct HttpRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedEstimate {
    pub ticket: FeeTicket,
    pub endpoint: String,
    pub request: ValidateRequest,
    pub silent: bool,
}

#[derive(Debug)]
pub struct CompletedEstimate {
    pub ticket: FeeTicket,
    pub outcome: Result<FeeQuote, PortError>,
}

#[derive(Debug, Default)]
struct EstimationState {
    submitted: Vec<SubmittedEstimate>,
    completed: Vec<CompletedEstimate>,
}

impl Default for EstimationAdapter {
    fn default() -> Self {
        Self::manual()
    }
}

impl EstimationAdapter {
    pub fn manual() -> Self {
        Self {
            mode: EstimationMode::Manual,
            inner: Arc::default(),
        }
    }

    pub fn with_config(config: &AdapterConfig) -> Result<Self, PortError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| PortError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            mode: EstimationMode::Http(HttpRuntime {
                base_url: config.ncc_base_url.trim_end_matches('/').to_owned(),
                client,
            }),
            inner: Arc::default(),
        })
    }

    /// Submissions seen in manual mode. Always empty in HTTP mode.
    pub fn submitted(&self) -> Result<Vec<SubmittedEstimate>, PortError> {
        let g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("estimation lock poisoned: {e}")))?;
        Ok(g.submitted.clone())
    }

    pub fn last_submitted(&self) -> Result<Option<SubmittedEstimate>, PortError> {
        Ok(self.submitted()?.pop())
    }

    /// Parks an outcome as if the remote call had finished.
    pub fn resolve(
        &self,
        ticket: FeeTicket,
        outcome: Result<FeeQuote, PortError>,
    ) -> Result<(), PortError> {
        push_completed(&self.inner, CompletedEstimate { ticket, outcome })
    }

    pub fn drain_completed(&self) -> Result<Vec<CompletedEstimate>, PortError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|e| PortError::Transport(format!("estimation lock poisoned: {e}")))?;
        Ok(std::mem::take(&mut g.completed))
    }
}

impl EstimationPort for EstimationAdapter {
    fn submit(
        &self,
        ticket: FeeTicket,
        endpoint: &str,
        request: &ValidateRequest,
        silent: bool,
    ) -> Result<(), PortError> {
        let runtime = match &self.mode {
            EstimationMode::Manual => {
                let mut g = self
                    .inner
                    .lock()
                    .map_err(|e| PortError::Transport(format!("estimation lock poisoned: {e}")))?;
                g.submitted.push(SubmittedEstimate {
                    ticket,
                    endpoint: endpoint.to_owned(),
                    request: request.clone(),
                    silent,
                });
                return Ok(());
            }
            EstimationMode::Http(runtime) => runtime,
        };
        let url = format!("{}/{}", runtime.base_url, endpoint.trim_start_matches('/'));
        let client = runtime.client.clone();
        let body = request.clone();
        let inner = Arc::clone(&self.inner);
        std::thread::spawn(move || {
            let outcome = post_validate(&client, &url, &body);
            if let Err(e) = &outcome {
                if silent {
                    debug!(%url, error = %e, "fee estimate request failed");
                } else {
                    warn!(%url, error = %e, "fee estimate request failed");
                }
            }
            if let Err(e) = push_completed(&inner, CompletedEstimate { ticket, outcome }) {
                warn!(error = %e, "fee estimate outcome dropped");
            }
        });
        Ok(())
    }
}

fn post_validate(
    client: &reqwest::blocking::Client,
    url: &str,
    request: &ValidateRequest,
) -> Result<FeeQuote, PortError> {
    let response = client
        .post(url)
        .json(request)
        .send()
        .map_err(|e| PortError::Transport(format!("validate request failed: {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(PortError::Transport(format!(
            "validate request returned {status}"
        )));
    }
    response
        .json::<FeeQuote>()
        .map_err(|e| PortError::Validation(format!("invalid validate response: {e}")))
}

fn push_completed(
    inner: &Arc<Mutex<EstimationState>>,
    completed: CompletedEstimate,
) -> Result<(), PortError> {
    let mut g = inner
        .lock()
        .map_err(|e| PortError::Transport(format!("estimation lock poisoned: {e}")))?;
    g.completed.push(completed);
    Ok(())
}
