use std::sync::Arc;

use shared::{
    domain::{
        BusyIndicator, CompanyIndex, CompanyRecord, ContentInputs, Control, Panel, TextSlot,
    },
    protocol::GenerateContentRequest,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

mod cache;
pub mod error;
pub mod events;
pub mod surface;
pub mod transport;

pub use cache::CompanyCache;
pub use error::BackendError;
pub use events::{UiError, UiErrorCategory, UiErrorContext};
pub use surface::UiSurface;
pub use transport::{BackendApi, HttpBackend};

pub const RESET_CONFIRM_PROMPT: &str =
    "Are you sure you want to reset the list of researched companies?";
pub const RESET_SUCCEEDED: &str =
    "Memory reset successfully. The next search will include all companies again.";
pub const RESET_FAILED: &str = "Failed to reset memory. Check server logs.";
pub const FIND_IDLE_LABEL: &str = "Find New Companies";
pub const FIND_BUSY_LABEL: &str = "Finding...";
pub const NO_COMPANIES_FOUND: &str =
    "Could not find any new companies. Please try resetting the memory.";
pub const FIND_FAILED: &str = "Error finding companies. Check the server logs.";
pub const INVESTIGATION_FAILED: &str = "Error during investigation. Check server logs.";
pub const MISSING_FIELDS: &str = "Please fill out all fields before generating content.";
pub const GENERATION_FAILED: &str = "Error generating content. Check server logs.";

const STEP_PANELS: [Panel; 4] = [Panel::Step2b, Panel::Step2, Panel::Step3, Panel::Step4];
const POST_INVESTIGATION_PANELS: [Panel; 3] = [Panel::Step2, Panel::Step3, Panel::Step4];
const FIND_RESET_PANELS: [Panel; 6] = [
    Panel::Results,
    Panel::Step2,
    Panel::Step2b,
    Panel::Step3,
    Panel::Step4,
    Panel::CompanyList,
];

pub fn investigating_message(company: &str) -> String {
    format!("Investigating {company}...")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Reset,
    Find,
    Investigate,
    Generate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticket {
    kind: RequestKind,
    seq: u64,
}

/// Latest issued sequence number per action. A response is applied only
/// while its ticket is still the latest of its kind.
#[derive(Debug, Default)]
struct RequestTokens {
    reset: u64,
    find: u64,
    investigate: u64,
    generate: u64,
}

impl RequestTokens {
    fn slot(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Reset => &mut self.reset,
            RequestKind::Find => &mut self.find,
            RequestKind::Investigate => &mut self.investigate,
            RequestKind::Generate => &mut self.generate,
        }
    }

    fn issue(&mut self, kind: RequestKind) -> Ticket {
        let slot = self.slot(kind);
        *slot += 1;
        Ticket { kind, seq: *slot }
    }

    fn invalidate(&mut self, kind: RequestKind) {
        *self.slot(kind) += 1;
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        let latest = match ticket.kind {
            RequestKind::Reset => self.reset,
            RequestKind::Find => self.find,
            RequestKind::Investigate => self.investigate,
            RequestKind::Generate => self.generate,
        };
        latest == ticket.seq
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    cache: CompanyCache,
    selected: Option<CompanyIndex>,
    /// Mirror of the investigation-details slot, forwarded as connection context.
    investigation_text: String,
    tokens: RequestTokens,
}

/// Sequences the find → select → investigate → generate workflow against a
/// backend and drives a [`UiSurface`] from each outcome.
///
/// Actions take `&self` and may overlap. State is locked only around the
/// decision and rendering steps, never across a backend call.
pub struct WorkflowController {
    backend: Arc<dyn BackendApi>,
    ui: Arc<dyn UiSurface>,
    inner: Mutex<ControllerState>,
}

impl WorkflowController {
    pub fn new(backend: Arc<dyn BackendApi>, ui: Arc<dyn UiSurface>) -> Self {
        Self {
            backend,
            ui,
            inner: Mutex::new(ControllerState::default()),
        }
    }

    pub async fn reset_memory(&self) {
        if !self.ui.confirm(RESET_CONFIRM_PROMPT).await {
            debug!("memory reset declined");
            return;
        }

        let ticket = self.inner.lock().await.tokens.issue(RequestKind::Reset);
        let outcome = self.backend.reset_memory().await;

        let mut inner = self.inner.lock().await;
        if !inner.tokens.is_current(ticket) {
            debug!(seq = ticket.seq, "discarding stale reset response");
            return;
        }
        match outcome {
            Ok(()) => {
                inner.cache.clear();
                inner.selected = None;
                self.abandon_downstream(&mut inner);
                for panel in Panel::ALL {
                    self.ui.hide(panel.into());
                }
                info!("backend memory reset");
                self.ui.notify(RESET_SUCCEEDED);
            }
            Err(err) => {
                UiError::from_backend(UiErrorContext::ResetMemory, &err).log();
                self.ui.notify(RESET_FAILED);
            }
        }
    }

    pub async fn find_companies(&self) {
        let ticket = {
            let mut inner = self.inner.lock().await;
            for panel in FIND_RESET_PANELS {
                self.ui.hide(panel.into());
            }
            self.ui.set_enabled(Control::FindCompanies, false);
            self.ui.set_label(Control::FindCompanies, FIND_BUSY_LABEL);
            self.abandon_downstream(&mut inner);
            inner.tokens.issue(RequestKind::Find)
        };

        let outcome = self.backend.list_companies().await;

        let mut inner = self.inner.lock().await;
        if !inner.tokens.is_current(ticket) {
            debug!(seq = ticket.seq, "discarding stale company list");
            return;
        }
        match outcome {
            Ok(entries) => {
                // A selection made against the previous list may have
                // revealed steps while this request was in flight.
                self.abandon_downstream(&mut inner);
                for panel in FIND_RESET_PANELS {
                    self.ui.hide(panel.into());
                }
                let names = inner.cache.rebuild(entries);
                inner.selected = None;
                self.ui.set_company_options(&names);
                if names.is_empty() {
                    UiError::new(
                        UiErrorCategory::Empty,
                        UiErrorContext::FindCompanies,
                        "backend returned no new companies",
                    )
                    .log();
                    self.ui.notify(NO_COMPANIES_FOUND);
                } else {
                    info!(count = names.len(), "company list loaded");
                    self.ui.show(Panel::CompanyList.into());
                }
            }
            Err(err) => {
                UiError::from_backend(UiErrorContext::FindCompanies, &err).log();
                self.ui.notify(FIND_FAILED);
            }
        }
        self.ui.set_enabled(Control::FindCompanies, true);
        self.ui.set_label(Control::FindCompanies, FIND_IDLE_LABEL);
    }

    /// `None` is the placeholder entry and deselects.
    pub async fn on_company_selected(&self, selection: Option<CompanyIndex>) {
        let (ticket, company) = {
            let mut inner = self.inner.lock().await;
            let Some(index) = selection else {
                inner.selected = None;
                inner.tokens.invalidate(RequestKind::Investigate);
                self.ui.hide(BusyIndicator::Investigate.into());
                for panel in STEP_PANELS {
                    self.ui.hide(panel.into());
                }
                return;
            };
            let Some(company) = inner.cache.get(index).map(|r| r.name.clone()) else {
                warn!(index = index.0, "selection does not match a listed company");
                return;
            };

            inner.selected = Some(index);
            self.ui.show(Panel::Step2b.into());
            self.ui.show(BusyIndicator::Investigate.into());
            self.set_investigation_text(&mut inner, &investigating_message(&company));
            for panel in POST_INVESTIGATION_PANELS {
                self.ui.hide(panel.into());
            }
            (inner.tokens.issue(RequestKind::Investigate), company)
        };

        let outcome = self.backend.investigate_company(&company).await;

        let mut inner = self.inner.lock().await;
        if !inner.tokens.is_current(ticket) {
            debug!(company = %company, seq = ticket.seq, "discarding stale investigation");
            return;
        }
        match outcome {
            Ok(details) => {
                self.set_investigation_text(&mut inner, &details);
                for panel in POST_INVESTIGATION_PANELS {
                    self.ui.show(panel.into());
                }
                info!(company = %company, "investigation complete");
            }
            Err(err) => {
                UiError::from_backend(UiErrorContext::Investigate, &err).log();
                self.set_investigation_text(&mut inner, INVESTIGATION_FAILED);
            }
        }
        self.ui.hide(BusyIndicator::Investigate.into());
    }

    pub async fn generate_content(&self, inputs: &ContentInputs) {
        let (ticket, request) = {
            let mut inner = self.inner.lock().await;
            let company = inner
                .selected
                .and_then(|index| inner.cache.get(index))
                .map(|r| r.name.clone());
            let Some(company) = company.filter(|_| inputs.is_complete()) else {
                UiError::new(
                    UiErrorCategory::Validation,
                    UiErrorContext::GenerateContent,
                    "a company and all three text fields are required",
                )
                .log();
                self.ui.notify(MISSING_FIELDS);
                return;
            };

            let request = GenerateContentRequest {
                company,
                connection_details: inner.investigation_text.clone(),
                research: inputs.research.clone(),
                market: inputs.market.clone(),
                language: inputs.language.clone(),
            };
            self.ui.show(Panel::Results.into());
            self.ui.set_text(TextSlot::ResultsOutput, "");
            self.ui.show(BusyIndicator::Generate.into());
            self.ui.set_enabled(Control::GenerateContent, false);
            (inner.tokens.issue(RequestKind::Generate), request)
        };

        let outcome = self.backend.generate_content(&request).await;

        let inner = self.inner.lock().await;
        if !inner.tokens.is_current(ticket) {
            debug!(company = %request.company, seq = ticket.seq, "discarding stale content");
            return;
        }
        match outcome {
            Ok(content) => {
                self.ui.set_text(TextSlot::ResultsOutput, &content);
                info!(company = %request.company, "content generated");
            }
            Err(err) => {
                UiError::from_backend(UiErrorContext::GenerateContent, &err).log();
                self.ui.set_text(TextSlot::ResultsOutput, GENERATION_FAILED);
            }
        }
        self.ui.hide(BusyIndicator::Generate.into());
        self.ui.set_enabled(Control::GenerateContent, true);
    }

    pub async fn companies(&self) -> Vec<(CompanyIndex, CompanyRecord)> {
        let inner = self.inner.lock().await;
        inner
            .cache
            .iter()
            .map(|(index, record)| (index, record.clone()))
            .collect()
    }

    pub async fn selected_company(&self) -> Option<(CompanyIndex, CompanyRecord)> {
        let inner = self.inner.lock().await;
        let index = inner.selected?;
        inner.cache.get(index).map(|record| (index, record.clone()))
    }

    pub async fn investigation_text(&self) -> String {
        self.inner.lock().await.investigation_text.clone()
    }

    fn set_investigation_text(&self, inner: &mut ControllerState, text: &str) {
        inner.investigation_text = text.to_string();
        self.ui.set_text(TextSlot::InvestigationDetails, text);
    }

    /// Drops any in-flight investigation or generation and releases the busy
    /// state they would otherwise have released on completion.
    fn abandon_downstream(&self, inner: &mut ControllerState) {
        inner.tokens.invalidate(RequestKind::Investigate);
        inner.tokens.invalidate(RequestKind::Generate);
        self.ui.hide(BusyIndicator::Investigate.into());
        self.ui.hide(BusyIndicator::Generate.into());
        self.ui.set_enabled(Control::GenerateContent, true);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
