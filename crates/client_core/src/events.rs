//! Failure modeling for workflow actions: what went wrong and during which step.

use crate::error::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// Required input missing; no request was sent.
    Validation,
    /// Request never produced a usable response (network or non-2xx).
    Transport,
    /// Response arrived but did not have the expected shape.
    Decode,
    /// Company search succeeded with nothing new to offer.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    ResetMemory,
    FindCompanies,
    Investigate,
    GenerateContent,
}

impl UiErrorContext {
    pub fn as_str(self) -> &'static str {
        match self {
            UiErrorContext::ResetMemory => "reset_memory",
            UiErrorContext::FindCompanies => "find_companies",
            UiErrorContext::Investigate => "investigate_company",
            UiErrorContext::GenerateContent => "generate_content",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_backend(context: UiErrorContext, err: &BackendError) -> Self {
        let category = match err {
            BackendError::Decode { .. } => UiErrorCategory::Decode,
            BackendError::Transport { source, .. } if source.is_decode() => {
                UiErrorCategory::Decode
            }
            _ => UiErrorCategory::Transport,
        };
        Self::new(category, context, err.to_string())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Writes the diagnostic to the log sink. Empty results are expected
    /// outcomes and stay below error level.
    pub fn log(&self) {
        match self.category {
            UiErrorCategory::Transport | UiErrorCategory::Decode => tracing::error!(
                operation = self.context.as_str(),
                category = ?self.category,
                error = %self.message,
                "workflow action failed"
            ),
            UiErrorCategory::Validation | UiErrorCategory::Empty => tracing::info!(
                operation = self.context.as_str(),
                category = ?self.category,
                reason = %self.message,
                "workflow action stopped"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_failures_are_transport_errors_for_their_step() {
        let err = BackendError::Status {
            operation: "investigate_company",
            status: StatusCode::SERVICE_UNAVAILABLE,
        };

        let ui_error = UiError::from_backend(UiErrorContext::Investigate, &err);

        assert_eq!(ui_error.category(), UiErrorCategory::Transport);
        assert_eq!(ui_error.context(), UiErrorContext::Investigate);
        assert_eq!(
            ui_error.message(),
            "investigate_company returned status 503 Service Unavailable"
        );
    }

    #[test]
    fn empty_search_keeps_its_own_category() {
        let ui_error = UiError::new(
            UiErrorCategory::Empty,
            UiErrorContext::FindCompanies,
            "backend returned no new companies",
        );

        assert_eq!(ui_error.category(), UiErrorCategory::Empty);
        assert_eq!(ui_error.context().as_str(), "find_companies");
        assert_eq!(ui_error.message(), "backend returned no new companies");
    }
}
