//! Backend operations consumed by the workflow, and their HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::protocol::{
    CompanyListResponse, GenerateContentRequest, GenerateContentResponse, InvestigateRequest,
    InvestigateResponse, GENERATE_CONTENT_PATH, INVESTIGATE_COMPANY_PATH, LIST_COMPANIES_PATH,
    RESET_MEMORY_PATH,
};
use tracing::debug;
use url::Url;

use crate::error::BackendError;

#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn reset_memory(&self) -> Result<(), BackendError>;
    /// Raw `"<name>||<extra>"` entries, in backend order.
    async fn list_companies(&self) -> Result<Vec<String>, BackendError>;
    async fn investigate_company(&self, company: &str) -> Result<String, BackendError>;
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, BackendError>;
}

pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let parsed = Url::parse(base_url).map_err(|source| BackendError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(BackendError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_empty(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<Response, BackendError> {
        debug!(operation, "sending backend request");
        let res = self
            .http
            .post(self.endpoint(path))
            .send()
            .await
            .map_err(|source| BackendError::Transport { operation, source })?;
        check_status(operation, res)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<Response, BackendError> {
        debug!(operation, "sending backend request");
        let res = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|source| BackendError::Transport { operation, source })?;
        check_status(operation, res)
    }
}

fn check_status(operation: &'static str, res: Response) -> Result<Response, BackendError> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        Err(BackendError::Status { operation, status })
    }
}

async fn decode<T: DeserializeOwned>(
    operation: &'static str,
    res: Response,
) -> Result<T, BackendError> {
    res.json::<T>()
        .await
        .map_err(|source| BackendError::Decode { operation, source })
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn reset_memory(&self) -> Result<(), BackendError> {
        // Body is ignored.
        self.post_empty("reset_memory", RESET_MEMORY_PATH).await?;
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<String>, BackendError> {
        const OPERATION: &str = "generate_initial_list";
        let res = self.post_empty(OPERATION, LIST_COMPANIES_PATH).await?;
        let body: CompanyListResponse = decode(OPERATION, res).await?;
        Ok(body.companies)
    }

    async fn investigate_company(&self, company: &str) -> Result<String, BackendError> {
        const OPERATION: &str = "investigate_company";
        let request = InvestigateRequest {
            company: company.to_string(),
        };
        let res = self
            .post_json(OPERATION, INVESTIGATE_COMPANY_PATH, &request)
            .await?;
        let body: InvestigateResponse = decode(OPERATION, res).await?;
        Ok(body.details)
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, BackendError> {
        const OPERATION: &str = "generate_content";
        let res = self
            .post_json(OPERATION, GENERATE_CONTENT_PATH, request)
            .await?;
        let body: GenerateContentResponse = decode(OPERATION, res).await?;
        Ok(body.content)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
