use serde::{Deserialize, Serialize};

pub const RESET_MEMORY_PATH: &str = "/reset_memory";
pub const LIST_COMPANIES_PATH: &str = "/generate_initial_list";
pub const INVESTIGATE_COMPANY_PATH: &str = "/investigate_company";
pub const GENERATE_CONTENT_PATH: &str = "/generate_content";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyListResponse {
    /// Each entry is `"<name>||<extra>"`.
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestigateRequest {
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigateResponse {
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub company: String,
    pub connection_details: String,
    pub research: String,
    pub market: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_uses_camel_case_connection_details() {
        let request = GenerateContentRequest {
            company: "Globex".into(),
            connection_details: "details".into(),
            research: "r".into(),
            market: "m".into(),
            language: "l".into(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["connectionDetails"], "details");
        assert!(value.get("connection_details").is_none());
    }
}
