//! Endpoint definitions
//!
//! Each endpoint is plain data: a path template, a method and static
//! headers. Built-in endpoints cover the problem API; settings can add more
//! or replace them by name.

use crate::error::{Error, Result};
use crate::http::ApiRequest;
use crate::template::{self, TemplateVars};
use crate::types::{JsonValue, Method, StringMap};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Name of the endpoint listing problems
pub const LIST_PROBLEMS: &str = "list_problems";
/// Name of the endpoint fetching one problem
pub const PROBLEM_DETAILS: &str = "problem_details";
/// Name of the endpoint updating one problem
pub const UPDATE_PROBLEM: &str = "update_problem";

/// Definition of one API endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Path template, e.g. `/api/v2/problem/{{ problem_id }}`
    pub path: String,
    /// HTTP method
    #[serde(default)]
    pub method: Method,
    /// Headers sent with every request to this endpoint
    #[serde(default)]
    pub headers: StringMap,
}

impl EndpointConfig {
    /// Create an endpoint definition
    pub fn new(path: impl Into<String>, method: Method) -> Self {
        Self {
            path: path.into(),
            method,
            headers: StringMap::new(),
        }
    }

    /// Add a static header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// JSON API endpoint (sends `Content-Type: application/json`)
    fn json_api(path: &str, method: Method) -> Self {
        Self::new(path, method).header("Content-Type", "application/json")
    }

    /// Template variables the path needs
    pub fn variables(&self) -> Vec<String> {
        template::placeholders(&self.path)
    }

    /// Build a request, filling the path template from `vars`
    pub fn request(&self, vars: &TemplateVars, body: Option<JsonValue>) -> Result<ApiRequest> {
        let path = template::render(&self.path, vars)?;
        let mut request = ApiRequest::new(path, self.method);
        request.headers.clone_from(&self.headers);
        if let Some(body) = body {
            request.body = body;
        }
        Ok(request)
    }
}

/// Named endpoint definitions
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRegistry {
    endpoints: BTreeMap<String, EndpointConfig>,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EndpointRegistry {
    /// Registry with only the built-in endpoints
    pub fn builtin() -> Self {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            LIST_PROBLEMS.to_string(),
            EndpointConfig::json_api("/api/v2/problems", Method::GET),
        );
        endpoints.insert(
            PROBLEM_DETAILS.to_string(),
            EndpointConfig::json_api("/api/v2/problem/{{ problem_id }}", Method::GET),
        );
        endpoints.insert(
            UPDATE_PROBLEM.to_string(),
            EndpointConfig::json_api("/api/v2/problem/{{ problem_id }}", Method::PUT),
        );
        Self { endpoints }
    }

    /// Built-in endpoints plus `overrides`, which win on name clashes
    pub fn with_overrides(overrides: &HashMap<String, EndpointConfig>) -> Self {
        let mut registry = Self::builtin();
        for (name, endpoint) in overrides {
            registry.insert(name.clone(), endpoint.clone());
        }
        registry
    }

    /// Add or replace an endpoint
    pub fn insert(&mut self, name: impl Into<String>, endpoint: EndpointConfig) {
        self.endpoints.insert(name.into(), endpoint);
    }

    /// Look up an endpoint
    pub fn get(&self, name: &str) -> Option<&EndpointConfig> {
        self.endpoints.get(name)
    }

    /// Endpoints sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointConfig)> {
        self.endpoints.iter().map(|(name, ep)| (name.as_str(), ep))
    }

    /// Build a request for the named endpoint
    pub fn request(
        &self,
        name: &str,
        vars: &TemplateVars,
        body: Option<JsonValue>,
    ) -> Result<ApiRequest> {
        let endpoint = self.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.endpoints.keys().map(String::as_str).collect();
            Error::config(format!(
                "Unknown endpoint '{name}'. Known endpoints: {}",
                known.join(", ")
            ))
        })?;
        endpoint.request(vars, body)
    }
}

/// Request listing all problems
pub fn list_problems() -> Result<ApiRequest> {
    EndpointRegistry::builtin().request(LIST_PROBLEMS, &TemplateVars::new(), None)
}

/// Request fetching one problem
pub fn problem_details(problem_id: &str) -> Result<ApiRequest> {
    EndpointRegistry::builtin().request(
        PROBLEM_DETAILS,
        &TemplateVars::new().with("problem_id", problem_id),
        None,
    )
}

/// Request updating one problem with `payload`
pub fn update_problem(problem_id: &str, payload: JsonValue) -> Result<ApiRequest> {
    EndpointRegistry::builtin().request(
        UPDATE_PROBLEM,
        &TemplateVars::new().with("problem_id", problem_id),
        Some(payload),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_builtin_endpoints() {
        let registry = EndpointRegistry::builtin();
        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![LIST_PROBLEMS, PROBLEM_DETAILS, UPDATE_PROBLEM]);

        let update = registry.get(UPDATE_PROBLEM).unwrap();
        assert_eq!(update.method, Method::PUT);
        assert_eq!(update.variables(), vec!["problem_id".to_string()]);
        assert_eq!(update.headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_problem_details_request() {
        let request = problem_details("newproblem").unwrap();
        let expected = ApiRequest::get("/api/v2/problem/newproblem")
            .header("Content-Type", "application/json");
        assert_eq!(request, expected);
    }

    #[test]
    fn test_update_problem_request() {
        let request = update_problem("t12345", json!({"name": "Sample"})).unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.target, "/api/v2/problem/t12345");
        assert_eq!(request.body, json!({"name": "Sample"}));
    }

    #[test]
    fn test_problem_id_stays_in_its_segment() {
        let request = update_problem("a?x=1", json!({})).unwrap();
        assert_eq!(request.target, "/api/v2/problem/a%3Fx%3D1");
        assert!(request.params.is_empty());

        let request = problem_details("../admin").unwrap();
        assert_eq!(request.target, "/api/v2/problem/..%2Fadmin");
    }

    #[test]
    fn test_list_problems_request() {
        let request = list_problems().unwrap();
        assert_eq!(request.target, "/api/v2/problems");
        assert_eq!(request.body, json!({}));
    }

    #[test]
    fn test_missing_variable() {
        let err = EndpointRegistry::builtin()
            .request(PROBLEM_DETAILS, &TemplateVars::new(), None)
            .unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable { .. }));
    }

    #[test]
    fn test_unknown_endpoint() {
        let err = EndpointRegistry::builtin()
            .request("nope", &TemplateVars::new(), None)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown endpoint 'nope'"));
        assert!(msg.contains(PROBLEM_DETAILS));
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(
            LIST_PROBLEMS.to_string(),
            EndpointConfig::new("/api/v3/problems", Method::GET),
        );
        overrides.insert(
            "delete_problem".to_string(),
            EndpointConfig::new("/api/v2/problem/{{ problem_id }}", Method::DELETE),
        );

        let registry = EndpointRegistry::with_overrides(&overrides);
        assert_eq!(registry.get(LIST_PROBLEMS).unwrap().path, "/api/v3/problems");

        let request = registry
            .request(
                "delete_problem",
                &TemplateVars::new().with("problem_id", "p9"),
                None,
            )
            .unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.target, "/api/v2/problem/p9");
    }

    #[test]
    fn test_endpoint_from_yaml() {
        let yaml = r#"
path: /api/v2/submissions/{{ id }}
headers:
  Accept: application/json
"#;
        let endpoint: EndpointConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(endpoint.method, Method::GET);
        assert_eq!(endpoint.headers["Accept"], "application/json");
    }
}
