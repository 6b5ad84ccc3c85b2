//! Evaluator request and response documents.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Pull the `pob` string out of the evaluator's stdin document.
pub fn parse_request(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(Error::Input("Missing input payload".to_string()));
    }

    let payload: Value = serde_json::from_str(raw)
        .map_err(|e| Error::Input(format!("Invalid JSON payload: {e}")))?;

    payload
        .get("pob")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::Input("`pob` field must be provided as a string".to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    pub class_name: Option<String>,
    pub ascendancy: Option<String>,
    pub level: Option<i64>,
    pub life: Option<f64>,
    pub energy_shield: Option<f64>,
    pub ward: Option<f64>,
    pub mana: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildMetrics {
    pub dps: Option<f64>,
    pub ehp: Option<f64>,
    pub sustain: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalResult {
    pub summary: BuildSummary,
    pub metrics: BuildMetrics,
    pub pob_xml: String,
    pub player_stats: BTreeMap<String, f64>,
    pub warnings: Vec<String>,
    pub sources: Vec<String>,
    pub timing_ms: u64,
    pub primary_source: String,
}

/// `{"ok": true, "result": ...}` or `{"ok": false, "error": ...}`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EvalResponse {
    Success { ok: bool, result: Box<EvalResult> },
    Failure { ok: bool, error: String },
}

impl EvalResponse {
    pub fn success(result: EvalResult) -> Self {
        EvalResponse::Success {
            ok: true,
            result: Box::new(result),
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        EvalResponse::Failure {
            ok: false,
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_request_messages() {
        let missing = parse_request("  \n").unwrap_err();
        assert_eq!(missing.to_string(), "Missing input payload");

        let invalid = parse_request("{not json").unwrap_err();
        assert!(invalid.to_string().starts_with("Invalid JSON payload: "));

        let wrong_type = parse_request(r#"{"pob": 42}"#).unwrap_err();
        assert_eq!(
            wrong_type.to_string(),
            "`pob` field must be provided as a string"
        );

        let absent = parse_request(r#"{"code": "abc"}"#).unwrap_err();
        assert_eq!(absent.to_string(), "`pob` field must be provided as a string");

        assert_eq!(parse_request(r#"{"pob": "<Build/>"}"#).unwrap(), "<Build/>");
    }

    #[test]
    fn test_response_shape() {
        let failure = serde_json::to_value(EvalResponse::failure("boom")).unwrap();
        assert_eq!(failure, json!({"ok": false, "error": "boom"}));

        let result = EvalResult {
            summary: BuildSummary {
                class_name: Some("Witch".to_string()),
                energy_shield: Some(10.0),
                ..Default::default()
            },
            metrics: BuildMetrics::default(),
            pob_xml: "<Build/>".to_string(),
            player_stats: BTreeMap::new(),
            warnings: vec![],
            sources: vec!["xml".to_string()],
            timing_ms: 3,
            primary_source: "xml".to_string(),
        };
        let success = serde_json::to_value(EvalResponse::success(result)).unwrap();
        assert_eq!(success["ok"], json!(true));
        assert_eq!(success["result"]["summary"]["className"], json!("Witch"));
        assert_eq!(success["result"]["summary"]["energyShield"], json!(10.0));
        assert_eq!(success["result"]["summary"]["ascendancy"], Value::Null);
        assert_eq!(success["result"]["primarySource"], json!("xml"));
        assert_eq!(success["result"]["timingMs"], json!(3));
        assert!(success["result"]["pobXml"].is_string());
    }
}
