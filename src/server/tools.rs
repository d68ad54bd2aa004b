//! Tool table and dispatch onto [`AnalysisService`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::jsonrpc::RpcError;
use crate::service::AnalysisService;

/// Tool metadata as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Text payload returned by `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl ToolOutput {
    fn json(value: &impl Serialize, is_error: bool) -> Result<Self, RpcError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| RpcError::new(super::jsonrpc::INTERNAL_ERROR, e.to_string()))?;
        Ok(Self {
            content: vec![TextContent { kind: "text", text }],
            is_error,
        })
    }
}

#[derive(Deserialize)]
struct HeadlineArgs {
    headline: String,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Deserialize)]
struct BatchArgs {
    headlines: Vec<String>,
}

#[derive(Deserialize)]
struct TextArgs {
    text: String,
}

pub fn definitions(max_batch_size: usize) -> Vec<ToolDefinition> {
    let text_schema = json!({
        "type": "object",
        "required": ["text"],
        "properties": {
            "text": { "type": "string", "description": "Text to analyse" }
        }
    });
    vec![
        ToolDefinition {
            name: "analyze_headline",
            description: "Analyze a crude oil news headline for market sentiment, tone and mood",
            input_schema: json!({
                "type": "object",
                "required": ["headline"],
                "properties": {
                    "headline": { "type": "string", "description": "The news headline to analyze" },
                    "source": { "type": "string", "description": "Optional source of the news" }
                }
            }),
        },
        ToolDefinition {
            name: "analyze_headlines_batch",
            description: "Analyze several crude oil headlines at once",
            input_schema: json!({
                "type": "object",
                "required": ["headlines"],
                "properties": {
                    "headlines": {
                        "type": "array",
                        "items": { "type": "string" },
                        "maxItems": max_batch_size,
                        "description": "Headlines to analyze; extras beyond the limit are dropped"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "get_sample_analysis",
            description: "Analyze a few canned headlines for demonstration",
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: "list_sample_headlines",
            description: "List the canned demo headlines",
            input_schema: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: "analyze_sentiment",
            description: "Sentiment polarity of a text, without tone or decision",
            input_schema: text_schema.clone(),
        },
        ToolDefinition {
            name: "detect_rudeness",
            description: "Tone and rudeness of a text, without sentiment or decision",
            input_schema: text_schema,
        },
    ]
}

/// Run a tool.
///
/// Unknown tools and malformed arguments are protocol errors; analysis
/// failures are reported in the output with `is_error` set.
pub async fn call(
    service: &AnalysisService,
    name: &str,
    arguments: Value,
) -> Result<ToolOutput, RpcError> {
    match name {
        "analyze_headline" => {
            let args: HeadlineArgs = parse_args(arguments)?;
            let outcome = service
                .analyze_headline(&args.headline, args.source.as_deref())
                .await;
            ToolOutput::json(&outcome, !outcome.is_success())
        }
        "analyze_headlines_batch" => {
            let args: BatchArgs = parse_args(arguments)?;
            ToolOutput::json(&service.analyze_batch(&args.headlines).await, false)
        }
        "get_sample_analysis" => ToolOutput::json(&service.sample_analysis().await, false),
        "list_sample_headlines" => {
            ToolOutput::json(&json!({ "headlines": service.sample_headlines() }), false)
        }
        "analyze_sentiment" => {
            let args: TextArgs = parse_args(arguments)?;
            match service.analyze_sentiment(&args.text) {
                Ok(result) => ToolOutput::json(&result, false),
                Err(e) => ToolOutput::json(&json!({ "error": e.to_string(), "text": args.text }), true),
            }
        }
        "detect_rudeness" => {
            let args: TextArgs = parse_args(arguments)?;
            match service.detect_rudeness(&args.text) {
                Ok(result) => ToolOutput::json(&result, false),
                Err(e) => ToolOutput::json(&json!({ "error": e.to_string(), "text": args.text }), true),
            }
        }
        other => Err(RpcError::invalid_params(format!("unknown tool: {other}"))),
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, RpcError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| RpcError::invalid_params(format!("invalid arguments: {e}")))
}
