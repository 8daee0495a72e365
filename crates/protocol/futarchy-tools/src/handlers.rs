//! Tool dispatch.
//!
//! Arguments arrive as loosely typed JSON from an agent. Each handler
//! validates what it needs, calls the client, and returns JSON.

use futarchy_client::{vote_suggestion, Futarchy402Client, PollFilter, PollStatus};
use futarchy_x402::{Side, VoteOutcome};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::definitions::ToolName;
use crate::error::{ToolError, ToolResult};

/// What tool handlers run against.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub client: Futarchy402Client,
}

impl ToolContext {
    pub fn new(client: Futarchy402Client) -> Self {
        Self { client }
    }
}

/// Run tool `name` with `args`.
///
/// # Errors
/// `UnknownTool`, `InvalidArguments`, or the API / wallet error of a
/// read-only tool. The vote tool always returns `Ok` with its outcome.
pub async fn execute_tool(name: &str, args: &Value, ctx: &ToolContext) -> ToolResult<Value> {
    let tool = ToolName::parse(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    let args = Args::new(args)?;
    debug!(tool = %tool, "Executing tool");

    match tool {
        ToolName::ListPolls => {
            let mut filter = PollFilter::default();
            if let Some(status) = args.optional_str("status")? {
                filter.status = Some(
                    status
                        .parse::<PollStatus>()
                        .map_err(ToolError::InvalidArguments)?,
                );
            }
            filter.treasury_id = args.optional_str("treasury_id")?.map(str::to_string);
            filter.limit = Some(args.optional_u32("limit")?.unwrap_or(20));
            filter.offset = Some(args.optional_u32("offset")?.unwrap_or(0));
            to_json(&ctx.client.list_polls(&filter).await?)
        }
        ToolName::GetPoll => {
            let poll_id = args.required_str("poll_id")?;
            to_json(&ctx.client.get_poll(poll_id).await?)
        }
        ToolName::GetPosition => {
            let poll_id = args.required_str("poll_id")?;
            let voter = args.required_str("voter_pubkey")?;
            to_json(&ctx.client.get_position(poll_id, voter).await?)
        }
        ToolName::Vote => {
            let poll_id = args.required_str("poll_id")?;
            let side = args
                .required_str("side")?
                .parse::<Side>()
                .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
            let slippage = args.optional_f64("slippage")?;
            let key = args.optional_str("wallet_private_key")?;

            let outcome = ctx.client.vote(poll_id, side, slippage, key).await;
            info!(
                tool = %tool,
                poll_id,
                success = outcome.is_ok(),
                "Vote tool finished"
            );
            Ok(outcome_json(&outcome))
        }
        ToolName::GetStats => to_json(&ctx.client.get_stats().await?),
        ToolName::GetMyWallet => {
            let public_key = ctx.client.my_wallet()?;
            Ok(json!({ "public_key": public_key.to_base58() }))
        }
    }
}

/// Run a tool from raw JSON arguments and always return JSON text.
///
/// For runtimes that pass arguments as a string and expect a string back.
pub async fn execute_tool_text(name: &str, raw_args: &str, ctx: &ToolContext) -> String {
    let result = match parse_raw_args(raw_args) {
        Ok(args) => execute_tool(name, &args, ctx).await,
        Err(e) => Err(e),
    };
    let value = result.unwrap_or_else(|e| e.to_json());
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

fn parse_raw_args(raw: &str) -> ToolResult<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// JSON form of a vote outcome.
pub fn outcome_json(outcome: &VoteOutcome) -> Value {
    match outcome {
        Ok(receipt) => {
            let mut value = json!({
                "success": true,
                "vote_id": receipt.vote_id,
            });
            if let Some(signature) = &receipt.transaction_signature {
                value["transaction_signature"] = json!(signature);
            }
            if let Some(payment) = &receipt.payment {
                value["payment"] = json!(payment);
            }
            value
        }
        Err(e) => json!({
            "success": false,
            "error": e.to_string(),
            "kind": e.kind(),
            "suggestion": vote_suggestion(e),
            "retryable": e.is_retryable(),
        }),
    }
}

fn to_json<T: Serialize>(value: &T) -> ToolResult<Value> {
    serde_json::to_value(value).map_err(|e| ToolError::Encode(e.to_string()))
}

/// Borrowed view over a tool's argument object.
struct Args<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Args<'a> {
    fn new(value: &'a Value) -> ToolResult<Self> {
        match value {
            Value::Null => Ok(Self { map: None }),
            Value::Object(map) => Ok(Self { map: Some(map) }),
            other => Err(ToolError::InvalidArguments(format!(
                "arguments must be an object, got {}",
                other
            ))),
        }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map
            .and_then(|m| m.get(name))
            .filter(|v| !v.is_null())
    }

    fn optional_str(&self, name: &str) -> ToolResult<Option<&'a str>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ToolError::InvalidArguments(format!(
                "{} must be a string, got {}",
                name, other
            ))),
        }
    }

    fn required_str(&self, name: &str) -> ToolResult<&'a str> {
        self.optional_str(name)?
            .ok_or_else(|| ToolError::InvalidArguments(format!("{} is required", name)))
    }

    /// Numbers may also arrive as numeric strings.
    fn optional_f64(&self, name: &str) -> ToolResult<Option<f64>> {
        let invalid = || ToolError::InvalidArguments(format!("{} must be a number", name));
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(invalid),
            Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| invalid()),
            Some(_) => Err(invalid()),
        }
    }

    fn optional_u32(&self, name: &str) -> ToolResult<Option<u32>> {
        match self.optional_f64(name)? {
            None => Ok(None),
            Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(Some(n as u32)),
            Some(n) => Err(ToolError::InvalidArguments(format!(
                "{} must be a non-negative integer, got {}",
                name, n
            ))),
        }
    }
}
