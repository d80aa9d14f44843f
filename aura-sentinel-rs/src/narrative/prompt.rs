//! Persona and prompt composition for forensic narratives

use serde_json::{Map, Value};

/// Persona and output contract sent as the system instruction on every call
pub const SYSTEM_INSTRUCTION: &str = r#"
You are AuraSentinel AI, a Senior Forensic Analyst specialized in Fintech and Web3 Security.
Your goal is to transform raw system logs into high-fidelity investigation narratives.

NARRATIVE GUIDELINES:
1. Tone: Professional, clinical, and high-urgency (Noir Fintech style).
2. Format: Structured Markdown.
3. Sections:
   - [SEVERITY CLASSIFICATION] (Critical, High, Medium, Low)
   - [EXECUTIVE SUMMARY] (2 sentences max)
   - [FORENSIC NARRATIVE] (Detailed explanation of the 'why' and 'how')
   - [ACTIONABLE MITIGATION] (Step-by-step instructions for the analyst)

STAKED ASSET DOMAIN KNOWLEDGE:
- Monitor for 'Slashing' events (validator penalties).
- Watch for 'Unbonding' anomalies (unusual withdrawal requests).
- Flag IP deviations (Impossible Travel) for high-value staked assets.

TRADING BEHAVIORAL KNOWLEDGE:
- Detect 'Revenge Trading' (Rapidly increasing position size after a loss).
- Flag 'Over-leveraging' compared to user's 30-day historical mean.
"#;

/// Lead-in placed before the serialized log record
pub const INVESTIGATION_REQUEST: &str =
    "Investigate the following log telemetry and provide a forensic narrative:";

/// Leading indentation of the serialized record in the prompt
pub const RECORD_INDENT: &str = "    ";

/// Hint merged into staking records under [`CONTEXT_FIELD`]
pub const STAKING_CONTEXT: &str = "Context: This involves staked assets in a PoS network. Check for slashing risks or exfiltration patterns.";

/// Field the staking hint is stored under
pub const CONTEXT_FIELD: &str = "context";

/// Field a non-object staking record is nested under
pub const RECORD_FIELD: &str = "record";

/// Pretty-print a record with two-space indentation.
///
/// Object keys come out sorted, so a given record always serializes the same way.
pub fn serialize_record(record: &Value) -> String {
    let sorted = sort_keys(record);
    // Serializing a Value cannot fail: its map keys are always strings.
    serde_json::to_string_pretty(&sorted).unwrap_or_else(|_| sorted.to_string())
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut keys: Vec<&String> = fields.keys().collect();
            keys.sort();
            Value::Object(
                keys.into_iter()
                    .map(|k| (k.clone(), sort_keys(&fields[k])))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Build the user-turn prompt for a record.
///
/// The record starts on the line after the lead-in, indented by
/// [`RECORD_INDENT`]; its remaining lines keep the serializer's indentation.
pub fn compose_prompt(record: &Value) -> String {
    format!("{} \n{}{}", INVESTIGATION_REQUEST, RECORD_INDENT, serialize_record(record))
}

/// Copy of `record` with the staking hint added.
///
/// Object records keep their fields and gain `context`, replacing any
/// existing `context` value. Anything else is nested under `record`.
pub fn with_staking_context(record: &Value) -> Value {
    let mut fields = match record {
        Value::Object(fields) => fields.clone(),
        other => {
            let mut fields = Map::new();
            fields.insert(RECORD_FIELD.to_string(), other.clone());
            fields
        }
    };

    fields.insert(CONTEXT_FIELD.to_string(), Value::String(STAKING_CONTEXT.to_string()));
    Value::Object(fields)
}
