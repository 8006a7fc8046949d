//! Locating a JSON object inside free-form model output.
//!
//! Backends asked for JSON often wrap it in a markdown fence or surround it
//! with a sentence of commentary. Extraction is deliberately narrow: a fenced
//! block, or the first balanced `{ ... }` outside string literals. Anything
//! else is reported as an error for the caller to handle.

use heirloom_error::{HeirloomResult, JsonError};
use serde::de::DeserializeOwned;

/// Pull the JSON object out of a model reply.
///
/// Tries, in order:
/// 1. a ```` ```json ```` fenced block
/// 2. an unlabeled ```` ``` ```` fenced block
/// 3. the first balanced `{ ... }` in the text
///
/// # Errors
///
/// Returns a `JsonError` if no candidate object is found.
///
/// # Examples
///
/// ```
/// use heirloom_story::extract_json;
///
/// let reply = "Sure! Here it is:\n```json\n{\"themes\": [\"family\"]}\n```";
/// assert_eq!(extract_json(reply).unwrap(), "{\"themes\": [\"family\"]}");
///
/// let reply = "Metadata: {\"summary\": \"a {nested} brace\"} done";
/// assert_eq!(extract_json(reply).unwrap(), "{\"summary\": \"a {nested} brace\"}");
/// ```
pub fn extract_json(reply: &str) -> HeirloomResult<String> {
    if let Some(block) = fenced_block(reply) {
        if let Some(object) = balanced_object(&block) {
            return Ok(object);
        }
    }

    if let Some(object) = balanced_object(reply) {
        return Ok(object);
    }

    tracing::debug!(reply_length = reply.len(), "No JSON object in reply");
    Err(JsonError::new(format!(
        "No JSON object found in reply (length: {})",
        reply.len()
    ))
    .into())
}

/// Deserialize extracted JSON into `T`.
///
/// # Errors
///
/// Returns a `JsonError` carrying the deserializer's message.
pub fn parse_json<T: DeserializeOwned>(json: &str) -> HeirloomResult<T> {
    serde_json::from_str(json).map_err(|e| {
        tracing::debug!(error = %e, json_length = json.len(), "JSON did not match expected shape");
        JsonError::from(e).into()
    })
}

fn fenced_block(reply: &str) -> Option<String> {
    let body_start = match reply.find("```json") {
        Some(pos) => pos + "```json".len(),
        None => {
            let pos = reply.find("```")?;
            // Skip an unrecognized language tag on the fence line.
            reply[pos + 3..].find('\n').map(|n| pos + 3 + n + 1)?
        }
    };
    let body = &reply[body_start..];
    // A missing closing fence means the reply was truncated.
    let end = body.find("```").unwrap_or(body.len());
    Some(body[..end].trim().to_string())
}

fn balanced_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..=start + offset].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
