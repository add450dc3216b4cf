use serde_json::{json, Value};

use crate::errors::{BackendError, Error, Result};
use crate::models::{Role, Transcript};

/// OpenAI's name for a role, or `None` for roles it does not know.
pub fn openai_role(role: &Role) -> Option<&'static str> {
    match role {
        Role::System => Some("system"),
        Role::User => Some("user"),
        Role::Assistant => Some("assistant"),
        Role::Other(_) => None,
    }
}

/// Convert a transcript to OpenAI's chat message specification.
///
/// Entries whose role has no OpenAI counterpart are left out; everything else keeps
/// its relative order.
pub fn transcript_to_openai_spec(transcript: &Transcript) -> Vec<Value> {
    transcript
        .iter()
        .filter_map(|message| {
            openai_role(&message.role).map(|role| {
                json!({
                    "role": role,
                    "content": message.content,
                })
            })
        })
        .collect()
}

/// Surface an `error` object embedded in an otherwise successful response.
pub fn check_openai_error(response: &Value) -> Result<()> {
    match response.get("error") {
        Some(Value::Null) | None => Ok(()),
        Some(error) => {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
                .unwrap_or_else(|| error.to_string());
            Err(BackendError::Api(message).into())
        }
    }
}

/// The first element of `choices`, or [`Error::NoCandidates`] if there is none.
pub fn first_choice(response: &Value) -> Result<&Value> {
    response
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .ok_or(Error::NoCandidates)
}

/// Text of the first candidate of a legacy completion response, trimmed.
pub fn completion_text(response: &Value) -> Result<String> {
    let choice = first_choice(response)?;
    let text = choice
        .get("text")
        .and_then(|t| t.as_str())
        .ok_or_else(|| BackendError::Decode("choice has no text".to_string()))?;
    Ok(text.trim().to_string())
}

/// Content of the first candidate of a chat completion response.
///
/// A `null` content (e.g. a reply consisting only of tool calls) reads as empty text.
pub fn chat_content(response: &Value) -> Result<String> {
    let choice = first_choice(response)?;
    let message = choice
        .get("message")
        .ok_or_else(|| BackendError::Decode("choice has no message".to_string()))?;
    match message.get("content") {
        Some(Value::String(content)) => Ok(content.clone()),
        Some(Value::Null) | None => Ok(String::new()),
        Some(other) => Err(BackendError::Decode(format!("unexpected content: {}", other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;

    #[test]
    fn test_transcript_to_openai_spec_maps_roles() {
        let transcript = Transcript::new()
            .with_system("sys")
            .with_user("question")
            .with_assistant("answer");

        let spec = transcript_to_openai_spec(&transcript);
        assert_eq!(
            spec,
            vec![
                json!({"role": "system", "content": "sys"}),
                json!({"role": "user", "content": "question"}),
                json!({"role": "assistant", "content": "answer"}),
            ]
        );
    }

    #[test]
    fn test_transcript_to_openai_spec_drops_unknown_roles() {
        let transcript: Transcript = vec![
            Message::new(Role::from("note"), "hidden"),
            Message::user("first"),
            Message::new(Role::from("tool"), "also hidden"),
            Message::assistant("second"),
        ]
        .into();

        let spec = transcript_to_openai_spec(&transcript);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec[0]["content"], "first");
        assert_eq!(spec[1]["role"], "assistant");
    }

    #[test]
    fn test_transcript_to_openai_spec_empty() {
        assert!(transcript_to_openai_spec(&Transcript::new()).is_empty());
    }

    #[test]
    fn test_completion_text_trims() {
        let response = json!({"choices": [{"text": "\n\n  Paris. \n"}, {"text": "London"}]});
        assert_eq!(completion_text(&response).unwrap(), "Paris.");
    }

    #[test]
    fn test_no_candidates() {
        assert!(matches!(
            completion_text(&json!({"choices": []})),
            Err(Error::NoCandidates)
        ));
        assert!(matches!(
            chat_content(&json!({"id": "chatcmpl-1"})),
            Err(Error::NoCandidates)
        ));
    }

    #[test]
    fn test_chat_content_null_is_empty() {
        let response = json!({"choices": [{"message": {"role": "assistant", "content": null}}]});
        assert_eq!(chat_content(&response).unwrap(), "");
    }

    #[test]
    fn test_chat_content_missing_message() {
        let response = json!({"choices": [{"index": 0}]});
        assert!(matches!(
            chat_content(&response),
            Err(Error::BackendRequest(BackendError::Decode(_)))
        ));
    }

    #[test]
    fn test_check_openai_error() {
        assert!(check_openai_error(&json!({"choices": []})).is_ok());
        assert!(check_openai_error(&json!({"error": null})).is_ok());

        let err = check_openai_error(&json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        }))
        .unwrap_err();
        assert!(
            matches!(err, Error::BackendRequest(BackendError::Api(ref m)) if m == "Incorrect API key provided")
        );
    }
}
