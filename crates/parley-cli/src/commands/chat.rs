use anyhow::Result;
use cliclack::{input, spinner};
use console::style;
use parley::models::{Message, Transcript};
use parley::providers::base::Provider;

use crate::render::render;

pub async fn execute(provider: &dyn Provider, system: Option<String>) -> Result<()> {
    let mut transcript = Transcript::new();
    if let Some(system) = system {
        transcript = transcript.with_system(system);
    }

    println!(
        "Parley chat {}",
        style("- type \"exit\" to end the session").dim()
    );
    println!("\n");

    loop {
        let message_text: String = input("Message:").placeholder("").multiline().interact()?;

        if message_text.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let spin = spinner();
        spin.start("awaiting reply");
        let reply = send_turn(provider, &mut transcript, message_text).await;
        spin.stop("");

        match reply {
            Ok(reply) => render(&reply.content)?,
            Err(e) => eprintln!("{}", style(format!("Error: {}", e)).red()),
        }

        println!("\n");
    }
    Ok(())
}

/// Send one user turn. The transcript only grows when the backend answers, so a failed
/// turn leaves it exactly as it was.
async fn send_turn(
    provider: &dyn Provider,
    transcript: &mut Transcript,
    text: String,
) -> parley::Result<Message> {
    let attempt = transcript.clone().with_user(text);
    let reply = provider.chat(&attempt).await?;
    *transcript = attempt.with_assistant(reply.content.clone());
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley::models::Role;
    use parley::providers::mock::MockProvider;

    #[tokio::test]
    async fn test_failed_turn_is_not_kept() {
        // One reply, then the mock runs dry and fails
        let provider = MockProvider::new(vec![Message::assistant("hello")]);
        let mut transcript = Transcript::new().with_system("sys");

        send_turn(&provider, &mut transcript, "hi".to_string())
            .await
            .unwrap();
        assert!(send_turn(&provider, &mut transcript, "lost".to_string())
            .await
            .is_err());

        let roles: Vec<Role> = transcript.iter().map(|m| m.role.clone()).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);

        let sent = provider.transcripts();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].last().unwrap().content, "lost");
    }
}
