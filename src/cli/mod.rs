//! Interactive terminal surface: model selection, topic prompt, and the
//! question loop.
//!
//! Deliberately thin; all dialogue policy lives in [`crate::session`] and
//! [`crate::stages`]. Ctrl-C during generation cancels that stage only;
//! Ctrl-C or EOF at a prompt ends the session.

use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::backend::TextGenerationBackend;
use crate::session::DialogueSession;

type InputLines = Lines<BufReader<Stdin>>;

/// Drive a full interactive session over stdin/stdout.
pub async fn run(backend: &dyn TextGenerationBackend) -> Result<()> {
    let models = backend
        .list_models()
        .await
        .context("backend model discovery failed")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = DialogueSession::new();
    session.begin()?;

    let model = select_model(&mut lines, &models).await?;
    session.select_model(model.clone())?;
    tracing::info!(model, session = %session.id(), "model selected");

    let Some(topic) = ask(&mut lines, "Enter the general topic of the conversation: ").await?
    else {
        bail!("input closed before a topic was given");
    };
    session.set_topic(topic.trim().to_string())?;

    loop {
        let Some(input) =
            ask(&mut lines, "Write your question (or \"exit\" to finish): ").await?
        else {
            break;
        };
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if DialogueSession::is_exit_command(input) {
            break;
        }

        println!("🧠 Generating reflection...");
        let outcome = session.process_turn(backend, input).await?;

        println!("{}", outcome.reflection);
        println!(
            "Total reflection time: {}",
            seconds(outcome.reflection_elapsed)
        );
        println!("🤖 Response:");
        println!("{}", outcome.response);
        println!("\nTotal processing time: {}", seconds(outcome.elapsed));
    }

    session.close();
    println!("\nBye bye! 👋");
    Ok(())
}

async fn select_model(lines: &mut InputLines, models: &[String]) -> Result<String> {
    println!("Available models:");
    for (index, model) in models.iter().enumerate() {
        println!("{}. {}", index + 1, model);
    }

    loop {
        let Some(answer) = ask(lines, "Select the model (enter the number): ").await? else {
            bail!("input closed before a model was selected");
        };
        match answer.trim().parse::<usize>() {
            Ok(number) if (1..=models.len()).contains(&number) => {
                return Ok(models[number - 1].clone());
            }
            _ => println!("Invalid selection, try again."),
        }
    }
}

/// Print a prompt and read one line; `None` on EOF or interrupt.
async fn ask(lines: &mut InputLines, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush().ok();
    tokio::select! {
        line = lines.next_line() => Ok(line?),
        _ = tokio::signal::ctrl_c() => {
            println!();
            Ok(None)
        }
    }
}

fn seconds(elapsed: Duration) -> String {
    format!("{:.2} s", elapsed.as_secs_f64())
}
