//! `helpdesk ask`: run one chat turn from the terminal.
//!
//! Goes through the same ChatService as `POST /chat`, so the exchange is
//! recorded and shows up in the statistics.

use anyhow::Result;
use chrono::SecondsFormat;
use console::style;

use helpdesk_core::responder::ReplySource;

use crate::state::AppState;

pub async fn ask(state: &AppState, message: &str, user_id: &str, json: bool) -> Result<()> {
    let turn = state.chat_service.handle(message, Some(user_id)).await?;

    if json {
        let mut body = serde_json::json!({
            "response": turn.response,
            "timestamp": turn.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            "category": turn.category,
        });
        if let Some(error) = turn.persistence_error() {
            body["error"] = serde_json::Value::String(error.to_string());
        }
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let source = match turn.source {
        ReplySource::Provider => style("model").green(),
        ReplySource::Fallback => style("knowledge base").yellow(),
    };

    println!();
    println!(
        "  {} {} · {}",
        style("💬").bold(),
        style(turn.category).cyan(),
        source
    );
    println!();
    for line in turn.response.lines() {
        println!("  {line}");
    }
    println!();

    if let Some(error) = turn.persistence_error() {
        println!(
            "  {} Reply was not saved: {}",
            style("⚠").yellow().bold(),
            style(error).dim()
        );
        println!();
    }

    Ok(())
}
