use super::AppContext;
use anyhow::Result;
use colored::Colorize;
use mindful_application::Conversation;

pub async fn ask(ctx: &AppContext, message: &str) -> Result<()> {
    let coach = ctx.coach()?;
    let mut conversation = Conversation::new();
    let reply = conversation.send(&coach, message).await;
    println!("{} {}", "Coach:".bright_magenta().bold(), reply);
    Ok(())
}
