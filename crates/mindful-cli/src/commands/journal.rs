use super::AppContext;
use anyhow::{Result, anyhow};
use colored::Colorize;
use mindful_core::journal::{JournalDraft, JournalMood};
use mindful_core::record::MoodLabel;

pub async fn add(
    ctx: &AppContext,
    id: Option<String>,
    title: String,
    content: String,
    mood: Option<String>,
    categories: Vec<String>,
) -> Result<()> {
    let mood = mood.map(|label| parse_mood(&label)).transpose()?;
    let entry = ctx
        .dashboard
        .save_journal_entry(JournalDraft {
            id,
            title,
            content,
            mood,
            categories,
        })
        .await?;

    println!(
        "{}",
        format!("Saved journal entry {} ({} words)", entry.id, entry.word_count()).green()
    );
    Ok(())
}

pub async fn list(ctx: &AppContext, json: bool) -> Result<()> {
    let entries = ctx.dashboard.list_journal_entries().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("{}", "No journal entries yet.".dimmed());
        return Ok(());
    }
    for entry in entries {
        let mood = entry
            .mood
            .as_ref()
            .map(|m| format!(" {} {}", m.emoji, m.label))
            .unwrap_or_default();
        println!(
            "{} {} {}{}",
            format!("[{}]", entry.id).dimmed(),
            format!("{} {}", entry.date, entry.time).cyan(),
            entry.title.bold(),
            mood
        );
        if !entry.categories.is_empty() {
            println!("    {}", entry.categories.join(", ").dimmed());
        }
    }
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let removed = ctx.dashboard.delete_journal_entry(id).await?;
    println!("{}", format!("Deleted journal entry '{}'", removed.title).yellow());
    Ok(())
}

fn parse_mood(label: &str) -> Result<JournalMood> {
    label.parse::<MoodLabel>().map(JournalMood::from).map_err(|_| {
        let known: Vec<String> = MoodLabel::all().iter().map(|m| m.to_string()).collect();
        anyhow!("Unknown mood '{}'. Expected one of: {}", label, known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mood() {
        assert_eq!(parse_mood("Very Happy").unwrap().emoji, "😄");
        assert!(parse_mood("Elated").is_err());
    }
}
