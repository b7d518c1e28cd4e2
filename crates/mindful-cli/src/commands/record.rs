use super::AppContext;
use anyhow::Result;
use colored::Colorize;
use mindful_core::record::{MeditationKind, MoodLabel};

pub async fn mood(ctx: &AppContext, label: &str, suggest: bool) -> Result<()> {
    ctx.dashboard.record_mood(label).await;
    let value = MoodLabel::value_for(label);
    println!("{}", format!("Logged mood '{}' ({}/5)", label, value).green());

    if suggest {
        let suggestion = ctx.coach()?.mood_suggestion(label).await;
        println!("{} {}", "Suggestion:".cyan().bold(), suggestion);
    }
    Ok(())
}

pub async fn meditate(ctx: &AppContext, seconds: u32, kind: MeditationKind) {
    ctx.dashboard.record_meditation(seconds, kind).await;
    println!(
        "{}",
        format!("Logged {} session ({}m {:02}s)", kind, seconds / 60, seconds % 60).green()
    );
}

pub async fn health(ctx: &AppContext, heart_rate: u32, steps: u64) {
    ctx.dashboard.record_health_sample(heart_rate, steps).await;
    println!(
        "{}",
        format!("Logged health sample: {} bpm, {} steps", heart_rate, steps).green()
    );
}

pub async fn event(ctx: &AppContext, screen: &str, action: Option<&str>) {
    ctx.dashboard.record_event(screen, action).await;
    println!(
        "{}",
        format!("Logged event {} / {}", screen, action.unwrap_or("view")).green()
    );
}
