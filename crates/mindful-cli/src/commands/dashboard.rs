use super::AppContext;
use anyhow::Result;
use colored::Colorize;
use mindful_core::dashboard::DashboardView;

pub async fn show(ctx: &AppContext, json: bool, live_steps: Option<u64>) -> Result<()> {
    let now = ctx.dashboard.now();
    let view = ctx.dashboard.dashboard_view(now, live_steps).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render(&view);
    }
    Ok(())
}

fn render(view: &DashboardView) {
    let stats = &view.stats;
    println!("{}", "=== Mindful: last 7 days ===".bright_magenta().bold());
    println!(
        "Streaks   mood {}  meditation {}  journal {}",
        stats.mood_streak.to_string().bold(),
        stats.meditation_streak.to_string().bold(),
        stats.journal_streak.to_string().bold()
    );
    println!(
        "Totals    {} sessions  {} journal entries  {} steps",
        stats.total_sessions, stats.total_journals, stats.total_steps
    );
    println!("Avg mood  {:.1}/5", stats.average_mood);

    println!("\n{}", "Mood".cyan().bold());
    for point in &view.mood_trend {
        let bar = "#".repeat((point.average * 2.0).round() as usize);
        println!("  {} {:<10} {:.1}", point.label, bar.green(), point.average);
    }

    let steps = &view.steps;
    println!("\n{}", "Steps".cyan().bold());
    println!("  today {} / {} ({}%)", steps.today, steps.goal, steps.goal_percent);
    for day in &steps.weekly {
        println!("  {} {}", day.date.format("%a %d"), day.steps);
    }

    println!("\n{}", "Heart".cyan().bold());
    println!("  current {} bpm, average {} bpm", view.heart.current, view.heart.average);

    println!("\n{}", "Mindful minutes".cyan().bold());
    println!("  total {}", view.mindful_minutes.total);
    for kind in &view.mindful_minutes.breakdown {
        println!("  {:<20} {}", kind.kind.to_string(), kind.minutes);
    }

    if !view.screen_activity.is_empty() {
        println!("\n{}", "Activity".cyan().bold());
        for screen in &view.screen_activity {
            println!("  {:<20} {}", screen.screen, screen.events);
        }
    }

    let goals = &view.daily_goals;
    println!("\n{}", "Today".cyan().bold());
    println!("  {} Journal entry", check(goals.journal_entry));
    println!("  {} Mood check-in", check(goals.mood_check_in));
    println!("  {} Meditation", check(goals.meditation));
}

fn check(done: bool) -> colored::ColoredString {
    if done { "[x]".green() } else { "[ ]".dimmed() }
}
