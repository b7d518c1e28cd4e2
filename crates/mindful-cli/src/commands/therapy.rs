use super::AppContext;
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use colored::Colorize;
use mindful_core::dashboard::Calendar;
use mindful_core::therapy::{BookingRequest, SessionStatus, SessionType, TherapySession};

const AT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub async fn list(ctx: &AppContext, all: bool, json: bool) -> Result<()> {
    let sessions = if all {
        ctx.dashboard.get_therapy_sessions().await
    } else {
        ctx.dashboard.active_therapy_sessions().await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }
    if sessions.is_empty() {
        println!("{}", "No therapy sessions.".dimmed());
        return Ok(());
    }
    for session in &sessions {
        print_session(session);
    }
    Ok(())
}

pub async fn book(
    ctx: &AppContext,
    therapist: String,
    at: &str,
    session_type: SessionType,
    specialty: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let starts = parse_start(ctx.dashboard.calendar(), at)?;
    let session = ctx
        .dashboard
        .book_therapy_session(
            BookingRequest {
                therapist,
                specialty,
                session_type,
                starts_at: starts.timestamp_millis(),
                notes,
            },
            ctx.dashboard.now(),
        )
        .await?;

    println!("{}", "Session booked".green().bold());
    print_session(&session);
    Ok(())
}

pub async fn complete(ctx: &AppContext, id: &str) -> Result<()> {
    set_status(ctx, id, SessionStatus::Completed).await
}

pub async fn cancel(ctx: &AppContext, id: &str) -> Result<()> {
    set_status(ctx, id, SessionStatus::Cancelled).await
}

pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let removed = ctx.dashboard.delete_therapy_session(id).await?;
    println!(
        "{}",
        format!("Deleted session with {} on {}", removed.therapist, removed.date).yellow()
    );
    Ok(())
}

async fn set_status(ctx: &AppContext, id: &str, status: SessionStatus) -> Result<()> {
    let session = ctx
        .dashboard
        .update_therapy_session_status(id, status)
        .await?;
    print_session(&session);
    Ok(())
}

/// Resolves a local wall-clock start in the configured calendar.
fn parse_start(calendar: &Calendar, at: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(at.trim(), AT_FORMAT)
        .with_context(|| format!("Expected start as \"YYYY-MM-DD HH:MM\", got '{}'", at))?;
    calendar
        .instant_at(naive.date(), naive.hour(), naive.minute())
        .ok_or_else(|| anyhow!("'{}' does not exist in the configured timezone", at))
}

fn print_session(session: &TherapySession) {
    let status = match session.status {
        SessionStatus::Upcoming => session.status.to_string().green(),
        SessionStatus::Completed => session.status.to_string().blue(),
        SessionStatus::Cancelled => session.status.to_string().red(),
    };
    println!(
        "{} {} {} with {} ({}) {}",
        format!("[{}]", session.id).dimmed(),
        session.date.cyan(),
        session.time.cyan(),
        session.therapist.bold(),
        session.session_type,
        status
    );
    if let Some(notes) = &session.notes {
        println!("    {}", notes.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_in_named_zone() {
        let calendar = Calendar::from_name(Some("Asia/Tokyo")).unwrap();
        let start = parse_start(&calendar, "2026-03-12 09:00").unwrap();
        assert_eq!(start.to_rfc3339(), "2026-03-12T00:00:00+00:00");
        assert!(parse_start(&calendar, "tomorrow").is_err());
    }
}
