use chrono::{DateTime, Utc};
use clap::Args;
use daymeter_core::{calculate_event_difficulty, CalendarConfig, CalendarEvent};

#[derive(Args)]
pub struct ScoreArgs {
    /// Event title (configuration is looked up by title)
    pub title: String,
    /// Event start (RFC 3339, e.g. 2026-03-02T09:00:00Z)
    pub start: DateTime<Utc>,
    /// Event end (RFC 3339)
    pub end: DateTime<Utc>,
    /// Override the configured base difficulty
    #[arg(long)]
    pub base: Option<u32>,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = CalendarConfig::load()?;

    let event = CalendarEvent::new(&args.title, args.start, args.end);
    let base = args
        .base
        .unwrap_or_else(|| config.base_difficulty(&args.title));
    let flags = config.flags(&args.title);

    tracing::debug!(title = %args.title, base, "scoring event");
    let result = calculate_event_difficulty(&event, base, &config.ranges, flags.as_ref());
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
