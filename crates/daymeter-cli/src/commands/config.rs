use clap::Subcommand;

use daymeter_core::{CalendarConfig, EventFlags, TimeRangeDefinition};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Set an event title's base difficulty
    SetDifficulty {
        /// Event title
        title: String,
        /// Base difficulty value
        value: u32,
    },
    /// Set an event title's behavior flags from JSON
    SetFlags {
        /// Event title
        title: String,
        /// JSON flags, e.g. {"movable": true}
        json: String,
    },
    /// Add a time range from JSON
    AddRange {
        /// JSON range definition
        json: String,
    },
    /// Remove a time range by id
    RemoveRange {
        /// Range id
        id: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = CalendarConfig::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", CalendarConfig::config_path()?.display());
        }
        ConfigAction::SetDifficulty { title, value } => {
            let mut config = CalendarConfig::load()?;
            config.difficulties.insert(title.clone(), value);
            config.save()?;
            println!("difficulty for '{title}' set to {value}");
        }
        ConfigAction::SetFlags { title, json } => {
            let flags: EventFlags = serde_json::from_str(&json)?;
            let mut config = CalendarConfig::load()?;
            config.event_flags.insert(title.clone(), flags);
            config.save()?;
            println!("flags for '{title}' updated");
        }
        ConfigAction::AddRange { json } => {
            let range: TimeRangeDefinition = serde_json::from_str(&json)?;
            range.validate()?;
            let mut config = CalendarConfig::load()?;
            let title = range.title.clone();
            config.ranges.push(range);
            config.save()?;
            println!("range '{title}' added");
        }
        ConfigAction::RemoveRange { id } => {
            let mut config = CalendarConfig::load()?;
            let before = config.ranges.len();
            config.ranges.retain(|r| r.id != id);
            if config.ranges.len() == before {
                return Err(format!("no range with id '{id}'").into());
            }
            config.save()?;
            println!("range '{id}' removed");
        }
    }
    Ok(())
}
