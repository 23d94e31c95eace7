use std::io::Write;

use clap::{Parser, Subcommand};
use mealtime_resolver::{
    Dispatch, FormFields, MealCategory, MealTimeDispatcher, MealTimeResolver, SystemClock, Zone,
    is_before_today,
};
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{config::Config, error::AppError};

/// mealtime - canonical timestamps for logged meals
#[derive(Parser, Debug)]
#[command(name = "mealtime")]
#[command(about = "Resolve meal categories on a date to canonical timestamps", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a meal on a date to the timestamp sent as `eaten_at`
    Resolve {
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// breakfast, lunch, dinner or evening
        #[arg(long)]
        category: String,

        /// IANA timezone (overrides config file)
        #[arg(long)]
        timezone: Option<String>,

        /// Print a JSON object instead of the bare timestamp
        #[arg(long)]
        json: bool,
    },
    /// List meal categories and their hour of day
    Table,
    /// Tell whether an RFC 3339 instant falls before today
    BeforeToday {
        /// Instant, e.g. 2024-03-15T08:00:00Z
        #[arg(long)]
        at: String,

        /// IANA timezone (overrides config file)
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    #[serde(flatten)]
    form: &'a FormFields,
    local: String,
    category: MealCategory,
    timezone: &'a str,
}

/// Run `command` against `config`, writing results to `out`.
pub fn run(command: Commands, config: &Config, out: &mut impl Write) -> Result<(), AppError> {
    match command {
        Commands::Resolve {
            date,
            category,
            timezone,
            json,
        } => resolve_command(config, &date, &category, timezone, json, out),
        Commands::Table => table_command(out),
        Commands::BeforeToday { at, timezone } => before_today_command(config, &at, timezone, out),
    }
}

fn zone_for(config: &Config, timezone_override: Option<String>) -> Result<Zone, AppError> {
    let zone = match timezone_override {
        Some(name) => Zone::named(&name)?.with_gap_policy(config.resolver.gap_policy),
        None => config.resolver.zone()?,
    };
    Ok(zone)
}

#[tracing::instrument(skip(config, out))]
fn resolve_command(
    config: &Config,
    date: &str,
    category: &str,
    timezone_override: Option<String>,
    json: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let resolver = MealTimeResolver::new(zone_for(config, timezone_override)?);
    let mut dispatcher = MealTimeDispatcher::new(resolver, FormFields::default());

    let timestamp = match dispatcher.trigger(date, category)? {
        Dispatch::Written(timestamp) => timestamp,
        Dispatch::Skipped => return Err(AppError::MissingDate),
    };

    if json {
        let output = ResolveOutput {
            form: dispatcher.sink(),
            local: timestamp.to_rfc3339()?,
            category: timestamp.category(),
            timezone: resolver.zone().name(),
        };
        serde_json::to_writer(&mut *out, &output)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", timestamp.to_iso_string()?)?;
    }

    Ok(())
}

fn table_command(out: &mut impl Write) -> Result<(), AppError> {
    for category in MealCategory::all() {
        writeln!(out, "{:<10} {:02}:00", category.to_string(), category.hour_offset())?;
    }
    Ok(())
}

#[tracing::instrument(skip(config, out))]
fn before_today_command(
    config: &Config,
    at: &str,
    timezone_override: Option<String>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let instant =
        OffsetDateTime::parse(at, &Rfc3339).map_err(|e| AppError::InvalidInstant {
            value: at.to_owned(),
            reason: e.to_string(),
        })?;
    let zone = zone_for(config, timezone_override)?;

    writeln!(out, "{}", is_before_today(instant, &zone, &SystemClock))?;
    Ok(())
}
