// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command implementations for the `strava-weather` binary.

use crate::config::Config;
use crate::services::emoji::DEFAULT_EMOJI_FILE;
use crate::services::table::DEFAULT_ACTIVITY_TYPE;
use crate::services::{
    degrees_to_cardinal, ActivityTable, ApiClient, EmojiTable, StravaClient, WeatherClient,
    WeatherEnricher,
};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Command {
    /// Add weather to activities from the last few days
    Recent {
        /// How many days back to look (today included)
        #[arg(short, long, default_value_t = 7)]
        days: u32,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        enrich: EnrichArgs,
    },

    /// Add weather to specific activities
    Enrich {
        /// Strava activity ids
        #[arg(required = true)]
        ids: Vec<u64>,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        enrich: EnrichArgs,
    },

    /// Print the activity table
    Activities {
        /// Only show activities from the last N days
        #[arg(short, long)]
        days: Option<u32>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Inspect or export the weather emoji table
    #[command(subcommand)]
    Emojis(EmojiCommand),

    /// Convert a wind bearing in degrees to a compass label
    Cardinal {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
}

#[derive(Subcommand)]
pub enum EmojiCommand {
    /// List every condition, time of day and glyph
    List,

    /// Write the builtin table as JSON
    Export {
        #[arg(short, long, default_value = DEFAULT_EMOJI_FILE)]
        path: PathBuf,
    },
}

/// Which activities to pull from Strava.
#[derive(Args)]
pub struct SourceArgs {
    /// Activity type to keep
    #[arg(long = "type", default_value = DEFAULT_ACTIVITY_TYPE)]
    pub activity_type: String,

    /// First page of the activity listing to fetch
    #[arg(long, default_value_t = 1)]
    pub first_page: u32,

    /// Last page of the activity listing to fetch
    #[arg(long, default_value_t = 99)]
    pub max_pages: u32,
}

#[derive(Args)]
pub struct EnrichArgs {
    /// Write to Strava (without this flag the run is a dry run)
    #[arg(long)]
    pub apply: bool,

    /// Emoji table JSON to use instead of the builtin one
    #[arg(long)]
    pub emojis: Option<PathBuf>,
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Recent {
            days,
            source,
            enrich,
        } => {
            let (enricher, table) = prepare(&source, &enrich).await?;
            let today = chrono::Local::now().date_naive();
            let report = enricher.enrich_recent(&table, days, today).await;
            println!("{}", report);
            Ok(())
        }
        Command::Enrich {
            ids,
            source,
            enrich,
        } => {
            let (enricher, table) = prepare(&source, &enrich).await?;
            let report = enricher.enrich_activities(&ids, &table).await;
            println!("{}", report);
            Ok(())
        }
        Command::Activities { days, source } => {
            let config = Config::from_env()?;
            let api = ApiClient::new(config.http_timeout)?;
            let strava = StravaClient::connect(api, &config).await?;
            let table = load_table(&strava, &source).await;
            print_table(&table, days);
            Ok(())
        }
        Command::Emojis(EmojiCommand::List) => {
            for (condition, period, emoji) in EmojiTable::builtin().iter() {
                println!("{} {} ({})", emoji.emoji_unicode, condition, period);
            }
            Ok(())
        }
        Command::Emojis(EmojiCommand::Export { path }) => {
            EmojiTable::builtin().write_json(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Command::Cardinal { degrees } => {
            println!("{}", degrees_to_cardinal(degrees));
            Ok(())
        }
    }
}

/// Authenticate, fetch and tabulate activities, and set up the enricher.
async fn prepare(
    source: &SourceArgs,
    enrich: &EnrichArgs,
) -> anyhow::Result<(WeatherEnricher, ActivityTable)> {
    let emojis = match &enrich.emojis {
        Some(path) => EmojiTable::read_json(path)?,
        None => EmojiTable::builtin(),
    };

    let config = Config::from_env()?;
    let api = ApiClient::new(config.http_timeout)?;
    let strava = StravaClient::connect(api.clone(), &config).await?;
    let table = load_table(&strava, source).await;
    let weather = WeatherClient::from_config(api, &config);

    if !enrich.apply {
        tracing::info!("Dry run: no activity will be modified (pass --apply to write)");
    }

    Ok((
        WeatherEnricher::new(strava, weather, emojis, !enrich.apply),
        table,
    ))
}

async fn load_table(strava: &StravaClient, source: &SourceArgs) -> ActivityTable {
    let activities = strava
        .fetch_activities(source.first_page, source.max_pages)
        .await;
    ActivityTable::build(&activities, &source.activity_type)
}

fn print_table(table: &ActivityTable, days: Option<u32>) {
    let today = chrono::Local::now().date_naive();
    let ids = days.map(|n| table.recent_ids(n, today));

    println!(
        "{:>12}  {:10}  {:>7}  {:>7}  {:16}  {:>20}  name",
        "id", "date", "km", "min", "mid time", "end lat,lon"
    );
    for row in table.rows() {
        if ids.as_ref().is_some_and(|ids| !ids.contains(&row.id)) {
            continue;
        }
        let end = match row.end_coordinates() {
            Some((lat, lon)) => format!("{:.4},{:.4}", lat, lon),
            None => "-".to_string(),
        };
        println!(
            "{:>12}  {:10}  {:>7.2}  {:>7.1}  {:16}  {:>20}  {}",
            row.id,
            row.start_date_local.to_string(),
            row.distance,
            row.moving_time,
            row.mid_time.format("%Y-%m-%d %H:%M").to_string(),
            end,
            row.name
        );
    }
}
