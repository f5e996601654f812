//! Grimoire Engine - Main entry point.
//!
//! Loads a character document, normalizes its spell slot fields, applies one
//! command, and prints the result as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context};
use grimoire_domain::{RestType, SlotChoice};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grimoire_engine::infrastructure::config::{load_dotenv_from_repo_root, EngineConfig};
use grimoire_engine::record::CharacterRecord;
use grimoire_engine::App;

const USAGE: &str = "usage: grimoire-engine <character.json> \
[normalize | cast <level> [standard:<L>|pact] | long-rest | short-rest | \
adjust <standard:<L>|pact> <delta> | options <level> | access]";

/// One engine operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Normalize,
    Cast { level: u8, choice: Option<String> },
    Rest(RestType),
    Adjust { pool: SlotChoice, delta: i32 },
    Options { level: u8 },
    Access,
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        Ok(match args.as_slice() {
            [] | ["normalize"] => Command::Normalize,
            ["cast", level] => Command::Cast {
                level: parse_level(level)?,
                choice: None,
            },
            ["cast", level, choice] => Command::Cast {
                level: parse_level(level)?,
                choice: Some((*choice).to_string()),
            },
            ["long-rest"] => Command::Rest(RestType::Long),
            ["short-rest"] => Command::Rest(RestType::Short),
            ["adjust", pool, delta] => Command::Adjust {
                pool: pool.parse()?,
                delta: delta
                    .parse()
                    .with_context(|| format!("Invalid delta: {}", delta))?,
            },
            ["options", level] => Command::Options {
                level: parse_level(level)?,
            },
            ["access"] => Command::Access,
            _ => bail!("{}", USAGE),
        })
    }
}

fn parse_level(raw: &str) -> anyhow::Result<u8> {
    raw.parse()
        .with_context(|| format!("Invalid spell level: {}", raw))
}

fn main() -> anyhow::Result<()> {
    // Load environment from repo root when run through cargo.
    load_dotenv_from_repo_root();
    let config = EngineConfig::from_env();

    // Logs go to stderr; stdout carries the JSON result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("{}", USAGE);
    };
    let command = Command::parse(&args.collect::<Vec<_>>())?;

    let app = App::from_config(&config).context("Failed to load class catalog")?;

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let mut record = CharacterRecord::from_value(document);

    let spellcasting = &app.spellcasting;
    spellcasting.recalculate(&mut record);

    let output = match command {
        Command::Normalize => record.into_value(),
        Command::Cast { level, choice } => {
            let outcome = spellcasting.cast_with_choice_str(&mut record, level, choice.as_deref());
            json!({ "cast": outcome, "character": record })
        }
        Command::Rest(rest) => {
            spellcasting.rest(&mut record, rest);
            record.into_value()
        }
        Command::Adjust { pool, delta } => {
            let current = spellcasting.adjust_slots(&mut record, pool, delta)?;
            json!({ "current": current, "character": record })
        }
        Command::Options { level } => json!({
            "canCast": spellcasting.can_cast(&record, level),
            "options": spellcasting.cast_options(&record, level),
        }),
        Command::Access => json!(spellcasting.spell_access(&record)),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
