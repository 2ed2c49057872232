use std::{env::var, str::FromStr};

use color_eyre::eyre::{eyre, Result, WrapErr};
use unoflip::{deck::GameVariant, rules::GameRules};

pub struct SimConfig {
    pub variant: GameVariant,
    pub players: usize,
    pub seed: Option<u64>,
    pub max_turns: usize,
    pub rules: GameRules,
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err_with(|| format!("`{name}` has an invalid value `{value}`")),
        Err(_) => Ok(default),
    }
}

impl SimConfig {
    /// Reads the match setup from `UNOFLIP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let variant = match var("UNOFLIP_VARIANT") {
            Ok(value) => value.trim().parse::<GameVariant>().map_err(|_| {
                eyre!("`UNOFLIP_VARIANT` must be one of Classic, Flip or AllWild, got `{value}`")
            })?,
            Err(_) => GameVariant::Classic,
        };

        let mut rules = GameRules::default()
            .with_uno_penalty(env_or("UNOFLIP_UNO_PENALTY", false)?)
            .with_skip_after_draw(env_or("UNOFLIP_SKIP_AFTER_DRAW", false)?)
            .with_tie_on_exhaustion(env_or("UNOFLIP_TIE_ON_EXHAUSTION", false)?);
        if let Ok(threshold) = var("UNOFLIP_SCORING") {
            let threshold = threshold
                .trim()
                .parse::<u32>()
                .wrap_err("`UNOFLIP_SCORING` must be a point threshold")?;
            rules = rules.with_cumulative_scoring(threshold);
        }

        let seed = match var("UNOFLIP_SEED") {
            Ok(value) => Some(
                value
                    .trim()
                    .parse::<u64>()
                    .wrap_err("`UNOFLIP_SEED` must be a number")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            variant,
            players: env_or("UNOFLIP_PLAYERS", 4)?,
            seed,
            max_turns: env_or("UNOFLIP_MAX_TURNS", 10_000)?,
            rules,
        })
    }
}
