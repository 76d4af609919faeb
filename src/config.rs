//! Engine configuration, loaded from environment variables or default values.
//!
//! The compiled defaults reproduce the stock scoring blend; the environment
//! layer only exists so a deployment can experiment with the ranking without
//! a rebuild. Absent or invalid variables always fall back to the defaults.

use std::env;

use tracing::warn;

use crate::score::ScoringWeights;

/// Complete engine configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineConfig {
    scoring: ScoringWeights,
}

impl EngineConfig {
    const MARGIN_WEIGHT_VAR: &'static str = "STOWPLAN_SCORE_MARGIN_WEIGHT";
    const TURNOVER_WEIGHT_VAR: &'static str = "STOWPLAN_SCORE_TURNOVER_WEIGHT";
    const VOLUME_WEIGHT_VAR: &'static str = "STOWPLAN_SCORE_VOLUME_WEIGHT";

    /// Creates a configuration from the currently available environment
    /// variables.
    pub fn from_env() -> Self {
        let margin = load_weight(Self::MARGIN_WEIGHT_VAR, ScoringWeights::DEFAULT_MARGIN);
        let turnover = load_weight(Self::TURNOVER_WEIGHT_VAR, ScoringWeights::DEFAULT_TURNOVER);
        let volume = load_weight(Self::VOLUME_WEIGHT_VAR, ScoringWeights::DEFAULT_VOLUME);

        let scoring = ScoringWeights::builder()
            .margin(margin)
            .turnover(turnover)
            .volume(volume)
            .build();

        Self { scoring }
    }

    /// Returns the configured scoring weights.
    pub fn scoring_weights(&self) -> ScoringWeights {
        self.scoring
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!(var = name, %err, "environment access failed, using default");
            None
        }
    }
}

fn load_weight(var_name: &str, default: f64) -> f64 {
    match env_string(var_name) {
        Some(raw) => parse_weight(&raw, var_name, default),
        None => default,
    }
}

/// Parses one weight override. A weight must be a number in `0.0..=1.0`.
fn parse_weight(raw: &str, var_name: &str, default: f64) -> f64 {
    match raw.parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => {
            if (value - default).abs() > 1e-9 {
                warn!(
                    var = var_name,
                    value,
                    "score weight overridden, product ranking diverges from the stock blend"
                );
            }
            value
        }
        Ok(value) => {
            warn!(
                var = var_name,
                value,
                "weight must be between 0 and 1, using default"
            );
            default
        }
        Err(err) => {
            warn!(var = var_name, raw, %err, "could not parse weight, using default");
            default
        }
    }
}
