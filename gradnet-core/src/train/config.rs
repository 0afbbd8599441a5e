//! Training hyper-parameters, with an environment-variable overlay.
//!
//! Every field can be overridden by a `GRADNET_*` variable (see [`TrainConfig::from_env`]);
//! unset variables fall back to [`TrainConfig::default`].

use crate::error::GradNetError;

pub const ENV_PREFIX: &str = "GRADNET_";
pub const ENV_EPOCHS: &str = "EPOCHS";
pub const ENV_LEARNING_RATE: &str = "LEARNING_RATE";
pub const ENV_SEED: &str = "SEED";
pub const ENV_SAMPLE_LIMIT: &str = "SAMPLE_LIMIT";
pub const ENV_HIDDEN: &str = "HIDDEN";

#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Full passes over the training samples.
    pub epochs: usize,
    /// Step size of the gradient-descent update.
    pub learning_rate: f64,
    /// Seed for the generator that initializes parameters (and shuffles, if used).
    pub seed: u64,
    /// Only the first `n` training samples are used, when set.
    pub sample_limit: Option<usize>,
    /// Hidden layer sizes; the output layer is sized by the number of classes.
    pub hidden_layers: Vec<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 100,
            learning_rate: 0.1,
            seed: 0,
            sample_limit: Some(5000),
            hidden_layers: vec![30],
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), GradNetError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(GradNetError::InvalidConfig(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if self.sample_limit == Some(0) {
            return Err(GradNetError::InvalidConfig(
                "sample_limit must be at least 1 when set".to_string(),
            ));
        }
        if self.hidden_layers.contains(&0) {
            return Err(GradNetError::InvalidConfig(
                "hidden layers must have at least one unit".to_string(),
            ));
        }
        Ok(())
    }

    /// Layer sizes for a network with `classes` outputs.
    pub fn layer_sizes(&self, classes: usize) -> Vec<usize> {
        let mut sizes = self.hidden_layers.clone();
        sizes.push(classes);
        sizes
    }

    /// Builds a config from `GRADNET_*` environment variables over the defaults.
    ///
    /// `GRADNET_SAMPLE_LIMIT=all` removes the limit; `GRADNET_HIDDEN` is a
    /// comma-separated list such as `30` or `64,32` (empty for no hidden layer).
    pub fn from_env() -> Result<Self, GradNetError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](TrainConfig::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GradNetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));
        let default = TrainConfig::default();

        let epochs = parse_var(ENV_EPOCHS, get(ENV_EPOCHS))?.unwrap_or(default.epochs);
        let learning_rate =
            parse_var(ENV_LEARNING_RATE, get(ENV_LEARNING_RATE))?.unwrap_or(default.learning_rate);
        let seed = parse_var(ENV_SEED, get(ENV_SEED))?.unwrap_or(default.seed);
        let sample_limit = match get(ENV_SAMPLE_LIMIT) {
            Some(raw) if raw.trim().eq_ignore_ascii_case("all") => None,
            raw => parse_var(ENV_SAMPLE_LIMIT, raw)?.or(default.sample_limit),
        };
        let hidden_layers = match get(ENV_HIDDEN) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_var(ENV_HIDDEN, Some(s.to_string())).map(|v| v.unwrap_or(0)))
                .collect::<Result<Vec<usize>, _>>()?,
            None => default.hidden_layers,
        };

        let config = TrainConfig {
            epochs,
            learning_rate,
            seed,
            sample_limit,
            hidden_layers,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(suffix: &str, raw: Option<String>) -> Result<Option<T>, GradNetError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
            GradNetError::InvalidConfig(format!("{ENV_PREFIX}{suffix}={raw:?}: {e}"))
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
