// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;
use debug_equiv::{ArithmeticGuard, DebugLevel, LevelGuard, SkipGuard, VerbosityGate};
use serde::Deserialize;

pub const DEFAULT_SEED: u64 = 0;
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardKind {
    Level,
    Arithmetic,
}

impl std::str::FromStr for GuardKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "level" => Ok(Self::Level),
            "arithmetic" => Ok(Self::Arithmetic),
            _ => Err(format!("invalid guard kind: {}", s)),
        }
    }
}

/// Contents of the `[equiv]` table in a driver config file. Command line
/// flags take precedence over every field here.
#[derive(Debug, Default, Deserialize)]
pub struct EquivConfig {
    pub guard: Option<GuardKind>,

    /// Debug level the verbosity gate is asked to enable.
    pub level: Option<DebugLevel>,

    /// Least severe level the verbosity gate lets through.
    pub threshold: Option<DebugLevel>,

    /// Raw level fed to the arithmetic guard.
    pub arithmetic_level: Option<i32>,

    /// Diagnostic emitted before each guarded skip.
    pub message: Option<String>,

    pub seed: Option<u64>,
    pub sample_count: Option<usize>,
}

/// Parses the string value of flag `name`, falling back to `config_value`
/// when the flag is absent.
pub fn get_flag_or_config<T>(
    matches: &ArgMatches,
    name: &str,
    config_value: Option<T>,
) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match matches.try_get_one::<String>(name) {
        Ok(Some(text)) => text
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("invalid value for --{}: {:?}: {}", name, text, e)),
        _ => Ok(config_value),
    }
}

pub fn build_guard(
    matches: &ArgMatches,
    config: &Option<EquivConfig>,
) -> Result<Box<dyn SkipGuard>, String> {
    let config = config.as_ref();
    let kind = get_flag_or_config(matches, "guard", config.and_then(|c| c.guard))?
        .unwrap_or(GuardKind::Level);
    match kind {
        GuardKind::Level => {
            let level = get_flag_or_config(matches, "level", config.and_then(|c| c.level))?
                .unwrap_or(DebugLevel::Notice);
            let threshold =
                get_flag_or_config(matches, "threshold", config.and_then(|c| c.threshold))?
                    .unwrap_or_else(|| VerbosityGate::default().threshold());
            Ok(Box::new(LevelGuard::new(
                level,
                VerbosityGate::new(threshold),
            )))
        }
        GuardKind::Arithmetic => {
            let raw_level = get_flag_or_config(
                matches,
                "arithmetic_level",
                config.and_then(|c| c.arithmetic_level),
            )?
            .unwrap_or(1);
            Ok(Box::new(ArithmeticGuard::new(raw_level)))
        }
    }
}

pub fn get_message(matches: &ArgMatches, config: &Option<EquivConfig>) -> String {
    matches
        .try_get_one::<String>("message")
        .ok()
        .flatten()
        .cloned()
        .or_else(|| config.as_ref().and_then(|c| c.message.clone()))
        .unwrap_or_else(|| debug_equiv::equiv::DEFAULT_MESSAGE.to_string())
}

pub fn get_output_json(matches: &ArgMatches) -> bool {
    matches
        .try_get_one::<String>("output_json")
        .ok()
        .flatten()
        .map(|s| s == "true")
        .unwrap_or(false)
}
