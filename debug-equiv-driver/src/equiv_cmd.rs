// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;
use debug_equiv::{EquivChecker, InputStrategy, LogSink};

use crate::equiv_config::{
    build_guard, get_flag_or_config, get_message, get_output_json, EquivConfig,
    DEFAULT_SAMPLE_COUNT, DEFAULT_SEED,
};
use crate::report_cli_error::report_cli_error_and_exit;

fn required_flag<T>(matches: &ArgMatches, name: &str, subcommand: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_flag_or_config::<T>(matches, name, None) {
        Ok(Some(value)) => value,
        Ok(None) => report_cli_error_and_exit(
            &format!("missing required flag --{}", name),
            Some(subcommand),
            vec![],
        ),
        Err(e) => report_cli_error_and_exit(&e, Some(subcommand), vec![]),
    }
}

fn run_equiv(
    subcommand: &str,
    strategy: InputStrategy,
    matches: &ArgMatches,
    config: &Option<EquivConfig>,
) {
    log::info!("{}; strategy: {}", subcommand, strategy);
    let guard = match build_guard(matches, config) {
        Ok(guard) => guard,
        Err(e) => report_cli_error_and_exit(&e, Some(subcommand), vec![]),
    };
    let checker = EquivChecker::new(guard).with_message(&get_message(matches, config));
    let report = checker.report(&strategy, &mut LogSink);

    if get_output_json(matches) {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => report_cli_error_and_exit(
                &format!("could not serialize report: {}", e),
                Some(subcommand),
                vec![],
            ),
        }
    }

    match report.counterexample {
        None => {
            if !get_output_json(matches) {
                println!(
                    "success: proved over {} input(s)",
                    report.inputs_checked.unwrap_or(0)
                );
            }
        }
        Some(cex) => report_cli_error_and_exit(
            "equivalence violation",
            Some(subcommand),
            vec![
                ("input", &cex.input.to_string()),
                ("reference", &cex.reference.to_string()),
                ("modified", &cex.modified.to_string()),
                ("guard", &report.guard),
                ("strategy", &report.strategy),
            ],
        ),
    }
}

pub fn handle_check_input(matches: &ArgMatches, config: &Option<EquivConfig>) {
    const SUBCOMMAND: &str = "check-input";
    let input: i32 = required_flag(matches, "input", SUBCOMMAND);
    run_equiv(SUBCOMMAND, InputStrategy::Single(input), matches, config);
}

pub fn handle_sweep(matches: &ArgMatches, config: &Option<EquivConfig>) {
    const SUBCOMMAND: &str = "sweep";
    let lo: i32 = required_flag(matches, "lo", SUBCOMMAND);
    let hi: i32 = required_flag(matches, "hi", SUBCOMMAND);
    let strategy = match InputStrategy::exhaustive(lo, hi) {
        Ok(strategy) => strategy,
        Err(e) => report_cli_error_and_exit(&e.to_string(), Some(SUBCOMMAND), vec![]),
    };
    run_equiv(SUBCOMMAND, strategy, matches, config);
}

pub fn handle_sample(matches: &ArgMatches, config: &Option<EquivConfig>) {
    const SUBCOMMAND: &str = "sample";
    let config_ref = config.as_ref();
    let seed = get_flag_or_config(matches, "seed", config_ref.and_then(|c| c.seed))
        .unwrap_or_else(|e| report_cli_error_and_exit(&e, Some(SUBCOMMAND), vec![]))
        .unwrap_or(DEFAULT_SEED);
    let count = get_flag_or_config(matches, "count", config_ref.and_then(|c| c.sample_count))
        .unwrap_or_else(|e| report_cli_error_and_exit(&e, Some(SUBCOMMAND), vec![]))
        .unwrap_or(DEFAULT_SAMPLE_COUNT);
    run_equiv(
        SUBCOMMAND,
        InputStrategy::Sampled { seed, count },
        matches,
        config,
    );
}

pub fn handle_boundary(matches: &ArgMatches, config: &Option<EquivConfig>) {
    run_equiv("boundary", InputStrategy::Boundary, matches, config);
}
