// SPDX-License-Identifier: Apache-2.0

//! Command line driver for checking that a `debug_continue!`-guarded loop
//! counts the same as its bare reference loop.
//!
//! Commands are given like:
//!
//! ```text
//! debug-equiv-driver <global-options> <command> <command-args-and-options>
//! ```
//!
//! Commands are:
//!
//! - check-input: Checks a single input value.
//! - sweep: Checks every input in a half-open range.
//! - sample: Checks seeded random inputs.
//! - boundary: Checks the inputs at and around the iteration span edges.
//! - strerror: Prints the platform description of an error number.
//! - gettext: Prints the translation of a message id.
//!
//! Sample usage:
//!
//! ```shell
//! $ cargo run -- check-input --input=42
//! $ cargo run -- sweep --lo=-1000 --hi=1000 --guard=arithmetic \
//!     --arithmetic_level=2
//! $ cargo run -- --config=$HOME/debug-equiv.toml sample --count=100000
//! ```

mod equiv_cmd;
mod equiv_config;
mod locale_cmd;
mod report_cli_error;

use clap::{Arg, ArgAction};
use serde::Deserialize;

use crate::equiv_config::EquivConfig;
use crate::report_cli_error::report_cli_error_and_exit;

#[derive(Deserialize)]
struct DebugEquivToml {
    #[serde(default)]
    equiv: EquivConfig,
}

trait AppExt {
    fn add_guard_args(self) -> Self;
    fn add_bool_arg(self, long: &'static str, help: &'static str) -> Self;
    fn add_int_arg(self, long: &'static str, help: &'static str, required: bool) -> Self;
}

impl AppExt for clap::Command {
    fn add_guard_args(self) -> Self {
        (self as clap::Command)
            .arg(
                Arg::new("guard")
                    .long("guard")
                    .value_name("GUARD")
                    .help("Guard wrapping the skip")
                    .value_parser(["level", "arithmetic"])
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("level")
                    .long("level")
                    .value_name("LEVEL")
                    .help("Debug level the verbosity gate is asked to enable (name or 1-8)")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("threshold")
                    .long("threshold")
                    .value_name("LEVEL")
                    .help("Least severe level enabled by the verbosity gate")
                    .action(ArgAction::Set),
            )
            .add_int_arg(
                "arithmetic_level",
                "Raw level for the arithmetic guard",
                false,
            )
            .arg(
                Arg::new("message")
                    .long("message")
                    .value_name("MESSAGE")
                    .help("Diagnostic emitted before each guarded skip")
                    .action(ArgAction::Set),
            )
            .add_bool_arg("output_json", "Print the report as JSON")
    }

    /// Adds a boolean argument to the command -- the helper ensures we have a
    /// uniform style/handling for boolean arguments.
    fn add_bool_arg(self, long: &'static str, help: &'static str) -> Self {
        (self as clap::Command).arg(
            Arg::new(long)
                .long(long)
                .value_name("BOOL")
                .action(ArgAction::Set)
                .value_parser(["true", "false"])
                .num_args(1)
                .help(help),
        )
    }

    fn add_int_arg(self, long: &'static str, help: &'static str, required: bool) -> Self {
        (self as clap::Command).arg(
            Arg::new(long)
                .long(long)
                .value_name("INT")
                .action(ArgAction::Set)
                .allow_negative_numbers(true)
                .required(required)
                .help(help),
        )
    }
}

fn load_config(path: &str) -> EquivConfig {
    if !std::path::Path::new(path).exists() {
        report_cli_error_and_exit(
            "config toml file does not exist",
            None,
            vec![("path", path)],
        );
    }
    let toml_str = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => report_cli_error_and_exit(
            &format!("could not read config toml file: {}", e),
            None,
            vec![("path", path)],
        ),
    };
    match toml::from_str::<DebugEquivToml>(&toml_str) {
        Ok(parsed) => parsed.equiv,
        Err(e) => report_cli_error_and_exit(
            &format!("could not parse config toml file: {}", e),
            None,
            vec![("path", path)],
        ),
    }
}

fn main() {
    let _ = env_logger::try_init();

    log::info!(
        "debug-equiv-driver starting; version: {}",
        env!("CARGO_PKG_VERSION")
    );

    let matches = clap::Command::new("debug-equiv-driver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Checks debug-guarded loop skips against their reference loop")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("CONFIG")
                .help("Path to a debug-equiv TOML config file")
                .action(ArgAction::Set),
        )
        .subcommand(clap::Command::new("version").about("Prints the version of the driver"))
        .subcommand(
            clap::Command::new("check-input")
                .about("Checks the guarded loop on a single input")
                .add_int_arg("input", "Input value", true)
                .add_guard_args(),
        )
        .subcommand(
            clap::Command::new("sweep")
                .about("Checks every input in [lo, hi)")
                .add_int_arg("lo", "Inclusive lower bound", true)
                .add_int_arg("hi", "Exclusive upper bound", true)
                .add_guard_args(),
        )
        .subcommand(
            clap::Command::new("sample")
                .about("Checks seeded random inputs")
                .add_int_arg("seed", "Random seed", false)
                .add_int_arg("count", "Number of inputs to draw", false)
                .add_guard_args(),
        )
        .subcommand(
            clap::Command::new("boundary")
                .about("Checks the inputs at and around the iteration span edges")
                .add_guard_args(),
        )
        .subcommand(
            clap::Command::new("strerror")
                .about("Prints the platform description of an error number")
                .arg(
                    Arg::new("ERRNO")
                        .help("Error number")
                        .required(true)
                        .allow_negative_numbers(true)
                        .index(1),
                ),
        )
        .subcommand(
            clap::Command::new("gettext")
                .about("Prints the translation of a message id")
                .arg(
                    Arg::new("MSGID")
                        .help("Message id")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let config: Option<EquivConfig> = matches.get_one::<String>("config").map(|p| load_config(p));
    log::debug!("config: {:?}", config);

    if let Some(matches) = matches.subcommand_matches("check-input") {
        equiv_cmd::handle_check_input(matches, &config);
    } else if let Some(matches) = matches.subcommand_matches("sweep") {
        equiv_cmd::handle_sweep(matches, &config);
    } else if let Some(matches) = matches.subcommand_matches("sample") {
        equiv_cmd::handle_sample(matches, &config);
    } else if let Some(matches) = matches.subcommand_matches("boundary") {
        equiv_cmd::handle_boundary(matches, &config);
    } else if let Some(matches) = matches.subcommand_matches("strerror") {
        locale_cmd::handle_strerror(matches);
    } else if let Some(matches) = matches.subcommand_matches("gettext") {
        locale_cmd::handle_gettext(matches);
    } else if let Some(_matches) = matches.subcommand_matches("version") {
        println!("{}", env!("CARGO_PKG_VERSION"));
    } else {
        report_cli_error_and_exit("No valid subcommand provided.", None, vec![]);
    }
}
