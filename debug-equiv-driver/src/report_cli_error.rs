// SPDX-License-Identifier: Apache-2.0

use colored::Colorize;

/// Exit status for every error the driver reports itself; a counterexample
/// is reported the same way as a bad flag.
pub const CLI_ERROR_EXIT_CODE: i32 = 1;

/// Renders the headline and one indented `key: value` line per detail. The
/// headline is bold red when `colorize` is set.
fn format_cli_error(
    message: &str,
    subcommand: Option<&str>,
    details: &[(&str, &str)],
    colorize: bool,
) -> String {
    let headline = if colorize {
        message.red().bold().to_string()
    } else {
        message.to_string()
    };
    let mut text = match subcommand {
        Some(subcommand) => format!("debug-equiv-driver: {}: {}\n", subcommand, headline),
        None => format!("debug-equiv-driver: {}\n", headline),
    };
    for (key, value) in details {
        text.push_str(&format!("  {}: {}\n", key, value));
    }
    text
}

pub fn report_cli_error_and_exit(
    message: &str,
    subcommand: Option<&str>,
    details: Vec<(&str, &str)>,
) -> ! {
    log::debug!(
        "reporting cli error; subcommand: {:?}; message: {}",
        subcommand,
        message
    );
    eprint!("{}", format_cli_error(message, subcommand, &details, true));
    std::process::exit(CLI_ERROR_EXIT_CODE);
}
