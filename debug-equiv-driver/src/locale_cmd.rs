// SPDX-License-Identifier: Apache-2.0

use clap::ArgMatches;

use crate::report_cli_error::report_cli_error_and_exit;

pub fn handle_strerror(matches: &ArgMatches) {
    let errnum_text = matches
        .get_one::<String>("ERRNO")
        .expect("ERRNO is a required argument");
    match errnum_text.parse::<i32>() {
        Ok(errnum) => println!("{}", debug_equiv::describe_error(errnum)),
        Err(e) => report_cli_error_and_exit(
            &format!("invalid error number: {}", e),
            Some("strerror"),
            vec![("ERRNO", errnum_text)],
        ),
    }
}

pub fn handle_gettext(matches: &ArgMatches) {
    let message_id = matches
        .get_one::<String>("MSGID")
        .expect("MSGID is a required argument");
    println!("{}", debug_equiv::translate(message_id));
}
