//! toon - compose and render cartoon characters from a roster

use std::process::ExitCode;

use toonkit::cli;

fn main() -> ExitCode {
    cli::run()
}
