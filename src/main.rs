//! pxm - Command-line front end for the pixmorph photo effects

use std::process::ExitCode;

use pixmorph::cli;

fn main() -> ExitCode {
    cli::run()
}
