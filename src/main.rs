use std::io;
use std::process;

use flowscript_runner::cli::parse_options;
use flowscript_runner::harness::run_harness;
use flowscript_runner::logging::init_logger;

fn main() {
    let options = match parse_options() {
        Ok(options) => options,
        Err(e) => process::exit(e.exit_code()),
    };

    if let Err(e) = init_logger(options.verbosity) {
        eprintln!("Failed to initialise logging: {e}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run_harness(&options, &mut out) {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}
