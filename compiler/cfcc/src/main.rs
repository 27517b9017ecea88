//! CFC command-line driver.

use std::process::ExitCode;

fn main() -> ExitCode {
    cfcc::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match cfcc::parse_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprintln!("{}", cfcc::USAGE);
            return ExitCode::from(2);
        }
    };
    if options.help {
        println!("{}", cfcc::USAGE);
        return ExitCode::SUCCESS;
    }

    match cfcc::run(&options) {
        Ok(report) => {
            print!("{}", report.render(options.verbose));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
