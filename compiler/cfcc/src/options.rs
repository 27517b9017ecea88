//! Command-line options.

use std::path::PathBuf;

use crate::CliError;

pub const USAGE: &str = "\
Usage: cfcc --source=<dir> [options]

Options:
  --source=<dir>    Source directory (repeatable)
  --include=<dir>   Include directory of installed parcels (repeatable)
  --dest=<dir>      Output directory for generated code (default: autogen)
  --host=<lang>     Load parcel_<lang>.json host data next to each .cfp file
  --modified        Treat every file as modified
  -v, --verbose     Print symbols and parents of every class
  -h, --help        Show this message";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub source_dirs: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub dest: PathBuf,
    pub host: Option<String>,
    pub force_modified: bool,
    pub verbose: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            source_dirs: Vec::new(),
            include_dirs: Vec::new(),
            dest: PathBuf::from("autogen"),
            host: None,
            force_modified: false,
            verbose: false,
            help: false,
        }
    }
}

/// Parse options from command line arguments, program name excluded.
///
/// At least one `--source` is required unless help was requested.
pub fn parse_options(args: &[String]) -> Result<Options, CliError> {
    let mut options = Options::default();

    for arg in args {
        if let Some(dir) = arg.strip_prefix("--source=") {
            options.source_dirs.push(non_empty("--source", dir)?.into());
        } else if let Some(dir) = arg.strip_prefix("--include=") {
            options.include_dirs.push(non_empty("--include", dir)?.into());
        } else if let Some(dir) = arg.strip_prefix("--dest=") {
            options.dest = non_empty("--dest", dir)?.into();
        } else if let Some(lang) = arg.strip_prefix("--host=") {
            options.host = Some(non_empty("--host", lang)?.to_string());
        } else if arg == "--modified" {
            options.force_modified = true;
        } else if arg == "-v" || arg == "--verbose" {
            options.verbose = true;
        } else if arg == "-h" || arg == "--help" {
            options.help = true;
        } else {
            return Err(CliError::Usage(format!("unknown option '{arg}'")));
        }
    }

    if options.source_dirs.is_empty() && !options.help {
        return Err(CliError::Usage("at least one --source=<dir> is required".into()));
    }
    Ok(options)
}

fn non_empty<'a>(flag: &str, value: &'a str) -> Result<&'a str, CliError> {
    if value.is_empty() {
        return Err(CliError::Usage(format!("{flag} needs a value")));
    }
    Ok(value)
}
