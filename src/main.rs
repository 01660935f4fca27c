use std::{fs, path::PathBuf};

use clap::Parser;

use rulesub::{Mode, Options, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to replace content in. Can be repeated, but only one file is currently supported
    #[arg(short = 'f', long, required = true)]
    input_file: Vec<PathBuf>,

    /// Rules file: search terms and replacement separated by delimiter, one rule per line
    regex_file: PathBuf,

    /// Where to write result. Overwritten if exists
    #[arg(default_value = DEFAULT_OUTPUT)]
    output_file: PathBuf,

    /// Treat search terms as regex patterns
    #[arg(short, long)]
    regex: bool,

    /// Match case insensitively
    #[arg(short, long)]
    ignore_case: bool,

    /// Rule field delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Options file (ron format). Flags take precedence over it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn read_options(args: &Args) -> Result<Options, String> {
    let mut options = if let Some(config) = &args.config {
        let config_string =
            fs::read_to_string(config).map_err(|err| format!("reading config file: {err}"))?;

        ron::from_str::<Options>(&config_string).map_err(|err| format!("parsing config: {err}"))?
    } else {
        Options::default()
    };

    if args.regex {
        options.mode = Mode::Regex;
    }
    if args.ignore_case {
        options.ignore_case = true;
    }
    if let Some(delimiter) = args.delimiter {
        options.delimiter = delimiter;
    }

    Ok(options)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let [input_file] = args.input_file.as_slice() else {
        return Err(format!(
            "expected exactly one input file, got {}",
            args.input_file.len()
        ));
    };

    let options = read_options(&args)?;
    log::debug!("running with {options:?}");

    rulesub::replace_from_file(input_file, &args.regex_file, &args.output_file, &options)
        .map_err(|err| err.to_string())?;

    Ok(())
}
