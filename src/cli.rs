use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Fit flat CSV rows into nested typed records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Coerce every row of a race results CSV into a race record and emit JSON
    Fit(FitArgs),
    /// Print the member schema of a target type as JSON
    Describe(DescribeArgs),
}

#[derive(Debug, Args)]
pub struct FitArgs {
    /// Input CSV file (`-` for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Output JSON file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Drop rows that do not fit instead of failing
    #[arg(long = "skip-unfit")]
    pub skip_unfit: bool,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Target type to describe
    #[arg(long, value_enum, default_value_t = Target::Race)]
    pub target: Target,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum Target {
    Race,
    Lane,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_delimiter_accepts_names_and_characters() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter("semicolon"), Ok(b';'));
        assert_eq!(parse_delimiter("#"), Ok(b'#'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn fit_arguments_parse() {
        let cli = Cli::try_parse_from(["csv-fit", "fit", "-i", "races.csv", "--skip-unfit"])
            .unwrap();
        match cli.command {
            Commands::Fit(args) => {
                assert!(args.skip_unfit);
                assert!(args.output.is_none());
                assert!(!args.pretty);
            }
            other => panic!("Expected fit command, got {other:?}"),
        }
    }
}
