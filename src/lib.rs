#[macro_use]
mod macros;

pub mod cli;
pub mod coerce;
pub mod convert;
pub mod error;
pub mod io_utils;
pub mod matcher;
pub mod pattern;
pub mod race;
pub mod record;
pub mod schema;
pub mod timespan;

pub use coerce::{FitType, Fields, coerce, convert, try_coerce};
pub use error::TypeFittingError;
pub use pattern::NamingPattern;
pub use record::{Entry, FlatRecord};
pub use schema::{MemberDescriptor, MemberKind, describe};
pub use timespan::TimeSpan;

use std::{env, io::Write, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use crate::{
    cli::{Cli, Commands, DescribeArgs, FitArgs, Target},
    race::{Lane, Race},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_fit", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Fit(args) => handle_fit(&args),
        Commands::Describe(args) => handle_describe(&args),
    }
}

fn handle_fit(args: &FitArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Fitting '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(delimiter)
    );
    let mut reader = io_utils::open_csv_reader_from_path(&args.input, delimiter)?;
    let records = io_utils::read_records(&mut reader, encoding)
        .with_context(|| format!("Reading records from {:?}", args.input))?;
    debug!("Read {} row(s)", records.len());

    let mut races = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let row_number = idx + 1;
        if args.skip_unfit {
            match try_coerce::<Race>(record) {
                Some(race) => races.push(race),
                None => warn!("Skipping row {row_number}: it does not fit a race"),
            }
        } else {
            let race = coerce::<Race>(record)
                .with_context(|| format!("Fitting row {row_number} into a race"))?;
            races.push(race);
        }
    }

    let mut output = io_utils::open_output(args.output.as_deref())?;
    if args.pretty {
        serde_json::to_writer_pretty(&mut output, &races)?;
    } else {
        serde_json::to_writer(&mut output, &races)?;
    }
    writeln!(output)?;
    output.flush()?;
    info!(
        "Fitted {} of {} row(s)",
        races.len(),
        records.len()
    );
    Ok(())
}

fn handle_describe(args: &DescribeArgs) -> Result<()> {
    let members = match args.target {
        Target::Race => describe::<Race>(),
        Target::Lane => describe::<Lane>(),
    };
    let rendered = serde_json::to_string_pretty(&members)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
