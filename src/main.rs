use clap::{App, Arg, ArgMatches};
use clause_gen::*;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("cannot create {path}: {source}")]
    CreateOutput { path: String, source: io::Error },
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Generate(GenerateError::InvalidConfiguration(_)) => 1,
            CliError::Generate(GenerateError::WriteFailure(_)) | CliError::CreateOutput { .. } => 2,
            CliError::Generate(_) => 3,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = app().get_matches();

    let exit_code = match run(&matches) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(exit_code);
}

fn app() -> App<'static, 'static> {
    App::new("clause-gen")
        .about("writes a random clause set, one clause per line")
        .arg(
            Arg::with_name("variables")
                .short("n")
                .long("variables")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1000")
                .help("number of variables in the pool (at least 10)"),
        )
        .arg(
            Arg::with_name("clauses")
                .short("m")
                .long("clauses")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("10000")
                .help("number of clauses to write"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("seed for the random generator"),
        )
        .arg(
            Arg::with_name("progress-every")
                .long("progress-every")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1000")
                .help("log progress every this many clauses"),
        )
        .arg(Arg::with_name("OUTPUT").help("output file (stdout if omitted)").index(1))
}

/// Validates every argument before the output file is created.
fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let config = GeneratorConfig::new(count_arg(matches, "variables")?, count_arg(matches, "clauses")?)
        .with_progress_interval(count_arg(matches, "progress-every")?);
    config.validate()?;

    let seed = match matches.value_of("seed") {
        Some(s) => s
            .parse::<u64>()
            .map_err(|_| GenerateError::InvalidConfiguration(format!("seed must be a u64, got {:?}", s)))?,
        None => rand::random(),
    };
    info!("seed {}", seed);

    let mut sink: Box<dyn Write> = match matches.value_of("OUTPUT") {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::CreateOutput {
                path: path.to_string(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };

    generate(config, StdRng::seed_from_u64(seed), &mut sink, &mut LogObserver)?;
    Ok(())
}

fn count_arg(matches: &ArgMatches, name: &str) -> Result<usize, GenerateError> {
    parse_count(name, matches.value_of(name).unwrap_or_default())
}
