//! IO performance evaluation.
//!
//! ```bash
//! # 100 doubles, one repetition
//! cargo run --release --bin io-bench
//!
//! # 1M doubles, 5 repetitions
//! cargo run --release --bin io-bench -- 1000000 5
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use iobench::config::{DEFAULT_REPETITIONS, DEFAULT_VECTOR_LEN};
use iobench::{BenchConfig, BenchmarkRunner, NumericBuffer};

#[derive(Parser, Debug)]
#[command(name = "io-bench", version)]
#[command(about = "Time writing and reading a vector of doubles as ASCII and binary files")]
struct Args {
    /// Number of doubles in the vector.
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    vector_len: Option<u64>,

    /// How many write/read cycles to run.
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    repetitions: Option<u16>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let vector_len = match args.vector_len {
        Some(n) => usize::try_from(n).context("vector size does not fit in memory")?,
        None => DEFAULT_VECTOR_LEN,
    };
    let config = BenchConfig::default()
        .with_vector_len(vector_len)
        .with_repetitions(args.repetitions.unwrap_or(DEFAULT_REPETITIONS));
    config.validate()?;

    if args.vector_len.is_some() {
        println!("Vector size: {} B", config.vector_bytes());
    }
    if let Some(r) = args.repetitions {
        println!("Repetitions: {}", r);
    }

    println!();
    println!("IO performance evaluation code");
    println!("Vector size: {}", config.vector_len);
    println!();

    println!("Allocating memory...");
    let mut vec_out = NumericBuffer::zeroed(config.vector_len);
    let mut vec_in = NumericBuffer::zeroed(config.vector_len);

    println!("Populating the vector with random numbers...");
    vec_out.populate(config.lower, config.upper)?;

    let runner = BenchmarkRunner::with_config(&config);
    for n in 0..config.repetitions {
        println!(" #{}", n);
        let results = runner.run_cycle_with(&vec_out, &mut vec_in, |op, format| {
            println!("{} vector in {} mode...", op, format);
        });

        println!();
        print!("{}", results);
    }

    Ok(())
}
