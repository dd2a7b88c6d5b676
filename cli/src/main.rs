use std::path::PathBuf;

use clap::Parser;

mod cli;
mod logger;
mod render;

use render::Format;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "boothmul", about = "Booth multiplier for 4-bit signed integers")]
struct Args {
    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sets the logging to write to a file.
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Selects the subcommand.
    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Multiplies two signed 4-bit integers and prints the step trace.
    Multiply {
        /// Multiplicand, -8 to 7.
        #[arg(allow_negative_numbers = true)]
        multiplicand: i32,

        /// Multiplier, -8 to 7.
        #[arg(allow_negative_numbers = true)]
        multiplier: i32,

        /// Output style.
        #[arg(long, value_enum, default_value_t = Format::Plain)]
        format: Format,

        /// Write the step trace to the specified file after printing.
        #[arg(long)]
        dump_trace: Option<PathBuf>,
    },
    /// Prints the version number.
    Version,
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    logger::configure(args.verbose, args.log_file)?;

    match args.action {
        Action::Multiply {
            multiplicand,
            multiplier,
            format,
            dump_trace,
        } => cli::multiply(multiplicand, multiplier, format, dump_trace.as_deref()),
        Action::Version => {
            println!("boothmul version {VERSION}");
            Ok(())
        }
    }
}
