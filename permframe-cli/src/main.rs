#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]

use log::LevelFilter;
use permframe_cli::Command;
use structopt::StructOpt;

fn main() {
    let args = CliArgs::from_args();
    permframe_cli::init_logging(args.log_level());
    match permframe_cli::run(&args.command) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            log::error!("{:?}", e);
            std::process::exit(1);
        }
    }
}

/// A struct storing the CLI args taken by `permframe`.  `StructOpt` will generate the argument
/// parsing/help code for us.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "permframe",
    about = "Explore permutations, the groups they generate and their conjugates"
)]
pub struct CliArgs {
    #[structopt(subcommand)]
    pub command: Command,

    /// Makes `permframe` print more output (`-vv` will produce all output).
    #[structopt(short, long = "verbose", parse(from_occurrences), global = true)]
    pub verbosity: usize,
    /// Makes `permframe` print less output (`-qq` will only produce errors).
    #[structopt(short, long = "quiet", parse(from_occurrences), global = true)]
    pub quietness: usize,
}

impl CliArgs {
    /// Parse the `-q`/`-v` args into the [`LevelFilter`] to give to the `log` library
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity as isize - self.quietness as isize {
            x if x < -2 => LevelFilter::Off, // -qqq (or more `q`s)
            -2 => LevelFilter::Error,        // -qq
            -1 => LevelFilter::Warn,         // -q
            0 => LevelFilter::Info,          // <none of -q or -v>
            1 => LevelFilter::Debug,         // -v
            _ => LevelFilter::Trace,         // -vv (or more `v`s)
        }
    }
}
