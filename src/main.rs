//! The mincc compiler CLI.
//!
//! This binary compiles one source file to x86-64 assembly, printed to
//! standard output or written to a file with `-o`. Compilation and
//! error-reporting orchestration live in the driver module.

use clap::Parser;

mod diagnostics;
mod driver;

/// Command-line interface for the mincc compiler.
#[derive(Parser)]
#[command(name = "mincc")]
#[command(about = "A small C compiler targeting x86-64", long_about = None)]
struct Cli {
    /// The source file to compile (e.g., `main.c`).
    file: String,

    /// Output path for the assembly. Defaults to standard output.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

/// Entry point for the mincc compiler.
fn main() {
    let cli = Cli::parse();
    std::process::exit(driver::run(&cli.file, cli.output.as_deref()));
}
