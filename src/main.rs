use argh::FromArgs;
use lsh::Interpreter;
use lsh::command::Streams;
use std::io;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(FromArgs)]
/// A tiny interactive command interpreter.
struct Args {
    #[argh(switch, short = 'v')]
    /// log dispatch decisions and child exit statuses to stderr.
    verbose: bool,
}

fn main() {
    let args: Args = argh::from_env();
    init_tracing(args.verbose);

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut streams = Streams {
        stdin: &mut stdin,
        stdout: &mut stdout,
        stderr: &mut stderr,
    };

    if let Err(e) = Interpreter::default().repl(&mut streams) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

// RUST_LOG takes precedence over --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
