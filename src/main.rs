use std::io::{self, IsTerminal};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use testdox::filter::{EventFilter, FilterConfig};
use testdox::runner::{run_tests, RunnerConfig};

#[derive(Parser, Debug)]
#[command(name = "testdox")]
#[command(about = "Turns 'go test -json' output into readable test documentation sentences")]
#[command(version)]
struct Args {
    /// Disable colored status glyphs
    #[arg(long)]
    no_color: bool,

    /// Arguments passed through to 'go test'
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    go_test_args: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let color = !args.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && io::stdout().is_terminal();

    // With a terminal on stdin there is nothing to filter, so launch the
    // runner ourselves; otherwise compose as `go test -json ./... | testdox`.
    let result = if io::stdin().is_terminal() {
        let config = RunnerConfig {
            color,
            ..RunnerConfig::default()
        };
        run_tests(&config, &args.go_test_args, io::stdout().lock())
    } else {
        let mut filter = EventFilter::new(FilterConfig { color }, io::stdout().lock());
        filter.run(io::stdin().lock())
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("testdox: {err:#}");
            std::process::exit(1);
        }
    }
}
