use linesift::{messages, Cli, LineSift, OutputFormatter, OutputMode, SiftError, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    if let Err(e) = linesift::logging::init(cli.verbose, cli.quiet) {
        eprintln!("{:#}", e);
    }

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let linesift = match LineSift::from_cli(&cli) {
        Ok(linesift) => linesift,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    // Reported failures never change the exit status once the pipeline has run.
    linesift.run();
    0
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "linesift.toml".to_string());

    match LineSift::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("{}", messages::config_generated(&config_path));
            println!("{}", messages::config_usage(&config_path));
            0
        }
        Err(e) => {
            eprintln!("{}", messages::config_generation_failed(e.user_message()));
            if let Some(suggestion) = e.suggestion() {
                eprintln!("{}", messages::suggestion(suggestion));
            }
            1
        }
    }
}

fn print_startup_error(error: &SiftError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 1, false);
    formatter.print_user_friendly_error(error);
}
