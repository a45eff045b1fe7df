//! dupefold - Duplicate File Collapser
//!
//! Entry point for the dupefold CLI application.

use clap::Parser;
use dupefold::{
    cli::Cli,
    error::{ExitCode, StructuredError},
};

fn main() {
    // Parse command-line arguments; an invalid or missing --type is a usage
    // error and clap terminates here, before any traversal happens.
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    // Run the application logic
    match dupefold::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;

            // Report the error
            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
