//! PhoneBook entry point.
//!
//! # Responsibility
//! - Open (creating if absent) `phonebook.db` in the working directory.
//! - Run the interactive shell and release the store on exit.

use log::{error, info};
use phonebook_cli::{EditorPrompt, Shell};
use phonebook_core::{init_logging, AppConfig, ContactStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("error: cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = AppConfig::for_working_dir(working_dir);

    // The shell still works without file logs.
    if let Err(err) = init_logging(&config.log) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut store = match ContactStore::initialize(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            error!("event=app_exit module=cli status=error error_code=store_open_failed");
            eprintln!(
                "error: cannot open phone book at `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let session = EditorPrompt::new()
        .map_err(|err| err.to_string())
        .and_then(|prompt| {
            let stdout = std::io::stdout();
            Shell::new(&store, prompt, stdout.lock())
                .run()
                .map_err(|err| err.to_string())
        });

    if let Err(err) = store.close() {
        eprintln!("warning: {err}");
    }

    match session {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=app_exit module=cli status=error error_code=session_failed");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
