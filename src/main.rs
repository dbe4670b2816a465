//! tagbox - pick tags in the terminal and print them.

use std::process::ExitCode;

use clap::Parser;

use tagbox::app::{App, AppState};
use tagbox::cli::Cli;
use tagbox::config::Config;
use tagbox::error::Result;
use tagbox::events::EventHandler;
use tagbox::logging;
use tagbox::terminal::TerminalSession;
use tagbox::ui::TagInput;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_dir.clone()) {
        eprintln!("tagbox: logging disabled: {}", e);
    }

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "tagbox failed");
            eprintln!("tagbox: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut settings = config.settings;
    cli.apply_overrides(&mut settings);

    let (suggestions, tags) = cli.build_input(&settings)?;
    let mut app = App::new(TagInput::with_settings(suggestions, tags, &settings));

    {
        let mut session = TerminalSession::start()?;
        app.run(&mut session, &EventHandler::new())?;
    }

    logging::shutdown(app.tags().len());
    match app.state() {
        AppState::Cancelled => Ok(ExitCode::from(130)),
        _ => {
            let output = cli.format_tags(app.tags())?;
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
