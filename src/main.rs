//! Shortcut Translator - look up a keyboard shortcut in another keymap.

mod cli;
mod logging;
mod session;
mod tui;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use keymap_core::{KeyCombo, Preferences};
use tracing::{error, info, warn};

use cli::Cli;
use session::{Session, result_label};

/// Exit code for bad arguments (unknown keymap, unparsable shortcut).
const EXIT_USAGE: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    // Must live for the entire run so buffered log lines are flushed.
    let _log_guard = logging::init(cli.log_dir.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let (session, warnings) = Session::load(&cli)?;
    for warning in warnings {
        warn!("{warning}");
        eprintln!("Warning: {}", warning);
    }

    if cli.list_keymaps {
        print_keymaps(&session);
        return Ok(ExitCode::SUCCESS);
    }

    let prefs_path = (!cli.no_user_config)
        .then(Preferences::default_path)
        .flatten();
    let mut prefs = load_prefs(prefs_path.as_deref());
    let (mut source, mut target) = prefs.resolve(&session.registry);
    if let Some(name) = cli.source.as_deref() {
        match session.registry.position(name) {
            Some(index) => source = index,
            None => return Ok(unknown_keymap(&session, name)),
        }
    }
    if let Some(name) = cli.target.as_deref() {
        match session.registry.position(name) {
            Some(index) => target = index,
            None => return Ok(unknown_keymap(&session, name)),
        }
    }

    if let Some(text) = cli.translate.as_deref() {
        return Ok(translate_once(&session, text, source, target));
    }

    let mut app = tui::App::new(session, source, target);
    tui::run(&mut app)?;

    if !cli.no_save && let Some(path) = prefs_path {
        save_prefs(&mut prefs, &app, &path);
    }
    info!("exiting");
    Ok(ExitCode::SUCCESS)
}

fn translate_once(session: &Session, text: &str, source: usize, target: usize) -> ExitCode {
    let combo: KeyCombo = match text.parse() {
        Ok(combo) => combo,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let results = session.translate(&combo, source, target);
    if results.is_empty() {
        println!("No shortcut found");
    }
    for result in &results {
        match result.icon.as_deref() {
            Some(icon) => println!("{}\t{} {}", result.shortcut_text, icon, result_label(result)),
            None => println!("{}\t{}", result.shortcut_text, result_label(result)),
        }
    }
    ExitCode::SUCCESS
}

fn print_keymaps(session: &Session) {
    let active = session.registry.active_index();
    for (index, keymap) in session.registry.all().iter().enumerate() {
        let marker = if index == active { '*' } else { ' ' };
        let parent = keymap
            .parent
            .as_deref()
            .map(|parent| format!(" (from {parent})"))
            .unwrap_or_default();
        let description = keymap.description.as_deref().unwrap_or("");
        println!("{marker} {:<16} {description}{parent}", keymap.name);
    }
}

fn unknown_keymap(session: &Session, name: &str) -> ExitCode {
    eprintln!(
        "Error: unknown keymap '{name}' (available: {})",
        session.registry.names().join(", ")
    );
    ExitCode::from(EXIT_USAGE)
}

fn load_prefs(path: Option<&Path>) -> Preferences {
    let Some(path) = path else {
        return Preferences::default();
    };
    match Preferences::load(path) {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!(path = %path.display(), "ignoring preferences: {err}");
            eprintln!("Warning: ignoring {}: {}", path.display(), err);
            Preferences::default()
        }
    }
}

fn save_prefs(prefs: &mut Preferences, app: &tui::App, path: &Path) {
    prefs.remember(&app.session.registry, app.source, app.target);
    if let Err(err) = prefs.save(path) {
        error!(error = %err, "Failed to save preferences");
        eprintln!("Warning: failed to save preferences: {err}");
    }
    info!(
        source = app.source_name(),
        target = app.target_name(),
        "session closed"
    );
}
