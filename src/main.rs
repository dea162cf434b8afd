//! pyedit - a small terminal editor for Python source
//!
//! Line numbers, current-line highlighting, regex-based Python syntax
//! coloring, and File/Edit menus.

mod buffer;
mod command;
mod config;
mod dialog;
mod display;
mod editor;
mod error;
mod gutter;
mod input;
mod line;
mod logging;
mod menu;
mod syntax;
mod terminal;
mod undo;
mod window;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use config::Config;
use editor::EditorState;
use error::Result;
use terminal::Terminal;

/// A small terminal editor for Python source
#[derive(Parser, Debug)]
#[command(name = "pyedit", version, about)]
struct Args {
    /// File to open; created on save if it does not exist
    file: Option<PathBuf>,

    /// Configuration file (default: ~/.pyedit.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (default: ~/.pyedit.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start with syntax highlighting off
    #[arg(long)]
    no_highlight: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("Warning: {}", e);
    }

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}; using defaults", e);
            tracing::warn!(error = %e, "config load failed");
            Config::default()
        }
    };
    if args.no_highlight {
        config.syntax_highlighting = false;
    }

    let language = syntax::python_language()?;
    let mut editor = EditorState::new(config, language);
    if let Some(path) = &args.file {
        editor.open_initial(path);
    }

    // Terminal is restored when it drops, before main prints any error
    let mut terminal = Terminal::new()?;
    editor.run(&mut terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_cli_parse() {
        let args = Args::parse_from([
            "pyedit",
            "app.py",
            "--no-highlight",
            "--log-file",
            "/tmp/p.log",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("app.py")));
        assert!(args.no_highlight);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/p.log")));
        assert!(args.config.is_none());
    }
}
