//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use keymap_core::RenderStyle;

#[derive(Debug, Parser)]
#[command(
    name = "shortcut-translator",
    about = "Find what a keyboard shortcut from one keymap is called in another",
    version,
    after_help = "Examples:\n  shortcut-translator\n  shortcut-translator --source Eclipse --target '$default'\n  shortcut-translator --source Emacs --translate 'C-x'\n  shortcut-translator --list-keymaps\n"
)]
pub struct Cli {
    /// Keymap the pressed shortcut comes from
    #[arg(long)]
    pub source: Option<String>,

    /// Keymap to translate into
    #[arg(long)]
    pub target: Option<String>,

    /// Load keymaps from this TOML file instead of the config dir
    #[arg(long)]
    pub keymap_file: Option<PathBuf>,

    /// Load extra actions from this TOML file instead of the config dir
    #[arg(long)]
    pub actions_file: Option<PathBuf>,

    /// How shortcuts are written: standard, mac or emacs
    #[arg(long)]
    pub style: Option<RenderStyle>,

    /// Show action ids instead of descriptions
    #[arg(long)]
    pub plain: bool,

    /// Print the available keymaps and exit
    #[arg(long)]
    pub list_keymaps: bool,

    /// Translate one shortcut, print the results and exit
    #[arg(long, value_name = "SHORTCUT")]
    pub translate: Option<String>,

    /// Do not remember the selected keymaps on exit
    #[arg(long)]
    pub no_save: bool,

    /// Ignore keymaps, actions and preferences in the config dir
    #[arg(long)]
    pub no_user_config: bool,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_interactive() {
        let cli = Cli::parse_from(["shortcut-translator"]);
        assert!(cli.translate.is_none());
        assert!(!cli.list_keymaps);
        assert!(!cli.plain);
        assert!(!cli.no_save);
        assert!(cli.style.is_none());
    }

    #[test]
    fn keymap_selection() {
        let cli = Cli::parse_from([
            "shortcut-translator",
            "--source",
            "Emacs",
            "--target",
            "$default",
        ]);
        assert_eq!(cli.source.as_deref(), Some("Emacs"));
        assert_eq!(cli.target.as_deref(), Some("$default"));
    }

    #[test]
    fn style_parses_case_insensitively() {
        let cli = Cli::parse_from(["shortcut-translator", "--style", "Mac"]);
        assert_eq!(cli.style, Some(RenderStyle::Mac));
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!(Cli::try_parse_from(["shortcut-translator", "--style", "vim"]).is_err());
    }

    #[test]
    fn translate_takes_a_shortcut() {
        let cli = Cli::parse_from(["shortcut-translator", "--translate", "Ctrl+Alt+S", "--plain"]);
        assert_eq!(cli.translate.as_deref(), Some("Ctrl+Alt+S"));
        assert!(cli.plain);
    }
}
