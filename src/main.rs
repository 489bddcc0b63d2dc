//! =============================================================================
//! Picker - Point d'entrée
//! Picker - Entry point
//! =============================================================================
//!
//! Sans argument, lance le picker interactif (macOS). Les options permettent
//! de convertir des couleurs et de modifier les préférences sans interface.
//!
//! Without arguments, runs the interactive picker (macOS). The options convert
//! colors and edit the preferences headlessly.

use anyhow::{bail, Context};

use picker_lib::app::FORMAT_KEY;
use picker_lib::format::Category;
use picker_lib::history::ColorHistory;
use picker_lib::preferences::Preferences;
use picker_lib::shortcut::{Shortcut, ShortcutAction};
use picker_lib::store::SharedStore;
use picker_lib::{logging, open_store, Color, ColorFormat};

const USAGE: &str = "\
Usage: picker [COMMAND] [-v]

Without a command, runs the interactive picker.

Commands (one at a time):
  --formats                    List the available formats
  --convert <hex> [--format <key>]
                               Print a color in the selected (or given) format
  --all <hex>                  Print a color in every format
  --history                    Print the color history
  --copy-history <n>           Copy history entry n (1 = most recent)
  --shortcuts                  Print the shortcut bindings
  --set-format <key>           Select the copy format
  --set-copy-shortcut <spec>   Bind \"copy color\" (e.g. cmd+shift+p, none, default)
  --set-pin-shortcut <spec>    Bind \"pin on screen\"
  -h, --help                   Print this help

Options:
  -v, --verbose                Debug logging";

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShortcutSetting {
    Bind(Shortcut),
    Disabled,
    Default,
}

/// Commande demandée sur la ligne de commande
/// Command requested on the command line
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Run,
    Help,
    Formats,
    Convert {
        color: Color,
        format: Option<ColorFormat>,
    },
    All(Color),
    History,
    CopyHistory(usize),
    Shortcuts,
    SetFormat(ColorFormat),
    SetShortcut(ShortcutAction, ShortcutSetting),
}

#[derive(Debug, PartialEq)]
struct Cli {
    command: Command,
    verbose: bool,
}

/// Valeur suivant une option (`--flag value`)
/// Value following an option (`--flag value`)
fn value_of<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> anyhow::Result<&'a str> {
    match args.next() {
        Some(value) if !value.starts_with("--") => Ok(value.as_str()),
        _ => bail!("{} expects a value", flag),
    }
}

fn parse_shortcut(spec: &str) -> anyhow::Result<ShortcutSetting> {
    match spec.to_ascii_lowercase().as_str() {
        "none" | "off" => Ok(ShortcutSetting::Disabled),
        "default" => Ok(ShortcutSetting::Default),
        _ => Ok(ShortcutSetting::Bind(spec.parse::<Shortcut>()?)),
    }
}

/// Parses the arguments (program name excluded). At most one command is
/// accepted; `--format` only goes with `--convert`.
fn parse_args(args: &[String]) -> anyhow::Result<Cli> {
    let mut command = None;
    let mut format = None;
    let mut verbose = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        let next = match flag {
            "-v" | "--verbose" => {
                verbose = true;
                continue;
            }
            "--format" => {
                if format.is_some() {
                    bail!("--format given twice");
                }
                format = Some(value_of(&mut iter, flag)?.parse::<ColorFormat>()?);
                continue;
            }
            "-h" | "--help" => Command::Help,
            "--formats" => Command::Formats,
            "--convert" => Command::Convert {
                color: value_of(&mut iter, flag)?.parse()?,
                format: None,
            },
            "--all" => Command::All(value_of(&mut iter, flag)?.parse()?),
            "--history" => Command::History,
            "--copy-history" => {
                let value = value_of(&mut iter, flag)?;
                let position: usize = value
                    .parse()
                    .with_context(|| format!("--copy-history expects a position, got {}", value))?;
                if position == 0 {
                    bail!("history positions start at 1");
                }
                Command::CopyHistory(position - 1)
            }
            "--shortcuts" => Command::Shortcuts,
            "--set-format" => Command::SetFormat(value_of(&mut iter, flag)?.parse()?),
            "--set-copy-shortcut" => Command::SetShortcut(
                ShortcutAction::CopyColor,
                parse_shortcut(value_of(&mut iter, flag)?)?,
            ),
            "--set-pin-shortcut" => Command::SetShortcut(
                ShortcutAction::PinToScreen,
                parse_shortcut(value_of(&mut iter, flag)?)?,
            ),
            _ => bail!("unknown argument {}", arg),
        };
        if let Some(previous) = command.replace(next) {
            bail!("only one command may be given ({:?} and {})", previous, arg);
        }
    }

    let command = match (command.unwrap_or(Command::Run), format) {
        (Command::Convert { color, .. }, format) => Command::Convert { color, format },
        (_, Some(_)) => bail!("--format only applies to --convert"),
        (command, None) => command,
    };
    Ok(Cli { command, verbose })
}

// =============================================================================
// FONCTIONS UTILITAIRES
// UTILITY FUNCTIONS
// =============================================================================

fn selected_format(store: &SharedStore) -> ColorFormat {
    store
        .borrow()
        .get::<u8>(FORMAT_KEY)
        .and_then(ColorFormat::from_id)
        .unwrap_or_default()
}

// =============================================================================
// COMMANDES
// COMMANDS
// =============================================================================

fn list_formats(store: &SharedStore) {
    let selected = selected_format(store);
    for category in Category::ALL {
        println!("{}:", category.display_name());
        for format in category.formats() {
            let marker = if format == selected { "*" } else { " " };
            println!("  {} {:<16} {}", marker, format.key(), format.display_name());
        }
    }
}

fn print_history(store: &SharedStore) -> anyhow::Result<()> {
    ColorHistory::register_defaults(store)?;
    let history = ColorHistory::load(store.clone());
    let format = selected_format(store);
    for (i, color) in history.colors().iter().enumerate() {
        println!("{}  {}  {}", i + 1, color.hex(), format.format(color));
    }
    Ok(())
}

fn print_shortcuts(store: &SharedStore) -> anyhow::Result<()> {
    Preferences::register_defaults(store)?;
    let preferences = Preferences::load(store.clone());
    for action in ShortcutAction::ALL {
        let binding = preferences
            .shortcut(action)
            .map(|s| s.display_string())
            .unwrap_or_else(|| "none".to_string());
        println!("{:<16} {}", action.display_name(), binding);
    }
    Ok(())
}

fn set_shortcut(store: &SharedStore, action: ShortcutAction, setting: ShortcutSetting) -> anyhow::Result<()> {
    Preferences::register_defaults(store)?;
    let mut preferences = Preferences::load(store.clone());
    match setting {
        ShortcutSetting::Bind(shortcut) => preferences.set_shortcut(action, Some(shortcut))?,
        ShortcutSetting::Disabled => preferences.set_shortcut(action, None)?,
        ShortcutSetting::Default => preferences.reset_shortcut(action)?,
    }
    print_shortcuts(store)
}

// =============================================================================
// POINT D'ENTRÉE
// ENTRY POINT
// =============================================================================

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => bail!("{}\n\n{}", e, USAGE),
    };

    if cli.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    logging::setup(cli.verbose);
    let store = open_store();

    match cli.command {
        Command::Help => {}
        Command::Run => {
            picker_lib::platform::run(store).context("interactive picker failed")?;
        }
        Command::Formats => list_formats(&store),
        Command::Convert { color, format } => {
            let format = format.unwrap_or_else(|| selected_format(&store));
            println!("{}", format.format(&color));
        }
        Command::All(color) => {
            for format in ColorFormat::ALL {
                println!("{:<16} {}", format.key(), format.format(&color));
            }
        }
        Command::History => print_history(&store)?,
        Command::CopyHistory(index) => {
            let text = picker_lib::platform::copy_history(store, index)?;
            println!("{}", text);
        }
        Command::Shortcuts => print_shortcuts(&store)?,
        Command::SetFormat(format) => {
            store.borrow_mut().set(FORMAT_KEY, &format.id())?;
            println!("Format: {}", format.display_name());
        }
        Command::SetShortcut(action, setting) => set_shortcut(&store, action, setting)?,
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Cli> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        parse_args(&args)
    }

    #[test]
    fn test_no_arguments_runs_the_picker() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.command, Command::Run);
        assert!(!cli.verbose);
        assert!(parse(&["-v"]).unwrap().verbose);
    }

    #[test]
    fn test_convert_with_and_without_format() {
        let cli = parse(&["--convert", "FF0000", "--format", "rgb"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Convert {
                color: Color::rgb(1.0, 0.0, 0.0),
                format: Some(ColorFormat::Rgb)
            }
        );

        // Order does not matter
        let cli = parse(&["--format", "css-hsl", "--convert", "FF0000", "-v"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Convert {
                format: Some(ColorFormat::CssHsl),
                ..
            }
        ));
        assert!(cli.verbose);

        let cli = parse(&["--convert", "FF0000"]).unwrap();
        assert!(matches!(cli.command, Command::Convert { format: None, .. }));
    }

    #[test]
    fn test_format_needs_a_value() {
        assert!(parse(&["--convert", "FF0000", "--format"]).is_err());
        assert!(parse(&["--format", "--convert", "FF0000"]).is_err());
        assert!(parse(&["--convert", "FF0000", "--format", "bogus"]).is_err());
    }

    #[test]
    fn test_format_without_convert_is_rejected() {
        assert!(parse(&["--format", "rgb"]).is_err());
        assert!(parse(&["--history", "--format", "rgb"]).is_err());
    }

    #[test]
    fn test_second_command_is_rejected() {
        assert!(parse(&["--set-format", "rgb", "--convert", "FF0000"]).is_err());
        assert!(parse(&["--history", "--shortcuts"]).is_err());
        assert!(parse(&["--history", "--history"]).is_err());
    }

    #[test]
    fn test_unknown_arguments_are_rejected() {
        assert!(parse(&["--history", "--bogus"]).is_err());
        assert!(parse(&["stray"]).is_err());
        assert!(parse(&["--convert", "FF0000", "extra"]).is_err());
    }

    #[test]
    fn test_copy_history_position_is_one_based() {
        assert_eq!(parse(&["--copy-history", "1"]).unwrap().command, Command::CopyHistory(0));
        assert_eq!(parse(&["--copy-history", "6"]).unwrap().command, Command::CopyHistory(5));
        assert!(parse(&["--copy-history", "0"]).is_err());
        assert!(parse(&["--copy-history", "two"]).is_err());
        assert!(parse(&["--copy-history"]).is_err());
    }

    #[test]
    fn test_shortcut_settings() {
        assert_eq!(
            parse(&["--set-copy-shortcut", "none"]).unwrap().command,
            Command::SetShortcut(ShortcutAction::CopyColor, ShortcutSetting::Disabled)
        );
        assert_eq!(
            parse(&["--set-pin-shortcut", "default"]).unwrap().command,
            Command::SetShortcut(ShortcutAction::PinToScreen, ShortcutSetting::Default)
        );
        assert!(matches!(
            parse(&["--set-copy-shortcut", "cmd+shift+c"]).unwrap().command,
            Command::SetShortcut(ShortcutAction::CopyColor, ShortcutSetting::Bind(_))
        ));
        assert!(parse(&["--set-copy-shortcut", "cmd+"]).is_err());
    }
}
