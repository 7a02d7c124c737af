//! Shell-mode commands: file navigation plus the `open` transition into
//! recipe mode.

use crate::output;
use crate::session::{Control, Session};
use colored::Colorize;
use recipe_core::error::{RecipeError, Result};
use std::path::Path;

const COMMANDS: &[(&str, &str)] = &[
    ("help", "print all available commands"),
    ("cd", "change the current directory"),
    ("ls", "list the contents of the current directory"),
    ("pwd", "print the current directory"),
    ("echo", "print its arguments"),
    ("open", "open a recipe file, entering recipe mode"),
    ("exit", "exit the program"),
];

pub fn dispatch(session: &mut Session, tokens: &[String]) -> Result<Control> {
    let (cmd, args) = tokens
        .split_first()
        .expect("dispatch called with no tokens");

    match cmd.as_str() {
        "cd" => cd(args),
        "ls" => ls(),
        "pwd" => {
            println!("{}", std::env::current_dir()?.display());
            Ok(Control::Continue)
        }
        "echo" => {
            println!("{}", args.join(" "));
            Ok(Control::Continue)
        }
        "help" => {
            help(args.first().map(String::as_str));
            Ok(Control::Continue)
        }
        "open" => open(session, args),
        "exit" => {
            println!("Bye!");
            Ok(Control::Exit)
        }
        other => {
            output::warn(&format!(
                "Command '{other}' not recognized. Enter 'help' to see available commands."
            ));
            Ok(Control::Continue)
        }
    }
}

fn cd(args: &[String]) -> Result<Control> {
    let target = args
        .first()
        .ok_or(RecipeError::MissingArgument("cd <path>"))?;
    // Reported as a diagnostic at the dispatch boundary; the working
    // directory is left unchanged on failure.
    std::env::set_current_dir(Path::new(target))?;
    Ok(Control::Continue)
}

fn ls() -> Result<Control> {
    let mut entries: Vec<_> = std::fs::read_dir(std::env::current_dir()?)?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let tag = if entry.file_type()?.is_dir() { "D" } else { "F" };
        println!("  {tag} - {}", entry.file_name().to_string_lossy());
    }
    Ok(Control::Continue)
}

fn open(session: &mut Session, args: &[String]) -> Result<Control> {
    let target = args
        .first()
        .ok_or(RecipeError::MissingArgument("open <path>"))?;
    let path = std::env::current_dir()?.join(target);
    println!("Opening {}", path.display().to_string().blue());
    session.open(&path)?;
    Ok(Control::Continue)
}

fn help(topic: Option<&str>) {
    match topic.and_then(|t| COMMANDS.iter().find(|(name, _)| *name == t)) {
        Some((name, text)) => println!("\t{name}\t{text}"),
        None => {
            for (name, text) in COMMANDS {
                println!("\t{name}\t{text}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::session::test_support::FakePrompter;
    use crate::session::{Control, Mode, Session};
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new()
    }

    #[test]
    fn open_without_argument_is_rejected() {
        let mut s = session();
        let mut p = FakePrompter::refusing();
        assert_eq!(s.interpret("open", &mut p), Control::Continue);
        assert_eq!(s.mode(), Mode::Shell);
    }

    #[test]
    fn open_nonexistent_path_creates_empty_recipe() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        let mut p = FakePrompter::refusing();
        let line = format!("open {}", dir.path().join("new.json").display());
        assert_eq!(s.interpret(&line, &mut p), Control::Continue);
        assert_eq!(s.mode(), Mode::Recipe);
        assert_eq!(s.recipe().unwrap().title(), "");
    }

    #[test]
    fn unknown_command_keeps_shell_mode() {
        let mut s = session();
        let mut p = FakePrompter::refusing();
        assert_eq!(s.interpret("frobnicate", &mut p), Control::Continue);
        assert_eq!(s.mode(), Mode::Shell);
    }
}
