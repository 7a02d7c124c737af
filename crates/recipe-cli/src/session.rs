//! Session state and the mode-routing entry point.
//!
//! One `Session` owns the currently open recipe (if any); every line of
//! input goes through [`Session::interpret`]. There is no other mutable
//! state in the program.

use crate::{cmd, output};
use recipe_core::recipe::Recipe;
use recipe_core::token;
use std::path::Path;

/// Which command set a line is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Shell,
    Recipe,
}

/// Whether the surrounding loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Asks the user a yes-question. Only the literal answer `yes` confirms.
/// The REPL reads a line; script mode always refuses.
pub trait Prompter {
    fn confirm(&mut self, prompt: &str) -> bool;
}

#[derive(Default)]
pub struct Session {
    recipe: Option<Recipe>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        if self.recipe.is_some() {
            Mode::Recipe
        } else {
            Mode::Shell
        }
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    /// The open recipe. Recipe-mode handlers are only dispatched while a
    /// recipe is open.
    pub(crate) fn recipe_mut(&mut self) -> &mut Recipe {
        self.recipe
            .as_mut()
            .expect("recipe mode dispatched without an open recipe")
    }

    /// Enter recipe mode on `path`: load it if it exists, start an empty
    /// recipe bound to it otherwise. On a data error the session stays in
    /// shell mode.
    pub fn open(&mut self, path: &Path) -> recipe_core::Result<()> {
        let recipe = Recipe::open_or_create(path)?;
        tracing::debug!(path = %path.display(), "opened recipe");
        self.recipe = Some(recipe);
        Ok(())
    }

    /// Leave recipe mode. Unsaved changes require confirmation; a refusal
    /// keeps the recipe open. Returns whether the recipe was closed.
    pub fn close(&mut self, prompter: &mut dyn Prompter) -> bool {
        if let Some(recipe) = &self.recipe {
            if recipe.is_modified()
                && !prompter.confirm("Your recipe has unsaved changes. Close anyway? (must type 'yes') ")
            {
                output::warn("Close aborted.");
                return false;
            }
        }
        self.recipe = None;
        true
    }

    /// Tokenize one line and route it to the active mode's command set.
    /// Every error is converted to a printed diagnostic here; none escape.
    pub fn interpret(&mut self, line: &str, prompter: &mut dyn Prompter) -> Control {
        let tokens = token::tokenize(line);
        if tokens.is_empty() {
            return Control::Continue;
        }

        let result = match self.mode() {
            Mode::Shell => cmd::shell::dispatch(self, &tokens),
            Mode::Recipe => cmd::recipe::dispatch(self, &tokens, prompter),
        };
        match result {
            Ok(control) => control,
            Err(e) => {
                output::warn(&e.to_string());
                Control::Continue
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FakePrompter;
    use super::*;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new()
    }

    #[test]
    fn starts_in_shell_mode() {
        assert_eq!(session().mode(), Mode::Shell);
    }

    #[test]
    fn empty_line_is_a_no_op() {
        let mut s = session();
        let mut p = FakePrompter::refusing();
        assert_eq!(s.interpret("   ", &mut p), Control::Continue);
        assert_eq!(s.mode(), Mode::Shell);
    }

    #[test]
    fn open_enters_recipe_mode() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        s.open(&dir.path().join("r.json")).unwrap();
        assert_eq!(s.mode(), Mode::Recipe);
    }

    #[test]
    fn open_malformed_stays_in_shell_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{oops").unwrap();
        let mut s = session();
        assert!(s.open(&path).is_err());
        assert_eq!(s.mode(), Mode::Shell);
    }

    #[test]
    fn close_clean_recipe_needs_no_confirmation() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        s.open(&dir.path().join("r.json")).unwrap();
        let mut p = FakePrompter::refusing();
        assert!(s.close(&mut p));
        assert_eq!(p.asked, 0);
        assert_eq!(s.mode(), Mode::Shell);
    }

    #[test]
    fn close_modified_recipe_requires_yes() {
        let dir = TempDir::new().unwrap();
        let mut s = session();
        s.open(&dir.path().join("r.json")).unwrap();
        s.recipe_mut().set_title("x");

        let mut refuse = FakePrompter::answering(&[false]);
        assert!(!s.close(&mut refuse));
        assert_eq!(s.mode(), Mode::Recipe);

        let mut accept = FakePrompter::answering(&[true]);
        assert!(s.close(&mut accept));
        assert_eq!(s.mode(), Mode::Shell);
    }

    #[test]
    fn errors_do_not_end_the_session() {
        let mut s = session();
        let mut p = FakePrompter::refusing();
        assert_eq!(s.interpret("cd", &mut p), Control::Continue);
        assert_eq!(s.interpret("no-such-command", &mut p), Control::Continue);
    }

    #[test]
    fn exit_ends_the_session() {
        let mut s = session();
        let mut p = FakePrompter::refusing();
        assert_eq!(s.interpret("exit", &mut p), Control::Exit);
    }
}
