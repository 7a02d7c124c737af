//! The interactive loop and the script runner.

use crate::output;
use crate::session::{Control, Prompter, Session};
use anyhow::{anyhow, Context};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;

/// Interactive mode: rustyline with history, mode-dependent prompt.
/// EOF ends the session like `exit`; ctrl-c cancels the current line.
pub fn run(session: &mut Session) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| anyhow!("failed to init line editor: {e}"))?;
    println!("Recipe shell. Type 'help' for commands, 'exit' to quit.");

    loop {
        let line = match rl.readline(&prompt(session)) {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => return Err(anyhow!("readline error: {e}")),
        };
        if line.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(&line)
            .map_err(|e| anyhow!("failed to record history: {e}"))?;

        let mut prompter = ReadlinePrompter { rl: &mut rl };
        if session.interpret(&line, &mut prompter) == Control::Exit {
            break;
        }
    }
    Ok(())
}

/// Script mode: one command per line, blank lines and `#` comments
/// skipped. A failing line prints its diagnostic and the script goes on.
pub fn run_script(session: &mut Session, path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        tracing::debug!(line, "script command");
        if session.interpret(line, &mut DenyPrompter) == Control::Exit {
            break;
        }
    }
    Ok(())
}

fn prompt(session: &Session) -> String {
    match session.recipe() {
        Some(recipe) => {
            let name = recipe
                .source_path()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("Current Recipe:{} {} ", name.blue(), "#".yellow())
        }
        None => {
            let cwd = std::env::current_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| ".".to_string());
            format!("{} {} ", cwd.green(), "$".yellow())
        }
    }
}

struct ReadlinePrompter<'a> {
    rl: &'a mut DefaultEditor,
}

impl Prompter for ReadlinePrompter<'_> {
    fn confirm(&mut self, prompt: &str) -> bool {
        matches!(
            self.rl.readline(&prompt.red().to_string()),
            Ok(answer) if answer.trim() == "yes"
        )
    }
}

/// Scripts and one-shot commands cannot answer prompts; refuse, so
/// unsaved work is never silently discarded.
pub struct DenyPrompter;

impl Prompter for DenyPrompter {
    fn confirm(&mut self, _prompt: &str) -> bool {
        output::warn("Unsaved changes and no way to confirm here; keeping the recipe open. Save (or save to a path) before closing.");
        false
    }
}
