//! Recipe-mode commands.
//!
//! Dispatch is a finite (verb, target) table rather than nested
//! conditionals: the first token picks the verb, the second picks the
//! target where the verb takes one, and the rest are positional
//! arguments. Unknown combinations print the valid ones and change
//! nothing.

use crate::output;
use crate::session::{Control, Prompter, Session};
use recipe_core::error::{RecipeError, Result};
use recipe_core::units::{MASS_RATIOS, VOLUME_RATIOS};
use std::path::Path;

type Handler = fn(&mut Session, &[String], &mut dyn Prompter) -> Result<Control>;

struct CommandSpec {
    verb: &'static str,
    target: Option<&'static str>,
    usage: &'static str,
    help: &'static str,
    run: Handler,
}

const TABLE: &[CommandSpec] = &[
    CommandSpec {
        verb: "help",
        target: None,
        usage: "help [command]",
        help: "print all available commands",
        run: help,
    },
    CommandSpec {
        verb: "display",
        target: None,
        usage: "display",
        help: "print the whole recipe as Markdown",
        run: display,
    },
    CommandSpec {
        verb: "get",
        target: Some("title"),
        usage: "get title",
        help: "print the title",
        run: get_title,
    },
    CommandSpec {
        verb: "get",
        target: Some("metadata"),
        usage: "get metadata [key]",
        help: "print one metadata value, or list the available keys",
        run: get_metadata,
    },
    CommandSpec {
        verb: "get",
        target: Some("step"),
        usage: "get step [n]",
        help: "print step n, or every step",
        run: get_step,
    },
    CommandSpec {
        verb: "get",
        target: Some("units"),
        usage: "get units",
        help: "list supported convertible units",
        run: get_units,
    },
    CommandSpec {
        verb: "add",
        target: Some("step"),
        usage: "add step [position] <text...>",
        help: "add a step, optionally at a 1-based position",
        run: add_step,
    },
    CommandSpec {
        verb: "add",
        target: Some("ingredient"),
        usage: "add ingredient <name> <amount> <unit>",
        help: "add an ingredient (see 'get units')",
        run: add_ingredient,
    },
    CommandSpec {
        verb: "add",
        target: Some("metadata"),
        usage: "add metadata <key> <value>",
        help: "add or overwrite custom metadata",
        run: set_metadata,
    },
    CommandSpec {
        verb: "set",
        target: Some("title"),
        usage: "set title <title>",
        help: "set the title of the recipe",
        run: set_title,
    },
    CommandSpec {
        verb: "set",
        target: Some("author"),
        usage: "set author <name>",
        help: "set the author of the recipe",
        run: set_author,
    },
    CommandSpec {
        verb: "set",
        target: Some("serves"),
        usage: "set serves <number>",
        help: "set how many people the recipe serves",
        run: set_serves,
    },
    CommandSpec {
        verb: "set",
        target: Some("srcurl"),
        usage: "set srcurl <url>",
        help: "set the source url of the recipe",
        run: set_srcurl,
    },
    CommandSpec {
        verb: "set",
        target: Some("metadata"),
        usage: "set metadata <key> <value>",
        help: "add or overwrite custom metadata",
        run: set_metadata,
    },
    CommandSpec {
        verb: "remove",
        target: Some("step"),
        usage: "remove step [n]",
        help: "remove step n, or the last step",
        run: remove_step,
    },
    CommandSpec {
        verb: "remove",
        target: Some("ingredient"),
        usage: "remove ingredient <name>",
        help: "remove an ingredient by name",
        run: remove_ingredient,
    },
    CommandSpec {
        verb: "remove",
        target: Some("metadata"),
        usage: "remove metadata <key>",
        help: "remove a key/value pair by key",
        run: remove_metadata,
    },
    CommandSpec {
        verb: "metric",
        target: None,
        usage: "metric [ingredient]",
        help: "convert one or all ingredients to metric",
        run: metric,
    },
    CommandSpec {
        verb: "scale",
        target: None,
        usage: "scale <factor>",
        help: "scale every ingredient amount by a factor",
        run: scale,
    },
    CommandSpec {
        verb: "save",
        target: None,
        usage: "save [path]",
        help: "save to the given path, or to where the recipe was opened",
        run: save,
    },
    CommandSpec {
        verb: "close",
        target: None,
        usage: "close",
        help: "leave recipe mode, returning to the file explorer",
        run: close,
    },
];

/// Verb-level summary for bare `help`.
const VERB_HELP: &[(&str, &str)] = &[
    ("help", "print all available commands"),
    ("display", "print the whole recipe as Markdown"),
    ("get", "read recipe information (title, metadata, step, units)"),
    ("add", "add information to the recipe (step, ingredient, metadata)"),
    ("set", "change recipe information (title, author, serves, srcurl, metadata)"),
    ("remove", "remove recipe information (step, ingredient, metadata)"),
    ("metric", "convert ingredients to metric"),
    ("scale", "scale ingredient amounts by a factor"),
    ("save", "save the recipe to a path, or its original path"),
    ("close", "leave recipe mode, returning to the file explorer"),
];

pub fn dispatch(
    session: &mut Session,
    tokens: &[String],
    prompter: &mut dyn Prompter,
) -> Result<Control> {
    let verb = tokens[0].as_str();
    let Some(first) = TABLE.iter().find(|c| c.verb == verb) else {
        output::warn(&format!(
            "Command '{verb}' not recognized. Enter 'help' to see available commands."
        ));
        return Ok(Control::Continue);
    };

    if first.target.is_none() {
        return (first.run)(session, &tokens[1..], prompter);
    }

    let row = tokens
        .get(1)
        .and_then(|t| TABLE.iter().find(|c| c.verb == verb && c.target == Some(t.as_str())));
    match row {
        Some(row) => (row.run)(session, &tokens[2..], prompter),
        None => {
            print_usage(verb);
            Ok(Control::Continue)
        }
    }
}

fn print_usage(verb: &str) {
    output::warn(&format!("invalid {verb} argument."));
    println!("Possible arguments for {verb}:");
    for row in TABLE.iter().filter(|c| c.verb == verb) {
        output::hint(&format!("\t{}\t{}", row.usage, row.help));
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn help(_session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let rows: Vec<_> = match args.first() {
        Some(topic) => TABLE.iter().filter(|c| c.verb == topic.as_str()).collect(),
        None => Vec::new(),
    };
    if rows.is_empty() {
        for (verb, text) in VERB_HELP {
            println!("\t{verb}\t{text}");
        }
    } else {
        for row in rows {
            println!("\t{}\t{}", row.usage, row.help);
        }
    }
    Ok(Control::Continue)
}

fn display(session: &mut Session, _args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    println!("{}", session.recipe_mut());
    Ok(Control::Continue)
}

fn get_title(session: &mut Session, _args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    println!("{}", session.recipe_mut().title());
    Ok(Control::Continue)
}

fn get_metadata(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let recipe = session.recipe_mut();
    match args.first() {
        Some(key) => {
            let value = recipe
                .metadata(key)
                .ok_or_else(|| RecipeError::MetadataNotFound(key.clone()))?;
            println!("{key} = {}", output::meta_value(value));
        }
        None => {
            let keys: Vec<&str> = recipe.metadata_keys().collect();
            if keys.is_empty() {
                println!("(no metadata)");
            } else {
                println!("{}", keys.join("  "));
                output::hint("To access a key, type 'get metadata <key>'.");
            }
        }
    }
    Ok(Control::Continue)
}

fn get_step(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let recipe = session.recipe_mut();
    match args.first() {
        Some(raw) => {
            let number: usize = raw
                .parse()
                .map_err(|_| RecipeError::NotANumber(raw.clone()))?;
            println!("Step {number}. {}", recipe.step(number)?);
        }
        None => {
            for (i, step) in recipe.steps().iter().enumerate() {
                println!("Step {}. {step}", i + 1);
            }
        }
    }
    Ok(Control::Continue)
}

fn get_units(_session: &mut Session, _args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    println!("Mass Units:");
    for (unit, _) in MASS_RATIOS {
        println!("\t{unit}");
    }
    println!("Volume Units:");
    for (unit, _) in VOLUME_RATIOS {
        println!("\t{unit}");
    }
    Ok(Control::Continue)
}

/// A leading integer token followed by more tokens is the 1-based insert
/// position; everything else joins into the step text.
fn add_step(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    if args.is_empty() {
        return Err(RecipeError::MissingArgument("add step [position] <text...>"));
    }
    let (position, text) = match args[0].parse::<usize>() {
        Ok(pos) if args.len() > 1 => (Some(pos), args[1..].join(" ")),
        _ => (None, args.join(" ")),
    };
    let recipe = session.recipe_mut();
    let number = match position {
        Some(pos) => pos.clamp(1, recipe.steps().len() + 1),
        None => recipe.steps().len() + 1,
    };
    recipe.add_step(text.clone(), position);
    println!("Added: Step {number}. {text}");
    Ok(Control::Continue)
}

fn add_ingredient(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let [name, amount, unit, ..] = args else {
        return Err(RecipeError::MissingArgument(
            "add ingredient <name> <amount> <unit>",
        ));
    };
    let amount: f64 = amount
        .parse()
        .map_err(|_| RecipeError::NotANumber(amount.clone()))?;
    session.recipe_mut().add_ingredient(name.clone(), amount, unit);
    Ok(Control::Continue)
}

fn set_title(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let title = args
        .first()
        .ok_or(RecipeError::MissingArgument("set title <title>"))?;
    session.recipe_mut().set_title(title.clone());
    Ok(Control::Continue)
}

fn set_author(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let author = args
        .first()
        .ok_or(RecipeError::MissingArgument("set author <name>"))?;
    session.recipe_mut().set_author(author.clone());
    Ok(Control::Continue)
}

fn set_serves(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let raw = args
        .first()
        .ok_or(RecipeError::MissingArgument("set serves <number>"))?;
    let serves: i64 = raw
        .parse()
        .map_err(|_| RecipeError::NotANumber(raw.clone()))?;
    session.recipe_mut().set_serves(serves);
    Ok(Control::Continue)
}

fn set_srcurl(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let url = args
        .first()
        .ok_or(RecipeError::MissingArgument("set srcurl <url>"))?;
    session.recipe_mut().set_src_url(url.clone());
    Ok(Control::Continue)
}

fn set_metadata(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let [key, value, ..] = args else {
        return Err(RecipeError::MissingArgument("set metadata <key> <value>"));
    };
    session.recipe_mut().set_metadata(key.clone(), value.as_str());
    Ok(Control::Continue)
}

fn remove_step(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let position = match args.first() {
        Some(raw) => Some(
            raw.parse::<usize>()
                .map_err(|_| RecipeError::NotANumber(raw.clone()))?,
        ),
        None => None,
    };
    let removed = session.recipe_mut().remove_step(position)?;
    println!("Removed step: {removed}");
    Ok(Control::Continue)
}

fn remove_ingredient(
    session: &mut Session,
    args: &[String],
    _p: &mut dyn Prompter,
) -> Result<Control> {
    let name = args
        .first()
        .ok_or(RecipeError::MissingArgument("remove ingredient <name>"))?;
    session.recipe_mut().remove_ingredient(name)?;
    Ok(Control::Continue)
}

fn remove_metadata(
    session: &mut Session,
    args: &[String],
    _p: &mut dyn Prompter,
) -> Result<Control> {
    let key = args
        .first()
        .ok_or(RecipeError::MissingArgument("remove metadata <key>"))?;
    session.recipe_mut().remove_metadata(key)?;
    Ok(Control::Continue)
}

fn metric(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    session
        .recipe_mut()
        .to_metric(args.first().map(String::as_str))?;
    Ok(Control::Continue)
}

fn scale(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let raw = args
        .first()
        .ok_or(RecipeError::MissingArgument("scale <factor>"))?;
    let factor: f64 = raw
        .parse()
        .map_err(|_| RecipeError::NotANumber(raw.clone()))?;
    session.recipe_mut().scale(factor);
    Ok(Control::Continue)
}

fn save(session: &mut Session, args: &[String], _p: &mut dyn Prompter) -> Result<Control> {
    let explicit = args.first().filter(|s| !s.trim().is_empty());
    let recipe = session.recipe_mut();
    let dest = match explicit {
        Some(path) => recipe.save(Some(Path::new(path)))?,
        None => recipe.save(None)?,
    };
    tracing::debug!(path = %dest.display(), "saved recipe");
    println!("Saved {}", dest.display());
    Ok(Control::Continue)
}

fn close(session: &mut Session, _args: &[String], prompter: &mut dyn Prompter) -> Result<Control> {
    session.close(prompter);
    Ok(Control::Continue)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
