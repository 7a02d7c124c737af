use colored::Colorize;
use serde_json::Value;

/// Honor the config/flag switch. When colors stay enabled, `colored`
/// still disables itself on non-terminal output.
pub fn init(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

/// Diagnostic line: red, on stderr. Errors are never fatal to the
/// session, so this is the only place they surface.
pub fn warn(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Secondary guidance (hints, key listings).
pub fn hint(msg: &str) {
    println!("{}", msg.blue());
}

/// Render a metadata value the way a user typed it: strings bare,
/// everything else as JSON.
pub fn meta_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_value_strings_are_bare() {
        assert_eq!(meta_value(&Value::from("ada")), "ada");
        assert_eq!(meta_value(&Value::from(4)), "4");
        assert_eq!(meta_value(&Value::Bool(true)), "true");
    }
}
