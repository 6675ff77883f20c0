use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Failure while expanding `{{ ... }}` placeholders
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpandError {
    /// The variable is unset and the placeholder has no default
    #[error("environment variable not found: `{0}`")]
    MissingVar(String),
    /// The placeholder is not of the form `env.NAME`
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

// Group 1: the key (`env.NAME`), group 2: optional value of `default("...")`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
});

/// Expand `{{ env.VAR }}` and `{{ env.VAR | default("x") }}` in raw TOML text
///
/// Runs before deserialization so config structs stay plain strings. Lines
/// whose first non-blank character is `#` are copied unchanged, which lets
/// commented-out settings reference variables that are not set.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.split('\n').enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            expand_line(line, &mut output)?;
        }
    }

    Ok(output)
}

fn expand_line(line: &str, output: &mut String) -> Result<(), ExpandError> {
    let mut last_end = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };
        output.push_str(&line[last_end..whole.start()]);
        output.push_str(&resolve(&captures)?);
        last_end = whole.end();
    }

    output.push_str(&line[last_end..]);
    Ok(())
}

fn resolve(captures: &Captures<'_>) -> Result<String, ExpandError> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let default = captures.get(2).map(|m| m.as_str());

    let var_name = match key.split_once('.') {
        Some(("env", name)) if !name.is_empty() && !name.contains('.') => name,
        _ => return Err(ExpandError::UnsupportedScope(key.to_owned())),
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(ExpandError::MissingVar(var_name.to_owned())),
    }
}
