use dialoguer::{Input, Password};
use std::io::{self, IsTerminal};

use crate::error::GistError;

/// Use `value` if given, otherwise ask for it on the terminal.
///
/// Fails with `MissingInput` when there is no terminal to ask on.
pub fn value_or_prompt(
    value: Option<&str>,
    field: &'static str,
    hidden: bool,
) -> Result<String, GistError> {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }

    if !io::stdin().is_terminal() {
        return Err(GistError::MissingInput { field });
    }

    let result = if hidden {
        Password::new().with_prompt(prompt_label(field)).interact()
    } else {
        Input::<String>::new()
            .with_prompt(prompt_label(field))
            .interact_text()
    };

    result.map_err(|e| {
        GistError::io(
            format!("prompting for {}", field),
            io::Error::new(io::ErrorKind::Other, e.to_string()),
        )
    })
}

fn prompt_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
