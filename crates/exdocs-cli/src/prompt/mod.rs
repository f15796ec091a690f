//! Input collection for the example generator.
//!
//! Values given on the command line are used as-is; only the missing ones
//! are asked for. On a terminal the questions use `inquire`. Without a
//! terminal, or with `EXDOCS_FORCE_NON_INTERACTIVE` set, plain lines are
//! read from stdin so the generator can be scripted.

use std::io::{BufRead, IsTerminal, Write};

use anyhow::Result;
use exdocs_core::synth::ExampleRequest;
use inquire::validator::Validation;
use inquire::{CustomUserError, Text};

use crate::error::CliError;
use crate::utils::validation::{EXAMPLE_NAME_RULE, is_valid_example_name};

const NAME_PROMPT: &str = "Example name (e.g. 'function-calling'):";
const FOCUS_PROMPT: &str = "What should the example demonstrate?";
const THEME_PROMPT: &str = "Theme for the example (optional):";
const URL_PROMPT: &str = "Documentation URL:";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presets {
    /// Example name, not yet validated.
    pub name: Option<String>,
    /// Focus text.
    pub focus: Option<String>,
    /// Theme text.
    pub theme: Option<String>,
    /// Documentation URLs; empty means ask.
    pub urls: Vec<String>,
}

/// Whether prompts should use the interactive terminal UI.
#[must_use]
pub fn is_interactive() -> bool {
    std::env::var_os("EXDOCS_FORCE_NON_INTERACTIVE").is_none() && std::io::stdin().is_terminal()
}

/// Fill in whatever `presets` lacks by asking the user.
pub fn collect_request(presets: Presets) -> Result<ExampleRequest> {
    if is_interactive() {
        collect_interactive(presets)
    } else {
        collect_request_with_io(presets, &mut std::io::stdin().lock(), &mut std::io::stdout())
    }
}

fn collect_interactive(presets: Presets) -> Result<ExampleRequest> {
    let name = match presets.name {
        Some(name) => name,
        None => Text::new(NAME_PROMPT)
            .with_help_message(EXAMPLE_NAME_RULE)
            .with_validator(validate_name)
            .prompt()?,
    };
    let focus = match presets.focus {
        Some(focus) => focus,
        None => Text::new(FOCUS_PROMPT).prompt()?,
    };
    let theme = match presets.theme {
        Some(theme) => theme,
        None => Text::new(THEME_PROMPT)
            .with_help_message("press Enter to skip")
            .prompt()?,
    };

    let mut urls = presets.urls;
    if urls.is_empty() {
        loop {
            let url = Text::new(URL_PROMPT)
                .with_help_message("press Enter when done")
                .prompt()?;
            let url = url.trim();
            if url.is_empty() {
                break;
            }
            urls.push(url.to_string());
        }
    }

    Ok(ExampleRequest {
        name: name.trim().to_string(),
        focus: focus.trim().to_string(),
        theme: theme.trim().to_string(),
        urls,
    })
}

#[allow(clippy::unnecessary_wraps)]
fn validate_name(input: &str) -> std::result::Result<Validation, CustomUserError> {
    if is_valid_example_name(input.trim()) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(EXAMPLE_NAME_RULE.into()))
    }
}

/// Line-based implementation with injectable I/O.
///
/// Invalid names are re-asked. End of input ends the URL list and leaves
/// focus and theme empty; it is an error only while a name is still needed.
pub(crate) fn collect_request_with_io<R, W>(
    presets: Presets,
    reader: &mut R,
    writer: &mut W,
) -> Result<ExampleRequest>
where
    R: BufRead,
    W: Write,
{
    let name = match presets.name {
        Some(name) => name,
        None => read_name(reader, writer)?,
    };
    let focus = match presets.focus {
        Some(focus) => focus,
        None => ask(reader, writer, FOCUS_PROMPT)?.unwrap_or_default(),
    };
    let theme = match presets.theme {
        Some(theme) => theme,
        None => ask(reader, writer, THEME_PROMPT)?.unwrap_or_default(),
    };

    let mut urls = presets.urls;
    if urls.is_empty() {
        writeln!(writer, "Enter documentation URLs, one per line (empty line to finish).")?;
        while let Some(url) = ask(reader, writer, URL_PROMPT)? {
            if url.is_empty() {
                break;
            }
            urls.push(url);
        }
    }

    Ok(ExampleRequest {
        name: name.trim().to_string(),
        focus: focus.trim().to_string(),
        theme: theme.trim().to_string(),
        urls,
    })
}

fn read_name<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<String> {
    loop {
        match ask(reader, writer, NAME_PROMPT)? {
            None => {
                return Err(CliError::usage(anyhow::anyhow!(
                    "input ended before a valid example name was entered"
                ))
                .into());
            },
            Some(name) if is_valid_example_name(&name) => return Ok(name),
            Some(name) => writeln!(writer, "Invalid name '{name}': {EXAMPLE_NAME_RULE}.")?,
        }
    }
}

/// Print `prompt` and read one trimmed line; `None` at end of input.
fn ask<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(writer, "{prompt} ")?;
    writer.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        writeln!(writer)?;
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
