//! Block-style YAML writer with indented sequences.
//!
//! `serde_yaml` writes sequences flush with their parent key. The site
//! generator accepts that, but the manifests in this project keep list items
//! indented under their key, so documents are written here instead:
//!
//! ```yaml
//! nav:
//!   - Home: index.md
//!   - Text:
//!       - Overview: text/index.md
//! ```
//!
//! Scalars are still rendered by `serde_yaml`, so quoting rules stay correct.
//! Mapping keys are written in their stored order.

use serde_yaml::{Mapping, Value};

use crate::Result;

const INDENT: usize = 2;

/// Render `value` as a block-style YAML document.
pub fn to_yaml_string(value: &Value) -> Result<String> {
    let mut out = String::new();
    match value {
        Value::Mapping(map) if !map.is_empty() => write_mapping(&mut out, map, 0)?,
        Value::Sequence(seq) if !seq.is_empty() => write_sequence(&mut out, seq, 0)?,
        other => {
            out.push_str(&scalar(other)?);
            out.push('\n');
        },
    }
    Ok(out)
}

fn write_mapping(out: &mut String, map: &Mapping, indent: usize) -> Result<()> {
    let pad = " ".repeat(indent);
    for (key, value) in map {
        let key = scalar(key)?;
        match value {
            Value::Mapping(inner) if !inner.is_empty() => {
                out.push_str(&format!("{pad}{key}:\n"));
                write_mapping(out, inner, indent + INDENT)?;
            },
            Value::Sequence(inner) if !inner.is_empty() => {
                out.push_str(&format!("{pad}{key}:\n"));
                write_sequence(out, inner, indent + INDENT)?;
            },
            other => out.push_str(&format!("{pad}{key}: {}\n", scalar(other)?)),
        }
    }
    Ok(())
}

fn write_sequence(out: &mut String, seq: &[Value], indent: usize) -> Result<()> {
    let pad = " ".repeat(indent);
    for item in seq {
        match item {
            Value::Mapping(inner) if !inner.is_empty() => {
                // Render at the item's content column, then put the dash in
                // front of the first line.
                let mut block = String::new();
                write_mapping(&mut block, inner, indent + INDENT)?;
                out.push_str(&pad);
                out.push_str("- ");
                out.push_str(&block[indent + INDENT..]);
            },
            Value::Sequence(inner) if !inner.is_empty() => {
                out.push_str(&format!("{pad}-\n"));
                write_sequence(out, inner, indent + INDENT)?;
            },
            other => out.push_str(&format!("{pad}- {}\n", scalar(other)?)),
        }
    }
    Ok(())
}

/// Single-line rendering of a scalar, an empty collection or a tagged value.
fn scalar(value: &Value) -> Result<String> {
    match value {
        Value::Mapping(map) if map.is_empty() => Ok("{}".to_string()),
        Value::Sequence(seq) if seq.is_empty() => Ok("[]".to_string()),
        Value::Mapping(_) | Value::Sequence(_) => Ok(serde_json::to_string(value)?),
        Value::Tagged(tagged) => Ok(format!("{} {}", tagged.tag, scalar(&tagged.value)?)),
        _ => {
            let rendered = serde_yaml::to_string(value)?;
            let trimmed = rendered.trim_end_matches('\n');
            if trimmed.contains('\n') {
                // Block scalars cannot sit after a key on one line.
                Ok(serde_json::to_string(value)?)
            } else {
                Ok(trimmed.to_string())
            }
        },
    }
}
