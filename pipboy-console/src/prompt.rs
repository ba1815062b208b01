//! Field-by-field construction of domain objects from line input.
use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use colored::Colorize;
use pipboy_game::{Blueprint, DomainObject, FieldDescriptor, FieldKind, FieldValue};

/// Ask for every field of `blueprint`, re-asking until each answer fits.
///
/// # Errors
///
/// Fails if input ends before all fields are answered, or on I/O errors.
pub fn prompt_object<R: BufRead, W: Write>(
    blueprint: &Blueprint,
    input: &mut R,
    output: &mut W,
) -> Result<DomainObject> {
    writeln!(output, "New {}", blueprint.target.tag().bold())?;
    let mut values = Vec::with_capacity(blueprint.fields.len());
    for field in blueprint.fields {
        values.push(prompt_field(field, input, output)?);
    }
    Ok(blueprint.build(&values)?)
}

fn prompt_field<R: BufRead, W: Write>(
    field: &FieldDescriptor,
    input: &mut R,
    output: &mut W,
) -> Result<FieldValue> {
    if let FieldKind::Choice(names) = field.kind {
        for (index, name) in names.iter().enumerate() {
            writeln!(output, "  {index}: {name}")?;
        }
    }
    loop {
        write!(output, "{} ({}; {}): ", field.name, field.kind, field.help)?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended while reading '{}'", field.name);
        }
        match field.kind.parse(field.name, &line) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(output, "{}", err.to_string().red())?,
        }
    }
}
