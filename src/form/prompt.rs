//! Interactive form collection over a line-oriented terminal

use super::fields::FormField;
use super::reflection::LinkType;
use super::session::{FormError, FormState};
use std::io::{BufRead, Write};

/// Ask every question of the form in order and collect the answers
///
/// Text answers are stored verbatim without validation. Link choices accept
/// a name or its number; an empty answer keeps the default (`Real`) and an
/// unrecognized one is asked again. End of input leaves the remaining
/// fields at their defaults.
pub fn prompt_form<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<FormState, FormError> {
    let mut form = FormState::new();

    for field in FormField::ALL {
        if field == FormField::SubDesire(0) {
            writeln!(output, "\nSub-Desires")?;
        }

        if field.is_choice() {
            if let Some(link_type) = ask_link(input, output, field)? {
                form.set(field, link_type.as_str())?;
            }
            continue;
        }

        write!(output, "{} ", field.prompt())?;
        output.flush()?;
        match read_answer(input)? {
            Some(answer) => form.set(field, &answer)?,
            None => break,
        }
    }

    Ok(form)
}

fn ask_link<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: FormField,
) -> Result<Option<LinkType>, FormError> {
    let options = LinkType::ALL
        .iter()
        .enumerate()
        .map(|(idx, lt)| format!("[{}] {}", idx + 1, lt))
        .collect::<Vec<_>>()
        .join(" ");

    loop {
        write!(output, "{} {} (default {}) ", field.prompt(), options, LinkType::default())?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };
        if answer.trim().is_empty() {
            return Ok(None);
        }
        match LinkType::from_choice(&answer) {
            Some(link_type) => return Ok(Some(link_type)),
            None => writeln!(output, "Please answer Real, Spurious, or Unclear.")?,
        }
    }
}

/// Read one line without its terminator; `None` at end of input
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>, FormError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(trimmed.to_string()))
}
