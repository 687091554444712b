//! Interactive rating loop.
//!
//! Asks for each attribute in turn, prints the suggested genre, and repeats
//! until the user declines or input ends. Reader and writer are generic so
//! the loop can be driven from tests.

use std::io::{BufRead, Write};

use anyhow::Result;
use colored::Colorize;
use genre_model::schema::{AGE_RANGE, LENGTH_RANGE, TEMPO_RANGE};
use genre_model::{ATTRIBUTE_COUNT, Attribute, ListeningContext, Mood, Recommender, Setting};

/// Run the loop; returns how many recommendations were made
pub fn run_session<R: BufRead, W: Write>(
    recommender: &Recommender,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    let mut count = 0;

    loop {
        writeln!(output, "{}", "Rate your listening context:".bold().blue())?;
        let Some(context) = read_context(input, output)? else {
            break;
        };

        let rec = recommender.predict(&context)?;
        writeln!(
            output,
            "Suggested genre: {} (id {})",
            rec.genre_name().green().bold(),
            rec.genre_id()
        )?;
        count += 1;

        write!(output, "Rate another? [y/N] ")?;
        output.flush()?;
        match read_line(input)? {
            Some(answer) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") => {}
            _ => break,
        }
    }

    Ok(count)
}

/// Prompt for all six attributes; `None` if input ends first
fn read_context<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<ListeningContext>> {
    let mut vector = [0i64; ATTRIBUTE_COUNT];
    for attribute in Attribute::ALL {
        match prompt_attribute(attribute, input, output)? {
            Some(value) => vector[attribute.index()] = value,
            None => return Ok(None),
        }
    }
    Ok(Some(ListeningContext::from_vector(vector)))
}

fn prompt_attribute<R: BufRead, W: Write>(
    attribute: Attribute,
    input: &mut R,
    output: &mut W,
) -> Result<Option<i64>> {
    match attribute {
        Attribute::Mood => print_menu(output, &Mood::names())?,
        Attribute::Setting => print_menu(output, &Setting::names())?,
        _ => {}
    }

    loop {
        write!(output, "{} {}: ", attribute, hint(attribute))?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };

        match parse_answer(attribute, &line) {
            Some(value) => {
                if !in_documented_range(attribute, value) {
                    writeln!(
                        output,
                        "{} {} is outside the usual range; using it anyway",
                        "!".yellow(),
                        value
                    )?;
                }
                return Ok(Some(value));
            }
            None => writeln!(output, "{} Please enter a whole number", "✗".red())?,
        }
    }
}

fn print_menu<W: Write>(output: &mut W, names: &[&str]) -> Result<()> {
    for (code, name) in names.iter().enumerate() {
        writeln!(output, "  {}) {}", code, name)?;
    }
    Ok(())
}

fn hint(attribute: Attribute) -> String {
    match attribute {
        Attribute::Tempo => format!("({}-{})", TEMPO_RANGE.min, TEMPO_RANGE.max),
        Attribute::Length => format!("({}-{})", LENGTH_RANGE.min, LENGTH_RANGE.max),
        Attribute::Age => format!("({}-{})", AGE_RANGE.min, AGE_RANGE.max),
        Attribute::Explicit => "(0 = no, 1 = yes)".to_string(),
        Attribute::Mood => format!("(0-{} or name)", Mood::ALL.len() - 1),
        Attribute::Setting => format!("(0-{} or name)", Setting::ALL.len() - 1),
    }
}

/// Mood and setting also accept option names
fn parse_answer(attribute: Attribute, line: &str) -> Option<i64> {
    if let Ok(value) = line.parse::<i64>() {
        return Some(value);
    }
    match attribute {
        Attribute::Mood => line.parse::<Mood>().ok().map(Mood::code),
        Attribute::Setting => line.parse::<Setting>().ok().map(Setting::code),
        _ => None,
    }
}

pub fn in_documented_range(attribute: Attribute, value: i64) -> bool {
    match attribute {
        Attribute::Tempo => TEMPO_RANGE.contains(value),
        Attribute::Length => LENGTH_RANGE.contains(value),
        Attribute::Age => AGE_RANGE.contains(value),
        Attribute::Explicit => value == 0 || value == 1,
        Attribute::Mood => (0..Mood::ALL.len() as i64).contains(&value),
        Attribute::Setting => (0..Setting::ALL.len() as i64).contains(&value),
    }
}

/// Next trimmed line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
