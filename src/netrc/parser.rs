// ABOUTME: Tokenizer and record assembler for the legacy netrc credentials format
// ABOUTME: Pure text-to-records transforms with no I/O so every rule is testable from strings

use super::error::NetrcError;
use super::store::{Machine, Secret};

const MACHINE: &str = "machine";
const LOGIN: &str = "login";
const PASSWORD: &str = "password";

const RESERVED: [&str; 3] = [MACHINE, LOGIN, PASSWORD];

/// Removes `#` comments, truncating each line independently.
///
/// Line breaks survive the transform so tokens on either side of a comment
/// are never glued together.
pub fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| match line.find('#') {
            Some(start) => &line[..start],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tokenize(content: &str) -> Vec<&str> {
    content.trim().split_whitespace().collect()
}

/// Groups tokens into one candidate record per `machine` keyword.
///
/// Anything before the first `machine` is dropped, as are empty segments
/// produced by back-to-back `machine` keywords.
pub fn split_machines<'a>(tokens: &[&'a str]) -> Option<Vec<Vec<&'a str>>> {
    let first = tokens.iter().position(|token| *token == MACHINE)?;

    let segments: Vec<Vec<&str>> = tokens[first + 1..]
        .split(|token| *token == MACHINE)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_vec())
        .collect();

    Some(segments)
}

/// Value following `keyword`, unless it is missing or itself a keyword.
///
/// The search starts after the host name so a host literally named `login`
/// does not shadow the real keyword.
fn value_for<'a>(segment: &[&'a str], keyword: &str) -> Option<&'a str> {
    let index = segment.iter().skip(1).position(|token| *token == keyword)? + 1;

    match segment.get(index + 1) {
        Some(value) if !RESERVED.contains(value) => Some(*value),
        _ => None,
    }
}

pub fn assemble_machine(segment: &[&str]) -> Result<Machine, NetrcError> {
    let name = segment.first().ok_or(NetrcError::MachineNotFound)?;

    let login = value_for(segment, LOGIN)
        .ok_or_else(|| NetrcError::MissingValueForToken(LOGIN.to_string()))?;
    let password = value_for(segment, PASSWORD)
        .ok_or_else(|| NetrcError::MissingValueForToken(PASSWORD.to_string()))?;

    Ok(Machine::new(
        (*name).to_string(),
        login.to_string(),
        Secret::new(password),
    ))
}

pub fn assemble_machines(tokens: &[&str]) -> Result<Vec<Result<Machine, NetrcError>>, NetrcError> {
    let segments = split_machines(tokens).ok_or(NetrcError::MachineNotFound)?;
    if segments.is_empty() {
        return Err(NetrcError::MachineNotFound);
    }

    Ok(segments
        .iter()
        .map(|segment| assemble_machine(segment))
        .collect())
}
