//! `${NAME}` placeholder expansion.
//!
//! The input is scanned once, left to right, without re-scanning substituted
//! text:
//!
//! - `${NAME}` is replaced by the value of `NAME` from the given variables,
//!   then from the fallback lookup, then by an empty string.
//! - `\$` is emitted as a literal `$`. Because the `$` is consumed, an escaped
//!   placeholder such as `\${NAME}` comes out verbatim as `${NAME}`.
//! - A backslash only escapes a directly following `$`. In `\\${NAME}` the
//!   first backslash is kept and the second escapes the `$`, giving `\${NAME}`.
//! - `${` without a closing `}`, and the empty `${}`, are left as they are.

use std::collections::HashMap;
use std::env;

const ESCAPE: char = '\\';
const DOLLAR: char = '$';

/// Expands placeholders, falling back to the process environment for names
/// missing from `variables`.
pub fn expand<S: std::hash::BuildHasher>(input: &str, variables: &HashMap<String, String, S>) -> String {
    expand_with(input, variables, |name| env::var(name).ok())
}

/// Expands placeholders with an explicit fallback lookup.
pub fn expand_with<S, F>(input: &str, variables: &HashMap<String, String, S>, fallback: F) -> String
where
    S: std::hash::BuildHasher,
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(position) = rest.find(&[ESCAPE, DOLLAR][..]) {
        output.push_str(&rest[..position]);
        let tail = &rest[position..];

        if let Some(after_escape) = tail.strip_prefix("\\$") {
            output.push(DOLLAR);
            rest = after_escape;
            continue;
        }

        if let Some((name, after_placeholder)) = split_placeholder(tail) {
            match variables.get(name) {
                Some(value) => output.push_str(value),
                None => output.push_str(&fallback(name).unwrap_or_default()),
            }
            rest = after_placeholder;
            continue;
        }

        // A lone `\` or `$` that starts nothing
        output.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    output.push_str(rest);
    output
}

/// Splits `${NAME}rest` into `NAME` and `rest`.
fn split_placeholder(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix("${")?;
    let end = body.find('}')?;

    if end == 0 {
        return None;
    }

    Some((&body[..end], &body[end + 1..]))
}
