use itertools::Itertools;
use winnow::{Parser, Result, combinator::delimited, token::take_till};

use super::{Mode, char_map};

/// Longest run of disallowed characters slugify removes.
const MAX_STRIPPED_RUN: usize = 60;

/// Trims surrounding whitespace, but only in final mode so that typing a
/// space at the end of the input is not immediately undone.
pub fn trim(text: &str, mode: Mode) -> String {
    match mode {
        Mode::Live => text.to_owned(),
        Mode::Final => text.trim().to_owned(),
    }
}

fn html_tag<'i>(input: &mut &'i str) -> Result<&'i str> {
    delimited('<', take_till(0.., '>'), '>').take().parse_next(input)
}

/// Removes everything that looks like a tag, `<` up to the nearest `>`.
/// An unterminated `<` is kept.
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut input = text;

    while let Some(start) = input.find('<') {
        out.push_str(&input[..start]);
        input = &input[start..];

        let before = input;
        if html_tag.parse_next(&mut input).is_err() {
            out.push_str(before);
            return out;
        }
    }
    out.push_str(input);

    out
}

/// Decodes `&gt;` and collapses runs of two or more whitespace characters
/// into a single space. A lone whitespace character is left untouched.
pub fn normalize_whitespace(text: &str) -> String {
    let text = text.replace("&gt;", ">");
    let mut out = String::with_capacity(text.len());

    for (is_whitespace, run) in &text.chars().chunk_by(|c| c.is_whitespace()) {
        let run: Vec<char> = run.collect();
        if is_whitespace && run.len() > 1 {
            out.push(' ');
        } else {
            out.extend(run);
        }
    }

    out
}

fn is_slug_char(c: char) -> bool {
    c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Lowercases and transliterates `text`, then replaces the first space with a
/// hyphen and drops the first run of characters that are not `[a-z0-9-]`.
///
/// Only the first space and the first disallowed run are touched. Existing
/// inputs depend on this, e.g. `"a b c"` becomes `"a-bc"`.
pub fn slugify(text: &str) -> String {
    let mut mapped = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        match char_map::lookup(c) {
            Some(replacement) => mapped.push_str(replacement),
            None => mapped.push(c),
        }
    }

    strip_first_disallowed_run(&mapped.replacen(' ', "-", 1))
}

fn strip_first_disallowed_run(text: &str) -> String {
    let Some(start) = text.find(|c: char| !is_slug_char(c)) else {
        return text.to_owned();
    };

    // The run is capped in UTF-16 code units, a character outside the BMP
    // counts twice. A character that would cross the cap is kept whole.
    let mut units = 0;
    let end = text[start..]
        .char_indices()
        .take_while(|(_, c)| {
            units += c.len_utf16();
            !is_slug_char(*c) && units <= MAX_STRIPPED_RUN
        })
        .last()
        .map_or(start, |(idx, c)| start + idx + c.len_utf8());

    format!("{}{}", &text[..start], &text[end..])
}
