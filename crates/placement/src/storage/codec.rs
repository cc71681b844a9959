//! Field-level CSV encoding shared by every data file.
//!
//! Rows are split on commas outside quoted spans and each raw field is then
//! decoded on its own, so a decoder never needs to look past one field.

const QUOTE: char = '"';

/// Escape a single value for a CSV row.
///
/// Embedded quotes are doubled and the field is wrapped in quotes when it
/// carries a delimiter, a quote, a line break, or surrounding whitespace.
pub fn encode_field(value: &str) -> String {
    let escaped = value.replace(QUOTE, "\"\"");
    if needs_quoting(value) {
        format!("{QUOTE}{escaped}{QUOTE}")
    } else {
        escaped
    }
}

fn needs_quoting(value: &str) -> bool {
    value.contains(|ch: char| matches!(ch, ',' | QUOTE | '\n' | '\r')) || value.trim() != value
}

/// Decode a raw field produced by [`split_row`].
///
/// Unbalanced quoting is passed through untouched.
pub fn decode_field(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix(QUOTE)
        .and_then(|rest| rest.strip_suffix(QUOTE))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => trimmed.to_string(),
    }
}

/// Split one logical row on commas that sit outside a quoted span.
///
/// Fields are returned raw (still quoted); empty leading and trailing fields
/// keep their position.
pub fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}

/// Encode every field and join them into a single row (no terminator).
pub fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| encode_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Break file contents into logical rows.
///
/// A line break inside a quoted span belongs to the field, not the row.
/// A quote still open at the end of the text cannot span rows, so that row
/// ends at its own line break and scanning resumes on the next line.
/// Blank rows are skipped and a trailing `\r` is dropped from each row.
pub fn logical_rows(text: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let (row, tail) = next_row(rest);
        finish_row(&mut rows, row);
        rest = tail;
    }

    rows
}

fn next_row(text: &str) -> (&str, &str) {
    let mut in_quotes = false;
    for (index, ch) in text.char_indices() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            '\n' if !in_quotes => return (&text[..index], &text[index + 1..]),
            _ => {}
        }
    }

    match text.find('\n') {
        Some(index) if in_quotes => (&text[..index], &text[index + 1..]),
        _ => (text, ""),
    }
}

fn finish_row(rows: &mut Vec<String>, row: &str) {
    let row = row.strip_suffix('\r').unwrap_or(row);
    if !row.trim().is_empty() {
        rows.push(row.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "plain",
        "Data Science, AI",
        "say \"hello\"",
        "\"",
        "\"\"",
        "line one\nline two",
        "carriage\r\nreturn",
        "  padded  ",
        "trailing,",
        ",leading",
        "mixed \"quotes\", commas\nand breaks",
    ];

    #[test]
    fn decode_reverses_encode() {
        for sample in SAMPLES {
            assert_eq!(decode_field(&encode_field(sample)), *sample, "sample {sample:?}");
        }
    }

    #[test]
    fn encode_leaves_simple_values_unquoted() {
        assert_eq!(encode_field("Computer Science"), "Computer Science");
        assert_eq!(encode_field("a,b"), "\"a,b\"");
        assert_eq!(encode_field("6\" ruler"), "\"6\"\" ruler\"");
    }

    #[test]
    fn decode_trims_and_ignores_unbalanced_quotes() {
        assert_eq!(decode_field("  value "), "value");
        assert_eq!(decode_field("\"open"), "\"open");
        assert_eq!(decode_field("\""), "\"");
        assert_eq!(decode_field(" \"a \"\"b\"\"\" "), "a \"b\"");
    }

    #[test]
    fn split_row_keeps_empty_fields_in_position() {
        assert_eq!(split_row(",a,,b,"), vec!["", "a", "", "b", ""]);
        assert_eq!(split_row(""), vec![""]);
    }

    #[test]
    fn split_row_ignores_commas_inside_quotes() {
        let fields = split_row("1,\"Smith, Jane\",\"say \"\"hi\"\", ok\",end");
        assert_eq!(
            fields,
            vec!["1", "\"Smith, Jane\"", "\"say \"\"hi\"\", ok\"", "end"]
        );
    }

    #[test]
    fn split_of_encoded_row_reconstructs_fields() {
        let original: Vec<&str> = SAMPLES
            .iter()
            .copied()
            .filter(|sample| !sample.contains(|ch: char| ch == '\n' || ch == '\r'))
            .collect();
        let decoded: Vec<String> = split_row(&encode_row(&original))
            .iter()
            .map(|raw| decode_field(raw))
            .collect();
        assert_eq!(decoded, original);
    }

    #[test]
    fn logical_rows_keep_quoted_line_breaks() {
        let text = "H1,H2\r\n1,\"two\nlines\"\r\n\n2,plain\n";
        let rows = logical_rows(text);
        assert_eq!(rows, vec!["H1,H2", "1,\"two\nlines\"", "2,plain"]);

        let fields: Vec<String> = split_row(&rows[1]).iter().map(|f| decode_field(f)).collect();
        assert_eq!(fields, vec!["1", "two\nlines"]);
    }

    #[test]
    fn unterminated_quote_only_claims_its_own_line() {
        let text = "H1,H2\n1,\"multi\nline\"\n2,Jo\"hn\n3,ok\r\n4,ok\n";
        assert_eq!(
            logical_rows(text),
            vec!["H1,H2", "1,\"multi\nline\"", "2,Jo\"hn", "3,ok", "4,ok"]
        );
    }
}
