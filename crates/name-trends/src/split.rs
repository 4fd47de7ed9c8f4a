/// Splits one comma-separated line into its fields.
///
/// Double quotes, plain or typographic (U+201C/U+201D), enclose a
/// field so it may contain commas; the quote characters themselves are
/// never emitted. Whitespace inside quotes or inside a field is kept,
/// whitespace between fields is skipped. The final field is trimmed and
/// only appended when non-empty.
pub fn split_delimited_line(line: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut word = String::new();
    let mut inside_quotes = false;
    let mut inside_entry = false;

    for ch in line.chars() {
        match ch {
            '"' | '\u{201C}' | '\u{201D}' => {
                if inside_quotes {
                    inside_quotes = false;
                    inside_entry = false;
                } else {
                    inside_quotes = true;
                    inside_entry = true;
                }
            }
            ',' if !inside_quotes => {
                inside_entry = false;
                entries.push(std::mem::take(&mut word));
            }
            c if c.is_whitespace() => {
                if inside_quotes || inside_entry {
                    word.push(c);
                }
            }
            c => {
                word.push(c);
                inside_entry = true;
            }
        }
    }

    if !word.is_empty() {
        entries.push(word.trim().to_string());
    }

    entries
}
