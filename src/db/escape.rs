//! Quoting and scanning helpers for generated SQL text.
//!
//! Only identifiers (table names, alias keys) ever pass through here. Values never do:
//! they travel in the positional parameter list.

/// Quote a string with `quote_char`, doubling any embedded occurrence of it.
pub fn quote_with(s: &str, quote_char: char) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push(quote_char);
    for c in s.chars() {
        if c == quote_char {
            result.push(c);
        }
        result.push(c);
    }
    result.push(quote_char);
    result
}

/// Quote as a single-quoted SQL string, the form used for table names and result aliases.
#[inline]
pub fn quote_single(s: &str) -> String {
    quote_with(s, '\'')
}

/// Strip one layer of identifier quoting (`'x'`, `"x"`, `` `x` ``, `[x]`), undoing doubling.
///
/// Text that is not wrapped in a matching pair is returned unchanged.
pub fn unquote(s: &str) -> String {
    let mut chars = s.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return s.to_string();
    };

    let closing = match first {
        '\'' => '\'',
        '"' => '"',
        '`' => '`',
        '[' => ']',
        _ => return s.to_string(),
    };
    if last != closing {
        return s.to_string();
    }

    let inner = &s[first.len_utf8()..s.len() - last.len_utf8()];
    if first == '[' {
        inner.to_string()
    } else {
        let doubled: String = [closing, closing].iter().collect();
        inner.replace(&doubled, &closing.to_string())
    }
}

/// Number of positional parameters `sql` expects.
///
/// An anonymous `?` takes the index after the largest seen so far and `?NNN` takes index
/// NNN, so the count is the largest index. Quoted literals, quoted or `[bracketed]`
/// identifiers and comments are skipped.
///
/// Named parameters (`:name`, `@name`, `$name`) are not supported; the first one found is
/// returned as the error.
pub fn count_placeholders(sql: &str) -> Result<usize, String> {
    let chars: Vec<char> = sql.chars().collect();
    let len = chars.len();
    let mut largest = 0usize;
    let mut after_ident = false;
    let mut i = 0;

    while i < len {
        let c = chars[i];
        match c {
            '\'' | '"' | '`' | '[' => {
                let closing = if c == '[' { ']' } else { c };
                // a doubled quote closes and immediately reopens, which nets out
                i += 1;
                while i < len && chars[i] != closing {
                    i += 1;
                }
                i += 1;
                after_ident = false;
                continue;
            }
            '-' if chars.get(i + 1) == Some(&'-') => {
                while i < len && chars[i] != '\n' {
                    i += 1;
                }
                after_ident = false;
                continue;
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < len && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
                after_ident = false;
                continue;
            }
            '?' => {
                let start = i + 1;
                let mut end = start;
                while end < len && chars[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    let index = chars[start..end]
                        .iter()
                        .collect::<String>()
                        .parse::<usize>()
                        .unwrap_or(usize::MAX);
                    largest = largest.max(index);
                } else {
                    largest = largest.saturating_add(1);
                }
                i = end;
                after_ident = false;
                continue;
            }
            ':' | '@' | '$'
                if !after_ident
                    && chars
                        .get(i + 1)
                        .is_some_and(|n| n.is_alphabetic() || *n == '_') =>
            {
                let mut end = i + 1;
                while end < len && (chars[end].is_alphanumeric() || chars[end] == '_') {
                    end += 1;
                }
                return Err(chars[i..end].iter().collect());
            }
            _ => {}
        }
        after_ident = c.is_alphanumeric() || c == '_' || c == '$';
        i += 1;
    }
    Ok(largest)
}
