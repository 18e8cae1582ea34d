use std::borrow::Cow;

#[doc(hidden)]
pub fn normalize_lower(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        if value.bytes().any(|byte| byte.is_ascii_uppercase()) {
            Cow::Owned(value.to_ascii_lowercase())
        } else {
            Cow::Borrowed(value)
        }
    } else if value.chars().any(char::is_uppercase) {
        Cow::Owned(value.to_lowercase())
    } else {
        Cow::Borrowed(value)
    }
}

#[doc(hidden)]
pub fn normalize_upper(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        if value.bytes().any(|byte| byte.is_ascii_lowercase()) {
            Cow::Owned(value.to_ascii_uppercase())
        } else {
            Cow::Borrowed(value)
        }
    } else if value.chars().any(char::is_lowercase) {
        Cow::Owned(value.to_uppercase())
    } else {
        Cow::Borrowed(value)
    }
}

pub(crate) fn is_http_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| {
            matches!(
                byte,
                b'0'..=b'9'
                    | b'A'..=b'Z'
                    | b'a'..=b'z'
                    | b'!'
                    | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            )
        })
}

/// Canonical header capitalization: the first letter and every letter following
/// a hyphen are upper-cased, all other letters lower-cased. Values that are not
/// valid header tokens are returned untouched.
#[doc(hidden)]
pub fn canonical_header_key(value: &str) -> Cow<'_, str> {
    if !is_http_token(value) {
        return Cow::Borrowed(value);
    }

    let mut upper = true;
    let needs_change = value.bytes().any(|byte| {
        let wrong = if upper {
            byte.is_ascii_lowercase()
        } else {
            byte.is_ascii_uppercase()
        };
        upper = byte == b'-';
        wrong
    });
    if !needs_change {
        return Cow::Borrowed(value);
    }

    let mut upper = true;
    let canonical: String = value
        .chars()
        .map(|ch| {
            let mapped = if upper {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            };
            upper = ch == '-';
            mapped
        })
        .collect();
    Cow::Owned(canonical)
}

fn is_list_separator(ch: char) -> bool {
    ch == ',' || ch.is_ascii_whitespace()
}

/// Splits a comma and/or whitespace delimited header list into at most `limit`
/// entries. Empty entries are dropped; once the limit is reached the final entry
/// holds the unsplit remainder.
#[doc(hidden)]
pub fn split_header_list(value: &str, limit: usize) -> Vec<&str> {
    let mut entries = Vec::new();
    if limit == 0 {
        return entries;
    }

    let mut rest = value.trim_matches(is_list_separator);
    while !rest.is_empty() {
        if entries.len() + 1 == limit {
            entries.push(rest);
            break;
        }

        match rest.find(is_list_separator) {
            Some(idx) => {
                entries.push(&rest[..idx]);
                rest = rest[idx..].trim_start_matches(is_list_separator);
            }
            None => {
                entries.push(rest);
                break;
            }
        }
    }

    entries
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
