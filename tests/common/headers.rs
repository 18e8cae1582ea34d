use edge_cors::Headers;
use edge_cors::constants::header;
use std::collections::HashSet;

/// Looks up a response header by the canonical name the engine emits.
pub fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers.get(name).map(String::as_str)
}

pub fn has_header(headers: &Headers, name: &str) -> bool {
    headers.contains_key(name)
}

pub fn vary_values(headers: &Headers) -> HashSet<String> {
    let Some(vary) = header_value(headers, header::VARY) else {
        return HashSet::new();
    };

    vary.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
