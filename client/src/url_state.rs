//! URL query-string codec for `SearchState`.
//!
//! The URL is the only persistent store for search state, so the codec is
//! lossless over every reachable state: `decode(encode(s)) == s`.

use common::search_state::SearchState;
use url::form_urlencoded;

use crate::error::StateDecodeWarning;


/// Parses a query string (leading `?` tolerated) into a `SearchState`.
///
/// A key ending in `[]` accumulates values in order of appearance. A
/// repeated key without `[]` keeps its first occurrence and emits a
/// warning. Reserved keys: `q`, `start`, `size`, `fields` and
/// `collection[]`; everything else becomes a filter. Unusable numeric
/// parameters are dropped with a warning and the defaults apply.
pub fn decode(query_string: &str, default_size: u64) -> (SearchState, Vec<StateDecodeWarning>) {
    let raw = query_string.strip_prefix('?').unwrap_or(query_string);

    let mut state = SearchState { size: default_size, ..SearchState::default() };
    let mut warnings = Vec::new();
    let mut seen_scalars: Vec<String> = Vec::new();

    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let key = key.into_owned();
        let value = value.into_owned();

        if let Some(field) = key.strip_suffix("[]") {
            if field == "collection" {
                state.selected_collections.push(value);
            } else {
                state.filters.insert_value(field, value);
            }
            continue;
        }

        if seen_scalars.iter().any(|k| k == &key) {
            warnings.push(StateDecodeWarning::DuplicateScalarKey { key });
            continue;
        }
        seen_scalars.push(key.clone());

        match key.as_str() {
            "q" => state.query_text = value,
            "start" => match value.parse::<u64>() {
                Ok(start) => state.start = start,
                Err(_) => {
                    warnings.push(StateDecodeWarning::InvalidNumber { key: key.clone(), value });
                }
            },
            "size" => match value.parse::<u64>() {
                Ok(size) if size > 0 => state.size = size,
                _ => warnings.push(StateDecodeWarning::InvalidNumber { key: key.clone(), value }),
            },
            "fields" => {
                state.fields = value.split(',').filter(|f| !f.is_empty()).map(str::to_string).collect();
            }
            _ => state.filters.insert_value(&key, value),
        }
    }

    (state, warnings)
}

/// Inverse of `decode`. Filters are always emitted in the `[]` form, `start`
/// is omitted on the first page and `size` when it equals the default.
pub fn encode(state: &SearchState, default_size: u64) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !state.query_text.is_empty() {
        serializer.append_pair("q", &state.query_text);
    }
    if !state.fields.is_empty() {
        serializer.append_pair("fields", &state.fields.join(","));
    }
    for id in &state.selected_collections {
        serializer.append_pair("collection[]", id);
    }
    for (field, values) in state.filters.iter() {
        let key = format!("{field}[]");
        for value in values {
            serializer.append_pair(&key, value);
        }
    }
    if state.size != default_size {
        serializer.append_pair("size", &state.size.to_string());
    }
    if state.start != 0 {
        serializer.append_pair("start", &state.start.to_string());
    }

    serializer.finish()
}
