//! Request body decoding.
//!
//! The raw body is tried as JSON first, then as URL-encoded form data, and
//! finally the host's pre-parsed POST fields are used. Decoding never fails;
//! the worst case is an empty map.

use serde_json::{Map, Value};

/// Decode `raw` into a parameter map, falling back to `post_fields`.
pub fn decode_params(raw: &[u8], post_fields: &Map<String, Value>) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => return map,
        Ok(Value::Array(items)) => return indexed(items),
        Ok(Value::Null) | Err(_) => {
            if let Some(map) = decode_form(raw) {
                return map;
            }
        }
        // A JSON scalar decoded fine but is not a mapping.
        Ok(_) => {}
    }

    tracing::debug!(
        body_len = raw.len(),
        "Request body is neither JSON nor form data, using POST fields"
    );
    post_fields.clone()
}

/// Decode an `application/x-www-form-urlencoded` body.
///
/// Bracketed keys nest (`a[b]=1`, `a[]=1`). Returns `None` when the body
/// does not look like form data: no `=` at all, or a segment with an empty key.
pub fn decode_form(raw: &[u8]) -> Option<Map<String, Value>> {
    if !raw.contains(&b'=') {
        return None;
    }
    let malformed = raw
        .split(|b| *b == b'&')
        .filter(|segment| !segment.is_empty())
        .any(|segment| segment.starts_with(b"="));
    if malformed {
        return None;
    }

    let mut map = Map::new();
    for (key, value) in url::form_urlencoded::parse(raw) {
        let path = split_key(&key);
        insert_path(&mut map, &path, Value::String(value.into_owned()));
    }

    for value in map.values_mut() {
        listify(value);
    }
    Some(map)
}

fn indexed(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v))
        .collect()
}

/// Deepest bracket nesting honoured in form keys.
pub const MAX_NESTING: usize = 64;

/// Split `a[b][]` into `["a", "b", ""]`. Keys with no well-formed bracket
/// group are kept whole. Past [`MAX_NESTING`] groups the remainder of the
/// key becomes one literal segment.
fn split_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[').filter(|i| *i > 0) else {
        return vec![key.to_string()];
    };

    let mut path = vec![key[..open].to_string()];
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        if path.len() > MAX_NESTING {
            path.push(rest.to_string());
            break;
        }
        let Some(close) = inner.find(']') else { break };
        path.push(inner[..close].to_string());
        rest = &inner[close + 1..];
    }

    if path.len() == 1 {
        vec![key.to_string()]
    } else {
        path
    }
}

fn insert_path(map: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    let key = if first.is_empty() {
        next_index(map).to_string()
    } else {
        first.clone()
    };

    if rest.is_empty() {
        map.insert(key, value);
        return;
    }

    let entry = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        insert_path(child, rest, value);
    }
}

fn next_index(map: &Map<String, Value>) -> usize {
    map.keys()
        .filter_map(|k| k.parse::<usize>().ok())
        .max()
        .map_or(0, |max| max + 1)
}

/// Turn nested maps keyed exactly `0..n` into arrays.
fn listify(value: &mut Value) {
    let Value::Object(map) = value else { return };
    for child in map.values_mut() {
        listify(child);
    }
    if map.is_empty() {
        return;
    }

    let mut indices: Vec<usize> = Vec::with_capacity(map.len());
    for key in map.keys() {
        match key.parse::<usize>() {
            Ok(i) if i.to_string() == *key => indices.push(i),
            _ => return,
        }
    }
    indices.sort_unstable();
    if indices.iter().enumerate().any(|(pos, i)| pos != *i) {
        return;
    }

    let mut taken = std::mem::take(map);
    let items = (0..indices.len())
        .map(|i| taken.remove(&i.to_string()).unwrap_or(Value::Null))
        .collect();
    *value = Value::Array(items);
}
