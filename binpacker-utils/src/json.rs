use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};
use std::io::{Read, Write};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` with object keys sorted, so that equal values always
/// produce identical strings (seed derivation depends on this).
pub fn jsonify<T>(obj: &T) -> serde_json::Result<String>
where
    T: Serialize,
{
    to_string(&sort_keys(to_value(obj)?))
}

/// Pretty variant of [`jsonify`] for human-facing output.
pub fn jsonify_pretty<T>(obj: &T) -> serde_json::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(&sort_keys(to_value(obj)?))
}

fn sort_keys(json_value: Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted_map = Map::new();
            for (key, value) in entries {
                sorted_map.insert(key, sort_keys(value));
            }
            Value::Object(sorted_map)
        }
        Value::Array(values) => Value::Array(values.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

pub fn decompress_obj<T>(input: &[u8]) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let mut decoder = ZlibDecoder::new(input);
    let mut decompressed = String::new();
    decoder.read_to_string(&mut decompressed)?;
    Ok(serde_json::from_str(&decompressed)?)
}

pub fn compress_obj<T>(input: &T) -> anyhow::Result<Vec<u8>>
where
    T: Serialize,
{
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(jsonify(input)?.as_bytes())?;
    Ok(encoder.finish()?)
}
