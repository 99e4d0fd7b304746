use anyhow::{Result, bail};
use orderup_ledger::LockMode;
use serde_json::{Map, Value};

/// parse raw `key=val` into `(String, Value)`
pub fn parse_kv(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("argument must be KEY=VALUE, got `{}`", s))?;
    match serde_json::from_str::<Value>(raw) {
        Ok(v) => Ok((key.to_string(), v)),
        Err(_) => Ok((key.to_string(), Value::String(raw.to_string()))),
    }
}

pub fn parse_lock_mode(s: &str) -> Result<LockMode, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "exclusive" => Ok(LockMode::Exclusive),
        "none" => Ok(LockMode::None),
        other => Err(format!(
            "unknown lock mode `{}` (expected `exclusive` or `none`)",
            other
        )),
    }
}

/// Merge a JSON object string and individual `key=value` pairs into one
/// arguments object. Pairs win over keys from the JSON.
pub fn build_arguments(json: Option<&str>, pairs: &[(String, Value)]) -> Result<Value> {
    let mut args = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            other => bail!("--json must be a JSON object, got {}", other),
        },
        None => Map::new(),
    };
    for (key, value) in pairs {
        args.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(args))
}
