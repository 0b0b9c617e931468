use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TwingateError, TwingateResult};
use crate::twingate_error;

lazy_static! {
    static ref PORT_RANGE: Regex = Regex::new(r"^(\d+)(?:\s*-\s*(\d+))?$").unwrap();
}

/// Parameters of one batch item, keyed by parameter name.
///
/// Nested collections such as `additionalFields` and `updateFields` are plain JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> TwingateResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(twingate_error!(
                InvalidInput,
                "item parameters must be a JSON object, got {}",
                other
            )),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Insert a value under a dotted key, creating intermediate objects:
    /// `updateFields.name` sets `{"updateFields": {"name": ...}}`.
    pub fn set_path(&mut self, key: &str, value: Value) -> TwingateResult<()> {
        let mut parts = key.split('.').peekable();
        let mut target = &mut self.0;

        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(twingate_error!(InvalidInput, "invalid parameter name '{}'", key));
            }
            if parts.peek().is_none() {
                target.insert(part.to_string(), value);
                return Ok(());
            }
            let entry = target
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            target = match entry {
                Value::Object(map) => map,
                _ => {
                    return Err(twingate_error!(
                        InvalidInput,
                        "parameter '{}' is not a collection",
                        part
                    ))
                }
            };
        }

        Err(twingate_error!(InvalidInput, "invalid parameter name '{}'", key))
    }

    /// Parse `KEY=VALUE`. The value is taken as JSON when it parses, otherwise as text.
    pub fn set_pair(&mut self, pair: &str) -> TwingateResult<()> {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| twingate_error!(InvalidInput, "expected KEY=VALUE, got '{}'", pair))?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.set_path(key.trim(), value)
    }

    pub fn required_str(&self, name: &str) -> TwingateResult<String> {
        self.optional_str(name)?
            .ok_or_else(|| twingate_error!(InvalidInput, "parameter '{}' is required", name))
    }

    /// Text value of `name`; empty strings count as absent.
    pub fn optional_str(&self, name: &str) -> TwingateResult<Option<String>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(twingate_error!(
                InvalidInput,
                "parameter '{}' must be text, got {}",
                name,
                other
            )),
        }
    }

    pub fn required_bool(&self, name: &str) -> TwingateResult<bool> {
        self.optional_bool(name)?
            .ok_or_else(|| twingate_error!(InvalidInput, "parameter '{}' is required", name))
    }

    pub fn optional_bool(&self, name: &str) -> TwingateResult<Option<bool>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(twingate_error!(InvalidInput, "parameter '{}' must be true or false", name)),
            },
            Some(other) => Err(twingate_error!(
                InvalidInput,
                "parameter '{}' must be a boolean, got {}",
                name,
                other
            )),
        }
    }

    pub fn optional_u32(&self, name: &str) -> TwingateResult<Option<u32>> {
        let invalid = || twingate_error!(InvalidInput, "parameter '{}' must be a positive integer", name);
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(invalid),
            Some(Value::String(s)) => s.trim().parse::<u32>().map(Some).map_err(|_| invalid()),
            Some(_) => Err(invalid()),
        }
    }

    /// Nested collection such as `additionalFields`; absent means empty.
    pub fn collection(&self, name: &str) -> TwingateResult<Params> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(Params::new()),
            Some(Value::Object(map)) => Ok(Params(map.clone())),
            Some(other) => Err(twingate_error!(
                InvalidInput,
                "parameter '{}' must be a collection, got {}",
                name,
                other
            )),
        }
    }

    /// ID list given either as a comma-separated string or as a JSON array.
    pub fn id_list(&self, name: &str) -> TwingateResult<Option<Vec<String>>> {
        let ids = match self.0.get(name) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) => split_ids(s),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.trim().to_string()),
                    other => Err(twingate_error!(
                        InvalidInput,
                        "parameter '{}' must contain IDs, got {}",
                        name,
                        other
                    )),
                })
                .filter(|id| !matches!(id, Ok(s) if s.is_empty()))
                .collect::<TwingateResult<Vec<_>>>()?,
            Some(other) => {
                return Err(twingate_error!(
                    InvalidInput,
                    "parameter '{}' must be a list of IDs, got {}",
                    name,
                    other
                ))
            }
        };

        Ok(if ids.is_empty() { None } else { Some(ids) })
    }

    /// Copy of every non-null entry, for operations that forward their update fields as-is.
    pub fn into_variables(self) -> Map<String, Value> {
        self.0.into_iter().filter(|(_, v)| !v.is_null()).collect()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

/// Parse `"22, 80, 443, 8000-9000"` into port ranges. A single port is a range of one.
pub fn parse_port_ranges(raw: &str) -> TwingateResult<Vec<PortRange>> {
    let mut ranges = Vec::new();

    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let captures = PORT_RANGE
            .captures(part)
            .ok_or_else(|| twingate_error!(InvalidInput, "invalid port or range '{}'", part))?;

        let parse = |s: &str| {
            s.parse::<u16>()
                .map_err(|_| twingate_error!(InvalidInput, "port '{}' is out of range", s))
        };
        let start = parse(&captures[1])?;
        let end = match captures.get(2) {
            Some(end) => parse(end.as_str())?,
            None => start,
        };

        if start > end {
            return Err(TwingateError::InvalidInput(format!(
                "port range '{}' starts after it ends",
                part
            )));
        }
        ranges.push(PortRange { start, end });
    }

    Ok(ranges)
}
