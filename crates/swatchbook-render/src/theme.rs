//! Declarative theme files.
//!
//! A theme file is a YAML mapping from defaults keys to values. The loader
//! classifies each YAML value into a [`ThemeValue`] at ingestion time:
//!
//! ```yaml
//! Button.background: "#3366cc"            # hex string: color
//! Button.font: { family: Inter, size: 12, bold: true }
//! Button.margin: { insets: [2, 4, 2, 4] } # top, right, bottom, left
//! Button.minimumSize: { size: [72, 24] }
//! Button.opaque: true
//! Button.arc: 6.5
//! Button.states: [enabled, focused]       # array
//! Button.focusInputMap:
//!   bindings: { SPACE: pressed }
//! ButtonUI: plaf.basic.BasicButtonUI      # plain string: opaque value
//! ```
//!
//! Procedural values (borders, painters, icons, deferred entries) are not
//! expressible declaratively; providers construct those in code.

use serde_yaml::Value;

use crate::color::Rgba;
use crate::error::ReportError;
use crate::value::{Dictionary, FontSpec, InputMap, Insets, Size, ThemeValue};

/// Parses a YAML theme document into a defaults dictionary.
pub fn from_yaml(source: &str) -> Result<Dictionary, ReportError> {
    let root: Value = serde_yaml::from_str(source)?;
    let mapping = match root {
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(ReportError::ThemeSpec(
                "theme document must be a mapping of key to value".to_string(),
            ))
        }
    };

    let mut defaults = Dictionary::new();
    for (key, value) in mapping {
        let key = key
            .as_str()
            .ok_or_else(|| ReportError::ThemeSpec(format!("non-string key: {:?}", key)))?
            .to_string();
        let converted = convert(&value)
            .map_err(|msg| ReportError::ThemeSpec(format!("key '{}': {}", key, msg)))?;
        defaults.insert(key, converted);
    }
    Ok(defaults)
}

/// Classifies one YAML value into the value universe.
fn convert(value: &Value) -> Result<ThemeValue, String> {
    match value {
        Value::Null => Ok(ThemeValue::Other(None)),
        Value::Bool(b) => Ok(ThemeValue::Bool(*b)),
        Value::Number(n) => {
            let n = n
                .as_f64()
                .ok_or_else(|| format!("unrepresentable number: {}", n))?;
            Ok(ThemeValue::Number(n))
        }
        Value::String(s) => {
            if s.starts_with('#') {
                Rgba::parse_hex(s).map(ThemeValue::Color)
            } else {
                Ok(ThemeValue::Other(Some(s.clone())))
            }
        }
        Value::Sequence(items) => {
            let items = items.iter().map(convert).collect::<Result<Vec<_>, _>>()?;
            Ok(ThemeValue::Array(items))
        }
        Value::Mapping(_) => convert_mapping(value),
        Value::Tagged(_) => Err("unsupported tagged value".to_string()),
    }
}

/// Mappings carry one discriminating field: `family` (font), `insets`,
/// `size`, or `bindings` (input map).
fn convert_mapping(value: &Value) -> Result<ThemeValue, String> {
    if value.get("family").is_some() {
        let family = get_str(value, "family")?;
        let size = get_f64(value, "size")?;
        let mut font = FontSpec::new(family, size as f32);
        font.bold = get_bool_or(value, "bold", false)?;
        font.italic = get_bool_or(value, "italic", false)?;
        return Ok(ThemeValue::Font(font));
    }
    if let Some(edges) = value.get("insets") {
        let edges = numbers(edges, 4, "insets")?;
        return Ok(ThemeValue::Insets(Insets::new(
            edges[0], edges[1], edges[2], edges[3],
        )));
    }
    if let Some(dims) = value.get("size") {
        let dims = numbers(dims, 2, "size")?;
        return Ok(ThemeValue::Size(Size::new(dims[0], dims[1])));
    }
    if let Some(bindings) = value.get("bindings") {
        let name = match value.get("name") {
            Some(_) => get_str(value, "name")?,
            None => "InputMap".to_string(),
        };
        let mut map = InputMap::new(name);
        let bindings = bindings
            .as_mapping()
            .ok_or_else(|| "bindings must be a mapping".to_string())?;
        for (chord, action) in bindings {
            let chord = chord
                .as_str()
                .ok_or_else(|| "binding chord must be a string".to_string())?;
            let action = action
                .as_str()
                .ok_or_else(|| "binding action must be a string".to_string())?;
            map.bindings.insert(chord.to_string(), action.to_string());
        }
        return Ok(ThemeValue::InputMap(map));
    }
    Err("mapping needs one of: family, insets, size, bindings".to_string())
}

fn get_str(value: &Value, field: &str) -> Result<String, String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("field '{}' must be a string", field))
}

fn get_f64(value: &Value, field: &str) -> Result<f64, String> {
    value
        .get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("field '{}' must be a number", field))
}

fn get_bool_or(value: &Value, field: &str, default: bool) -> Result<bool, String> {
    match value.get(field) {
        None => Ok(default),
        Some(v) => v
            .as_bool()
            .ok_or_else(|| format!("field '{}' must be a boolean", field)),
    }
}

fn numbers(value: &Value, count: usize, what: &str) -> Result<Vec<u32>, String> {
    let items = value
        .as_sequence()
        .ok_or_else(|| format!("{} must be a sequence of {} numbers", what, count))?;
    if items.len() != count {
        return Err(format!(
            "{} must have exactly {} numbers, got {}",
            what,
            count,
            items.len()
        ));
    }
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .map(|n| n as u32)
                .ok_or_else(|| format!("{} components must be non-negative integers", what))
        })
        .collect()
}
