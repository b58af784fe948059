use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::schema::{FieldKind, FieldRule, Location, Schema};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?:[ '-][A-Za-z]+)*$").expect("name regex"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request values by location. Path values are always strings.
#[derive(Debug, Default)]
pub struct Inputs<'a> {
    pub body: Option<&'a Map<String, Value>>,
    pub path: Option<&'a Map<String, Value>>,
}

impl<'a> Inputs<'a> {
    fn source(&self, location: Location) -> Option<&'a Map<String, Value>> {
        match location {
            Location::Body => self.body,
            Location::Path => self.path,
        }
    }
}

// Shape: wrong type / size. Format: the value has the right type but the wrong form;
// only format violations are replaced by a rule's custom message.
enum Violation {
    Shape(String),
    Format(String),
}

/// Returns the first violation as a display message.
pub fn validate_request(schema: &Schema, inputs: &Inputs<'_>) -> Result<(), String> {
    for rule in schema.fields {
        let source = inputs.source(rule.location);
        let value = source
            .and_then(|values| values.get(rule.name))
            .filter(|v| !v.is_null());

        let Some(value) = value else {
            if rule.required {
                return Err(format!("\"{}\" is required", rule.name));
            }
            continue;
        };

        match check_field(rule, value, source) {
            Ok(()) => {}
            Err(Violation::Shape(message)) => return Err(message),
            Err(Violation::Format(message)) => {
                return Err(rule.message.map(str::to_string).unwrap_or(message));
            }
        }
    }

    if let Some(body) = inputs.body {
        let unknown = body.keys().find(|key| {
            !schema
                .fields
                .iter()
                .any(|f| f.location == Location::Body && f.name == key.as_str())
        });
        if let Some(key) = unknown {
            return Err(format!("\"{key}\" is not allowed"));
        }
    }

    Ok(())
}

fn check_field(
    rule: &FieldRule,
    value: &Value,
    siblings: Option<&Map<String, Value>>,
) -> Result<(), Violation> {
    let name = rule.name;

    match rule.kind {
        FieldKind::Text { min, max } => {
            let len = non_blank(name, value)?.chars().count();
            if len < min {
                return Err(Violation::Shape(format!(
                    "\"{name}\" length must be at least {min} characters long"
                )));
            }
            if len > max {
                return Err(Violation::Shape(format!(
                    "\"{name}\" length must be less than or equal to {max} characters long"
                )));
            }
        }
        FieldKind::Name => {
            if !NAME.is_match(non_blank(name, value)?) {
                return Err(Violation::Format(format!(
                    "\"{name}\" must only contain alphabetic characters"
                )));
            }
        }
        FieldKind::Email => {
            if !EMAIL.is_match(non_blank(name, value)?) {
                return Err(Violation::Format(format!("\"{name}\" must be a valid email")));
            }
        }
        FieldKind::Password => {
            if !strong_password(text(name, value)?) {
                return Err(Violation::Format(format!(
                    "\"{name}\" must be at least 6 characters with a letter, a number and a symbol"
                )));
            }
        }
        FieldKind::Phone => {
            if !PHONE.is_match(non_blank(name, value)?) {
                return Err(Violation::Format(format!(
                    "\"{name}\" must be a valid phone number"
                )));
            }
        }
        FieldKind::Integer { min, max } => {
            let n = integer(name, value, rule.location)?;
            if n < min {
                return Err(Violation::Shape(format!(
                    "\"{name}\" must be greater than or equal to {min}"
                )));
            }
            if let Some(max) = max
                && n > max
            {
                return Err(Violation::Shape(format!(
                    "\"{name}\" must be less than or equal to {max}"
                )));
            }
        }
        FieldKind::Date { after } => {
            let date = parse_date(text(name, value)?).ok_or_else(|| {
                Violation::Format(format!(
                    "\"{name}\" must be a valid date in YYYY-MM-DD format"
                ))
            })?;
            // an invalid reference field is reported by its own rule
            if let Some(other) = after
                && let Some(reference) = siblings
                    .and_then(|values| values.get(other))
                    .and_then(Value::as_str)
                    .and_then(parse_date)
                && date <= reference
            {
                return Err(Violation::Shape(format!(
                    "\"{name}\" must be after \"{other}\""
                )));
            }
        }
        FieldKind::Uuid => {
            if Uuid::parse_str(text(name, value)?).is_err() {
                return Err(Violation::Format(format!("\"{name}\" must be a valid GUID")));
            }
        }
        FieldKind::TextList {
            min_items,
            lowercase,
        } => {
            let items = value
                .as_array()
                .ok_or_else(|| Violation::Shape(format!("\"{name}\" must be an array")))?;
            if items.len() < min_items {
                return Err(Violation::Shape(format!(
                    "\"{name}\" must contain at least {min_items} items"
                )));
            }
            for (i, item) in items.iter().enumerate() {
                let item = item
                    .as_str()
                    .filter(|s| !s.trim().is_empty())
                    .ok_or_else(|| {
                        Violation::Shape(format!("\"{name}[{i}]\" must be a non-empty string"))
                    })?;
                if lowercase && item != item.to_lowercase() {
                    return Err(Violation::Format(format!(
                        "\"{name}[{i}]\" must only contain lowercase characters"
                    )));
                }
            }
        }
    }

    Ok(())
}

fn text<'v>(name: &str, value: &'v Value) -> Result<&'v str, Violation> {
    value
        .as_str()
        .ok_or_else(|| Violation::Shape(format!("\"{name}\" must be a string")))
}

fn non_blank<'v>(name: &str, value: &'v Value) -> Result<&'v str, Violation> {
    let s = text(name, value)?.trim();
    if s.is_empty() {
        return Err(Violation::Shape(format!(
            "\"{name}\" is not allowed to be empty"
        )));
    }
    Ok(s)
}

fn integer(name: &str, value: &Value, location: Location) -> Result<i64, Violation> {
    let not_a_number = || Violation::Shape(format!("\"{name}\" must be a number"));
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| Violation::Shape(format!("\"{name}\" must be an integer"))),
        // path parameters only ever arrive as text
        Value::String(s) if location != Location::Body => {
            s.trim().parse::<i64>().map_err(|_| not_a_number())
        }
        _ => Err(not_a_number()),
    }
}

fn strong_password(s: &str) -> bool {
    s.chars().count() >= 6
        && s.chars().any(|c| c.is_alphabetic())
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| !c.is_alphanumeric())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}
