//! Declarative request schemas.
//!
//! A schema is plain static data; `rules::validate_request` is the only
//! interpreter.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-blank string, length in characters.
    Text { min: usize, max: usize },
    /// Alphabetic person name (spaces, hyphens and apostrophes between letters).
    Name,
    Email,
    /// At least 6 characters with a letter, a digit and a symbol.
    Password,
    Phone,
    Integer { min: i64, max: Option<i64> },
    /// `YYYY-MM-DD`; with `after`, must be later than that (same-location) field.
    Date { after: Option<&'static str> },
    Uuid,
    /// Array of non-blank strings.
    TextList { min_items: usize, lowercase: bool },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub location: Location,
    pub kind: FieldKind,
    pub required: bool,
    /// Replaces the generated message for format violations (pattern, GUID,
    /// lowercase). Missing fields and wrong types keep the generated one.
    pub message: Option<&'static str>,
}

impl FieldRule {
    const fn new(name: &'static str, location: Location, kind: FieldKind) -> Self {
        Self {
            name,
            location,
            kind,
            required: true,
            message: None,
        }
    }

    pub const fn body(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, Location::Body, kind)
    }

    pub const fn path(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, Location::Path, kind)
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [FieldRule]) -> Self {
        Self { name, fields }
    }

    pub fn reads(&self, location: Location) -> bool {
        self.fields.iter().any(|f| f.location == location)
    }

    pub fn reads_body(&self) -> bool {
        self.reads(Location::Body)
    }
}
