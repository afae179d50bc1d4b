//! Decodes a flat tag map into nested, typed structures.
//!
//! Every decodable type declares a static table of [`Field`]s. A field is
//! either fed from a single tag key, squashed (the embedded structure's own
//! table is applied at the same level), or filled (the optional
//! sub-structure is always allocated and decoded against the same tag map,
//! optionally inside a key namespace such as `al:iphone`).
//!
//! Decoding never fails because of missing or malformed data. The only
//! errors are mistakes in the tables themselves.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use super::TagMap;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{path}: field mapping declares an empty source key")]
    EmptyKey { path: String },

    #[error("{path}: {filled} has no field mapping to fill from")]
    UnmappedFill { path: String, filled: &'static str },
}

impl DecodeError {
    /// Prefix the error path with the field that was being decoded.
    fn at(mut self, target: &'static str, field: &'static str) -> Self {
        let path = match &mut self {
            DecodeError::EmptyKey { path } | DecodeError::UnmappedFill { path, .. } => path,
        };
        let here = format!("{target}.{field}");
        *path = if path.is_empty() {
            here
        } else {
            format!("{here} > {path}")
        };
        self
    }
}

/// Applies a nested structure's mapping (squash or fill) to a field of `T`.
pub type Apply<T> = fn(&mut T, &Scope<'_>) -> Result<(), DecodeError>;

pub enum Rule<T: 'static> {
    Key {
        key: &'static str,
        set: fn(&mut T, &str),
    },
    Squash(Apply<T>),
    Fill {
        namespace: Option<&'static str>,
        apply: Apply<T>,
    },
}

pub struct Field<T: 'static> {
    pub name: &'static str,
    pub rule: Rule<T>,
}

impl<T: 'static> Field<T> {
    pub const fn key(name: &'static str, key: &'static str, set: fn(&mut T, &str)) -> Self {
        Field {
            name,
            rule: Rule::Key { key, set },
        }
    }

    pub const fn squash(name: &'static str, apply: Apply<T>) -> Self {
        Field {
            name,
            rule: Rule::Squash(apply),
        }
    }

    pub const fn fill(name: &'static str, apply: Apply<T>) -> Self {
        Field {
            name,
            rule: Rule::Fill {
                namespace: None,
                apply,
            },
        }
    }

    /// Like [`Field::fill`], but the filled structure reads its keys as
    /// `<namespace>:<key>`.
    pub const fn fill_in(name: &'static str, namespace: &'static str, apply: Apply<T>) -> Self {
        Field {
            name,
            rule: Rule::Fill {
                namespace: Some(namespace),
                apply,
            },
        }
    }
}

/// A structure that can be populated from a tag map.
///
/// `FIELDS` is process-wide configuration: it is never built per request.
pub trait Decode: Default + 'static {
    const NAME: &'static str;
    const FIELDS: &'static [Field<Self>];
}

/// The view of the tag map a structure decodes against.
pub struct Scope<'a> {
    tags: &'a TagMap,
    namespace: Option<String>,
}

impl<'a> Scope<'a> {
    pub fn root(tags: &'a TagMap) -> Self {
        Scope {
            tags,
            namespace: None,
        }
    }

    fn nested(&self, namespace: &str) -> Scope<'a> {
        let namespace = match &self.namespace {
            Some(outer) => format!("{outer}:{namespace}"),
            None => namespace.to_string(),
        };
        Scope {
            tags: self.tags,
            namespace: Some(namespace),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        let value = match &self.namespace {
            Some(ns) => self.tags.get(&format!("{ns}:{key}")),
            None => self.tags.get(key),
        };
        value.map(String::as_str)
    }
}

/// Populate `target` from `tags` using the field table of `T`.
pub fn decode<T: Decode>(tags: &TagMap, target: &mut T) -> Result<(), DecodeError> {
    decode_in(&Scope::root(tags), target)
}

/// Populate `target` from an existing scope. Used by squash and fill rules.
pub fn decode_in<T: Decode>(scope: &Scope<'_>, target: &mut T) -> Result<(), DecodeError> {
    for field in T::FIELDS {
        match &field.rule {
            Rule::Key { key, set } => {
                if key.is_empty() {
                    return Err(DecodeError::EmptyKey {
                        path: String::new(),
                    }
                    .at(T::NAME, field.name));
                }
                if let Some(raw) = scope.get(key) {
                    set(target, raw);
                }
            }
            Rule::Squash(apply) => {
                apply(target, scope).map_err(|e| e.at(T::NAME, field.name))?;
            }
            Rule::Fill { .. } => {}
        }
    }

    for field in T::FIELDS {
        if let Rule::Fill { namespace, apply } = &field.rule {
            let result = match namespace {
                Some(ns) => apply(target, &scope.nested(ns)),
                None => apply(target, scope),
            };
            result.map_err(|e| e.at(T::NAME, field.name))?;
        }
    }

    Ok(())
}

/// Allocate `slot` if needed and decode into it, whether or not any of its
/// keys are present.
pub fn fill<S: Decode>(slot: &mut Option<S>, scope: &Scope<'_>) -> Result<(), DecodeError> {
    if S::FIELDS.is_empty() {
        return Err(DecodeError::UnmappedFill {
            path: String::new(),
            filled: S::NAME,
        });
    }
    decode_in(scope, slot.get_or_insert_with(S::default))
}

// ── Value coercion ─────────────────────────────────────────────────────────

/// Weakly-typed conversion from a raw tag value.
///
/// `None` means the value could not be understood and the field keeps
/// whatever it held before.
pub trait FromTag: Sized {
    fn from_tag(raw: &str) -> Option<Self>;
}

impl FromTag for String {
    fn from_tag(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromTag for bool {
    fn from_tag(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
            _ => None,
        }
    }
}

macro_rules! from_tag_parse {
    ($($ty:ty),*) => {
        $(impl FromTag for $ty {
            fn from_tag(raw: &str) -> Option<Self> {
                raw.trim().parse().ok()
            }
        })*
    };
}

from_tag_parse!(u32, i32, i64, f64);

impl FromTag for DateTime<Utc> {
    fn from_tag(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

pub fn assign<V: FromTag>(slot: &mut V, raw: &str) {
    if let Some(value) = V::from_tag(raw) {
        *slot = value;
    }
}

pub fn assign_opt<V: FromTag>(slot: &mut Option<V>, raw: &str) {
    if let Some(value) = V::from_tag(raw) {
        *slot = Some(value);
    }
}
