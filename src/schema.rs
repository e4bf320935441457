//! Target-schema description and the lenient variant used while a document
//! is still growing.
//!
//! A schema is a closed, acyclic tree of typed fields. Validation walks the
//! tree and the candidate value together, dispatching on the node's kind
//! tag, and reports the first violation with a `$[key][index]` style path.

use crate::error::SchemaMismatch;
use serde_json::{Map, Number, Value};

/// One named field of an object schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

/// Description of an acyclic tree of typed fields.
///
/// `Lenient` is the coercing-and-defaulting wrapper introduced by
/// [`Schema::relax`]; hand-built strict schemas do not contain it.
#[derive(Clone, Debug, PartialEq)]
pub enum Schema {
    String,
    Number,
    Boolean,
    Array(Box<Schema>),
    Object(Vec<Field>),
    /// The field may be absent entirely.
    Optional(Box<Schema>),
    /// The value may be JSON `null`.
    Nullable(Box<Schema>),
    /// Coerce near-miss representations and substitute a type-appropriate
    /// default when the value is absent or `null`.
    Lenient(Box<Schema>),
}

/// Kind tag for dispatching over schema nodes without matching the whole
/// enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Optional,
    Nullable,
    Lenient,
}

enum PathElem {
    Index(usize),
    Key(String),
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for elem in path {
        match elem {
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
            PathElem::Key(k) => {
                s.push('[');
                s.push_str(k);
                s.push(']');
            }
        }
    }
    s
}

fn mismatch(path: &[PathElem], expected: &'static str, found: &Value) -> SchemaMismatch {
    SchemaMismatch {
        path: format_path(path),
        expected,
        found: found.clone(),
    }
}

/// What an object validator does about a missing field.
enum AbsentPolicy {
    Substitute(Value),
    Omit,
    Required,
}

impl Schema {
    /// Object schema from `(name, schema)` pairs.
    pub fn object<N, I>(fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Schema)>,
    {
        Schema::Object(
            fields
                .into_iter()
                .map(|(name, schema)| Field {
                    name: name.into(),
                    schema,
                })
                .collect(),
        )
    }

    pub fn array(element: Schema) -> Self {
        Schema::Array(Box::new(element))
    }

    pub fn optional(self) -> Self {
        Schema::Optional(Box::new(self))
    }

    pub fn nullable(self) -> Self {
        Schema::Nullable(Box::new(self))
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::String => SchemaKind::String,
            Schema::Number => SchemaKind::Number,
            Schema::Boolean => SchemaKind::Boolean,
            Schema::Array(_) => SchemaKind::Array,
            Schema::Object(_) => SchemaKind::Object,
            Schema::Optional(_) => SchemaKind::Optional,
            Schema::Nullable(_) => SchemaKind::Nullable,
            Schema::Lenient(_) => SchemaKind::Lenient,
        }
    }

    /// Field list when this node is an object schema.
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Schema::Object(fields) => Some(fields),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Schema::String => "string",
            Schema::Number => "number",
            Schema::Boolean => "boolean",
            Schema::Array(_) => "array",
            Schema::Object(_) => "object",
            Schema::Optional(inner) | Schema::Nullable(inner) | Schema::Lenient(inner) => {
                inner.type_name()
            }
        }
    }

    /// Derive the lenient variant used while a document is still growing:
    /// every leaf coerces near-miss representations and substitutes a
    /// type-appropriate default when its value is missing. Optional and
    /// nullable wrappers both come back as optional around the relaxed
    /// inner schema. Relaxing an already-relaxed node is a no-op.
    pub fn relax(&self) -> Schema {
        match self {
            Schema::String | Schema::Number | Schema::Boolean => {
                Schema::Lenient(Box::new(self.clone()))
            }
            Schema::Array(element) => {
                Schema::Lenient(Box::new(Schema::Array(Box::new(element.relax()))))
            }
            Schema::Object(fields) => Schema::Lenient(Box::new(Schema::Object(
                fields
                    .iter()
                    .map(|f| Field {
                        name: f.name.clone(),
                        schema: f.schema.relax(),
                    })
                    .collect(),
            ))),
            Schema::Optional(inner) | Schema::Nullable(inner) => {
                Schema::Optional(Box::new(inner.relax()))
            }
            Schema::Lenient(_) => self.clone(),
        }
    }

    /// The value substituted for an absent lenient node.
    fn default_value(&self) -> Value {
        match self {
            Schema::String => Value::String(String::new()),
            Schema::Number => Value::from(0),
            Schema::Boolean => Value::Bool(true),
            Schema::Array(_) => Value::Array(Vec::new()),
            Schema::Object(fields) => {
                let mut map = Map::new();
                for f in fields {
                    match f.schema.absent_policy() {
                        AbsentPolicy::Omit => {}
                        AbsentPolicy::Substitute(v) => {
                            map.insert(f.name.clone(), v);
                        }
                        AbsentPolicy::Required => {
                            map.insert(f.name.clone(), f.schema.default_value());
                        }
                    }
                }
                Value::Object(map)
            }
            Schema::Optional(_) | Schema::Nullable(_) => Value::Null,
            Schema::Lenient(inner) => inner.default_value(),
        }
    }

    fn absent_policy(&self) -> AbsentPolicy {
        match self {
            Schema::Optional(_) => AbsentPolicy::Omit,
            Schema::Lenient(inner) => AbsentPolicy::Substitute(inner.default_value()),
            _ => AbsentPolicy::Required,
        }
    }

    /// Check `value` against this schema, returning the coerced copy on
    /// success or the first violation with its field path.
    ///
    /// Strict nodes accept exact JSON types only and require every
    /// non-optional object field. `Lenient` nodes coerce near-misses and
    /// substitute defaults for absent values, but a present value that
    /// cannot be coerced is still a mismatch; coercion failure is never
    /// silently defaulted. Unknown object keys are dropped from the output.
    pub fn validate(&self, value: &Value) -> Result<Value, SchemaMismatch> {
        let mut path = Vec::new();
        self.check(value, &mut path)
    }

    fn check(&self, value: &Value, path: &mut Vec<PathElem>) -> Result<Value, SchemaMismatch> {
        match self {
            Schema::String => match value {
                Value::String(_) => Ok(value.clone()),
                _ => Err(mismatch(path, "string", value)),
            },
            Schema::Number => match value {
                Value::Number(_) => Ok(value.clone()),
                _ => Err(mismatch(path, "number", value)),
            },
            Schema::Boolean => match value {
                Value::Bool(_) => Ok(value.clone()),
                _ => Err(mismatch(path, "boolean", value)),
            },
            Schema::Array(element) => match value {
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (idx, item) in items.iter().enumerate() {
                        path.push(PathElem::Index(idx));
                        let checked = element.check(item, path)?;
                        path.pop();
                        out.push(checked);
                    }
                    Ok(Value::Array(out))
                }
                _ => Err(mismatch(path, "array", value)),
            },
            Schema::Object(fields) => match value {
                Value::Object(map) => {
                    let mut out = Map::new();
                    for f in fields {
                        match map.get(&f.name) {
                            Some(v) => {
                                path.push(PathElem::Key(f.name.clone()));
                                let checked = f.schema.check(v, path)?;
                                path.pop();
                                out.insert(f.name.clone(), checked);
                            }
                            None => match f.schema.absent_policy() {
                                AbsentPolicy::Omit => {}
                                AbsentPolicy::Substitute(default) => {
                                    out.insert(f.name.clone(), default);
                                }
                                AbsentPolicy::Required => {
                                    path.push(PathElem::Key(f.name.clone()));
                                    let err = SchemaMismatch {
                                        path: format_path(path),
                                        expected: f.schema.type_name(),
                                        found: Value::Null,
                                    };
                                    path.pop();
                                    return Err(err);
                                }
                            },
                        }
                    }
                    Ok(Value::Object(out))
                }
                _ => Err(mismatch(path, "object", value)),
            },
            // absence is handled by the enclosing object
            Schema::Optional(inner) => inner.check(value, path),
            Schema::Nullable(inner) => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    inner.check(value, path)
                }
            }
            Schema::Lenient(inner) => {
                if value.is_null() {
                    // null at a lenient node is treated like an absent value
                    return Ok(inner.default_value());
                }
                match inner.as_ref() {
                    Schema::String => match value {
                        Value::String(_) => Ok(value.clone()),
                        Value::Number(n) => Ok(Value::String(n.to_string())),
                        Value::Bool(b) => Ok(Value::String(b.to_string())),
                        _ => Err(mismatch(path, "string", value)),
                    },
                    Schema::Number => match value {
                        Value::Number(_) => Ok(value.clone()),
                        Value::String(s) => {
                            coerce_number(s).ok_or_else(|| mismatch(path, "number", value))
                        }
                        Value::Bool(b) => Ok(Value::from(if *b { 1 } else { 0 })),
                        _ => Err(mismatch(path, "number", value)),
                    },
                    Schema::Boolean => match value {
                        Value::Bool(_) => Ok(value.clone()),
                        Value::String(s) => {
                            if s.eq_ignore_ascii_case("true") {
                                Ok(Value::Bool(true))
                            } else if s.eq_ignore_ascii_case("false") {
                                Ok(Value::Bool(false))
                            } else {
                                Err(mismatch(path, "boolean", value))
                            }
                        }
                        Value::Number(n) => {
                            Ok(Value::Bool(n.as_f64().map(|f| f != 0.0).unwrap_or(true)))
                        }
                        _ => Err(mismatch(path, "boolean", value)),
                    },
                    // containers and wrappers coerce nothing; delegate
                    other => other.check(value, path),
                }
            }
        }
    }
}

/// Parse a whole trimmed string as a JSON number, preferring integer
/// representations.
fn coerce_number(s: &str) -> Option<Value> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(i) = t.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(u) = t.parse::<u64>() {
        return Some(Value::from(u));
    }
    t.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
        .map(Value::Number)
}
