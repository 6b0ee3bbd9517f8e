// Tue Feb 03 2026 - Alex

use rhai::{Dynamic, FnPtr, Map, FLOAT, INT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Script value as seen by the host, tagged by semantic type
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Unit,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Char(char),
    String(String),
    Array(Vec<ScriptValue>),
    Map(BTreeMap<String, ScriptValue>),
    Function(String),
    Other(String),
}

impl ScriptValue {
    /// Semantic type name used by the host contract checks.
    pub fn type_name(&self) -> &str {
        match self {
            ScriptValue::Unit => "unit",
            ScriptValue::Boolean(_) => "bool",
            ScriptValue::Integer(_) => "int",
            ScriptValue::Float(_) => "float",
            ScriptValue::Char(_) => "char",
            ScriptValue::String(_) => "string",
            ScriptValue::Array(_) => "array",
            ScriptValue::Map(_) => "map",
            ScriptValue::Function(_) => "function",
            ScriptValue::Other(name) => name.as_str(),
        }
    }

    pub fn is_invocable(&self) -> bool {
        matches!(self, ScriptValue::Function(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ScriptValue>> {
        match self {
            ScriptValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Dynamic> for ScriptValue {
    fn from(value: Dynamic) -> Self {
        let value = value.flatten();

        if value.is_unit() {
            return ScriptValue::Unit;
        }
        if let Ok(b) = value.as_bool() {
            return ScriptValue::Boolean(b);
        }
        if let Ok(n) = value.as_int() {
            return ScriptValue::Integer(n);
        }
        if let Ok(n) = value.as_float() {
            return ScriptValue::Float(n);
        }
        if let Ok(c) = value.as_char() {
            return ScriptValue::Char(c);
        }

        let type_name = value.type_name().to_string();

        if value.is_string() {
            return match value.into_string() {
                Ok(s) => ScriptValue::String(s),
                Err(_) => ScriptValue::Other(type_name),
            };
        }
        if value.is_array() {
            return match value.into_array() {
                Ok(items) => ScriptValue::Array(items.into_iter().map(ScriptValue::from).collect()),
                Err(_) => ScriptValue::Other(type_name),
            };
        }
        if value.is_map() {
            return match value.try_cast::<Map>() {
                Some(map) => ScriptValue::Map(
                    map.into_iter()
                        .map(|(k, v)| (k.to_string(), ScriptValue::from(v)))
                        .collect(),
                ),
                None => ScriptValue::Other(type_name),
            };
        }
        if value.is::<FnPtr>() {
            return match value.try_cast::<FnPtr>() {
                Some(ptr) => ScriptValue::Function(ptr.fn_name().to_string()),
                None => ScriptValue::Other(type_name),
            };
        }

        ScriptValue::Other(type_name)
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Unit => write!(f, "()"),
            ScriptValue::Boolean(b) => write!(f, "{}", b),
            ScriptValue::Integer(n) => write!(f, "{}", n),
            ScriptValue::Float(n) => write!(f, "{:?}", n),
            ScriptValue::Char(c) => write!(f, "'{}'", c),
            ScriptValue::String(s) => write!(f, "{:?}", s),
            ScriptValue::Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            ScriptValue::Map(m) => {
                write!(f, "#{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            ScriptValue::Function(name) => write!(f, "<function {}>", name),
            ScriptValue::Other(name) => write!(f, "<{}>", name),
        }
    }
}

/// Argument value supplied by the host to the entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostArg {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl HostArg {
    pub fn to_dynamic(&self) -> Dynamic {
        match self {
            HostArg::Bool(b) => Dynamic::from_bool(*b),
            HostArg::Int(n) => Dynamic::from_int(*n as INT),
            HostArg::Float(n) => Dynamic::from_float(*n as FLOAT),
            HostArg::Str(s) => Dynamic::from(s.clone()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            HostArg::Bool(_) => "bool",
            HostArg::Int(_) => "int",
            HostArg::Float(_) => "float",
            HostArg::Str(_) => "string",
        }
    }
}

impl fmt::Display for HostArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostArg::Bool(b) => write!(f, "{}", b),
            HostArg::Int(n) => write!(f, "{}", n),
            HostArg::Float(n) => write!(f, "{:?}", n),
            HostArg::Str(s) => write!(f, "{:?}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_from_dynamic() {
        assert_eq!(ScriptValue::from(Dynamic::from_float(1.5)).type_name(), "float");
        assert_eq!(ScriptValue::from(Dynamic::from_int(7)).type_name(), "int");
        assert_eq!(ScriptValue::from(Dynamic::from("blue".to_string())).type_name(), "string");
        assert_eq!(ScriptValue::from(Dynamic::from_bool(true)).type_name(), "bool");
        assert_eq!(ScriptValue::from(Dynamic::UNIT).type_name(), "unit");
    }

    #[test]
    fn test_string_is_not_numeric() {
        let value = ScriptValue::from(Dynamic::from("1526.0".to_string()));
        assert_eq!(value, ScriptValue::String("1526.0".to_string()));
        assert!(!value.is_invocable());
    }

    #[test]
    fn test_host_args_deserialize_untagged() {
        let args: Vec<HostArg> = serde_json::from_str(r#"[23, 1.5, true, "blue"]"#).unwrap();
        assert_eq!(
            args,
            vec![
                HostArg::Int(23),
                HostArg::Float(1.5),
                HostArg::Bool(true),
                HostArg::Str("blue".to_string()),
            ]
        );
    }

    #[test]
    fn test_host_arg_to_dynamic() {
        assert_eq!(HostArg::Int(1203).to_dynamic().as_int(), Ok(1203));
        assert_eq!(ScriptValue::from(HostArg::Str("blue".into()).to_dynamic()).as_str(), Some("blue"));
    }
}
