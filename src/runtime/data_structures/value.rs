use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::{self, Display, Formatter};

/// Core value enumeration used by the interpreter.  This enumeration is used to represent all data
/// types that the interpreter and the scripts it runs can understand and manipulate.
///
/// Values are immutable once constructed and never hold other values, so they can be freely
/// cloned around the data stack.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean value.
    Boolean(bool),

    /// We have an integer value.  Represented as an i64.
    Integer(i64),

    /// A floating-point value.  Represented as a f64.
    Float(f64),

    /// A text value, represented by a Rust string.
    Text(String),

    /// A block of code kept as the raw source text between the brackets.  It is tokenized again
    /// every time it is executed.
    Quotation(String),

    /// An absolute point in time.
    Timestamp(DateTime<Utc>),
}

/// Convert an arbitrary data type to a Value.
pub trait ToValue {
    /// Implement to handle the actual conversion.
    fn to_value(&self) -> Value;
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

/// Pretty print the value for debugging and listings.  Quotations keep their brackets so they
/// read back as source.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Text(value) => write!(f, "{}", value),
            Value::Quotation(value) => write!(f, "[{}]", value),
            Value::Timestamp(value) => {
                write!(f, "{}", value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

impl Value {
    /// The name of the value's variant as seen by scripts.  Used in type error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Quotation(_) => "quotation",
            Value::Timestamp(_) => "timestamp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn displays_values_as_script_source() {
        assert_eq!(true.to_value().to_string(), "true");
        assert_eq!((-7i64).to_value().to_string(), "-7");
        assert_eq!("hi".to_value().to_string(), "hi");
        assert_eq!(Value::Quotation("1 add".into()).to_string(), "[1 add]");

        let moment = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(moment.to_value().to_string(), "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn names_each_variant() {
        assert_eq!(1.5f64.to_value().type_name(), "float");
        assert_eq!(Value::Quotation(String::new()).type_name(), "quotation");
        assert_eq!(Value::Timestamp(Utc::now()).type_name(), "timestamp");
    }
}
