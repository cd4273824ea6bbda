//! SQL values and parameter handling.
//!
//! Row payloads are carried as [`SqlValue`]s and bound as parameters;
//! the inline rendering exists only for diagnostic log output.

/// A SQL value that can be bound as a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// This is a diagnostic aid for log output; executed statements
    /// always bind parameters instead.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => {
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a [`SqlValue`].
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(value) => value.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for serde_json::Value {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Self::Null => SqlValue::Null,
            Self::Bool(b) => SqlValue::Bool(b),
            Self::Number(n) => n.as_i64().map_or_else(
                || SqlValue::Float(n.as_f64().unwrap_or(0.0)),
                SqlValue::Int,
            ),
            Self::String(s) => SqlValue::Text(s),
            // Nested structures are stored as their JSON text.
            other => SqlValue::Text(other.to_string()),
        }
    }
}

/// Substitutes `?` placeholders with inline-rendered values.
///
/// Strictly a diagnostic aid for human inspection of logged statements;
/// the output is never executed.
#[must_use]
pub fn interpolate(sql: &str, params: &[SqlValue]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut values = params.iter();
    for ch in sql.chars() {
        if ch == '?' {
            match values.next() {
                Some(value) => out.push_str(&value.to_sql_inline()),
                None => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_rendering() {
        assert_eq!(SqlValue::Null.to_sql_inline(), "NULL");
        assert_eq!(SqlValue::Int(42).to_sql_inline(), "42");
        assert_eq!(
            SqlValue::Text("o'clock".to_string()).to_sql_inline(),
            "'o''clock'"
        );
        assert_eq!(SqlValue::Blob(vec![0xAB, 0x01]).to_sql_inline(), "X'AB01'");
    }

    #[test]
    fn json_conversion() {
        assert_eq!(serde_json::json!(5).to_sql_value(), SqlValue::Int(5));
        assert_eq!(serde_json::json!(1.5).to_sql_value(), SqlValue::Float(1.5));
        assert_eq!(
            serde_json::json!("hi").to_sql_value(),
            SqlValue::Text("hi".to_string())
        );
        assert_eq!(serde_json::Value::Null.to_sql_value(), SqlValue::Null);
        assert_eq!(
            serde_json::json!([1, 2]).to_sql_value(),
            SqlValue::Text("[1,2]".to_string())
        );
    }

    #[test]
    fn interpolation_is_positional() {
        let sql = interpolate(
            "INSERT INTO t (a, b) VALUES (?, ?)",
            &[SqlValue::Int(1), SqlValue::Text("x".to_string())],
        );
        assert_eq!(sql, "INSERT INTO t (a, b) VALUES (1, 'x')");
    }

    #[test]
    fn interpolation_leaves_extra_placeholders() {
        assert_eq!(interpolate("? ?", &[SqlValue::Int(1)]), "1 ?");
    }
}
