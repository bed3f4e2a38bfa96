use std::fmt;

use sea_orm::Value;

/// Optional filter appended to `select count(*) from <table>`.
///
/// The text is interpolated as-is, so it should start with `where`. Only the
/// bind values of `Parameterized` are passed to the database separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Condition {
    /// Count every row
    #[default]
    None,
    /// Literal condition, e.g. `where username = 'foouser'`
    Raw(String),
    /// Condition with positional `?` placeholders and their values in order
    Parameterized { template: String, binds: Vec<Value> },
}

impl Condition {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    pub fn parameterized<I, V>(template: impl Into<String>, binds: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Parameterized {
            template: template.into(),
            binds: binds.into_iter().map(Into::into).collect(),
        }
    }

    /// Text appended after the table name
    pub fn sql(&self) -> &str {
        match self {
            Self::None => "",
            Self::Raw(text) => text,
            Self::Parameterized { template, .. } => template,
        }
    }

    pub fn binds(&self) -> &[Value] {
        match self {
            Self::Parameterized { binds, .. } => binds,
            Self::None | Self::Raw(_) => &[],
        }
    }
}

impl From<&str> for Condition {
    fn from(text: &str) -> Self {
        Self::raw(text)
    }
}

impl From<String> for Condition {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl<C: Into<Condition>> From<Option<C>> for Condition {
    fn from(condition: Option<C>) -> Self {
        condition.map_or(Self::None, Into::into)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("no condition"),
            Self::Raw(text) => f.write_str(text),
            Self::Parameterized { template, binds } => {
                write!(f, "{template} [")?;
                for (i, bind) in binds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_bind(f, bind)?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_bind(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Bool(Some(v)) => write!(f, "{v}"),
        Value::TinyInt(Some(v)) => write!(f, "{v}"),
        Value::SmallInt(Some(v)) => write!(f, "{v}"),
        Value::Int(Some(v)) => write!(f, "{v}"),
        Value::BigInt(Some(v)) => write!(f, "{v}"),
        Value::TinyUnsigned(Some(v)) => write!(f, "{v}"),
        Value::SmallUnsigned(Some(v)) => write!(f, "{v}"),
        Value::Unsigned(Some(v)) => write!(f, "{v}"),
        Value::BigUnsigned(Some(v)) => write!(f, "{v}"),
        Value::Float(Some(v)) => write!(f, "{v}"),
        Value::Double(Some(v)) => write!(f, "{v}"),
        Value::Char(Some(v)) => write!(f, "'{v}'"),
        Value::String(Some(v)) => write!(f, "'{v}'"),
        other => write!(f, "{other:?}"),
    }
}
