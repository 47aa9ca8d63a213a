/// Builds an ordered [`Attributes`](crate::Attributes) set. Declaration order
/// becomes column order in every generated statement.
///
/// # Example
///
/// ```
/// use coligo::{fields, Value};
///
/// let attributes = fields!(
///     id = Value::Null,
///     name = "joe",
///     email = "24nomeniavo@gmail.com",
///     age = 19,
/// );
/// assert_eq!(attributes.first_key(), Some("id"));
/// ```
#[macro_export]
macro_rules! fields {
    ($($field:ident = $value:expr),* $(,)?) => {
        {
            #[allow(unused_mut)]
            let mut fields = $crate::Row::new();
            $(
                fields.insert(stringify!($field).to_string(), $crate::Value::from($value));
            )*
            $crate::Attributes::new(fields)
        }
    };
}

/// Binds `$params` in order; an unsigned integer past `i64::MAX` returns
/// `Error::Bind` from the enclosing function.
macro_rules! binds {
    ($params:expr, $stream:expr) => {{
        for (index, value) in $params.iter().enumerate() {
            $stream = match value {
                $crate::Value::Null => $stream.bind(Option::<String>::None),
                $crate::Value::Bool(b) => $stream.bind(i32::from(*b)),
                $crate::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                    (Some(i), _) => $stream.bind(i),
                    (None, Some(u)) => {
                        return Err($crate::Error::Bind {
                            index,
                            message: format!("{u} does not fit a signed 64-bit integer"),
                        })
                    }
                    (None, None) => $stream.bind(n.as_f64().unwrap_or_default()),
                },
                $crate::Value::String(s) => $stream.bind(s.clone()),
                other => $stream.bind(other.to_string()),
            };
        }
    }};
}
