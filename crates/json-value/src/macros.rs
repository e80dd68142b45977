/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys are string literals. Elements and member values are single
/// token trees: literals, `null`, nested `[...]`/`{...}` or a parenthesized
/// expression such as `(-1)` or `(name.clone())`.
///
/// ```
/// use json_value::json_value;
///
/// let v = json_value!({
///     "name": "Miguel",
///     "age": 40,
///     "offset": (-3),
///     "tags": ["a", "b"],
///     "spouse": null,
///     "extra": {}
/// });
/// assert_eq!(v["age"], 40i64);
/// assert_eq!(v["offset"], -3i64);
/// assert_eq!(v["tags"][1], "b");
/// assert!(v["spouse"].is_null());
/// ```
#[macro_export]
macro_rules! json_value {
    (null) => {
        $crate::Value::Null
    };
    ([]) => {
        $crate::Value::array()
    };
    ({}) => {
        $crate::Value::object()
    };
    ([ $($elem:tt),+ $(,)? ]) => {
        $crate::Value::Array(::std::vec![ $( $crate::json_value!($elem) ),+ ])
    };
    ({ $($key:literal : $value:tt),+ $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert(::std::string::String::from($key), $crate::json_value!($value));
        )+
        $crate::Value::Object(map)
    }};
    (( $e:expr )) => {
        $crate::Value::from($e)
    };
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
