/// Builds a [`Document`](crate::Document) from `key => value` pairs.
///
/// Values go through `Into<Value>`, so nested `doc!` calls, vectors and
/// options can be written inline.
///
/// ```
/// use recast_document::{Value, doc};
///
/// let document = doc! { "a" => 1, "b" => doc! { "c" => None::<i32> } };
/// assert_eq!(document.len(), 2);
/// assert_eq!(
///     document.get("b").and_then(Value::as_document).and_then(|d| d.get("c")),
///     Some(&Value::Null),
/// );
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::Document::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut document = $crate::Document::new();
        $(
            document.insert($key, $value);
        )+
        document
    }};
}
