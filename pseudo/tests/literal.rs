use indexmap::IndexMap;
use lang::value::{Literal, Value};
use pseudo::grammer::literal;
use pseudo::parse_value;

fn num(n: f64) -> Literal {
    Literal::Number(n)
}

fn text(s: &str) -> Literal {
    Literal::Text(s.to_string())
}

fn assert(code: &str, expect: Value) {
    let value = parse_value(code);
    println!("{:>24} => {:?}", code, value);
    assert_eq!(value, expect);
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert($code, $expect);
        }
    };
}

macro_rules! object {
    ($($key:expr => $item:expr),* $(,)?) => {{
        let mut fields = IndexMap::new();
        $(fields.insert($key.to_string(), $item);)*
        Value::Object(fields)
    }};
}

case!(reference_name, "&buf", Value::Reference { target: format!("buf") });
case!(reference_cell, " &C3 ", Value::Reference { target: format!("C3") });
case!(reference_empty, "&", Value::Raw(format!("&")));
case!(reference_spaced, "&two words", Value::Raw(format!("&two words")));
case!(hex_0, "0x1F", Value::Hex(31));
case!(hex_bad, "0xZZ", Value::Raw(format!("0xZZ")));
case!(hex_overflow, "0x1FFFFFFFFFFFFFFFF", Value::Raw(format!("0x1FFFFFFFFFFFFFFFF")));
case!(int_0, "42", Value::Int(42));
case!(int_overflow, "18446744073709551616", Value::Raw(format!("18446744073709551616")));
case!(str_0, "hello world", Value::Str(format!("hello world")));
case!(str_negative, "-5", Value::Str(format!("-5")));

case!(object_empty, "{}", object! {});
case!(
    object_0,
    "{ port: 8080, host: local host }",
    object! { "port" => num(8080.0), "host" => text("local host") }
);
case!(
    object_array,
    "{ids: [1, 2, x], name: \"a, b\"}",
    object! { "ids" => Literal::Array(vec![num(1.0), num(2.0), text("x")]), "name" => text("a, b") }
);
case!(
    object_nested_array,
    "{grid: [[1, 2], [3]],}",
    object! {
        "grid" => Literal::Array(vec![
            Literal::Array(vec![num(1.0), num(2.0)]),
            Literal::Array(vec![num(3.0)]),
        ]),
    }
);
case!(
    object_quoted_key,
    "{\"two words\": -1.5e2}",
    object! { "two words" => num(-150.0) }
);
case!(object_nested, "{a: {b: 1}}", Value::Raw(format!("{{a: {{b: 1}}}}")));
case!(object_unclosed, "{a: 1", Value::Raw(format!("{{a: 1")));
case!(object_trailing, "{a: 1} extra", Value::Raw(format!("{{a: 1}} extra")));
case!(object_missing_colon, "{a 1}", Value::Raw(format!("{{a 1}}")));

case!(array_empty, "[]", Value::Array(vec![]));
case!(array_0, "[1, 2.5, three]", Value::Array(vec![num(1.0), num(2.5), text("three")]));
case!(array_trailing_comma, "[1, 2,]", Value::Array(vec![num(1.0), num(2.0)]));
case!(array_unterminated_text, "[\"abc]", Value::Raw(format!("[\"abc]")));
case!(array_double_comma, "[1,,2]", Value::Raw(format!("[1,,2]")));

#[test]
fn literal_errors() {
    use pseudo::LiteralError;
    assert_eq!(literal::array("["), Err(LiteralError::UnexpectedEOF));
    assert!(matches!(
        literal::object("{a: {}}"),
        Err(LiteralError::NestedObject(_))
    ));
    assert!(matches!(
        literal::array("[1] 2"),
        Err(LiteralError::TrailingInput(_))
    ));
}

#[test]
fn display_reads_back() {
    for code in [
        "{port: 8080, host: local host, ids: [1, \"7\"]}",
        "[1, [2, 3], \"a:b\"]",
        "0xFF",
        "&C0",
    ] {
        let value = parse_value(code);
        assert_eq!(value.to_string(), code);
        assert_eq!(parse_value(&value.to_string()), value);
    }
}
