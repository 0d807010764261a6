//! Property tests for the token codec.
//!
//! Tokens cross a process boundary (build process to browser), so decoding
//! must recover exactly what was encoded for any code and any JSON map.

use mapview_codec::{decode, encode};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        ".*".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(".*", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: decode(encode(code, map)) == (code, map) for any unicode code
    #[test]
    fn prop_round_trip(code in any::<String>(), map in json_value()) {
        let token = encode(&code, &map).unwrap();
        let decoded = decode(&token).unwrap();

        prop_assert_eq!(decoded.code, code);
        prop_assert_eq!(decoded.map, map);
    }

    /// Property: an absent map always comes back as null
    #[test]
    fn prop_absent_map_round_trips_as_null(code in ".*") {
        let token = encode(&code, &None::<Value>).unwrap();
        prop_assert_eq!(decode(&token).unwrap().map, Value::Null);
    }

    /// Property: the token only uses the standard base64 alphabet
    #[test]
    fn prop_token_alphabet(code in ".*", map in json_value()) {
        let token = encode(&code, &map).unwrap();
        prop_assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='));
    }

    /// Property: dropping bytes from a token never panics, it errors or decodes
    #[test]
    fn prop_truncated_tokens_do_not_panic(code in ".{0,64}", cut in 0usize..64) {
        use base64::Engine;
        use base64::engine::general_purpose::STANDARD;

        let token = encode(&code, &Value::Null).unwrap();
        let raw = STANDARD.decode(&token).unwrap();
        let truncated = STANDARD.encode(&raw[..cut.min(raw.len())]);
        let _ = decode(&truncated);
    }
}
