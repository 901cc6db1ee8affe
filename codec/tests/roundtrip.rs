use dcbor_codec::{from_bytes, to_bytes, DecodeError, EncodeError};
use dcbor_core::Value;

#[test]
fn cid_round_trips_through_hex_fixture() {
    // A v1/dag-cbor/sha2-256 CID carrying the 32-byte hash from the concrete
    // end-to-end scenario: the tag-42 byte string is `00` (identity
    // multibase) + `01 71 12 20` (CIDv1, codec 0x71, sha2-256, 32 bytes) +
    // the hash itself, wrapped in a one-entry map under key "foo".
    let input = concat!(
        "a163666f6f",
        "d82a",
        "5825",
        "0001711220",
        "7a2fd48e9cb13567f2a81d4ce69023b75e7189a30fc4d2568be9174268af931c",
    );
    let input = hex::decode(input).unwrap();

    let value = from_bytes(&input).unwrap();
    let bytes = to_bytes(&value).unwrap();
    assert_eq!(input, bytes);

    match value {
        Value::Map(entries) => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].0, "foo");
            assert!(matches!(entries[0].1, Value::Cid(_)));
        }
        other => panic!("expected a map, got {other:?}"),
    }
}

#[test]
fn non_identity_multibase_prefix_is_rejected() {
    let input = concat!(
        "a163666f6f",
        "d82a",
        "5825",
        "0101711220",
        "7a2fd48e9cb13567f2a81d4ce69023b75e7189a30fc4d2568be9174268af931c",
    );
    let input = hex::decode(input).unwrap();
    assert!(matches!(from_bytes(&input), Err(DecodeError::InvalidCidFormat(_))));
}

#[test]
fn map_sorts_by_length_then_bytes() {
    let value = Value::Map(vec![
        ("bb".into(), Value::Int(2)),
        ("a".into(), Value::Int(1)),
        ("ccc".into(), Value::Int(3)),
    ]);
    let decoded = from_bytes(&to_bytes(&value).unwrap()).unwrap();
    match decoded {
        Value::Map(entries) => {
            let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
            assert_eq!(keys, ["a", "bb", "ccc"]);
        }
        _ => panic!("expected a map"),
    }
}

#[test]
fn case_sensitive_byte_order() {
    let value = Value::Map(vec![
        ("Z".into(), Value::Int(1)),
        ("a".into(), Value::Int(2)),
        ("A".into(), Value::Int(3)),
    ]);
    let decoded = from_bytes(&to_bytes(&value).unwrap()).unwrap();
    match decoded {
        Value::Map(entries) => {
            let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
            assert_eq!(keys, ["A", "Z", "a"]);
        }
        _ => panic!("expected a map"),
    }
}

#[test]
fn duplicate_keys_fail_on_encode() {
    let value = Value::Map(vec![("key".into(), Value::Int(1)), ("key".into(), Value::Int(2))]);
    assert!(matches!(to_bytes(&value), Err(EncodeError::InvalidMapKey(_))));
}

#[test]
fn tag_discrimination() {
    // tag 0 around an empty byte string
    assert!(matches!(from_bytes(&hex::decode("c040").unwrap()), Err(DecodeError::InvalidTag(0))));
    // tag 41 around an empty byte string
    assert!(matches!(
        from_bytes(&hex::decode("d82940").unwrap()),
        Err(DecodeError::InvalidTag(41))
    ));
    // tag 43 around an empty byte string
    assert!(matches!(
        from_bytes(&hex::decode("d82b40").unwrap()),
        Err(DecodeError::InvalidTag(43))
    ));
}

#[test]
fn non_text_map_keys_rejected_on_decode() {
    // a1 01 f5 -> map{1: true}
    assert!(matches!(
        from_bytes(&hex::decode("a101f5").unwrap()),
        Err(DecodeError::InvalidMapKey(_))
    ));
}

#[test]
fn decode_fuzz_inputs_fail_without_panicking() {
    assert!(from_bytes(&[]).is_err());
    assert!(from_bytes(&[0xFF, 0xFF, 0xFF]).is_err());
    assert!(from_bytes(&[0x1F]).is_err());
}

#[test]
fn indefinite_length_map_is_rejected_not_hung() {
    let input = hex::decode("bf63466f6ef563416d7421ff").unwrap();
    assert!(from_bytes(&input).is_err());
}

#[test]
fn integer_extremes_round_trip() {
    for n in [0i128, 1, 23, 24, (1i128 << 63) - 1, u64::MAX as i128, -1, -(1i128 << 63), -(u64::MAX as i128) - 1]
    {
        let bytes = to_bytes(&Value::Int(n)).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), Value::Int(n));
    }
}

#[test]
fn out_of_range_integers_are_rejected() {
    assert!(to_bytes(&Value::Int(u64::MAX as i128 + 1)).is_err());
    assert!(to_bytes(&Value::Int(-(u64::MAX as i128) - 2)).is_err());
}

#[test]
fn non_finite_floats_are_rejected_both_directions() {
    assert!(to_bytes(&Value::Float(f64::NAN)).is_err());
    assert!(to_bytes(&Value::Float(f64::INFINITY)).is_err());
    assert!(to_bytes(&Value::Float(f64::NEG_INFINITY)).is_err());

    // major type 7, info 27 (64-bit float), NaN payload.
    let nan_bytes = hex::decode("fb7ff8000000000000").unwrap();
    assert!(from_bytes(&nan_bytes).is_err());
}

#[test]
fn empty_containers_round_trip() {
    for value in [
        Value::Bytes(vec![]),
        Value::Text(String::new()),
        Value::Array(vec![]),
        Value::Map(vec![]),
    ] {
        let bytes = to_bytes(&value).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), value);
    }
}
