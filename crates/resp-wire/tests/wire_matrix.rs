use resp_wire::{decode, extract, Object, StreamingDecoder, Version, WireError, WireType};

fn as_utf8(bytes: &[u8]) -> String {
    std::str::from_utf8(bytes)
        .unwrap_or_else(|e| panic!("expected UTF-8 test bytes, got error: {e}"))
        .to_owned()
}

#[test]
fn encoder_wire_matrix() {
    let cases: Vec<(Object, &str)> = vec![
        (Object::simple_string(""), "+\r\n"),
        (Object::simple_string("abc!"), "+abc!\r\n"),
        (Object::simple_error("ERR"), "-ERR\r\n"),
        (Object::Integer(0), ":0\r\n"),
        (Object::Integer(23_423_432_543), ":23423432543\r\n"),
        (Object::Integer(-11_111_111), ":-11111111\r\n"),
        (Object::bulk_string(""), "$0\r\n\r\n"),
        (Object::bulk_string("abc!"), "$4\r\nabc!\r\n"),
        (Object::bulk_error("a\nb"), "!3\r\na\nb\r\n"),
        (Object::verbatim(*b"txt", ""), "=4\r\ntxt:\r\n"),
        (Object::verbatim(*b"txt", "asdf"), "=8\r\ntxt:asdf\r\n"),
        (Object::Null, "_\r\n"),
        (Object::Boolean(true), "#t\r\n"),
        (Object::Boolean(false), "#f\r\n"),
        (Object::Double(1.5), ",1.5\r\n"),
        (Object::Double(f64::NEG_INFINITY), ",-inf\r\n"),
        (Object::big_number("10000000000000000000000").unwrap(), "(10000000000000000000000\r\n"),
        (Object::array(vec![]), "*0\r\n"),
        (
            Object::array(vec![Object::Integer(1), Object::Integer(2)]),
            "*2\r\n:1\r\n:2\r\n",
        ),
        (Object::set(vec![Object::simple_string("a")]), "~1\r\n+a\r\n"),
        (Object::push(vec![Object::simple_string("a")]), ">1\r\n+a\r\n"),
        (
            Object::map(vec![(Object::simple_string("k"), Object::Null)]),
            "%1\r\n+k\r\n_\r\n",
        ),
    ];
    for (object, expected) in cases {
        assert_eq!(as_utf8(&object.to_bytes()), expected, "object {object:?}");
    }
}

#[test]
fn decode_encode_roundtrip_matrix() {
    let wires: Vec<&[u8]> = vec![
        b"+OK\r\n",
        b"-ERR unknown\r\n",
        b":0\r\n",
        b":-9223372036854775808\r\n",
        b"$0\r\n\r\n",
        b"$12\r\nbinary\r\nsafe\r\n",
        b"!10\r\nERR failed\r\n",
        b"=9\r\nmkd:# doc\r\n",
        b"_\r\n",
        b"#f\r\n",
        b",3.25\r\n",
        b",inf\r\n",
        b"(-3492890328409238509324850943850943825024385\r\n",
        b"*0\r\n",
        b"~3\r\n:1\r\n:2\r\n:3\r\n",
        b">2\r\n+pubsub\r\n$7\r\nmessage\r\n",
        b"%2\r\n+a\r\n:1\r\n$1\r\nb\r\n*1\r\n#t\r\n",
        b"*3\r\n*2\r\n*1\r\n*0\r\n:1\r\n:2\r\n:3\r\n",
    ];
    for wire in wires {
        let object = decode(wire, Version::V3).unwrap_or_else(|e| {
            panic!("decode failed for {:?}: {e}", as_utf8(wire));
        });
        assert_eq!(
            object.to_bytes(),
            wire,
            "re-encode mismatch for {:?}",
            as_utf8(wire)
        );
    }
}

#[test]
fn version_gate_matrix() {
    let v3_only: Vec<&[u8]> = vec![
        b"_\r\n",
        b"#t\r\n",
        b",1.5\r\n",
        b"(123\r\n",
        b"!3\r\nERR\r\n",
        b"=8\r\ntxt:asdf\r\n",
        b"%0\r\n",
        b"~0\r\n",
        b">0\r\n",
    ];
    for wire in v3_only {
        let object = decode(wire, Version::V3).expect("valid under v3");
        assert!(
            matches!(
                decode(wire, Version::V2),
                Err(WireError::VersionUnavailable(_, Version::V2))
            ),
            "expected version gate for {:?}",
            as_utf8(wire)
        );
        assert!(object.encode(Version::V2).is_err());
        assert_eq!(object.encode(Version::V3).unwrap(), wire);
    }

    let v2_safe: Vec<&[u8]> = vec![b"+x\r\n", b"-x\r\n", b":1\r\n", b"$1\r\nx\r\n", b"*0\r\n"];
    for wire in v2_safe {
        assert!(decode(wire, Version::V2).is_ok(), "{:?}", as_utf8(wire));
    }
}

#[test]
fn declared_length_equals_consumed_elements() {
    let (object, rest) = extract(b"*2\r\n:1\r\n:2\r\n:3\r\n").unwrap();
    match object {
        Object::Array(items) => assert_eq!(items.len(), 2),
        other => panic!("expected array, got {other:?}"),
    }
    // The third integer was never part of the declared frame.
    assert_eq!(rest, b":3\r\n");

    // A declared count the payload cannot satisfy fails at the exact index.
    let err = extract(b"*3\r\n:1\r\n:2\r\n~bad\r\n").unwrap_err();
    match err {
        WireError::LengthMismatch { index, .. } => assert_eq!(index, 2),
        WireError::Incomplete => panic!("count shortfall must not be silent"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn streaming_decoder_interleaves_with_extract() {
    let mut decoder = StreamingDecoder::new();
    let frame_a = Object::map(vec![(
        Object::bulk_string("key"),
        Object::set(vec![Object::Integer(1), Object::Integer(2)]),
    )]);
    let frame_b = Object::push(vec![Object::simple_string("evt")]);
    let mut wire = frame_a.to_bytes();
    wire.extend_from_slice(&frame_b.to_bytes());

    for chunk in wire.chunks(3) {
        decoder.push(chunk);
        while let Some(object) = decoder.read().unwrap() {
            assert!(object == frame_a || object == frame_b);
        }
    }
    assert_eq!(decoder.pending(), 0);
}

#[test]
fn wire_type_table_drives_dispatch() {
    for wire_type in WireType::ALL {
        assert_eq!(WireType::from_byte(wire_type.byte()), Some(wire_type));
    }
    // Identifier bytes never overlap between the two revisions.
    let v2: Vec<u8> = WireType::ALL.iter().filter(|t| t.is_v2()).map(|t| t.byte()).collect();
    let v3: Vec<u8> = WireType::ALL.iter().filter(|t| t.is_v3()).map(|t| t.byte()).collect();
    for byte in &v2 {
        assert!(!v3.contains(byte));
    }
}
