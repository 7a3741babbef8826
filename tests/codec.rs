use tocookie::{
    decode, decode_at, encode, refresh, sign_raw, Codec, Config, Secret, TokenError, GENERATED_BY,
};

#[test]
fn alice_round_trip_and_wrong_key() {
    let key = Secret::from("s3cret");
    let token = encode("alice", 2_000_000_000, &key).unwrap();

    let record = decode_at(&token, &key, 1_999_999_999).unwrap();
    assert_eq!(record.identity, "alice");
    assert_eq!(record.expires_at, 2_000_000_000);
    assert_eq!(record.issuer, GENERATED_BY);

    let err = decode_at(&token, &Secret::from("wrong"), 1_999_999_999).unwrap_err();
    assert!(matches!(err, TokenError::BadSignature), "{err:?}");
}

#[test]
fn wall_clock_decode_and_refresh() {
    let key = Secret::from("s3cret");
    let now = chrono::Utc::now().timestamp();
    let token = encode("alice", now + 120, &key).unwrap();

    let record = decode(&token, &key).unwrap();
    let renewed = decode(&refresh(&record, &key).unwrap(), &key).unwrap();
    assert_eq!(renewed.identity, "alice");
    assert!(renewed.expires_at > record.expires_at);
}

#[test]
fn long_expired_token_is_rejected_on_wall_clock() {
    let key = Secret::from("s3cret");
    let token = encode("alice", 1_000, &key).unwrap();
    let err = decode(&token, &key).unwrap_err();
    assert!(matches!(err, TokenError::Expired { expires_at: 1_000, .. }), "{err:?}");
}

#[test]
fn structural_garbage_is_malformed_not_bad_signature() {
    let key = Secret::from("s3cret");
    for input in ["", "nodashes", "abc--", "abc-"] {
        let err = decode_at(input, &key, 0).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)), "{input:?}: {err:?}");
    }
}

#[test]
fn non_ascii_identity_survives() {
    let key = Secret::from("s3cret");
    let token = encode("zoë \"admin\" 用户", 50, &key).unwrap();
    assert!(token.is_ascii());
    assert_eq!(decode_at(&token, &key, 50).unwrap().identity, "zoë \"admin\" 用户");
}

#[test]
fn non_ascii_garbage_before_separator_does_not_panic() {
    let key = Secret::from("s3cret");
    let err = decode_at("é--00", &key, 0).unwrap_err();
    assert!(matches!(err, TokenError::BadSignature), "{err:?}");
}

#[test]
fn raw_messages_sign_but_do_not_decode_as_records() {
    let key = Secret::from("s3cret");
    let token = sign_raw(b"[1,2,3]", &key);
    let err = decode_at(&token, &key, 0).unwrap_err();
    assert!(matches!(err, TokenError::PayloadFormat(_)), "{err:?}");
}

#[test]
fn configured_codec_round_trips() {
    let cfg = Config::from_lookup(|var| match var {
        "TOCOOKIE_SECRET" => Some("from-config".to_string()),
        "TOCOOKIE_TTL" => Some("600".to_string()),
        _ => None,
    })
    .unwrap();
    let codec = cfg.codec();
    let token = codec.mint_at("frank", 1_000).unwrap();
    let record = codec.parse_at(&token, 1_000).unwrap();
    assert_eq!(record.expires_at, 1_600);

    let plain = Codec::new("from-config");
    assert_eq!(plain.parse_at(&token, 1_600).unwrap().identity, "frank");
    assert!(plain.parse_at(&token, 1_601).is_err());
}
