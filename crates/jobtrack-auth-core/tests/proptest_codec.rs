//! Property tests for the token codec

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use jobtrack_auth_core::{SigningKey, TokenCodec, TokenError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Claims {
    subject: String,
    exp: String,
}

fn codec() -> TokenCodec {
    TokenCodec::new(&SigningKey::new("0123456789abcdef0123456789abcdef").unwrap())
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

prop_compose! {
    fn arb_claims()(
        subject in "[A-Za-z0-9_-]{1,64}",
        // 2000-01-01 .. 2100-01-01
        secs in 946_684_800i64..4_102_444_800i64,
    ) -> Claims {
        Claims {
            subject,
            exp: format_ts(Utc.timestamp_opt(secs, 0).unwrap()),
        }
    }
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(claims in arb_claims()) {
        let codec = codec();
        let token = codec.encode(&claims).unwrap();
        let decoded: Claims = codec.decode(&token).unwrap();
        prop_assert_eq!(decoded, claims);
    }

    #[test]
    fn prop_decode_never_panics(input in ".{0,256}") {
        let codec = codec();
        // Any outcome but a panic is acceptable for arbitrary input
        let _: Result<Claims, _> = codec.decode(&input);
    }

    #[test]
    fn prop_tampered_signature_never_verifies(
        claims in arb_claims(),
        // HS256 signatures are 43 base64url chars; skip the final one,
        // whose low bits are padding and may decode identically
        position in 0usize..42,
        replacement in prop::sample::select(&b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_"[..]),
    ) {
        let codec = codec();
        let token = codec.encode(&claims).unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig_bytes = sig.as_bytes().to_vec();
        prop_assume!(sig_bytes[position] != replacement);
        sig_bytes[position] = replacement;
        let tampered = format!("{head}.{}", String::from_utf8(sig_bytes).unwrap());

        let result: Result<Claims, _> = codec.decode(&tampered);
        prop_assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn prop_tampered_claims_never_verify(
        claims in arb_claims(),
        extra in "[A-Za-z0-9]{1,8}",
    ) {
        use base64::Engine;
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let codec = codec();
        let token = codec.encode(&claims).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        prop_assert_eq!(parts.len(), 3);

        let mut edited = claims.clone();
        edited.subject.push_str(&extra);
        let payload = engine.encode(serde_json::to_vec(&edited).unwrap());
        parts[1] = &payload;
        let forged = parts.join(".");

        let result: Result<Claims, _> = codec.decode(&forged);
        prop_assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }
}
