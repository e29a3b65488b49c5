//! Kani proof harnesses for the decoder, the authority parser and the
//! query extractor.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::authority::parse_authority;
use crate::error::ParseErrorKind;
use crate::percent;
use crate::query::QueryParams;

/// Characters that exercise every branch of the authority and query grammars
const GRAMMAR_CHARS: &[u8] = b"a0%Ff@:[]=&/";

/// Generate a short ASCII string over `GRAMMAR_CHARS`
fn arbitrary_grammar_string(max_len: usize) -> String {
    let len: usize = kani::any();
    let len = len % (max_len + 1);

    (0..len)
        .map(|_| {
            let idx: usize = kani::any();
            GRAMMAR_CHARS[idx % GRAMMAR_CHARS.len()] as char
        })
        .collect()
}

/// Proof: decoding never panics and never grows the input
#[kani::proof]
#[kani::unwind(8)]
fn proof_decode_never_grows() {
    let s = arbitrary_grammar_string(6);
    if let Ok(decoded) = percent::decode(&s) {
        assert!(decoded.len() <= s.len());
    }
}

/// Proof: input without '%' always decodes to itself
#[kani::proof]
#[kani::unwind(8)]
fn proof_decode_identity_without_escapes() {
    let s = arbitrary_grammar_string(6);
    kani::assume(!s.contains('%'));
    let decoded = percent::decode(&s).expect("no escapes to reject");
    assert_eq!(&*decoded, s.as_bytes());
}

/// Proof: every u16 written as decimal is accepted as the same port
#[kani::proof]
#[kani::unwind(8)]
fn proof_port_roundtrip() {
    let port: u16 = kani::any();
    let authority = format!("h:{port}");
    let parsed = parse_authority(&authority).expect("in-range port");
    assert_eq!(parsed.port, port);
}

/// Proof: the authority parser either succeeds or returns one of its own error kinds
#[kani::proof]
#[kani::unwind(8)]
fn proof_authority_total() {
    let s = arbitrary_grammar_string(6);
    match parse_authority(&s) {
        Ok(_)
        | Err(
            ParseErrorKind::InvalidAuthority { .. }
            | ParseErrorKind::InvalidPort { .. }
            | ParseErrorKind::MalformedEscape(_),
        ) => {}
        Err(ParseErrorKind::InvalidUri { .. }) => unreachable!(),
    }
}

/// Proof: extracted parameters never have an empty name or contain '='
#[kani::proof]
#[kani::unwind(8)]
fn proof_query_params_well_formed() {
    let s = arbitrary_grammar_string(6);
    let params = QueryParams::parse(&s);
    for (name, value) in params.iter() {
        assert!(!name.is_empty());
        assert!(!name.contains('=') && !value.contains('='));
        assert!(!name.contains('&') && !value.contains('&'));
    }
}
