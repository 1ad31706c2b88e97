use crate::convert::context::counters;
use crate::convert::{
    ContextState, ConversionContext, ConversionError, IllegalSequence, buffer_capacity, convert,
    resolve_pair,
};
use pretty_assertions::assert_eq;

/// "/한글" in UTF-8.
const HANGUL_UTF8: &[u8] = "/한글".as_bytes();

/// "/한글" in EUC-KR.
const HANGUL_EUC_KR: &[u8] = &[0x2F, 0xC7, 0xD1, 0xB1, 0xDB];

/// 50 repetitions of ASCII 'a' followed by half-width katakana 'ｱ' in Shift_JIS.
///
/// ISO-2022-JP has to switch character sets around every katakana, so each
/// pair costs 9 output bytes.
fn alternating_shift_jis() -> Vec<u8> {
    std::iter::repeat([b'a', 0xB1]).take(50).flatten().collect()
}

#[test]
fn converts_utf8_hangul_to_euc_kr() {
    // Arrange
    let capacity = buffer_capacity(HANGUL_UTF8.len(), 4, 0).unwrap();

    // Act
    let out = convert("utf-8", "euc-kr", HANGUL_UTF8, capacity).unwrap();

    // Assert
    assert_eq!(out.bytes, HANGUL_EUC_KR);
    assert_eq!(out.written(), 5);
    assert_eq!(out.capacity, 4 * HANGUL_UTF8.len() + 1);
    assert!(out.written() <= out.capacity);
}

#[test]
fn labels_are_case_insensitive() {
    let out = convert("UTF-8", "EUC-KR", HANGUL_UTF8, 64).unwrap();
    assert_eq!(out.bytes, HANGUL_EUC_KR);
}

#[test]
fn ascii_passes_through_unchanged() {
    let out = convert("utf-8", "euc-kr", b"/static/app.js", 64).unwrap();
    assert_eq!(out.bytes, b"/static/app.js");
}

#[test]
fn empty_input_converts_to_empty_output() {
    let out = convert("utf-8", "euc-kr", b"", 1).unwrap();
    assert!(out.bytes.is_empty());
}

#[test]
fn unknown_target_is_unsupported_pair() {
    let err = convert("utf-8", "bogus-9000", HANGUL_UTF8, 64).unwrap_err();

    assert_eq!(
        err,
        ConversionError::UnsupportedEncodingPair {
            from: "utf-8".to_string(),
            to: "bogus-9000".to_string(),
        }
    );
}

#[test]
fn unknown_source_is_unsupported_pair() {
    let err = convert("bogus-9000", "euc-kr", HANGUL_UTF8, 64).unwrap_err();
    assert!(matches!(err, ConversionError::UnsupportedEncodingPair { .. }));
}

#[test]
fn targets_without_an_encoder_are_unsupported() {
    for to in ["utf-16le", "utf-16be", "replacement", "csiso2022kr"] {
        let err = resolve_pair("utf-8", to).unwrap_err();
        assert!(
            matches!(err, ConversionError::UnsupportedEncodingPair { .. }),
            "{to} should be unsupported"
        );
    }
}

#[test]
fn malformed_source_bytes_are_illegal_sequence() {
    // Arrange
    let input = [b'/', 0xFF, b'a'];

    // Act
    let err = convert("utf-8", "euc-kr", &input, 64).unwrap_err();

    // Assert
    assert_eq!(
        err,
        ConversionError::IllegalSequence(IllegalSequence::Malformed { offset: 1, len: 1 })
    );
}

#[test]
fn unmappable_character_is_illegal_sequence() {
    let err = convert("utf-8", "euc-kr", "/😀".as_bytes(), 64).unwrap_err();

    assert_eq!(
        err,
        ConversionError::IllegalSequence(IllegalSequence::Unmappable { ch: '😀' })
    );
}

#[test]
fn exhausted_output_buffer_is_incomplete() {
    // Arrange
    let input = alternating_shift_jis();
    assert_eq!(input.len(), 100);
    let capacity = buffer_capacity(input.len(), 4, 1).unwrap();

    // Act
    let err = convert("shift_jis", "iso-2022-jp", &input, capacity).unwrap_err();

    // Assert
    match err {
        ConversionError::Incomplete {
            capacity: reported,
            written,
        } => {
            assert_eq!(reported, 401);
            assert!(written <= 401);
        }
        other => panic!("expected Incomplete, got {other:?}"),
    }
}

#[test]
fn same_input_fits_a_larger_buffer() {
    let input = alternating_shift_jis();

    let out = convert("shift_jis", "iso-2022-jp", &input, 600).unwrap();

    assert_eq!(out.written(), 450);
    assert!(out.bytes.ends_with(&[0x1B, b'(', b'B']));
}

#[test]
fn buffer_one_byte_short_is_incomplete() {
    let err = convert("utf-8", "euc-kr", HANGUL_UTF8, HANGUL_EUC_KR.len() - 1).unwrap_err();
    assert!(matches!(err, ConversionError::Incomplete { capacity: 4, .. }));
}

#[test]
fn buffer_of_exact_size_is_enough() {
    let out = convert("utf-8", "euc-kr", HANGUL_UTF8, HANGUL_EUC_KR.len()).unwrap();
    assert_eq!(out.bytes, HANGUL_EUC_KR);
}

#[test]
fn context_starts_open() {
    let ctx = ConversionContext::open("utf-8", "euc-kr").unwrap();

    assert_eq!(ctx.state(), ContextState::Open);
    assert_eq!(ctx.source().name(), "UTF-8");
    assert_eq!(ctx.target().name(), "EUC-KR");

    ctx.close();
}

#[test]
fn context_is_released_exactly_once_on_every_exit_path() {
    let malformed = [b'/', 0xFF];
    let katakana = alternating_shift_jis();

    let cases: Vec<(&str, &str, &[u8], usize)> = vec![
        ("utf-8", "euc-kr", HANGUL_UTF8, 64),
        ("utf-8", "euc-kr", &malformed, 64),
        ("utf-8", "euc-kr", "/😀".as_bytes(), 64),
        ("shift_jis", "iso-2022-jp", &katakana, 401),
    ];

    for (from, to, input, capacity) in cases {
        // Arrange
        counters::reset();

        // Act
        let _ = convert(from, to, input, capacity);

        // Assert
        assert_eq!(counters::snapshot(), (1, 1), "{from} -> {to}");
    }
}

#[test]
fn unsupported_pair_never_opens_a_context() {
    counters::reset();

    let _ = convert("utf-8", "bogus-9000", HANGUL_UTF8, 64);

    assert_eq!(counters::snapshot(), (0, 0));
}

#[test]
fn dropping_an_open_context_releases_it() {
    counters::reset();

    {
        let _ctx = ConversionContext::open("utf-8", "euc-kr").unwrap();
    }

    assert_eq!(counters::snapshot(), (1, 1));
}
