use integration_tests::harness::{EUC_KR_HANGUL, SHIFT_JIS_NIHON, TestGateway};
use pretty_assertions::assert_eq;
use urlconv_core::device::HookOutcome;
use urlconv_core::gateway::ServeOutcome;

#[test]
fn server_scope_does_not_convert() {
    let gw = TestGateway::start("locations");

    let resp = gw.get("/%ED%95%9C%EA%B8%80.txt").unwrap();

    assert_eq!(resp.scope, "server");
    assert!(!resp.uri_replaced);
    assert_eq!(resp.outcome, ServeOutcome::NotFound);
}

#[cfg(target_os = "linux")]
#[test]
fn included_location_converts_to_euc_kr() {
    let gw = TestGateway::start("locations");

    let resp = gw.get("/legacy/%ED%95%9C%EA%B8%80.txt").unwrap();

    let name = [b"legacy/".as_slice(), &EUC_KR_HANGUL, b".txt"].concat();
    assert_eq!(resp.scope, "/legacy");
    assert_eq!(resp.trace.late, Some(HookOutcome::Handled));
    assert_eq!(resp.outcome, ServeOutcome::Served(gw.www_path(&name)));
}

#[cfg(target_os = "linux")]
#[test]
fn each_location_uses_its_own_target_encoding() {
    let gw = TestGateway::start("locations");

    let resp = gw.get("/jp/%E6%97%A5%E6%9C%AC.txt").unwrap();

    let name = [b"jp/".as_slice(), &SHIFT_JIS_NIHON, b".txt"].concat();
    assert_eq!(resp.scope, "/jp");
    assert_eq!(resp.outcome, ServeOutcome::Served(gw.www_path(&name)));
}

#[test]
fn unconvertible_character_for_the_location_is_declined() {
    let gw = TestGateway::start("locations");

    // Hangul has no Shift_JIS mapping.
    let resp = gw.get("/jp/%ED%95%9C.txt").unwrap();

    assert_eq!(resp.trace.late, Some(HookOutcome::Declined));
    assert!(!resp.uri_replaced);
}
