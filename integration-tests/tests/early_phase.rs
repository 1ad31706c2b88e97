use integration_tests::harness::{EUC_KR_HANGUL, TestGateway};
use pretty_assertions::assert_eq;
use urlconv_core::device::HookOutcome;
use urlconv_core::gateway::ServeOutcome;

/// The early hook converts with the server settings before routing; the
/// routed location then serves the converted name.
#[cfg(target_os = "linux")]
#[test]
fn early_conversion_is_routed_and_served() {
    let gw = TestGateway::start("early");

    let resp = gw.get("/legacy/%ED%95%9C%EA%B8%80.txt").unwrap();

    let name = [b"legacy/".as_slice(), &EUC_KR_HANGUL, b".txt"].concat();
    assert_eq!(resp.scope, "/legacy");
    assert_eq!(resp.trace.early, Some(HookOutcome::Handled));
    assert_eq!(resp.trace.late, Some(HookOutcome::Declined));
    assert_eq!(resp.outcome, ServeOutcome::Served(gw.www_path(&name)));
}

#[test]
fn late_hook_never_converts_in_early_mode() {
    let gw = TestGateway::start("early");

    let resp = gw.get("/index.html").unwrap();

    assert_eq!(resp.trace.early, Some(HookOutcome::Declined));
    assert_eq!(resp.trace.late, Some(HookOutcome::Declined));
    assert_eq!(resp.outcome, ServeOutcome::Served(gw.www().join("index.html")));
}

#[test]
fn uri_is_replaced_at_most_once() {
    let gw = TestGateway::start("early");

    let resp = gw.get("/%EC%97%86%EC%9D%8C").unwrap();

    assert!(resp.uri_replaced);
    assert_eq!(resp.trace.early, Some(HookOutcome::Handled));
    assert_eq!(resp.trace.late, Some(HookOutcome::Declined));
}
