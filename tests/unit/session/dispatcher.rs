use super::*;
use crate::render::{InMemoryRasterizer, Theme};
use crate::symbols::UnboundPolicy;

fn session(raster: &InMemoryRasterizer, policy: UnboundPolicy) -> Session {
    Session::new(
        SymbolEnv::standard(policy),
        Renderer::new(Theme::default(), Box::new(raster.clone())),
    )
}

fn run(session: &mut Session, input: &str) -> String {
    let mut out = Vec::new();
    session.run(input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn statuses(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|l| matches!(*l, "200" | "400" | "404"))
        .collect()
}

#[test]
fn handle_maps_outcomes_to_responses() {
    let raster = InMemoryRasterizer::new();
    let mut s = session(&raster, UnboundPolicy::AutoBind);
    assert!(matches!(s.handle("display, x**2"), Some(Response::Success(_))));
    assert_eq!(s.handle("display, x**"), Some(Response::BadRequest));
    assert_eq!(s.handle("frobnicate, x"), Some(Response::NotFound));
    assert_eq!(s.handle(""), Some(Response::BadRequest));
    assert_eq!(s.handle("differentiate, x**2"), Some(Response::BadRequest));
    assert_eq!(s.state(), SessionState::Running);
    assert_eq!(s.handle("quit"), None);
    assert_eq!(s.state(), SessionState::Stopped);
    assert_eq!(
        s.stats(),
        SessionStats {
            requests: 5,
            ok: 1,
            bad_request: 3,
            not_found: 1,
        }
    );
}

#[test]
fn run_stops_at_sentinel_and_ignores_the_rest() {
    let raster = InMemoryRasterizer::new();
    let mut s = session(&raster, UnboundPolicy::AutoBind);
    let out = run(&mut s, "nope\nquit\ndisplay, x\n");
    assert_eq!(out, "404\n");
    assert!(raster.documents().is_empty());
}

#[test]
fn run_handles_crlf_and_missing_final_newline() {
    let raster = InMemoryRasterizer::new();
    let mut s = session(&raster, UnboundPolicy::AutoBind);
    let out = run(&mut s, "display, x\r\ndisplay, y");
    assert_eq!(statuses(&out), vec!["200", "200"]);
    assert_eq!(out.lines().count(), 4);
    assert_eq!(s.state(), SessionState::Stopped);
}

#[test]
fn render_failure_is_a_bad_request_and_loop_continues() {
    let raster = InMemoryRasterizer::failing();
    let mut s = session(&raster, UnboundPolicy::AutoBind);
    let out = run(&mut s, "display, x\ndisplay, y\nfoo\n");
    assert_eq!(out, "400\n400\n404\n");
}

#[test]
fn reject_policy_turns_unknown_names_into_bad_requests() {
    let raster = InMemoryRasterizer::new();
    let mut s = session(&raster, UnboundPolicy::Reject);
    let out = run(&mut s, "display, a + b\ndisplay, x + y\n");
    assert_eq!(statuses(&out), vec!["400", "200"]);
}

#[test]
fn invalid_utf8_is_a_bad_request() {
    let raster = InMemoryRasterizer::new();
    let mut s = session(&raster, UnboundPolicy::AutoBind);
    let mut out = Vec::new();
    s.run(&b"display, \xff\n"[..], &mut out).unwrap();
    assert_eq!(out, b"400\n");
}
