use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MathpipeError::parse(3, "x")
            .to_string()
            .contains("parse error at byte 3:")
    );
    assert!(
        MathpipeError::unbound("x")
            .to_string()
            .contains("unbound name:")
    );
    assert!(
        MathpipeError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        MathpipeError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        MathpipeError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn arity_message_names_the_operation() {
    let err = MathpipeError::Arity {
        op: "differentiate",
        expected: 2,
        got: 1,
    };
    let msg = err.to_string();
    assert!(msg.contains("`differentiate`"));
    assert!(msg.contains("takes 2"));
    assert!(msg.contains("got 1"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MathpipeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn every_error_collapses_to_bad_request() {
    let errs = [
        MathpipeError::parse(0, "x"),
        MathpipeError::unbound("x"),
        MathpipeError::evaluation("x"),
        MathpipeError::render("x"),
        MathpipeError::Timeout {
            program: "latex".to_owned(),
            secs: 1,
        },
        MathpipeError::config("x"),
    ];
    for err in errs {
        assert_eq!(err.status(), Status::BadRequest, "{err}");
    }
}

#[test]
fn status_codes_round_trip() {
    for status in [Status::Ok, Status::BadRequest, Status::NotFound] {
        assert_eq!(Status::from_code(status.code()), Some(status));
    }
    assert_eq!(Status::from_code(500), None);
    assert_eq!(Status::Ok.to_string(), "200");
    assert!(Status::Ok.is_success());
    assert!(!Status::NotFound.is_success());
}
