use super::*;

#[test]
fn defaults_match_the_dark_theme() {
    let cfg = Config::default();
    assert_eq!(cfg.render.dpi, 200);
    assert_eq!(cfg.render.font_size_pt, 12);
    assert_eq!(cfg.render.background, [54, 57, 63]);
    assert_eq!(cfg.render.foreground, "white");
    assert_eq!(cfg.render.timeout(), Duration::from_secs(30));
    assert_eq!(cfg.symbols.unbound, UnboundPolicy::AutoBind);
    assert_eq!(cfg.logging.level, "warn");
    cfg.validate().unwrap();
}

#[test]
fn empty_document_is_all_defaults() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
}

#[test]
fn partial_sections_override_only_named_fields() {
    let cfg = Config::from_toml_str(
        r#"
[render]
dpi = 300
timeout_secs = 5

[symbols]
unbound = "reject"

[logging]
file = "/tmp/mathpipe.log"
"#,
    )
    .unwrap();
    assert_eq!(cfg.render.dpi, 300);
    assert_eq!(cfg.render.timeout_secs, 5);
    assert_eq!(cfg.render.latex, "latex");
    assert_eq!(cfg.symbols.unbound, UnboundPolicy::Reject);
    assert_eq!(cfg.logging.level, "warn");
    assert_eq!(
        cfg.logging.file.as_deref(),
        Some(Path::new("/tmp/mathpipe.log"))
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::from_toml_str("[render]\ncolour = 1\n").unwrap_err();
    assert!(err.to_string().contains("config error:"));
}

#[test]
fn validation_catches_bad_values() {
    for src in [
        "[render]\ndpi = 0\n",
        "[render]\ntimeout_secs = 0\n",
        "[render]\nfont_size_pt = 0\n",
        "[render]\nlatex = \"  \"\n",
        "[render]\nforeground = \"white}\\\\evil\"\n",
    ] {
        assert!(Config::from_toml_str(src).is_err(), "accepted: {src}");
    }
}
