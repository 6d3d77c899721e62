use serial_test::serial;
use termage_render::terminal::{reset_width_detector, set_width_detector};
use termage_render::{
    expand, reset_theme, set_theme, underline, Alert, AlertKind, Element, RenderContext, Theme,
};

const ALERT_THEME: &str = r#"
colors:
  blue: blue
  yellow: yellow
  black: black
  white: white
  red: red
  green: green
  gray: gray
alert:
  text-align: left
  width-full: false
  width: 50
  type:
    info: { bg: blue, color: black }
    warning: { bg: yellow, color: black }
    danger: { bg: red, color: white }
    success: { bg: green, color: black }
    primary: { bg: blue, color: white }
    secondary: { bg: gray, color: black }
"#;

fn compact(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn with_alert_theme<F: FnOnce()>(f: F) {
    set_theme(Theme::from_yaml(ALERT_THEME).expect("theme parses"));
    set_width_detector(|| Some(80));
    f();
    reset_width_detector();
    reset_theme();
}

fn expected_alert(bg: u8, fg: u8) -> String {
    format!(
        "\x1b[{bg}m\x1b[49m\x1b[{fg}m\x1b[{bg}mStayRAD!\x1b[49m\x1b[39m\x1b[{bg}m\x1b[49m",
        bg = bg,
        fg = fg
    )
}

#[test]
#[serial]
fn test_alert_kinds_match_fixtures() {
    with_alert_theme(|| {
        let cases = [
            (AlertKind::Info, 44, 30),
            (AlertKind::Warning, 43, 30),
            (AlertKind::Danger, 41, 37),
            (AlertKind::Success, 42, 30),
            (AlertKind::Primary, 44, 37),
            (AlertKind::Secondary, 100, 30),
        ];
        for (kind, bg, fg) in cases {
            let out = Alert::new("Stay RAD!").kind(kind).render_default();
            assert_eq!(compact(&out), expected_alert(bg, fg), "kind {}", kind);
        }
    });
}

#[test]
#[serial]
fn test_alert_alignment_and_size_match_fixtures() {
    with_alert_theme(|| {
        let expected = expected_alert(44, 30);
        for alert in [
            Alert::new("Stay RAD!").info().text_align_right(),
            Alert::new("Stay RAD!").info().text_align_left(),
            Alert::new("Stay RAD!").info().w(200),
        ] {
            assert_eq!(compact(&alert.render_default()), expected);
        }
    });
}

#[test]
#[serial]
fn test_alert_size_is_capped_by_terminal() {
    with_alert_theme(|| {
        let out = Alert::new("Stay RAD!").w(200).render_default();
        for line in out.lines() {
            assert_eq!(termage_render::visible_width(line), 80);
        }
    });
}

#[test]
fn test_underline_matches_fixture() {
    let ctx = RenderContext::from_theme(Theme::new());
    assert_eq!(underline("RAD").render(&ctx), "\x1b[4mRAD\x1b[24m");
}

#[test]
#[serial]
fn test_process_theme_drives_expand() {
    set_theme(Theme::default().with("colors.danger", "magenta"));
    assert_eq!(
        expand("[color=danger]Stay RAD![/color]"),
        "\x1b[35mStay RAD!\x1b[39m"
    );
    reset_theme();
    assert_eq!(
        expand("[color=danger]Stay RAD![/color]"),
        "\x1b[31mStay RAD!\x1b[39m"
    );
}
