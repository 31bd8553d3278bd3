//! Snapshot tests for what the host actually sends to the target.
//!
//! Review changes: `cargo insta review`

use std::fs;

use forthtalk::host::{Host, HostError, LineTransport, Outcome};
use forthtalk::{KnownWords, SessionConfig};
use tempfile::TempDir;

const BASELINE: &str = "marker ; mset mclr c! c@ ms for next cr .\" dup drop";

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, contents) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

fn host(dir: &TempDir) -> Host<LineTransport<Vec<u8>>> {
    let mut config = SessionConfig::new()
        .with_working_dir(dir.path())
        .with_path("lib")
        .with_startup_file(None);
    config.add_literals("LED:$20 PORTB:$25 DDRB:$24");
    Host::new(config, LineTransport::new(Vec::new())).with_known_words(KnownWords::from_listing(BASELINE))
}

fn sent(host: Host<LineTransport<Vec<u8>>>) -> String {
    let bytes = host.into_transport().into_inner();
    String::from_utf8(bytes).unwrap().trim_end().to_string()
}

const GPIO: &str = r#"\ gpio.frt - port helpers
: out-mode ( mask -- ) DDRB mset ;
: pin-high ( mask -- ) PORTB mset ;
: pin-low  ( mask -- ) PORTB mclr ;
"#;

const DELAY: &str = ": pause ( -- ) 250 ms ;\n";

const APP: &str = r#"\ app.frt - blink the LED
: blink ( n -- )
  LED out-mode
  for LED pin-high pause LED pin-low pause next ;
: main 10 blink ." done" cr ;
"#;

#[test]
fn test_compile_uploads_dependencies_first() {
    let dir = project(&[("lib/gpio.frt", GPIO), ("lib/delay.frt", DELAY), ("app.frt", APP)]);
    let mut host = host(&dir);

    let compilation = host.compile_file("app").unwrap();

    assert!(compilation.resolution.is_complete());
    let lines: Vec<usize> = compilation.uploads.iter().map(|u| u.lines_sent).collect();
    assert_eq!(lines, vec![1, 3, 4]);
    insta::assert_snapshot!(sent(host), @r#"
    : pause 250 ms ;
    : out-mode $24 mset ;
    : pin-high $25 mset ;
    : pin-low $25 mclr ;
    : blink
    $20 out-mode
    for $20 pin-high pause $20 pin-low pause next ;
    : main 10 blink ." done" cr ;
    "#);
}

#[test]
fn test_directives_in_a_file_apply_from_their_line_on() {
    let dir = project(&[(
        "lits.frt",
        ": early BLUE ;\n#lits BLUE:$1F\n: late BLUE ;\n\\ #lits GREEN:$2E\n: later GREEN BLUE ;\n",
    )]);
    let mut host = host(&dir);

    let upload = host.upload_file("lits").unwrap();

    assert_eq!(upload.lines_sent, 3);
    insta::assert_snapshot!(sent(host), @r"
    : early BLUE ;
    : late $1f ;
    : later $2e $1f ;
    ");
}

#[test]
fn test_nested_send_uploads_inner_file_in_place() {
    let dir = project(&[
        ("outer.frt", ": before ;\n#require inner\n: after ;\n"),
        ("lib/inner.frt", ": inner ;\n"),
    ]);
    let mut host = host(&dir);

    host.upload_file("outer").unwrap();

    insta::assert_snapshot!(sent(host), @r"
    : before ;
    : inner ;
    : after ;
    ");
}

#[test]
fn test_self_upload_is_rejected_without_stopping_the_file() {
    let dir = project(&[("loop.frt", ": one ;\n#send loop\n: two ;\n")]);
    let mut host = host(&dir);

    host.upload_file("loop").unwrap();

    insta::assert_snapshot!(sent(host), @r"
    : one ;
    : two ;
    ");
}

#[test]
fn test_send_missing_file_is_not_found() {
    let dir = project(&[]);
    let mut host = host(&dir);

    let err = host.run_command("#send nothing").unwrap_err();

    assert!(matches!(err, HostError::Resolve(_)));
    assert_eq!(err.to_string(), "File not found: nothing");
}

#[test]
fn test_file_directive_reports_plan_without_sending() {
    let dir = project(&[("lib/gpio.frt", GPIO), ("lib/delay.frt", DELAY), ("app.frt", APP)]);
    let mut host = host(&dir);

    let Outcome::Plan(resolution) = host.run_command("#file app").unwrap() else {
        panic!("expected a plan");
    };

    let plan: Vec<String> = resolution
        .upload_plan()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(plan, vec!["delay.frt", "gpio.frt", "app.frt"]);
    assert_eq!(sent(host), "");
}

#[test]
fn test_hex_rewrite_check_then_write() {
    let dir = project(&[("lib/regs.frt", "$FF constant ALL\n#send FOO\nABC. d.\n")]);
    let mut host = host(&dir);

    let check = host.hex_rewrite("regs", true).unwrap();
    assert_eq!(check.changed_lines, 2);
    assert!(!check.written);
    assert_eq!(
        fs::read_to_string(dir.path().join("lib/regs.frt")).unwrap(),
        "$FF constant ALL\n#send FOO\nABC. d.\n"
    );

    let rewrite = host.hex_rewrite("regs", false).unwrap();
    assert!(rewrite.written);
    assert_eq!(
        fs::read_to_string(dir.path().join("lib/regs.frt")).unwrap(),
        "$ff constant ALL\n#send FOO\nabc. d.\n"
    );

    let again = host.hex_rewrite("regs", true).unwrap();
    assert_eq!(again.changed_lines, 0);
}

#[test]
fn test_startup_file_configures_session() {
    let dir = project(&[
        ("config.ftk", "#path drivers\n#lits RED:$0A\n"),
        ("drivers/led.frt", ": red RED ;\n"),
    ]);
    let config = SessionConfig::new().with_working_dir(dir.path());
    let mut host = Host::new(config, LineTransport::new(Vec::new()));

    let startup = host.start().unwrap().unwrap();
    assert_eq!(startup.lines_sent, 0);
    host.upload_file("led").unwrap();

    assert_eq!(sent(host), ": red $0a ;");
}
