use std::path::Path;
use std::process::{Command, Output};

fn rsmt(dir: &Path, args: &[&str]) -> Output {
    // Run inside `dir` so no stray rsmt.toml is picked up.
    Command::new(env!("CARGO_BIN_EXE_rsmt"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

const CORNER: &str = r#"<root>
<net>
<point x="0" y="0" layer="pins" type="pin"/>
<point x="0" y="10" layer="pins" type="pin"/>
<point x="10" y="0" layer="pins" type="pin"/>
</net>
</root>"#;

#[test]
fn routes_descriptor_into_out_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("net.xml"), CORNER).unwrap();

    let out = rsmt(dir.path(), &["net.xml"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let routed = std::fs::read_to_string(dir.path().join("net_out.xml")).unwrap();
    let segments: Vec<&str> = routed
        .lines()
        .filter(|l| l.starts_with("<segment"))
        .collect();
    assert_eq!(
        segments,
        vec![
            "<segment x1=\"0\" y1=\"10\" x2=\"0\" y2=\"10\" layer=\"m2\"/>",
            "<segment x1=\"0\" y1=\"0\" x2=\"0\" y2=\"10\" layer=\"m3\"/>",
            "<segment x1=\"0\" y1=\"0\" x2=\"10\" y2=\"0\" layer=\"m2\"/>",
        ]
    );
    assert!(routed.contains("<point x=\"0\" y=\"0\" layer=\"m2_m3\" type=\"via\"/>"));
    assert!(routed.ends_with("</net>\n</root>"));
}

#[test]
fn missing_input_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = rsmt(dir.path(), &["absent.xml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("absent_out.xml").exists());
}

#[test]
fn record_without_coordinates_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bad.xml"),
        "<root>\n<net>\n<point x=\"4\" layer=\"pins\" type=\"pin\"/>\n</net>\n</root>",
    )
    .unwrap();

    let out = rsmt(dir.path(), &["bad.xml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("bad_out.xml").exists());
}

#[test]
fn unwritable_output_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("net.xml"), CORNER).unwrap();
    // A directory squatting on the output path makes the write fail.
    std::fs::create_dir(dir.path().join("net_out.xml")).unwrap();

    let out = rsmt(dir.path(), &["net.xml"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn png_flag_renders_the_net() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("net.xml"), CORNER).unwrap();

    let out = rsmt(dir.path(), &["--png", "net.png", "net.xml"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("net.png").exists());
    assert!(dir.path().join("net_out.xml").exists());
}

#[test]
fn generate_then_route() {
    let dir = tempfile::tempdir().unwrap();
    let out = rsmt(
        dir.path(),
        &["generate", "--pins", "12", "--size", "40", "--output", "gen/random.xml"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("gen/random.xml").exists());

    let out = rsmt(dir.path(), &["gen/random.xml"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(dir.path().join("gen/random_out.xml").exists());
}
