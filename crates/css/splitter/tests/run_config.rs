use css_splitter::{SplitConfig, run};
use std::fs::{create_dir_all, read_to_string, write};
use tempfile::tempdir;

const MAIN_CSS: &str = "\
body { margin: 0 }
@media (min-width: 768px) { .grid { display: grid } }
@media (min-width: 1024px) { .grid { gap: 2rem } }
";

const INDEX_HTML: &str = "\
<html>
  <head>
    <title>demo</title>
  </head>
  <body></body>
</html>
";

#[test]
fn splits_and_injects_from_config_file() {
    let _ = env_logger::builder().is_test(true).try_init();
    let root = tempdir().unwrap();
    create_dir_all(root.path().join("css")).unwrap();
    write(root.path().join("css/main.css"), MAIN_CSS).unwrap();
    write(root.path().join("index.html"), INDEX_HTML).unwrap();
    let config_path = root.path().join("css-split.json");
    write(
        &config_path,
        r#"{
            "breakpoints": ["1024px", 768],
            "stylesheets": ["css/main.css"],
            "out_dir": "out",
            "html": "index.html"
        }"#,
    )
    .unwrap();

    let config = SplitConfig::load(&config_path).unwrap();
    let report = run(&config).unwrap();

    assert_eq!(report.files_to_inject, ["css/main.768.css", "css/main.1024.css"]);
    let out = root.path().join("out/css");
    assert_eq!(read_to_string(out.join("main.css")).unwrap(), "body {\n  margin: 0;\n}\n");
    assert_eq!(
        read_to_string(out.join("main.768.css")).unwrap(),
        "@media (min-width: 768px) {\n  .grid {\n    display: grid;\n  }\n}\n"
    );
    assert!(out.join("main.1024.css").exists());

    let html = read_to_string(root.path().join("out/index.html")).unwrap();
    let tags = [
        r#"<link href="/css/main.768.css" rel="stylesheet" media="(min-width: 768px)">"#,
        r#"<link href="/css/main.1024.css" rel="stylesheet" media="(min-width: 1024px)">"#,
    ];
    let first = html.find(tags[0]).unwrap();
    let second = html.find(tags[1]).unwrap();
    assert!(first < second);
    assert!(second < html.find("</head>").unwrap());
    // The template itself is left untouched.
    assert_eq!(read_to_string(root.path().join("index.html")).unwrap(), INDEX_HTML);
}

#[test]
fn same_file_name_in_two_directories_keeps_both() {
    let root = tempdir().unwrap();
    for (dir, color) in [("a", "red"), ("b", "blue")] {
        create_dir_all(root.path().join(dir)).unwrap();
        write(
            root.path().join(dir).join("main.css"),
            format!("p {{ color: {color} }}\n@media (min-width: 768px) {{ p {{ color: {color} }} }}"),
        )
        .unwrap();
    }
    let config_path = root.path().join("css-split.json");
    write(
        &config_path,
        r#"{ "breakpoints": [768], "stylesheets": ["a/main.css", "b/main.css"] }"#,
    )
    .unwrap();

    let config = SplitConfig::load(&config_path).unwrap();
    let report = run(&config).unwrap();
    let names: Vec<&str> = report.assets.iter().map(|asset| asset.name.as_str()).collect();
    assert_eq!(
        names,
        ["a/main.css", "a/main.768.css", "b/main.css", "b/main.768.css"]
    );

    let dist = root.path().join("dist");
    assert!(read_to_string(dist.join("a/main.css")).unwrap().contains("red"));
    assert!(read_to_string(dist.join("b/main.css")).unwrap().contains("blue"));
    assert!(read_to_string(dist.join("a/main.768.css")).unwrap().contains("red"));
    assert!(read_to_string(dist.join("b/main.768.css")).unwrap().contains("blue"));
}

#[test]
fn colliding_outputs_fail_before_writing() {
    let root = tempdir().unwrap();
    write(
        root.path().join("main.css"),
        "@media (min-width: 768px) { p { top: 0 } }",
    )
    .unwrap();
    write(root.path().join("main.768.css"), "p { top: 1px }").unwrap();
    let config_path = root.path().join("css-split.json");
    write(
        &config_path,
        r#"{ "breakpoints": [768], "stylesheets": ["main.css", "main.768.css"] }"#,
    )
    .unwrap();

    let config = SplitConfig::load(&config_path).unwrap();
    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("main.768.css"), "{err}");
    assert!(!root.path().join("dist").exists());
}

#[test]
fn invalid_breakpoint_names_its_position() {
    let root = tempdir().unwrap();
    let config_path = root.path().join("css-split.json");
    write(
        &config_path,
        r#"{ "breakpoints": [576, "wide"], "stylesheets": [] }"#,
    )
    .unwrap();

    let config = SplitConfig::load(&config_path).unwrap();
    let err = run(&config).unwrap_err();
    assert!(
        err.to_string().contains("index position 1"),
        "unexpected error: {err}"
    );
    assert!(!root.path().join("dist").exists());
}

#[test]
fn missing_stylesheet_is_reported() {
    let root = tempdir().unwrap();
    let config_path = root.path().join("css-split.json");
    write(
        &config_path,
        r#"{ "breakpoints": [576], "stylesheets": ["nope.css"] }"#,
    )
    .unwrap();

    let config = SplitConfig::load(&config_path).unwrap();
    let err = run(&config).unwrap_err();
    assert!(format!("{err:#}").contains("nope.css"), "{err:#}");
}

#[test]
fn strict_mode_rejects_unmatched_rules() {
    let root = tempdir().unwrap();
    write(
        root.path().join("main.css"),
        "@media (min-width: 767px) { a { top: 0 } }",
    )
    .unwrap();
    let config_path = root.path().join("css-split.json");
    write(
        &config_path,
        r#"{ "breakpoints": [768, 1024], "stylesheets": ["main.css"], "strict": true }"#,
    )
    .unwrap();

    let config = SplitConfig::load(&config_path).unwrap();
    assert!(run(&config).is_err());
}
