use css_splitter::{
    Breakpoints, MediaSplitter, RuleClassifier, StylesheetAsset, plan,
};
use css_syntax::{Rule, parse_stylesheet, serialize_rules};

const SITE_CSS: &str = r#"
/* base */
body { margin: 0 }
.btn { padding: 4px }
@media print { .btn { display: none } }
@media (max-width: 575px) { .nav { display: none } }
/* phones in landscape and up */
@media (min-width: 576px) { .container { max-width: 540px } }
@media (min-width: 768px) { .container { max-width: 720px } }
/* desktops */
@media (min-width: 992px) and (max-width: 1199px) { .sidebar { float: left } }
@media screen and (min-width: 1200px) { .container { max-width: 1140px } }
@media (min-width: 1400px) { .container { max-width: 1320px } }
.footer { clear: both }
"#;

fn bootstrap() -> Breakpoints {
    Breakpoints::new([576, 992, 1200]).unwrap()
}

fn preludes(rules: &[&Rule]) -> Vec<String> {
    rules
        .iter()
        .map(|rule| match rule {
            Rule::Comment(comment) => format!("/*{}*/", comment.text),
            Rule::Style(style) => style.prelude.clone(),
            Rule::At(at_rule) => format!("@{} {}", at_rule.name, at_rule.prelude),
        })
        .collect()
}

#[test]
fn groups_rules_by_bucket() {
    let _ = env_logger::builder().is_test(true).try_init();
    let sheet = parse_stylesheet(SITE_CSS);
    let classifier = RuleClassifier::new("site", plan(&bootstrap()));
    let groups = classifier.handle(&sheet.rules).unwrap();

    let identifiers: Vec<&str> = groups.iter().map(|group| group.identifier.as_str()).collect();
    assert_eq!(identifiers, ["site", "site.576", "site.992", "site.1200"]);

    assert_eq!(
        preludes(&groups[0].rules),
        [
            "/* base */",
            "body",
            ".btn",
            "@media print",
            "@media (max-width: 575px)",
            ".footer",
        ]
    );
    assert_eq!(
        preludes(&groups[1].rules),
        [
            "/* phones in landscape and up */",
            "@media (min-width: 576px)",
            "@media (min-width: 768px)",
        ]
    );
    assert_eq!(
        preludes(&groups[2].rules),
        ["/* desktops */", "@media (min-width: 992px) and (max-width: 1199px)"]
    );
    assert_eq!(
        preludes(&groups[3].rules),
        [
            "@media screen and (min-width: 1200px)",
            "@media (min-width: 1400px)",
        ]
    );
}

#[test]
fn every_rule_lands_exactly_once() {
    let sheet = parse_stylesheet(SITE_CSS);
    let classifier = RuleClassifier::new("site", plan(&bootstrap()));
    let groups = classifier.handle(&sheet.rules).unwrap();

    let placed: usize = groups.iter().map(|group| group.rules.len()).sum();
    assert_eq!(placed, sheet.rules.len());
    for rule in &sheet.rules {
        let homes = groups
            .iter()
            .filter(|group| group.rules.iter().any(|placed| std::ptr::eq(*placed, rule)))
            .count();
        assert_eq!(homes, 1, "{rule} placed {homes} times");
    }
}

#[test]
fn split_files_reparse_to_their_rules() {
    let splitter = MediaSplitter::new(bootstrap());
    let asset = StylesheetAsset::new("css/site.css", SITE_CSS);
    let emitted = splitter.split_asset(&asset).unwrap();

    let sheet = parse_stylesheet(SITE_CSS);
    let groups = RuleClassifier::new("css/site", plan(&bootstrap()))
        .handle(&sheet.rules)
        .unwrap();
    assert_eq!(emitted.len(), groups.len());

    for (file, group) in emitted.iter().zip(&groups) {
        assert_eq!(file.name, format!("{}.css", group.identifier));
        let reparsed = parse_stylesheet(&file.source);
        let expected: Vec<Rule> = group.rules.iter().map(|rule| (*rule).clone()).collect();
        assert_eq!(reparsed.rules, expected, "mismatch in {}", file.name);
        assert_eq!(file.source, serialize_rules(group.rules.iter().copied()));
    }
}

#[test]
fn unused_buckets_produce_no_files() {
    let splitter = MediaSplitter::new(Breakpoints::new([320, 640, 960, 1280]).unwrap());
    let asset = StylesheetAsset::new(
        "app.css",
        "a { top: 0 }\n@media (min-width: 960px) { a { top: 1px } }",
    );
    let names: Vec<String> = splitter
        .split_asset(&asset)
        .unwrap()
        .into_iter()
        .map(|file| file.name)
        .collect();
    assert_eq!(names, ["app.css", "app.960.css"]);
}

#[test]
fn comment_and_rule_share_a_bucket() {
    let sheet = parse_stylesheet(
        "/* tablet */\n@media (min-width: 992px) { .a { top: 0 } }\n/* phone */\n.b { top: 0 }",
    );
    let groups = RuleClassifier::new("x", plan(&bootstrap()))
        .handle(&sheet.rules)
        .unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].identifier, "x");
    assert_eq!(preludes(&groups[0].rules), ["/* phone */", ".b"]);
    assert_eq!(groups[1].identifier, "x.992");
    assert_eq!(
        preludes(&groups[1].rules),
        ["/* tablet */", "@media (min-width: 992px)"]
    );
}
