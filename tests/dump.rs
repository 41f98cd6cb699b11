use std::fs;
use std::path::PathBuf;

use spellhell::{read_dump, Config, Diagnostic, Error, LiteralLint, OverflowPolicy, Speller, WarningPrinter};

const DUMP: &str = r#"{
  "functions": [
    { "name": "puts" },
    { "name": "main", "blocks": [
      { "statements": [
        { "location": { "file": "hello.c", "line": 5, "column": 5 },
          "operands": [
            null,
            { "kind": "addr_expr", "operand":
              { "kind": "string_cst", "value": "Helo world, it's me\u0000 igored" } }
          ] },
        { "location": { "file": "hello.c", "line": 6, "column": 5 },
          "operands": [
            { "kind": "var_decl", "name": "banner",
              "initializer": { "kind": "string_cst", "value": [71, 111, 111, 100, 98, 121, 101, 255, 120] } }
          ] },
        { "location": { "file": "hello.c", "line": 7, "column": 5 },
          "operands": [
            { "kind": "expr", "code": "call_expr", "operands": [
              { "kind": "string_cst", "value": "hello wrods" } ] },
            { "kind": "wrapper", "code": "nop_expr", "operand":
              { "kind": "string_cst", "value": "supercalifragilisticexpialidociousness then wrods" } }
          ] }
      ] }
    ] }
  ]
}"#;

fn write_dump(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("spellhell-{}-{}.json", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

fn speller() -> Speller {
    Speller::from_words(vec!["hello", "world", "it", "s", "me", "goodbye"])
}

#[test]
fn warnings_for_a_dump() {
    let path = write_dump("warnings", DUMP);
    let lint = LiteralLint::new(speller());

    let mut printer = WarningPrinter::new(Vec::new());
    let summary = lint.check_dump(&path, &mut printer).unwrap();
    assert_eq!(summary.strings_checked, 4);
    assert_eq!(summary.misspellings, 3);
    assert_eq!(printer.finish().unwrap(), 3);

    let mut out: Vec<Diagnostic> = vec![];
    lint.check_unit(&read_dump(&path).unwrap(), &mut out);
    let found: Vec<_> = out.iter().map(|d| d.to_string()).collect();
    // "Goodbye" is known through its lowercase form; the byte 255 splits
    // off "x"; nothing after the NUL or the overlong word is checked.
    assert_eq!(found, vec![
        "hello.c:5:5: warning: Helo (bad spelling)",
        "hello.c:6:5: warning: x (bad spelling)",
        "hello.c:7:5: warning: wrods (bad spelling)",
    ]);

    fs::remove_file(&path).unwrap();
}

#[test]
fn skipping_long_words() {
    let path = write_dump("skip", DUMP);
    let config = Config { overflow: OverflowPolicy::SkipWord, ..Config::default() };
    let lint = LiteralLint::with_config(speller(), &config);

    let mut out: Vec<Diagnostic> = vec![];
    let summary = lint.check_dump(&path, &mut out).unwrap();
    assert_eq!(summary.misspellings, 5);
    let words: Vec<_> = out.iter().map(|d| &*d.word).collect();
    assert_eq!(words, vec!["Helo", "x", "wrods", "then", "wrods"]);

    fs::remove_file(&path).unwrap();
}

#[test]
fn malformed_dump() {
    let path = write_dump("malformed", r#"{ "functions": [ { "blocks": 3 } ] }"#);
    let lint = LiteralLint::new(speller());
    let mut out: Vec<Diagnostic> = vec![];
    assert!(matches!(lint.check_dump(&path, &mut out), Err(Error::ParseDump { .. })));
    fs::remove_file(&path).unwrap();
}
