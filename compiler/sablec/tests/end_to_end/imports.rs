//! `@import` through the in-memory importer.

use pretty_assertions::assert_eq;
use sablec::{compile_with, MapImporter, Options};

use crate::common::compile_lines_with;

#[test]
fn partial_is_found_and_shares_variables() {
    let mut importer = MapImporter::new().with_file("_theme.scss", "$accent: red;");
    assert_eq!(
        compile_lines_with("@import \"theme\"; a { color: $accent; }", &mut importer),
        vec!["a { color: red; }"]
    );
    assert_eq!(importer.loaded(), ["_theme.scss"]);
}

#[test]
fn nested_import_is_relative_to_its_file() {
    let mut importer = MapImporter::new()
        .with_file("lib/_index.scss", "@import \"colors\"; .lib { c: $accent; }")
        .with_file("lib/_colors.scss", "$accent: blue;")
        .with_file("_colors.scss", "$accent: green;");
    assert_eq!(
        compile_lines_with("@import \"lib/index\";", &mut importer),
        vec![".lib { c: blue; }"]
    );
}

#[test]
fn imported_mixins_are_usable() {
    let mut importer =
        MapImporter::new().with_file("mixins.scss", "@mixin hide { display: none; }");
    assert_eq!(
        compile_lines_with("@import \"mixins\"; .x { @include hide; }", &mut importer),
        vec![".x { display: none; }"]
    );
}

#[test]
fn import_inside_rule_nests_its_rules() {
    let mut importer = MapImporter::new().with_file("_inner.scss", ".b { c: d; }");
    assert_eq!(
        compile_lines_with(".a { @import \"inner\"; }", &mut importer),
        vec![".a .b { c: d; }"]
    );
}

#[test]
fn unresolved_and_css_imports_stay_in_output() {
    let mut importer = MapImporter::new();
    assert_eq!(
        compile_lines_with(
            "@import \"missing\"; @import \"print.css\"; a { b: c; }",
            &mut importer
        ),
        vec![
            "@import \"missing\";",
            "@import \"print.css\";",
            "a { b: c; }",
        ]
    );
    assert!(importer.loaded().is_empty());
}

#[test]
fn import_loop_names_every_file() {
    let mut importer = MapImporter::new()
        .with_file("a.scss", "@import \"b\";")
        .with_file("b.scss", "@import \"a\";");
    let err = compile_with("@import \"a\";", &Options::default(), &mut importer).unwrap_err();
    assert_eq!(
        err.to_string(),
        "An @import loop has been found:\n    a.scss imports b.scss\n    b.scss imports a.scss"
    );
}

#[test]
fn error_in_import_points_at_the_imported_file() {
    let main = "@import \"bad\";";
    let mut importer = MapImporter::new().with_file("_bad.scss", "a {\n  b: $nope;\n}");
    let err = compile_with(main, &Options::default(), &mut importer).unwrap_err();
    let report = err.render(&importer.source_map("main.scss", main));
    assert!(report.contains("_bad.scss:2:"), "{report}");
}

#[test]
fn syntax_error_in_import() {
    let main = "a { b: c; }\n@import \"broken\";";
    let mut importer = MapImporter::new().with_file("broken.scss", "x {");
    let err = compile_with(main, &Options::default(), &mut importer).unwrap_err();
    assert!(err.code().is_syntax_error());
    let report = err.render(&importer.source_map("main.scss", main));
    assert!(report.contains("broken.scss:1:"), "{report}");
}
