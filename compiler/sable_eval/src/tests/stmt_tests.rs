//! Stylesheet expansion.

use sable_value::EvalErrorKind;

use super::{expand, expand_err, render, try_expand, try_expand_with, MemoryImports};

mod rules {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_rules_flatten_after_parent() {
        assert_eq!(
            expand(".a { color: red; .b { color: blue; } }"),
            vec![".a { color: red; }", ".a .b { color: blue; }"]
        );
    }

    #[test]
    fn parent_reference_and_suffix() {
        assert_eq!(
            expand(".a { &:hover { x: 1; } &-end { y: 2; } .c & { z: 3; } }"),
            vec![".a:hover { x: 1; }", ".a-end { y: 2; }", ".c .a { z: 3; }"]
        );
    }

    #[test]
    fn selector_lists_multiply() {
        assert_eq!(
            expand(".a, .b { .c, .d { x: 1; } }"),
            vec![".a .c, .a .d, .b .c, .b .d { x: 1; }"]
        );
    }

    #[test]
    fn interpolated_selector() {
        assert_eq!(
            expand("$n: foo; .#{$n}-bar { x: 1; }"),
            vec![".foo-bar { x: 1; }"]
        );
    }

    #[test]
    fn empty_rules_are_dropped() {
        assert_eq!(expand(".a { } .b { c: d; }"), vec![".b { c: d; }"]);
    }

    #[test]
    fn nested_properties() {
        assert_eq!(
            expand("a { font: { family: x; size: 1px; } }"),
            vec!["a { font-family: x; font-size: 1px; }"]
        );
    }

    #[test]
    fn blank_values_are_dropped() {
        assert_eq!(
            expand("a { b: null; c: \"\"; d: x; }"),
            vec!["a { c: \"\"; d: x; }"]
        );
    }

    #[test]
    fn literal_division_is_kept() {
        assert_eq!(
            expand("a { font: 12px/1.5 serif; w: (12px/2); }"),
            vec!["a { font: 12px/1.5 serif; w: 6px; }"]
        );
    }

    #[test]
    fn parent_reference_as_value() {
        assert_eq!(expand(".a .b { c: &; }"), vec![".a .b { c: .a .b; }"]);
    }

    #[test]
    fn map_value_is_rejected() {
        assert_eq!(
            expand_err("a { b: (c: d); }"),
            "(c: d) isn't a valid CSS value."
        );
    }

    #[test]
    fn comments_are_kept() {
        assert_eq!(
            expand("/* top */ a { b: c; }"),
            vec!["/* top */", "a { b: c; }"]
        );
    }
}

mod variables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_division_reduces_in_assignment() {
        assert_eq!(
            expand("$x: 1 + 1/2; $y: 1px/2px + 1; a { x: $x; y: $y; z: 1 + 1/2; }"),
            vec!["a { x: 1.5; y: 1.5; z: 1.5; }"]
        );
    }

    #[test]
    fn spaced_negative_operand_stays_a_list_item() {
        assert_eq!(
            expand("$a: 5; $b: 1; a { x: $a - $b -1; y: $a + $b -1; n: length($a - $b -1); }"),
            vec!["a { x: 4 -1; y: 6 -1; n: 2; }"]
        );
    }

    #[test]
    fn local_assignment_shadows_global() {
        assert_eq!(
            expand("$x: 1px; a { $x: 2px; b: $x; } c { d: $x; }"),
            vec!["a { b: 2px; }", "c { d: 1px; }"]
        );
    }

    #[test]
    fn global_flag_assigns_global() {
        assert_eq!(
            expand("$x: 1px; a { $x: 3px !global; } c { d: $x; }"),
            vec!["c { d: 3px; }"]
        );
    }

    #[test]
    fn default_flag_keeps_existing() {
        assert_eq!(
            expand("$y: 1; $y: 2 !default; $z: null; $z: 3 !default; a { b: $y $z; }"),
            vec!["a { b: 1 3; }"]
        );
    }

    #[test]
    fn control_blocks_update_globals() {
        assert_eq!(
            expand("$x: 1; @if true { $x: 2; $fresh: 1; } a { b: $x; c: variable-exists(fresh); }"),
            vec!["a { b: 2; c: false; }"]
        );
    }

    #[test]
    fn undefined_variable() {
        assert_eq!(expand_err("a { b: $nope; }"), "Undefined variable: \"$nope\".");
    }
}

mod mixins {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn arguments_and_defaults() {
        assert_eq!(
            expand(
                "@mixin m($a, $b: $a * 2) { w: $a $b; }
                 a { @include m(1px); @include m($b: 3px, $a: 0); }"
            ),
            vec!["a { w: 1px 2px; w: 0 3px; }"]
        );
    }

    #[test]
    fn rest_arguments() {
        assert_eq!(
            expand(
                "@mixin m($first, $rest...) { w: $first; n: length($rest); }
                 a { @include m(1, 2, 3); }"
            ),
            vec!["a { w: 1; n: 2; }"]
        );
    }

    #[test]
    fn spread_list_and_map() {
        assert_eq!(
            expand(
                "@mixin m($a, $b) { w: $a $b; }
                 $args: 1 2;
                 $kw: (b: 4, a: 3);
                 a { @include m($args...); @include m($kw...); }"
            ),
            vec!["a { w: 1 2; w: 3 4; }"]
        );
    }

    #[test]
    fn argument_errors() {
        let src = "@mixin m($a) { w: $a; }";
        assert_eq!(
            expand_err(&format!("{src} a {{ @include m; }}")),
            "Mixin m is missing argument $a."
        );
        assert_eq!(
            expand_err(&format!("{src} a {{ @include m(1, 2); }}")),
            "wrong number of arguments (2 for 1) for `m'"
        );
        assert_eq!(
            expand_err(&format!("{src} a {{ @include m($b: 1); }}")),
            "Mixin m has no argument named $b."
        );
        assert_eq!(
            expand_err(&format!("{src} a {{ @include m(1, $a: 2); }}")),
            "Mixin m was passed argument $a both by position and by name."
        );
    }

    #[test]
    fn undefined_mixin() {
        assert_eq!(expand_err("a { @include nope; }"), "no mixin named nope");
    }

    #[test]
    fn mixin_emits_rules() {
        assert_eq!(
            expand("@mixin m { .x { y: z; } } .a { @include m; }"),
            vec![".a .x { y: z; }"]
        );
    }

    #[test]
    fn content_uses_callers_scope() {
        assert_eq!(
            expand(
                "@mixin m { $c: blue; .inner { @content; } }
                 a { $c: red; @include m { color: $c; } }"
            ),
            vec!["a .inner { color: red; }"]
        );
    }

    #[test]
    fn content_without_block_is_empty() {
        assert_eq!(
            expand("@mixin m { x: 1; @content; } a { @include m; }"),
            vec!["a { x: 1; }"]
        );
    }

    #[test]
    fn nested_content_reaches_outer_block() {
        assert_eq!(
            expand(
                "@mixin inner { .i { @content; } }
                 @mixin outer { @include inner { .o { @content; } } }
                 a { @include outer { b: c; } }"
            ),
            vec!["a .i .o { b: c; }"]
        );
    }

    #[test]
    fn property_outside_rule() {
        assert_eq!(
            expand_err("@mixin m { color: red; } @include m;"),
            "Properties are only allowed within rules, directives, mixin includes, or other properties."
        );
    }

    #[test]
    fn errors_carry_backtrace() {
        let err = try_expand("@mixin m { @error \"boom\"; } a { @include m; }").unwrap_err();
        assert_eq!(err.message(), "boom");
        let frames = err.backtrace.expect("backtrace");
        assert_eq!(frames.frames()[0].name, "mixin m");
    }

    #[test]
    fn unbounded_recursion_hits_limit() {
        let err = try_expand("@mixin r { @include r; } a { @include r; }").unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::NestingLimitExceeded { .. }));
    }
}

mod functions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn return_value() {
        assert_eq!(
            expand("@function double($n) { @return $n * 2; } a { b: double(3px); }"),
            vec!["a { b: 6px; }"]
        );
    }

    #[test]
    fn return_from_control_flow() {
        assert_eq!(
            expand(
                "@function first-big($list) {
                   @each $n in $list { @if $n > 2 { @return $n; } }
                   @return null;
                 }
                 a { b: first-big(1 3 5); c: first-big(1 2); }"
            ),
            vec!["a { b: 3; }"]
        );
    }

    #[test]
    fn recursion() {
        assert_eq!(
            expand(
                "@function fact($n) { @if $n <= 1 { @return 1; } @return $n * fact($n - 1); }
                 a { b: fact(5); }"
            ),
            vec!["a { b: 120; }"]
        );
    }

    #[test]
    fn missing_return() {
        assert_eq!(
            expand_err("@function f() { $x: 1; } a { b: f(); }"),
            "Function f finished without @return."
        );
    }

    #[test]
    fn function_scope_is_isolated() {
        assert_eq!(
            expand("$g: 1; @function f() { $g: 2; @return $g; } a { b: f() $g; }"),
            vec!["a { b: 2 1; }"]
        );
    }

    #[test]
    fn user_function_shadows_builtin() {
        assert_eq!(
            expand("@function lighten($c, $a) { @return custom; } a { b: lighten(#000, 1%); }"),
            vec!["a { b: custom; }"]
        );
    }
}

mod control {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn if_else_chain() {
        assert_eq!(
            expand("@if 1 > 2 { a { b: c; } } @else if true { d { e: f; } } @else { g { h: i; } }"),
            vec!["d { e: f; }"]
        );
    }

    #[test]
    fn each_over_list() {
        assert_eq!(
            expand("@each $c in red, blue { .#{$c} { color: $c; } }"),
            vec![".red { color: red; }", ".blue { color: blue; }"]
        );
    }

    #[test]
    fn each_destructures_maps_and_lists() {
        assert_eq!(
            expand("@each $k, $v in (a: 1, b: 2) { .#{$k} { w: $v; } }"),
            vec![".a { w: 1; }", ".b { w: 2; }"]
        );
        assert_eq!(
            expand("@each $x, $y in (1 2, 3) { a { b: $x; c: $y; } }"),
            vec!["a { b: 1; c: 2; }", "a { b: 3; }"]
        );
    }

    #[test]
    fn for_through_and_to() {
        assert_eq!(
            expand("a { @for $i from 1 through 3 { w: $i; } }"),
            vec!["a { w: 1; w: 2; w: 3; }"]
        );
        assert_eq!(
            expand("a { @for $i from 1 to 3 { w: $i; } }"),
            vec!["a { w: 1; w: 2; }"]
        );
        assert_eq!(
            expand("a { @for $i from 3 through 1 { w: $i; } }"),
            vec!["a { w: 3; w: 2; w: 1; }"]
        );
    }

    #[test]
    fn for_keeps_units() {
        assert_eq!(
            expand("a { @for $i from 1px through 2px { w: $i; } }"),
            vec!["a { w: 1px; w: 2px; }"]
        );
    }

    #[test]
    fn for_requires_integers() {
        assert_eq!(
            expand_err("@for $i from 1.5 through 3 { }"),
            "1.5 is not an integer."
        );
    }

    #[test]
    fn while_loop() {
        assert_eq!(
            expand("$i: 0; @while $i < 3 { .w-#{$i} { x: $i; } $i: $i + 1; }"),
            vec![".w-0 { x: 0; }", ".w-1 { x: 1; }", ".w-2 { x: 2; }"]
        );
    }

    #[test]
    fn warn_and_debug_are_collected() {
        let evaluation = try_expand("@warn \"careful\"; @debug 1px + 1px; a { b: c; }").unwrap();
        let messages: Vec<&str> = evaluation
            .warnings
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["careful", "2px"]);
        assert_eq!(render(&evaluation.css), vec!["a { b: c; }"]);
    }

    #[test]
    fn error_directive() {
        assert_eq!(expand_err("@error \"bad #{1 + 1}\";"), "bad 2");
    }
}

mod extend {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extends_existing_rule() {
        assert_eq!(
            expand(".a { color: red; } .b { @extend .a; width: 1px; }"),
            vec![".a, .b { color: red; }", ".b { width: 1px; }"]
        );
    }

    #[test]
    fn placeholder_only_appears_through_extend() {
        assert_eq!(
            expand("%p { color: red; } .x { @extend %p; } %unused { a: b; }"),
            vec![".x { color: red; }"]
        );
    }

    #[test]
    fn extend_in_compound() {
        assert_eq!(
            expand(".a.c { x: 1; } .b { @extend .a; }"),
            vec![".a.c, .c.b { x: 1; }"]
        );
    }

    #[test]
    fn missing_target_fails() {
        let message = expand_err(".b { @extend .missing; }");
        assert!(
            message.starts_with("\".b\" failed to @extend \".missing\"."),
            "{message}"
        );
    }

    #[test]
    fn optional_missing_target_is_silent() {
        assert_eq!(
            expand(".b { @extend .missing !optional; c: d; }"),
            vec![".b { c: d; }"]
        );
    }

    #[test]
    fn extend_outside_rule() {
        assert_eq!(
            expand_err("@mixin m { @extend .a; } @include m;"),
            "Extend directives may only be used within rules."
        );
    }
}

mod at_rules {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn media_inside_rule_repeats_selector() {
        assert_eq!(
            expand(".a { x: 1; @media screen { color: red; } }"),
            vec![".a { x: 1; }", "@media screen { .a { color: red; } }"]
        );
    }

    #[test]
    fn media_at_top_level() {
        assert_eq!(
            expand("$w: 100px; @media (min-width: #{$w}) { .b { c: d; } }"),
            vec!["@media (min-width: 100px) { .b { c: d; } }"]
        );
    }

    #[test]
    fn keyframes_do_not_inherit_selector() {
        assert_eq!(
            expand("@keyframes spin { from { a: b; } to { a: c; } }"),
            vec!["@keyframes spin { from { a: b; } to { a: c; } }"]
        );
    }

    #[test]
    fn declarations_directly_in_at_rule() {
        assert_eq!(
            expand("@font-face { font-family: x; }"),
            vec!["@font-face { font-family: x; }"]
        );
    }

    #[test]
    fn statement_at_rule() {
        assert_eq!(
            expand("@custom-thing foo #{1 + 1};"),
            vec!["@custom-thing foo 2;"]
        );
    }
}

mod imports {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn imported_file_is_expanded_in_place() {
        let mut resolver = MemoryImports::with(&[("a", "$x: 1px; .imported { w: $x; }")]);
        let evaluation =
            try_expand_with("@import \"a\"; b { x: $x; }", &mut resolver).unwrap();
        assert_eq!(
            render(&evaluation.css),
            vec![".imported { w: 1px; }", "b { x: 1px; }"]
        );
        assert_eq!(resolver.requests, vec![("a".to_owned(), String::new())]);
    }

    #[test]
    fn nested_import_passes_base() {
        let mut resolver =
            MemoryImports::with(&[("a", "@import \"b\";"), ("b", "c { d: e; }")]);
        let evaluation = try_expand_with("@import \"a\";", &mut resolver).unwrap();
        assert_eq!(render(&evaluation.css), vec!["c { d: e; }"]);
        assert_eq!(resolver.requests[1], ("b".to_owned(), "a".to_owned()));
    }

    #[test]
    fn declined_import_stays_css() {
        assert_eq!(expand("@import \"missing\";"), vec!["@import \"missing\";"]);
    }

    #[test]
    fn plain_css_imports() {
        assert_eq!(
            expand("@import \"foo.css\"; @import url(bar.css);"),
            vec!["@import \"foo.css\";", "@import url(bar.css);"]
        );
    }

    #[test]
    fn import_loop_is_reported() {
        let mut resolver = MemoryImports::with(&[("a", "@import \"b\";"), ("b", "@import \"a\";")]);
        let err = try_expand_with("@import \"a\";", &mut resolver).unwrap_err();
        assert_eq!(
            err.message(),
            "An @import loop has been found:\n    a imports b\n    b imports a"
        );
    }
}
