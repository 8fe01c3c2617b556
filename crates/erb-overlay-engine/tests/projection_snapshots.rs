use std::path::Path;

use erb_overlay_engine::{ProjectOptions, Projection, ProjectionEngine, convert};

/// Load a fixture, convert it, and check the layout invariants that must
/// hold for every template: unchanged byte length and terminator positions,
/// and a registry whose spans stay inside the source.
fn project_fixture(name: &str, options: ProjectOptions) -> (String, Projection) {
    let source = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.erb",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let engine = ProjectionEngine::new(options);
    let projection = engine.convert(Path::new(name), &source).unwrap();

    assert_eq!(projection.code.len(), source.len());
    assert_eq!(projection.code.chars().count(), source.chars().count());
    for (i, byte) in source.bytes().enumerate() {
        let projected = projection.code.as_bytes()[i];
        if matches!(byte, b'\n' | b'\r') {
            assert_eq!(projected, byte, "terminator moved at offset {i}");
        } else {
            assert!(
                !matches!(projected, b'\n' | b'\r'),
                "terminator appeared at offset {i}"
            );
        }
    }
    for (offset, entry) in projection.registry.iter() {
        assert!(offset < source.len());
        assert!(entry.span.end <= source.len());
    }

    let second = engine.convert(Path::new(name), &source).unwrap();
    assert_eq!(second.code, projection.code, "conversion not deterministic");

    (source, projection)
}

/// Filler spaces rendered as `·` so snapshots carry no bare trailing
/// whitespace.
fn visualize(code: &str) -> String {
    code.replace(' ', "\u{b7}")
}

#[test]
fn fixture_show_user() {
    let (_, projection) = project_fixture("show_user", ProjectOptions::default());
    insta::assert_snapshot!(visualize(&projection.code), @r"
    ·····
    ··_·=·user.name;··
    ······
    ");
}

#[test]
fn fixture_conditional_greeting() {
    let (_, projection) = project_fixture("conditional_greeting", ProjectOptions::default());
    insta::assert_snapshot!(visualize(&projection.code), @r"
    ···if·user;··
    ······greeting;··
    ···else;··
    ······fallback;··
    ···end;··
    ");
    // both branch outputs are tails, so no assignment marker anywhere
    assert!(!projection.code.contains("_ ="));
}

#[test]
fn fixture_each_item() {
    let (_, projection) = project_fixture("each_item", ProjectOptions::default());
    insta::assert_snapshot!(visualize(&projection.code), @r"
    ····
    ·····items.each·do·|item|;··
    ········_·=·item;·······
    ·····end;··
    ·····
    ");
}

#[test]
fn fixture_comment_note() {
    let (_, projection) = project_fixture("comment_note", ProjectOptions::default());
    insta::assert_snapshot!(visualize(&projection.code), @r"
    ··#·······················
    ··#························
    _·=·card;··
    ");
}

#[test]
fn fixture_markup_rendering() {
    let options = ProjectOptions {
        render_markup: true,
        markup_blocks: true,
    };
    let (source, projection) = project_fixture("markup_rendering", options);
    insta::assert_snapshot!(visualize(&projection.code), @r"
    section·{·············
    ··h1;·············
    ··_·=·title;··
    section0;}
    ");

    // every substitution is recorded and restorable
    let offsets: Vec<_> = projection.registry.iter().map(|(k, _)| k).collect();
    assert_eq!(offsets, vec![0, 25, 44, 57]);
    for (_, entry) in projection.registry.iter() {
        assert!(entry.eligible);
        assert!(source[entry.span.start..entry.span.end].is_ascii());
    }
}

#[test]
fn registry_serializes_for_downstream_tools() {
    let options = ProjectOptions {
        render_markup: true,
        markup_blocks: true,
    };
    let (_, projection) = project_fixture("markup_rendering", options);
    insta::assert_yaml_snapshot!(projection.registry, @r"
    entries:
      0:
        span:
          start: 0
          end: 22
        eligible: true
      25:
        span:
          start: 25
          end: 29
        eligible: true
      44:
        span:
          start: 44
          end: 47
        eligible: true
      57:
        span:
          start: 57
          end: 67
        eligible: true
    ");
}

#[test]
fn short_open_tag_renders_statement_form() {
    let options = ProjectOptions {
        render_markup: true,
        markup_blocks: true,
    };
    let engine = ProjectionEngine::new(options);
    let projection = engine
        .convert(Path::new("inline"), "<div><%= x %></div>")
        .unwrap();
    insta::assert_snapshot!(visualize(&projection.code), @"div;·_·=·x;········");
}

#[test]
fn sibling_blocks_get_distinct_counters() {
    let options = ProjectOptions {
        render_markup: true,
        markup_blocks: true,
    };
    let engine = ProjectionEngine::new(options);
    let source = "<div class=\"a\"><%= x %></div><div class=\"a\"><%= x %></div>";
    let projection = engine.convert(Path::new("inline"), source).unwrap();
    assert!(projection.code.contains("div0;}"));
    assert!(projection.code.contains("div1;}"));
}

#[test]
fn unclosed_markup_still_projects() {
    let projection = convert(Path::new("inline"), "<div>\n  <%= a %>\n").unwrap();
    assert_eq!(projection.defects.len(), 1);
    insta::assert_snapshot!(visualize(&projection.code), @r"
    ·····
    ··_·=·a;··
    ");
}
