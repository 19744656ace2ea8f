use std::rc::Rc;

use super::*;
use crate::common::{DiagnosticKind, Diagnostics};
use crate::model::style::names;
use crate::model::{
    Dictionary, Geometry, LegacyDefaults, ModernDefaults, Position, PropertyMap, Size, Style, StyleKind,
};
use crate::output::recorder::RecordingPainter;

static MODERN: ModernDefaults = ModernDefaults;
static LEGACY: LegacyDefaults = LegacyDefaults;

fn line(collector: &mut dyn Collector, id: Option<&str>, from: (f64, f64), to: (f64, f64)) {
    collector.collect_line(
        id,
        Some((Position::new(from.0, from.1), Position::new(to.0, to.1))),
        None,
        false,
    );
}

fn placed(x: f64, y: f64, w: f64, h: f64) -> Geometry {
    Geometry {
        natural_size: Some(Size::new(w, h)),
        position: Some(Position::new(x, y)),
        ..Geometry::default()
    }
}

/// One master slide holding layer `master-layer` with a single line.
fn themes_with_master(diagnostics: &Rc<Diagnostics>) -> Dictionary {
    let mut themes = ThemeCollector::new(Dictionary::new(), &MODERN, Rc::clone(diagnostics));
    themes.start_themes();
    themes.collect_presentation(Some(Size::new(800.0, 600.0)));
    themes.start_page();
    themes.start_layer();
    line(&mut themes, None, (0.0, 0.0), (5.0, 5.0));
    themes.end_layer();
    themes.collect_layer(Some("master-layer"), false);
    themes.end_page();
    themes.collect_page(Some("master"));
    themes.end_themes();
    themes.into_dictionary()
}

#[test]
fn test_theme_pass_stores_master_layers() {
    let diagnostics = Rc::new(Diagnostics::new());
    let dictionary = themes_with_master(&diagnostics);

    assert_eq!(dictionary.master_layer_count(), 1);
    let layer = dictionary.master_layer("master-layer").unwrap();
    assert_eq!(layer.objects().len(), 1);
    assert_eq!(dictionary.presentation_size(), Some(Size::new(800.0, 600.0)));
    assert_eq!(diagnostics.summary(), Default::default());
}

#[test]
fn test_theme_pass_ignores_slides() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut themes = ThemeCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics));
    themes.start_slides();
    themes.start_page();
    themes.start_layer();
    line(&mut themes, Some("slide-line"), (0.0, 0.0), (1.0, 1.0));
    themes.end_layer();
    themes.collect_layer(Some("slide-layer"), false);
    themes.end_page();
    themes.end_slides();

    let dictionary = themes.into_dictionary();
    assert_eq!(dictionary.master_layer_count(), 0);
    assert!(dictionary.object(crate::model::ObjectKind::Line, "slide-line").is_none());
}

#[test]
fn test_master_reference_in_theme_is_misuse() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut themes = ThemeCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics));
    themes.start_themes();
    themes.start_page();
    themes.collect_layer(Some("other"), true);
    themes.end_page();
    themes.end_themes();

    assert_eq!(diagnostics.count(DiagnosticKind::ProtocolMisuse), 1);
}

#[test]
fn test_content_pass_draws_slide_over_master() {
    let diagnostics = Rc::new(Diagnostics::new());
    let dictionary = themes_with_master(&diagnostics);

    let mut painter = RecordingPainter::default();
    let pages = {
        let mut content = ContentCollector::new(dictionary, &MODERN, Rc::clone(&diagnostics), &mut painter);
        // The master slide is walked again but not drawn
        content.start_themes();
        content.start_page();
        content.start_layer();
        line(&mut content, None, (0.0, 0.0), (5.0, 5.0));
        content.end_layer();
        content.collect_layer(Some("master-layer"), false);
        content.end_page();
        content.end_themes();

        content.start_slides();
        content.start_page();
        content.collect_layer(Some("master-layer"), true);
        content.start_layer();
        line(&mut content, None, (1.0, 2.0), (3.0, 4.0));
        content.end_layer();
        content.collect_layer(Some("slide-layer"), false);
        content.end_page();
        content.end_slides();
        content.pages()
    };

    assert_eq!(pages, 1);
    assert_eq!(
        painter.calls,
        [
            "start_graphics(svg:width=800 svg:height=600)",
            "start_layer(draw:layer=master-layer)",
            "set_style",
            "draw_polyline(0 0, 5 5)",
            "end_layer",
            "start_layer(draw:layer=slide-layer)",
            "set_style",
            "draw_polyline(1 2, 3 4)",
            "end_layer",
            "end_graphics",
        ]
    );
}

#[test]
fn test_missing_master_is_reported() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content =
            ContentCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics), &mut painter);
        content.start_slides();
        content.start_page();
        content.collect_layer(Some("nowhere"), true);
        content.end_page();
        content.end_slides();
    }

    assert_eq!(diagnostics.count(DiagnosticKind::MissingReference), 1);
    // Default canvas of the modern dialect
    assert_eq!(painter.calls, ["start_graphics(svg:width=1024 svg:height=768)", "end_graphics"]);
}

#[test]
fn test_legacy_canvas_has_no_default() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content = ContentCollector::new(Dictionary::new(), &LEGACY, diagnostics, &mut painter);
        content.start_slides();
        content.start_page();
        content.end_page();
        content.end_slides();
    }
    assert_eq!(painter.calls[0], "start_graphics(svg:width=0 svg:height=0)");
}

#[test]
fn test_group_is_placed_by_its_geometry() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content =
            ContentCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics), &mut painter);
        content.start_slides();
        content.start_page();
        content.start_layer();
        content.start_group();
        line(&mut content, None, (0.0, 0.0), (5.0, 5.0));
        content.end_group();
        content.collect_geometry(None, Some(placed(10.0, 20.0, 5.0, 5.0)), false);
        content.collect_group(Some("group-1"), false);
        // A reference to the group draws it a second time
        content.collect_group(Some("group-1"), true);
        content.end_layer();
        content.collect_layer(None, false);
        content.end_page();
        content.end_slides();
    }

    assert_eq!(
        painter.calls_named("draw_polyline"),
        ["draw_polyline(10 20, 15 25)", "draw_polyline(10 20, 15 25)"]
    );
    assert_eq!(diagnostics.summary(), Default::default());
}

#[test]
fn test_text_uses_styles_of_the_current_stylesheet() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content =
            ContentCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics), &mut painter);
        content.start_slides();
        content.start_page();

        let mut props = PropertyMap::new();
        props.set(names::BOLD, true);
        content.collect_style(StyleKind::Character, Some("bold"), Style::new(StyleKind::Character, props));
        content.collect_stylesheet(Some("sheet"), None);

        content.start_layer();
        content.collect_geometry(None, Some(placed(0.0, 0.0, 200.0, 50.0)), false);
        content.start_text_layout(None);
        content.start_paragraph(None);
        content.collect_text(None, "Plain ");
        content.collect_text(Some("bold"), "strong");
        content.collect_tab();
        content.collect_text(Some("missing"), "end");
        content.end_paragraph();
        content.end_text_layout();
        content.collect_text_body(Some("body"), None, false);
        content.end_layer();
        content.collect_layer(None, false);
        content.end_page();
        content.end_slides();
    }

    assert_eq!(
        painter.calls_named("open_span"),
        ["open_span", "open_span(fo:font-weight=bold)", "open_span"]
    );
    assert_eq!(
        painter.calls_named("insert_"),
        ["insert_text(Plain )", "insert_text(strong)", "insert_tab", "insert_text(end)"]
    );
    assert_eq!(diagnostics.count(DiagnosticKind::MissingReference), 1);
}

fn layout_style(alignment: f64) -> Style {
    let mut props = PropertyMap::new();
    props.set(names::ALIGNMENT, alignment);
    Style::new(StyleKind::Layout, props)
}

#[test]
fn test_each_layout_keeps_its_style() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content =
            ContentCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics), &mut painter);
        content.start_slides();
        content.start_slide();
        content.collect_style(StyleKind::Layout, Some("center"), layout_style(2.0));
        content.collect_style(StyleKind::Layout, Some("end"), layout_style(1.0));
        content.collect_stylesheet(Some("sheet"), None);
        content.start_page();
        content.start_layer();
        content.collect_geometry(None, Some(placed(0.0, 0.0, 200.0, 100.0)), false);
        for (layout, text) in [("center", "Title"), ("end", "Signature")] {
            content.start_text_layout(Some(layout));
            content.start_paragraph(None);
            content.collect_text(None, text);
            content.end_paragraph();
            content.end_text_layout();
        }
        content.collect_text_body(Some("body"), None, false);
        content.end_layer();
        content.collect_layer(None, false);
        content.end_page();
        content.collect_page(Some("slide"));
        content.end_slides();
    }

    assert_eq!(
        painter.calls_named("open_paragraph"),
        ["open_paragraph(fo:text-align=center)", "open_paragraph(fo:text-align=end)"]
    );
    assert_eq!(painter.calls_named("start_text_object").len(), 1);
    assert_eq!(diagnostics.summary(), Default::default());
}

#[test]
fn test_slide_stylesheet_does_not_reach_next_slide() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content =
            ContentCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics), &mut painter);
        content.start_slides();

        // First slide: its own sheet defines "base" as bold
        content.start_slide();
        let mut props = PropertyMap::new();
        props.set(names::BOLD, true);
        content.collect_style(StyleKind::Character, Some("base"), Style::new(StyleKind::Character, props));
        content.collect_stylesheet(Some("slide-1-sheet"), None);
        content.start_page();
        content.end_page();
        content.collect_page(Some("slide-1"));

        // Second slide: no sheet, a style deriving from "base"
        content.start_slide();
        content.start_page();
        content.collect_style(
            StyleKind::Character,
            Some("child"),
            Style::new(StyleKind::Character, PropertyMap::new()).with_parent_ref(Some("base")),
        );
        content.start_layer();
        content.collect_geometry(None, Some(placed(0.0, 0.0, 100.0, 20.0)), false);
        content.start_text_layout(None);
        content.start_paragraph(None);
        content.collect_text(Some("child"), "plain");
        content.end_paragraph();
        content.end_text_layout();
        content.collect_text_body(None, None, false);
        content.end_layer();
        content.collect_layer(None, false);
        content.end_page();
        content.collect_page(Some("slide-2"));
        content.end_slides();
    }

    assert_eq!(painter.calls_named("open_span"), ["open_span"]);
}

#[test]
fn test_stylesheet_is_dropped_when_the_page_ends() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content =
            ContentCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics), &mut painter);
        content.start_slides();
        content.start_page();
        let mut props = PropertyMap::new();
        props.set(names::BOLD, true);
        content.collect_style(StyleKind::Character, Some("base"), Style::new(StyleKind::Character, props));
        content.collect_stylesheet(Some("sheet"), None);
        content.end_page();

        content.start_page();
        content.collect_style(
            StyleKind::Character,
            Some("child"),
            Style::new(StyleKind::Character, PropertyMap::new()).with_parent_ref(Some("base")),
        );
        content.start_layer();
        content.collect_geometry(None, Some(placed(0.0, 0.0, 100.0, 20.0)), false);
        content.start_text_layout(None);
        content.start_paragraph(None);
        content.collect_text(Some("child"), "plain");
        content.end_paragraph();
        content.end_text_layout();
        content.collect_text_body(None, None, false);
        content.end_layer();
        content.collect_layer(None, false);
        content.end_page();
        content.end_slides();
    }

    assert_eq!(painter.calls_named("open_span"), ["open_span"]);
}

#[test]
fn test_slots_do_not_leak_into_siblings() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut painter = RecordingPainter::default();
    {
        let mut content =
            ContentCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics), &mut painter);
        content.start_slides();
        content.start_page();
        content.start_layer();
        content.collect_rounded_rectangle_path(Size::new(10.0, 10.0), 0.0);
        content.collect_line(Some("line"), None, None, false);
        // The path above was consumed by the line capture
        content.collect_shape(Some("shape"), None);
        content.end_layer();
        content.collect_layer(None, false);
        content.end_page();
        content.end_slides();
    }

    assert_eq!(diagnostics.count(DiagnosticKind::Recovered), 2);
    assert_eq!(painter.calls, [
        "start_graphics(svg:width=1024 svg:height=768)",
        "start_layer",
        "end_layer",
        "end_graphics",
    ]);
}

#[test]
fn test_dictionary_survives_between_passes() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut themes = ThemeCollector::new(Dictionary::new(), &MODERN, Rc::clone(&diagnostics));
    themes.start_themes();
    let mut props = PropertyMap::new();
    props.set(names::OPACITY, 0.5);
    themes.collect_style(StyleKind::Graphic, Some("shared"), Style::new(StyleKind::Graphic, props));
    themes.collect_stylesheet(Some("theme-sheet"), None);
    themes.end_themes();

    let dictionary = themes.into_dictionary();
    assert!(dictionary.style(StyleKind::Graphic, "shared").is_some());
    assert!(dictionary.stylesheet("theme-sheet").is_some());
}

#[test]
#[should_panic(expected = "end_group without an open group")]
fn test_end_group_without_start_panics() {
    let mut themes = ThemeCollector::new(Dictionary::new(), &MODERN, Rc::new(Diagnostics::new()));
    themes.start_page();
    themes.start_layer();
    themes.end_group();
}

#[test]
#[should_panic(expected = "text collected outside a paragraph")]
fn test_text_outside_paragraph_panics() {
    let mut themes = ThemeCollector::new(Dictionary::new(), &MODERN, Rc::new(Diagnostics::new()));
    themes.start_text_layout(None);
    themes.collect_text(None, "stray");
}

#[test]
#[should_panic(expected = "end_page without start_page")]
fn test_unbalanced_page_panics() {
    let mut painter = RecordingPainter::default();
    let mut content =
        ContentCollector::new(Dictionary::new(), &MODERN, Rc::new(Diagnostics::new()), &mut painter);
    content.end_page();
}
