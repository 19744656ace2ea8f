use std::rc::Rc;

use super::fixtures::{KEY1_DOC, KEY2_DOC};
use super::*;
use crate::collector::{ContentCollector, ThemeCollector};
use crate::common::{Deadline, DiagnosticKind, Diagnostics, Error};
use crate::model::{Dictionary, ObjectKind, StyleKind, defaults};
use crate::output::recorder::RecordingPainter;

fn xml(source: &str) -> MemoryStream {
    MemoryStream::from_slice(source.as_bytes())
}

/// Run the theme pass quietly, then the content pass, as a parse session does.
fn two_passes(version: Version, source: &str, diagnostics: &Rc<Diagnostics>) -> (RecordingPainter, usize) {
    let defaults = defaults::for_version(version);
    let mut context = ParseContext::new(diagnostics, Deadline::none(), usize::MAX);

    context.set_quiet(true);
    let mut themes = ThemeCollector::new(Dictionary::new(), defaults, Rc::clone(diagnostics));
    walk(version, xml(source), &mut themes, &mut context).unwrap();
    let dictionary = themes.into_dictionary();

    context.set_quiet(false);
    let mut painter = RecordingPainter::default();
    let pages = {
        let mut content = ContentCollector::new(dictionary, defaults, Rc::clone(diagnostics), &mut painter);
        walk(version, xml(source), &mut content, &mut context).unwrap();
        content.pages()
    };
    (painter, pages)
}

#[test]
fn test_theme_pass_fills_dictionary() {
    let diagnostics = Rc::new(Diagnostics::new());
    let mut context = ParseContext::new(&diagnostics, Deadline::none(), usize::MAX);
    let mut themes = ThemeCollector::new(Dictionary::new(), defaults::for_version(Version::V5), Rc::clone(&diagnostics));
    walk(Version::V5, xml(KEY2_DOC), &mut themes, &mut context).unwrap();

    let dictionary = themes.into_dictionary();
    assert_eq!(dictionary.master_layer_count(), 1);
    assert_eq!(dictionary.master_layer("master-layer").unwrap().objects().len(), 1);
    assert!(dictionary.style(StyleKind::Graphic, "gs-red").is_some());
    assert!(dictionary.style(StyleKind::Character, "cs-bold").is_some());
    assert!(dictionary.stylesheet("theme-sheet").is_some());
    // Slide content is not captured by the theme pass
    assert!(dictionary.object(ObjectKind::TextBody, "body").is_none());
    assert_eq!(diagnostics.summary(), Default::default());
}

#[test]
fn test_key2_content_pass() {
    let diagnostics = Rc::new(Diagnostics::new());
    let (painter, pages) = two_passes(Version::V5, KEY2_DOC, &diagnostics);

    assert_eq!(pages, 1);
    assert_eq!(painter.calls[0], "start_graphics(svg:width=800 svg:height=600)");
    assert_eq!(
        painter.calls_named("start_layer"),
        ["start_layer(draw:layer=master-layer)", "start_layer(draw:layer=content)"]
    );
    assert_eq!(painter.calls_named("draw_polyline"), ["draw_polyline(0 590, 800 590)"]);
    assert_eq!(painter.calls_named("draw_polygon"), ["draw_polygon(100 50, 110 50, 110 60)"]);
    assert!(
        painter
            .calls
            .contains(&"set_style(draw:fill=solid draw:fill-color=#FF0000)".to_string())
    );
    assert_eq!(
        painter.calls_named("start_text_object"),
        ["start_text_object(svg:x=50 svg:y=200 svg:width=400 svg:height=100)"]
    );
    assert_eq!(
        painter.calls_named("open_span"),
        ["open_span", "open_span(fo:font-weight=bold)"]
    );
    assert_eq!(painter.calls_named("insert_text"), ["insert_text(Hello )", "insert_text(world)"]);

    let image = painter.calls_named("draw_graphic_object");
    assert_eq!(image.len(), 1);
    assert!(image[0].contains("librevenge:mime-type=image/png"), "{}", image[0]);
    assert!(image[0].contains("xlink:href=photo.png"), "{}", image[0]);

    assert_eq!(painter.calls.last().map(String::as_str), Some("end_graphics"));
    assert_eq!(diagnostics.summary(), Default::default());
}

#[test]
fn test_key1_content_pass() {
    let diagnostics = Rc::new(Diagnostics::new());
    let (painter, pages) = two_passes(Version::V1, KEY1_DOC, &diagnostics);

    assert_eq!(pages, 1);
    assert_eq!(painter.calls[0], "start_graphics(svg:width=640 svg:height=480)");
    assert_eq!(
        painter.calls_named("start_layer"),
        ["start_layer(draw:layer=m1)", "start_layer(draw:layer=s1)"]
    );
    assert_eq!(painter.calls_named("draw_polygon"), ["draw_polygon(0 0, 640 0, 640 480)"]);
    assert!(painter.calls.contains(
        &"set_style(draw:fill=none draw:stroke=solid svg:stroke-color=#0000FF svg:stroke-width=2)".to_string()
    ));
    assert_eq!(painter.calls_named("draw_polyline"), ["draw_polyline(10 10, 20 20)"]);
    assert_eq!(
        painter.calls_named("open_span"),
        [
            "open_span(fo:font-size=18)",
            "open_span(fo:font-size=18 fo:font-weight=bold)",
            "open_span",
        ]
    );
    assert_eq!(
        painter.calls_named("insert_text"),
        ["insert_text(Legacy )", "insert_text(text)", "insert_text(First)"]
    );

    // The bullet level and the notes, reported once by the content pass
    assert_eq!(diagnostics.count(DiagnosticKind::UnhandledAttribute), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::UnhandledElement), 1);
    assert_eq!(diagnostics.summary().unknown(), 0);
}

#[test]
fn test_unknown_and_unhandled_are_told_apart() {
    let source = r#"<key:presentation xmlns:key="http://developer.apple.com/namespaces/keynote2"
        xmlns:sf="http://developer.apple.com/namespaces/sf"
        xmlns:sfa="http://developer.apple.com/namespaces/sfa"
        xmlns:x="urn:elsewhere" x:flavor="vanilla">
      <key:metadata><key:title/></key:metadata>
      <key:gadget/>
      <x:widget/>
      <key:slide-list>
        <key:slide sfa:ID="s" sf:angle="3"/>
      </key:slide-list>
    </key:presentation>"#;

    let diagnostics = Rc::new(Diagnostics::new());
    let mut context = ParseContext::new(&diagnostics, Deadline::none(), usize::MAX);
    let mut themes = ThemeCollector::new(Dictionary::new(), defaults::for_version(Version::V5), Rc::clone(&diagnostics));
    walk(Version::V5, xml(source), &mut themes, &mut context).unwrap();

    // key:metadata is in the vocabulary but not interpreted
    assert_eq!(diagnostics.count(DiagnosticKind::UnhandledElement), 1);
    // key:gadget and x:widget are outside the vocabulary
    assert_eq!(diagnostics.count(DiagnosticKind::UnknownElement), 2);
    // x:flavor is unknown; sf:angle is known but out of place
    assert_eq!(diagnostics.count(DiagnosticKind::UnknownAttribute), 1);
    assert_eq!(diagnostics.count(DiagnosticKind::UnhandledAttribute), 1);
}

#[test]
fn test_quiet_context_drops_walker_reports() {
    let source = r#"<presentation xmlns="http://developer.apple.com/schemas/APXL"><mystery/></presentation>"#;
    let diagnostics = Rc::new(Diagnostics::new());
    let mut context = ParseContext::new(&diagnostics, Deadline::none(), usize::MAX);
    context.set_quiet(true);
    let mut themes = ThemeCollector::new(Dictionary::new(), defaults::for_version(Version::V1), Rc::clone(&diagnostics));
    walk(Version::V1, xml(source), &mut themes, &mut context).unwrap();
    assert_eq!(diagnostics.summary(), Default::default());

    context.set_quiet(false);
    walk(Version::V1, xml(source), &mut themes, &mut context).unwrap();
    assert_eq!(diagnostics.count(DiagnosticKind::UnknownElement), 1);
}

#[test]
fn test_bad_numbers_are_recovered() {
    let source = r#"<key:presentation xmlns:key="http://developer.apple.com/namespaces/keynote2"
        xmlns:sfa="http://developer.apple.com/namespaces/sfa">
      <key:size sfa:w="wide" sfa:h="600"/>
    </key:presentation>"#;
    let diagnostics = Rc::new(Diagnostics::new());
    let mut context = ParseContext::new(&diagnostics, Deadline::none(), usize::MAX);
    let mut themes = ThemeCollector::new(Dictionary::new(), defaults::for_version(Version::V5), Rc::clone(&diagnostics));
    walk(Version::V5, xml(source), &mut themes, &mut context).unwrap();

    assert_eq!(diagnostics.count(DiagnosticKind::Recovered), 1);
    assert_eq!(themes.into_dictionary().presentation_size(), None);
}

#[test]
fn test_wrong_root_is_an_error() {
    let diagnostics = Diagnostics::new();
    let mut context = ParseContext::new(&diagnostics, Deadline::none(), usize::MAX);
    let mut themes = ThemeCollector::new(Dictionary::new(), defaults::for_version(Version::V5), Rc::new(Diagnostics::new()));

    let source = r#"<key:slide xmlns:key="http://developer.apple.com/namespaces/keynote2"/>"#;
    let result = walk(Version::V5, xml(source), &mut themes, &mut context);
    assert!(matches!(result, Err(Error::InvalidFormat(_))));

    let truncated = r#"<presentation xmlns="http://developer.apple.com/schemas/APXL"><slide-list><slide>"#;
    assert!(walk(Version::V1, xml(truncated), &mut themes, &mut context).is_err());
}

#[cfg(feature = "zip")]
#[test]
fn test_members_are_read_once() {
    use crate::stream::ZipStream;
    use crate::stream::zip::build_zip;

    let diagnostics = Diagnostics::new();
    let archive = build_zip(&[("photo.png", b"\x89PNG\r\n\x1a\n".as_slice())]);
    let mut package = ZipStream::new(MemoryStream::new(archive), usize::MAX).unwrap();
    let mut context = ParseContext::new(&diagnostics, Deadline::none(), usize::MAX)
        .with_container(Some(&mut package));

    let first = context.load_member("photo.png").unwrap();
    let second = context.load_member("photo.png").unwrap();
    assert!(Rc::ptr_eq(&first, &second));

    assert!(context.load_member("missing.png").is_none());
    assert!(context.load_member("missing.png").is_none());
    assert_eq!(diagnostics.count(DiagnosticKind::Recovered), 2);
}
