use notion_pages_core::error::RenderError;
use notion_pages_core::model::{Annotations, Color, NamedColor, RichText, RunKind};
use notion_pages_core::rich_text::{color_class, format_run, format_runs, plain_text};

fn styled(text: &str, annotations: Annotations) -> RichText {
    RichText::plain(text).with_annotations(annotations)
}

#[test]
fn plain_run_is_wrapped_in_span_without_class() {
    let html = format_run(&RichText::plain("hello")).unwrap();
    assert_eq!(html, "<span>hello</span>");
}

#[test]
fn angle_brackets_are_escaped() {
    let html = format_run(&RichText::plain("a <b> c")).unwrap();
    assert_eq!(html, "<span>a &lt;b&gt; c</span>");
}

#[test]
fn empty_text_yields_empty_markup() {
    assert_eq!(format_run(&RichText::plain("")).unwrap(), "");
    let bold = Annotations {
        bold: true,
        ..Annotations::default()
    };
    assert_eq!(format_run(&styled("", bold)).unwrap(), "");
}

#[test]
fn style_elements_nest_bold_outermost_strikethrough_innermost() {
    let all = Annotations {
        bold: true,
        italic: true,
        underline: true,
        strikethrough: true,
        ..Annotations::default()
    };
    let html = format_run(&styled("x", all)).unwrap();
    assert_eq!(html, "<span><b><i><u><del>x</del></u></i></b></span>");
}

#[test]
fn code_replaces_the_span_container() {
    let code = Annotations {
        code: true,
        italic: true,
        ..Annotations::default()
    };
    let html = format_run(&styled("let x", code)).unwrap();
    assert_eq!(html, "<code><i>let x</i></code>");
}

#[test]
fn foreground_and_background_colors_map_to_classes() {
    let red = Annotations {
        color: Color::Foreground(NamedColor::Red),
        ..Annotations::default()
    };
    assert_eq!(
        format_run(&styled("r", red)).unwrap(),
        r#"<span class="text-red-600">r</span>"#
    );

    let blue_bg = Annotations {
        color: Color::from("blue_background"),
        ..Annotations::default()
    };
    assert_eq!(
        format_run(&styled("b", blue_bg)).unwrap(),
        r#"<span class="bg-blue-100">b</span>"#
    );
}

#[test]
fn every_named_color_has_a_class() {
    for color in NamedColor::ALL {
        let class = color_class(&Color::Foreground(color)).unwrap().unwrap();
        assert_eq!(class, format!("text-{}-600", color.as_str()));
        let class = color_class(&Color::Background(color)).unwrap().unwrap();
        assert_eq!(class, format!("bg-{}-100", color.as_str()));
    }
    assert_eq!(color_class(&Color::Default).unwrap(), None);
}

#[test]
fn color_parsing_accepts_the_closed_vocabulary_only() {
    assert_eq!(Color::from("default"), Color::Default);
    assert_eq!(Color::from("pink"), Color::Foreground(NamedColor::Pink));
    assert_eq!(
        Color::from("gray_background"),
        Color::Background(NamedColor::Gray)
    );
    assert_eq!(
        Color::from("teal"),
        Color::Unrecognized("teal".to_string())
    );
    assert_eq!(
        Color::from("teal_background"),
        Color::Unrecognized("teal_background".to_string())
    );
}

#[test]
fn unknown_color_is_an_error() {
    let teal = Annotations {
        color: Color::from("teal"),
        ..Annotations::default()
    };
    let err = format_run(&styled("t", teal)).unwrap_err();
    assert!(matches!(err, RenderError::UnknownColorKind(ref c) if c == "teal"), "{err:?}");
}

#[test]
fn link_wraps_content_in_anchor_with_color() {
    let green = Annotations {
        bold: true,
        color: Color::Foreground(NamedColor::Green),
        ..Annotations::default()
    };
    let html = format_run(&styled("docs", green).with_link("https://example.com/?a=1&b=\"2\"")).unwrap();
    assert_eq!(
        html,
        r#"<a class="underline text-green-600" href="https://example.com/?a=1&amp;b=&quot;2&quot;"><b>docs</b></a>"#
    );
}

#[test]
fn code_link_puts_code_inside_anchor() {
    let code = Annotations {
        code: true,
        ..Annotations::default()
    };
    let html = format_run(&styled("fn", code).with_link("https://docs.rs")).unwrap();
    assert_eq!(
        html,
        r#"<a class="underline" href="https://docs.rs"><code>fn</code></a>"#
    );
}

#[test]
fn non_text_runs_are_rejected() {
    let mention = RichText {
        kind: RunKind::Unsupported("mention".to_string()),
        ..RichText::plain("@someone")
    };
    let err = format_run(&mention).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedRunKind(ref k) if k == "mention"), "{err:?}");

    let err = format_runs(&[RichText::plain("ok"), mention]).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedRunKind(_)));
}

#[test]
fn runs_are_concatenated_in_order_skipping_empty_ones() {
    let italic = Annotations {
        italic: true,
        ..Annotations::default()
    };
    let runs = vec![
        RichText::plain("one "),
        RichText::plain(""),
        styled("two", italic),
    ];
    assert_eq!(
        format_runs(&runs).unwrap(),
        "<span>one </span><span><i>two</i></span>"
    );
    assert_eq!(plain_text(&runs), "one two");
}

#[test]
fn bold_italic_nests_italic_inside_bold() {
    let both = Annotations {
        bold: true,
        italic: true,
        ..Annotations::default()
    };
    assert_eq!(
        format_run(&styled("x", both)).unwrap(),
        "<span><b><i>x</i></b></span>"
    );
}

#[test]
fn escaping_is_idempotent() {
    use notion_pages_core::markup::escape_text;

    assert_eq!(escape_text("a < b"), "a &lt; b");
    assert_eq!(escape_text("&lt;tag&gt;"), "&lt;tag&gt;");
    let once = escape_text("<x> & y");
    assert_eq!(escape_text(&once), once);
}
