use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use pricescope::form::rules::password_strength;
use pricescope::notice::{NoticeCenter, NoticePhase, Severity};
use pricescope::suggest::Suggestion;
use pricescope::ui::components::theme::ThemePalette;
use pricescope::ui::components::widgets::{
    history_panel, notice_lines, search_bar, strength_meter, suggestion_list,
};

fn render_to_string(widget: impl Widget, width: u16, height: u16) -> String {
    let rect = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(rect);
    widget.render(rect, &mut buf);
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<Vec<_>>()
                .join("")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn search_bar_shows_query_and_key_tips() {
    let palette = ThemePalette::dark();
    let rendered = render_to_string(search_bar("iphone", palette, true), 100, 4);
    assert!(rendered.contains("/ iphone"));
    assert!(rendered.contains("Enter"));
    assert!(rendered.contains("F2"));
    assert!(rendered.contains("price alert"));
    assert!(rendered.contains("Esc"));
}

#[test]
fn suggestion_list_renders_labels_in_order() {
    let palette = ThemePalette::light();
    let suggestions = vec![
        Suggestion { label: "iPhone 15".into() },
        Suggestion { label: "Watch Apple".into() },
    ];
    let rendered = render_to_string(suggestion_list(&suggestions, Some(1), palette), 40, 4);
    let iphone = rendered.find("iPhone 15").expect("first entry rendered");
    let watch = rendered.find("Watch Apple").expect("second entry rendered");
    assert!(iphone < watch, "corpus order preserved in the dropdown");
}

#[test]
fn notice_lines_skip_queued_notices() {
    let palette = ThemePalette::dark();
    let mut center = NoticeCenter::new();
    center.push("first", Severity::Success);
    center.push("second", Severity::Error);
    center.advance(0); // first enters; second still queued

    let notices = center.notices();
    assert_eq!(notices[0].phase, NoticePhase::Entering);
    assert_eq!(notices[1].phase, NoticePhase::Created);

    let lines = notice_lines(notices, palette);
    assert_eq!(lines.len(), 1, "queued notices are not rendered");
    let text: String = lines[0].spans.iter().map(|s| s.content.clone()).collect();
    assert!(text.contains("first"));
}

#[test]
fn strength_meter_fills_segments_by_score() {
    let palette = ThemePalette::dark();
    let strong = strength_meter(&password_strength("Aa1!aaaa"), palette);
    let text: String = strong.spans.iter().map(|s| s.content.clone()).collect();
    assert!(text.contains("■■■■■"));
    assert!(text.contains("Strong"));

    let empty = strength_meter(&password_strength(""), palette);
    let text: String = empty.spans.iter().map(|s| s.content.clone()).collect();
    assert!(text.contains("□□□□□"));
    assert!(text.contains("Enter password"));
}

#[test]
fn history_panel_lists_entries_or_placeholder() {
    let palette = ThemePalette::dark();
    let rendered = render_to_string(history_panel(&[], palette), 40, 4);
    assert!(rendered.contains("No searches yet"));

    let entries = vec!["iPhone 15".to_string(), "Milk Amul".to_string()];
    let rendered = render_to_string(history_panel(&entries, palette), 40, 5);
    assert!(rendered.contains("1. iPhone 15"));
    assert!(rendered.contains("2. Milk Amul"));
}
