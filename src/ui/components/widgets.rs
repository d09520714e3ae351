//! Pure widget builders, testable by rendering into a `Buffer`.

use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::form::rules::PasswordStrength;
use crate::notice::{Notice, NoticePhase, Severity};
use crate::suggest::Suggestion;
use crate::ui::components::theme::ThemePalette;

/// Top search bar with cursor and key tips.
pub fn search_bar(query: &str, palette: ThemePalette, focused: bool) -> Paragraph<'static> {
    let style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.hint)
    };
    let cursor = if focused { "▎" } else { "" };
    let first_line = Line::from(Span::styled(format!("/ {query}{cursor}"), style));

    let tips_line = Line::from(vec![
        Span::styled("Enter", Style::default().fg(palette.accent)),
        Span::raw(" search  "),
        Span::styled("↑/↓", Style::default().fg(palette.hint)),
        Span::raw(" suggestions  "),
        Span::styled("F2", Style::default().fg(palette.hint)),
        Span::raw(" price alert  "),
        Span::styled("F9", Style::default().fg(palette.hint)),
        Span::raw(" dismiss notice  "),
        Span::styled("Esc", Style::default().fg(palette.hint)),
        Span::raw(" quit"),
    ]);

    Paragraph::new(vec![first_line, tips_line])
        .block(
            Block::default()
                .title(Span::styled("Search", palette.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused {
                    palette.accent
                } else {
                    palette.hint
                })),
        )
        .alignment(Alignment::Left)
}

/// Suggestion dropdown rendered under the search bar.
pub fn suggestion_list(
    suggestions: &[Suggestion],
    selected: Option<usize>,
    palette: ThemePalette,
) -> List<'static> {
    let items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let style = if selected == Some(i) {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(Span::styled(s.label.clone(), style))
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(Style::default().fg(palette.accent_alt)),
    )
}

/// One stacked line per live notice. Queued notices stay invisible; entering
/// and exiting ones render dimmed so the animation reads at terminal fidelity.
pub fn notice_lines(notices: &[Notice], palette: ThemePalette) -> Vec<Line<'static>> {
    notices
        .iter()
        .filter(|n| n.phase != NoticePhase::Created)
        .map(|n| {
            let color = palette.severity(n.severity);
            let style = match n.phase {
                NoticePhase::Visible => Style::default().fg(color).add_modifier(Modifier::BOLD),
                _ => Style::default().fg(color).add_modifier(Modifier::DIM),
            };
            let marker = match n.phase {
                NoticePhase::Exiting => "· ",
                _ => "▪ ",
            };
            Line::from(Span::styled(format!("{marker}{}", n.message), style))
        })
        .collect()
}

/// Password strength meter: five segments plus the label/feedback summary.
pub fn strength_meter(strength: &PasswordStrength, palette: ThemePalette) -> Line<'static> {
    let color = palette.strength(strength.score);
    let filled = usize::from(strength.score);
    Line::from(vec![
        Span::styled("■".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "□".repeat(5 - filled),
            Style::default().fg(palette.hint).add_modifier(Modifier::DIM),
        ),
        Span::raw(" "),
        Span::styled(strength.summary(), Style::default().fg(color)),
    ])
}

/// A labelled form field with its value and, when errored, the annotation.
pub fn form_field(
    label: &str,
    value: &str,
    focused: bool,
    error: Option<&str>,
    palette: ThemePalette,
    mask: bool,
) -> Paragraph<'static> {
    let border = if error.is_some() {
        Style::default().fg(palette.severity(Severity::Error))
    } else if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.hint)
    };

    let shown: String = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let cursor = if focused { "▎" } else { "" };
    let mut lines = vec![Line::from(Span::styled(
        format!("{shown}{cursor}"),
        Style::default().fg(palette.fg),
    ))];
    if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.severity(Severity::Error)),
        )));
    }

    Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(label.to_string(), palette.title()))
            .borders(Borders::ALL)
            .border_style(border),
    )
}

/// Recent searches side panel.
pub fn history_panel(entries: &[String], palette: ThemePalette) -> List<'static> {
    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new(Span::styled(
            "No searches yet",
            Style::default().fg(palette.hint).add_modifier(Modifier::DIM),
        ))]
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(i, q)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(palette.hint)),
                    Span::styled(q.clone(), Style::default().fg(palette.fg)),
                ]))
            })
            .collect()
    };

    List::new(items).block(
        Block::default()
            .title(Span::styled("Recent searches", palette.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.hint)),
    )
}
