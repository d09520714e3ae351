//! Ratatui host wiring the interaction core to a terminal.
//!
//! The host owns the page structure: it feeds key events into the debounced
//! input and the alert form, advances the virtual timelines by wall-clock
//! milliseconds, and renders whatever state the components expose.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::form::presenter::FieldErrorPresenter;
use crate::form::rules::{password_strength, FieldRule};
use crate::form::{FieldSpec, FormValidator};
use crate::history::{HistoryStore, JsonFileStore, KeyValueStore};
use crate::notice::NoticeCenter;
use crate::suggest::debounce::{DebouncedInput, InputEffect};
use crate::suggest::SuggestionProvider;
use crate::ui::components::theme::ThemePalette;
use crate::ui::components::widgets::{
    form_field, history_panel, notice_lines, search_bar, strength_meter, suggestion_list,
};

const SUGGESTION_LIMIT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Search,
    AlertForm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormField {
    Product,
    Email,
    Password,
}

impl FormField {
    fn name(self) -> &'static str {
        match self {
            FormField::Product => "product",
            FormField::Email => "email",
            FormField::Password => "password",
        }
    }

    fn label(self) -> &'static str {
        match self {
            FormField::Product => "Product name",
            FormField::Email => "Email",
            FormField::Password => "Password",
        }
    }

    fn next(self) -> Self {
        match self {
            FormField::Product => FormField::Email,
            FormField::Email => FormField::Password,
            FormField::Password => FormField::Product,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Product => FormField::Password,
            FormField::Email => FormField::Product,
            FormField::Password => FormField::Email,
        }
    }
}

const FORM_FIELDS: [FormField; 3] = [FormField::Product, FormField::Email, FormField::Password];

/// Price-alert form state. Validation rules live in [`alert_form_validator`].
#[derive(Debug)]
struct AlertForm {
    product: String,
    email: String,
    password: String,
    focus: FormField,
}

impl Default for AlertForm {
    fn default() -> Self {
        Self {
            product: String::new(),
            email: String::new(),
            password: String::new(),
            focus: FormField::Product,
        }
    }
}

impl AlertForm {
    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Product => &self.product,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Product => &mut self.product,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        }
    }

    fn value_by_name(&self, name: &str) -> &str {
        FORM_FIELDS
            .iter()
            .find(|f| f.name() == name)
            .map(|f| self.value(*f))
            .unwrap_or("")
    }
}

/// Product is mandatory, email is mandatory and well-formed, password is
/// length-checked plus an advisory strength grade.
fn alert_form_validator() -> FormValidator {
    FormValidator::new(vec![
        FieldSpec::new(FormField::Product.name(), vec![FieldRule::Required]),
        FieldSpec::new(
            FormField::Email.name(),
            vec![FieldRule::Required, FieldRule::Email],
        ),
        FieldSpec::new(FormField::Password.name(), vec![FieldRule::MinLength(8)]),
    ])
}

/// One row of the demo catalog.
struct CatalogEntry {
    name: &'static str,
    store: &'static str,
    price: f64,
}

/// Static demo catalog: the suggestion corpus with representative prices.
fn catalog() -> &'static [CatalogEntry] {
    static ENTRIES: [CatalogEntry; 12] = [
        CatalogEntry { name: "iPhone 15", store: "TechMart", price: 799.00 },
        CatalogEntry { name: "Samsung Galaxy", store: "TechMart", price: 699.00 },
        CatalogEntry { name: "Nike shoes", store: "SportHub", price: 89.99 },
        CatalogEntry { name: "Adidas sneakers", store: "SportHub", price: 74.99 },
        CatalogEntry { name: "Laptop Dell", store: "CompuStore", price: 649.00 },
        CatalogEntry { name: "MacBook Pro", store: "CompuStore", price: 1599.00 },
        CatalogEntry { name: "Milk Amul", store: "FreshMart", price: 1.20 },
        CatalogEntry { name: "Bread Britannia", store: "FreshMart", price: 0.90 },
        CatalogEntry { name: "Jeans Levi's", store: "StyleBay", price: 59.99 },
        CatalogEntry { name: "T-shirt Nike", store: "StyleBay", price: 24.99 },
        CatalogEntry { name: "Headphones Sony", store: "TechMart", price: 129.00 },
        CatalogEntry { name: "Watch Apple", store: "TechMart", price: 399.00 },
    ];
    &ENTRIES
}

/// Case-insensitive containment over the catalog, corpus order preserved.
fn search_catalog(query: &str) -> Vec<&'static CatalogEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog()
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// Persisted, non-secret UI preferences.
#[derive(Serialize, Deserialize, Default)]
struct UiStatePersisted {
    theme_dark: Option<bool>,
}

const UI_STATE_KEY: &str = "ui_state";

fn load_ui_state(store: &impl KeyValueStore) -> UiStatePersisted {
    store
        .get(UI_STATE_KEY)
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn save_ui_state(store: &mut impl KeyValueStore, state: &UiStatePersisted) {
    if let Ok(body) = serde_json::to_string(state) {
        store.set(UI_STATE_KEY, &body);
    }
}

/// Records the query, runs the catalog search, and raises a result notice.
fn run_search(
    query: &str,
    history: &mut HistoryStore<JsonFileStore>,
    notices: &mut NoticeCenter,
) -> Vec<&'static CatalogEntry> {
    history.record(query);
    let hits = search_catalog(query);
    if hits.is_empty() {
        notices.info(format!("No matches for \"{}\"", query.trim()));
    } else {
        notices.success(format!(
            "Found {} match{} for \"{}\"",
            hits.len(),
            if hits.len() == 1 { "" } else { "es" },
            query.trim()
        ));
    }
    tracing::debug!(query, hits = hits.len(), "search");
    hits
}

pub fn run_tui(data_dir: PathBuf) -> Result<()> {
    setup_terminal()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let result = event_loop(&mut terminal, data_dir);
    teardown_terminal()?;
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, data_dir: PathBuf) -> Result<()> {
    let provider = SuggestionProvider::default_catalog();
    let mut history = HistoryStore::new(JsonFileStore::new(data_dir.clone()));
    let mut ui_store = JsonFileStore::new(data_dir);
    let mut theme_dark = load_ui_state(&ui_store).theme_dark.unwrap_or(true);

    let mut input = DebouncedInput::new();
    let mut notices = NoticeCenter::new();
    let validator = alert_form_validator();
    let mut presenter = FieldErrorPresenter::new();
    let mut form = AlertForm::default();

    let mut screen = Screen::Search;
    let mut query = String::new();
    let mut results: Vec<&'static CatalogEntry> = Vec::new();
    let mut suggestion_idx: Option<usize> = None;
    let mut status = "Type to search the catalog".to_string();

    let tick_rate = Duration::from_millis(30);
    let mut last_tick = Instant::now();
    let mut needs_draw = true;

    loop {
        // Advance virtual time by elapsed wall-clock milliseconds.
        let elapsed_ms = last_tick.elapsed().as_millis() as u64;
        if elapsed_ms > 0 {
            last_tick += Duration::from_millis(elapsed_ms);
            let had_notices = !notices.is_empty();
            for effect in input.advance(elapsed_ms, &provider, SUGGESTION_LIMIT) {
                match effect {
                    InputEffect::Show(_) | InputEffect::Hide => {
                        suggestion_idx = None;
                        needs_draw = true;
                    }
                    InputEffect::Submit(q) => {
                        query = q;
                        results = run_search(&query, &mut history, &mut notices);
                        needs_draw = true;
                    }
                }
            }
            notices.advance(elapsed_ms);
            if had_notices || !notices.is_empty() {
                needs_draw = true;
            }
        }

        if needs_draw {
            let palette = if theme_dark {
                ThemePalette::dark()
            } else {
                ThemePalette::light()
            };
            terminal.draw(|f| {
                draw(
                    f,
                    palette,
                    screen,
                    &query,
                    &input,
                    suggestion_idx,
                    &results,
                    &form,
                    &presenter,
                    &notices,
                    &history.all(),
                    &status,
                );
            })?;
            needs_draw = false;
        }

        // Wake for the nearest scheduled transition, or the tick rate.
        let next = [input.next_deadline(), notices.next_deadline()]
            .into_iter()
            .flatten()
            .min()
            .map(Duration::from_millis)
            .unwrap_or(tick_rate)
            .min(tick_rate);

        if !event::poll(next)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            needs_draw = true;
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        needs_draw = true;

        // Keys shared by both screens.
        match key.code {
            KeyCode::F(9) => {
                if let Some(notice) = notices.notices().first() {
                    let id = notice.id;
                    notices.dismiss(id);
                }
                continue;
            }
            KeyCode::F(12) => {
                theme_dark = !theme_dark;
                save_ui_state(&mut ui_store, &UiStatePersisted { theme_dark: Some(theme_dark) });
                continue;
            }
            _ => {}
        }

        match screen {
            Screen::Search => match key.code {
                KeyCode::Esc => break,
                KeyCode::F(2) => {
                    input.blur();
                    screen = Screen::AlertForm;
                    status = "Price alert: Tab next field, Enter save, Esc back".to_string();
                }
                KeyCode::Down => {
                    let count = input.suggestions().len();
                    if count > 0 {
                        suggestion_idx = Some(suggestion_idx.map_or(0, |i| (i + 1) % count));
                    }
                }
                KeyCode::Up => {
                    let count = input.suggestions().len();
                    if count > 0 {
                        suggestion_idx =
                            Some(suggestion_idx.map_or(count - 1, |i| (i + count - 1) % count));
                    }
                }
                KeyCode::Enter => {
                    if let Some(i) = suggestion_idx {
                        if let Some(InputEffect::Submit(q)) = input.select(i) {
                            query = q;
                            results = run_search(&query, &mut history, &mut notices);
                            status = format!("{} result(s)", results.len());
                        }
                        suggestion_idx = None;
                    } else if query.trim().is_empty() {
                        notices.error("Please enter a search term");
                    } else {
                        results = run_search(&query, &mut history, &mut notices);
                        status = format!("{} result(s)", results.len());
                        // Submission moves focus off the input; the dropdown
                        // goes away after the usual grace period.
                        input.blur();
                    }
                }
                KeyCode::Backspace => {
                    query.pop();
                    input.keystroke(query.clone());
                    suggestion_idx = None;
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    query.push(c);
                    input.keystroke(query.clone());
                    suggestion_idx = None;
                }
                _ => {}
            },
            Screen::AlertForm => match key.code {
                KeyCode::Esc => {
                    screen = Screen::Search;
                    input.focus();
                    status = "Type to search the catalog".to_string();
                }
                KeyCode::Tab | KeyCode::Down => {
                    let field = form.focus;
                    validator.check_into(field.name(), form.value(field), &mut presenter);
                    form.focus = field.next();
                }
                KeyCode::BackTab | KeyCode::Up => {
                    let field = form.focus;
                    validator.check_into(field.name(), form.value(field), &mut presenter);
                    form.focus = field.prev();
                }
                KeyCode::Enter => {
                    let ok = validator.run(|name| form.value_by_name(name), &mut presenter);
                    if ok {
                        notices.success(format!("Price alert saved for {}", form.product.trim()));
                        tracing::debug!(product = %form.product, "alert_saved");
                        form = AlertForm::default();
                        screen = Screen::Search;
                        input.focus();
                    } else {
                        notices.error("Please fix the highlighted fields");
                    }
                }
                KeyCode::Backspace => {
                    form.value_mut(form.focus).pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.value_mut(form.focus).push(c);
                }
                _ => {}
            },
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw(
    f: &mut Frame,
    palette: ThemePalette,
    screen: Screen,
    query: &str,
    input: &DebouncedInput,
    suggestion_idx: Option<usize>,
    results: &[&'static CatalogEntry],
    form: &AlertForm,
    presenter: &FieldErrorPresenter,
    notices: &NoticeCenter,
    history: &[String],
    status: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(search_bar(query, palette, screen == Screen::Search), chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    match screen {
        Screen::Search => draw_results(f, body[0], results, palette),
        Screen::AlertForm => draw_form(f, body[0], form, presenter, palette),
    }
    f.render_widget(history_panel(history, palette), body[1]);

    f.render_widget(Paragraph::new(Span::styled(status.to_string(), Style::default().fg(palette.hint))), chunks[2]);

    // Dropdown overlays the body, anchored under the search bar.
    let suggestions = input.suggestions();
    if screen == Screen::Search && !suggestions.is_empty() {
        let height = (suggestions.len() as u16 + 1).min(chunks[1].height);
        let area = Rect {
            x: chunks[0].x + 1,
            y: chunks[0].y + chunks[0].height - 1,
            width: chunks[0].width.saturating_sub(2).min(40),
            height,
        };
        f.render_widget(Clear, area);
        f.render_widget(suggestion_list(suggestions, suggestion_idx, palette), area);
    }

    // Notices stack in the top-right corner.
    let lines = notice_lines(notices.notices(), palette);
    if !lines.is_empty() {
        let width = 42.min(f.area().width);
        let height = (lines.len() as u16).min(f.area().height.saturating_sub(1));
        let area = Rect {
            x: f.area().width.saturating_sub(width),
            y: 1,
            width,
            height,
        };
        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Right), area);
    }
}

fn draw_results(f: &mut Frame, area: Rect, results: &[&'static CatalogEntry], palette: ThemePalette) {
    let items: Vec<ListItem> = if results.is_empty() {
        vec![ListItem::new(Span::styled(
            "Search the catalog to compare prices",
            Style::default().fg(palette.hint),
        ))]
    } else {
        results
            .iter()
            .map(|e| {
                ListItem::new(Line::from(vec![
                    Span::styled(e.name, Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", e.store), Style::default().fg(palette.hint)),
                    Span::styled(format!("  ${:.2}", e.price), Style::default().fg(palette.accent)),
                ]))
            })
            .collect()
    };
    let list = List::new(items).block(
        Block::default()
            .title(Span::styled("Results", palette.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.hint)),
    );
    f.render_widget(list, area);
}

fn draw_form(
    f: &mut Frame,
    area: Rect,
    form: &AlertForm,
    presenter: &FieldErrorPresenter,
    palette: ThemePalette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    for (i, field) in FORM_FIELDS.iter().enumerate() {
        f.render_widget(
            form_field(
                field.label(),
                form.value(*field),
                form.focus == *field,
                presenter.message(field.name()),
                palette,
                *field == FormField::Password,
            ),
            rows[i],
        );
    }
    f.render_widget(
        Paragraph::new(strength_meter(&password_strength(&form.password), palette)),
        rows[3],
    );
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

fn teardown_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryStore;

    #[test]
    fn catalog_search_is_case_insensitive_and_ordered() {
        let hits = search_catalog("NIKE");
        let names: Vec<&str> = hits.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Nike shoes", "T-shirt Nike"]);
        assert!(search_catalog("  ").is_empty());
    }

    #[test]
    fn form_focus_cycles_through_all_fields() {
        let mut field = FormField::Product;
        for expected in [FormField::Email, FormField::Password, FormField::Product] {
            field = field.next();
            assert_eq!(field, expected);
        }
        assert_eq!(FormField::Product.prev(), FormField::Password);
    }

    #[test]
    fn alert_form_rules_match_fields() {
        let validator = alert_form_validator();
        assert!(!validator.check_field("product", " ").valid);
        assert!(!validator.check_field("email", "nope").valid);
        assert!(!validator.check_field("password", "short").valid);
        assert!(validator.check_field("password", "long enough").valid);
    }

    #[test]
    fn ui_state_roundtrips_through_the_store() {
        let mut store = MemoryStore::new();
        save_ui_state(&mut store, &UiStatePersisted { theme_dark: Some(false) });
        assert_eq!(load_ui_state(&store).theme_dark, Some(false));
    }

    #[test]
    fn ui_state_fails_open_on_garbage() {
        let mut store = MemoryStore::new();
        store.set(UI_STATE_KEY, "not-json");
        assert!(load_ui_state(&store).theme_dark.is_none());
    }
}
