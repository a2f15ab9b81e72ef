// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod text;

pub use text::{
    dataset_caption, format_chart, format_table, render_section_text, render_view_text,
    tab_strip_text,
};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    BarChart, Block, Borders, Cell, Clear, Gauge, List, ListItem, ListState, Paragraph, Row,
    Table, Tabs, Wrap,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tweetscope_app::{
    AppCommand, AppEvent, AppState, ChartKind, ChartSpec, ContentProvider, Focus,
    MenuDefinition, RenderedView, RouterCommand, RouterEvent, Section, SectionBody, TableData,
    TweetClass, format_percent,
};
use unicode_width::UnicodeWidthStr;

const SIDEBAR_WIDTH: u16 = 32;
const PAGE_SCROLL: i32 = 10;
const MAX_COLUMN_WIDTH: usize = 40;
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub show_icons: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self { show_icons: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Scroll(i32),
    App(AppCommand),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    rendered: Option<RenderedView>,
    scroll: u16,
    status_token: u64,
}

pub fn run_app<P: ContentProvider>(
    state: &mut AppState,
    provider: &mut P,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    refresh_view_data(state, provider, &mut view_data);

    let result = event_loop(
        &mut terminal,
        state,
        provider,
        options,
        &mut view_data,
        (&internal_tx, &internal_rx),
    );

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<P: ContentProvider>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    provider: &mut P,
    options: UiOptions,
    view_data: &mut ViewData,
    (internal_tx, internal_rx): (&Sender<InternalEvent>, &Receiver<InternalEvent>),
) -> Result<()> {
    loop {
        process_internal_events(state, view_data, internal_rx);

        terminal
            .draw(|frame| render(frame, state, view_data, options))
            .context("draw frame")?;

        if event::poll(Duration::from_millis(120)).context("poll event")? {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, provider, view_data, internal_tx, key) {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Re-renders the current view. Every call asks the provider again, so a
/// refresh picks up changed files.
fn refresh_view_data<P: ContentProvider + ?Sized>(
    state: &AppState,
    provider: &mut P,
    view_data: &mut ViewData,
) {
    let rendered = state.router.current().render(provider);
    tracing::info!(
        view = %rendered.descriptor.view,
        sections = rendered.sections.len(),
        failed = rendered.failed_sections().count(),
        "view rendered"
    );
    view_data.rendered = Some(rendered);
    view_data.scroll = 0;
}

fn handle_key_event<P: ContentProvider + ?Sized>(
    state: &mut AppState,
    provider: &mut P,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            state.dispatch(AppCommand::ToggleHelp);
        }
        return false;
    }

    let Some(action) = action_for_key(state, key) else {
        return false;
    };
    match action {
        KeyAction::Quit => true,
        KeyAction::Scroll(delta) => {
            view_data.scroll = view_data.scroll.saturating_add_signed(delta as i16);
            false
        }
        KeyAction::App(command) => {
            let events = state.dispatch(command);
            apply_events(state, provider, view_data, internal_tx, &events);
            false
        }
    }
}

fn apply_events<P: ContentProvider + ?Sized>(
    state: &mut AppState,
    provider: &mut P,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: &[AppEvent],
) {
    let mut rerender = false;
    let mut refreshed = false;
    for event in events {
        match event {
            AppEvent::Routed(RouterEvent::Refreshed(_)) => {
                rerender = true;
                refreshed = true;
            }
            AppEvent::Routed(_) => rerender = true,
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
            }
            AppEvent::FocusChanged(_) | AppEvent::HelpToggled(_) | AppEvent::StatusCleared => {}
        }
    }

    if rerender {
        refresh_view_data(state, provider, view_data);
    }
    if refreshed {
        let failed = view_data
            .rendered
            .as_ref()
            .map(|view| view.failed_sections().count())
            .unwrap_or(0);
        let message = if failed == 0 {
            "refreshed".to_owned()
        } else {
            format!("refreshed; {failed} section(s) unavailable")
        };
        emit_status(state, view_data, internal_tx, message);
    } else if state.status_line.is_some() {
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn action_for_key(state: &AppState, key: KeyEvent) -> Option<KeyAction> {
    let content_focused = state.focus == Focus::Content;
    let route = |command| Some(KeyAction::App(AppCommand::Route(command)));
    match key.code {
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Esc if content_focused => Some(KeyAction::App(AppCommand::ToggleFocus)),
        KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('?') => Some(KeyAction::App(AppCommand::ToggleHelp)),
        KeyCode::Enter => Some(KeyAction::App(AppCommand::ToggleFocus)),
        KeyCode::Char('j') | KeyCode::Down if content_focused => Some(KeyAction::Scroll(1)),
        KeyCode::Char('k') | KeyCode::Up if content_focused => Some(KeyAction::Scroll(-1)),
        KeyCode::Char('j') | KeyCode::Down => route(RouterCommand::NextView),
        KeyCode::Char('k') | KeyCode::Up => route(RouterCommand::PrevView),
        KeyCode::PageDown => Some(KeyAction::Scroll(PAGE_SCROLL)),
        KeyCode::PageUp => Some(KeyAction::Scroll(-PAGE_SCROLL)),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => route(RouterCommand::NextTab),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => route(RouterCommand::PrevTab),
        KeyCode::Char('r') => route(RouterCommand::Refresh),
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            let entry = state.router.menu().entries().get(index)?;
            route(RouterCommand::Select(entry.key.clone()))
        }
        _ => None,
    }
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "house" => "⌂",
        "table" => "▦",
        "bar-chart" => "▇",
        "funnel" => "▽",
        "info" => "ⓘ",
        "envelope" => "✉",
        "cast" => "◉",
        _ => "•",
    }
}

fn sidebar_title(menu: &MenuDefinition, show_icons: bool) -> String {
    match menu.icon() {
        Some(icon) if show_icons => format!("{} {}", icon_glyph(icon), menu.title()),
        _ => menu.title().to_owned(),
    }
}

fn sidebar_labels(menu: &MenuDefinition, show_icons: bool) -> Vec<String> {
    menu.entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let number = index + 1;
            match entry.icon.as_deref() {
                Some(icon) if show_icons => {
                    format!("{number} {} {}", icon_glyph(icon), entry.label)
                }
                _ => format!("{number} {}", entry.label),
            }
        })
        .collect()
}

fn status_text(state: &AppState) -> String {
    let focus = match state.focus {
        Focus::Sidebar => "MENU",
        Focus::Content => "PAGE",
    };
    let default = match state.focus {
        Focus::Sidebar => "j/k view | h/l tab | 1-9 jump | enter page | r refresh | ? help | q quit",
        Focus::Content => "j/k scroll | pgup/pgdn | h/l tab | esc menu | r refresh | ? help | q quit",
    };
    match &state.status_line {
        Some(status) => format!("{focus} | {status} | {default}"),
        None => format!("{focus} | {default}"),
    }
}

fn help_overlay_text() -> &'static str {
    "menu: j/k or up/down previous/next view | 1-9 jump to view | enter focus page\n\
page: j/k or up/down scroll | pgup/pgdn page | esc back to menu\n\
tabs: h/l, left/right or tab/shift+tab previous/next tab\n\
data: r re-read the dataset and redraw the view\n\
global: ? help | q quit | ctrl+c quit"
}

fn class_color(class: TweetClass) -> Color {
    match class {
        TweetClass::HateSpeech => Color::Red,
        TweetClass::OffensiveLanguage => Color::Yellow,
        TweetClass::Neither => Color::Green,
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    view_data: &ViewData,
    options: UiOptions,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(rows[0]);

    render_sidebar(frame, columns[0], state, options);
    render_page(frame, columns[1], state, view_data);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, rows[1]);

    if state.help_visible {
        let area = centered_rect(70, 40, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .wrap(Wrap { trim: false })
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_sidebar(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, options: UiOptions) {
    let menu = state.router.menu();
    let items = sidebar_labels(menu, options.show_icons)
        .into_iter()
        .map(ListItem::new)
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(
            Block::default()
                .title(sidebar_title(menu, options.show_icons))
                .borders(Borders::ALL)
                .border_style(focus_style(state.focus == Focus::Sidebar)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.router.current_position()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_page(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let Some(view) = &view_data.rendered else {
        let empty = Paragraph::new(String::new()).block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let descriptor = &view.descriptor;
    let header_block = Block::default()
        .title(descriptor.title.clone())
        .borders(if descriptor.separator {
            Borders::ALL
        } else {
            Borders::TOP | Borders::LEFT | Borders::RIGHT
        })
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    match descriptor.active_tab_index() {
        Some(active) => {
            let titles = descriptor
                .tabs()
                .iter()
                .map(|tab| tab.label.clone())
                .collect::<Vec<String>>();
            let tabs = Tabs::new(titles)
                .block(header_block)
                .style(Style::default().fg(Color::White))
                .highlight_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .select(active);
            frame.render_widget(tabs, layout[0]);
        }
        None => frame.render_widget(Paragraph::new(String::new()).block(header_block), layout[0]),
    }

    if view.sections.is_empty() {
        return;
    }
    let count = view.sections.len() as u32;
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, count); view.sections.len()])
        .split(layout[1]);
    let focused = state.focus == Focus::Content;
    for (section, area) in view.sections.iter().zip(areas.iter()) {
        render_section(frame, *area, section, view_data.scroll, focused);
    }
}

fn render_section(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    section: &Section,
    scroll: u16,
    focused: bool,
) {
    let block = Block::default()
        .title(section.title.clone())
        .borders(Borders::ALL)
        .border_style(focus_style(focused));
    match &section.body {
        SectionBody::Text(text) => {
            let body = Paragraph::new(text.clone())
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0))
                .block(block);
            frame.render_widget(body, area);
        }
        SectionBody::Table(table) => {
            frame.render_widget(table_widget(table, scroll).block(block), area);
        }
        SectionBody::Dataset(dataset) => {
            let block = block.title_bottom(dataset_caption(dataset));
            frame.render_widget(table_widget(&dataset.preview, scroll).block(block), area);
        }
        SectionBody::Chart(chart) => match chart.kind {
            ChartKind::Bar => render_bar_chart(frame, area, chart, block),
            ChartKind::Pie => render_pie_chart(frame, area, chart, block),
        },
        SectionBody::Notice(notice) => {
            let body = Paragraph::new(notice.message.clone())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false })
                .block(block.border_style(Style::default().fg(Color::Red)));
            frame.render_widget(body, area);
        }
    }
}

fn column_widths(table: &TableData) -> Vec<Constraint> {
    (0..table.columns.len())
        .map(|index| {
            let header = table.columns[index].width();
            let widest = table
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0);
            Constraint::Length(header.max(widest).clamp(1, MAX_COLUMN_WIDTH) as u16)
        })
        .collect()
}

fn table_widget(table: &TableData, scroll: u16) -> Table<'static> {
    let header = Row::new(table.columns.iter().map(|column| {
        Cell::from(text::display_cell(column)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let rows = table
        .rows
        .iter()
        .skip(usize::from(scroll))
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(text::display_cell(cell)))))
        .collect::<Vec<_>>();
    Table::new(rows, column_widths(table))
        .header(header)
        .column_spacing(2)
}

fn render_bar_chart(frame: &mut ratatui::Frame<'_>, area: Rect, chart: &ChartSpec, block: Block<'_>) {
    let bars = chart
        .data
        .iter()
        .map(|datum| (datum.label, datum.value))
        .collect::<Vec<(&str, u64)>>();
    let title = match (&chart.x_label, &chart.y_label) {
        (Some(x), Some(y)) => format!("{} ({x} / {y})", chart.title),
        _ => chart.title.clone(),
    };
    let widget = BarChart::default()
        .block(block.title_bottom(title))
        .data(bars.as_slice())
        .bar_width(18)
        .bar_gap(4)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(widget, area);
}

fn render_pie_chart(frame: &mut ratatui::Frame<'_>, area: Rect, chart: &ChartSpec, block: Block<'_>) {
    let inner = block.inner(area);
    frame.render_widget(block.title_bottom(chart.title.clone()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); chart.data.len()])
        .split(inner);
    for (datum, row) in chart.data.iter().zip(rows.iter()) {
        let mut label = format!("{} {}", datum.label, format_percent(datum.proportion));
        if datum.explode > 0.0 {
            label.push_str(" *");
        }
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::BOTTOM))
            .gauge_style(Style::default().fg(class_color(datum.class)))
            .ratio(datum.proportion.clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, *row);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
