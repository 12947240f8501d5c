//! Rendering

use crate::app::{App, AuthField, InputMode};
use oleum_client::screens::{AuthScreen, NetworkScreen, NewOrderScreen, TripsScreen};
use oleum_client::{Screen, Tab};
use ratatui::{prelude::*, widgets::*};
use shared::models::{NetworkFilter, OrderKind, StatusTone};
use tui_input::Input;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

pub fn draw(f: &mut Frame, app: &App) {
    let signed_in = app.shell.user().is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Screen + logs
            Constraint::Length(if signed_in { 3 } else { 0 }),
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    draw_header(f, app, chunks[0]);
    match app.shell.screen() {
        Screen::Auth(screen) => draw_auth(f, app, screen, main_chunks[0]),
        Screen::NewOrder(screen) => draw_order(f, app, screen, main_chunks[0]),
        Screen::Network(screen) => draw_network(f, screen, main_chunks[0]),
        Screen::Trips(screen) => draw_trips(f, screen, main_chunks[0]),
    }
    draw_logs(f, app, main_chunks[1]);
    if signed_in {
        draw_tab_bar(f, app.shell.tab(), chunks[2]);
    }
    draw_hints(f, app, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let status = match app.shell.greeting() {
        Some(greeting) => Span::styled(
            format!(" {} ", greeting),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(" Not signed in ", Style::default().fg(Color::DarkGray)),
    };
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" 🫒 "),
        Span::styled("Oleum", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        status,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                )
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

fn draw_tab_bar(f: &mut Frame, active: Tab, area: Rect) {
    let selected = Tab::ALL.iter().position(|t| *t == active).unwrap_or(0);
    let tabs = Tabs::new(
        Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{} {}", i + 1, t.label())),
    )
    .select(selected)
    .highlight_style(
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, area);
}

fn draw_hints(f: &mut Frame, app: &App, area: Rect) {
    let text = match (app.shell.screen(), app.input_mode) {
        (Screen::Auth(_), _) => "Tab: next field | Enter: submit | Ctrl+T: switch mode | Esc: quit",
        (_, InputMode::Editing) => "Enter: dispatch | Esc: stop editing",
        (Screen::NewOrder(_), _) => concat!(
            "e: edit amount | m: switch mode | Up/Down: destination | ",
            "Enter: dispatch | x: sign out | q: quit"
        ),
        (Screen::Network(_), _) => "f: filter | 1-3: tabs | x: sign out | q: quit",
        (Screen::Trips(_), _) => "1-3: tabs | PgUp/PgDn: logs | x: sign out | q: quit",
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

// ========== Screens ==========

fn draw_auth(f: &mut Frame, app: &App, screen: &AuthScreen, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", screen.mode().action_label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let username_focused = app.auth_field == AuthField::Username;
    draw_input(f, " Username ", &app.username, false, username_focused, rows[0]);
    draw_input(f, " Password ", &app.password, true, !username_focused, rows[1]);

    if let Some(error) = screen.error() {
        f.render_widget(
            Paragraph::new(error.display_message()).style(Style::default().fg(Color::Red)),
            rows[2],
        );
    }

    let action = if screen.is_submitting() {
        Span::styled("Please wait...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!("[ {} ]", screen.mode().action_label()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };
    f.render_widget(Paragraph::new(Line::from(action)), rows[3]);

    let (prompt, other) = screen.mode().switch_prompt();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::DarkGray)),
            Span::styled(other, Style::default().fg(Color::Cyan)),
        ])),
        rows[4],
    );

    if !screen.is_submitting() {
        let (input, row) = if username_focused {
            (&app.username, rows[0])
        } else {
            (&app.password, rows[1])
        };
        set_cursor(f, input, row);
    }
}

fn draw_order(f: &mut Frame, app: &App, screen: &NewOrderScreen, area: Rect) {
    let block = Block::default()
        .title(" New Order ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Mode
            Constraint::Length(3), // Amount
            Constraint::Min(3),    // Destinations
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Submit
        ])
        .split(inner);

    let mode_span = |kind: OrderKind, label: &'static str| {
        if screen.kind() == kind {
            Span::styled(
                format!("[ {} ]", label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!("  {}  ", label), Style::default().fg(Color::Gray))
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            mode_span(OrderKind::Olives, "Olive Batch"),
            Span::raw(" "),
            mode_span(OrderKind::Oil, "Oil Batch"),
        ])),
        rows[0],
    );

    let editing = app.input_mode == InputMode::Editing;
    draw_input(f, quantity_title(screen.kind()), &app.quantity, false, editing, rows[1]);
    if editing {
        set_cursor(f, &app.quantity, rows[1]);
    }

    let title = match screen.kind() {
        OrderKind::Olives => " Destination Press ",
        OrderKind::Oil => " Destination Facility ",
    };
    let destinations = screen.destinations();
    let mut items: Vec<ListItem> = Vec::with_capacity(destinations.len() + 1);
    if screen.is_fetching() || screen.selected().is_none() {
        items.push(ListItem::new(Span::styled(
            screen.destination_placeholder(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !screen.is_fetching() {
        items.extend(destinations.iter().map(|d| {
            if screen.selected() == Some(d.id.as_str()) {
                ListItem::new(Span::styled(
                    format!("> {}", d.label),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                ListItem::new(format!("  {}", d.label))
            }
        }));
    }
    f.render_widget(
        List::new(items).block(Block::default().title(title).borders(Borders::ALL)),
        rows[2],
    );

    if let Some(notice) = screen.notice() {
        let color = if notice.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        f.render_widget(
            Paragraph::new(notice.text()).style(Style::default().fg(color)),
            rows[3],
        );
    }

    let submit = if screen.is_submitting() {
        Span::styled("Dispatching...", Style::default().fg(Color::Yellow))
    } else if screen.can_submit() {
        Span::styled(
            "[ Dispatch Batch ]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Dispatch Batch ]", Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(Line::from(submit)), rows[4]);
}

fn quantity_title(kind: OrderKind) -> &'static str {
    match kind {
        OrderKind::Olives => " Weight (kg) ",
        OrderKind::Oil => " Volume (liters) ",
    }
}

fn draw_network(f: &mut Frame, screen: &NetworkScreen, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let selected = NetworkFilter::ALL
        .iter()
        .position(|filter| *filter == screen.filter())
        .unwrap_or(0);
    let filters = Tabs::new(NetworkFilter::ALL.iter().map(|filter| filter.label()))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().title(" Network ").borders(Borders::ALL));
    f.render_widget(filters, rows[0]);

    let block = Block::default().borders(Borders::ALL);
    let empty = screen.visible().is_empty();
    if let Some(text) = placeholder(screen.is_loading(), empty, "No locations found.") {
        f.render_widget(Paragraph::new(text).block(block), rows[1]);
        return;
    }

    let items: Vec<ListItem> = screen
        .visible()
        .into_iter()
        .map(|entry| {
            let badge_color = if entry.is_press() {
                Color::Green
            } else {
                Color::Blue
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(entry.name(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(format!("[{}]", entry.badge()), Style::default().fg(badge_color)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", entry.location()),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();
    f.render_widget(List::new(items).block(block), rows[1]);
}

fn draw_trips(f: &mut Frame, screen: &TripsScreen, area: Rect) {
    let block = Block::default()
        .title(" Active Trips ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let empty = screen.trips().is_empty();
    if let Some(text) = placeholder(screen.is_loading(), empty, "No active trips recorded.") {
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let items: Vec<ListItem> = screen
        .trips()
        .iter()
        .map(|trip| {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(tone_color(trip.status.tone()))),
                    Span::styled(
                        format!("{} → {}", trip.origin, trip.destination),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        trip.status.as_str().to_string(),
                        Style::default().fg(tone_color(trip.status.tone())),
                    ),
                    Span::styled(
                        format!("  {}", trip.display_date()),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
            ];
            if let Some(driver) = &trip.driver_name {
                lines.push(Line::from(Span::styled(
                    format!("  Driver: {}", driver),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

// ========== Helpers ==========

fn placeholder(loading: bool, empty: bool, empty_text: &'static str) -> Option<&'static str> {
    if loading {
        Some("Loading...")
    } else if empty {
        Some(empty_text)
    } else {
        None
    }
}

fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Green => Color::Green,
        StatusTone::Blue => Color::Blue,
        StatusTone::Yellow => Color::Yellow,
    }
}

fn draw_input(f: &mut Frame, title: &str, input: &Input, masked: bool, focused: bool, area: Rect) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let text = if masked {
        "*".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    let widget = Paragraph::new(text)
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(widget, area);
}

fn set_cursor(f: &mut Frame, input: &Input, area: Rect) {
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    f.set_cursor_position((
        area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
        area.y + 1,
    ));
}
