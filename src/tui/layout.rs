use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::TuiApp;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                   // Header
            Constraint::Length(app.indicator_rows()), // Pull indicator
            Constraint::Min(3),                      // News list
            Constraint::Length(1),                   // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], colors);
    render_indicator(frame, app, chunks[1], colors);
    render_news_list(frame, app, chunks[2], colors);
    render_status_bar(frame, app, chunks[3], colors);

    if app.show_disclaimer {
        render_disclaimer(frame, app, colors);
    }
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {}", app.language.today_label()),
            Style::default()
                .fg(colors.header)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", Local::now().format("%d/%m")),
            Style::default().fg(colors.time),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_indicator(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    if area.height == 0 {
        return;
    }

    let (frame_index, label, color) = if app.gesture.is_refreshing() {
        let spin = (app.now_ms() / 80) as usize;
        (spin, app.language.refreshing_label(), colors.indicator_armed)
    } else if app.gesture.is_armed() {
        let spin = (app.gesture.rotation_degrees() / 36.0) as usize;
        (spin, app.language.release_hint(), colors.indicator_armed)
    } else {
        let spin = (app.gesture.rotation_degrees() / 36.0) as usize;
        (spin, app.language.pull_hint(), colors.indicator)
    };

    let line = Line::from(Span::styled(
        format!("{} {}", SPINNER[frame_index % SPINNER.len()], label),
        Style::default().fg(color),
    ))
    .centered();

    // The label sits at the bottom edge, right above the list it pulls.
    let label_area = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    frame.render_widget(Paragraph::new(line), label_area);
}

fn render_news_list(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    app.list_area = area;

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors.border));

    if app.items.is_empty() {
        let text = if app.loading {
            app.language.loading_label()
        } else {
            app.language.no_news_label()
        };
        let paragraph = Paragraph::new(Line::from(text).centered())
            .style(Style::default().fg(colors.description))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let now = Local::now();
    // Highlight symbol and indent
    let text_width = usize::from(area.width.saturating_sub(4)).max(10);

    let items: Vec<ListItem> = app
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let title_style = if app.read_state.is_read(&item.url) {
                Style::default().fg(colors.read_item)
            } else {
                Style::default()
                    .fg(colors.unread_item)
                    .add_modifier(Modifier::BOLD)
            };

            let mut lines = vec![Line::from(Span::styled(
                item.display_title().to_string(),
                title_style,
            ))];

            let time = item.formatted_time(&now, app.language);
            if !time.is_empty() {
                lines.push(Line::from(Span::styled(time, Style::default().fg(colors.time))));
            }

            if app.is_expanded(index) {
                lines.push(Line::from(""));
                for row in wrap_text(&item.description, text_width) {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", row),
                        Style::default().fg(colors.description),
                    )));
                }
                if item.has_web_link() {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", item.url),
                        Style::default()
                            .fg(colors.time)
                            .add_modifier(Modifier::UNDERLINED),
                    )));
                }
            }
            lines.push(Line::from(""));

            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.loading && !app.items.is_empty() {
        app.language.refreshing_label().to_string()
    } else {
        format!(
            "j/k:Nav  Enter:Expand  o:Open  R:Refresh  l:Lang({})  ?:About  q:Quit",
            app.language.code()
        )
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn render_disclaimer(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let area = centered_rect(70, 60, frame.area());

    let [first, second] = app.language.disclaimer_paragraphs();
    let text = Text::from(vec![
        Line::from(first),
        Line::from(""),
        Line::from(second),
        Line::from(""),
        Line::from(Span::styled("Esc", Style::default().fg(colors.time))).centered(),
    ]);

    let block = Block::default()
        .title(format!(" {} ", app.language.disclaimer_title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.indicator_armed));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

/// Greedy word wrap. Words longer than `width` get a row of their own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}
