//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap};

use socialtrack_core::catalog::PlanId;
use socialtrack_core::send::SendStatus;
use socialtrack_core::stats::weekly_activity;

use super::app::{App, TrackerItem, View};

/// Render the current view.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // main content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    match app.view {
        View::PlanSelection => render_plan_selection(f, app, chunks[0]),
        View::Dashboard => render_dashboard(f, app, chunks[0]),
        View::Tracker => render_tracker(f, app, chunks[0]),
        View::Report => render_report(f, app, chunks[0]),
        View::Help => render_help(f, chunks[0]),
    }

    render_status_bar(f, app, chunks[1]);

    if app.confirm_reset {
        render_reset_modal(f, f.area());
    }
}

// -- Plan selection --

fn render_plan_selection(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(area);

    let header_cells = ["Plan", "Price", "Posts", "Reels"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = PlanId::ALL.iter().enumerate().map(|(i, id)| {
        let config = id.config();
        let style = if i == app.plan_cursor {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let selected = if app.month.selected_plan == Some(*id) {
            format!("{} (current)", config.name)
        } else {
            config.name.to_string()
        };
        Row::new(vec![
            Cell::from(selected),
            Cell::from(format!("{}$ / month", config.price)),
            Cell::from(format!("{} ({}/week)", config.total_posts, config.posts_per_week)),
            Cell::from(format!("{}", config.total_reels)),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Choose a Plan "));
    f.render_widget(table, chunks[0]);

    // Feature list for the highlighted plan.
    let features: Vec<Line> = PlanId::ALL
        .get(app.plan_cursor)
        .map(|id| {
            id.config()
                .features
                .iter()
                .map(|feat| Line::from(format!("  - {feat}")))
                .collect()
        })
        .unwrap_or_default();

    let panel = Paragraph::new(features).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Includes "),
    );
    f.render_widget(panel, chunks[1]);
}

// -- Dashboard --

fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // progress gauge
            Constraint::Length(4), // stat cards
            Constraint::Min(6),    // weekly table
        ])
        .split(area);

    let plan_line = match app.month.selected_plan {
        Some(id) => {
            let config = id.config();
            format!(
                " {} | {} ({}$ / month)",
                app.month.month_name, config.name, config.price
            )
        }
        None => format!(" {}", app.month.month_name),
    };
    let header = Paragraph::new(plan_line)
        .block(Block::default().borders(Borders::ALL).title(" Month "));
    f.render_widget(header, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Completion "))
        .gauge_style(Style::default().fg(gauge_color(stats.progress_percentage)))
        .percent(u16::from(stats.progress_percentage));
    f.render_widget(gauge, chunks[1]);

    render_stat_cards(f, app, chunks[2]);
    render_weekly_table(f, app, chunks[3]);
}

fn render_stat_cards(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();

    let cards: [(&str, String); 4] = [
        ("Posts", format!("{} / {}", stats.posts_completed, stats.total_posts)),
        (
            "Reels",
            if stats.total_reels > 0 {
                format!("{} / {}", stats.reels_completed, stats.total_reels)
            } else {
                "-".to_string()
            },
        ),
        ("Stories", stats.stories_total.to_string()),
        ("Replies", stats.comments_total.to_string()),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for ((title, value), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")));
        f.render_widget(card, *column);
    }
}

fn render_weekly_table(f: &mut Frame, app: &App, area: Rect) {
    let header_cells = ["Week", "Posts", "Stories", "Replies"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let visible = app
        .month
        .selected_plan
        .map(|id| id.config().posts_per_week)
        .unwrap_or(0);

    let rows = weekly_activity(&app.month).into_iter().map(|week| {
        Row::new(vec![
            Cell::from(format!("Week {}", week.week)),
            Cell::from(format!("{} / {}", week.posts_done, visible)),
            Cell::from(week.stories.to_string()),
            Cell::from(week.comments.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(" Weekly Activity "));
    f.render_widget(table, area);
}

// -- Tracker --

fn render_tracker(f: &mut Frame, app: &App, area: Rect) {
    let items = app.tracker_items();

    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (label, done) = tracker_label(app, item);
            let marker = match done {
                Some(true) => "[x] ",
                Some(false) => "[ ] ",
                None => "    ",
            };
            let style = if i == app.tracker_cursor {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else if done == Some(true) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("  {marker}{label}"), style))
        })
        .collect();

    let list = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Deliverables (Enter/Space toggles, +/- adjusts) "),
        )
        .scroll((tracker_scroll(app, area), 0));
    f.render_widget(list, area);
}

fn tracker_label(app: &App, item: &TrackerItem) -> (String, Option<bool>) {
    match *item {
        TrackerItem::Post { week, slot } => {
            let done = app
                .month
                .week(week)
                .map(|w| w.posts[slot])
                .unwrap_or(false);
            (format!("Week {week} post {}", slot + 1), Some(done))
        }
        TrackerItem::Reel { slot } => {
            (format!("Reel {}", slot + 1), Some(app.month.reels[slot]))
        }
        TrackerItem::Stories { week } => {
            let count = app.month.week(week).map(|w| w.stories_count).unwrap_or(0);
            (format!("Week {week} stories: {count}"), None)
        }
        TrackerItem::Comments { week } => {
            let count = app.month.week(week).map(|w| w.comments_count).unwrap_or(0);
            (format!("Week {week} replies: {count}"), None)
        }
    }
}

/// Keep the cursor visible when the checklist is taller than the panel.
fn tracker_scroll(app: &App, area: Rect) -> u16 {
    let visible = area.height.saturating_sub(2) as usize;
    if visible == 0 {
        return 0;
    }
    app.tracker_cursor.saturating_sub(visible - 1) as u16
}

// -- Report --

fn render_report(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(4),    // observation
            Constraint::Length(4), // approval + actions
        ])
        .split(area);

    let plan_name = app
        .month
        .selected_plan
        .map(|id| id.config().name)
        .unwrap_or("-");
    let header_lines = vec![
        Line::from(format!(" Period: {}   Plan: {plan_name}", app.month.month_name)),
        Line::from(format!(
            " Completion: {}%   Posts {}/{}   Reels {}/{}   Stories {}   Replies {}",
            stats.progress_percentage,
            stats.posts_completed,
            stats.total_posts,
            stats.reels_completed,
            stats.total_reels,
            stats.stories_total,
            stats.comments_total,
        )),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().borders(Borders::ALL).title(" Monthly Report "));
    f.render_widget(header, chunks[0]);

    let observation = if app.month.ai_observation.is_empty() {
        Span::styled(
            "No observation yet. Press n to generate one.",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.month.ai_observation.as_str())
    };
    let body = Paragraph::new(Line::from(observation))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Strategy Observations "),
        );
    f.render_widget(body, chunks[1]);

    let approval = match app.month.signature_date {
        Some(date) => Line::from(Span::styled(
            format!(" Signed digitally on {}", date.format("%Y-%m-%d %H:%M UTC")),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            " Pending client signature (sign with `strack sign <image>`)",
            Style::default().fg(Color::Yellow),
        )),
    };
    let send_line = match app.send_status {
        SendStatus::Idle => Line::from(" s:send  u:unsign  n:narrative  x:export pdf  w:export docx"),
        SendStatus::Sending => Line::from(Span::styled(
            " Sending report...",
            Style::default().fg(Color::Blue),
        )),
        SendStatus::Sent => Line::from(Span::styled(
            " Report sent.",
            Style::default().fg(Color::Green),
        )),
    };
    let footer = Paragraph::new(vec![approval, send_line])
        .block(Block::default().borders(Borders::ALL).title(" Client Approval "));
    f.render_widget(footer, chunks[2]);
}

// -- Help --

fn render_help(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Navigation",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from("    j/Down      Move down"),
        Line::from("    k/Up        Move up"),
        Line::from("    Tab         Cycle Dashboard / Tracker / Report"),
        Line::from("    Esc/q       Back / Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Tracker",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from("    Enter/Space Toggle the highlighted deliverable"),
        Line::from("    + / -       Adjust the highlighted counter"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Report",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from("    n           Regenerate the strategy observation"),
        Line::from("    s           Send the report (requires signature)"),
        Line::from("    u           Clear the client signature"),
        Line::from("    x / w       Export as PDF / DOCX"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Other",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from("    p           Switch plan"),
        Line::from("    r           Reset the month (with confirmation)"),
        Line::from("    ?           Show this help"),
        Line::from(""),
    ];

    let help =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}

// -- Chrome --

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let view_name = match app.view {
        View::PlanSelection => "Plan Selection",
        View::Dashboard => "Dashboard",
        View::Tracker => "Tracker",
        View::Report => "Report",
        View::Help => "Help",
    };

    let signed = if app.month.is_signed() {
        Span::styled("signed", Style::default().fg(Color::Green))
    } else {
        Span::styled("unsigned", Style::default().fg(Color::DarkGray))
    };

    let status_msg = app.status_message.as_deref().unwrap_or("");

    let bar = Line::from(vec![
        Span::styled(
            format!(" {view_name} "),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
        signed,
        Span::raw("  "),
        Span::styled(status_msg, Style::default().fg(Color::Green)),
        Span::raw("  q:quit  ?:help  Tab:switch view"),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}

fn render_reset_modal(f: &mut Frame, area: Rect) {
    let modal = centered_rect(50, 5, area);
    f.render_widget(Clear, modal);

    let text = vec![
        Line::from(" This permanently clears all data for the month."),
        Line::from(vec![
            Span::raw(" Press "),
            Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" to confirm, any other key to cancel."),
        ]),
    ];
    let dialog = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Reset Month "),
    );
    f.render_widget(dialog, modal);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn gauge_color(percentage: u8) -> Color {
    match percentage {
        75.. => Color::Green,
        40..=74 => Color::Yellow,
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_the_area() {
        let area = Rect::new(0, 0, 80, 24);
        let modal = centered_rect(50, 5, area);
        assert!(modal.x + modal.width <= area.width);
        assert!(modal.y + modal.height <= area.height);

        // Larger than the terminal: clamped, never out of bounds.
        let tiny = Rect::new(0, 0, 20, 3);
        let modal = centered_rect(50, 5, tiny);
        assert!(modal.width <= tiny.width);
        assert!(modal.height <= tiny.height);
    }

    #[test]
    fn gauge_color_bands() {
        assert_eq!(gauge_color(0), Color::Red);
        assert_eq!(gauge_color(40), Color::Yellow);
        assert_eq!(gauge_color(75), Color::Green);
        assert_eq!(gauge_color(100), Color::Green);
    }
}
