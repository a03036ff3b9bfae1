//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  🧧 Red Packet              ● Verified       │
//! ├─────────────────────┬────────────────────────┤
//! │  Unlock             │  Redeem                │
//! │  [F1] Face ID       │  Code  Q9TM8H4W2ZL5▏   │
//! │  [F2] Touch ID      │  3 more characters…    │
//! │                     │  [Enter] Redeem        │
//! ├─────────────────────┴────────────────────────┤
//! │  Red packet opened!  +54.00 USDT             │
//! ├──────────────────────────────────────────────┤
//! │  #4  Q9TM8H4W2ZL5   +54.00 USDT  Oct 14, 09:32│
//! ├──────────────────────────────────────────────┤
//! │  F1/F2 unlock   Enter redeem   Esc quit      │
//! └──────────────────────────────────────────────┘

use super::app::App;
use ratatui::{prelude::*, widgets::*};

use redpacket_core::{BiometricStatus, format_timestamp, format_timestamp_long};

const CONFETTI_COLORS: [Color; redpacket_core::confetti::PALETTE_LEN] = [
    Color::Red,
    Color::Yellow,
    Color::LightRed,
    Color::LightYellow,
    Color::Magenta,
];

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(8), // unlock + redeem
            Constraint::Length(5), // confirmation
            Constraint::Min(5),    // history
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_form(f, rows[1], app);
    draw_success(f, rows[2], app);
    draw_history(f, rows[3], app);
    draw_keys(f, rows[4]);

    let area = f.area();
    draw_confetti(f, area, app);
}

fn status_style(status: BiometricStatus) -> Style {
    match status {
        BiometricStatus::Idle => Style::default().fg(Color::DarkGray),
        BiometricStatus::Processing => Style::default().fg(Color::Yellow),
        BiometricStatus::Success => Style::default().fg(Color::Green).bold(),
        BiometricStatus::Error => Style::default().fg(Color::Red).bold(),
    }
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let screen = app.screen();
    let status = screen.status();
    let dot = if status == BiometricStatus::Processing {
        app.spinner()
    } else {
        '●'
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Line::from(vec![
            Span::styled(" 🧧 Red Packet ", Style::default().bold().fg(Color::Red)),
            Span::styled(
                format!(" {dot} {} ", screen.status_label()),
                status_style(status),
            ),
        ]));

    let total = screen.history().total().credited(&screen.config().currency);
    let p = Paragraph::new(Line::from(vec![
        Span::raw(" Unlock with Face ID or Touch ID, then redeem your code.  "),
        Span::styled(
            format!("Lifetime: {total}"),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(block);
    f.render_widget(p, area);
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_unlock(f, cols[0], app);
    draw_redeem(f, cols[1], app);
}

fn draw_unlock(f: &mut Frame, area: Rect, app: &App) {
    let screen = app.screen();
    let active = screen.method();

    let button = |key: &str, method: redpacket_core::BiometricMethod| {
        let selected = active == Some(method);
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(format!(" [{key}] "), Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" {} ", method.label()), style),
        ])
    };

    let mut lines = vec![
        button("F1", redpacket_core::BiometricMethod::Face),
        button("F2", redpacket_core::BiometricMethod::Touch),
        Line::from(""),
    ];

    let detail = match (screen.status(), screen.auth_error()) {
        (BiometricStatus::Idle, _) => Span::styled(
            "Choose a method to unlock.",
            Style::default().fg(Color::DarkGray),
        ),
        (BiometricStatus::Processing, _) => Span::styled(
            format!("{} Scanning…", app.spinner()),
            Style::default().fg(Color::Yellow),
        ),
        (BiometricStatus::Success, _) => Span::styled(
            "Identity confirmed.",
            Style::default().fg(Color::Green),
        ),
        (BiometricStatus::Error, Some(e)) => {
            Span::styled(e.to_string(), Style::default().fg(Color::Red))
        }
        (BiometricStatus::Error, None) => {
            Span::styled("Authentication failed.", Style::default().fg(Color::Red))
        }
    };
    lines.push(Line::from(detail));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Unlock ")
        .border_style(status_style(screen.status()));
    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(p, area);
}

fn draw_redeem(f: &mut Frame, area: Rect, app: &App) {
    let screen = app.screen();
    let check = screen.code_check();

    let input_style = if check.is_valid() {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::White).bold()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(" Code  ", Style::default().fg(Color::DarkGray)),
        Span::styled(screen.input().to_string(), input_style),
        Span::styled("▏", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!(
                "  {}/{}",
                screen.input().chars().count(),
                redpacket_core::CODE_LEN
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    lines.push(match screen.validation_message() {
        Some(msg) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(Color::Yellow),
        )),
        None if check.is_valid() => Line::from(Span::styled(
            " Code looks good.",
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            " Type or paste your code.",
            Style::default().fg(Color::DarkGray),
        )),
    });
    lines.push(Line::from(""));

    let submit = if screen.is_redeeming() {
        Line::from(Span::styled(
            format!(" {} Redeeming…", app.spinner()),
            Style::default().fg(Color::Yellow),
        ))
    } else if screen.can_submit() {
        Line::from(Span::styled(
            " [Enter] Redeem ",
            Style::default().fg(Color::Black).bg(Color::Red).bold(),
        ))
    } else {
        let hint = screen
            .submit_blocked()
            .map(|b| b.to_string())
            .unwrap_or_default();
        Line::from(vec![
            Span::styled(" [Enter] Redeem ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" {hint}"), Style::default().fg(Color::DarkGray)),
        ])
    };
    lines.push(submit);

    if let Some(notice) = app.notice() {
        lines.push(Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default().borders(Borders::ALL).title(" Redeem ");
    let p = Paragraph::new(lines).block(block);
    f.render_widget(p, area);
}

fn draw_success(f: &mut Frame, area: Rect, app: &App) {
    let screen = app.screen();
    let config = screen.config();

    let (text, style) = match screen.last_success() {
        Some(s) => (
            vec![
                Line::from(vec![
                    Span::styled(
                        " Red packet opened!  ",
                        Style::default().fg(Color::Red).bold(),
                    ),
                    Span::styled(
                        s.amount.credited(&config.currency),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(" Code  ", Style::default().fg(Color::DarkGray)),
                    Span::raw(s.code.clone()),
                ]),
                Line::from(vec![
                    Span::styled(" Time  ", Style::default().fg(Color::DarkGray)),
                    Span::raw(format_timestamp_long(
                        s.timestamp_ms,
                        config.utc_offset_minutes,
                    )),
                ]),
            ],
            Style::default().fg(Color::Red),
        ),
        None => (
            vec![Line::from(Span::styled(
                " Nothing redeemed yet this session.",
                Style::default().fg(Color::DarkGray),
            ))],
            Style::default(),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(" Confirmation ");
    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_history(f: &mut Frame, area: Rect, app: &App) {
    let screen = app.screen();
    let config = screen.config();
    let celebrating = screen.is_celebrating();

    let rows: Vec<Row> = screen
        .history()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let style = if i == 0 && celebrating {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                format!("#{}", r.id),
                r.code.clone(),
                r.amount.credited(&config.currency),
                format_timestamp(r.timestamp_ms, config.utc_offset_minutes),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),  // id
            Constraint::Length(14), // code
            Constraint::Length(16), // amount
            Constraint::Min(13),    // time
        ],
    )
    .header(
        Row::new(vec!["", "Code", "Amount", "Time"])
            .style(Style::default().fg(Color::DarkGray)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" History ({}) ", screen.history().len())),
    );

    f.render_widget(table, area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(
        " F1/^F face   F2/^T touch   Enter redeem   ^L clean up   ^U clear   Esc quit",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

fn draw_confetti(f: &mut Frame, area: Rect, app: &App) {
    let Some(elapsed) = app.celebration_ms() else {
        return;
    };
    if area.width == 0 || area.height == 0 {
        return;
    }

    let buf = f.buffer_mut();
    for p in app.screen().confetti() {
        let Some((x_pct, y_unit)) = p.position(elapsed) else {
            continue;
        };
        let x = area.x + ((x_pct / 100.0) * f64::from(area.width - 1)).round() as u16;
        let y = area.y + (y_unit * f64::from(area.height)) as u16;
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(p.glyph)
                .set_fg(CONFETTI_COLORS[p.color % CONFETTI_COLORS.len()]);
        }
    }
}
