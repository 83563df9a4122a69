//! Screen layout and rendering
//!
//! ```text
//! ┌ header ─────────────────────────────────────────────┐
//! ├ AI Pitch Coach ──────────────┬ Trust Score ─────────┤
//! │ › idea                       │ ████████░░  73       │
//! │ 8 characters needed          │ ✓ KYC Verified       │
//! │ typed pitch▌                 │ ● grant eligibility  │
//! ├ Secure Chat ─────────────────┴──────────────────────┤
//! │ You: earlier message                                 │
//! │ Advisor: reply                                       │
//! │ > draft                                              │
//! │ ⚠ warning                                            │
//! └ status ─────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use disclosure_core::state::MAX_IDEA_CHARS;
use disclosure_core::{Easing, GaugeFrame, Language};

use crate::app::{App, Focus};
use crate::chat::Sender;
use crate::theme::{tier_color, BRAND_ACCENT, BRAND_PRIMARY, DIM_GRAY, TEXT, WARNING_AMBER};
use crate::widgets::TextBlock;

/// Screen copy for one language
#[derive(Clone, Copy, Debug)]
pub struct ScreenText {
    pub pitch_title: &'static str,
    pub idea_placeholder: &'static str,
    pub chars_needed: &'static str,
    pub generating: &'static str,
    pub trust_title: &'static str,
    pub badges_title: &'static str,
    pub women_in_business: &'static str,
    pub chat_title: &'static str,
    pub chat_placeholder: &'static str,
    pub you: &'static str,
    pub advisor: &'static str,
    pub status: &'static str,
}

const EN: ScreenText = ScreenText {
    pitch_title: "AI Pitch Coach",
    idea_placeholder: "Describe your business idea here (at least 20 characters)",
    chars_needed: "characters needed",
    generating: "Generating your perfect pitch...",
    trust_title: "Trust Score",
    badges_title: "Trust Badges",
    women_in_business: "Eligible for Women in Business Grant",
    chat_title: "Secure Chat",
    chat_placeholder: "Type your message...",
    you: "You",
    advisor: "Advisor",
    status: "Esc quit · Tab idea/chat · Ctrl+R replay · Ctrl+L language · Enter send",
};

const AL: ScreenText = ScreenText {
    pitch_title: "Trajneri i AI për Prezantim",
    idea_placeholder: "Përshkruani idenë tuaj të biznesit këtu (të paktën 20 karaktere)",
    chars_needed: "karaktere nevojiten",
    generating: "Duke gjeneruar prezantimin tuaj perfekt...",
    trust_title: "Rezultati i Besimit",
    badges_title: "Medaljet e Besimit",
    women_in_business: "E përshtatshme për Grantin e Grave në Biznes",
    chat_title: "Bisedë e Sigurt",
    chat_placeholder: "Shkruani mesazhin tuaj...",
    you: "Ju",
    advisor: "Këshilltari",
    status: "Esc dil · Tab ideja/biseda · Ctrl+R përsërit · Ctrl+L gjuha · Enter dërgo",
};

/// Screen copy for `language`
pub fn screen_text(language: Language) -> ScreenText {
    match language {
        Language::En => EN,
        Language::Al => AL,
    }
}

/// Fraction of the gauge bar to fill
///
/// The number counts linearly while the bar eases out toward the same end
/// point, so both land on the target together.
pub fn bar_ratio(frame: GaugeFrame) -> f64 {
    if frame.target == 0 {
        return 0.0;
    }
    let progress = f64::from(frame.value) / f64::from(frame.target);
    (Easing::EaseOut.apply(progress) * f64::from(frame.target) / 100.0).clamp(0.0, 1.0)
}

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let text = screen_text(app.state().language);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, rows[0], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);
    draw_pitch(frame, panes[0], app, text);
    draw_trust(frame, panes[1], app, text);

    draw_chat(frame, rows[2], app, text);

    frame.render_widget(
        Paragraph::new(text.status).style(Style::default().fg(DIM_GRAY)),
        rows[3],
    );
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Line::from(vec![
        Span::styled(
            "FinFund",
            Style::default()
                .fg(BRAND_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            app.state().language.code().to_uppercase(),
            Style::default().fg(BRAND_ACCENT),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_pitch(frame: &mut Frame, area: Rect, app: &App, text: ScreenText) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BRAND_PRIMARY))
        .title(text.pitch_title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    draw_idea(frame, rows[0], rows[1], app, text);

    let state = app.state();
    if !state.can_generate_pitch() {
        return;
    }

    let reveal = app.reveal();
    if reveal.revealed == 0 && !reveal.is_complete {
        frame.render_widget(
            Paragraph::new(text.generating).style(Style::default().fg(DIM_GRAY)),
            rows[2],
        );
        return;
    }

    let mut pitch = TextBlock::new(&reveal.visible_text).style(Style::default().fg(TEXT));
    if !reveal.is_complete {
        pitch = pitch.cursor(Style::default().fg(BRAND_ACCENT));
    }
    frame.render_widget(pitch, rows[2]);
}

fn draw_idea(frame: &mut Frame, line: Rect, counter: Rect, app: &App, text: ScreenText) {
    let state = app.state();
    let focused = app.focus() == Focus::Idea;
    let marker = if focused { "› " } else { "  " };

    // Keep the end of a long idea in view while typing
    let room = usize::from(line.width.saturating_sub(2)).max(1);
    let chars: Vec<char> = state.idea.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(room)..].iter().collect();
    let typed = tail.width();

    let idea = if tail.is_empty() {
        Line::from(vec![
            Span::raw(marker),
            Span::styled(text.idea_placeholder, Style::default().fg(DIM_GRAY)),
        ])
    } else {
        Line::from(vec![
            Span::raw(marker),
            Span::styled(tail, Style::default().fg(TEXT)),
        ])
    };
    frame.render_widget(Paragraph::new(idea), line);

    let needed = state.idea_chars_needed();
    let count = if needed > 0 {
        Line::styled(
            format!("{needed} {}", text.chars_needed),
            Style::default().fg(WARNING_AMBER),
        )
    } else {
        Line::styled(
            format!("{} / {MAX_IDEA_CHARS}", state.idea_len()),
            Style::default().fg(DIM_GRAY),
        )
    };
    frame.render_widget(Paragraph::new(count), counter);

    if focused {
        let cursor_x = line.x + 2 + typed as u16;
        if line.height > 0 && cursor_x < line.right() {
            frame.set_cursor_position(Position::new(cursor_x, line.y));
        }
    }
}

fn draw_trust(frame: &mut Frame, area: Rect, app: &App, text: ScreenText) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BRAND_PRIMARY))
        .title(text.trust_title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let score = app.score();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(tier_color(score.tier)))
        .ratio(bar_ratio(score))
        .label(format!("{} · {}", score.value, score.tier));
    frame.render_widget(gauge, rows[0]);

    let mut lines = vec![Line::styled(
        text.badges_title,
        Style::default().fg(DIM_GRAY),
    )];
    lines.extend(
        app.state()
            .profile
            .badges
            .iter()
            .map(|badge| Line::from(format!("✓ {badge}"))),
    );
    if app.state().women_in_business_eligible() {
        lines.push(Line::default());
        lines.push(Line::styled(
            format!("● {}", text.women_in_business),
            Style::default()
                .fg(BRAND_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[2]);
}

fn draw_chat(frame: &mut Frame, area: Rect, app: &App, text: ScreenText) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM_GRAY))
        .title(text.chat_title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let warning = app.chat_warning();
    let input_rows = if warning.is_some() { 2 } else { 1 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(input_rows)])
        .split(inner);

    // Newest messages at the bottom, oldest dropped when out of room
    let visible = usize::from(rows[0].height);
    let messages = app.chat_messages();
    let transcript: Vec<Line> = messages[messages.len().saturating_sub(visible)..]
        .iter()
        .map(|message| {
            let (name, color) = match message.sender {
                Sender::User => (text.you, BRAND_ACCENT),
                Sender::Advisor => (text.advisor, BRAND_PRIMARY),
            };
            Line::from(vec![
                Span::styled(format!("{name}: "), Style::default().fg(color)),
                Span::styled(message.text.as_str(), Style::default().fg(TEXT)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(transcript), rows[0]);

    let draft = app.chat_input();
    let input = if draft.is_empty() {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(text.chat_placeholder, Style::default().fg(DIM_GRAY)),
        ])
    } else {
        Line::from(format!("> {draft}"))
    };

    let mut lines = vec![input];
    if let Some(warning) = warning {
        lines.push(Line::styled(
            format!("⚠ {warning}"),
            Style::default().fg(WARNING_AMBER),
        ));
    }
    let input_area = rows[1];
    frame.render_widget(Paragraph::new(lines), input_area);

    if app.focus() != Focus::Chat {
        return;
    }
    let cursor_x = input_area.x + 2 + draft.width() as u16;
    if input_area.height > 0 && cursor_x < input_area.right() {
        frame.set_cursor_position(Position::new(cursor_x, input_area.y));
    }
}
