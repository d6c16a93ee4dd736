use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::mixer::timer::{format_duration, format_remaining};
use crate::shared::{DisplayState, NUM_TRACKS, TrackStatus};

use super::theme::{Palette, palette};

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let pal = palette(state.theme);

    frame.render_widget(
        Block::default().style(Style::default().bg(pal.bg).fg(pal.fg)),
        area,
    );

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                   // title
            Constraint::Length(NUM_TRACKS as u16 * 3), // track rows
            Constraint::Length(3),                   // preset bar
            Constraint::Length(4),                   // sleep timer
            Constraint::Min(1),                      // help line
        ])
        .split(area);

    draw_title(frame, sections[0], &pal);
    draw_tracks(frame, sections[1], state, &pal);
    draw_presets(frame, sections[2], state, &pal);
    draw_timer(frame, sections[3], state, &pal);
    draw_help(frame, sections[4], &pal);
}

fn draw_title(frame: &mut Frame, area: Rect, pal: &Palette) {
    let title = Line::from(vec![
        Span::styled(
            " lull ",
            Style::default()
                .fg(pal.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("ambient mixer", Style::default().fg(pal.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_tracks(frame: &mut Frame, area: Rect, state: &DisplayState, pal: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); NUM_TRACKS])
        .split(area);

    for (i, track) in state.tracks.iter().enumerate() {
        let selected = state.selected as usize == i;

        let status = match track.status {
            TrackStatus::Loading => Span::styled("loading…", Style::default().fg(pal.muted)),
            TrackStatus::Unavailable => {
                Span::styled("unavailable (r to retry)", Style::default().fg(pal.warn))
            }
            TrackStatus::Ready if track.fading => {
                Span::styled("fading out…", Style::default().fg(pal.warn))
            }
            TrackStatus::Ready if track.playing => {
                Span::styled("▶ playing", Style::default().fg(pal.accent))
            }
            TrackStatus::Ready => Span::styled("⏸ paused", Style::default().fg(pal.muted)),
        };

        let border_style = if selected {
            Style::default().fg(pal.accent)
        } else {
            Style::default().fg(pal.muted)
        };
        let title = Line::from(vec![
            Span::styled(
                format!(" {} {} ", i + 1, track.name),
                Style::default().fg(pal.fg).add_modifier(if selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
            ),
            status,
        ]);

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .gauge_style(Style::default().fg(if track.playing { pal.accent } else { pal.muted }))
            .ratio(track.volume.clamp(0.0, 1.0) as f64)
            .label(format!("vol {:>3.0}%", track.volume * 100.0));
        frame.render_widget(gauge, rows[i]);
    }
}

fn draw_presets(frame: &mut Frame, area: Rect, state: &DisplayState, pal: &Palette) {
    let keys = ["a", "s", "d"];
    let mut spans = vec![Span::styled("presets  ", Style::default().fg(pal.muted))];
    for (key, name) in keys.iter().zip(state.preset_names.iter()) {
        spans.push(Span::styled(
            format!("[{key}] "),
            Style::default().fg(pal.accent),
        ));
        spans.push(Span::styled(
            format!("{name}   "),
            Style::default().fg(pal.fg),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(pal.muted)),
        ),
        area,
    );
}

fn draw_timer(frame: &mut Frame, area: Rect, state: &DisplayState, pal: &Palette) {
    let timer = &state.timer;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.muted))
        .title(Span::styled(" sleep timer ", Style::default().fg(pal.fg)));

    if timer.running {
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(pal.accent))
            .ratio(timer.progress())
            .label(format!(
                "{}  (t to cancel)",
                format_remaining(timer.remaining_secs)
            ));
        frame.render_widget(gauge, area);
    } else {
        let text = Line::from(vec![
            Span::styled(
                format!("  {}  ", format_duration(timer.duration_mins)),
                Style::default().fg(pal.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "-/= adjust, t to start",
                Style::default().fg(pal.muted),
            ),
        ]);
        frame.render_widget(Paragraph::new(text).block(block), area);
    }
}

fn draw_help(frame: &mut Frame, area: Rect, pal: &Palette) {
    let help = Line::from(Span::styled(
        " 1-4 toggle · j/k select · space play/pause · [/] volume · m theme · esc quit",
        Style::default().fg(pal.muted),
    ));
    frame.render_widget(Paragraph::new(help), area);
}
