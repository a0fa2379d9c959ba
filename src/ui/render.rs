use crate::config::SettingId;
use crate::lock::{LockFailure, LockMode, RenderState, PIN_LENGTH};
use crate::ui::app::App;
use crate::ui::footer::{Footer, FooterContext};
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect, centered_rect_by_size, layout_regions};
use crate::ui::settings::{SecurityPanel, SettingsDialogState};
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, HEADER_TEXT, KOIN_ACCENT, LOCK_BACKGROUND, MUTED_TEXT, POPUP_BORDER,
    STATUS_ERROR, STATUS_OK,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const LOCK_CARD_WIDTH: u16 = 44;
const LOCK_CARD_HEIGHT: u16 = 16;

const KEYPAD_ROWS: [&str; 4] = ["1   2   3", "4   5   6", "7   8   9", "⌫   0    "];

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    if app.is_locked() {
        // Nothing of the guarded content may leak through
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(LOCK_BACKGROUND)),
            area,
        );
        render_lock_surface(frame, body, app);
        frame.render_widget(Footer::new(FooterContext::Locked).widget(footer), footer);
        return;
    }

    let summary = app.home_summary();
    frame.render_widget(Header::new().widget(&summary), header);
    frame.render_widget(Clear, body);
    render_home(frame, body, app);

    let context = if app.settings_dialog().is_visible() {
        FooterContext::Settings
    } else {
        FooterContext::Home
    };
    frame.render_widget(Footer::new(context).widget(footer), footer);

    render_settings_dialog(frame, body, app.settings_dialog());
}

// ============================================================================
// Lock surface
// ============================================================================

fn render_lock_surface(frame: &mut Frame<'_>, body: Rect, app: &App) {
    let render = app.lock_render_state();
    let card = centered_rect_by_size(body, LOCK_CARD_WIDTH, LOCK_CARD_HEIGHT);

    let block = Block::default()
        .title(Span::styled(
            " Koin is locked ",
            Style::default().fg(KOIN_ACCENT),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    match render.mode {
        LockMode::Pin => render_pin_pad(frame, inner, &render, app.shake_offset()),
        LockMode::Biometric => render_biometric_card(frame, inner, &render, app.animation_tick()),
        LockMode::BiometricUnavailableNotice => render_unavailable_notice(frame, inner),
    }

    if let Some(status) = app.status() {
        render_status_line(frame, body, status, MUTED_TEXT);
    }
}

fn render_pin_pad(frame: &mut Frame<'_>, area: Rect, render: &RenderState, shake_offset: i16) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(KEYPAD_ROWS.len() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Enter PIN", Style::default().fg(HEADER_TEXT))),
        ])
        .alignment(Alignment::Center),
        rows[0],
    );

    let slot_style = if render.last_failure == Some(LockFailure::PinMismatch) {
        Style::default().fg(STATUS_ERROR)
    } else {
        Style::default().fg(KOIN_ACCENT)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            pin_slots(render.pin_entry_length),
            slot_style,
        )))
        .alignment(Alignment::Center),
        shifted(rows[1], shake_offset),
    );

    let keypad: Vec<Line> = KEYPAD_ROWS
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(HEADER_TEXT))))
        .collect();
    frame.render_widget(
        Paragraph::new(keypad).alignment(Alignment::Center),
        rows[3],
    );

    let mut hints = vec![Line::from("")];
    match render.last_failure {
        Some(LockFailure::PinMismatch) => hints.push(Line::from(Span::styled(
            "Wrong PIN, try again",
            Style::default().fg(STATUS_ERROR),
        ))),
        Some(LockFailure::BiometricUnavailable) => hints.push(Line::from(Span::styled(
            "Biometrics unavailable, use your PIN",
            Style::default().fg(MUTED_TEXT),
        ))),
        Some(LockFailure::BiometricDenied) | None => hints.push(Line::from("")),
    }
    hints.push(Line::from(Span::styled(
        "Forgot PIN? (?)",
        Style::default().fg(MUTED_TEXT),
    )));
    if render.can_switch_to_biometric {
        hints.push(Line::from(Span::styled(
            "Esc: Use biometrics",
            Style::default().fg(MUTED_TEXT),
        )));
    }
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), rows[4]);
}

fn render_biometric_card(
    frame: &mut Frame<'_>,
    area: Rect,
    render: &RenderState,
    animation_tick: u8,
) {
    let mut lines = vec![Line::from(""), Line::from(""), Line::from("")];
    if render.authenticating {
        let spinner = SPINNER_FRAMES[(animation_tick as usize) % SPINNER_FRAMES.len()];
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(STATUS_OK)),
            Span::styled("Waiting for biometric…", Style::default().fg(HEADER_TEXT)),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Tap to unlock (Enter)",
            Style::default()
                .fg(KOIN_ACCENT)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    if render.last_failure == Some(LockFailure::BiometricDenied) {
        lines.push(Line::from(Span::styled(
            "Biometric check failed",
            Style::default().fg(STATUS_ERROR),
        )));
    } else {
        lines.push(Line::from(""));
    }

    if render.can_switch_to_pin {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "p: Enter PIN",
            Style::default().fg(MUTED_TEXT),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_unavailable_notice(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Biometric authentication unavailable",
            Style::default().fg(STATUS_ERROR),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enable biometric authentication",
            Style::default().fg(HEADER_TEXT),
        )),
        Line::from(Span::styled(
            "in Settings to unlock",
            Style::default().fg(HEADER_TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Try again",
            Style::default().fg(MUTED_TEXT),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Filled and empty slots for `entered` of [`PIN_LENGTH`] digits.
fn pin_slots(entered: usize) -> String {
    (0..PIN_LENGTH)
        .map(|i| if i < entered { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Move `rect` horizontally by `offset` cells, keeping its width.
fn shifted(rect: Rect, offset: i16) -> Rect {
    let x = if offset >= 0 {
        rect.x.saturating_add(offset as u16)
    } else {
        rect.x.saturating_sub(offset.unsigned_abs())
    };
    Rect { x, ..rect }
}

// ============================================================================
// Guarded content
// ============================================================================

fn render_home(frame: &mut Frame<'_>, body: Rect, app: &App) {
    let summary = app.home_summary();
    let on_off = |value: bool| if value { "on" } else { "off" };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Balance overview",
            Style::default()
                .fg(HEADER_TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  App lock:            ", Style::default().fg(MUTED_TEXT)),
            Span::styled(on_off(summary.lock_enabled), Style::default().fg(HEADER_TEXT)),
        ]),
        Line::from(vec![
            Span::styled("  Lock on background:  ", Style::default().fg(MUTED_TEXT)),
            Span::styled(
                on_off(summary.lock_on_background),
                Style::default().fg(HEADER_TEXT),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Unlock method:       ", Style::default().fg(MUTED_TEXT)),
            Span::styled(summary.method.label(), Style::default().fg(HEADER_TEXT)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), body);

    if let Some(status) = app.status() {
        render_status_line(frame, body, status, STATUS_OK);
    }
}

fn render_status_line(frame: &mut Frame<'_>, body: Rect, status: &str, color: Color) {
    if body.height == 0 {
        return;
    }
    let line_area = Rect {
        y: body.y + body.height - 1,
        height: 1,
        ..body
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(color),
        )))
        .alignment(Alignment::Center),
        line_area,
    );
}

// ============================================================================
// Settings panel
// ============================================================================

fn render_settings_dialog(frame: &mut Frame<'_>, body: Rect, state: &SettingsDialogState) {
    let Some(panel) = state.panel() else {
        return;
    };

    let area = centered_rect(70, 70, body);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Security ", Style::default().fg(KOIN_ACCENT)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));

    let mut lines: Vec<Line<'static>> = SettingId::all()
        .iter()
        .flat_map(|id| settings_field_lines(panel, *id))
        .collect();
    lines.push(Line::from(""));
    if panel.confirm_discard {
        lines.push(Line::from(Span::styled(
            "Unsaved changes. Esc again to discard",
            Style::default().fg(STATUS_ERROR),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn settings_field_lines(panel: &SecurityPanel, id: SettingId) -> Vec<Line<'static>> {
    let draft = &panel.draft;
    let disabled_reason = id.disabled_reason(draft);
    let (value_style, label_style) = if disabled_reason.is_some() {
        let dimmed = Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM);
        (dimmed, dimmed)
    } else {
        (
            Style::default().fg(KOIN_ACCENT),
            Style::default().fg(HEADER_TEXT),
        )
    };

    let checkbox = |on: bool| if on { " [x] " } else { " [ ] " };
    let spans = match id {
        SettingId::LockEnabled | SettingId::LockOnBackground => {
            let on = match id {
                SettingId::LockEnabled => draft.enabled,
                _ => draft.lock_on_background,
            };
            vec![
                Span::styled(checkbox(on), value_style),
                Span::styled(id.label(), label_style),
            ]
        }
        SettingId::Method => vec![
            Span::styled(format!("     {}: ", id.label()), label_style),
            Span::styled(format!("‹ {} ›", draft.method.label()), value_style),
        ],
        SettingId::Pin => {
            let value = if panel.new_pin.is_empty() {
                "••••".to_string()
            } else {
                pin_slots(panel.new_pin.len())
            };
            vec![
                Span::styled(format!("     {}: ", id.label()), label_style),
                Span::styled(value, value_style),
            ]
        }
    };

    let mut name_line = Line::from(spans);
    let mut description_line = Line::from(Span::styled(
        format!("     {}", disabled_reason.unwrap_or(id.description())),
        Style::default().fg(MUTED_TEXT),
    ));
    if panel.focused == id {
        let highlight_style = Style::default().bg(ACTIVE_HIGHLIGHT);
        name_line = name_line.style(highlight_style);
        description_line = description_line.style(highlight_style);
    }
    vec![name_line, description_line]
}
