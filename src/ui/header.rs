use crate::lock::LockMethod;
use crate::ui::app::HomeSummary;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, KOIN_ACCENT, MUTED_TEXT, STATUS_OK};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, summary: &HomeSummary) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(MUTED_TEXT);
        let (lock_icon, lock_style) = if summary.lock_enabled {
            ("🔒", Style::default().fg(STATUS_OK))
        } else {
            ("🔓", separator_style)
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(
                "Koin",
                Style::default()
                    .fg(KOIN_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(greeting(&summary.user_name), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(lock_icon, lock_style),
            Span::styled(" ", text_style),
            Span::styled(lock_label(summary), text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

fn greeting(user_name: &str) -> String {
    if user_name.is_empty() {
        "Welcome".to_string()
    } else {
        format!("Welcome, {}", user_name)
    }
}

fn lock_label(summary: &HomeSummary) -> String {
    if !summary.lock_enabled {
        return "App lock off".to_string();
    }
    match summary.method {
        LockMethod::Biometric => "Biometric lock".to_string(),
        LockMethod::NumericPin => "PIN lock".to_string(),
        LockMethod::BiometricThenPin => "Biometric + PIN lock".to_string(),
    }
}
