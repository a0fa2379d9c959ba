use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HOME_HINTS: &str = " s: Settings │ Ctrl+Z: Suspend │ q: Quit";
const SETTINGS_HINTS: &str = " ↑↓: Move │ Space: Toggle │ ←→: Method │ Enter: Save │ Esc: Close";
const LOCK_HINTS: &str = " Ctrl+Z: Suspend │ Ctrl+Q: Quit";

/// Which key hints to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterContext {
    Home,
    Settings,
    Locked,
}

pub struct Footer {
    context: FooterContext,
}

impl Footer {
    pub fn new(context: FooterContext) -> Self {
        Self { context }
    }

    fn hints(&self) -> &'static str {
        match self.context {
            FooterContext::Home => HOME_HINTS,
            FooterContext::Settings => SETTINGS_HINTS,
            FooterContext::Locked => LOCK_HINTS,
        }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let hints = self.hints();
        let version = format!("v{} ", VERSION);

        // Calculate padding using char count, not byte count (for Unicode)
        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize; // minus borders
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_footer_hides_app_shortcuts() {
        let hints = Footer::new(FooterContext::Locked).hints();
        assert!(!hints.contains("Settings"));
        assert!(Footer::new(FooterContext::Home).hints().contains("Settings"));
    }
}
