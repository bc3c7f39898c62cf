//! Status bar widget: one-line submission state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::SubmitOutcome;

/// Data passed to the status bar widget; decoupled from `FormState`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// A submission is in flight.
    pub pending: bool,
    /// Every required field is currently valid.
    pub can_submit: bool,
    pub outcome: Option<SubmitOutcome>,
    /// Execode issued by the last successful submission.
    pub execode: Option<String>,
    /// Preformatted time of the last submission attempt.
    pub last_submission: Option<String>,
}

/// Renders the submission state.
///
/// Display format:
/// - In flight:  `Submitting...`  (Yellow)
/// - Otherwise the outcome, if any, then `ready` / `incomplete`
/// - Execode and last submission time are appended when known
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let mut spans: Vec<Span> = Vec::new();

    if ctx.pending {
        spans.push(Span::styled(
            "Submitting...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    } else {
        if let Some(outcome) = &ctx.outcome {
            let color = match outcome {
                SubmitOutcome::Succeeded => Color::Green,
                _ => Color::Red,
            };
            spans.push(Span::styled(outcome.to_string(), Style::default().fg(color)));
            spans.push(Span::raw("  "));
        }
        if ctx.can_submit {
            spans.push(Span::styled("ready", Style::default().fg(Color::Green)));
        } else {
            spans.push(Span::styled("incomplete", Style::default().fg(Color::DarkGray)));
        }
    }

    if let Some(code) = &ctx.execode {
        spans.push(Span::styled("  execode ", cyan));
        spans.push(Span::styled(
            code.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(at) = &ctx.last_submission {
        spans.push(Span::styled(format!("  last {at}"), cyan));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
