//! Focus management and field rendering for form screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph, Wrap};

use crate::model::Validity;

/// Ordered set of focusable items with wrapping focus.
#[derive(Debug, Clone)]
pub struct FocusRing<T> {
    items: Vec<T>,
    focus: usize,
}

impl<T: Copy + PartialEq> FocusRing<T> {
    /// Creates a ring focused on the first item.
    pub fn new(items: Vec<T>) -> Self {
        Self { items, focus: 0 }
    }

    /// Returns the index of the focused item.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns the focused item, or `None` for an empty ring.
    pub fn current(&self) -> Option<T> {
        self.items.get(self.focus).copied()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Moves focus to the next item, wrapping around.
    pub fn focus_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.items.len();
    }

    /// Moves focus to the previous item, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.focus = (self.focus + self.items.len() - 1) % self.items.len();
    }

    /// Focuses `item`. Returns `false` if it is not in the ring.
    pub fn set_focus(&mut self, item: T) -> bool {
        match self.items.iter().position(|i| *i == item) {
            Some(pos) => {
                self.focus = pos;
                true
            }
            None => false,
        }
    }

    /// Replaces the items, keeping focus on the same item when it survives.
    pub fn set_items(&mut self, items: Vec<T>) {
        let current = self.current();
        self.items = items;
        self.focus = 0;
        if let Some(item) = current {
            self.set_focus(item);
        }
    }
}

/// Everything needed to render one text field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView<'a> {
    pub label: String,
    pub value: &'a str,
    pub validity: Validity,
    pub focused: bool,
    pub required: bool,
    pub error: Option<String>,
    /// `(current length, maximum length)` for length-capped fields.
    pub counter: Option<(usize, usize)>,
    /// Percentage of the cap in use; may exceed 100.
    pub percent: f64,
}

impl FieldView<'_> {
    /// Rows needed to render this field.
    pub fn height(&self) -> u16 {
        let text_rows = self.value.split('\n').count().clamp(1, 4) as u16;
        let gauge_rows = u16::from(self.counter.is_some());
        text_rows + gauge_rows + 2
    }

    fn border_color(&self) -> Color {
        match self.validity {
            Validity::Invalid => Color::Red,
            Validity::Valid if !self.focused => Color::Green,
            _ if self.focused => Color::Yellow,
            _ => Color::DarkGray,
        }
    }
}

/// Renders a single field: validity-colored border, value with cursor,
/// error and counter in the bottom border, and a fill gauge when capped.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_field(view: &FieldView, frame: &mut Frame, area: Rect) {
    let label = if view.required {
        format!("{} *", view.label)
    } else {
        view.label.clone()
    };

    let mut block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(view.border_color()));

    if let Some(ref err) = view.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {err} "),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some((len, max)) = view.counter {
        let style = if view.percent > 100.0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        block = block.title_bottom(Line::from(Span::styled(format!(" {len}/{max} "), style)).right_aligned());
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gauge_height = u16::from(view.counter.is_some());
    let [text_area, gauge_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(gauge_height)]).areas(inner);

    let mut lines: Vec<Line> = view.value.split('\n').map(|l| Line::from(l.to_string())).collect();
    if view.focused
        && let Some(last) = lines.last_mut()
    {
        last.push_span(Span::styled(
            "\u{2588}",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), text_area);

    if view.counter.is_some() {
        let gauge_color = if view.percent > 100.0 {
            Color::Red
        } else {
            Color::Cyan
        };
        let gauge = LineGauge::default()
            .ratio((view.percent / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", view.percent))
            .filled_style(Style::default().fg(gauge_color))
            .unfilled_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(gauge, gauge_area);
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Item {
        A,
        B,
        C,
    }

    fn make_ring() -> FocusRing<Item> {
        FocusRing::new(vec![Item::A, Item::B, Item::C])
    }

    // --- Focus management ---

    #[test]
    fn focus_starts_at_zero() {
        let ring = make_ring();
        assert_eq!(ring.focus(), 0);
        assert_eq!(ring.current(), Some(Item::A));
    }

    #[test]
    fn focus_next_wraps() {
        let mut ring = make_ring();
        ring.focus_next();
        ring.focus_next();
        assert_eq!(ring.current(), Some(Item::C));
        ring.focus_next();
        assert_eq!(ring.current(), Some(Item::A));
    }

    #[test]
    fn focus_prev_wraps() {
        let mut ring = make_ring();
        ring.focus_prev();
        assert_eq!(ring.current(), Some(Item::C));
    }

    #[test]
    fn empty_ring_is_noop() {
        let mut ring: FocusRing<Item> = FocusRing::new(vec![]);
        ring.focus_next();
        ring.focus_prev();
        assert_eq!(ring.focus(), 0);
        assert_eq!(ring.current(), None);
    }

    #[test]
    fn set_focus_on_missing_item() {
        let mut ring = FocusRing::new(vec![Item::A, Item::B]);
        assert!(!ring.set_focus(Item::C));
        assert_eq!(ring.current(), Some(Item::A));
    }

    #[test]
    fn set_items_keeps_surviving_focus() {
        let mut ring = make_ring();
        ring.set_focus(Item::C);
        ring.set_items(vec![Item::C, Item::A]);
        assert_eq!(ring.current(), Some(Item::C));
        assert_eq!(ring.focus(), 0);
    }

    #[test]
    fn set_items_resets_when_focus_removed() {
        let mut ring = make_ring();
        ring.set_focus(Item::B);
        ring.set_items(vec![Item::A, Item::C]);
        assert_eq!(ring.current(), Some(Item::A));
    }

    #[quickcheck]
    fn next_then_prev_returns_to_start(len: u8, steps: u8) -> bool {
        let len = (len % 10) as usize + 1;
        let mut ring = FocusRing::new((0..len).collect());
        for _ in 0..steps {
            ring.focus_next();
        }
        let here = ring.focus();
        ring.focus_next();
        ring.focus_prev();
        ring.focus() == here && here < len
    }

    // --- FieldView ---

    fn view(value: &str) -> FieldView<'_> {
        FieldView {
            label: "Keyword".into(),
            value,
            validity: Validity::Unset,
            focused: false,
            required: true,
            error: None,
            counter: Some((value.chars().count(), 5)),
            percent: value.chars().count() as f64 / 5.0 * 100.0,
        }
    }

    #[test]
    fn height_includes_gauge_row() {
        assert_eq!(view("abc").height(), 4);
        let plain = FieldView {
            counter: None,
            ..view("abc")
        };
        assert_eq!(plain.height(), 3);
    }

    #[test]
    fn height_grows_with_lines_up_to_four() {
        assert_eq!(view("a\nb").height(), 5);
        assert_eq!(view("a\nb\nc\nd\ne\nf").height(), 7);
    }

    #[test]
    fn trailing_newline_gets_its_own_row() {
        assert_eq!(view("a\n").height(), 5);
        assert_eq!(view("\n").height(), 5);
    }

    #[test]
    fn border_colors() {
        let invalid = FieldView {
            validity: Validity::Invalid,
            focused: true,
            ..view("abcdef")
        };
        assert_eq!(invalid.border_color(), Color::Red);
        let valid = FieldView {
            validity: Validity::Valid,
            ..view("abc")
        };
        assert_eq!(valid.border_color(), Color::Green);
        let focused = FieldView {
            focused: true,
            ..view("")
        };
        assert_eq!(focused.border_color(), Color::Yellow);
        assert_eq!(view("").border_color(), Color::DarkGray);
    }

    // --- Rendering ---

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render(view: &FieldView, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_field(view, frame, frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn renders_label_value_and_counter() {
        let output = render(&view("abc"), 40, 4);
        assert!(output.contains("Keyword *"), "should show required label");
        assert!(output.contains("abc"), "should show value");
        assert!(output.contains("3/5"), "should show counter");
        assert!(output.contains("60%"), "should show gauge label");
    }

    #[test]
    fn renders_over_limit_percent() {
        let output = render(&view("abcdef"), 40, 4);
        assert!(output.contains("6/5"));
        assert!(output.contains("120%"));
    }

    #[test]
    fn renders_error() {
        let invalid = FieldView {
            validity: Validity::Invalid,
            error: Some("content cannot be empty".into()),
            ..view("")
        };
        let output = render(&invalid, 50, 4);
        assert!(output.contains("content cannot be empty"));
    }
}
