use crate::calendar::{build_month_grid, format_selection, DayCell, Selection};
use crate::picker::{PickerConfig, PickerState, Placement};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

// In-range fill between the endpoints of a committed range
const RANGE_BG: Color = Color::Rgb(40, 44, 52);

/// Rows a rendered field occupies: label, bordered value box, error line.
pub const FIELD_HEIGHT: u16 = 5;

/// Popup rows: title, weekday header, six week rows, footer, plus borders.
pub const POPUP_HEIGHT: u16 = 11;

/// Screen geometry of a rendered field, kept for hit-testing.
pub struct FieldLayout {
    pub area: Rect,
    /// The bordered value box; clicks here toggle the popup, and the popup
    /// anchors to it.
    pub box_area: Rect,
    /// The clear indicator cell, present only when one is drawn.
    pub clear_hit: Option<Rect>,
}

/// Screen geometry of a rendered popup, kept for hit-testing.
pub struct PopupLayout {
    pub area: Rect,
    pub grid: Rect,
    pub prev_arrow: Rect,
    pub next_arrow: Rect,
    pub today_button: Rect,
    pub done_button: Rect,
}

impl PopupLayout {
    /// Maps a screen position inside the grid to its 0..42 cell index.
    pub fn cell_index_at(&self, x: u16, y: u16) -> Option<usize> {
        if !rect_contains(self.grid, x, y) {
            return None;
        }
        let col = ((x - self.grid.x) / 3) as usize;
        let row = (y - self.grid.y) as usize;
        Some(row * 7 + col)
    }
}

/// One picker drawn as a labelled field plus, while open, a calendar popup
/// floated over the rest of the screen.
pub struct DatePickerView<'a> {
    pub state: &'a PickerState,
    pub selection: &'a Selection,
    pub config: &'a PickerConfig,
    pub label: &'a str,
    pub focused: bool,
}

impl DatePickerView<'_> {
    pub fn render_field(&self, f: &mut Frame, area: Rect) -> FieldLayout {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // label
                Constraint::Length(3), // bordered value box
                Constraint::Length(1), // error line
            ])
            .split(area);

        let label_style = if self.focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        f.render_widget(
            Paragraph::new(Span::styled(self.label, label_style)),
            chunks[0],
        );

        let border_style = if self.config.error.is_some() {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let text = format_selection(self.selection, self.config.date_format);
        let value_line = if text.is_empty() {
            Line::from(Span::styled(
                self.config.placeholder.clone(),
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else if self.config.disabled {
            Line::from(Span::styled(
                text,
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(Span::raw(text))
        };
        let box_area = chunks[1];
        f.render_widget(
            Paragraph::new(value_line).block(Block::default().borders(Borders::ALL).border_style(border_style)),
            box_area,
        );

        // Clear indicator inside the right edge of the box
        let clear_hit = if self.config.clearable && !self.selection.is_empty() && !self.config.disabled && box_area.width > 3 {
            let hit = Rect {
                x: box_area.x + box_area.width - 3,
                y: box_area.y + 1,
                width: 1,
                height: 1,
            };
            f.render_widget(
                Paragraph::new(Span::styled("x", Style::default().add_modifier(Modifier::DIM))),
                hit,
            );
            Some(hit)
        } else {
            None
        };

        if let Some(error) = &self.config.error {
            f.render_widget(
                Paragraph::new(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )),
                chunks[2],
            );
        }

        FieldLayout {
            area,
            box_area,
            clear_hit,
        }
    }

    /// Draws the open popup anchored to `anchor` and returns its geometry.
    pub fn render_popup(&self, f: &mut Frame, anchor: Rect) -> PopupLayout {
        let frame_area = f.area();
        let (width, height) = popup_size(self.config);
        let area = resolve_popup_rect(self.config.placement, anchor, frame_area, width, height);

        f.render_widget(Clear, area);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);

        let locale = self.config.locale;
        let title = format!(
            "{} {}",
            locale.month_name(self.state.view.month),
            self.state.view.year
        );
        let arrow_style = Style::default().add_modifier(Modifier::BOLD);
        let title_width = (inner.width as usize).saturating_sub(2);
        let mut lines: Vec<Line> = vec![
            Line::from(vec![
                Span::styled("<", arrow_style),
                Span::styled(
                    format!("{:^width$}", title, width = title_width),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                Span::styled(">", arrow_style),
            ]),
            weekday_header(self.config),
        ];

        let cells = build_month_grid(
            self.state.view,
            self.selection,
            self.state.today,
            &self.config.bounds,
        );
        for row in 0..6 {
            let mut spans = Vec::new();
            if self.config.show_week_numbers {
                spans.push(Span::styled(
                    format!("{:>2} ", cells[row * 7].week),
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
            for col in 0..7usize {
                let cell = &cells[row * 7 + col];
                let is_cursor = self.focused && cell.date == self.state.cursor;
                spans.push(Span::styled(
                    format!("{:2}", cell.day),
                    day_cell_style(cell, is_cursor),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        let button_style = Style::default().fg(Color::Cyan);
        lines.push(Line::from(vec![
            Span::styled("[Today]", button_style),
            Span::raw("  "),
            Span::styled("[Done]", button_style),
        ]));

        f.render_widget(Paragraph::new(lines).block(block), area);

        let week_offset = if self.config.show_week_numbers { 3 } else { 0 };
        let footer_y = inner.y + 8;
        PopupLayout {
            area,
            grid: Rect {
                x: inner.x + week_offset,
                y: inner.y + 2,
                width: 21,
                height: 6,
            },
            prev_arrow: Rect {
                x: inner.x,
                y: inner.y,
                width: 1,
                height: 1,
            },
            next_arrow: Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: 1,
            },
            today_button: Rect {
                x: inner.x,
                y: footer_y,
                width: 7,
                height: 1,
            },
            done_button: Rect {
                x: inner.x + 9,
                y: footer_y,
                width: 6,
                height: 1,
            },
        }
    }
}

fn weekday_header(config: &PickerConfig) -> Line<'static> {
    let labels = config.locale.day_labels().join(" ");
    if config.show_week_numbers {
        Line::from(vec![Span::raw("   "), Span::raw(labels)])
    } else {
        Line::from(labels)
    }
}

/// Popup outer size in cells, depending on the week-number column.
pub fn popup_size(config: &PickerConfig) -> (u16, u16) {
    let width = if config.show_week_numbers { 26 } else { 23 };
    (width, POPUP_HEIGHT)
}

/// Determines the ratatui `Style` for a day cell based on its flags.
pub(crate) fn day_cell_style(cell: &DayCell, is_cursor: bool) -> Style {
    let mut style = if cell.is_selected || cell.is_range_start || cell.is_range_end {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if cell.is_in_range {
        Style::default().bg(RANGE_BG)
    } else if !cell.in_current_month {
        Style::default().add_modifier(Modifier::DIM)
    } else if cell.is_disabled {
        Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else if cell.is_today {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    if is_cursor && cell.in_current_month {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Places the popup relative to its anchor box, flipping `Auto` above when
/// the space below would clip it, then clamps into the frame.
pub(crate) fn resolve_popup_rect(
    placement: Placement,
    anchor: Rect,
    frame: Rect,
    width: u16,
    height: u16,
) -> Rect {
    let below_fits = anchor.y + anchor.height + height <= frame.y + frame.height;
    let place_above = match placement {
        Placement::Top => true,
        Placement::Bottom => false,
        Placement::Auto => !below_fits,
    };
    let y = if place_above {
        anchor.y.saturating_sub(height)
    } else {
        anchor.y + anchor.height
    };
    let x = anchor
        .x
        .min((frame.x + frame.width).saturating_sub(width))
        .max(frame.x);
    let y = y
        .min((frame.y + frame.height).saturating_sub(height))
        .max(frame.y);
    Rect {
        x,
        y,
        width: width.min(frame.width),
        height: height.min(frame.height),
    }
}

pub(crate) fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
