use crate::calendar::{build_month_grid, format_selection, Selection};
use crate::data::{BlockedDateData, DemoSettings, SavedSelection};
use crate::picker::{PickerConfig, PickerEffect, PickerEvent, PickerState};
use crate::ui::picker_view::{
    rect_contains, DatePickerView, FieldLayout, PopupLayout, FIELD_HEIGHT,
};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io::Stdout;
use std::time::Duration as StdDuration;

/// One picker on the demo screen: its committed value plus everything the
/// controller and renderer need.
pub struct PickerField {
    pub label: &'static str,
    pub selection: Selection,
    pub state: PickerState,
    pub config: PickerConfig,
}

pub struct App {
    pub fields: [PickerField; 2],
    pub focus: usize,
    pub settings: DemoSettings,
    /// Blocked-date reasons keyed by "%Y-%m-%d", for the status line.
    reasons: HashMap<String, String>,
    status: Option<String>,
    /// Geometry captured during the last draw, for mouse hit-testing.
    field_layouts: [Option<FieldLayout>; 2],
    popup_layout: Option<PopupLayout>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum PopupClick {
    PrevArrow,
    NextArrow,
    TodayButton,
    DoneButton,
    Cell(usize),
    Body,
    Outside,
}

#[derive(Clone, Copy)]
enum FieldClick {
    Box(usize),
    Clear(usize),
}

impl App {
    pub fn new(
        settings: DemoSettings,
        blocked_data: &BlockedDateData,
        saved: &SavedSelection,
        today: NaiveDate,
    ) -> Result<Self> {
        let blocked_dates = blocked_data.parsed_dates()?;
        let reasons = blocked_data
            .get_reason_map()
            .into_iter()
            .map(|(date, b)| (date, b.reason.clone()))
            .collect();

        let delivery = saved.delivery()?;
        let pause = saved.pause()?;
        let fields = [
            PickerField {
                label: "Delivery date",
                state: PickerState::new(today, &delivery),
                config: settings.picker_config("Select delivery date", blocked_dates.clone()),
                selection: delivery,
            },
            PickerField {
                label: "Pause deliveries",
                state: PickerState::new(today, &pause),
                config: settings.picker_config("Select pause range", blocked_dates),
                selection: pause,
            },
        ];

        Ok(App {
            fields,
            focus: 0,
            settings,
            reasons,
            status: None,
            field_layouts: [None, None],
            popup_layout: None,
        })
    }

    pub fn saved(&self) -> SavedSelection {
        SavedSelection::from_fields(&self.fields[0].selection, &self.fields[1].selection)
    }

    fn focused_open(&self) -> bool {
        let field = &self.fields[self.focus];
        field.state.is_open(&field.config)
    }

    /// Runs one controller transition and mirrors its effects back into the
    /// app: the committed value, the status line, and the other popup.
    fn dispatch(&mut self, index: usize, event: PickerEvent) {
        let effects = {
            let field = &mut self.fields[index];
            field.state.apply(event, &field.selection, &field.config)
        };
        let mut opened = false;
        for effect in effects {
            match effect {
                PickerEffect::ValueChanged(next) => {
                    self.fields[index].selection = next;
                    self.status = Some(selection_status(&self.fields[index]));
                }
                PickerEffect::Opened => opened = true,
                PickerEffect::Closed => {}
            }
        }
        // only one popup at a time
        if opened {
            let other = 1 - index;
            let field = &mut self.fields[other];
            field.state.apply(PickerEvent::Close, &field.selection, &field.config);
        }
    }

    /// Select with blocked-date feedback: a refused click explains itself on
    /// the status line instead of silently doing nothing.
    fn try_select(&mut self, index: usize, date: NaiveDate) {
        if self.fields[index].config.bounds.disables(date) {
            let key = date.format("%Y-%m-%d").to_string();
            self.status = Some(match self.reasons.get(&key) {
                Some(reason) => format!("{} is blocked: {}", key, reason),
                None => format!("{} is not selectable", key),
            });
            return;
        }
        self.dispatch(index, PickerEvent::SelectDate(date));
    }

    fn switch_focus(&mut self) {
        self.dispatch(self.focus, PickerEvent::Close);
        self.focus = 1 - self.focus;
    }

    fn toggle_week_numbers(&mut self) {
        self.settings.show_week_numbers = !self.settings.show_week_numbers;
        for field in &mut self.fields {
            field.config.show_week_numbers = self.settings.show_week_numbers;
        }
    }

    fn cycle_date_format(&mut self) {
        self.settings.date_format = self.settings.date_format.cycled();
        for field in &mut self.fields {
            field.config.date_format = self.settings.date_format;
        }
        self.status = Some(format!("date format: {}", self.settings.date_format.label()));
    }

    // ── Input handling ────────────────────────────────────────────────────────

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        self.status = None;
        let focus = self.focus;
        let open = self.focused_open();
        match code {
            KeyCode::Char('q') if !open => return true,
            KeyCode::Esc if open => self.dispatch(focus, PickerEvent::Close),
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::Enter if open => {
                let date = self.fields[focus].state.cursor;
                self.try_select(focus, date);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.dispatch(focus, PickerEvent::Open),
            KeyCode::Left if open => self.dispatch(focus, PickerEvent::CursorMove { days: -1 }),
            KeyCode::Right if open => self.dispatch(focus, PickerEvent::CursorMove { days: 1 }),
            KeyCode::Up if open => self.dispatch(focus, PickerEvent::CursorMove { days: -7 }),
            KeyCode::Down if open => self.dispatch(focus, PickerEvent::CursorMove { days: 7 }),
            KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown if open => {
                self.dispatch(focus, PickerEvent::NavigateMonth(1))
            }
            KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp if open => {
                self.dispatch(focus, PickerEvent::NavigateMonth(-1))
            }
            KeyCode::Char('t') if open => self.dispatch(focus, PickerEvent::GoToToday),
            KeyCode::Char('c') if self.fields[focus].config.clearable => {
                self.dispatch(focus, PickerEvent::Clear)
            }
            KeyCode::Char('w') => self.toggle_week_numbers(),
            KeyCode::Char('f') => self.cycle_date_format(),
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(x, y),
            MouseEventKind::ScrollUp if self.popup_hit(x, y) => {
                self.dispatch(self.focus, PickerEvent::NavigateMonth(-1));
            }
            MouseEventKind::ScrollDown if self.popup_hit(x, y) => {
                self.dispatch(self.focus, PickerEvent::NavigateMonth(1));
            }
            _ => {}
        }
    }

    fn popup_hit(&self, x: u16, y: u16) -> bool {
        self.focused_open()
            && self
                .popup_layout
                .as_ref()
                .map(|layout| rect_contains(layout.area, x, y))
                .unwrap_or(false)
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        self.status = None;
        let focus = self.focus;
        if self.focused_open() {
            let click = self
                .popup_layout
                .as_ref()
                .map(|layout| classify_popup_click(layout, x, y));
            match click {
                Some(PopupClick::PrevArrow) => self.dispatch(focus, PickerEvent::NavigateMonth(-1)),
                Some(PopupClick::NextArrow) => self.dispatch(focus, PickerEvent::NavigateMonth(1)),
                Some(PopupClick::TodayButton) => self.dispatch(focus, PickerEvent::GoToToday),
                Some(PopupClick::DoneButton) => self.dispatch(focus, PickerEvent::Close),
                Some(PopupClick::Cell(index)) => self.click_cell(focus, index),
                Some(PopupClick::Body) => {}
                Some(PopupClick::Outside) | None => self.click_outside_popup(focus, x, y),
            }
        } else {
            match self.classify_field_click(x, y) {
                Some(FieldClick::Clear(i)) => {
                    self.focus = i;
                    self.dispatch(i, PickerEvent::Clear);
                }
                Some(FieldClick::Box(i)) => {
                    self.focus = i;
                    self.dispatch(i, PickerEvent::Open);
                }
                None => {}
            }
        }
    }

    /// Resolves a grid cell index back to its date. The grid is rebuilt from
    /// the same inputs the renderer used, so indices line up.
    fn click_cell(&mut self, field_index: usize, cell_index: usize) {
        let field = &self.fields[field_index];
        let cells = build_month_grid(
            field.state.view,
            &field.selection,
            field.state.today,
            &field.config.bounds,
        );
        if let Some(cell) = cells.get(cell_index) {
            if cell.in_current_month {
                let date = cell.date;
                self.try_select(field_index, date);
            }
        }
    }

    fn click_outside_popup(&mut self, focus: usize, x: u16, y: u16) {
        match self.classify_field_click(x, y) {
            // clicking the open picker's own box toggles it closed
            Some(FieldClick::Box(i)) if i == focus => self.dispatch(focus, PickerEvent::Close),
            Some(FieldClick::Box(i)) => {
                self.dispatch(focus, PickerEvent::Close);
                self.focus = i;
                self.dispatch(i, PickerEvent::Open);
            }
            Some(FieldClick::Clear(i)) => self.dispatch(i, PickerEvent::Clear),
            None => self.dispatch(focus, PickerEvent::OutsidePress),
        }
    }

    fn classify_field_click(&self, x: u16, y: u16) -> Option<FieldClick> {
        for (i, layout) in self.field_layouts.iter().enumerate() {
            if let Some(layout) = layout {
                if let Some(hit) = layout.clear_hit {
                    if rect_contains(hit, x, y) {
                        return Some(FieldClick::Clear(i));
                    }
                }
                if rect_contains(layout.box_area, x, y) {
                    return Some(FieldClick::Box(i));
                }
            }
        }
        None
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),            // title
                Constraint::Length(1),            // spacer
                Constraint::Length(FIELD_HEIGHT), // delivery date field
                Constraint::Length(1),            // spacer
                Constraint::Length(FIELD_HEIGHT), // pause range field
                Constraint::Min(1),               // filler
                Constraint::Length(1),            // status
                Constraint::Length(1),            // help
            ])
            .split(size);

        f.render_widget(
            Paragraph::new(Span::styled(
                "Delivery scheduling",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );

        let field_areas = [chunks[2], chunks[4]];
        for i in 0..2 {
            let field = &self.fields[i];
            let view = DatePickerView {
                state: &field.state,
                selection: &field.selection,
                config: &field.config,
                label: field.label,
                focused: i == self.focus,
            };
            let layout = view.render_field(f, field_areas[i]);
            self.field_layouts[i] = Some(layout);
        }

        // The open popup draws last so it floats above everything else.
        self.popup_layout = None;
        if self.focused_open() {
            if let Some(anchor) = self.field_layouts[self.focus]
                .as_ref()
                .map(|layout| layout.box_area)
            {
                let field = &self.fields[self.focus];
                let view = DatePickerView {
                    state: &field.state,
                    selection: &field.selection,
                    config: &field.config,
                    label: field.label,
                    focused: true,
                };
                self.popup_layout = Some(view.render_popup(f, anchor));
            }
        }

        // With no explicit status, an open popup labels its cursor date.
        let status_text = match &self.status {
            Some(status) => Some(status.clone()),
            None if self.focused_open() => {
                let field = &self.fields[self.focus];
                Some(field.config.locale.long_date(field.state.cursor))
            }
            None => None,
        };
        if let Some(text) = status_text {
            f.render_widget(Paragraph::new(text), chunks[6]);
        }
        f.render_widget(
            Paragraph::new(Span::styled(
                "Tab switch  Enter open/select  arrows move  n/p month  t today  c clear  w weeks  f format  q quit",
                Style::default().add_modifier(Modifier::DIM),
            )),
            chunks[7],
        );
    }
}

fn selection_status(field: &PickerField) -> String {
    if field.selection.is_empty() {
        return format!("{} cleared", field.label);
    }
    match &field.selection {
        Selection::Single(Some(date)) => {
            format!("{}: {}", field.label, field.config.locale.long_date(*date))
        }
        _ => format!(
            "{}: {}",
            field.label,
            format_selection(&field.selection, field.config.date_format)
        ),
    }
}

fn classify_popup_click(layout: &PopupLayout, x: u16, y: u16) -> PopupClick {
    if rect_contains(layout.prev_arrow, x, y) {
        PopupClick::PrevArrow
    } else if rect_contains(layout.next_arrow, x, y) {
        PopupClick::NextArrow
    } else if rect_contains(layout.today_button, x, y) {
        PopupClick::TodayButton
    } else if rect_contains(layout.done_button, x, y) {
        PopupClick::DoneButton
    } else if let Some(index) = layout.cell_index_at(x, y) {
        PopupClick::Cell(index)
    } else if rect_contains(layout.area, x, y) {
        PopupClick::Body
    } else {
        PopupClick::Outside
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => {
                    app.handle_mouse(mouse.kind, mouse.column, mouse.row);
                }
                _ => {}
            }
        }
    }
    Ok(())
}
