use chrono::{Duration, NaiveDate};

use crate::calendar::{DateRange, Selection, ViewMonth};
use crate::picker::config::PickerConfig;

/// Range-mode progress. Single-date pickers never leave `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Idle,
    AwaitingRangeEnd,
}

/// User interactions, as forwarded by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    Open,
    Close,
    NavigateMonth(i32),
    GoToToday,
    SelectDate(NaiveDate),
    Clear,
    /// A pointer interaction outside the field and popup, observed by the
    /// embedder and granted to the picker as a close trigger.
    OutsidePress,
    /// Keyboard grid navigation: signed day offset from the current cursor.
    CursorMove { days: i64 },
}

/// What the embedder must react to. `ValueChanged` carries the next value
/// for the caller to store; it fires exactly once per committed selection or
/// clear, never on navigation or open/close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEffect {
    ValueChanged(Selection),
    Opened,
    Closed,
}

/// Interaction state of one picker. The committed selection itself lives
/// with the caller and is passed back in on every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    pub view: ViewMonth,
    pub phase: SelectionPhase,
    /// Grid position keyboard navigation acts on.
    pub cursor: NaiveDate,
    pub today: NaiveDate,
    open: bool,
}

impl PickerState {
    pub fn new(today: NaiveDate, selection: &Selection) -> Self {
        let anchor = selection.anchor_date().unwrap_or(today);
        PickerState {
            view: ViewMonth::of(anchor),
            phase: SelectionPhase::Idle,
            cursor: anchor,
            today,
            open: false,
        }
    }

    /// Resolved visibility: the embedder's override wins when present.
    pub fn is_open(&self, config: &PickerConfig) -> bool {
        config.open_override.unwrap_or(self.open)
    }

    /// Runs one transition. Synchronous, infallible, and the only place
    /// state changes; effects report what the caller must mirror.
    pub fn apply(
        &mut self,
        event: PickerEvent,
        selection: &Selection,
        config: &PickerConfig,
    ) -> Vec<PickerEffect> {
        match event {
            PickerEvent::Open => self.open_picker(config),
            PickerEvent::Close | PickerEvent::OutsidePress => self.close_picker(config),
            PickerEvent::NavigateMonth(delta) => {
                self.view = self.view.shifted(delta);
                Vec::new()
            }
            PickerEvent::GoToToday => self.go_to_today(selection, config),
            PickerEvent::SelectDate(date) => self.select_date(date, selection, config),
            PickerEvent::Clear => self.clear(selection),
            PickerEvent::CursorMove { days } => {
                self.move_cursor(days);
                Vec::new()
            }
        }
    }

    /// Re-sync after the caller changed the bound value outside the effect
    /// loop. The view follows the new anchor; open state and phase stay.
    pub fn sync_selection(&mut self, selection: &Selection) {
        if let Some(anchor) = selection.anchor_date() {
            self.view = ViewMonth::of(anchor);
            self.cursor = anchor;
        }
    }

    fn open_picker(&mut self, config: &PickerConfig) -> Vec<PickerEffect> {
        if config.disabled || self.is_open(config) {
            return Vec::new();
        }
        if config.open_override.is_none() {
            self.open = true;
        }
        vec![PickerEffect::Opened]
    }

    fn close_picker(&mut self, config: &PickerConfig) -> Vec<PickerEffect> {
        if !self.is_open(config) {
            return Vec::new();
        }
        if config.open_override.is_none() {
            self.open = false;
        }
        // Closing abandons an in-progress range; the next open starts fresh
        // from whatever value the caller holds then.
        self.phase = SelectionPhase::Idle;
        vec![PickerEffect::Closed]
    }

    fn go_to_today(&mut self, selection: &Selection, config: &PickerConfig) -> Vec<PickerEffect> {
        self.view = ViewMonth::of(self.today);
        self.cursor = self.today;
        match selection {
            // Range mode: the button is a view shortcut only.
            Selection::Range(_) => Vec::new(),
            // Single mode commits today as-is, without the disabled check
            // the grid click path applies.
            Selection::Single(_) => {
                let mut effects = vec![PickerEffect::ValueChanged(Selection::Single(Some(
                    self.today,
                )))];
                effects.extend(self.close_picker(config));
                effects
            }
        }
    }

    fn select_date(
        &mut self,
        date: NaiveDate,
        selection: &Selection,
        config: &PickerConfig,
    ) -> Vec<PickerEffect> {
        if config.bounds.disables(date) || !self.view.contains(date) {
            return Vec::new();
        }
        self.cursor = date;
        match selection {
            Selection::Single(_) => {
                let mut effects =
                    vec![PickerEffect::ValueChanged(Selection::Single(Some(date)))];
                effects.extend(self.close_picker(config));
                effects
            }
            Selection::Range(range) => self.select_range_date(date, *range, config),
        }
    }

    fn select_range_date(
        &mut self,
        date: NaiveDate,
        range: DateRange,
        config: &PickerConfig,
    ) -> Vec<PickerEffect> {
        let start_new = |phase: &mut SelectionPhase| {
            *phase = SelectionPhase::AwaitingRangeEnd;
            vec![PickerEffect::ValueChanged(Selection::Range(DateRange::new(
                Some(date),
                None,
            )))]
        };

        match self.phase {
            // First click of a range, also after a prior completed range.
            SelectionPhase::Idle => start_new(&mut self.phase),
            SelectionPhase::AwaitingRangeEnd => match range.start {
                // Earlier than the pending start restarts the range.
                Some(start) if date < start => start_new(&mut self.phase),
                // Completing click; the start itself completes a same-day
                // range.
                Some(start) => {
                    self.phase = SelectionPhase::Idle;
                    let mut effects = vec![PickerEffect::ValueChanged(Selection::Range(
                        DateRange::new(Some(start), Some(date)),
                    ))];
                    effects.extend(self.close_picker(config));
                    effects
                }
                // The caller dropped the pending start from the value while
                // we were waiting; treat the click as a fresh start.
                None => start_new(&mut self.phase),
            },
        }
    }

    fn clear(&mut self, selection: &Selection) -> Vec<PickerEffect> {
        if selection.is_empty() {
            return Vec::new();
        }
        self.phase = SelectionPhase::Idle;
        vec![PickerEffect::ValueChanged(selection.cleared())]
    }

    fn move_cursor(&mut self, days: i64) {
        if let Some(next) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = next;
            // The view follows the cursor across month boundaries.
            if !self.view.contains(next) {
                self.view = ViewMonth::of(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config() -> PickerConfig {
        PickerConfig::default()
    }

    /// Applies an event and mirrors `ValueChanged` back into the caller-side
    /// selection, the way an embedder would.
    fn drive(
        state: &mut PickerState,
        selection: &mut Selection,
        config: &PickerConfig,
        event: PickerEvent,
    ) -> Vec<PickerEffect> {
        let effects = state.apply(event, selection, config);
        for effect in &effects {
            if let PickerEffect::ValueChanged(next) = effect {
                *selection = *next;
            }
        }
        effects
    }

    fn opened_range_picker(today: NaiveDate) -> (PickerState, Selection, PickerConfig) {
        let selection = Selection::Range(DateRange::default());
        let config = config();
        let mut state = PickerState::new(today, &selection);
        state.apply(PickerEvent::Open, &selection, &config);
        (state, selection, config)
    }

    #[test]
    fn test_new_syncs_view_and_cursor_to_anchor() {
        let selection = Selection::Single(Some(d(2024, 3, 5)));
        let state = PickerState::new(d(2024, 6, 1), &selection);
        assert_eq!(state.view, ViewMonth { year: 2024, month: 3 });
        assert_eq!(state.cursor, d(2024, 3, 5));
    }

    #[test]
    fn test_new_empty_selection_starts_at_today() {
        let state = PickerState::new(d(2024, 6, 1), &Selection::Single(None));
        assert_eq!(state.view, ViewMonth { year: 2024, month: 6 });
        assert_eq!(state.cursor, d(2024, 6, 1));
    }

    #[test]
    fn test_open_emits_opened_once() {
        let selection = Selection::Single(None);
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);

        assert_eq!(
            state.apply(PickerEvent::Open, &selection, &cfg),
            vec![PickerEffect::Opened]
        );
        assert!(state.is_open(&cfg));
        // already open: no duplicate notification
        assert!(state.apply(PickerEvent::Open, &selection, &cfg).is_empty());
    }

    #[test]
    fn test_open_is_noop_when_disabled() {
        let selection = Selection::Single(None);
        let cfg = PickerConfig {
            disabled: true,
            ..config()
        };
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        assert!(state.apply(PickerEvent::Open, &selection, &cfg).is_empty());
        assert!(!state.is_open(&cfg));
    }

    #[test]
    fn test_close_twice_emits_closed_once() {
        let selection = Selection::Single(None);
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        assert_eq!(
            state.apply(PickerEvent::Close, &selection, &cfg),
            vec![PickerEffect::Closed]
        );
        assert!(state.apply(PickerEvent::Close, &selection, &cfg).is_empty());
    }

    #[test]
    fn test_navigate_month_shifts_view_without_effects() {
        let selection = Selection::Single(Some(d(2024, 3, 5)));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);

        assert!(state
            .apply(PickerEvent::NavigateMonth(1), &selection, &cfg)
            .is_empty());
        assert_eq!(state.view, ViewMonth { year: 2024, month: 4 });

        state.apply(PickerEvent::NavigateMonth(-1), &selection, &cfg);
        state.apply(PickerEvent::NavigateMonth(-1), &selection, &cfg);
        assert_eq!(state.view, ViewMonth { year: 2024, month: 2 });
    }

    #[test]
    fn test_navigate_month_across_year_boundary() {
        let selection = Selection::Single(None);
        let cfg = config();
        let mut state = PickerState::new(d(2024, 12, 15), &selection);
        state.apply(PickerEvent::NavigateMonth(1), &selection, &cfg);
        assert_eq!(state.view, ViewMonth { year: 2025, month: 1 });
    }

    #[test]
    fn test_select_date_single_commits_and_closes() {
        let mut selection = Selection::Single(None);
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 5)),
        );
        assert_eq!(
            effects,
            vec![
                PickerEffect::ValueChanged(Selection::Single(Some(d(2024, 3, 5)))),
                PickerEffect::Closed,
            ]
        );
        assert_eq!(selection, Selection::Single(Some(d(2024, 3, 5))));
        assert!(!state.is_open(&cfg));
    }

    #[test]
    fn test_select_same_date_again_commits_again() {
        let mut selection = Selection::Single(Some(d(2024, 3, 5)));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 5)),
        );
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn test_select_disabled_date_is_ignored() {
        let mut selection = Selection::Single(None);
        let cfg = PickerConfig {
            bounds: crate::calendar::DateBounds {
                disabled_dates: vec![d(2024, 3, 15)],
                ..Default::default()
            },
            ..config()
        };
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 15)),
        );
        assert!(effects.is_empty());
        assert_eq!(selection, Selection::Single(None));
        assert!(state.is_open(&cfg));
    }

    #[test]
    fn test_select_outside_view_month_is_ignored() {
        let selection = Selection::Single(None);
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        // Feb 25 renders as a leading cell of the March grid but is not
        // part of the view month.
        let effects = state.apply(PickerEvent::SelectDate(d(2024, 2, 25)), &selection, &cfg);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_range_selection_full_scenario() {
        let today = d(2024, 3, 1);
        let (mut state, mut selection, cfg) = opened_range_picker(today);

        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 10)),
        );
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Range(
                DateRange::new(Some(d(2024, 3, 10)), None)
            ))]
        );
        assert_eq!(state.phase, SelectionPhase::AwaitingRangeEnd);

        // earlier than the pending start: restart
        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 5)),
        );
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Range(
                DateRange::new(Some(d(2024, 3, 5)), None)
            ))]
        );
        assert_eq!(state.phase, SelectionPhase::AwaitingRangeEnd);

        // completing click commits and closes
        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 20)),
        );
        assert_eq!(
            effects,
            vec![
                PickerEffect::ValueChanged(Selection::Range(DateRange::new(
                    Some(d(2024, 3, 5)),
                    Some(d(2024, 3, 20)),
                ))),
                PickerEffect::Closed,
            ]
        );
        assert_eq!(state.phase, SelectionPhase::Idle);
        assert!(!state.is_open(&cfg));
    }

    #[test]
    fn test_range_same_day_completes_selection() {
        let (mut state, mut selection, cfg) = opened_range_picker(d(2024, 3, 1));

        drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 10)),
        );
        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 10)),
        );
        assert_eq!(
            effects[0],
            PickerEffect::ValueChanged(Selection::Range(DateRange::new(
                Some(d(2024, 3, 10)),
                Some(d(2024, 3, 10)),
            )))
        );
        assert_eq!(state.phase, SelectionPhase::Idle);
    }

    #[test]
    fn test_range_click_after_completed_range_starts_over() {
        let mut selection = Selection::Range(DateRange::new(
            Some(d(2024, 3, 5)),
            Some(d(2024, 3, 20)),
        ));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 12)),
        );
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Range(
                DateRange::new(Some(d(2024, 3, 12)), None)
            ))]
        );
        assert_eq!(state.phase, SelectionPhase::AwaitingRangeEnd);
    }

    #[test]
    fn test_range_awaiting_end_with_lost_start_restarts() {
        let (mut state, mut selection, cfg) = opened_range_picker(d(2024, 3, 1));
        drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 10)),
        );

        // the caller wipes the value externally while the phase is pending
        selection = Selection::Range(DateRange::default());
        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 12)),
        );
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Range(
                DateRange::new(Some(d(2024, 3, 12)), None)
            ))]
        );
        assert_eq!(state.phase, SelectionPhase::AwaitingRangeEnd);
    }

    #[test]
    fn test_close_mid_range_abandons_phase() {
        let (mut state, mut selection, cfg) = opened_range_picker(d(2024, 3, 1));
        drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 10)),
        );
        assert_eq!(state.phase, SelectionPhase::AwaitingRangeEnd);

        state.apply(PickerEvent::Close, &selection, &cfg);
        assert_eq!(state.phase, SelectionPhase::Idle);

        // reopening and clicking starts a new range instead of completing
        // the abandoned one
        state.apply(PickerEvent::Open, &selection, &cfg);
        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 20)),
        );
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Range(
                DateRange::new(Some(d(2024, 3, 20)), None)
            ))]
        );
    }

    #[test]
    fn test_clear_range_resets_without_closing() {
        let mut selection = Selection::Range(DateRange::new(
            Some(d(2024, 3, 5)),
            Some(d(2024, 3, 20)),
        ));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        let effects = drive(&mut state, &mut selection, &cfg, PickerEvent::Clear);
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Range(
                DateRange::default()
            ))]
        );
        assert!(state.is_open(&cfg), "clear must not close the picker");
        assert_eq!(state.phase, SelectionPhase::Idle);
    }

    #[test]
    fn test_clear_single() {
        let mut selection = Selection::Single(Some(d(2024, 3, 5)));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);

        let effects = drive(&mut state, &mut selection, &cfg, PickerEvent::Clear);
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Single(None))]
        );
    }

    #[test]
    fn test_clear_empty_selection_is_noop() {
        let selection = Selection::Single(None);
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        assert!(state.apply(PickerEvent::Clear, &selection, &cfg).is_empty());
    }

    #[test]
    fn test_clear_mid_range_resets_phase() {
        let (mut state, mut selection, cfg) = opened_range_picker(d(2024, 3, 1));
        drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 10)),
        );
        drive(&mut state, &mut selection, &cfg, PickerEvent::Clear);
        assert_eq!(state.phase, SelectionPhase::Idle);

        // next click starts a fresh range
        let effects = drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 8)),
        );
        assert_eq!(
            effects,
            vec![PickerEffect::ValueChanged(Selection::Range(
                DateRange::new(Some(d(2024, 3, 8)), None)
            ))]
        );
    }

    #[test]
    fn test_go_to_today_single_commits_and_closes() {
        let today = d(2024, 6, 15);
        let mut selection = Selection::Single(Some(d(2024, 3, 5)));
        let cfg = config();
        let mut state = PickerState::new(today, &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        let effects = drive(&mut state, &mut selection, &cfg, PickerEvent::GoToToday);
        assert_eq!(
            effects,
            vec![
                PickerEffect::ValueChanged(Selection::Single(Some(today))),
                PickerEffect::Closed,
            ]
        );
        assert_eq!(state.view, ViewMonth { year: 2024, month: 6 });
    }

    #[test]
    fn test_go_to_today_single_commits_even_when_today_is_disabled() {
        let today = d(2024, 6, 15);
        let mut selection = Selection::Single(None);
        let cfg = PickerConfig {
            bounds: crate::calendar::DateBounds {
                disabled_dates: vec![today],
                ..Default::default()
            },
            ..config()
        };
        let mut state = PickerState::new(today, &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        // a direct click on today is rejected by the bounds check
        let effects = drive(&mut state, &mut selection, &cfg, PickerEvent::SelectDate(today));
        assert!(effects.is_empty());

        // but the today shortcut commits unconditionally
        let effects = drive(&mut state, &mut selection, &cfg, PickerEvent::GoToToday);
        assert_eq!(
            effects,
            vec![
                PickerEffect::ValueChanged(Selection::Single(Some(today))),
                PickerEffect::Closed,
            ]
        );
    }

    #[test]
    fn test_go_to_today_range_only_moves_view() {
        let today = d(2024, 6, 15);
        let mut selection = Selection::Range(DateRange::new(Some(d(2024, 3, 5)), None));
        let cfg = config();
        let mut state = PickerState::new(today, &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);
        state.apply(PickerEvent::NavigateMonth(-2), &selection, &cfg);

        let effects = drive(&mut state, &mut selection, &cfg, PickerEvent::GoToToday);
        assert!(effects.is_empty());
        assert_eq!(state.view, ViewMonth { year: 2024, month: 6 });
        assert!(state.is_open(&cfg));
    }

    #[test]
    fn test_outside_press_closes_once() {
        let selection = Selection::Single(None);
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        assert_eq!(
            state.apply(PickerEvent::OutsidePress, &selection, &cfg),
            vec![PickerEffect::Closed]
        );
        assert!(state
            .apply(PickerEvent::OutsidePress, &selection, &cfg)
            .is_empty());
    }

    #[test]
    fn test_controlled_open_true_ignores_open_event() {
        let selection = Selection::Single(None);
        let cfg = PickerConfig {
            open_override: Some(true),
            ..config()
        };
        let mut state = PickerState::new(d(2024, 3, 1), &selection);

        assert!(state.is_open(&cfg));
        assert!(state.apply(PickerEvent::Open, &selection, &cfg).is_empty());

        // close still notifies, but the internal flag stays untouched
        assert_eq!(
            state.apply(PickerEvent::Close, &selection, &cfg),
            vec![PickerEffect::Closed]
        );
        let uncontrolled = PickerConfig {
            open_override: None,
            ..config()
        };
        assert!(!state.is_open(&uncontrolled));
    }

    #[test]
    fn test_controlled_open_false_still_notifies_opened() {
        let selection = Selection::Single(None);
        let cfg = PickerConfig {
            open_override: Some(false),
            ..config()
        };
        let mut state = PickerState::new(d(2024, 3, 1), &selection);

        assert_eq!(
            state.apply(PickerEvent::Open, &selection, &cfg),
            vec![PickerEffect::Opened]
        );
        // the embedder owns the flip; visibility stays off until it acts
        assert!(!state.is_open(&cfg));
    }

    #[test]
    fn test_sync_selection_moves_view_and_keeps_open_state() {
        let selection = Selection::Single(Some(d(2024, 3, 5)));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.apply(PickerEvent::Open, &selection, &cfg);

        let next = Selection::Single(Some(d(2025, 11, 2)));
        state.sync_selection(&next);
        assert_eq!(state.view, ViewMonth { year: 2025, month: 11 });
        assert_eq!(state.cursor, d(2025, 11, 2));
        assert!(state.is_open(&cfg));
    }

    #[test]
    fn test_sync_selection_empty_value_keeps_view() {
        let selection = Selection::Single(Some(d(2024, 3, 5)));
        let mut state = PickerState::new(d(2024, 3, 1), &selection);
        state.sync_selection(&Selection::Single(None));
        assert_eq!(state.view, ViewMonth { year: 2024, month: 3 });
    }

    #[test]
    fn test_sync_selection_keeps_phase() {
        let (mut state, mut selection, cfg) = opened_range_picker(d(2024, 3, 1));
        drive(
            &mut state,
            &mut selection,
            &cfg,
            PickerEvent::SelectDate(d(2024, 3, 10)),
        );
        state.sync_selection(&selection);
        assert_eq!(state.phase, SelectionPhase::AwaitingRangeEnd);
    }

    #[test]
    fn test_cursor_moves_by_days() {
        let selection = Selection::Single(Some(d(2024, 3, 15)));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);

        state.apply(PickerEvent::CursorMove { days: 1 }, &selection, &cfg);
        assert_eq!(state.cursor, d(2024, 3, 16));
        state.apply(PickerEvent::CursorMove { days: -7 }, &selection, &cfg);
        assert_eq!(state.cursor, d(2024, 3, 9));
    }

    #[test]
    fn test_cursor_crossing_month_shifts_view() {
        let selection = Selection::Single(Some(d(2024, 3, 31)));
        let cfg = config();
        let mut state = PickerState::new(d(2024, 3, 1), &selection);

        let effects = state.apply(PickerEvent::CursorMove { days: 1 }, &selection, &cfg);
        assert!(effects.is_empty());
        assert_eq!(state.cursor, d(2024, 4, 1));
        assert_eq!(state.view, ViewMonth { year: 2024, month: 4 });
    }
}
