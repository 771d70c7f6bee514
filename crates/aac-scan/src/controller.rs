//! Scanning Controller
//!
//! Single-switch scanning over the menu → category → card → modal hierarchy.
//!
//! One item is highlighted at a time. In auto method a repeating timer moves
//! the highlight and any switch input selects; in step method a short input
//! moves and a held input selects. Category and Card scans return to their
//! parent after two full passes without a selection.
//!
//! All transitions run synchronously inside the call that triggered them.
//! Timers live in a [`TimerQueue`] that only [`ScanningController::poll`]
//! drains, and every timer is cancelled before its replacement is scheduled,
//! so at most one auto-advance timer exists and a stopped controller has none.

use crate::config::{ScanMethod, ScanningConfig};
use crate::input::{Key, ScanAction, SwitchGesture};
use crate::output::{NullNavigator, NullSpeech, SpeechOutput, View, ViewNavigator, VoiceStyle};
use crate::state::{labels, EventQueue, MenuChoice, ScanEvent, ScanPhase, ScanningState};
use crate::timer::{Clock, MonotonicClock, TimerId, TimerKind, TimerQueue};
use aac_board::{CardCatalog, SelectionStore};
use aac_grammar::Card;

/// Scanning controller over a card catalog
pub struct ScanningController<C: CardCatalog> {
    catalog: C,
    store: SelectionStore,
    navigator: Box<dyn ViewNavigator>,
    speech: Box<dyn SpeechOutput>,
    clock: Box<dyn Clock>,
    timers: TimerQueue,
    advance_timer: Option<TimerId>,
    switch: SwitchGesture,
    state: ScanningState,
    events: EventQueue,
}

impl<C: CardCatalog> ScanningController<C> {
    /// Controller with silent outputs and a wall clock
    pub fn new(catalog: C, config: ScanningConfig) -> Self {
        let store = SelectionStore::new(catalog.verb_suggestions().clone());
        Self {
            catalog,
            store,
            navigator: Box::new(NullNavigator),
            speech: Box::new(NullSpeech),
            clock: Box::new(MonotonicClock::new()),
            timers: TimerQueue::new(),
            advance_timer: None,
            switch: SwitchGesture::default(),
            state: ScanningState::new(config.normalized()),
            events: EventQueue::default(),
        }
    }

    pub fn with_navigator(mut self, navigator: impl ViewNavigator + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    pub fn with_speech(mut self, speech: impl SpeechOutput + 'static) -> Self {
        self.speech = Box::new(speech);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replace the selection store (e.g. one with subscribers attached)
    pub fn with_store(mut self, store: SelectionStore) -> Self {
        self.store = store;
        self
    }

    // ---- session ----

    /// Start scanning at the top menu
    pub fn start(&mut self) {
        if self.state.is_active {
            self.halt();
        }
        tracing::info!(
            "Scanning started ({:?}, {} ms)",
            self.state.config.method,
            self.state.config.speed_ms
        );
        self.state.is_active = true;
        self.state.selected_menu = None;
        self.events.push(ScanEvent::Started);
        self.navigator.set_view(View::Menu);
        self.enter_phase(ScanPhase::Menu);
        self.begin_scan();
    }

    /// Stop scanning; safe to call in any phase, any number of times
    pub fn stop(&mut self) {
        let was_active = self.state.is_active;
        self.halt();
        if was_active {
            tracing::info!("Scanning stopped");
            self.events.push(ScanEvent::Stopped);
        }
    }

    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    fn halt(&mut self) {
        self.timers.cancel_all();
        self.advance_timer = None;
        self.switch = SwitchGesture::default();
        self.speech.cancel();
        self.state.reset();
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    // ---- actions ----

    pub fn perform(&mut self, action: ScanAction) {
        match action {
            ScanAction::MoveNext => self.move_next(),
            ScanAction::SelectCurrent => self.select_current(),
            ScanAction::GoBack => self.go_back(),
        }
    }

    /// Advance the highlight by one item
    pub fn move_next(&mut self) {
        if !self.state.is_active {
            return;
        }
        let count = self.item_count();
        if count == 0 {
            if self.state.phase.auto_returns() {
                self.auto_return();
            }
            return;
        }

        let next = (self.state.current_index + 1) % count;
        if next == 0 {
            if self.state.has_looped && self.state.phase.auto_returns() {
                self.auto_return();
                return;
            }
            self.state.has_looped = true;
        }
        self.state.current_index = next;
        self.announce(true);
    }

    /// Act on the highlighted item
    pub fn select_current(&mut self) {
        if !self.state.is_active {
            return;
        }
        let index = self.state.current_index;
        if index >= self.item_count() {
            tracing::debug!("Ignoring select at {} in {:?}", index, self.state.phase);
            return;
        }
        self.cancel_advance();
        self.speech.cancel();

        match self.state.phase {
            ScanPhase::Menu => {
                let Some(choice) = MenuChoice::from_index(index) else { return };
                self.state.selected_menu = Some(choice);
                self.navigator.set_view(View::App);
                self.navigator.set_slide(choice.slide());
                self.enter_category();
            }
            ScanPhase::Category => {
                if self.state.selected_menu == Some(MenuChoice::Situation) {
                    let Some(board) = self.catalog.situation_boards().get(index) else { return };
                    let id = board.id.clone();
                    self.store.set_active_situation(Some(&id));
                } else {
                    let Some(category) = self.catalog.categories().get(index) else { return };
                    let id = category.id.clone();
                    self.store.set_active_category(&id);
                }
                self.enter_card();
            }
            ScanPhase::Card => {
                if index == 0 {
                    self.return_to_category();
                    return;
                }
                if let Some(card) = self.phase_cards().get(index - 1).cloned() {
                    tracing::debug!("Scan selected card {}", card.id);
                    self.store.select_card(card);
                }
                if !self.present_message(Some(VoiceStyle::Message), false) {
                    self.resume_card_scan();
                }
            }
            ScanPhase::Modal => self.close_modal(),
        }
    }

    /// Leave the current phase for its parent
    pub fn go_back(&mut self) {
        if !self.state.is_active || self.state.phase == ScanPhase::Menu {
            return;
        }
        self.cancel_advance();
        self.speech.cancel();

        match self.state.phase {
            ScanPhase::Card => self.return_to_category(),
            ScanPhase::Category => self.return_to_menu(),
            ScanPhase::Modal => self.close_modal(),
            ScanPhase::Menu => {}
        }
    }

    // ---- confirmation display ----

    /// Open the confirmation display for the current message.
    ///
    /// During a card scan, the scan moves to the Close item so the switch
    /// can dismiss it. Returns `false` when there is no message to show.
    pub fn present_message(&mut self, voice: Option<VoiceStyle>, emergency: bool) -> bool {
        let message = self.store.message().to_string();
        if message.is_empty() {
            return false;
        }
        self.navigator.open_confirmation(&message, self.store.selected(), emergency);
        if let Some(style) = voice {
            self.speech.speak(&message, style);
        }
        self.events.push(ScanEvent::MessageComposed(message));
        if self.state.is_active && self.state.phase == ScanPhase::Card {
            self.enter_phase(ScanPhase::Modal);
            self.begin_scan();
        }
        true
    }

    /// Close the confirmation display and clear the selection.
    ///
    /// During a Modal scan this is the same as going back: the card scan
    /// resumes from the Back item.
    pub fn dismiss_message(&mut self) {
        if self.state.is_active && self.state.phase == ScanPhase::Modal {
            self.go_back();
            return;
        }
        self.navigator.close_confirmation();
        self.store.clear_selection();
        self.speech.cancel();
        self.events.push(ScanEvent::ConfirmationClosed);
    }

    /// Re-check the scan position after the catalog changed
    pub fn refresh_items(&mut self) {
        if !self.state.is_active {
            return;
        }
        let count = self.item_count();
        self.state.item_count = count;
        let out_of_range = self.state.current_index >= count;
        match self.state.phase {
            ScanPhase::Card if count <= 1 => {
                tracing::warn!("Card scan emptied by an edit; returning to categories");
                self.return_to_category();
            }
            ScanPhase::Card if out_of_range => self.resume_card_scan(),
            ScanPhase::Category if count == 0 => self.return_to_menu(),
            ScanPhase::Category if out_of_range => {
                self.state.enter(ScanPhase::Category);
                self.begin_scan();
            }
            ScanPhase::Modal if self.store.message().is_empty() => {
                self.cancel_advance();
                self.close_modal();
            }
            _ => {}
        }
    }

    // ---- switch and keys ----

    /// Physical switch pressed
    pub fn switch_down(&mut self) {
        if !self.state.is_active || !self.switch.press() {
            return;
        }
        if self.state.config.method == ScanMethod::Step {
            let now = self.clock.now_ms();
            let delay = self.state.config.long_press_ms;
            self.switch.timer = Some(self.timers.schedule_once(TimerKind::LongPress, now, delay));
        }
    }

    /// Physical switch released
    pub fn switch_up(&mut self) {
        let Some((timer, fired)) = self.switch.release() else { return };
        if let Some(id) = timer {
            self.timers.cancel(id);
        }
        if fired || !self.state.is_active {
            return;
        }
        match self.state.config.method {
            ScanMethod::Auto => self.select_current(),
            ScanMethod::Step => self.move_next(),
        }
    }

    /// Keyboard input; returns whether the key was consumed
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.state.is_active {
            return false;
        }
        self.perform(key.action(self.state.config.method));
        true
    }

    // ---- timers ----

    /// Fire every timer due at the current clock reading
    pub fn poll(&mut self) {
        let now = self.clock.now_ms();
        while let Some((id, kind)) = self.timers.pop_due(now) {
            match kind {
                TimerKind::AutoAdvance if self.advance_timer == Some(id) => self.move_next(),
                TimerKind::LongPress if self.switch.timer == Some(id) => {
                    self.switch.timer = None;
                    self.switch.long_press_fired = true;
                    self.select_current();
                }
                _ => {}
            }
        }
    }

    /// Clock reading at which [`poll`](Self::poll) next has work
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    // ---- configuration ----

    pub fn config(&self) -> &ScanningConfig {
        &self.state.config
    }

    /// Apply a new configuration; a running scan keeps its position
    pub fn set_config(&mut self, config: ScanningConfig) {
        self.state.config = config.normalized();
        if let Some(id) = self.switch.timer.take() {
            self.timers.cancel(id);
        }
        if self.state.is_active {
            self.restart_advance();
        }
    }

    // ---- queries ----

    pub fn state(&self) -> &ScanningState {
        &self.state
    }

    pub fn phase(&self) -> ScanPhase {
        self.state.phase
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Items in the current phase
    pub fn item_count(&self) -> usize {
        match self.state.phase {
            ScanPhase::Menu => MenuChoice::ALL.len(),
            ScanPhase::Category => match self.state.selected_menu {
                Some(MenuChoice::Situation) => self.catalog.situation_boards().len(),
                _ => self.catalog.categories().len(),
            },
            ScanPhase::Card => 1 + self.phase_cards().len(),
            ScanPhase::Modal => 1,
        }
    }

    /// Spoken label of the highlighted item
    pub fn current_label(&self) -> String {
        let index = self.state.current_index;
        match self.state.phase {
            ScanPhase::Menu => MenuChoice::from_index(index).map(|c| c.label().to_string()),
            ScanPhase::Category => match self.state.selected_menu {
                Some(MenuChoice::Situation) => {
                    self.catalog.situation_boards().get(index).map(|b| b.name.clone())
                }
                _ => self.catalog.categories().get(index).map(|c| c.name.clone()),
            },
            ScanPhase::Card if index == 0 => Some(labels::BACK.to_string()),
            ScanPhase::Card => self.phase_cards().get(index - 1).map(|c| c.text.clone()),
            ScanPhase::Modal => Some(labels::CLOSE.to_string()),
        }
        .unwrap_or_default()
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<ScanEvent> {
        self.events.drain()
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SelectionStore {
        &mut self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Mutable catalog access; the scan position is not re-validated
    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn navigator_mut(&mut self) -> &mut dyn ViewNavigator {
        self.navigator.as_mut()
    }

    pub fn speech_mut(&mut self) -> &mut dyn SpeechOutput {
        self.speech.as_mut()
    }

    // ---- transitions ----

    /// Cards of the active category or situation
    fn phase_cards(&self) -> &[Card] {
        match self.state.selected_menu {
            Some(MenuChoice::Situation) => self
                .store
                .active_situation()
                .and_then(|id| self.catalog.situation(id))
                .map(|board| board.cards.as_slice())
                .unwrap_or(&[]),
            _ => self.catalog.cards_for(self.store.active_category()),
        }
    }

    fn enter_phase(&mut self, phase: ScanPhase) {
        self.cancel_advance();
        self.state.enter(phase);
        self.state.item_count = self.item_count();
        tracing::info!("Scan phase {:?} ({} items)", phase, self.state.item_count);
        self.events.push(ScanEvent::PhaseEntered(phase));
    }

    /// Highlight index 0 and arm the auto timer.
    ///
    /// The Close item is not spoken on entry; the message is still playing.
    fn begin_scan(&mut self) {
        self.restart_advance();
        self.announce(self.state.phase != ScanPhase::Modal);
    }

    fn enter_category(&mut self) {
        self.enter_phase(ScanPhase::Category);
        if self.state.item_count == 0 {
            tracing::warn!("No categories to scan; returning to menu");
            self.return_to_menu();
            return;
        }
        self.begin_scan();
    }

    fn enter_card(&mut self) {
        self.enter_phase(ScanPhase::Card);
        self.resume_card_scan();
    }

    /// Card scan from the back item, recollecting cards
    fn resume_card_scan(&mut self) {
        self.state.enter(ScanPhase::Card);
        self.state.item_count = self.item_count();
        if self.state.item_count <= 1 {
            tracing::warn!("No cards to scan; returning to categories");
            self.return_to_category();
            return;
        }
        self.begin_scan();
    }

    fn return_to_category(&mut self) {
        if self.state.selected_menu == Some(MenuChoice::Situation) {
            self.store.set_active_situation(None);
        }
        self.enter_category();
    }

    fn return_to_menu(&mut self) {
        self.state.selected_menu = None;
        self.navigator.set_view(View::Menu);
        self.enter_phase(ScanPhase::Menu);
        self.begin_scan();
    }

    fn close_modal(&mut self) {
        self.navigator.close_confirmation();
        self.store.clear_selection();
        self.speech.cancel();
        self.events.push(ScanEvent::ConfirmationClosed);
        self.enter_card();
    }

    fn auto_return(&mut self) {
        let from = self.state.phase;
        self.cancel_advance();
        match from {
            ScanPhase::Card => self.return_to_category(),
            ScanPhase::Category => self.return_to_menu(),
            ScanPhase::Menu | ScanPhase::Modal => return,
        }
        tracing::debug!("Auto return {:?} -> {:?}", from, self.state.phase);
        self.events.push(ScanEvent::AutoReturned { from, to: self.state.phase });
    }

    fn announce(&mut self, speak: bool) {
        let label = self.current_label();
        tracing::debug!(
            "Highlight {:?}[{}] {}",
            self.state.phase,
            self.state.current_index,
            label
        );
        if speak && !label.is_empty() {
            self.speech.speak(&label, VoiceStyle::ScanLabel);
        }
        self.events.push(ScanEvent::Highlighted {
            phase: self.state.phase,
            index: self.state.current_index,
            label,
        });
    }

    fn cancel_advance(&mut self) {
        if let Some(id) = self.advance_timer.take() {
            self.timers.cancel(id);
        }
    }

    /// Replace the auto timer, or drop it in step method
    fn restart_advance(&mut self) {
        self.cancel_advance();
        if self.state.config.method == ScanMethod::Auto {
            let now = self.clock.now_ms();
            let period = self.state.config.speed_ms;
            self.advance_timer =
                Some(self.timers.schedule_repeating(TimerKind::AutoAdvance, now, period));
        }
    }
}

impl<C: CardCatalog> std::fmt::Debug for ScanningController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanningController")
            .field("state", &self.state)
            .field("advance_timer", &self.advance_timer)
            .field("switch", &self.switch)
            .field("pending_timers", &self.timers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{RecordingNavigator, RecordingSpeech};
    use crate::timer::ManualClock;
    use aac_board::{BoardCatalog, Category};

    fn catalog() -> BoardCatalog {
        BoardCatalog::new()
            .with_category(Category::new("person", "사람"), vec![Card::new("p_mom", "엄마", "person")])
            .with_category(
                Category::new("action", "동작"),
                vec![
                    Card::new("a_eat", "먹어요", "action").with_grammar(aac_grammar::GrammarType::Verb),
                    Card::new("a_give", "줘요", "action").with_grammar(aac_grammar::GrammarType::Verb),
                ],
            )
    }

    fn controller() -> (ScanningController<BoardCatalog>, ManualClock, RecordingSpeech) {
        let clock = ManualClock::new();
        let speech = RecordingSpeech::new();
        let scan = ScanningController::new(catalog(), ScanningConfig::default())
            .with_clock(clock.clone())
            .with_speech(speech.clone());
        (scan, clock, speech)
    }

    #[test]
    fn test_start_announces_first_item() {
        let (mut scan, _, speech) = controller();
        scan.start();
        assert!(scan.is_active());
        assert_eq!(scan.phase(), ScanPhase::Menu);
        assert_eq!(speech.last_spoken().as_deref(), Some("말하기"));
        assert_eq!(scan.pending_timers(), 1);
    }

    #[test]
    fn test_inactive_input_is_ignored() {
        let (mut scan, _, _) = controller();
        scan.move_next();
        scan.select_current();
        assert!(!scan.handle_key(Key::Enter));
        assert_eq!(scan.state(), &ScanningState::new(ScanningConfig::default()));
    }

    #[test]
    fn test_timer_advances() {
        let (mut scan, clock, _) = controller();
        scan.start();
        clock.advance(2000);
        scan.poll();
        assert_eq!(scan.current_index(), 1);
        assert_eq!(scan.current_label(), "상황");
    }

    #[test]
    fn test_menu_cycles_forever() {
        let (mut scan, _, _) = controller();
        scan.start();
        for _ in 0..10 {
            scan.move_next();
        }
        assert_eq!(scan.phase(), ScanPhase::Menu);
        assert_eq!(scan.current_index(), 0);
    }

    #[test]
    fn test_card_phase_labels() {
        let (mut scan, _, _) = controller();
        scan.start();
        scan.select_current();
        scan.move_next();
        scan.select_current();
        assert_eq!(scan.phase(), ScanPhase::Card);
        assert_eq!(scan.item_count(), 3);
        assert_eq!(scan.current_label(), "돌아가기");
        scan.move_next();
        assert_eq!(scan.current_label(), "먹어요");
    }

    #[test]
    fn test_back_item_returns_to_category() {
        let (mut scan, _, _) = controller();
        scan.start();
        scan.select_current();
        scan.select_current();
        assert_eq!(scan.phase(), ScanPhase::Card);
        scan.select_current();
        assert_eq!(scan.phase(), ScanPhase::Category);
        assert_eq!(scan.current_index(), 0);
    }

    #[test]
    fn test_situation_menu_without_boards_falls_back() {
        let nav = RecordingNavigator::new();
        let (scan, _, _) = controller();
        let mut scan = scan.with_navigator(nav.clone());
        scan.start();
        scan.move_next();
        scan.select_current();
        assert_eq!(scan.phase(), ScanPhase::Menu);
        assert_eq!(nav.view(), Some(View::Menu));
    }

    #[test]
    fn test_step_method_has_no_timer() {
        let (mut scan, _, _) = controller();
        scan.set_config(ScanningConfig { method: ScanMethod::Step, ..Default::default() });
        scan.start();
        assert_eq!(scan.pending_timers(), 0);
        scan.switch_down();
        assert_eq!(scan.pending_timers(), 1);
        scan.switch_up();
        assert_eq!(scan.pending_timers(), 0);
        assert_eq!(scan.current_index(), 1);
    }

    #[test]
    fn test_navigator_sees_menu_selection() {
        let nav = RecordingNavigator::new();
        let (scan, _, _) = controller();
        let mut scan = scan.with_navigator(nav.clone());
        scan.start();
        scan.select_current();
        assert_eq!(nav.view(), Some(View::App));
        assert!(nav.calls().contains(&crate::output::NavCall::SetSlide(0)));
        assert_eq!(scan.phase(), ScanPhase::Category);
    }
}
