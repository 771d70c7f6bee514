//! Board Session
//!
//! Owns the scanning controller (and through it the catalog and selection
//! store) together with everything that outlives a tap: message history,
//! speech settings and the storage they are saved to.
//!
//! Saved state is read once when the session opens. Writes happen after the
//! change that caused them and never block a scan transition; a failed write
//! is logged and otherwise ignored.

use aac_board::{
    keys, BoardCatalog, CardCatalog, CardOrder, CatalogError, MessageHistory, Persistence,
    SafeStorage, SpeechSettings, UserCards,
};
use aac_grammar::{Card, PARTICLE_MARKER};
use aac_scan::{
    Clock, Key, ScanAction, ScanEvent, ScanningConfig, ScanningController, SpeechOutput,
    ViewNavigator, VoiceStyle,
};

pub struct Session<P: Persistence> {
    scan: ScanningController<BoardCatalog>,
    storage: SafeStorage<P>,
    history: MessageHistory,
    speech_settings: SpeechSettings,
}

impl<P: Persistence> Session<P> {
    /// Open a session over `backend`, restoring whatever it holds
    pub fn new(backend: P) -> Self {
        let storage = SafeStorage::new(backend);

        let mut catalog = BoardCatalog::with_defaults();
        if let Some(user_cards) = storage.load::<UserCards>(keys::USER_CARDS) {
            catalog.restore_user_cards(user_cards);
        }
        if let Some(order) = storage.load::<CardOrder>(keys::CARD_ORDER) {
            catalog.apply_card_order(&order);
        }
        let history = storage
            .load::<Vec<String>>(keys::HISTORY)
            .map(MessageHistory::from_saved)
            .unwrap_or_default();
        let config = storage.load::<ScanningConfig>(keys::SCANNING).unwrap_or_default();
        let speech_settings = storage
            .load::<SpeechSettings>(keys::SPEECH)
            .unwrap_or_default()
            .normalized();

        tracing::info!(
            "Session opened: {} categories, {} user cards, {} history entries",
            catalog.categories().len(),
            catalog.user_cards().values().map(Vec::len).sum::<usize>(),
            history.len()
        );

        Self {
            scan: ScanningController::new(catalog, config),
            storage,
            history,
            speech_settings,
        }
    }

    pub fn with_navigator(mut self, navigator: impl ViewNavigator + 'static) -> Self {
        self.scan = self.scan.with_navigator(navigator);
        self
    }

    pub fn with_speech(mut self, speech: impl SpeechOutput + 'static) -> Self {
        self.scan = self.scan.with_speech(speech);
        self.scan.speech_mut().configure(&self.speech_settings);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.scan = self.scan.with_clock(clock);
        self
    }

    // ---- scanning ----

    pub fn start_scanning(&mut self) {
        self.scan.start();
        self.pump();
    }

    pub fn stop_scanning(&mut self) {
        self.scan.stop();
        self.pump();
    }

    pub fn restart_scanning(&mut self) {
        self.scan.restart();
        self.pump();
    }

    pub fn perform(&mut self, action: ScanAction) -> Vec<ScanEvent> {
        self.scan.perform(action);
        self.pump()
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<ScanEvent> {
        self.scan.handle_key(key);
        self.pump()
    }

    pub fn switch_down(&mut self) -> Vec<ScanEvent> {
        self.scan.switch_down();
        self.pump()
    }

    pub fn switch_up(&mut self) -> Vec<ScanEvent> {
        self.scan.switch_up();
        self.pump()
    }

    /// Fire due timers
    pub fn poll(&mut self) -> Vec<ScanEvent> {
        self.scan.poll();
        self.pump()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.scan.next_deadline()
    }

    /// Drain controller events, recording composed messages
    fn pump(&mut self) -> Vec<ScanEvent> {
        let events = self.scan.take_events();
        for event in &events {
            if let ScanEvent::MessageComposed(message) = event {
                self.record(message);
            }
        }
        events
    }

    // ---- pointer input ----

    /// Toggle a card in the selection
    pub fn tap_card(&mut self, card: Card) {
        if self.scan.store().is_selected(&card.id) {
            self.scan.store_mut().deselect_card(&card.id);
            return;
        }
        if self.speech_settings.card_speak {
            let spoken = card.text.trim_start_matches(PARTICLE_MARKER).to_string();
            self.scan.speech_mut().speak(&spoken, VoiceStyle::Message);
        }
        self.scan.store_mut().select_card(card);
    }

    /// Select a suggested card by id; `false` if the id is unknown
    pub fn tap_suggestion(&mut self, card_id: &str) -> bool {
        let Some(card) = self.scan.catalog().find_card(card_id).cloned() else {
            tracing::warn!("Unknown suggestion {}", card_id);
            return false;
        };
        self.tap_card(card);
        true
    }

    /// Emergency fast path: add the card as-is, show and speak at once
    pub fn tap_emergency(&mut self, card_id: &str) -> bool {
        let Some(card) = self
            .scan
            .catalog()
            .emergency_cards()
            .iter()
            .find(|c| c.id == card_id)
            .cloned()
        else {
            tracing::warn!("Unknown emergency card {}", card_id);
            return false;
        };
        tracing::info!("Emergency card {}", card.id);

        self.scan.store_mut().select_card_direct(card);
        self.scan.present_message(Some(VoiceStyle::Emergency), true);
        self.pump();
        true
    }

    /// Speak the current message; `None` if nothing is selected
    pub fn speak_message(&mut self) -> Option<String> {
        let message = self.scan.store().message().to_string();
        if message.is_empty() {
            return None;
        }
        self.scan.speech_mut().speak(&message, VoiceStyle::Message);
        self.record(&message);
        Some(message)
    }

    /// Show the current message full screen
    pub fn show_message(&mut self) -> bool {
        let voice = self.speech_settings.repeat_on_show.then_some(VoiceStyle::Message);
        let shown = self.scan.present_message(voice, false);
        self.pump();
        shown
    }

    /// Close the confirmation display and start over
    pub fn close_message(&mut self) {
        self.scan.dismiss_message();
        self.pump();
    }

    pub fn clear_selection(&mut self) {
        self.scan.store_mut().clear_selection();
    }

    // ---- catalog editing ----

    pub fn add_user_card(&mut self, category_id: &str, text: &str) -> Result<Card, CatalogError> {
        let card = self.scan.catalog_mut().add_user_card(category_id, text)?;
        self.scan.refresh_items();
        self.pump();
        self.save_user_cards();
        Ok(card)
    }

    pub fn delete_user_card(&mut self, category_id: &str, card_id: &str) -> bool {
        let removed = self.scan.catalog_mut().delete_user_card(category_id, card_id);
        if removed {
            self.scan.store_mut().deselect_card(card_id);
            self.scan.refresh_items();
            self.pump();
            self.save_user_cards();
        }
        removed
    }

    pub fn reorder(&mut self, category_id: &str, from: usize, to: usize) -> Result<(), CatalogError> {
        self.scan.catalog_mut().reorder(category_id, from, to)?;
        self.scan.refresh_items();
        self.pump();
        let order = self.scan.catalog().card_order();
        self.storage.save(keys::CARD_ORDER, &order);
        Ok(())
    }

    fn save_user_cards(&mut self) {
        let user_cards = self.scan.catalog().user_cards().clone();
        self.storage.save(keys::USER_CARDS, &user_cards);
    }

    // ---- settings ----

    pub fn set_scanning_config(&mut self, config: ScanningConfig) {
        self.scan.set_config(config);
        let saved = self.scan.config().clone();
        self.storage.save(keys::SCANNING, &saved);
    }

    pub fn speech_settings(&self) -> &SpeechSettings {
        &self.speech_settings
    }

    pub fn set_speech_settings(&mut self, settings: SpeechSettings) {
        self.speech_settings = settings.normalized();
        self.scan.speech_mut().configure(&self.speech_settings);
        self.storage.save(keys::SPEECH, &self.speech_settings);
    }

    // ---- history ----

    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.storage.remove(keys::HISTORY);
    }

    fn record(&mut self, message: &str) {
        if self.history.add(message) {
            self.storage.save(keys::HISTORY, &self.history.to_vec());
        }
    }

    // ---- access ----

    pub fn scan(&self) -> &ScanningController<BoardCatalog> {
        &self.scan
    }

    pub fn scan_mut(&mut self) -> &mut ScanningController<BoardCatalog> {
        &mut self.scan
    }

    pub fn storage(&self) -> &SafeStorage<P> {
        &self.storage
    }

    /// Stop scanning and hand back the storage backend
    pub fn close(mut self) -> P {
        self.scan.stop();
        tracing::info!("Session closed");
        self.storage.into_inner()
    }
}
