//! Session tests
//!
//! Pointer input, emergency path, history and persistence round trips.

use aac_app::Session;
use aac_board::{keys, CardCatalog, FileStorage, MemoryStorage, Persistence, SpeechSettings};
use aac_grammar::{Card, GrammarType};
use aac_scan::{
    ManualClock, NavCall, RecordingNavigator, RecordingSpeech, ScanAction, ScanEvent, ScanMethod,
    ScanPhase, ScanningConfig, SpeechCall, VoiceStyle,
};

// ============================================================================
// FIXTURES
// ============================================================================

struct Harness<P: Persistence> {
    session: Session<P>,
    nav: RecordingNavigator,
    speech: RecordingSpeech,
}

fn open<P: Persistence>(backend: P) -> Harness<P> {
    let nav = RecordingNavigator::new();
    let speech = RecordingSpeech::new();
    let session = Session::new(backend)
        .with_clock(ManualClock::new())
        .with_navigator(nav.clone())
        .with_speech(speech.clone());
    Harness { session, nav, speech }
}

fn card(session: &Session<impl Persistence>, id: &str) -> Card {
    session.scan().catalog().find_card(id).cloned().unwrap()
}

// ============================================================================
// POINTER INPUT
// ============================================================================

#[test]
fn test_tap_composes_sentence() {
    let mut h = open(MemoryStorage::new());
    for id in ["p_mom", "ex_give_to", "a_give", "fd_water"] {
        let c = card(&h.session, id);
        h.session.tap_card(c);
    }
    assert_eq!(h.session.scan().store().message(), "엄마한테 물 줘요");
}

#[test]
fn test_tap_toggles() {
    let mut h = open(MemoryStorage::new());
    let water = card(&h.session, "fd_water");
    h.session.tap_card(water.clone());
    assert!(h.session.scan().store().is_selected("fd_water"));
    h.session.tap_card(water);
    assert!(h.session.scan().store().is_empty());
}

#[test]
fn test_tap_speaks_card_without_marker() {
    let mut h = open(MemoryStorage::new());
    let particle = card(&h.session, "ex_give_to");
    h.session.tap_card(particle);
    assert_eq!(h.speech.last_spoken().as_deref(), Some("한테"));
}

#[test]
fn test_card_speak_disabled() {
    let mut h = open(MemoryStorage::new());
    h.session.set_speech_settings(SpeechSettings { card_speak: false, ..Default::default() });
    let water = card(&h.session, "fd_water");
    h.session.tap_card(water);
    assert!(h.speech.spoken().is_empty());
}

#[test]
fn test_verb_tap_sets_suggestions() {
    let mut h = open(MemoryStorage::new());
    let eat = card(&h.session, "a_eat");
    h.session.tap_card(eat);
    let suggestions = h.session.scan().store().active_suggestions().map(<[String]>::to_vec);
    assert!(suggestions.is_some_and(|s| s.contains(&"fd_rice".to_string())));

    assert!(h.session.tap_suggestion("fd_rice"));
    assert_eq!(h.session.scan().store().message(), "밥 먹어요");
    assert!(!h.session.tap_suggestion("no_such_card"));
}

#[test]
fn test_speak_and_show_record_history() {
    let mut h = open(MemoryStorage::new());
    assert_eq!(h.session.speak_message(), None);
    assert!(!h.session.show_message());

    let water = card(&h.session, "fd_water");
    h.session.tap_card(water);
    assert_eq!(h.session.speak_message().as_deref(), Some("물"));
    assert!(h.session.show_message());
    assert!(h.nav.confirmation_open());
    assert_eq!(h.session.history().len(), 1);

    h.session.close_message();
    assert!(!h.nav.confirmation_open());
    assert!(h.session.scan().store().is_empty());
}

// ============================================================================
// EMERGENCY
// ============================================================================

#[test]
fn test_emergency_fast_path() {
    let mut h = open(MemoryStorage::new());
    let emergency_id = h.session.scan().catalog().emergency_cards()[0].id.clone();
    let emergency_text = h.session.scan().catalog().emergency_cards()[0].text.clone();

    assert!(h.session.tap_emergency(&emergency_id));
    assert!(h.session.scan().store().is_selected(&emergency_id));
    assert!(h
        .nav
        .calls()
        .iter()
        .any(|c| matches!(c, NavCall::OpenConfirmation { emergency: true, .. })));
    assert!(h.speech.calls().contains(&SpeechCall::Speak {
        text: emergency_text.clone(),
        style: VoiceStyle::Emergency,
    }));
    assert_eq!(h.session.history().latest(), Some(emergency_text.as_str()));

    assert!(!h.session.tap_emergency("fd_water"));
}

// ============================================================================
// SCANNING
// ============================================================================

#[test]
fn test_scan_message_lands_in_history() {
    let mut h = open(MemoryStorage::new());
    h.session.set_scanning_config(ScanningConfig { method: ScanMethod::Step, ..Default::default() });
    h.session.start_scanning();

    // Menu → speak board → first category → first card
    h.session.perform(ScanAction::SelectCurrent);
    h.session.perform(ScanAction::SelectCurrent);
    h.session.perform(ScanAction::MoveNext);
    let events = h.session.perform(ScanAction::SelectCurrent);

    assert_eq!(h.session.scan().phase(), ScanPhase::Modal);
    let message = h.session.scan().store().message().to_string();
    assert!(events.contains(&ScanEvent::MessageComposed(message.clone())));
    assert_eq!(h.session.history().latest(), Some(message.as_str()));
}

fn scan_to_person_cards(h: &mut Harness<impl Persistence>) {
    h.session.set_scanning_config(ScanningConfig { method: ScanMethod::Step, ..Default::default() });
    h.session.start_scanning();
    h.session.perform(ScanAction::SelectCurrent);
    h.session.perform(ScanAction::SelectCurrent);
    assert_eq!(h.session.scan().phase(), ScanPhase::Card);
}

#[test]
fn test_pointer_close_during_modal_scan_resumes_cards() {
    let mut h = open(MemoryStorage::new());
    scan_to_person_cards(&mut h);
    h.session.perform(ScanAction::MoveNext);
    h.session.perform(ScanAction::SelectCurrent);
    assert_eq!(h.session.scan().phase(), ScanPhase::Modal);

    h.session.close_message();
    assert_eq!(h.session.scan().phase(), ScanPhase::Card);
    assert_eq!(h.session.scan().current_index(), 0);
    assert!(h.session.scan().store().is_empty());
    assert!(!h.nav.confirmation_open());
}

#[test]
fn test_emergency_during_card_scan_enters_modal() {
    let mut h = open(MemoryStorage::new());
    let emergency_id = h.session.scan().catalog().emergency_cards()[0].id.clone();
    scan_to_person_cards(&mut h);

    assert!(h.session.tap_emergency(&emergency_id));
    assert_eq!(h.session.scan().phase(), ScanPhase::Modal);
    assert_eq!(h.session.history().len(), 1);

    h.session.perform(ScanAction::SelectCurrent);
    assert_eq!(h.session.scan().phase(), ScanPhase::Card);
    assert!(!h.nav.confirmation_open());
}

#[test]
fn test_deleting_scanned_card_keeps_index_in_range() {
    let mut h = open(MemoryStorage::new());
    let added = h.session.add_user_card("person", "간호사").unwrap();
    scan_to_person_cards(&mut h);
    let last = h.session.scan().item_count() - 1;
    for _ in 0..last {
        h.session.perform(ScanAction::MoveNext);
    }
    assert_eq!(h.session.scan().current_label(), "간호사");

    assert!(h.session.delete_user_card("person", &added.id));
    assert_eq!(h.session.scan().phase(), ScanPhase::Card);
    assert!(h.session.scan().current_index() < h.session.scan().item_count());
    assert_eq!(h.session.scan().item_count(), last);
}

#[test]
fn test_deleting_shown_card_closes_modal() {
    let mut h = open(MemoryStorage::new());
    let added = h.session.add_user_card("person", "간호사").unwrap();
    scan_to_person_cards(&mut h);
    let last = h.session.scan().item_count() - 1;
    for _ in 0..last {
        h.session.perform(ScanAction::MoveNext);
    }
    h.session.perform(ScanAction::SelectCurrent);
    assert_eq!(h.session.scan().phase(), ScanPhase::Modal);

    assert!(h.session.delete_user_card("person", &added.id));
    assert_eq!(h.session.scan().phase(), ScanPhase::Card);
    assert!(!h.nav.confirmation_open());
}

#[test]
fn test_added_card_joins_running_scan() {
    let mut h = open(MemoryStorage::new());
    scan_to_person_cards(&mut h);
    let before = h.session.scan().item_count();
    h.session.add_user_card("person", "간호사").unwrap();
    assert_eq!(h.session.scan().state().item_count, before + 1);
}

// ============================================================================
// SPEECH SETTINGS
// ============================================================================

#[test]
fn test_speech_settings_reach_output() {
    let mut h = open(MemoryStorage::new());
    assert_eq!(h.speech.settings(), Some(SpeechSettings::default()));

    let settings = SpeechSettings {
        rate: 0.5,
        pitch: 2.0,
        volume: 0.1,
        voice_name: "Yuna".to_string(),
        ..Default::default()
    };
    h.session.set_speech_settings(settings.clone());
    assert_eq!(h.speech.settings(), Some(settings));
}

#[test]
fn test_saved_speech_settings_applied_on_open() {
    let mut backend = MemoryStorage::new();
    backend.set(keys::SPEECH, r#"{"rate": 3.0, "volume": 0.4}"#).unwrap();

    let h = open(backend);
    let applied = h.speech.settings().unwrap();
    assert_eq!(applied.rate, 2.0);
    assert_eq!(applied.volume, 0.4);
    assert_eq!(&applied, h.session.speech_settings());
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut h = open(FileStorage::new(dir.path()));
    let added = h.session.add_user_card("food", "  김치<찌개>  ").unwrap();
    assert_eq!(added.text, "김치찌개");
    h.session.reorder("food", 0, 2).unwrap();
    let order = h.session.scan().catalog().cards_for("food").iter().map(|c| c.id.clone()).collect::<Vec<_>>();
    h.session.set_scanning_config(ScanningConfig { speed_ms: 3000, ..Default::default() });
    let water = card(&h.session, "fd_water");
    h.session.tap_card(water);
    h.session.speak_message();
    h.session.close();

    let h = open(FileStorage::new(dir.path()));
    let catalog = h.session.scan().catalog();
    let reopened = catalog.cards_for("food").iter().map(|c| c.id.clone()).collect::<Vec<_>>();
    assert_eq!(reopened, order);
    assert!(catalog.find_card(&added.id).is_some());
    assert_eq!(h.session.scan().config().speed_ms, 3000);
    assert_eq!(h.session.history().latest(), Some("물"));
}

#[test]
fn test_corrupt_storage_falls_back_to_defaults() {
    let mut backend = MemoryStorage::new();
    backend.set(keys::USER_CARDS, "not json").unwrap();
    backend.set(keys::SCANNING, "[1, 2").unwrap();
    backend.set(keys::HISTORY, "{}").unwrap();

    let h = open(backend);
    assert!(h.session.scan().catalog().user_cards().is_empty());
    assert_eq!(h.session.scan().config(), &ScanningConfig::default());
    assert!(h.session.history().is_empty());
}

#[test]
fn test_failed_writes_do_not_break_the_session() {
    let mut h = open(MemoryStorage::with_quota(8));
    let water = card(&h.session, "fd_water");
    h.session.tap_card(water);
    assert_eq!(h.session.speak_message().as_deref(), Some("물"));
    assert_eq!(h.session.history().len(), 1);
    assert!(h.session.storage().backend().is_empty());
}

#[test]
fn test_delete_user_card() {
    let mut h = open(MemoryStorage::new());
    let added = h.session.add_user_card("food", "떡볶이").unwrap();
    h.session.tap_card(added.clone());
    assert!(h.session.delete_user_card("food", &added.id));
    assert!(h.session.scan().store().is_empty());
    assert!(!h.session.delete_user_card("food", "fd_water"));

    let backend = h.session.close();
    let saved = backend.get(keys::USER_CARDS).unwrap().unwrap();
    assert!(!saved.contains("떡볶이"));
}

#[test]
fn test_clear_history() {
    let mut h = open(MemoryStorage::new());
    let water = card(&h.session, "fd_water");
    h.session.tap_card(water);
    h.session.speak_message();
    h.session.clear_history();
    assert!(h.session.history().is_empty());

    let backend = h.session.close();
    assert_eq!(backend.get(keys::HISTORY).unwrap(), None);
}

#[test]
fn test_verb_card_type() {
    let h = open(MemoryStorage::new());
    assert_eq!(card(&h.session, "a_give").grammar_type, GrammarType::Verb);
}
