//! End-to-end match flow through the boundary API
//!
//! Follows the canonical two-player script: create, join, start, bank mana,
//! and poll until the match reaches noon.

use altered_engine::{
    api::{GameService, ServiceConfig},
    core::{ActionIntent, CardId, ParticipantPayload, PlayerId},
    game::{Phase, StartStatus, VerbosityLevel, HAND_DEAL, MANA_REQUIRED, MORNING_DRAW},
    EngineError,
};

fn service(tag: &str) -> GameService {
    let config = ServiceConfig {
        games_dir: std::env::temp_dir().join(format!("altered-e2e-{tag}-{}", std::process::id())),
        verbosity: VerbosityLevel::Silent,
        ..ServiceConfig::default()
    };
    GameService::new(config).with_seed(99)
}

fn deck(prefix: &str) -> Vec<CardId> {
    (0..40).map(|i| CardId::new(format!("{prefix}{i}"))).collect()
}

fn bank_mana_batch(hand: &[CardId]) -> Vec<ActionIntent> {
    hand.iter()
        .take(MANA_REQUIRED)
        .map(|card| ActionIntent::MoveCard {
            card: card.clone(),
            from: "hand".to_string(),
            to: "mana_pile".to_string(),
        })
        .collect()
}

#[test]
fn test_full_opening_sequence() {
    let service = service("opening");

    // create with participant A
    let a = service
        .create_game(ParticipantPayload::new("Alice", deck("a")))
        .unwrap();
    let match_id = a.game_id.clone();
    assert_eq!(a.id, PlayerId::new(1));
    assert_eq!(a.deck.len(), 40);

    // start is non-advancing with one participant
    assert_eq!(
        service.start_game(&match_id).unwrap(),
        StartStatus::Waiting { needed: 1 }
    );

    // B joins, start succeeds
    let b = service
        .join_game(&match_id, ParticipantPayload::new("Bob", deck("b")))
        .unwrap();
    assert_eq!(b.id, PlayerId::new(2));
    assert_eq!(
        service.start_game(&match_id).unwrap(),
        StartStatus::Initialized
    );

    // state is setup: hands dealt, mana prompt set, no implicit pass
    let a_setup = service.get_available_actions(&match_id, a.id).unwrap();
    assert_eq!(a_setup.hand.len(), HAND_DEAL);
    assert_eq!(a_setup.available_actions.len(), HAND_DEAL);
    assert!(!a_setup.available_actions.iter().any(|x| x == "pass"));
    assert!(a_setup.message.is_some());

    // both discard 3 cards each to the mana pile
    let a_after = service
        .submit_actions(&match_id, a.id, bank_mana_batch(&a_setup.hand))
        .unwrap();
    assert_eq!(a_after.mana_pile.len(), MANA_REQUIRED);

    let b_setup = service.get_available_actions(&match_id, b.id).unwrap();
    let b_after = service
        .submit_actions(&match_id, b.id, bank_mana_batch(&b_setup.hand))
        .unwrap();
    assert_eq!(b_after.mana_pile.len(), MANA_REQUIRED);

    // polling A is what fires the setup -> noon transition
    let a_noon = service.get_available_actions(&match_id, a.id).unwrap();
    {
        let shared = service.registry().get(&match_id).unwrap();
        assert_eq!(shared.lock().phase, Phase::Noon);
    }

    // the returned record carries A's triggered-effect list (empty without a
    // rules corpus) and the documented hand count: 6 dealt - 3 banked + 2 drawn
    assert!(a_noon.effects_available.is_empty());
    assert_eq!(a_noon.hand.len(), HAND_DEAL - MANA_REQUIRED + MORNING_DRAW);
    assert_eq!(a_noon.deck.len(), 40 - HAND_DEAL - MORNING_DRAW);

    std::fs::remove_dir_all(service.store().dir()).ok();
}

#[test]
fn test_full_day_cycle_via_explicit_advance() {
    let service = service("daycycle");
    let a = service
        .create_game(ParticipantPayload::new("Alice", deck("a")))
        .unwrap();
    let match_id = a.game_id.clone();
    let b = service
        .join_game(&match_id, ParticipantPayload::new("Bob", deck("b")))
        .unwrap();
    service.start_game(&match_id).unwrap();

    for view in [&a, &b] {
        let current = service.get_available_actions(&match_id, view.id).unwrap();
        service
            .submit_actions(&match_id, view.id, bank_mana_batch(&current.hand))
            .unwrap();
    }

    // two polls: setup -> noon, then (no effects pending) noon -> afternoon
    service.get_available_actions(&match_id, a.id).unwrap();
    service.get_available_actions(&match_id, a.id).unwrap();
    {
        let shared = service.registry().get(&match_id).unwrap();
        assert_eq!(shared.lock().phase, Phase::Afternoon);
    }

    // the afternoon gate holds until everyone has passed
    let outcome = service.advance_match(&match_id).unwrap();
    assert!(!outcome.advanced());

    for view in [&a, &b] {
        service
            .submit_actions(&match_id, view.id, vec![ActionIntent::Pass])
            .unwrap();
    }

    // afternoon -> dusk -> night -> next day's setup, driven explicitly
    assert!(service.advance_match(&match_id).unwrap().advanced());
    assert!(service.advance_match(&match_id).unwrap().advanced());
    assert!(service.advance_match(&match_id).unwrap().advanced());

    let shared = service.registry().get(&match_id).unwrap();
    let state = shared.lock();
    assert_eq!(state.phase, Phase::Setup);
    assert_eq!(state.day, 2);
    // the snapshot kept pace with the advances
    drop(state);
    assert_eq!(service.store().load(&match_id).unwrap().day, 2);

    std::fs::remove_dir_all(service.store().dir()).ok();
}

#[test]
fn test_boundary_errors_are_structured() {
    let service = service("errors");
    let a = service
        .create_game(ParticipantPayload::new("Alice", deck("a")))
        .unwrap();
    let match_id = a.game_id.clone();

    // unknown participant
    let err = service.get_available_actions(&match_id, PlayerId::new(9));
    assert!(matches!(err, Err(EngineError::UnknownParticipant(_))));

    // malformed create payloads
    let err = service.create_game(ParticipantPayload::new("Alice", vec![]));
    assert!(matches!(err, Err(EngineError::InvalidParticipant(_))));
    let err = service.create_game(ParticipantPayload::new("NameFarTooLongForTheLimit", deck("x")));
    assert!(matches!(err, Err(EngineError::InvalidParticipant(_))));

    // capacity: fifth join is rejected, count stays at four
    for name in ["Bob", "Carol", "Dave"] {
        service
            .join_game(&match_id, ParticipantPayload::new(name, deck(name)))
            .unwrap();
    }
    let err = service.join_game(&match_id, ParticipantPayload::new("Eve", deck("e")));
    assert!(matches!(err, Err(EngineError::MatchFull { capacity: 4 })));
    {
        let shared = service.registry().get(&match_id).unwrap();
        assert_eq!(shared.lock().players.len(), 4);
    }

    std::fs::remove_dir_all(service.store().dir()).ok();
}

#[test]
fn test_illegal_batch_leaves_zones_untouched() {
    let service = service("atomic");
    let a = service
        .create_game(ParticipantPayload::new("Alice", deck("a")))
        .unwrap();
    let match_id = a.game_id.clone();
    service
        .join_game(&match_id, ParticipantPayload::new("Bob", deck("b")))
        .unwrap();
    service.start_game(&match_id).unwrap();

    let before = service.get_available_actions(&match_id, a.id).unwrap();
    let mut batch = bank_mana_batch(&before.hand);
    // splice in an intent for a card that is still in the deck
    batch.insert(
        1,
        ActionIntent::MoveCard {
            card: before.deck[0].clone(),
            from: "hand".to_string(),
            to: "mana_pile".to_string(),
        },
    );

    let err = service.submit_actions(&match_id, a.id, batch);
    assert!(matches!(err, Err(EngineError::InvalidMove(_))));

    // all-or-nothing: the legal leading intent was not applied either
    let after = service.get_available_actions(&match_id, a.id).unwrap();
    assert_eq!(after.hand, before.hand);
    assert!(after.mana_pile.is_empty());

    std::fs::remove_dir_all(service.store().dir()).ok();
}
