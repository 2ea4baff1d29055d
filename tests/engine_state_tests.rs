//
// tests/engine_state_tests.rs
//
// Состояние вне самого розыгрыша: отмена выигрыша, сбросы, курсор, CRUD.

use lottery_engine::domain::{ActivityInfo, Participant, PresetWinner, Prize, NEW_PRIZE_CATEGORY, NEW_PRIZE_NAME};
use lottery_engine::engine::{CursorDirection, DrawEventKind, LotteryEngine, LotteryError};
use lottery_engine::infra::{DeterministicRng, FixedClock};
use lottery_engine::state::LotterySnapshot;

fn demo_engine() -> LotteryEngine {
    LotteryEngine::from_snapshot_with_clock(LotterySnapshot::demo(), Box::new(FixedClock::at(1_000)))
}

fn id(s: &str) -> String {
    s.to_string()
}

// ---------- отмена выигрыша ----------

#[test]
fn remove_winner_restores_eligibility_and_slot() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(17);

    let winner = engine.draw_one(&id("pz4"), &mut rng).unwrap();
    let remaining_after_draw = engine.prize(&id("pz4")).unwrap().remaining;
    assert!(!engine.eligible().iter().any(|p| p.id == winner.participant_id));

    let removed = engine.remove_winner(&winner.id).unwrap();
    assert_eq!(removed, winner);

    assert!(engine.eligible().iter().any(|p| p.id == winner.participant_id));
    assert_eq!(engine.prize(&id("pz4")).unwrap().remaining, remaining_after_draw + 1);
    assert!(engine.winners().is_empty());
}

#[test]
fn remove_unknown_winner_fails() {
    let mut engine = demo_engine();
    assert_eq!(
        engine.remove_winner(&id("nope")),
        Err(LotteryError::WinnerNotFound(id("nope")))
    );
}

#[test]
fn remove_winner_of_deleted_prize_is_a_quiet_no_op_for_remaining() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(2);

    let winner = engine.draw_one(&id("pz1"), &mut rng).unwrap();
    engine.remove_prize(&id("pz1")).unwrap();

    // Запись осталась, приза уже нет.
    assert_eq!(engine.winners().len(), 1);
    engine.remove_winner(&winner.id).unwrap();
    assert!(engine.winners().is_empty());
    assert!(engine.prize(&id("pz1")).is_none());
}

// ---------- сбросы ----------

#[test]
fn reset_results_keeps_roster_prizes_presets() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(3);

    engine.add_preset_name(&id("pz1"), "张伟").unwrap();
    engine.draw_all_remaining(&id("pz5"), &mut rng).unwrap();
    engine.draw_one(&id("pz1"), &mut rng).unwrap();

    let participants_before = engine.participants().to_vec();
    let presets_before = engine.presets().to_vec();

    engine.reset_results().unwrap();

    assert!(engine.winners().is_empty());
    for prize in engine.prizes() {
        assert_eq!(prize.remaining, prize.count);
    }
    assert_eq!(engine.prizes().len(), 5);
    assert_eq!(engine.participants(), participants_before.as_slice());
    assert_eq!(engine.presets(), presets_before.as_slice());
}

#[test]
fn reset_all_empties_everything() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(4);

    engine.add_preset_name(&id("pz2"), "王芳").unwrap();
    engine.draw_one(&id("pz5"), &mut rng).unwrap();
    engine
        .set_activity_info(ActivityInfo {
            activity_name: "Gala".into(),
            company_name: "ACME".into(),
        })
        .unwrap();

    engine.reset_all().unwrap();

    assert!(engine.participants().is_empty());
    assert!(engine.prizes().is_empty());
    assert!(engine.winners().is_empty());
    assert!(engine.presets().is_empty());
    assert_eq!(engine.current_prize_id(), None);
    assert_eq!(engine.activity(), &ActivityInfo::default());

    // Журнал начинается заново: остаётся только сам сброс.
    assert_eq!(engine.events().len(), 1);
    let last = engine.events().last().unwrap();
    assert_eq!((last.index, &last.kind), (0, &DrawEventKind::AllReset));
}

// ---------- курсор ----------

#[test]
fn cursor_defaults_to_largest_rank() {
    let engine = demo_engine();
    assert_eq!(engine.current_prize_id(), Some(&id("pz5")));
}

#[test]
fn cursor_walks_towards_grand_prize_and_stops_at_edges() {
    let mut engine = demo_engine();

    assert_eq!(engine.advance_cursor(CursorDirection::Previous), Ok(Some(id("pz5"))));

    for expected in ["pz4", "pz3", "pz2", "pz1"] {
        assert_eq!(engine.advance_cursor(CursorDirection::Next), Ok(Some(id(expected))));
    }
    assert_eq!(engine.advance_cursor(CursorDirection::Next), Ok(Some(id("pz1"))));

    assert_eq!(engine.advance_cursor(CursorDirection::Previous), Ok(Some(id("pz2"))));
}

#[test]
fn deleting_current_prize_repairs_cursor() {
    let mut engine = demo_engine();

    engine.set_current_prize(&id("pz3")).unwrap();
    engine.remove_prize(&id("pz3")).unwrap();
    assert_eq!(engine.current_prize_id(), Some(&id("pz5")));

    engine.remove_prize(&id("pz5")).unwrap();
    assert_eq!(engine.current_prize_id(), Some(&id("pz4")));

    for pz in ["pz4", "pz2", "pz1"] {
        engine.remove_prize(&id(pz)).unwrap();
    }
    assert_eq!(engine.current_prize_id(), None);
}

#[test]
fn adding_first_prize_sets_cursor() {
    let mut engine = LotteryEngine::new();
    assert_eq!(engine.current_prize_id(), None);

    let prize = engine.add_default_prize().unwrap();
    assert_eq!(prize.category, NEW_PRIZE_CATEGORY);
    assert_eq!(prize.name, NEW_PRIZE_NAME);
    assert_eq!(prize.count, 1);
    assert_eq!(prize.rank, 1);
    assert_eq!(engine.current_prize_id(), Some(&prize.id));

    let second = engine.add_default_prize().unwrap();
    assert_eq!(second.rank, 2);
    // Курсор не прыгает, пока текущий приз существует.
    assert_eq!(engine.current_prize_id(), Some(&prize.id));
}

#[test]
fn set_current_prize_rejects_unknown_id() {
    let mut engine = demo_engine();
    assert_eq!(
        engine.set_current_prize(&id("ghost")),
        Err(LotteryError::PrizeNotFound(id("ghost")))
    );
    assert_eq!(engine.current_prize_id(), Some(&id("pz5")));
}

#[test]
fn advance_past_exhausted_moves_only_when_done() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(6);

    engine.set_current_prize(&id("pz4")).unwrap();
    assert_eq!(engine.advance_past_exhausted(), Ok(Some(id("pz4"))));

    engine.draw_all_remaining(&id("pz4"), &mut rng).unwrap();
    assert_eq!(engine.advance_past_exhausted(), Ok(Some(id("pz3"))));
}

// ---------- CRUD ----------

#[test]
fn count_edit_recomputes_remaining() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(8);

    engine.draw_one(&id("pz3"), &mut rng).unwrap();
    engine.draw_one(&id("pz3"), &mut rng).unwrap();

    let mut edited = engine.prize(&id("pz3")).unwrap().clone();
    edited.count = 6;
    edited.remaining = 999;
    let stored = engine.upsert_prize(edited).unwrap();
    assert_eq!(stored.remaining, 4);

    let mut shrunk = stored.clone();
    shrunk.count = 1;
    assert!(matches!(engine.upsert_prize(shrunk), Err(LotteryError::Validation(_))));
    assert_eq!(engine.prize(&id("pz3")).unwrap().count, 6);
}

#[test]
fn prize_validation() {
    let mut engine = LotteryEngine::new();

    assert!(matches!(
        engine.upsert_prize(Prize::new("x", "c", "n", 0, 1)),
        Err(LotteryError::Validation(_))
    ));
    assert!(matches!(
        engine.upsert_prize(Prize::new("x", "c", "  ", 1, 1)),
        Err(LotteryError::Validation(_))
    ));
    assert!(engine.prizes().is_empty());
}

#[test]
fn participant_crud() {
    let mut engine = LotteryEngine::new();

    let p = engine.add_participant("  Alice ", Some("Ops".into())).unwrap();
    assert_eq!(p.name, "Alice");
    assert!(p.id.starts_with("user-"));

    assert!(matches!(
        engine.add_participant("   ", None),
        Err(LotteryError::Validation(_))
    ));

    engine
        .upsert_participant(Participant::new(p.id.clone(), "Alicia", None))
        .unwrap();
    assert_eq!(engine.participants().len(), 1);
    assert_eq!(engine.participants()[0].name, "Alicia");

    assert_eq!(
        engine.remove_participant(&id("missing")),
        Err(LotteryError::ParticipantNotFound(id("missing")))
    );
    engine.remove_participant(&p.id).unwrap();
    assert!(engine.participants().is_empty());
}

#[test]
fn upserted_name_is_trimmed_and_matches_preset() {
    let mut engine = LotteryEngine::new();
    engine.upsert_prize(Prize::new("pz", "一等奖", "Bike", 1, 1)).unwrap();
    engine
        .upsert_participant(Participant::new("a", "  Alice  ", Some("  ".into())))
        .unwrap();
    engine.upsert_participant(Participant::new("b", "Bob", None)).unwrap();

    assert_eq!(engine.participants()[0].name, "Alice");
    assert_eq!(engine.participants()[0].department, None);
    assert!(matches!(
        engine.upsert_participant(Participant::new("c", "   ", None)),
        Err(LotteryError::Validation(_))
    ));

    engine.add_preset_name(&id("pz"), " Alice ").unwrap();
    let winner = engine.draw_one(&id("pz"), &mut DeterministicRng::from_seed(5)).unwrap();
    assert_eq!(winner.participant_id, "a");
}

#[test]
fn preset_editing() {
    let mut engine = demo_engine();

    assert_eq!(engine.add_preset_name(&id("pz1"), "张伟"), Ok(true));
    assert_eq!(engine.add_preset_name(&id("pz1"), "张伟"), Ok(false));
    assert_eq!(engine.add_preset_name(&id("pz1"), "王芳"), Ok(true));
    assert_eq!(
        engine.preset_for(&id("pz1")).unwrap().participant_names,
        vec!["张伟".to_string(), "王芳".to_string()]
    );

    assert_eq!(engine.remove_preset_name(&id("pz1"), "张伟"), Ok(true));
    assert_eq!(engine.remove_preset_name(&id("pz1"), "张伟"), Ok(false));

    assert_eq!(
        engine.add_preset_name(&id("ghost"), "张伟"),
        Err(LotteryError::PrizeNotFound(id("ghost")))
    );

    let dup = PresetWinner {
        prize_id: id("pz2"),
        participant_names: vec!["A".into(), "A".into()],
    };
    assert!(matches!(engine.upsert_preset(dup), Err(LotteryError::Validation(_))));

    let ok = PresetWinner {
        prize_id: id("pz2"),
        participant_names: vec!["A".into(), "B".into()],
    };
    engine.upsert_preset(ok.clone()).unwrap();
    assert_eq!(engine.preset_for(&id("pz2")), Some(&ok));
}

#[test]
fn snapshot_round_trip_through_engine() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(10);
    engine.draw_all_remaining(&id("pz5"), &mut rng).unwrap();

    let restored = LotteryEngine::from_snapshot(engine.snapshot());

    assert_eq!(restored.snapshot(), engine.snapshot());
    assert_eq!(restored.eligible().len(), 11);
}

#[test]
fn loading_reconciles_stale_remaining() {
    let mut snapshot = LotterySnapshot::demo();
    let mut engine = LotteryEngine::from_snapshot(snapshot.clone());
    let mut rng = DeterministicRng::from_seed(12);
    engine.draw_one(&id("pz2"), &mut rng).unwrap();

    snapshot.winners = engine.winners().to_vec();
    // remaining не тронут: как будто сохранение было частичным.
    let restored = LotteryEngine::from_snapshot(snapshot);

    assert_eq!(restored.prize(&id("pz2")).unwrap().remaining, 1);
}
