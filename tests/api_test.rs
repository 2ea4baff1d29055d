// tests/api_test.rs

use lottery_engine::{
    apply_command, execute_query,
    domain::Prize,
    engine::{CursorDirection, LotteryEngine},
    infra::{DeterministicRng, FixedClock},
    ApiError, Command, CommandResponse, LotterySnapshot, Query, QueryResponse,
};

fn demo_engine() -> LotteryEngine {
    LotteryEngine::from_snapshot_with_clock(LotterySnapshot::demo(), Box::new(FixedClock::at(5_000)))
}

fn id(s: &str) -> String {
    s.to_string()
}

#[test]
fn draw_commands_go_through_engine() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(3);

    let resp = apply_command(&mut engine, &mut rng, Command::DrawOne { prize_id: id("pz1") }).unwrap();
    let CommandResponse::WinnerDrawn(winner) = resp else {
        panic!("expected WinnerDrawn, got {resp:?}");
    };
    assert_eq!(winner.prize_id, "pz1");
    assert_eq!(engine.prize(&id("pz1")).unwrap().remaining, 0);

    let resp = apply_command(&mut engine, &mut rng, Command::DrawAllRemaining { prize_id: id("pz4") }).unwrap();
    let CommandResponse::BulkDrawn(outcome) = resp else {
        panic!("expected BulkDrawn, got {resp:?}");
    };
    assert_eq!(outcome.requested, 5);
    assert_eq!(outcome.winners.len(), 5);
    assert!(outcome.is_complete());
    assert_eq!(engine.winners().len(), 6);
}

#[test]
fn stepwise_bulk_draw_through_commands() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(9);

    let resp = apply_command(&mut engine, &mut rng, Command::BeginBulkDraw { prize_id: id("pz3") }).unwrap();
    assert_eq!(
        resp,
        CommandResponse::BulkDrawStarted {
            prize_id: id("pz3"),
            requested: 3
        }
    );

    // Во время серии любые изменения отклоняются.
    let err = apply_command(&mut engine, &mut rng, Command::ResetResults).unwrap_err();
    assert_eq!(err, ApiError::DrawInProgress);

    let mut steps = 0;
    while let CommandResponse::BulkDrawStep(Some(_)) =
        apply_command(&mut engine, &mut rng, Command::BulkDrawStep).unwrap()
    {
        steps += 1;
    }
    assert_eq!(steps, 3);

    let resp = apply_command(&mut engine, &mut rng, Command::FinishBulkDraw).unwrap();
    let CommandResponse::BulkDrawn(outcome) = resp else {
        panic!("expected BulkDrawn, got {resp:?}");
    };
    assert_eq!(outcome.winners.len(), 3);
    assert!(!engine.is_drawing());

    let err = apply_command(&mut engine, &mut rng, Command::FinishBulkDraw).unwrap_err();
    assert_eq!(err, ApiError::NoDrawInProgress);
}

#[test]
fn engine_errors_map_to_api_errors() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(1);

    apply_command(&mut engine, &mut rng, Command::DrawOne { prize_id: id("pz1") }).unwrap();

    assert_eq!(
        apply_command(&mut engine, &mut rng, Command::DrawOne { prize_id: id("pz1") }).unwrap_err(),
        ApiError::PrizeExhausted(id("pz1"))
    );
    assert_eq!(
        apply_command(&mut engine, &mut rng, Command::DrawOne { prize_id: id("nope") }).unwrap_err(),
        ApiError::NoPrizeSelected
    );
    assert_eq!(
        apply_command(&mut engine, &mut rng, Command::RemoveWinner { winner_id: id("w-missing") }).unwrap_err(),
        ApiError::WinnerNotFound(id("w-missing"))
    );
    assert!(matches!(
        apply_command(&mut engine, &mut rng, Command::AddParticipant { name: "  ".into(), department: None }),
        Err(ApiError::Validation(_))
    ));
    assert!(matches!(
        apply_command(
            &mut engine,
            &mut rng,
            Command::UpsertPrize(Prize::new("pz1", "一等奖", "Bike", 0, 1))
        ),
        Err(ApiError::Validation(_))
    ));
}

#[test]
fn import_commands_report_ids_and_skipped_rows() {
    let mut engine = LotteryEngine::new();
    let mut rng = DeterministicRng::from_seed(1);

    let resp = apply_command(
        &mut engine,
        &mut rng,
        Command::ImportParticipants {
            rows_json: r#"[{"姓名": "A", "部门": "X"}, {"姓名": ""}, {"name": "B"}]"#.into(),
        },
    )
    .unwrap();
    let CommandResponse::Imported { ids, skipped } = resp else {
        panic!("expected Imported, got {resp:?}");
    };
    assert_eq!(ids.len(), 2);
    assert_eq!(skipped, 1);

    let resp = apply_command(
        &mut engine,
        &mut rng,
        Command::ImportPrizes {
            rows_json: r#"[{"奖项": "特等奖", "奖品名称": "Car", "数量": 1, "排序": 0}]"#.into(),
        },
    )
    .unwrap();
    assert!(matches!(resp, CommandResponse::Imported { ref ids, skipped: 0 } if ids.len() == 1));
    assert_eq!(engine.current_prize().map(|p| p.name.as_str()), Some("Car"));

    let err = apply_command(&mut engine, &mut rng, Command::ImportParticipants { rows_json: "{".into() }).unwrap_err();
    assert!(matches!(err, ApiError::ImportFailed(_)));
    assert_eq!(engine.participants().len(), 2);
}

#[test]
fn cursor_commands_follow_draw_order() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(1);

    assert_eq!(engine.current_prize_id(), Some(&id("pz5")));

    let resp = apply_command(&mut engine, &mut rng, Command::AdvanceCursor { direction: CursorDirection::Next }).unwrap();
    assert_eq!(resp, CommandResponse::Cursor(Some(id("pz4"))));

    let resp = apply_command(&mut engine, &mut rng, Command::SetCurrentPrize { prize_id: id("pz1") }).unwrap();
    assert_eq!(resp, CommandResponse::Cursor(Some(id("pz1"))));

    assert_eq!(
        apply_command(&mut engine, &mut rng, Command::SetCurrentPrize { prize_id: id("ghost") }).unwrap_err(),
        ApiError::PrizeNotFound(id("ghost"))
    );
}

#[test]
fn lottery_view_reflects_state() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(4);

    engine.draw_all_remaining(&id("pz5"), &mut rng).unwrap();

    let QueryResponse::LotteryView(view) = execute_query(&engine, Query::GetLotteryView) else {
        panic!("expected LotteryView");
    };
    assert_eq!(view.activity_name, "年度盛典");
    assert_eq!(view.total_participants, 20);
    assert_eq!(view.total_winners, 9);
    assert_eq!(view.eligible_participants, 11);
    assert!(!view.draw_in_progress);

    let positions: Vec<(&str, u32)> = view.prizes.iter().map(|p| (p.prize_id.as_str(), p.draw_position)).collect();
    assert_eq!(positions, vec![("pz5", 0), ("pz4", 1), ("pz3", 2), ("pz2", 3), ("pz1", 4)]);

    let current = view.current_prize.expect("cursor set");
    assert_eq!(current.prize_id, "pz5");
    assert_eq!(current.remaining, 0);
    assert!(current.is_current);
}

#[test]
fn prize_summaries_and_lists() {
    let mut engine = demo_engine();
    let mut rng = DeterministicRng::from_seed(8);

    engine.draw_one(&id("pz2"), &mut rng).unwrap();
    engine.draw_one(&id("pz3"), &mut rng).unwrap();

    let QueryResponse::PrizeSummary(Some(summary)) =
        execute_query(&engine, Query::GetPrizeSummary { prize_id: id("pz2") })
    else {
        panic!("expected summary");
    };
    assert_eq!(summary.winners.len(), 1);
    assert_eq!(summary.prize.remaining, 1);

    assert_eq!(
        execute_query(&engine, Query::GetPrizeSummary { prize_id: id("ghost") }),
        QueryResponse::PrizeSummary(None)
    );

    let QueryResponse::PrizeSummaries(all) = execute_query(&engine, Query::ListPrizeSummaries) else {
        panic!("expected summaries");
    };
    assert_eq!(all.len(), 5);
    assert_eq!(all.iter().map(|s| s.winners.len()).sum::<usize>(), 2);

    let QueryResponse::Participants(eligible) = execute_query(&engine, Query::ListEligible) else {
        panic!("expected participants");
    };
    assert_eq!(eligible.len(), 18);

    let QueryResponse::Winners(winners) = execute_query(&engine, Query::ListWinners) else {
        panic!("expected winners");
    };
    assert_eq!(winners.len(), 2);
    assert_eq!(winners[0].prize_id, "pz2");
}
