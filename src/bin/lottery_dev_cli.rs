// src/bin/lottery_dev_cli.rs
//
// Консольная репетиция церемонии: загрузить снапшот, разыграть все призы
// от мелких к главному, сохранить состояние и выгрузить CSV-отчёт.
//
// Аргументы:
//   --reset-results   сбросить прошлые результаты перед розыгрышем
//   --reset-all       очистить всё и начать с демо-данных

use std::fs;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lottery_engine::domain::defaults::{demo_participants, demo_prizes};
use lottery_engine::engine::{LotteryEngine, RandomSource};
use lottery_engine::infra::{
    export_file_name, export_winners_csv, load_snapshot, persist, DeterministicRng, JsonFileStorage, SystemRng,
};
use lottery_engine::LotteryConfig;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lottery_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LotteryConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match config.rng_seed {
        Some(seed) => {
            println!("RNG: детерминированный, seed={}", seed);
            run(&config, &args, &mut DeterministicRng::from_seed(seed))
        }
        None => run(&config, &args, &mut SystemRng),
    };

    if let Err(msg) = result {
        eprintln!("ОШИБКА: {}", msg);
        std::process::exit(1);
    }
}

fn run<R: RandomSource>(config: &LotteryConfig, args: &[String], rng: &mut R) -> Result<(), String> {
    let mut storage = JsonFileStorage::new(config.storage_path.clone());
    let had_saved = storage.path().exists();

    let snapshot = load_snapshot(&storage, config.seed_demo_data).map_err(|e| e.to_string())?;
    let mut engine = LotteryEngine::from_snapshot(snapshot);

    if !had_saved {
        engine
            .set_activity_info(config.activity.clone())
            .map_err(|e| e.to_string())?;
    }

    if args.iter().any(|a| a == "--reset-all") {
        engine.reset_all().map_err(|e| e.to_string())?;
        // После полной очистки сразу возвращаем демо-набор, как при первом запуске.
        for p in demo_participants() {
            engine.upsert_participant(p).map_err(|e| e.to_string())?;
        }
        for p in demo_prizes() {
            engine.upsert_prize(p).map_err(|e| e.to_string())?;
        }
    } else if args.iter().any(|a| a == "--reset-results") {
        engine.reset_results().map_err(|e| e.to_string())?;
    }

    let activity = engine.activity().clone();
    println!("=== {} · {} ===\n", activity.company_name, activity.activity_name);
    println!(
        "Участников: {}, допущено: {}, призов: {}\n",
        engine.participants().len(),
        engine.eligible().len(),
        engine.prizes().len()
    );

    loop {
        let Some(prize) = engine.current_prize().cloned() else {
            println!("Призы не настроены.");
            break;
        };

        if !prize.is_exhausted() {
            if engine.eligible().is_empty() {
                println!("Участники закончились, розыгрыш остановлен.");
                break;
            }

            println!(
                "--- {}: {} (мест: {}, осталось: {}) ---",
                prize.category, prize.name, prize.count, prize.remaining
            );

            engine.begin_bulk_draw(&prize.id).map_err(|e| e.to_string())?;
            while let Some(w) = engine.bulk_draw_step(rng).map_err(|e| e.to_string())? {
                println!(
                    "  победитель: {} ({})",
                    w.participant_name,
                    w.participant_department.as_deref().unwrap_or("—")
                );
            }
            let outcome = engine.finish_bulk_draw().map_err(|e| e.to_string())?;
            if !outcome.is_complete() {
                println!(
                    "  разыграно {} из {}: не хватило участников",
                    outcome.winners.len(),
                    outcome.requested
                );
            }

            persist(&mut storage, &engine).map_err(|e| e.to_string())?;
        }

        let before = engine.current_prize_id().cloned();
        let after = engine.advance_past_exhausted().map_err(|e| e.to_string())?;
        if after == before {
            break;
        }
    }

    println!("\nИтого победителей: {}", engine.winners().len());

    let report_name = export_file_name(chrono::Local::now().date_naive());
    fs::write(&report_name, export_winners_csv(engine.winners())).map_err(|e| e.to_string())?;
    println!("Отчёт: {}", report_name);

    persist(&mut storage, &engine).map_err(|e| e.to_string())?;
    println!("Снапшот: {}", storage.path().display());

    Ok(())
}
