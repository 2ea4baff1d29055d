use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ActivityInfo, Participant, ParticipantId, PresetWinner, Prize, PrizeId, WinnerId};
use crate::engine::{BulkDrawOutcome, CursorDirection, LotteryEngine, RandomSource};
use crate::infra::import::{parse_rows, resolve_participant_rows, resolve_prize_rows};

use super::dto::CommandResponse;
use super::errors::ApiError;

/// Команда верхнего уровня.
///
/// Слой представления не трогает коллекции напрямую: любое изменение
/// приходит сюда, применяется к `LotteryEngine` целиком или не применяется вовсе.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Разыграть одно место приза.
    DrawOne { prize_id: PrizeId },

    /// Разыграть все оставшиеся места приза.
    DrawAllRemaining { prize_id: PrizeId },

    /// Пошаговый серийный розыгрыш (между шагами – анимация).
    BeginBulkDraw { prize_id: PrizeId },
    BulkDrawStep,
    FinishBulkDraw,

    /// Удалить запись о выигрыше, вернуть место призу.
    RemoveWinner { winner_id: WinnerId },

    /// Сбросить результаты (участники, призы, пресеты остаются).
    ResetResults,

    /// Очистить все данные.
    ResetAll,

    /// Навигация по призам.
    SetCurrentPrize { prize_id: PrizeId },
    AdvanceCursor { direction: CursorDirection },
    AdvancePastExhausted,

    /// Участники.
    AddParticipant {
        name: String,
        department: Option<String>,
    },
    UpsertParticipant(Participant),
    RemoveParticipant { participant_id: ParticipantId },
    /// JSON-массив строк таблицы.
    ImportParticipants { rows_json: String },

    /// Призы.
    AddDefaultPrize,
    UpsertPrize(Prize),
    RemovePrize { prize_id: PrizeId },
    ImportPrizes { rows_json: String },

    /// Пресеты.
    UpsertPreset(PresetWinner),
    AddPresetName { prize_id: PrizeId, name: String },
    RemovePresetName { prize_id: PrizeId, name: String },

    /// Названия мероприятия и компании.
    SetActivityInfo(ActivityInfo),
}

/// Применить команду к движку.
pub fn apply_command<R: RandomSource>(
    engine: &mut LotteryEngine,
    rng: &mut R,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    debug!(?command, "команда");

    let response = match command {
        Command::DrawOne { prize_id } => CommandResponse::WinnerDrawn(engine.draw_one(&prize_id, rng)?),

        Command::DrawAllRemaining { prize_id } => {
            let requested = engine.prize(&prize_id).map_or(0, |p| p.remaining);
            let winners = engine.draw_all_remaining(&prize_id, rng)?;
            CommandResponse::BulkDrawn(BulkDrawOutcome {
                prize_id,
                requested,
                winners,
            })
        }

        Command::BeginBulkDraw { prize_id } => {
            let requested = engine.begin_bulk_draw(&prize_id)?;
            CommandResponse::BulkDrawStarted { prize_id, requested }
        }

        Command::BulkDrawStep => CommandResponse::BulkDrawStep(engine.bulk_draw_step(rng)?),

        Command::FinishBulkDraw => CommandResponse::BulkDrawn(engine.finish_bulk_draw()?),

        Command::RemoveWinner { winner_id } => CommandResponse::WinnerRemoved(engine.remove_winner(&winner_id)?),

        Command::ResetResults => {
            engine.reset_results()?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::ResetAll => {
            engine.reset_all()?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::SetCurrentPrize { prize_id } => {
            engine.set_current_prize(&prize_id)?;
            CommandResponse::Cursor(Some(prize_id))
        }

        Command::AdvanceCursor { direction } => CommandResponse::Cursor(engine.advance_cursor(direction)?),

        Command::AdvancePastExhausted => CommandResponse::Cursor(engine.advance_past_exhausted()?),

        Command::AddParticipant { name, department } => {
            CommandResponse::ParticipantAdded(engine.add_participant(name, department)?)
        }

        Command::UpsertParticipant(participant) => {
            engine.upsert_participant(participant)?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::RemoveParticipant { participant_id } => {
            engine.remove_participant(&participant_id)?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::ImportParticipants { rows_json } => {
            let rows = parse_rows(&rows_json)?;
            let outcome = resolve_participant_rows(&rows);
            let ids = engine.import_participants(outcome.rows)?;
            CommandResponse::Imported {
                ids,
                skipped: outcome.skipped as u32,
            }
        }

        Command::AddDefaultPrize => {
            engine.add_default_prize()?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::UpsertPrize(prize) => {
            engine.upsert_prize(prize)?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::RemovePrize { prize_id } => {
            engine.remove_prize(&prize_id)?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::ImportPrizes { rows_json } => {
            let rows = parse_rows(&rows_json)?;
            let outcome = resolve_prize_rows(&rows);
            let ids = engine.import_prizes(outcome.rows)?;
            CommandResponse::Imported {
                ids,
                skipped: outcome.skipped as u32,
            }
        }

        Command::UpsertPreset(preset) => {
            engine.upsert_preset(preset)?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::AddPresetName { prize_id, name } => {
            engine.add_preset_name(&prize_id, &name)?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::RemovePresetName { prize_id, name } => {
            engine.remove_preset_name(&prize_id, &name)?;
            CommandResponse::Snapshot(engine.snapshot())
        }

        Command::SetActivityInfo(info) => {
            engine.set_activity_info(info)?;
            CommandResponse::Snapshot(engine.snapshot())
        }
    };

    Ok(response)
}
