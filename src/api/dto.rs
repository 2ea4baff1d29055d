use serde::{Deserialize, Serialize};

use crate::domain::{Participant, PrizeId, Winner};
use crate::engine::BulkDrawOutcome;
use crate::state::LotterySnapshot;

/// DTO приза для экрана розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeViewDto {
    pub prize_id: PrizeId,
    pub category: String,
    pub name: String,
    pub count: u32,
    pub remaining: u32,
    pub rank: i64,
    /// Позиция в порядке розыгрыша (0 – разыгрывается первым).
    pub draw_position: u32,
    pub is_current: bool,
}

/// Итог по призу: кто уже выиграл.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeSummaryDto {
    pub prize: PrizeViewDto,
    pub winners: Vec<Winner>,
}

/// Общая сводка для экрана розыгрыша.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LotteryViewDto {
    pub activity_name: String,
    pub company_name: String,
    pub total_participants: u32,
    pub eligible_participants: u32,
    pub total_winners: u32,
    /// Призы в порядке розыгрыша.
    pub prizes: Vec<PrizeViewDto>,
    pub current_prize: Option<PrizeViewDto>,
    pub draw_in_progress: bool,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешно, возвращаем обновлённый снапшот.
    Snapshot(LotterySnapshot),

    /// Выбран один победитель.
    WinnerDrawn(Winner),

    /// Серийный розыгрыш завершён.
    BulkDrawn(BulkDrawOutcome),

    /// Серийный розыгрыш начат: сколько мест запрошено.
    BulkDrawStarted { prize_id: PrizeId, requested: u32 },

    /// Шаг серийного розыгрыша. `None` – шагов больше нет.
    BulkDrawStep(Option<Winner>),

    /// Запись о выигрыше удалена.
    WinnerRemoved(Winner),

    /// Курсор после навигации.
    Cursor(Option<PrizeId>),

    /// Участник добавлен.
    ParticipantAdded(Participant),

    /// Импорт выполнен: сколько строк принято/пропущено.
    Imported {
        /// id созданных участников или призов.
        ids: Vec<String>,
        skipped: u32,
    },
}
