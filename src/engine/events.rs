use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantId, PrizeId, WinnerId};

/// Событие движка. Слой представления подписывается на них, чтобы
/// запускать анимации; в снапшот не сохраняются.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawEventKind {
    /// Выбран победитель.
    WinnerDrawn {
        winner_id: WinnerId,
        participant_id: ParticipantId,
        prize_id: PrizeId,
        /// Победитель взят из пресета, а не случайно.
        from_preset: bool,
    },

    /// Начат серийный розыгрыш всех оставшихся мест.
    BulkDrawStarted { prize_id: PrizeId, requested: u32 },

    /// Серийный розыгрыш завершён (возможно досрочно).
    BulkDrawFinished {
        prize_id: PrizeId,
        requested: u32,
        drawn: u32,
    },

    /// Запись о выигрыше удалена, место возвращено.
    WinnerRemoved { winner_id: WinnerId, prize_id: PrizeId },

    /// Результаты сброшены.
    ResultsReset,

    /// Все данные очищены.
    AllReset,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawEvent {
    pub index: u32,
    pub kind: DrawEventKind,
}

/// Журнал событий текущей сессии.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawLog {
    pub events: Vec<DrawEvent>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: DrawEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(DrawEvent { index: idx, kind });
    }

    /// Забыть все события. Нумерация начинается заново.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn last(&self) -> Option<&DrawEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
