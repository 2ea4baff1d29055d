use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::{ParticipantId, PrizeId, WinnerId};

/// Генерация непрозрачных id: префикс сущности + порядковый номер + uuid v7.
///
/// Номер делает id читаемыми в логах, uuid – уникальными между сессиями
/// (импорт дописывает данные к уже сохранённым).
#[derive(Debug)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    fn next(&self, prefix: &str) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", prefix, seq, Uuid::now_v7().simple())
    }

    #[inline]
    pub fn next_participant_id(&self) -> ParticipantId {
        self.next("user")
    }

    #[inline]
    pub fn next_prize_id(&self) -> PrizeId {
        self.next("prize")
    }

    #[inline]
    pub fn next_winner_id(&self) -> WinnerId {
        self.next("winner")
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
