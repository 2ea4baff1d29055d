//! Движок лотереи: допуск участников, выбор победителя, курсор по призам,
//! согласованность `remaining` с записями победителей.
//!
//! Высокоуровневый объект: `LotteryEngine`
//! Основные операции:
//!   - `draw_one` – разыграть одно место
//!   - `draw_all_remaining` – разыграть все оставшиеся места приза
//!   - `remove_winner` / `reset_results` / `reset_all`

pub mod eligibility;
pub mod errors;
pub mod events;
pub mod lottery;
pub mod ordering;
pub mod selection;
pub mod validation;

pub use eligibility::{eligible_participants, winners_for_prize, won_count};
pub use errors::LotteryError;
pub use events::{DrawEvent, DrawEventKind, DrawLog};
pub use lottery::{BulkDraw, BulkDrawOutcome, LotteryEngine};
pub use ordering::{default_cursor, draw_order, repair_cursor, step_cursor, CursorDirection};
pub use selection::select_winner;

use crate::domain::TimestampMs;

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Равновероятный индекс в диапазоне `0..len`. При `len == 0` – 0.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Источник времени для меток победителей.
pub trait Clock: std::fmt::Debug {
    fn now_ms(&self) -> TimestampMs;
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_ms(&self) -> TimestampMs {
        (**self).now_ms()
    }
}
