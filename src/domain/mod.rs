//! Доменная модель лотереи: участники, призы, победители, пресеты, настройки мероприятия.

pub mod activity;
pub mod defaults;
pub mod participant;
pub mod preset;
pub mod prize;
pub mod winner;

// Базовые идентификаторы. Непрозрачные строки: в сохранённых снапшотах
// встречаются как "p1", так и "user-…"/uuid.
pub type ParticipantId = String;
pub type PrizeId = String;
pub type WinnerId = String;

/// Время в миллисекундах от Unix epoch.
pub type TimestampMs = i64;

pub use activity::*;
pub use participant::*;
pub use preset::*;
pub use prize::*;
pub use winner::*;
