use crate::domain::{ParticipantId, PrizeId, WinnerId};

use thiserror::Error;

/// Ошибки движка лотереи.
///
/// Все восстановимые: команда либо применяется целиком, либо состояние не меняется.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LotteryError {
    #[error("Приз для розыгрыша не выбран")]
    NoPrizeSelected,

    #[error("У приза {0} не осталось мест")]
    PrizeExhausted(PrizeId),

    #[error("Нет участников, допущенных к розыгрышу")]
    NoEligibleParticipants,

    #[error("Пустой пул кандидатов при выборе победителя")]
    EmptyPool,

    #[error("Победитель {0} не найден")]
    WinnerNotFound(WinnerId),

    #[error("Приз {0} не найден")]
    PrizeNotFound(PrizeId),

    #[error("Участник {0} не найден")]
    ParticipantNotFound(ParticipantId),

    #[error("Некорректные данные: {0}")]
    Validation(String),

    #[error("Идёт розыгрыш, команда недоступна")]
    DrawInProgress,

    #[error("Серийный розыгрыш не начат")]
    NoDrawInProgress,
}
