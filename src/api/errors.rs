use serde::{Deserialize, Serialize};

use crate::domain::{ParticipantId, PrizeId, WinnerId};
use crate::engine::LotteryError;
use crate::infra::{ImportError, PersistenceError};

/// Ошибки внешнего API (то, что слой представления показывает оператору).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Не выбран приз для розыгрыша.
    NoPrizeSelected,

    /// У приза закончились места.
    PrizeExhausted(PrizeId),

    /// Некого разыгрывать.
    NoEligibleParticipants,

    /// Внутренняя защита выбора победителя.
    EmptyPool,

    WinnerNotFound(WinnerId),
    PrizeNotFound(PrizeId),
    ParticipantNotFound(ParticipantId),

    /// Некорректные данные формы.
    Validation(String),

    /// Команда пришла во время розыгрыша.
    DrawInProgress,

    /// Шаг серийного розыгрыша без его начала.
    NoDrawInProgress,

    /// Файл импорта не читается целиком.
    ImportFailed(String),

    /// Не удалось сохранить/прочитать снапшот.
    Storage(String),
}

impl From<LotteryError> for ApiError {
    fn from(err: LotteryError) -> Self {
        match err {
            LotteryError::NoPrizeSelected => ApiError::NoPrizeSelected,
            LotteryError::PrizeExhausted(id) => ApiError::PrizeExhausted(id),
            LotteryError::NoEligibleParticipants => ApiError::NoEligibleParticipants,
            LotteryError::EmptyPool => ApiError::EmptyPool,
            LotteryError::WinnerNotFound(id) => ApiError::WinnerNotFound(id),
            LotteryError::PrizeNotFound(id) => ApiError::PrizeNotFound(id),
            LotteryError::ParticipantNotFound(id) => ApiError::ParticipantNotFound(id),
            LotteryError::Validation(msg) => ApiError::Validation(msg),
            LotteryError::DrawInProgress => ApiError::DrawInProgress,
            LotteryError::NoDrawInProgress => ApiError::NoDrawInProgress,
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailed(err.to_string())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        ApiError::Storage(err.to_string())
    }
}
