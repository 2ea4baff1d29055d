use serde::{Deserialize, Serialize};

use crate::domain::participant::Participant;
use crate::domain::prize::Prize;
use crate::domain::{ParticipantId, PrizeId, TimestampMs, WinnerId};

/// Запись о выигрыше.
///
/// Поля участника и приза копируются в момент розыгрыша: история
/// должна отображаться корректно и после правки/удаления исходных записей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub id: WinnerId,
    pub participant_id: ParticipantId,
    pub participant_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_department: Option<String>,
    pub prize_id: PrizeId,
    pub prize_category: String,
    pub prize_name: String,
    pub timestamp: TimestampMs,
}

impl Winner {
    /// Собрать запись из живых участника и приза (снимок полей).
    pub fn from_draw(id: WinnerId, participant: &Participant, prize: &Prize, timestamp: TimestampMs) -> Self {
        Self {
            id,
            participant_id: participant.id.clone(),
            participant_name: participant.name.clone(),
            participant_department: participant.department.clone(),
            prize_id: prize.id.clone(),
            prize_category: prize.category.clone(),
            prize_name: prize.name.clone(),
            timestamp,
        }
    }
}
