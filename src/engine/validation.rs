use crate::domain::{Participant, PresetWinner, Prize};
use crate::engine::errors::LotteryError;

fn invalid(msg: impl Into<String>) -> LotteryError {
    LotteryError::Validation(msg.into())
}

/// Проверка участника перед добавлением/правкой.
pub fn validate_participant(participant: &Participant) -> Result<(), LotteryError> {
    if participant.id.trim().is_empty() {
        return Err(invalid("Participant: id is empty"));
    }
    if participant.name.trim().is_empty() {
        return Err(invalid("Participant: name is empty"));
    }
    Ok(())
}

/// Проверка приза. `won` – сколько мест уже разыграно.
///
/// Нельзя уменьшить `count` ниже числа уже выданных мест:
/// `remaining` перестал бы сходиться с записями победителей.
pub fn validate_prize(prize: &Prize, won: u32) -> Result<(), LotteryError> {
    if prize.id.trim().is_empty() {
        return Err(invalid("Prize: id is empty"));
    }
    if prize.name.trim().is_empty() {
        return Err(invalid("Prize: name is empty"));
    }
    if prize.count == 0 {
        return Err(invalid("Prize: count must be positive"));
    }
    if prize.count < won {
        return Err(invalid(format!(
            "Prize: count {} is below already drawn {}",
            prize.count, won
        )));
    }
    Ok(())
}

pub fn validate_preset(preset: &PresetWinner) -> Result<(), LotteryError> {
    if preset.participant_names.iter().any(|n| n.trim().is_empty()) {
        return Err(invalid("Preset: empty participant name"));
    }
    if preset.has_duplicates() {
        return Err(invalid("Preset: duplicate participant names"));
    }
    Ok(())
}
