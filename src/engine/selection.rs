use crate::domain::{Participant, PresetWinner};
use crate::engine::errors::LotteryError;
use crate::engine::RandomSource;

/// Выбрать победителя из допущенных участников.
///
/// Если для приза есть пресет, побеждает первое имя из очереди, которое
/// совпадает (точное равенство) с кем-то из `eligible`. Если совпадения нет,
/// победитель выбирается равновероятно.
///
/// При совпадении имён у нескольких участников берётся первый по порядку
/// в `eligible`: пресет знает только имя.
pub fn select_winner<'a, R: RandomSource>(
    eligible: &[&'a Participant],
    preset: Option<&PresetWinner>,
    rng: &mut R,
) -> Result<&'a Participant, LotteryError> {
    if eligible.is_empty() {
        return Err(LotteryError::EmptyPool);
    }

    if let Some(preset) = preset {
        for name in &preset.participant_names {
            if let Some(p) = eligible.iter().find(|p| &p.name == name) {
                return Ok(*p);
            }
        }
    }

    let idx = rng.pick_index(eligible.len());
    eligible
        .get(idx)
        .copied()
        .ok_or(LotteryError::EmptyPool)
}
