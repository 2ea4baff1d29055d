use std::collections::HashSet;

use crate::domain::{Participant, PrizeId, Winner};

/// Участники без записи о выигрыше, в исходном порядке.
pub fn eligible_participants<'a>(participants: &'a [Participant], winners: &[Winner]) -> Vec<&'a Participant> {
    let won: HashSet<&str> = winners.iter().map(|w| w.participant_id.as_str()).collect();

    participants
        .iter()
        .filter(|p| !won.contains(p.id.as_str()))
        .collect()
}

/// Победители конкретного приза в порядке розыгрыша.
pub fn winners_for_prize<'a>(winners: &'a [Winner], prize_id: &PrizeId) -> Vec<&'a Winner> {
    winners.iter().filter(|w| &w.prize_id == prize_id).collect()
}

/// Сколько записей о выигрыше ссылается на приз.
pub fn won_count(winners: &[Winner], prize_id: &PrizeId) -> u32 {
    winners.iter().filter(|w| &w.prize_id == prize_id).count() as u32
}
