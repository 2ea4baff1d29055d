use serde::{Deserialize, Serialize};

use crate::domain::{Participant, Prize, PrizeId, Winner};
use crate::engine::{winners_for_prize, LotteryEngine};

use super::dto::{LotteryViewDto, PrizeSummaryDto, PrizeViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Сводка для экрана розыгрыша.
    GetLotteryView,

    /// Участники, ещё ничего не выигравшие.
    ListEligible,

    /// Все победители в порядке розыгрыша.
    ListWinners,

    /// Победители конкретного приза.
    GetPrizeSummary { prize_id: PrizeId },

    /// Итоги по всем призам (в порядке розыгрыша).
    ListPrizeSummaries,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    LotteryView(LotteryViewDto),
    Participants(Vec<Participant>),
    Winners(Vec<Winner>),
    PrizeSummary(Option<PrizeSummaryDto>),
    PrizeSummaries(Vec<PrizeSummaryDto>),
}

pub fn execute_query(engine: &LotteryEngine, query: Query) -> QueryResponse {
    match query {
        Query::GetLotteryView => QueryResponse::LotteryView(build_lottery_view(engine)),
        Query::ListEligible => QueryResponse::Participants(engine.eligible().into_iter().cloned().collect()),
        Query::ListWinners => QueryResponse::Winners(engine.winners().to_vec()),
        Query::GetPrizeSummary { prize_id } => QueryResponse::PrizeSummary(build_prize_summary(engine, &prize_id)),
        Query::ListPrizeSummaries => QueryResponse::PrizeSummaries(
            engine
                .prizes_in_draw_order()
                .into_iter()
                .filter_map(|p| build_prize_summary(engine, &p.id))
                .collect(),
        ),
    }
}

/// Собрать сводку экрана розыгрыша.
pub fn build_lottery_view(engine: &LotteryEngine) -> LotteryViewDto {
    let prizes = build_prizes_dto(engine);
    let current_prize = prizes.iter().find(|p| p.is_current).cloned();
    let activity = engine.activity();

    LotteryViewDto {
        activity_name: activity.activity_name.clone(),
        company_name: activity.company_name.clone(),
        total_participants: engine.participants().len() as u32,
        eligible_participants: engine.eligible().len() as u32,
        total_winners: engine.winners().len() as u32,
        prizes,
        current_prize,
        draw_in_progress: engine.is_drawing(),
    }
}

pub fn build_prize_summary(engine: &LotteryEngine, prize_id: &PrizeId) -> Option<PrizeSummaryDto> {
    let order = engine.prizes_in_draw_order();
    let position = order.iter().position(|p| &p.id == prize_id)?;

    Some(PrizeSummaryDto {
        prize: prize_dto(order[position], position, engine.current_prize_id()),
        winners: winners_for_prize(engine.winners(), prize_id)
            .into_iter()
            .cloned()
            .collect(),
    })
}

/// DTO призов в порядке розыгрыша.
fn build_prizes_dto(engine: &LotteryEngine) -> Vec<PrizeViewDto> {
    let current = engine.current_prize_id();

    engine
        .prizes_in_draw_order()
        .into_iter()
        .enumerate()
        .map(|(pos, prize)| prize_dto(prize, pos, current))
        .collect()
}

fn prize_dto(prize: &Prize, position: usize, current: Option<&PrizeId>) -> PrizeViewDto {
    PrizeViewDto {
        prize_id: prize.id.clone(),
        category: prize.category.clone(),
        name: prize.name.clone(),
        count: prize.count,
        remaining: prize.remaining,
        rank: prize.rank,
        draw_position: position as u32,
        is_current: current == Some(&prize.id),
    }
}
