use serde::{Deserialize, Serialize};

use crate::domain::PrizeId;

/// Категория-заглушка для приза без явного уровня.
pub const PLACEHOLDER_CATEGORY: &str = "未命名等级";
/// Название-заглушка для приза без имени.
pub const PLACEHOLDER_PRIZE_NAME: &str = "未命名奖品";

/// Категория/название для приза, добавленного кнопкой "новый приз".
pub const NEW_PRIZE_CATEGORY: &str = "新等级";
pub const NEW_PRIZE_NAME: &str = "新奖品";

/// Приз (уровень награды) с количеством мест.
///
/// Инвариант: `remaining == count - число победителей с этим prize_id`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prize {
    pub id: PrizeId,
    /// Уровень: "特等奖", "一等奖" и т.п.
    pub category: String,
    pub name: String,
    /// Всего мест.
    pub count: u32,
    /// Сколько мест ещё не разыграно.
    #[serde(default)]
    pub remaining: u32,
    /// Ключ порядка. Розыгрыш идёт от большего rank к меньшему.
    #[serde(default)]
    pub rank: i64,
}

impl Prize {
    /// Новый приз: все места свободны.
    pub fn new(
        id: impl Into<PrizeId>,
        category: impl Into<String>,
        name: impl Into<String>,
        count: u32,
        rank: i64,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            name: name.into(),
            count,
            remaining: count,
            rank,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Сколько мест уже разыграно.
    pub fn drawn(&self) -> u32 {
        self.count.saturating_sub(self.remaining)
    }
}
