use serde::{Deserialize, Serialize};

use crate::domain::{Prize, PrizeId};

/// Направление перемещения курсора по призам.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CursorDirection {
    /// К следующему (более крупному) призу.
    Next,
    /// К предыдущему (более мелкому) призу.
    Previous,
}

/// Порядок розыгрыша: от большего `rank` (мелкий приз) к меньшему (главный приз).
/// При равном `rank` сохраняется порядок вставки (стабильная сортировка).
pub fn draw_order(prizes: &[Prize]) -> Vec<&Prize> {
    let mut sorted: Vec<&Prize> = prizes.iter().collect();
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));
    sorted
}

/// Курсор по умолчанию – первый приз в порядке розыгрыша.
pub fn default_cursor(prizes: &[Prize]) -> Option<PrizeId> {
    draw_order(prizes).first().map(|p| p.id.clone())
}

/// Починить курсор: если он пуст или указывает на удалённый приз,
/// вернуть курсор по умолчанию. Без призов – `None`.
pub fn repair_cursor(prizes: &[Prize], cursor: Option<&PrizeId>) -> Option<PrizeId> {
    match cursor {
        Some(id) if prizes.iter().any(|p| &p.id == id) => Some(id.clone()),
        _ => default_cursor(prizes),
    }
}

/// Соседний приз в порядке розыгрыша. `None` на границе или при неизвестном курсоре.
pub fn step_cursor(prizes: &[Prize], cursor: &PrizeId, direction: CursorDirection) -> Option<PrizeId> {
    let order = draw_order(prizes);
    let idx = order.iter().position(|p| &p.id == cursor)?;

    let target = match direction {
        CursorDirection::Next => idx.checked_add(1)?,
        CursorDirection::Previous => idx.checked_sub(1)?,
    };

    order.get(target).map(|p| p.id.clone())
}
