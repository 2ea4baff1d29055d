use serde::{Deserialize, Serialize};

use crate::domain::PrizeId;

/// Заранее назначенные победители приза ("内定").
///
/// Очередь имён: при розыгрыше побеждает первое имя, которое ещё есть
/// среди допущенных участников. Сопоставление по имени, не по id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PresetWinner {
    pub prize_id: PrizeId,
    #[serde(default)]
    pub participant_names: Vec<String>,
}

impl PresetWinner {
    pub fn new(prize_id: impl Into<PrizeId>) -> Self {
        Self {
            prize_id: prize_id.into(),
            participant_names: Vec::new(),
        }
    }

    /// Добавить имя в конец очереди. Дубликаты игнорируются.
    ///
    /// Возвращает `true`, если имя добавлено.
    pub fn push_name(&mut self, name: &str) -> bool {
        if self.participant_names.iter().any(|n| n == name) {
            return false;
        }
        self.participant_names.push(name.to_string());
        true
    }

    pub fn remove_name(&mut self, name: &str) -> bool {
        let before = self.participant_names.len();
        self.participant_names.retain(|n| n != name);
        before != self.participant_names.len()
    }

    pub fn has_duplicates(&self) -> bool {
        self.participant_names
            .iter()
            .enumerate()
            .any(|(i, n)| self.participant_names[..i].contains(n))
    }
}
