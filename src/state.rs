use serde::{Deserialize, Serialize};

use crate::domain::defaults::{demo_participants, demo_prizes};
use crate::domain::{
    ActivityInfo, Participant, PresetWinner, Prize, Winner, DEFAULT_ACTIVITY_NAME, DEFAULT_COMPANY_NAME,
};

/// Ключ, под которым снапшот лежит в хранилище.
pub const STORAGE_KEY: &str = "lottery_data_v1";

/// Полный снапшот состояния, который пишется в хранилище после каждой команды.
///
/// Формат совместим со старыми сохранениями: любое отсутствующее поле
/// читается как пустая коллекция / строка по умолчанию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LotterySnapshot {
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
    pub winners: Vec<Winner>,
    pub presets: Vec<PresetWinner>,
    pub activity_name: String,
    pub company_name: String,
}

impl Default for LotterySnapshot {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            prizes: Vec::new(),
            winners: Vec::new(),
            presets: Vec::new(),
            activity_name: DEFAULT_ACTIVITY_NAME.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}

impl LotterySnapshot {
    /// Нет ни участников, ни призов – хост подставляет демо-данные.
    pub fn is_blank(&self) -> bool {
        self.participants.is_empty() && self.prizes.is_empty()
    }

    /// Совсем пусто: нет ни участников, ни призов, ни победителей, ни пресетов.
    /// Такое состояние оставляет только полный сброс.
    pub fn is_empty(&self) -> bool {
        self.is_blank() && self.winners.is_empty() && self.presets.is_empty()
    }

    /// Демо-набор: 20 участников, 5 призов.
    pub fn demo() -> Self {
        Self {
            participants: demo_participants(),
            prizes: demo_prizes(),
            ..Self::default()
        }
    }

    /// Если снапшот пуст (нет ни участников, ни призов), заполнить демо-данными.
    /// Победители, пресеты и названия сохраняются как есть.
    pub fn with_demo_data_if_blank(mut self) -> Self {
        if self.is_blank() {
            self.participants = demo_participants();
            self.prizes = demo_prizes();
        }
        self
    }

    /// Названия мероприятия; пустые строки заменяются значениями по умолчанию.
    pub fn activity_info(&self) -> ActivityInfo {
        let defaults = ActivityInfo::default();
        ActivityInfo {
            activity_name: non_empty_or(&self.activity_name, defaults.activity_name),
            company_name: non_empty_or(&self.company_name, defaults.company_name),
        }
    }
}

fn non_empty_or(value: &str, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value.to_string()
    }
}
