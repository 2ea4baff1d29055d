use std::path::PathBuf;

use tracing::warn;

use crate::domain::{ActivityInfo, DEFAULT_ACTIVITY_NAME, DEFAULT_COMPANY_NAME};
use crate::state::STORAGE_KEY;

/// Конфигурация хоста лотереи, читается из переменных окружения.
///
/// | Env Var                  | Default                 |
/// |--------------------------|-------------------------|
/// | `LOTTERY_ACTIVITY_NAME`  | `年度盛典`               |
/// | `LOTTERY_COMPANY_NAME`   | `科技未来有限公司`        |
/// | `LOTTERY_STORAGE_PATH`   | `lottery_data_v1.json`  |
/// | `LOTTERY_RNG_SEED`       | не задан (системный RNG) |
/// | `LOTTERY_SEED_DEMO_DATA` | `true`                  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryConfig {
    /// Названия по умолчанию для нового (пустого) хранилища.
    pub activity: ActivityInfo,
    pub storage_path: PathBuf,
    /// Seed детерминированного RNG (реплей/репетиция).
    pub rng_seed: Option<u64>,
    /// Подставлять демо-данные, если хранилище пустое.
    pub seed_demo_data: bool,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            activity: ActivityInfo::default(),
            storage_path: PathBuf::from(format!("{}.json", STORAGE_KEY)),
            rng_seed: None,
            seed_demo_data: true,
        }
    }
}

impl LotteryConfig {
    /// Загрузить конфиг из окружения. Нечитаемые значения заменяются
    /// значениями по умолчанию с предупреждением в лог.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// То же, что `from_env`, но с произвольным источником переменных (для тестов).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let activity_name = lookup("LOTTERY_ACTIVITY_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ACTIVITY_NAME.into());

        let company_name = lookup("LOTTERY_COMPANY_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPANY_NAME.into());

        let storage_path = lookup("LOTTERY_STORAGE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let rng_seed = lookup("LOTTERY_RNG_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!(value = %raw, "LOTTERY_RNG_SEED не число, используем системный RNG");
                None
            }
        });

        let seed_demo_data = match lookup("LOTTERY_SEED_DEMO_DATA") {
            None => defaults.seed_demo_data,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    warn!(value = %raw, "LOTTERY_SEED_DEMO_DATA не bool, оставляем true");
                    defaults.seed_demo_data
                }
            },
        };

        Self {
            activity: ActivityInfo {
                activity_name,
                company_name,
            },
            storage_path,
            rng_seed,
            seed_demo_data,
        }
    }
}
