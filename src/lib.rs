//! Движок лотереи для церемонии розыгрыша призов.
//!
//! Оператор настраивает список участников и призы по уровням, затем
//! разыгрывает их по одному месту или сериями. Здесь – только состояние
//! и его инварианты; отрисовка, анимации и разбор файлов живут снаружи.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod state;

pub use api::{apply_command, execute_query, ApiError, Command, CommandResponse, Query, QueryResponse};
pub use config::LotteryConfig;
pub use engine::{LotteryEngine, LotteryError};
pub use state::LotterySnapshot;
