//! Внешний API движка лотереи.
//!
//! Здесь описываются:
//! - команды (commands.rs): всё, что меняет состояние;
//! - запросы (queries.rs): только чтение;
//! - DTO (dto.rs): удобные структуры для слоя представления;
//! - ошибки (errors.rs): то, что видит оператор.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
