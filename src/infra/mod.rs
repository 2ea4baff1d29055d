//! Инфраструктурный слой вокруг движка лотереи:
//! - генерация ID и часы;
//! - RNG-реализации для движка;
//! - адаптер хранения снапшота;
//! - импорт строк таблиц и экспорт отчёта.

pub mod clock;
pub mod export;
pub mod ids;
pub mod import;
pub mod persistence;
pub mod rng;

pub use clock::{FixedClock, SystemClock};
pub use export::{export_file_name, export_winners_csv, export_winners_csv_in, format_timestamp_in};
pub use ids::IdGenerator;
pub use import::{
    parse_rows, resolve_participant_rows, resolve_prize_rows, rows_from_records, ImportError, ImportOutcome,
    ImportRow, ParticipantRow, PrizeRow,
};
pub use persistence::{load_snapshot, persist, InMemoryLotteryStorage, JsonFileStorage, LotteryStorage, PersistenceError};
pub use rng::{DeterministicRng, SystemRng};
