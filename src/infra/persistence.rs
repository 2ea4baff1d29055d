use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::engine::LotteryEngine;
use crate::state::LotterySnapshot;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Снапшот не разобран: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Абстракция хранилища снапшота.
///
/// Достаточно любого долговременного key-value: снапшот пишется целиком
/// после каждой команды и читается один раз при старте.
pub trait LotteryStorage {
    /// Загрузить снапшот. `None` – в хранилище ничего нет.
    fn load(&self) -> Result<Option<LotterySnapshot>, PersistenceError>;

    /// Сохранить снапшот целиком.
    fn save(&mut self, snapshot: &LotterySnapshot) -> Result<(), PersistenceError>;

    /// Удалить сохранённые данные.
    fn clear(&mut self) -> Result<(), PersistenceError>;
}

/// In-memory реализация для тестов. Хранит JSON, чтобы гонять тот же формат, что и файл.
#[derive(Debug, Default)]
pub struct InMemoryLotteryStorage {
    raw: Option<String>,
}

impl InMemoryLotteryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Хранилище с заранее положенным JSON (например, старым сохранением).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()) }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl LotteryStorage for InMemoryLotteryStorage {
    fn load(&self) -> Result<Option<LotterySnapshot>, PersistenceError> {
        match &self.raw {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &LotterySnapshot) -> Result<(), PersistenceError> {
        self.raw = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        self.raw = None;
        Ok(())
    }
}

/// Снапшот в JSON-файле.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LotteryStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<LotterySnapshot>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, snapshot: &LotterySnapshot) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string_pretty(snapshot)?;
        // Пишем во временный файл и переименовываем: обрыв записи не портит старый снапшот.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "снапшот сохранён");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Загрузка при старте: пустое/отсутствующее хранилище заполняется
/// демо-данными, если `seed_demo` включён.
pub fn load_snapshot(storage: &impl LotteryStorage, seed_demo: bool) -> Result<LotterySnapshot, PersistenceError> {
    let snapshot = storage.load()?.unwrap_or_default();

    if seed_demo && snapshot.is_blank() {
        info!("хранилище пустое, подставляем демо-данные");
        return Ok(snapshot.with_demo_data_if_blank());
    }
    Ok(snapshot)
}

/// Записать состояние движка после команды.
///
/// Полностью пустое состояние (после `reset_all`) не пишется, а стирает
/// сохранение. Если участники и призы удалены, но победители или пресеты
/// остались, снапшот пишется целиком.
pub fn persist(storage: &mut impl LotteryStorage, engine: &LotteryEngine) -> Result<(), PersistenceError> {
    let snapshot = engine.snapshot();
    if snapshot.is_empty() {
        return storage.clear();
    }
    storage.save(&snapshot)
}
