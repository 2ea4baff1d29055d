//! Импорт участников и призов из табличных строк.
//!
//! Строка – упорядоченный набор `заголовок -> ячейка` (как отдаёт
//! конвертер листа Excel в JSON). Для каждого логического поля есть
//! упорядоченный список допустимых заголовков; берётся первая непустая ячейка.
//! Битые строки пропускаются, а не валят весь импорт.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{PLACEHOLDER_CATEGORY, PLACEHOLDER_PRIZE_NAME};

/// Одна строка таблицы: заголовок -> ячейка, порядок колонок сохранён.
pub type ImportRow = Map<String, Value>;

pub const NAME_HEADERS: &[&str] = &["姓名", "人名", "name", "Name"];
pub const DEPARTMENT_HEADERS: &[&str] = &["部门", "单位", "department", "dept"];
pub const CATEGORY_HEADERS: &[&str] = &["奖项", "奖项等级", "等级", "category"];
pub const PRIZE_NAME_HEADERS: &[&str] = &["奖品名称", "奖品", "name"];
pub const COUNT_HEADERS: &[&str] = &["数量", "名额", "count"];
pub const RANK_HEADERS: &[&str] = &["排序", "等级排序", "rank"];

/// Файл целиком не читается как таблица.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Файл не разобран: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Ожидался массив строк таблицы")]
    NotATable,
}

/// Участник из строки импорта, ещё без id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantRow {
    pub name: String,
    pub department: Option<String>,
}

/// Приз из строки импорта, ещё без id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrizeRow {
    /// Индекс строки в исходной таблице (нужен для rank по умолчанию).
    pub row_index: usize,
    pub category: String,
    pub name: String,
    pub count: u32,
    /// `None` – rank не задан, движок подставит значение по умолчанию.
    pub rank: Option<i64>,
}

/// Результат разбора: принятые строки + сколько пропущено.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportOutcome<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Разобрать JSON-массив строк. Элементы, не являющиеся объектами, пропускаются.
pub fn parse_rows(json: &str) -> Result<Vec<ImportRow>, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ImportError::NotATable),
    };

    let total = items.len();
    let rows: Vec<ImportRow> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    if rows.len() < total {
        warn!(skipped = total - rows.len(), "строки импорта не являются объектами");
    }
    Ok(rows)
}

/// Собрать строки из заголовка и записей (например, из CSV-листа).
/// Лишние ячейки отбрасываются, недостающие считаются пустыми.
pub fn rows_from_records(headers: &[String], records: &[Vec<String>]) -> Vec<ImportRow> {
    records
        .iter()
        .map(|record| {
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let cell = record.get(i).cloned().unwrap_or_default();
                    (h.clone(), Value::String(cell))
                })
                .collect()
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Первая непустая ячейка среди заголовков-синонимов.
fn lookup(row: &ImportRow, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| row.get(*alias))
        .map(cell_text)
        .find(|text| !text.trim().is_empty())
}

/// Количество: как `lookup`, но числовой 0 считается пустой ячейкой
/// (дальше пробуются другие заголовки, затем значение по умолчанию).
fn lookup_count(row: &ImportRow, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| row.get(*alias))
        .filter(|value| !matches!(value, Value::Number(n) if n.as_f64() == Some(0.0)))
        .map(cell_text)
        .find(|text| !text.trim().is_empty())
}

/// Целое из начала строки: "3", " 12 ", "5个" -> 5. Без цифр – `None`.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

fn clean_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "undefined" {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Строки -> участники. Имя ищется по синонимам, иначе берётся первая колонка.
/// Строки с пустым именем пропускаются.
pub fn resolve_participant_rows(rows: &[ImportRow]) -> ImportOutcome<ParticipantRow> {
    let mut accepted = Vec::new();
    let mut skipped = 0;

    for (idx, row) in rows.iter().enumerate() {
        let raw_name = lookup(row, NAME_HEADERS)
            .or_else(|| row.values().next().map(cell_text))
            .unwrap_or_default();
        let name = clean_name(&raw_name);

        if name.is_empty() {
            debug!(row = idx, "строка без имени пропущена");
            skipped += 1;
            continue;
        }

        let department = lookup(row, DEPARTMENT_HEADERS)
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        accepted.push(ParticipantRow { name, department });
    }

    info!(accepted = accepted.len(), skipped, "строки участников разобраны");
    ImportOutcome { rows: accepted, skipped }
}

/// Строки -> призы. Пустые категория/название заменяются заглушками,
/// количество по умолчанию 1 (числовой 0 тоже даёт 1). Строки с нечитаемым
/// или неположительным текстовым количеством пропускаются.
pub fn resolve_prize_rows(rows: &[ImportRow]) -> ImportOutcome<PrizeRow> {
    let mut accepted = Vec::new();
    let mut skipped = 0;

    for (idx, row) in rows.iter().enumerate() {
        let category = lookup(row, CATEGORY_HEADERS)
            .map(|c| c.trim().to_string())
            .unwrap_or_else(|| PLACEHOLDER_CATEGORY.to_string());

        let name = lookup(row, PRIZE_NAME_HEADERS)
            .map(|n| clean_name(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_PRIZE_NAME.to_string());

        let count = match lookup_count(row, COUNT_HEADERS) {
            None => Some(1),
            Some(text) => parse_leading_int(&text)
                .filter(|c| *c > 0)
                .and_then(|c| u32::try_from(c).ok()),
        };
        let Some(count) = count else {
            warn!(row = idx, "строка приза с некорректным количеством пропущена");
            skipped += 1;
            continue;
        };

        let rank = lookup(row, RANK_HEADERS).and_then(|r| parse_leading_int(&r));

        accepted.push(PrizeRow {
            row_index: idx,
            category,
            name,
            count,
            rank,
        });
    }

    info!(accepted = accepted.len(), skipped, "строки призов разобраны");
    ImportOutcome { rows: accepted, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_parsing() {
        assert_eq!(parse_leading_int("3"), Some(3));
        assert_eq!(parse_leading_int(" 12 "), Some(12));
        assert_eq!(parse_leading_int("5个"), Some(5));
        assert_eq!(parse_leading_int("-2"), Some(-2));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn numeric_zero_count_falls_back_to_default() {
        let rows: Vec<ImportRow> = serde_json::from_str(
            r#"[{"奖品": "A", "数量": 0}, {"奖品": "B", "数量": 0, "名额": 3}, {"奖品": "C", "数量": "0"}]"#,
        )
        .unwrap();
        let outcome = resolve_prize_rows(&rows);

        let counts: Vec<(&str, u32)> = outcome.rows.iter().map(|r| (r.name.as_str(), r.count)).collect();
        assert_eq!(counts, vec![("A", 1), ("B", 3)]);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn lookup_skips_blank_cells() {
        let row: ImportRow = serde_json::from_str(r#"{"姓名": "  ", "name": "Alice"}"#).unwrap();
        assert_eq!(lookup(&row, NAME_HEADERS), Some("Alice".to_string()));
    }
}
