//! Отчёт о победителях в CSV (UTF-8 с BOM, чтобы Excel открыл кириллицу/иероглифы).

use std::fmt::Display;

use chrono::{Local, NaiveDate, TimeZone};

use crate::domain::{TimestampMs, Winner};

pub const UTF8_BOM: &str = "\u{feff}";

/// Заголовок: уровень, приз, победитель, отдел, время.
pub const CSV_HEADER: &str = "奖项等级,奖品名称,中奖人,部门,中奖时间";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// CSV по всем победителям, время в локальной зоне.
pub fn export_winners_csv(winners: &[Winner]) -> String {
    export_winners_csv_in(winners, &Local)
}

/// CSV по всем победителям, время в заданной зоне.
pub fn export_winners_csv_in<Tz>(winners: &[Winner], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::with_capacity(64 * (winners.len() + 1));
    out.push_str(UTF8_BOM);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for w in winners {
        let fields = [
            escape_field(&w.prize_category),
            escape_field(&w.prize_name),
            escape_field(&w.participant_name),
            escape_field(w.participant_department.as_deref().unwrap_or("")),
            escape_field(&format_timestamp_in(w.timestamp, tz)),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Метка времени победителя в виде `2024/01/31 19:05:00`.
pub fn format_timestamp_in<Tz>(ms: TimestampMs, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => ms.to_string(),
    }
}

/// Имя файла отчёта за дату.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("年会中奖名单_{}.csv", date.format("%Y-%m-%d"))
}

/// Кавычки – только если поле содержит разделитель, кавычку или перевод строки.
fn escape_field(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
