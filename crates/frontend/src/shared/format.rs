//! Formatting of API values for tables and cards.

use chrono::{DateTime, NaiveDate};
use contracts::domain::catalog::{CellFormat, Column};
use serde_json::Value;

pub const EMPTY_CELL: &str = "-";

/// "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02", "2024-03-15" -> "15/03/2024".
/// Anything else is returned unchanged.
pub fn format_datetime(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    let date_part = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Groups thousands with spaces and keeps at most `decimals` digits.
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) if d.trim_end_matches('0').is_empty() => format!("{}{}", sign, grouped),
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Amounts are whole francs.
pub fn format_money(value: f64) -> String {
    format!("{} FCFA", format_number(value, 0))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_CELL.to_string(),
        Value::String(s) if s.trim().is_empty() => EMPTY_CELL.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "Oui".to_string(),
        Value::Bool(false) => "Non".to_string(),
        Value::Number(n) => n.to_string(),
        // populated references: show their name
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| EMPTY_CELL.to_string()),
        Value::Array(items) => items.len().to_string(),
    }
}

pub fn cell_text(row: &Value, column: &Column) -> String {
    let Some(value) = row.get(column.field) else {
        return EMPTY_CELL.to_string();
    };
    match column.format {
        CellFormat::Text => as_text(value),
        CellFormat::Money => as_number(value)
            .map(format_money)
            .unwrap_or_else(|| as_text(value)),
        CellFormat::Quantity => as_number(value)
            .map(|n| format_number(n, 2))
            .unwrap_or_else(|| as_text(value)),
        CellFormat::DateTime => match value.as_str() {
            Some(s) => format_datetime(s),
            None => as_text(value),
        },
    }
}

/// Identifier of a record (`_id` or `id`).
pub fn row_id(row: &Value) -> Option<String> {
    ["_id", "id"].iter().find_map(|key| match row.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a bare array or a `{ data: [...] }` envelope.
pub fn rows_from(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Numeric entries of a summary object as (label, value), sorted by label.
pub fn summary_cards(value: &Value) -> Vec<(String, String)> {
    let map = match value.get("data").filter(|d| d.is_object()).or(Some(value)) {
        Some(Value::Object(map)) => map,
        _ => return Vec::new(),
    };
    let mut cards: Vec<_> = map
        .iter()
        .filter_map(|(label, v)| as_number(v).map(|n| (label.clone(), format_number(n, 2))))
        .collect();
    cards.sort_by(|a, b| a.0.cmp(&b.0));
    cards
}
