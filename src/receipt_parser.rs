// Parsing canonical receipt text into a structured record

use crate::confidence;
use crate::consts::{CURRENCY_SYMBOLS, PAYMENT_METHODS};
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// One line of the receipt that mentions a price.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptItem {
    pub description: String,
    pub price: f64,
    pub quantity: u32,
}

/// Structured receipt data extracted from a video.
///
/// Every field is populated; extraction failures degrade to the field's
/// default instead of being absent.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptData {
    pub merchant_name: String,
    pub total_amount: f64,
    pub currency: String,
    pub date: String,
    pub time: String,
    pub items: Vec<ReceiptItem>,
    pub tax_amount: f64,
    pub subtotal: f64,
    pub payment_method: String,
    pub receipt_number: String,
    pub confidence_score: f32,
    pub raw_text: String,
    pub extracted_at: DateTime<Local>,
}

static TOTAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"total[:\s]*[$€£₹¥]?(\d+\.?\d*)").unwrap(),
        Regex::new(r"[$€£₹¥](\d+\.?\d*)\s*total").unwrap(),
        Regex::new(r"amount[:\s]*[$€£₹¥]?(\d+\.?\d*)").unwrap(),
    ]
});

static TAX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"tax[:\s]*[$€£₹¥]?(\d+\.?\d*)").unwrap(),
        Regex::new(r"[$€£₹¥](\d+\.?\d*)\s*tax").unwrap(),
    ]
});

static SUBTOTAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"subtotal[:\s]*[$€£₹¥]?(\d+\.?\d*)").unwrap(),
        Regex::new(r"[$€£₹¥](\d+\.?\d*)\s*subtotal").unwrap(),
    ]
});

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})").unwrap(),
        Regex::new(r"(\d{4}[/-]\d{1,2}[/-]\d{1,2})").unwrap(),
    ]
});

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM)?)").unwrap());

static RECEIPT_NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"receipt[:\s]*#?(\d+)").unwrap(),
        Regex::new(r"ref[:\s]*#?(\d+)").unwrap(),
        Regex::new(r"number[:\s]*#?(\d+)").unwrap(),
    ]
});

/// Parse canonical text into a [`ReceiptData`] record.
///
/// Fields are extracted independently; a field that cannot be found takes
/// its documented default, never failing the record. Empty input yields no
/// record at all.
pub fn parse_receipt_text(text: &str) -> Option<ReceiptData> {
    if text.is_empty() {
        return None;
    }

    let lines: Vec<&str> = text.lines().collect();
    let lower = text.to_lowercase();
    let now = Local::now();

    Some(ReceiptData {
        merchant_name: extract_merchant_name(&lines)
            .unwrap_or_else(|| "Unknown Merchant".to_string()),
        total_amount: extract_amount(&TOTAL_PATTERNS, &lower).unwrap_or(0.0),
        currency: extract_currency(text).unwrap_or_else(|| "USD".to_string()),
        date: extract_date(text).unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
        time: extract_time(text).unwrap_or_else(|| now.format("%H:%M:%S").to_string()),
        items: extract_items(&lines),
        tax_amount: extract_amount(&TAX_PATTERNS, &lower).unwrap_or(0.0),
        subtotal: extract_amount(&SUBTOTAL_PATTERNS, &lower).unwrap_or(0.0),
        payment_method: extract_payment_method(&lower).unwrap_or_else(|| "Unknown".to_string()),
        receipt_number: extract_receipt_number(&lower).unwrap_or_else(|| "Unknown".to_string()),
        confidence_score: confidence::score_text(text),
        raw_text: text.to_string(),
        extracted_at: now,
    })
}

/// First of the top five lines that is non-empty and free of digits.
fn extract_merchant_name(lines: &[&str]) -> Option<String> {
    lines.iter().take(5).find_map(|line| {
        let line = line.trim();
        if !line.is_empty() && !line.chars().any(|c| c.is_ascii_digit()) {
            Some(line.to_string())
        } else {
            None
        }
    })
}

/// Try an ordered pattern list against lower-cased text, returning the
/// first capture that parses as a number.
fn extract_amount(patterns: &[Regex], lower: &str) -> Option<f64> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    })
}

fn extract_currency(text: &str) -> Option<String> {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(symbol, _)| text.contains(*symbol))
        .map(|(_, code)| code.to_string())
}

fn extract_date(text: &str) -> Option<String> {
    DATE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

fn extract_time(text: &str) -> Option<String> {
    TIME_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Every non-empty line mentioning a currency symbol becomes an item.
/// Per-line price parsing is not implemented; prices stay 0.0 with
/// quantity 1.
fn extract_items(lines: &[&str]) -> Vec<ReceiptItem> {
    lines
        .iter()
        .filter_map(|line| {
            let line = line.trim();
            let has_currency = line
                .chars()
                .any(|c| CURRENCY_SYMBOLS.iter().any(|&(symbol, _)| c == symbol));
            if !line.is_empty() && has_currency {
                Some(ReceiptItem {
                    description: line.to_string(),
                    price: 0.0,
                    quantity: 1,
                })
            } else {
                None
            }
        })
        .collect()
}

fn extract_payment_method(lower: &str) -> Option<String> {
    PAYMENT_METHODS
        .iter()
        .find(|method| lower.contains(*method))
        .map(|method| title_case(method))
}

fn extract_receipt_number(lower: &str) -> Option<String> {
    RECEIPT_NUMBER_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(lower)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
