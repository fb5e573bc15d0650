use video_receipt::confidence::score_text;
use video_receipt::receipt_parser::parse_receipt_text;
use video_receipt::text_merge::{TextObservation, merge_observations};

fn observation(text: &str, confidence: f32, timestamp: f64) -> TextObservation {
    TextObservation {
        frame_number: (timestamp * 30.0) as u64,
        timestamp,
        text: text.to_string(),
        confidence,
    }
}

#[test]
fn empty_text_scores_zero() {
    assert_eq!(score_text(""), 0.0);
}

#[test]
fn score_accumulates_per_feature() {
    // Length only
    assert_eq!(score_text("hello world!!"), 0.2);
    // Length + digit
    assert_eq!(score_text("hello world 42"), 0.5);
    // Digit + currency + separator, under the length threshold
    assert_eq!(score_text("$12.50"), 0.6);
}

#[test]
fn score_is_monotonic_and_clamped() {
    let bare = score_text("hello friend!");
    let with_digit = score_text("hello friend 7!");
    let with_currency = score_text("hello friend 7 $!");
    assert!(with_digit > bare);
    assert!(with_currency > with_digit);

    // All five conditions satisfied, sum exceeds 1.0 before clamping
    let full = score_text("Receipt total: $45.67 on 04/12/2024");
    assert_eq!(full, 1.0);
}

#[test]
fn receipt_vocabulary_matches_case_insensitively() {
    assert_eq!(score_text("SUBTOTAL"), 0.2);
}

#[test]
fn merge_orders_by_confidence_then_recency() {
    let observations = vec![
        observation("blurry noise", 0.3, 5.0),
        observation("Total: $5.00", 0.9, 1.0),
        observation("later reading", 0.3, 9.0),
    ];

    let merged = merge_observations(observations);
    assert_eq!(merged, "Total: $5.00\nlater reading\nblurry noise");
}

#[test]
fn merge_drops_duplicates_and_blank_text() {
    let observations = vec![
        observation("Total: $5.00", 0.9, 1.0),
        observation("  Total: $5.00  ", 0.8, 2.0),
        observation("   ", 0.5, 3.0),
        observation("Cash", 0.4, 4.0),
    ];

    let merged = merge_observations(observations);
    assert_eq!(merged, "Total: $5.00\nCash");

    // No line appears twice
    let lines: Vec<&str> = merged.lines().collect();
    let mut unique = lines.clone();
    unique.dedup();
    assert_eq!(lines, unique);
}

#[test]
fn merge_is_idempotent_on_canonical_text() {
    let observations = vec![
        observation("STORE X", 0.9, 3.0),
        observation("Total: $12.00", 0.9, 2.0),
        observation("Cash", 0.9, 1.0),
    ];
    let canonical = merge_observations(observations);

    let replay: Vec<TextObservation> = canonical
        .lines()
        .enumerate()
        .map(|(i, line)| observation(line, 0.9, (10 - i) as f64))
        .collect();

    assert_eq!(merge_observations(replay), canonical);
}

#[test]
fn merge_of_nothing_is_empty() {
    assert_eq!(merge_observations(Vec::new()), "");
}

#[test]
fn empty_text_yields_no_record() {
    assert!(parse_receipt_text("").is_none());
}

#[test]
fn total_amount_extraction() {
    let receipt = parse_receipt_text("Total: $45.67").unwrap();
    assert_eq!(receipt.total_amount, 45.67);
    assert_eq!(receipt.currency, "USD");

    let no_total = parse_receipt_text("just some words").unwrap();
    assert_eq!(no_total.total_amount, 0.0);
}

#[test]
fn currency_symbol_maps_to_iso_code() {
    let euro = parse_receipt_text("Gesamt €30.00 total").unwrap();
    assert_eq!(euro.currency, "EUR");

    let none = parse_receipt_text("no symbols here").unwrap();
    assert_eq!(none.currency, "USD");
}

#[test]
fn date_extraction_prefers_first_match() {
    let receipt = parse_receipt_text("Receipt 04/12/2024 items and more").unwrap();
    assert_eq!(receipt.date, "04/12/2024");

    let dateless = parse_receipt_text("no date anywhere").unwrap();
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    assert_eq!(dateless.date, today);
}

#[test]
fn receipt_number_extraction() {
    let receipt = parse_receipt_text("Receipt #12345\nThanks!").unwrap();
    assert_eq!(receipt.receipt_number, "12345");

    let missing = parse_receipt_text("Thanks for shopping").unwrap();
    assert_eq!(missing.receipt_number, "Unknown");
}

#[test]
fn merchant_name_skips_lines_with_digits() {
    let receipt = parse_receipt_text("123 Main St\nCORNER SHOP\nTotal: $3.00").unwrap();
    assert_eq!(receipt.merchant_name, "CORNER SHOP");

    let all_numeric = parse_receipt_text("123 456\n789").unwrap();
    assert_eq!(all_numeric.merchant_name, "Unknown Merchant");
}

#[test]
fn payment_method_priority_order() {
    let receipt = parse_receipt_text("paid with debit card").unwrap();
    assert_eq!(receipt.payment_method, "Debit");
}

#[test]
fn full_receipt_block_extraction() {
    let text = "STORE X\nTotal: $12.00\nTax: $1.00\n04/12/2024 10:30 AM\nCash";
    let receipt = parse_receipt_text(text).unwrap();

    assert_eq!(receipt.merchant_name, "STORE X");
    assert_eq!(receipt.total_amount, 12.00);
    assert_eq!(receipt.tax_amount, 1.00);
    assert_eq!(receipt.subtotal, 0.0);
    assert_eq!(receipt.date, "04/12/2024");
    assert_eq!(receipt.time, "10:30 AM");
    assert_eq!(receipt.payment_method, "Cash");
    assert_eq!(receipt.raw_text, text);

    // Lines mentioning a currency symbol become items, price parsing is
    // a documented limitation
    assert_eq!(receipt.items.len(), 2);
    assert_eq!(receipt.items[0].description, "Total: $12.00");
    assert_eq!(receipt.items[0].price, 0.0);
    assert_eq!(receipt.items[0].quantity, 1);

    assert_eq!(receipt.confidence_score, 1.0);
}
