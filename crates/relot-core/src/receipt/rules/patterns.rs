//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Line cleanup: OCR border junk at the start, pipe artifacts at the end
    pub static ref LEADING_JUNK: Regex = Regex::new(
        r"^[|=\-*#@$%,\s]+"
    ).unwrap();

    pub static ref TRAILING_PIPES: Regex = Regex::new(
        r"[\s|]+$"
    ).unwrap();

    // Address signals
    pub static ref SHIP_TO: Regex = Regex::new(
        r"(?i)\bship(?:ping)?\s+to\b"
    ).unwrap();

    pub static ref ZIP_CODE: Regex = Regex::new(
        r"\b\d{5}(?:-\d{4})?\b"
    ).unwrap();

    // "John Smith - CA" style recipient lines
    pub static ref NAME_DASH_REGION: Regex = Regex::new(
        r"[A-Z][a-z]+\s+[A-Z][a-z]+\s*[-\u{2013}\u{2014}]\s*[A-Z]{2}\b"
    ).unwrap();

    // Seller / fulfillment attribution
    pub static ref SELLER_ATTRIBUTION: Regex = Regex::new(
        r"(?i)\b(?:sold|fulfilled|shipped|dispatched)\s+(?:by|from)\b"
    ).unwrap();

    // Order numbers, dates, tracking, delivery, returns
    pub static ref ORDER_METADATA: Regex = Regex::new(
        r"(?i)\b(?:order\s*(?:#|no\.?|number|id|placed|date|total|summary)|tracking|deliver(?:y|ed)|arriv(?:es|ing|ed)|return\s+(?:by|window|policy|eligible|started)|refund(?:ed)?|invoice)\b"
    ).unwrap();

    // Per-unit price breakdown ("2 @ $24.99")
    pub static ref UNIT_PRICE_BREAKDOWN: Regex = Regex::new(
        r"\d+\s*@\s*\$?\d"
    ).unwrap();

    // Discount lines ("20% off", "Save 15%", "-30%")
    pub static ref DISCOUNT: Regex = Regex::new(
        r"(?i)\d+(?:\.\d+)?\s*%\s*off|\bsave\s+\d+(?:\.\d+)?\s*%|-\s*\d+(?:\.\d+)?\s*%|\bdiscount\b|\bcoupon\b|\bpromo\b"
    ).unwrap();

    // Attribute label lines ("Color: Black", "Condition: New", "Qty: 2")
    pub static ref ATTRIBUTE_LABEL: Regex = Regex::new(
        r"(?i)^\s*(?:condition|colou?r|size|gender|style|material|brand|qty|quantity|item\s*(?:no\.?|#))\s*[:=]"
    ).unwrap();

    // Lines that open with a calendar date
    pub static ref LEADING_DATE: Regex = Regex::new(
        r"(?i)^(?:\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2})"
    ).unwrap();

    // Capitalization shape signals
    pub static ref TITLE_CASE_START: Regex = Regex::new(
        r"^[A-Z][a-z]"
    ).unwrap();

    pub static ref CAPITALIZED_WORD: Regex = Regex::new(
        r"^[A-Z][a-z]{2,}"
    ).unwrap();

    // Size qualifier in parentheses: "(M)", "(XL)", "(Large)"
    pub static ref SIZE_PARENTHETICAL: Regex = Regex::new(
        r"\((?:XS|S|M|L|XL|XXL)\)|(?i:\((?:x-?small|small|medium|large|x-?large|extra\s+(?:small|large))\))"
    ).unwrap();

    // Price patterns, decimal comma or dot
    pub static ref PRICE_DOLLAR: Regex = Regex::new(
        r"\$\s*(\d+[.,]\d{2})\b"
    ).unwrap();

    pub static ref PRICE_USD: Regex = Regex::new(
        r"(?i)\bUSD\s*\$?\s*(\d+[.,]\d{2})\b"
    ).unwrap();

    pub static ref PRICE_TOTAL: Regex = Regex::new(
        r"(?i)\btotal\s*:?\s*\$?\s*(\d+[.,]\d{2})\b"
    ).unwrap();

    // Quantity patterns
    pub static ref QTY_LABEL: Regex = Regex::new(
        r"(?i)\bqty\.?\s*[:=]?\s*(\d+)\b"
    ).unwrap();

    pub static ref QUANTITY_LABEL: Regex = Regex::new(
        r"(?i)\bquantity\s*[:=]?\s*(\d+)\b"
    ).unwrap();

    pub static ref QTY_AT_PRICE: Regex = Regex::new(
        r"\b(\d+)\s*@\s*\$"
    ).unwrap();
}
