use lazy_static::lazy_static;
use regex::Regex;

/// The classified category of a user query. Drives which answer branch
/// runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    InvoicesUnpaidOrOverdue,
    OverdueByCustomer,
    LowStock,
    ProductionDelay,
    WorkflowRule,
    NoMatch,
}

const GREETING_TOKENS: &[&str] = &["hi", "hello", "hey", "hai", "hye", "assalamualaikum", "help"];
const INVOICE_TOKENS: &[&str] = &["invoice", "invoices", "bill", "bills"];
const UNPAID_TOKENS: &[&str] = &["unpaid", "outstanding", "not paid", "pending"];
const OVERDUE_TOKENS: &[&str] = &["overdue", "past due", "late payment", "late"];
const LOW_STOCK_TOKENS: &[&str] = &[
    "low stock",
    "low-stock",
    "reorder point",
    "reorder",
    "below reorder",
];
const DELAY_TOKENS: &[&str] = &[
    "production delay",
    "production delays",
    "delayed job",
    "delayed jobs",
    "production delayed",
    "delay",
];
const WORKFLOW_TOKENS: &[&str] = &["approval", "approval flow", "workflow", "rule"];

fn has_any(q: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| q.contains(n))
}

pub(crate) fn is_invoice_query(q: &str) -> bool {
    has_any(q, INVOICE_TOKENS)
}

pub(crate) fn is_overdue_query(q: &str) -> bool {
    has_any(q, OVERDUE_TOKENS)
}

fn is_unpaid_query(q: &str) -> bool {
    has_any(q, UNPAID_TOKENS)
}

/// Classify a free-text query into an [`Intent`].
///
/// Ordered decision list over case-insensitive substring containment;
/// first match wins. Greeting goes first so help requests short-circuit
/// everything else, and the invoice+status combo is checked before the
/// overdue-only fallback so "show overdue invoices" takes the invoice
/// path rather than the per-customer aggregation.
pub fn classify(query: &str) -> Intent {
    let q = query.trim().to_lowercase();

    if has_any(&q, GREETING_TOKENS) {
        return Intent::Greeting;
    }
    if is_invoice_query(&q) && (is_unpaid_query(&q) || is_overdue_query(&q)) {
        return Intent::InvoicesUnpaidOrOverdue;
    }
    if is_overdue_query(&q) && !is_invoice_query(&q) {
        return Intent::OverdueByCustomer;
    }
    if has_any(&q, LOW_STOCK_TOKENS) {
        return Intent::LowStock;
    }
    if has_any(&q, DELAY_TOKENS) {
        return Intent::ProductionDelay;
    }
    if has_any(&q, WORKFLOW_TOKENS) {
        return Intent::WorkflowRule;
    }

    Intent::NoMatch
}

lazy_static! {
    // "rm 10k" / "rm10k" / "rm 20000"
    static ref MONEY_REGEX: Regex = Regex::new(
        r"rm\s*([\d.]+)\s*(k)?"
    ).unwrap();

    // Fallback: any standalone run of 4+ digits (e.g. "10000")
    static ref BIG_NUMBER_REGEX: Regex = Regex::new(
        r"\b(\d{4,})\b"
    ).unwrap();

    // "top 5", "top10"
    static ref TOP_N_REGEX: Regex = Regex::new(
        r"top\s*(\d{1,3})"
    ).unwrap();
}

/// Extract a monetary threshold from a lowercased query.
///
/// An "rm" amount wins; a trailing "k" multiplies by 1000. Without an "rm"
/// amount, the first standalone 4+ digit number is used.
pub fn extract_money(q: &str) -> Option<f64> {
    if let Some(caps) = MONEY_REGEX.captures(q) {
        if let Ok(num) = caps[1].parse::<f64>() {
            let thousands = caps.get(2).is_some();
            return Some(if thousands { num * 1000.0 } else { num });
        }
    }

    if let Some(caps) = BIG_NUMBER_REGEX.captures(q) {
        if let Ok(num) = caps[1].parse::<f64>() {
            return Some(num);
        }
    }

    None
}

/// Extract a "top N" limit from a lowercased query. Only values in
/// [1, 100] are accepted.
pub fn extract_top_n(q: &str) -> Option<u32> {
    let caps = TOP_N_REGEX.captures(q)?;
    let n: u32 = caps[1].parse().ok()?;
    if (1..=100).contains(&n) {
        Some(n)
    } else {
        None
    }
}
