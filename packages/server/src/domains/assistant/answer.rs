use std::cmp::Ordering;

use crate::common::format_amount;

use super::intent::{self, extract_money, extract_top_n, Intent};
use super::models::{Dataset, Invoice, InvoiceStatus, JobStatus, ProductionJob, StockItem};

const DEFAULT_TOP_N: u32 = 10;

/// A formatted reply plus the intent label used for logging.
///
/// `text == None` means the query matched nothing renderable; the HTTP
/// layer turns that into an "out of range" rejection.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: Option<String>,
    pub label: &'static str,
}

impl Answer {
    fn reply(text: String, label: &'static str) -> Self {
        Self {
            text: Some(text),
            label,
        }
    }

    fn none(label: &'static str) -> Self {
        Self { text: None, label }
    }
}

/// Render the reply for a classified query.
///
/// `today` is an ISO-8601 date string; due dates compare lexicographically
/// against it, which keeps this function clock-free and deterministic.
pub fn answer(intent: Intent, query: &str, data: &Dataset, today: &str) -> Answer {
    let q = query.trim().to_lowercase();

    match intent {
        Intent::Greeting => Answer::reply(greeting_help(), "greeting"),
        Intent::InvoicesUnpaidOrOverdue => unpaid_invoices(&q, data, today),
        Intent::OverdueByCustomer => overdue_by_customer(data, today),
        Intent::LowStock => low_stock(data),
        Intent::ProductionDelay => production_delays(data),
        Intent::WorkflowRule => workflow_rule(data),
        Intent::NoMatch => Answer::none("no_match"),
    }
}

fn greeting_help() -> String {
    [
        "Hello! I’m ERP AI (demo dataset mode).",
        "",
        "Try:",
        "- Show unpaid invoices > RM 10k",
        "- Who has overdue payments?",
        "- List low stock items below reorder point",
        "- Show production delays",
        "- Show approval workflow",
    ]
    .join("\n")
}

fn unpaid_invoices(q: &str, data: &Dataset, today: &str) -> Answer {
    let overdue_only = intent::is_overdue_query(q);
    let min = extract_money(q).unwrap_or(0.0);
    let top = extract_top_n(q).unwrap_or(DEFAULT_TOP_N) as usize;

    let mut invoices: Vec<&Invoice> = data
        .invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Unpaid)
        .filter(|i| !overdue_only || i.due_date.as_str() < today)
        .filter(|i| i.total >= min)
        .collect();

    if invoices.is_empty() {
        let qualifier = if overdue_only { "overdue " } else { "" };
        return Answer::reply(
            format!(
                "No {qualifier}unpaid invoices found above RM {}.",
                format_amount(min)
            ),
            "invoices_none",
        );
    }

    invoices.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    invoices.truncate(top);

    let title = if overdue_only {
        "Top overdue unpaid invoices"
    } else {
        "Top unpaid invoices"
    };
    let lines: Vec<String> = invoices
        .iter()
        .map(|i| {
            format!(
                "{} — {} — RM {} (due {})",
                i.no,
                i.customer,
                format_amount(i.total),
                i.due_date
            )
        })
        .collect();

    Answer::reply(
        format!(
            "{title} >= RM {}:\n{}",
            format_amount(min),
            lines.join("\n")
        ),
        "invoices_list",
    )
}

fn overdue_by_customer(data: &Dataset, today: &str) -> Answer {
    let overdue: Vec<&Invoice> = data
        .invoices
        .iter()
        .filter(|i| i.status == InvoiceStatus::Unpaid && i.due_date.as_str() < today)
        .collect();

    if overdue.is_empty() {
        return Answer::reply(
            "No overdue unpaid invoices found.".to_string(),
            "overdue_none",
        );
    }

    // Sum per customer; first-seen order keeps ties stable.
    let mut totals: Vec<(&str, f64)> = Vec::new();
    for inv in &overdue {
        match totals.iter_mut().find(|(c, _)| *c == inv.customer) {
            Some((_, sum)) => *sum += inv.total,
            None => totals.push((inv.customer.as_str(), inv.total)),
        }
    }
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let lines: Vec<String> = totals
        .iter()
        .map(|(customer, sum)| format!("{customer}: RM {}", format_amount(*sum)))
        .collect();

    Answer::reply(
        format!("Overdue customers (unpaid total):\n{}", lines.join("\n")),
        "overdue_customers",
    )
}

fn low_stock(data: &Dataset) -> Answer {
    let items: Vec<&StockItem> = data
        .stock_items
        .iter()
        .filter(|i| i.qty < i.reorder_point)
        .collect();

    if items.is_empty() {
        return Answer::reply("No items are below reorder point.".to_string(), "stock_none");
    }

    let lines: Vec<String> = items
        .iter()
        .map(|i| {
            // Suggest reordering back up to 2x the reorder point.
            let suggest = (2 * i.reorder_point).saturating_sub(i.qty);
            format!(
                "{} — {} | qty {} / rp {} | suggest reorder {}",
                i.sku, i.name, i.qty, i.reorder_point, suggest
            )
        })
        .collect();

    Answer::reply(
        format!("Low-stock items below reorder point:\n{}", lines.join("\n")),
        "stock_low",
    )
}

fn production_delays(data: &Dataset) -> Answer {
    let jobs: Vec<&ProductionJob> = data
        .production
        .iter()
        .filter(|j| j.status == JobStatus::Delayed)
        .collect();

    if jobs.is_empty() {
        return Answer::reply(
            "No production delays recorded.".to_string(),
            "production_none",
        );
    }

    let lines: Vec<String> = jobs
        .iter()
        .map(|j| format!("{} — {} (due {}) — {}", j.job, j.title, j.due_date, j.reason))
        .collect();

    Answer::reply(
        format!("Production delays:\n{}", lines.join("\n")),
        "production_delays",
    )
}

fn workflow_rule(data: &Dataset) -> Answer {
    match data.workflows.first() {
        Some(wf) if !wf.rule.is_empty() => {
            Answer::reply(format!("Workflow rule:\n- {}", wf.rule), "workflow_rule")
        }
        Some(_) => Answer::none("workflow_rule"),
        None => Answer::none("workflow_none"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::assistant::dataset::demo_dataset;
    use crate::domains::assistant::intent::classify;

    const TODAY: &str = "2025-11-25";

    fn run(query: &str) -> Answer {
        let data = demo_dataset();
        answer(classify(query), query, &data, TODAY)
    }

    #[test]
    fn greeting_lists_example_prompts() {
        let reply = run("hello");
        assert_eq!(reply.label, "greeting");
        let text = reply.text.unwrap();
        assert!(text.contains("Show unpaid invoices > RM 10k"));
        assert!(text.contains("Show approval workflow"));
    }

    #[test]
    fn unpaid_invoices_sorted_descending() {
        let reply = run("show unpaid invoices");
        assert_eq!(reply.label, "invoices_list");
        let text = reply.text.unwrap();

        let pos_27500 = text.find("27,500.00").unwrap();
        let pos_15800 = text.find("15,800.00").unwrap();
        let pos_9800 = text.find("9,800.00").unwrap();
        assert!(pos_27500 < pos_15800);
        assert!(pos_15800 < pos_9800);
        // Paid invoice excluded.
        assert!(!text.contains("INV-1002"));
    }

    #[test]
    fn overdue_filter_uses_due_date() {
        // Only INV-1003 (due 2025-11-15) is before TODAY.
        let reply = run("show overdue invoices");
        assert_eq!(reply.label, "invoices_list");
        let text = reply.text.unwrap();
        assert!(text.starts_with("Top overdue unpaid invoices"));
        assert!(text.contains("INV-1003"));
        assert!(!text.contains("INV-1001"));
        assert!(!text.contains("INV-1004"));
    }

    #[test]
    fn money_threshold_filters_invoices() {
        let reply = run("unpaid invoices above rm 20k");
        let text = reply.text.unwrap();
        assert!(text.contains(">= RM 20,000.00"));
        assert!(text.contains("INV-1003"));
        assert!(!text.contains("INV-1001"));
    }

    #[test]
    fn top_n_limits_results() {
        let reply = run("top 1 unpaid invoices");
        let text = reply.text.unwrap();
        assert!(text.contains("INV-1003"));
        assert!(!text.contains("INV-1001"));
        assert!(!text.contains("INV-1004"));
    }

    #[test]
    fn threshold_above_everything_gives_explanatory_message() {
        let reply = run("unpaid invoices above rm 99k");
        assert_eq!(reply.label, "invoices_none");
        assert_eq!(
            reply.text.unwrap(),
            "No unpaid invoices found above RM 99,000.00."
        );

        let reply = run("overdue invoices above rm 99k");
        assert_eq!(reply.label, "invoices_none");
        assert_eq!(
            reply.text.unwrap(),
            "No overdue unpaid invoices found above RM 99,000.00."
        );
    }

    #[test]
    fn overdue_customers_are_grouped_and_summed() {
        let mut data = demo_dataset();
        // Make INV-1001 overdue too so ABC Sdn Bhd has two overdue invoices.
        data.invoices[0].due_date = "2025-11-10".to_string();

        let reply = answer(
            Intent::OverdueByCustomer,
            "who is overdue",
            &data,
            TODAY,
        );
        assert_eq!(reply.label, "overdue_customers");
        let text = reply.text.unwrap();
        assert!(text.contains("ABC Sdn Bhd: RM 43,300.00"));
    }

    #[test]
    fn no_overdue_customers_message() {
        let reply = answer(
            Intent::OverdueByCustomer,
            "who is overdue",
            &demo_dataset(),
            "2025-01-01",
        );
        assert_eq!(reply.label, "overdue_none");
        assert_eq!(reply.text.unwrap(), "No overdue unpaid invoices found.");
    }

    #[test]
    fn low_stock_suggests_twice_reorder_point() {
        let reply = run("list low stock items");
        assert_eq!(reply.label, "stock_low");
        let text = reply.text.unwrap();
        // qty 1, rp 3 -> suggest 2*3 - 1 = 5
        assert!(text.contains("INK-CMYK — CMYK Ink Set | qty 1 / rp 3 | suggest reorder 5"));
        // qty 120, rp 200 -> suggest 280
        assert!(text.contains("PAPER-A4 — A4 Paper 80gsm | qty 120 / rp 200 | suggest reorder 280"));
    }

    #[test]
    fn no_low_stock_message() {
        let mut data = demo_dataset();
        for item in &mut data.stock_items {
            item.qty = item.reorder_point + 1;
        }
        let reply = answer(Intent::LowStock, "low stock", &data, TODAY);
        assert_eq!(reply.label, "stock_none");
        assert_eq!(reply.text.unwrap(), "No items are below reorder point.");
    }

    #[test]
    fn production_delays_render_reason() {
        let reply = run("show production delays");
        assert_eq!(reply.label, "production_delays");
        let text = reply.text.unwrap();
        assert!(text.contains("JOB-9001 — Brochure Print (due 2025-12-12) — Machine maintenance"));
        // On-track job excluded.
        assert!(!text.contains("JOB-9002"));
    }

    #[test]
    fn workflow_rule_renders_first_rule() {
        let reply = run("show approval workflow");
        assert_eq!(reply.label, "workflow_rule");
        assert_eq!(
            reply.text.unwrap(),
            "Workflow rule:\n- PO > RM 20,000 requires Finance approval then Director approval."
        );
    }

    #[test]
    fn missing_or_empty_workflow_rule_is_unanswerable() {
        let mut data = demo_dataset();
        data.workflows.clear();
        let reply = answer(Intent::WorkflowRule, "workflow", &data, TODAY);
        assert_eq!(reply.label, "workflow_none");
        assert!(reply.text.is_none());

        data.workflows.push(crate::domains::assistant::WorkflowRule {
            rule: String::new(),
        });
        let reply = answer(Intent::WorkflowRule, "workflow", &data, TODAY);
        assert!(reply.text.is_none());
    }

    #[test]
    fn no_match_yields_no_text() {
        let reply = run("weather forecast tomorrow");
        assert_eq!(reply.label, "no_match");
        assert!(reply.text.is_none());
    }
}
