use serde::{Deserialize, Serialize};

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub no: String,
    pub customer: String,
    pub status: InvoiceStatus,
    pub total: f64,
    /// ISO-8601 date string; compared lexicographically against "today".
    pub due_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    pub sku: String,
    pub name: String,
    pub qty: u32,
    pub reorder_point: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    OnTrack,
    Delayed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionJob {
    pub job: String,
    pub title: String,
    pub status: JobStatus,
    pub due_date: String,
    /// Empty for jobs that are on track.
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRule {
    pub rule: String,
}

/// One immutable snapshot of the ERP data. Field names match the
/// file-backed JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub invoices: Vec<Invoice>,
    pub stock_items: Vec<StockItem>,
    pub production: Vec<ProductionJob>,
    pub workflows: Vec<WorkflowRule>,
}
