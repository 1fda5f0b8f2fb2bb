use std::path::PathBuf;

use thiserror::Error;

use super::models::{
    Dataset, Invoice, InvoiceStatus, JobStatus, ProductionJob, StockItem, WorkflowRule,
};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the assistant's dataset comes from.
///
/// `Demo` is the compiled-in fixture. `File` re-reads the JSON on every
/// snapshot, so edits to the file show up without a restart.
#[derive(Debug, Clone)]
pub enum DatasetProvider {
    Demo,
    File(PathBuf),
}

impl DatasetProvider {
    pub fn snapshot(&self) -> Result<Dataset, DatasetError> {
        match self {
            DatasetProvider::Demo => Ok(demo_dataset()),
            DatasetProvider::File(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// The built-in demo dataset.
pub fn demo_dataset() -> Dataset {
    Dataset {
        invoices: vec![
            Invoice {
                no: "INV-1001".to_string(),
                customer: "ABC Sdn Bhd".to_string(),
                status: InvoiceStatus::Unpaid,
                total: 15800.0,
                due_date: "2025-12-01".to_string(),
            },
            Invoice {
                no: "INV-1002".to_string(),
                customer: "XYZ Enterprise".to_string(),
                status: InvoiceStatus::Paid,
                total: 5200.0,
                due_date: "2025-11-20".to_string(),
            },
            Invoice {
                no: "INV-1003".to_string(),
                customer: "ABC Sdn Bhd".to_string(),
                status: InvoiceStatus::Unpaid,
                total: 27500.0,
                due_date: "2025-11-15".to_string(),
            },
            Invoice {
                no: "INV-1004".to_string(),
                customer: "Naxxy Trading".to_string(),
                status: InvoiceStatus::Unpaid,
                total: 9800.0,
                due_date: "2025-12-10".to_string(),
            },
        ],
        stock_items: vec![
            StockItem {
                sku: "PAPER-A4".to_string(),
                name: "A4 Paper 80gsm".to_string(),
                qty: 120,
                reorder_point: 200,
            },
            StockItem {
                sku: "INK-CMYK".to_string(),
                name: "CMYK Ink Set".to_string(),
                qty: 1,
                reorder_point: 3,
            },
            StockItem {
                sku: "GLUE-01".to_string(),
                name: "Binding Glue".to_string(),
                qty: 10,
                reorder_point: 20,
            },
        ],
        production: vec![
            ProductionJob {
                job: "JOB-9001".to_string(),
                title: "Brochure Print".to_string(),
                status: JobStatus::Delayed,
                due_date: "2025-12-12".to_string(),
                reason: "Machine maintenance".to_string(),
            },
            ProductionJob {
                job: "JOB-9002".to_string(),
                title: "Packaging Box".to_string(),
                status: JobStatus::OnTrack,
                due_date: "2025-12-18".to_string(),
                reason: String::new(),
            },
        ],
        workflows: vec![WorkflowRule {
            rule: "PO > RM 20,000 requires Finance approval then Director approval.".to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_dataset_matches_fixture() {
        let data = demo_dataset();
        assert_eq!(data.invoices.len(), 4);
        assert_eq!(data.stock_items.len(), 3);
        assert_eq!(data.production.len(), 2);
        assert_eq!(data.workflows.len(), 1);

        let inv = &data.invoices[2];
        assert_eq!(inv.no, "INV-1003");
        assert_eq!(inv.status, InvoiceStatus::Unpaid);
        assert_eq!(inv.total, 27500.0);
    }

    #[test]
    fn file_provider_reports_missing_file() {
        let provider = DatasetProvider::File(PathBuf::from("/nonexistent/dataset.json"));
        let err = provider.snapshot().unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn dataset_round_trips_through_json() {
        let json = serde_json::to_string(&demo_dataset()).unwrap();
        let parsed: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.invoices[1].status, InvoiceStatus::Paid);
        assert_eq!(parsed.production[0].status, JobStatus::Delayed);
    }

    #[test]
    fn parse_error_on_invalid_json() {
        let dir = std::env::temp_dir().join("erp-ai-try-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let provider = DatasetProvider::File(path);
        let err = provider.snapshot().unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }
}
