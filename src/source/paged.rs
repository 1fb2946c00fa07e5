use log::debug;
use serde_json::json;

use crate::core::record::Record;
use crate::error::ExportError;

use super::{FetchParams, RecordFetcher};

/// Adapter that drains a page-numbered resource through an inner fetcher.
///
/// Each call adds `page` and `per_page` to the caller's params and keeps
/// requesting successive pages until one comes back short, concatenating the
/// batches. The orchestrator stays pagination-agnostic; it sees one resolved
/// record sequence.
pub struct PagedFetcher<F> {
    inner: F,
    page_size: usize,
}

impl<F> PagedFetcher<F> {
    pub fn new(inner: F, page_size: usize) -> PagedFetcher<F> {
        PagedFetcher {
            inner,
            page_size: page_size.max(1),
        }
    }
}

impl<F: RecordFetcher> RecordFetcher for PagedFetcher<F> {
    async fn fetch(&self, params: &FetchParams) -> Result<Vec<Record>, ExportError> {
        let mut records = Vec::new();
        let mut page: u64 = 1;

        loop {
            let mut page_params = params.clone();
            page_params.insert("page".to_string(), json!(page));
            page_params.insert("per_page".to_string(), json!(self.page_size));

            let batch = self.inner.fetch(&page_params).await?;
            let batch_len = batch.len();
            records.extend(batch);

            debug!("Fetched page {}: {} records", page, batch_len);

            if batch_len < self.page_size {
                return Ok(records);
            }

            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use crate::core::record::{FieldValue, Record};
    use crate::error::ExportError;
    use crate::source::{FetchParams, RecordFetcher};

    use super::PagedFetcher;

    struct PageSource {
        pages: RefCell<Vec<Vec<Record>>>,
        seen_params: RefCell<Vec<FetchParams>>,
    }

    impl PageSource {
        fn new(pages: Vec<Vec<Record>>) -> PageSource {
            PageSource {
                pages: RefCell::new(pages),
                seen_params: RefCell::new(Vec::new()),
            }
        }
    }

    impl RecordFetcher for PageSource {
        async fn fetch(&self, params: &FetchParams) -> Result<Vec<Record>, ExportError> {
            self.seen_params.borrow_mut().push(params.clone());
            let mut pages = self.pages.borrow_mut();
            if pages.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(pages.remove(0))
            }
        }
    }

    fn record(id: i64) -> Record {
        let mut record = Record::new();
        record.insert("id".to_string(), FieldValue::Int(id));
        record
    }

    #[tokio::test]
    async fn drains_pages_until_a_short_one() {
        let source = PageSource::new(vec![
            vec![record(1), record(2)],
            vec![record(3), record(4)],
            vec![record(5)],
        ]);
        let fetcher = PagedFetcher::new(source, 2);

        let records = fetcher.fetch(&FetchParams::new()).await.expect("fetch");

        assert_eq!(records.len(), 5);
        assert_eq!(records[4].get("id"), Some(&FieldValue::Int(5)));

        let seen = fetcher.inner.seen_params.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].get("page"), Some(&json!(1)));
        assert_eq!(seen[2].get("page"), Some(&json!(3)));
        assert_eq!(seen[0].get("per_page"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn short_first_page_stops_after_one_request() {
        let source = PageSource::new(vec![vec![record(1)]]);
        let fetcher = PagedFetcher::new(source, 10);

        let records = fetcher.fetch(&FetchParams::new()).await.expect("fetch");

        assert_eq!(records.len(), 1);
        assert_eq!(fetcher.inner.seen_params.borrow().len(), 1);
    }

    #[tokio::test]
    async fn caller_params_are_preserved_on_every_page() {
        let source = PageSource::new(vec![vec![record(1), record(2)], vec![]]);
        let fetcher = PagedFetcher::new(source, 2);

        let mut params = FetchParams::new();
        params.insert("status".to_string(), json!("active"));

        fetcher.fetch(&params).await.expect("fetch");

        let seen = fetcher.inner.seen_params.borrow();
        assert!(seen.iter().all(|p| p.get("status") == Some(&json!("active"))));
    }

    #[tokio::test]
    async fn inner_failure_propagates() {
        struct FailingSource;

        impl RecordFetcher for FailingSource {
            async fn fetch(&self, _params: &FetchParams) -> Result<Vec<Record>, ExportError> {
                Err(ExportError::Fetch("boom".to_string()))
            }
        }

        let fetcher = PagedFetcher::new(FailingSource, 2);

        assert!(fetcher.fetch(&FetchParams::new()).await.is_err());
    }
}
