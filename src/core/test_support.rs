use crate::domain::ports::{Fetcher, Storage};
use crate::utils::error::{Result, ShrinkError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned()
    }
}

impl Storage for MockStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            ShrinkError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

/// Serves canned pages and counts every call.
#[derive(Clone, Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ShrinkError::network(url, "HTTP 404 Not Found"))
    }
}

pub fn product_page(size: &str, price: &str) -> String {
    format!(
        r#"<html><body>
            <h1 class="product-name">Test Product</h1>
            <span class="product-weight">{}</span>
            <span class="product-price">{}</span>
        </body></html>"#,
        size, price
    )
}
