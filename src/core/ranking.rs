use crate::core::catalog::ProductCatalog;
use crate::domain::model::Product;
use crate::domain::ports::{Fetcher, Storage};

pub const DEFAULT_TOP_N: usize = 5;

/// Fetch every site in order. Pages that fail are logged and skipped.
pub async fn collect_products<F: Fetcher, S: Storage>(
    catalog: &ProductCatalog<F, S>,
    urls: &[String],
) -> Vec<Product> {
    let mut products = Vec::with_capacity(urls.len());
    for url in urls {
        match catalog.fetch_product(url).await {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!("⚠️ Skipping {} in ranking: {}", url, e),
        }
    }
    products
}

/// Cheapest first, then smallest.
pub fn rank_products(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.size.total_cmp(&b.size))
    });
    products
}

/// Numbered listing of at most `top_n` products. The header counts the entries shown.
pub fn render_ranking(products: &[Product], top_n: usize) -> String {
    let shown = &products[..products.len().min(top_n)];
    let mut lines = vec![format!("Top {} products based on price and weight:", shown.len())];
    lines.extend(
        shown
            .iter()
            .enumerate()
            .map(|(i, product)| format!("{}. {}", i + 1, product)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::ProductCache;
    use crate::core::test_support::{product_page, MockStorage, StubFetcher};

    fn product(name: &str, size: f64, price: f64) -> Product {
        Product {
            url: format!("https://example.com/{}", name),
            name: name.to_string(),
            size,
            price,
            units: "oz".to_string(),
        }
    }

    #[test]
    fn test_rank_by_price_then_size() {
        let ranked = rank_products(vec![
            product("c", 10.0, 3.0),
            product("b", 12.0, 2.0),
            product("a", 8.0, 2.0),
            product("d", 1.0, 5.0),
        ]);

        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_render_ranking_limits_entries() {
        let products: Vec<Product> = (1..=7)
            .map(|i| product(&format!("p{}", i), i as f64, 1.0))
            .collect();

        let listing = render_ranking(&products, DEFAULT_TOP_N);
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Top 5 products based on price and weight:");
        assert_eq!(lines[1], "1. p1 (1 oz) - $1");
        assert_eq!(lines[5], "5. p5 (5 oz) - $1");
    }

    #[test]
    fn test_render_ranking_header_counts_listed_products() {
        let products = vec![product("a", 8.0, 2.0), product("b", 12.0, 2.0)];

        let listing = render_ranking(&products, DEFAULT_TOP_N);

        assert_eq!(
            listing,
            "Top 2 products based on price and weight:\n1. a (8 oz) - $2\n2. b (12 oz) - $2"
        );
    }

    #[tokio::test]
    async fn test_collect_skips_failed_pages() {
        let fetcher = StubFetcher::new()
            .with_page("https://example.com/a", &product_page("16oz", "$4.00"))
            .with_page("https://example.com/c", &product_page("8oz", "$1.50"));
        let catalog =
            ProductCatalog::new(fetcher, ProductCache::new(MockStorage::new(), "cache.json")).unwrap();
        let urls = vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
            "https://example.com/c".to_string(),
        ];

        let products = collect_products(&catalog, &urls).await;

        assert_eq!(products.len(), 2);
        let ranked = rank_products(products);
        assert_eq!(ranked[0].url, "https://example.com/c");
        assert_eq!(ranked[1].url, "https://example.com/a");
    }
}
