//! HTML field extraction for product pages.
//!
//! Each field is described by an ordered list of rules. The first rule whose
//! selector matches the page wins; when no rule matches, the field keeps its
//! default (empty name, zero size, zero price). Only a matched field whose text
//! is not numeric is an error.

use crate::domain::model::Product;
use crate::utils::error::{Result, ShrinkError};
use scraper::{ElementRef, Html, Selector};

const DEFAULT_SIZE_UNIT: &str = "oz";
const CURRENCY_SYMBOLS: [char; 3] = ['$', '€', '£'];

/// Where the unit label of a size field comes from.
#[derive(Debug, Clone)]
enum UnitSource {
    Fixed(&'static str),
    /// Text of the next sibling `span` element.
    SiblingSpan,
}

#[derive(Debug, Clone)]
struct SizeRule {
    selector: Selector,
    unit: UnitSource,
}

pub struct Extractor {
    name_rule: Selector,
    size_rules: Vec<SizeRule>,
    price_rules: Vec<Selector>,
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ShrinkError::SelectorError {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name_rule: parse_selector("h1.product-name")?,
            size_rules: vec![
                SizeRule {
                    selector: parse_selector("span.product-weight")?,
                    unit: UnitSource::Fixed(DEFAULT_SIZE_UNIT),
                },
                SizeRule {
                    selector: parse_selector("span.product-size")?,
                    unit: UnitSource::SiblingSpan,
                },
                SizeRule {
                    selector: parse_selector("span.size")?,
                    unit: UnitSource::Fixed(DEFAULT_SIZE_UNIT),
                },
            ],
            price_rules: vec![
                parse_selector("span.product-sales-price")?,
                parse_selector("span.product-price")?,
                parse_selector("span.price")?,
            ],
        })
    }

    /// Parse `html` into a product for `url`.
    pub fn extract(&self, url: &str, html: &str) -> Result<Product> {
        let document = Html::parse_document(html);
        let mut product = Product::new(url);

        if let Some(name) = document.select(&self.name_rule).next() {
            product.name = element_text(name);
        }

        if let Some((text, units)) = self.find_size(&document) {
            product.size = parse_number("size", text.replace(units.as_str(), "").trim())?;
            product.units = units;
        } else {
            tracing::debug!("No size field on {}, defaulting to 0", url);
        }

        if let Some(text) = self.find_price(&document) {
            product.price = parse_number("price", text.trim_matches(&CURRENCY_SYMBOLS[..]).trim())?;
        } else {
            tracing::debug!("No price field on {}, defaulting to 0", url);
        }

        Ok(product)
    }

    fn find_size(&self, document: &Html) -> Option<(String, String)> {
        self.size_rules.iter().find_map(|rule| {
            let element = document.select(&rule.selector).next()?;
            let units = match rule.unit {
                UnitSource::Fixed(unit) => unit.to_string(),
                UnitSource::SiblingSpan => sibling_span(element)
                    .map(element_text)
                    .unwrap_or_default(),
            };
            Some((element_text(element), units))
        })
    }

    fn find_price(&self, document: &Html) -> Option<String> {
        self.price_rules
            .iter()
            .find_map(|selector| document.select(selector).next())
            .map(element_text)
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn sibling_span(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "span")
}

/// Sizes and prices are finite and non-negative; `NaN`, `inf` and `-1` all parse as f64.
fn parse_number(field: &str, text: &str) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ShrinkError::ParseError {
            field: field.to_string(),
            value: text.to_string(),
        }),
    }
}
