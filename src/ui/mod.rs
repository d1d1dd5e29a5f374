//! Server-side rendering of the converter page.

use askama::Template;
use urlencoding::encode;

use crate::{
    data::types::CurrencyDescriptor,
    loader::{CurrencyPair, PageViewModel},
};

/// Stand-in for any name or symbol the data does not provide.
pub const MISSING: &str = "undefined";

/// Which picker a navigation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairField {
    Source,
    Target,
}

impl PairField {
    pub fn query_key(self) -> &'static str {
        match self {
            Self::Source => "id",
            Self::Target => "convertId",
        }
    }
}

/// URL the browser loads when `field` is changed to `value`; the other id is kept.
pub fn navigation_href(pair: &CurrencyPair, field: PairField, value: &str) -> String {
    let (source, target) = match field {
        PairField::Source => (value, pair.target_id.as_str()),
        PairField::Target => (pair.source_id.as_str(), value),
    };
    format!(
        "/?{}={}&{}={}",
        PairField::Source.query_key(),
        encode(source),
        PairField::Target.query_key(),
        encode(target)
    )
}

/// `"{name} ({symbol})"`, with `undefined` for whatever is missing.
pub fn currency_label(name: Option<&str>, symbol: Option<&str>) -> String {
    format!(
        "{} ({})",
        name.unwrap_or(MISSING),
        symbol.unwrap_or(MISSING)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub href: String,
}

#[derive(Debug, Clone, Template)]
#[template(path = "index.html")]
pub struct ConverterView {
    pub pair: CurrencyPair,
    pub price: Option<f64>,
    pub label_from: String,
    pub label_to: String,
    pub source_options: Vec<CurrencyOption>,
    pub target_options: Vec<CurrencyOption>,
}

impl ConverterView {
    /// Build the page state. `None` renders the empty fallback.
    pub fn new(model: Option<&PageViewModel>, pair: &CurrencyPair) -> Self {
        let conversion = model.map(|m| &m.conversion);
        let currencies: &[CurrencyDescriptor] = model
            .map(|m| m.currencies.as_slice())
            .unwrap_or_default();

        let price = conversion.and_then(|c| c.price_in(&pair.target_id));
        let label_from = currency_label(
            conversion.map(|c| c.name.as_str()),
            conversion.map(|c| c.symbol.as_str()),
        );
        let target = currencies
            .iter()
            .find(|currency| currency.id.to_string() == pair.target_id);
        let label_to = currency_label(
            target.map(|c| c.name.as_str()),
            target.map(|c| c.symbol.as_str()),
        );

        Self {
            pair: pair.clone(),
            price,
            label_from,
            label_to,
            source_options: options(currencies, pair, PairField::Source),
            target_options: options(currencies, pair, PairField::Target),
        }
    }

    /// Price text; blank when the target was not quoted. Never rounded.
    pub fn price_text(&self) -> String {
        self.price.map(|p| p.to_string()).unwrap_or_default()
    }

    /// `1 {labelFrom} = {price} {labelTo}`
    pub fn line(&self) -> String {
        format!(
            "1 {} = {} {}",
            self.label_from,
            self.price_text(),
            self.label_to
        )
    }
}

fn options(
    currencies: &[CurrencyDescriptor],
    pair: &CurrencyPair,
    field: PairField,
) -> Vec<CurrencyOption> {
    let current = match field {
        PairField::Source => &pair.source_id,
        PairField::Target => &pair.target_id,
    };
    currencies
        .iter()
        .map(|currency| {
            let value = currency.id.to_string();
            CurrencyOption {
                selected: &value == current,
                href: navigation_href(pair, field, &value),
                label: currency.symbol.clone(),
                value,
            }
        })
        .collect()
}

/// Shown when the upstream rejects the requested pair.
#[derive(Debug, Clone, Template)]
#[template(path = "not_found.html")]
pub struct NotFoundView {
    pub pair: CurrencyPair,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{ConversionResult, QuotePrice};
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;

    fn currency(id: i64, name: &str, symbol: &str) -> CurrencyDescriptor {
        CurrencyDescriptor {
            id,
            rank: id,
            name: name.into(),
            symbol: symbol.into(),
            slug: name.to_lowercase(),
            is_active: true,
            first_historical_data: None,
            last_historical_data: None,
            platform: None,
        }
    }

    fn model(quotes: &[(&str, f64)]) -> PageViewModel {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let quote: IndexMap<String, QuotePrice> = quotes
            .iter()
            .map(|(id, price)| {
                (
                    id.to_string(),
                    QuotePrice {
                        price: Some(*price),
                        last_updated: Some(stamp),
                    },
                )
            })
            .collect();
        PageViewModel {
            conversion: ConversionResult {
                id: 1,
                symbol: "BTC".into(),
                name: "Bitcoin".into(),
                amount: 1.0,
                last_updated: stamp,
                quote,
            },
            currencies: vec![
                currency(1, "Bitcoin", "BTC"),
                currency(1027, "Ethereum", "ETH"),
                currency(5, "Peercoin", "PPC"),
            ],
        }
    }

    #[test]
    fn line_uses_quoted_price_and_labels() {
        let model = model(&[("1027", 19.8312)]);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", "1027"));
        assert_eq!(view.line(), "1 Bitcoin (BTC) = 19.8312 Ethereum (ETH)");
    }

    #[test]
    fn default_pair_converts_into_itself() {
        let model = model(&[("1", 1.0)]);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", "1"));
        assert_eq!(view.line(), "1 Bitcoin (BTC) = 1 Bitcoin (BTC)");
    }

    #[test]
    fn unquoted_target_leaves_price_blank() {
        let model = model(&[("1", 1.0)]);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", "1027"));
        assert_eq!(view.price, None);
        assert_eq!(view.line(), "1 Bitcoin (BTC) =  Ethereum (ETH)");
    }

    #[test]
    fn unknown_target_renders_undefined_label() {
        let model = model(&[("825", 60_123.5)]);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", "825"));
        assert_eq!(view.label_to, "undefined (undefined)");
        assert_eq!(view.line(), "1 Bitcoin (BTC) = 60123.5 undefined (undefined)");
    }

    #[test]
    fn empty_state_has_no_options() {
        let view = ConverterView::new(None, &CurrencyPair::new("1", "1"));
        assert!(view.source_options.is_empty());
        assert_eq!(view.line(), "1 undefined (undefined) =  undefined (undefined)");
    }

    #[test]
    fn options_preselect_current_ids() {
        let model = model(&[("1027", 19.8312)]);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", "1027"));
        let selected_source: Vec<_> = view
            .source_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        let selected_target: Vec<_> = view
            .target_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected_source, ["BTC"]);
        assert_eq!(selected_target, ["ETH"]);
    }

    #[test]
    fn source_change_keeps_target() {
        let pair = CurrencyPair::new("1", "1");
        assert_eq!(
            navigation_href(&pair, PairField::Source, "5"),
            "/?id=5&convertId=1"
        );
        let pair = CurrencyPair::new("1", "1027");
        assert_eq!(
            navigation_href(&pair, PairField::Target, "5"),
            "/?id=1&convertId=5"
        );
    }

    #[test]
    fn option_hrefs_point_at_their_own_value() {
        let model = model(&[("1", 1.0)]);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", "1"));
        let ppc = view
            .source_options
            .iter()
            .find(|o| o.value == "5")
            .unwrap();
        assert_eq!(ppc.href, "/?id=5&convertId=1");
    }

    #[test]
    fn rendered_html_contains_line_and_pickers() {
        let model = model(&[("1027", 19.8312)]);
        let html = ConverterView::new(Some(&model), &CurrencyPair::new("1", "1027"))
            .render()
            .unwrap();
        assert!(html.contains("1 Bitcoin (BTC) = 19.8312 Ethereum (ETH)"));
        assert!(html.contains(r#"name="id""#));
        assert!(html.contains(r#"name="convertId""#));
        assert!(html.contains(r#"<option value="1027""#));
    }
}
