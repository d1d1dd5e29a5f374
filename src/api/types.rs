//! JSON shapes for `/api/conversion`.

use serde::Serialize;

use crate::ui::{ConverterView, CurrencyOption};

#[derive(Debug, Clone, Serialize)]
pub struct ConversionDto {
    pub source_id: String,
    pub target_id: String,
    /// `null` when the target currency was not quoted.
    pub price: Option<f64>,
    pub label_from: String,
    pub label_to: String,
    pub line: String,
    pub currencies: Vec<CurrencyOptionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyOptionDto {
    pub id: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

impl From<&ConverterView> for ConversionDto {
    fn from(view: &ConverterView) -> Self {
        ConversionDto {
            source_id: view.pair.source_id.clone(),
            target_id: view.pair.target_id.clone(),
            price: view.price,
            label_from: view.label_from.clone(),
            label_to: view.label_to.clone(),
            line: view.line(),
            currencies: view.source_options.iter().map(Into::into).collect(),
        }
    }
}

impl From<&CurrencyOption> for CurrencyOptionDto {
    fn from(option: &CurrencyOption) -> Self {
        CurrencyOptionDto {
            id: option.value.clone(),
            symbol: option.label.clone(),
        }
    }
}
