use chrono::{TimeZone, Utc};
use coin_convert::{
    data::types::{ConversionResult, CurrencyDescriptor, QuotePrice},
    loader::{CurrencyPair, PageViewModel},
    ui::{navigation_href, ConverterView, PairField},
};
use indexmap::IndexMap;
use proptest::prelude::*;

fn model(target_id: &str, price: f64) -> PageViewModel {
    let stamp = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let mut quote = IndexMap::new();
    quote.insert(
        target_id.to_string(),
        QuotePrice {
            price: Some(price),
            last_updated: Some(stamp),
        },
    );
    PageViewModel {
        conversion: ConversionResult {
            id: 1,
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            amount: 1.0,
            last_updated: stamp,
            quote,
        },
        currencies: vec![CurrencyDescriptor {
            id: 1,
            rank: 1,
            name: "Bitcoin".into(),
            symbol: "BTC".into(),
            slug: "bitcoin".into(),
            is_active: true,
            first_historical_data: None,
            last_historical_data: None,
            platform: None,
        }],
    }
}

proptest! {
    #[test]
    fn rendered_price_is_the_quoted_price(price in 0.0f64..1.0e12, target in 1u32..100_000) {
        let target = target.to_string();
        let model = model(&target, price);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", target.clone()));
        let shown: f64 = view.price_text().parse().unwrap();
        prop_assert_eq!(shown, price);
        let line = view.line();
        let expected = format!("= {} ", view.price_text());
        prop_assert!(line.contains(&expected));
    }

    #[test]
    fn missing_quote_never_panics(quoted in 1u32..1000, requested in 1000u32..2000) {
        let model = model(&quoted.to_string(), 42.0);
        let view = ConverterView::new(Some(&model), &CurrencyPair::new("1", requested.to_string()));
        prop_assert_eq!(view.price, None);
        prop_assert_eq!(view.price_text(), "");
    }

    #[test]
    fn picker_navigation_only_touches_its_parameter(source in "[0-9]{1,5}", target in "[0-9]{1,5}", picked in "[0-9]{1,5}") {
        let pair = CurrencyPair::new(source.clone(), target.clone());
        prop_assert_eq!(
            navigation_href(&pair, PairField::Source, &picked),
            format!("/?id={picked}&convertId={target}")
        );
        prop_assert_eq!(
            navigation_href(&pair, PairField::Target, &picked),
            format!("/?id={source}&convertId={picked}")
        );
    }
}
