use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::{Error, StoreError};
use crate::fx::CurrencyPair;
use crate::quotes::QuoteClientTrait;
use crate::trades::{
    NewTrade, NewTradeRecord, Trade, TradeError, TradeRepositoryTrait, TradeService,
    TradeServiceTrait,
};
use crate::Result;
use folio_market_data::{InstrumentProfile, InstrumentQuote};

/// Quote client stub that resolves a fixed set of symbols.
struct StubQuoteClient {
    resolvable: HashSet<String>,
}

impl StubQuoteClient {
    fn new(symbols: &[&str]) -> Self {
        Self {
            resolvable: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl QuoteClientTrait for StubQuoteClient {
    async fn quote_prices(
        &self,
        _tickers: &HashSet<String>,
    ) -> HashMap<String, Option<InstrumentQuote>> {
        HashMap::new()
    }

    async fn quote_profiles(
        &self,
        _tickers: &HashSet<String>,
    ) -> HashMap<String, Option<InstrumentProfile>> {
        HashMap::new()
    }

    async fn quote_fx(
        &self,
        _pairs: &HashSet<CurrencyPair>,
    ) -> HashMap<CurrencyPair, Option<Decimal>> {
        HashMap::new()
    }

    async fn resolve_ticker(&self, ticker: &str) -> Result<Option<String>> {
        if self.resolvable.contains(ticker) {
            return Ok(Some(ticker.to_string()));
        }
        let crypto = format!("{}-USD", ticker);
        if self.resolvable.contains(&crypto) {
            return Ok(Some(crypto));
        }
        Ok(None)
    }
}

/// Ledger store stub over a Vec.
#[derive(Default)]
struct StubRepository {
    trades: Mutex<Vec<Trade>>,
}

#[async_trait]
impl TradeRepositoryTrait for StubRepository {
    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        let mut trades: Vec<Trade> = self
            .trades
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        trades.sort_by_key(|t| t.ordering_key());
        Ok(trades)
    }

    async fn insert_trade(&self, new_trade: NewTradeRecord) -> Result<Trade> {
        let mut trades = self.trades.lock().unwrap();
        let trade = Trade {
            id: format!("trade-{}", trades.len() + 1),
            user_id: new_trade.user_id,
            ticker: new_trade.ticker,
            side: new_trade.side,
            quantity: new_trade.quantity,
            gross_minor: new_trade.gross_minor,
            fee_minor: new_trade.fee_minor,
            trade_date: new_trade.trade_date,
            created_at: Utc::now(),
        };
        trades.push(trade.clone());
        Ok(trade)
    }

    async fn delete_trade(&self, user_id: &str, trade_id: &str) -> Result<Trade> {
        let mut trades = self.trades.lock().unwrap();
        let index = trades
            .iter()
            .position(|t| t.user_id == user_id && t.id == trade_id)
            .ok_or_else(|| Error::Store(StoreError::NotFound(trade_id.to_string())))?;
        Ok(trades.remove(index))
    }
}

fn service(resolvable: &[&str]) -> (TradeService, Arc<StubRepository>) {
    let repository = Arc::new(StubRepository::default());
    let service = TradeService::new(
        repository.clone(),
        Arc::new(StubQuoteClient::new(resolvable)),
    );
    (service, repository)
}

fn buy_input(ticker: &str, quantity: Decimal, price: Decimal) -> NewTrade {
    NewTrade {
        ticker: ticker.to_string(),
        side: "buy".to_string(),
        quantity,
        price,
        fee: None,
        trade_date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
    }
}

#[tokio::test]
async fn test_record_trade_converts_to_minor_units() {
    let (service, repository) = service(&["AAPL"]);

    let input = NewTrade {
        fee: Some(dec!(0.99)),
        ..buy_input("aapl", dec!(10), dec!(150.50))
    };
    let trade = service.record_trade("user-1", input).await.unwrap();

    assert_eq!(trade.ticker, "AAPL");
    assert_eq!(trade.gross_minor, 15_050_000);
    assert_eq!(trade.fee_minor, 9_900);
    assert_eq!(repository.list_trades("user-1").unwrap().len(), 1);
}

#[tokio::test]
async fn test_record_trade_rejects_invalid_side() {
    let (service, repository) = service(&["AAPL"]);

    let input = NewTrade {
        side: "short".to_string(),
        ..buy_input("AAPL", dec!(1), dec!(100))
    };
    let err = service.record_trade("user-1", input).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Trade(TradeError::InvalidSide(ref s)) if s == "short"
    ));
    assert!(repository.list_trades("user-1").unwrap().is_empty());
}

#[tokio::test]
async fn test_record_trade_rejects_non_positive_quantity() {
    let (service, _) = service(&["AAPL"]);

    let err = service
        .record_trade("user-1", buy_input("AAPL", dec!(0), dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Trade(TradeError::NonPositiveQuantity)));
}

#[tokio::test]
async fn test_record_trade_rejects_non_positive_price() {
    let (service, _) = service(&["AAPL"]);

    let err = service
        .record_trade("user-1", buy_input("AAPL", dec!(1), dec!(-5)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Trade(TradeError::NonPositivePrice)));
}

#[tokio::test]
async fn test_record_trade_rejects_blank_ticker() {
    let (service, _) = service(&[]);

    let err = service
        .record_trade("user-1", buy_input("   ", dec!(1), dec!(100)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Trade(TradeError::MissingTicker)));
}

#[tokio::test]
async fn test_record_trade_rejects_unresolvable_ticker() {
    let (service, repository) = service(&["AAPL"]);

    let err = service
        .record_trade("user-1", buy_input("GHOST", dec!(1), dec!(100)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Trade(TradeError::UnresolvableTicker(ref t)) if t == "GHOST"
    ));
    assert!(repository.list_trades("user-1").unwrap().is_empty());
}

#[tokio::test]
async fn test_record_trade_resolves_crypto_ticker() {
    let (service, _) = service(&["BTC-USD"]);

    let trade = service
        .record_trade("user-1", buy_input("btc", dec!(0.5), dec!(60000)))
        .await
        .unwrap();
    assert_eq!(trade.ticker, "BTC-USD");
}

#[tokio::test]
async fn test_delete_trade_not_found() {
    let (service, _) = service(&[]);

    let err = service.delete_trade("user-1", "nope").await.unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::NotFound(_))));
}
