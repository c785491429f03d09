use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single request parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    /// Serialized as repeated `key[]=value` pairs
    List(Vec<String>),
}

impl ParamValue {
    /// Empty strings and empty lists are treated as "not provided"
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::List(values) => values.is_empty(),
        }
    }
}

/// Insertion-ordered request parameters for one API call
///
/// Absent values never make it into the mapping: `push_opt` and `push_list`
/// silently skip `None`, empty strings and empty lists, so the canonical query
/// string only ever contains keys the caller actually provided. Explicit zeros
/// (`Some(0)`) are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, ParamValue)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar parameter; empty strings are dropped
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.insert(key.into(), ParamValue::Text(value.to_string()));
        self
    }

    /// Add a scalar parameter only when present
    pub fn push_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Add a list parameter only when present and non-empty
    pub fn push_list<V: ToString>(
        &mut self,
        key: impl Into<String>,
        values: Option<&[V]>,
    ) -> &mut Self {
        if let Some(values) = values {
            let values = values
                .iter()
                .map(ToString::to_string)
                .filter(|v| !v.is_empty())
                .collect();
            self.insert(key.into(), ParamValue::List(values));
        }
        self
    }

    fn insert(&mut self, key: String, value: ParamValue) {
        if value.is_empty() {
            return;
        }
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Order side: `bid` buys, `ask` sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Bid,
    Ask,
}

impl OrderSide {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bid" => Ok(Self::Bid),
            "ask" => Ok(Self::Ask),
            other => Err(format!("Unknown order side: {}", other)),
        }
    }
}

/// Order type as understood by the exchange
///
/// - `Limit`: fixed price order
/// - `Price`: market buy, sized by total quote amount
/// - `Market`: market sell, sized by volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Price,
    Market,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Price => "price",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "limit" => Ok(Self::Limit),
            "price" => Ok(Self::Price),
            "market" => Ok(Self::Market),
            other => Err(format!("Unknown order type: {}", other)),
        }
    }
}

/// Order placement request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub market: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub volume: Option<Decimal>,
    pub price: Option<Decimal>,
    pub identifier: Option<String>,
}

impl OrderRequest {
    pub fn new(market: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            market: market.into(),
            side,
            order_type,
            volume: None,
            price: None,
            identifier: None,
        }
    }

    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Minute candle resolutions accepted by `candles/minutes/{unit}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinuteUnit {
    One,
    Three,
    Five,
    Ten,
    Fifteen,
    Thirty,
    Sixty,
    TwoForty,
}

impl MinuteUnit {
    pub fn minutes(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
            Self::Thirty => 30,
            Self::Sixty => 60,
            Self::TwoForty => 240,
        }
    }
}

impl TryFrom<u32> for MinuteUnit {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            15 => Ok(Self::Fifteen),
            30 => Ok(Self::Thirty),
            60 => Ok(Self::Sixty),
            240 => Ok(Self::TwoForty),
            other => Err(format!(
                "Unsupported minute candle unit {} (expected 1, 3, 5, 10, 15, 30, 60 or 240)",
                other
            )),
        }
    }
}

impl fmt::Display for MinuteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// Filters for the order history listing
///
/// Every field is optional; unset fields are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    pub market: Option<String>,
    pub uuids: Option<Vec<String>>,
    pub identifiers: Option<Vec<String>>,
    pub state: Option<String>,
    pub states: Option<Vec<String>>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub order_by: Option<String>,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn uuids(mut self, uuids: Vec<String>) -> Self {
        self.uuids = Some(uuids);
        self
    }

    pub fn identifiers(mut self, identifiers: Vec<String>) -> Self {
        self.identifiers = Some(identifiers);
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn states(mut self, states: Vec<String>) -> Self {
        self.states = Some(states);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Parameters in wire order
    pub fn to_params(&self) -> RequestParams {
        let mut params = RequestParams::new();
        params
            .push_opt("market", self.market.as_deref())
            .push_list("uuids", self.uuids.as_deref())
            .push_list("identifiers", self.identifiers.as_deref())
            .push_opt("state", self.state.as_deref())
            .push_list("states", self.states.as_deref())
            .push_opt("page", self.page)
            .push_opt("limit", self.limit)
            .push_opt("order_by", self.order_by.as_deref());
        params
    }
}
