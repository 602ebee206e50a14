use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    pub static ref ETH_ADDRESS_RE: Regex = Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap();
}

// Validate Ethereum-style address
pub fn validate_eth_address(address: &str) -> bool {
    ETH_ADDRESS_RE.is_match(address)
}

// Parse a decimal amount string, None if it is not a number
pub fn parse_amount(amount: &str) -> Option<Decimal> {
    Decimal::from_str(amount.trim()).ok()
}

// Amount used for aggregation; anything unparsable counts as zero
pub fn amount_or_zero(amount: &str) -> Decimal {
    parse_amount(amount).unwrap_or(Decimal::ZERO)
}

// Positive amount check shared by the create request and the seed generator
pub fn is_positive_amount(amount: &str) -> bool {
    matches!(parse_amount(amount), Some(value) if value > Decimal::ZERO)
}

// Gas fee as limit * price, missing values count as zero
pub fn calculate_transaction_fee(gas_limit: Option<&str>, gas_price: Option<&str>) -> Decimal {
    let limit = gas_limit.map(amount_or_zero).unwrap_or(Decimal::ZERO);
    let price = gas_price.map(amount_or_zero).unwrap_or(Decimal::ZERO);
    limit.checked_mul(price).unwrap_or(Decimal::ZERO)
}

// Format a decimal with a fixed number of places
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let rounded =
        value.round_dp_with_strategy(places, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

// Random 0x-prefixed lowercase hex string of `bytes` bytes
pub fn random_hex<R: Rng>(rng: &mut R, bytes: usize) -> String {
    let mut out = String::with_capacity(2 + bytes * 2);
    out.push_str("0x");
    for _ in 0..bytes {
        let byte: u8 = rng.random();
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    if address.len() < 10 {
        return address.to_string();
    }

    let start = &address[..6];
    let end = &address[address.len() - 4..];

    format!("{}...{}", start, end)
}
