use tracing_subscriber::EnvFilter;
use upbitx::core::config::ExchangeConfig;
use upbitx::core::traits::{AccountInfo, MarketDataSource};
use upbitx::exchanges::upbit::build_connector;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Reads UPBIT_ACCESS_KEY / UPBIT_SECRET_KEY (optionally from .env)
    let config = ExchangeConfig::from_env_file("UPBIT")?;
    let upbit = build_connector(config)?;

    println!("Fetching markets...");
    match upbit.get_markets(false).await {
        Ok(markets) => {
            let markets = markets.as_array().cloned().unwrap_or_default();
            println!("Found {} markets", markets.len());
            for market in markets.iter().take(5) {
                println!(
                    "Market: {} ({})",
                    market["market"].as_str().unwrap_or_default(),
                    market["english_name"].as_str().unwrap_or_default()
                );
            }
        }
        Err(e) => {
            println!("Error fetching markets: {}", e);
        }
    }

    match upbit.get_accounts().await {
        Ok(accounts) => println!("Accounts: {}", accounts),
        Err(e) => println!("Error fetching accounts: {}", e),
    }

    // Example order (commented out for safety)
    /*
    use rust_decimal::Decimal;
    use upbitx::core::traits::OrderPlacer;
    use upbitx::core::types::{OrderRequest, OrderSide, OrderType};

    let order = OrderRequest::new("KRW-BTC", OrderSide::Bid, OrderType::Price)
        .with_price(Decimal::from(5_000));

    match upbit.place_order(order).await {
        Ok(response) => println!("Order placed successfully: {}", response),
        Err(e) => println!("Error placing order: {}", e),
    }
    */

    Ok(())
}
