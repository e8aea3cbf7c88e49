use async_trait::async_trait;
use bigdecimal::num_bigint::BigInt;
use serde_json::json;

use crate::{convert::hex_to_bigint, error::Result, traits::PriceProvider};

use super::Client;

/// `latestAnswer()` on a Chainlink aggregator.
pub const LATEST_ANSWER_SELECTOR: &str = "0x50d25bcd";

/// Scale of the aggregator answer.
pub const RATE_DECIMALS: u32 = 8;

#[async_trait]
impl PriceProvider for Client {
    // eth_call latestAnswer() against the feed at the latest block
    async fn get_conversion_rate(&self, feed_address: &str) -> Result<BigInt> {
        let params = json!([{ "to": feed_address, "data": LATEST_ANSWER_SELECTOR }, "latest"]);
        let answer = self.rpc_call("eth_call", params).await?;
        let rate = hex_to_bigint(Some(&answer))?;
        tracing::debug!(feed_address, %rate, "Fetched conversion rate");
        Ok(rate)
    }
}
