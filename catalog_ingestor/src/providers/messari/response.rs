use serde::Deserialize;

/// Envelope returned by the assets endpoint.
///
/// Error responses carry a populated `status.error_code` and no `data`;
/// success responses carry `data` and a status without an error code.
#[derive(Deserialize, Debug)]
pub struct MessariResponse {
    pub status: Option<MessariStatus>,
    pub data: Option<Vec<MessariAsset>>,
}

#[derive(Deserialize, Debug)]
pub struct MessariStatus {
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MessariAsset {
    pub id: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub metrics: Option<MessariMetrics>,
}

#[derive(Deserialize, Debug)]
pub struct MessariMetrics {
    pub market_data: Option<MessariMarketData>,
    pub marketcap: Option<MessariMarketcap>,
}

#[derive(Deserialize, Debug)]
pub struct MessariMarketData {
    pub price_usd: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct MessariMarketcap {
    pub rank: Option<u64>,
}
