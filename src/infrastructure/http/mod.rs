mod endpoint;
mod fetcher;

pub use endpoint::Endpoint;
pub use fetcher::{fetch_dataset, RemoteFetcher};
