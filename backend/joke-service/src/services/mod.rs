/// Business logic layer
///
/// - `jokes`: retrying fetcher and the read coordinator behind `GET /api/v1/jokes`
pub mod jokes;

pub use jokes::{JokeService, RetryingFetcher};
