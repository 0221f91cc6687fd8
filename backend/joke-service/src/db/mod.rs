/// Database access layer
///
/// - `JokeSource`: the gateway the read path depends on
/// - `PgJokeSource`: PostgreSQL implementation over a `db-pool` pool
pub mod joke_repo;

pub use joke_repo::{JokeSource, PgJokeSource, SourceError, SELECT_JOKES};

#[cfg(test)]
pub use joke_repo::MockJokeSource;
