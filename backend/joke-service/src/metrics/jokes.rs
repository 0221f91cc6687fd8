use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static! {
    /// Cache events on the read path (hit/miss/stale_served/update).
    pub static ref JOKES_CACHE_EVENTS: IntCounterVec = register_int_counter_vec!(
        "jokes_cache_events_total",
        "Joke cache events segmented by outcome",
        &["event"]
    )
    .expect("failed to register jokes_cache_events_total");

    /// Individual fetch attempts against the database.
    pub static ref JOKES_FETCH_ATTEMPTS: IntCounterVec = register_int_counter_vec!(
        "jokes_fetch_attempts_total",
        "Joke fetch attempts segmented by result",
        &["result"]
    )
    .expect("failed to register jokes_fetch_attempts_total");

    /// Duration of whole fetch sequences, retries and delays included.
    pub static ref JOKES_FETCH_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "jokes_fetch_duration_seconds",
        "Joke fetch duration including retries",
        &["result"],
        vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("failed to register jokes_fetch_duration_seconds");
}
