//! Display client state.
//!
//! Holds the UI-local state of a single-query weather view and drives the
//! fetch cycle against the proxy. Every fetch takes a sequence number; only
//! the most recent fetch may write its outcome, so an older response that
//! resolves late never overwrites a newer one.

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{BackgroundClass, ClientError, ProxyClient, WeatherBundle};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Current text-input value.
    pub city: String,
    /// Last successful result; `None` before the first query and after an error.
    pub weather_data: Option<WeatherBundle>,
    /// True strictly between issuing a fetch and its resolution.
    pub loading: bool,
    /// Cleared at the start of every fetch.
    pub error: Option<String>,
}

impl ViewState {
    pub fn background_class(&self) -> BackgroundClass {
        BackgroundClass::for_bundle(self.weather_data.as_ref())
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: ViewState,
    latest_seq: u64,
}

#[derive(Debug)]
pub struct DisplayClient {
    proxy: ProxyClient,
    inner: Mutex<Inner>,
}

impl DisplayClient {
    pub fn new(proxy: ProxyClient) -> Self {
        Self { proxy, inner: Mutex::new(Inner::default()) }
    }

    pub fn set_city(&self, city: impl Into<String>) {
        self.inner.lock().state.city = city.into();
    }

    pub fn snapshot(&self) -> ViewState {
        self.inner.lock().state.clone()
    }

    pub fn background_class(&self) -> BackgroundClass {
        self.inner.lock().state.background_class()
    }

    /// Fetch weather for the current city.
    ///
    /// Returns `false` when a newer fetch started meanwhile and this result
    /// was discarded.
    pub async fn fetch_weather(&self) -> bool {
        let (seq, city) = self.begin();
        let _loading = LoadingGuard { client: self, seq };

        let result = self.proxy.get_weather(&city).await;
        self.apply(seq, result)
    }

    fn begin(&self) -> (u64, String) {
        let mut inner = self.inner.lock();
        inner.latest_seq += 1;
        inner.state.loading = true;
        inner.state.error = None;
        inner.state.weather_data = None;

        debug!(seq = inner.latest_seq, city = %inner.state.city, "fetch started");
        (inner.latest_seq, inner.state.city.clone())
    }

    fn apply(&self, seq: u64, result: Result<WeatherBundle, ClientError>) -> bool {
        let mut inner = self.inner.lock();
        if inner.latest_seq != seq {
            debug!(seq, latest = inner.latest_seq, "discarding stale weather response");
            return false;
        }

        match result {
            Ok(bundle) => {
                info!(city = bundle.city_name().unwrap_or("-"), "weather data received");
                inner.state.weather_data = Some(bundle);
            }
            Err(err) => {
                info!(error = %err, "weather fetch failed");
                inner.state.error = Some(err.user_message());
            }
        }
        true
    }
}

/// Clears `loading` when the fetch that set it ends, including on cancellation.
struct LoadingGuard<'a> {
    client: &'a DisplayClient,
    seq: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.client.inner.lock();
        if inner.latest_seq == self.seq {
            inner.state.loading = false;
        }
    }
}
