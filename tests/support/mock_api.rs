//! Mock API server driven from synchronous `rstest-bdd` steps.

use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// A Wiremock server with the runtime that drives it.
///
/// Cloning shares both, so the value can live in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct MockApi {
    server: Rc<MockServer>,
    runtime: Rc<Runtime>,
}

impl MockApi {
    /// Starts a runtime and a server on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tokio runtime cannot be created.
    pub fn start() -> Result<Self, io::Error> {
        let runtime = Runtime::new()?;
        let server = runtime.block_on(MockServer::start());
        Ok(Self {
            server: Rc::new(server),
            runtime: Rc::new(runtime),
        })
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn mount(&self, mock: Mock) {
        self.block_on(mock.mount(&self.server));
    }

    /// Returns the versioned API base URL served by the mock.
    pub fn base_url(&self) -> String {
        format!("{}/api/v1", self.server.uri())
    }

    /// Counts the requests received on `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if request recording is disabled.
    pub fn calls_to(&self, path: &str) -> Result<usize, io::Error> {
        let requests = self
            .block_on(self.server.received_requests())
            .ok_or_else(|| io::Error::other("request recording is disabled"))?;
        Ok(requests
            .iter()
            .filter(|request| request.url.path() == path)
            .count())
    }
}

/// Returns the scenario's mock API, starting it on first use.
///
/// # Errors
///
/// Returns an error if the mock cannot be started.
pub fn ensure_mock_api(slot: &Slot<MockApi>) -> Result<MockApi, io::Error> {
    if let Some(api) = slot.get() {
        return Ok(api);
    }
    let api = MockApi::start()?;
    slot.set(api.clone());
    Ok(api)
}
