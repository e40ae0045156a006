#![allow(dead_code)]
mod http_server_mock;
mod mock_fetcher;

pub use http_server_mock::MockHttpServer;
pub use mock_fetcher::MockFetcher;

use dns_blocker_domain::BlocklistSource;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

pub fn source(uri: &str) -> BlocklistSource {
    BlocklistSource::new(uri, Duration::from_secs(3600)).unwrap()
}

pub fn source_every(uri: &str, refresh_interval: Duration) -> BlocklistSource {
    BlocklistSource::new(uri, refresh_interval).unwrap()
}

pub fn blocklist_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

/// Polls `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
