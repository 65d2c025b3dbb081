use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_RETRIES: usize = 3;
const RETRY_BACKOFF_MS: u64 = 250;

/// Fetch the active membership list from the admin backend. Returns the
/// raw JSON array so the cache stores exactly what the server sent.
pub(super) fn fetch_members_raw(url: &str) -> Option<Vec<serde_json::Value>> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(FETCH_TIMEOUT))
        .build()
        .into();

    for attempt in 0..FETCH_RETRIES {
        if let Ok(response) = agent.get(url).call() {
            let mut body = response.into_body();
            if let Ok(parsed) = serde_json::from_reader(body.as_reader()) {
                return Some(parsed);
            }
        }

        if attempt + 1 < FETCH_RETRIES {
            std::thread::sleep(Duration::from_millis(
                RETRY_BACKOFF_MS * (attempt as u64 + 1),
            ));
        }
    }

    None
}
