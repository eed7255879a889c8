//! Bounded polling helpers

use crate::error::InteractionError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Poll `probe` until it reports true or `timeout` elapses
///
/// Errors from the probe end the wait immediately.
pub async fn wait_until<F, Fut>(
    what: &str,
    timeout: Duration,
    poll_interval: Duration,
    mut probe: F,
) -> Result<(), InteractionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, InteractionError>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if probe().await? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(InteractionError::timeout(what, timeout));
        }
        sleep(poll_interval).await;
    }
}

/// Re-read text until two consecutive non-empty reads agree
///
/// If the deadline passes while the text is still changing, the last
/// non-empty read is returned. Only when nothing was ever read does the
/// wait time out.
pub async fn read_until_stable<F, Fut>(
    what: &str,
    timeout: Duration,
    poll_interval: Duration,
    mut read: F,
) -> Result<String, InteractionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, InteractionError>>,
{
    let deadline = Instant::now() + timeout;
    let mut previous: Option<String> = None;
    loop {
        let current = read().await?;
        if !current.is_empty() {
            if previous.as_deref() == Some(current.as_str()) {
                return Ok(current);
            }
            previous = Some(current);
        }
        if Instant::now() >= deadline {
            return previous.ok_or_else(|| InteractionError::timeout(what, timeout));
        }
        sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test(start_paused = true)]
    async fn wait_until_times_out() {
        let err = wait_until("submit button", Duration::from_secs(3), Duration::from_millis(100), || async {
            Ok(false)
        })
        .await
        .unwrap_err();
        assert_eq!(err, InteractionError::timeout("submit button", Duration::from_secs(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_until_returns_once_probe_succeeds() {
        let calls = Cell::new(0);
        wait_until("input", Duration::from_secs(3), Duration::from_millis(100), || {
            calls.set(calls.get() + 1);
            let ready = calls.get() >= 3;
            async move { Ok(ready) }
        })
        .await
        .unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stable_read_waits_for_text_to_settle() {
        let reads = ["", "Checking...", "ABC123 is available", "ABC123 is available"];
        let next = Cell::new(0);
        let text = read_until_stable("result", Duration::from_secs(5), Duration::from_millis(100), || {
            let i = next.get().min(reads.len() - 1);
            next.set(next.get() + 1);
            let value = reads[i].to_string();
            async move { Ok(value) }
        })
        .await
        .unwrap();
        assert_eq!(text, "ABC123 is available");
    }

    #[tokio::test(start_paused = true)]
    async fn stable_read_falls_back_to_last_text() {
        let counter = Cell::new(0u32);
        let text = read_until_stable("result", Duration::from_secs(1), Duration::from_millis(100), || {
            counter.set(counter.get() + 1);
            let value = format!("tick {}", counter.get());
            async move { Ok(value) }
        })
        .await
        .unwrap();
        assert!(text.starts_with("tick "));
    }

    #[tokio::test(start_paused = true)]
    async fn stable_read_times_out_on_empty_text() {
        let err = read_until_stable("result", Duration::from_secs(1), Duration::from_millis(100), || async {
            Ok(String::new())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, InteractionError::Timeout { .. }));
    }
}
