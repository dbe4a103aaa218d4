//! Upload progress reporting.
//!
//! Multipart bodies are encoded before sending, so the byte total is
//! known up front. The body streams out in fixed chunks and the
//! callback fires with a whole percentage after each one.

use std::io;
use std::sync::Arc;

use futures_util::stream::{self, Stream, StreamExt};

/// Callback invoked with 0..=100 as upload bytes go out.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

/// Upload chunk size in bytes.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Whole-number percentage of `sent` against `total`, rounded.
pub fn percent(sent: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let ratio = sent as f64 / total as f64;
    (ratio * 100.0).round().min(100.0) as u8
}

fn progress_stream(
    bytes: Vec<u8>,
    on_progress: ProgressFn,
) -> impl Stream<Item = Result<Vec<u8>, io::Error>> {
    let total = bytes.len();
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(|c| c.to_vec()).collect();
    let mut sent = 0usize;
    stream::iter(chunks).map(move |chunk| {
        sent += chunk.len();
        (*on_progress)(percent(sent, total));
        Ok(chunk)
    })
}

/// Wrap encoded bytes in a request body that reports progress.
pub fn tracked_body(bytes: Vec<u8>, on_progress: ProgressFn) -> reqwest::Body {
    reqwest::Body::wrap_stream(progress_stream(bytes, on_progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_percent_rounds_to_whole_numbers() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(10, 10), 100);
    }

    #[test]
    fn test_percent_clamps_and_handles_empty() {
        assert_eq!(percent(5, 4), 100);
        assert_eq!(percent(0, 0), 100);
    }

    #[tokio::test]
    async fn test_stream_reports_after_every_chunk() {
        let bytes = vec![0u8; CHUNK_SIZE * 2 + 100];
        let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let on_progress: ProgressFn = Arc::new(move |p| sink.lock().unwrap().push(p));

        let chunks: Vec<Result<Vec<u8>, io::Error>> =
            progress_stream(bytes.clone(), on_progress).collect().await;

        let total: usize = chunks.iter().map(|c| c.as_ref().unwrap().len()).sum();
        assert_eq!(total, bytes.len());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(*seen.last().unwrap(), 100);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_empty_body_reports_nothing() {
        let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let on_progress: ProgressFn = Arc::new(move |p| sink.lock().unwrap().push(p));

        let chunks: Vec<Result<Vec<u8>, io::Error>> =
            progress_stream(Vec::new(), on_progress).collect().await;

        assert!(chunks.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }
}
