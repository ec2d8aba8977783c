// src/audit/runner.rs
// =============================================================================
// The audit loop: probe the discovered links one at a time, in order.
//
// How it works:
// 1. An Auditor starts Idle with the full link list
// 2. Each call to next() checks the cancel token, then probes the next link
// 3. The result is appended to the report and progress moves forward
// 4. When the list runs out the run is Completed, when the token fires it
//    is Cancelled. Both are final.
//
// Only one probe is ever in flight, so results come out in link order no
// matter how slow individual servers are.
//
// Cancelling while a probe is in flight drops that probe (which aborts the
// request). It does not count towards progress and is not in the report.
// =============================================================================

use crate::audit::cancel::CancelToken;
use crate::checker::{LinkProbe, ProbeResult};
use futures::stream::{self, Stream};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Discovering,
    Probing,
}

/// Snapshot of how far a run has got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunProgress {
    pub completed: usize,
    pub total: usize,
    pub phase: Phase,
}

impl RunProgress {
    pub fn discovering() -> Self {
        Self {
            completed: 0,
            total: 0,
            phase: Phase::Discovering,
        }
    }

    /// Completion in percent, 0 when there is nothing to do
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// The finished (or stopped) run, handed off for printing and export
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub state: RunState,
    /// Number of links that were queued for probing
    pub total: usize,
    pub results: Vec<ProbeResult>,
}

impl AuditReport {
    pub fn broken_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_broken()).count()
    }
}

pub struct Auditor<P> {
    probe: P,
    links: Vec<String>,
    capture_body: bool,
    cancel: CancelToken,
    results: Vec<ProbeResult>,
    state: RunState,
}

impl<P: LinkProbe> Auditor<P> {
    pub fn new(probe: P, links: Vec<String>, capture_body: bool, cancel: CancelToken) -> Self {
        Self {
            probe,
            links,
            capture_body,
            cancel,
            results: Vec::new(),
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn progress(&self) -> RunProgress {
        RunProgress {
            completed: self.results.len(),
            total: self.links.len(),
            phase: match self.state {
                RunState::Running => Phase::Probing,
                _ => Phase::Idle,
            },
        }
    }

    /// Results gathered so far, in link order
    pub fn results(&self) -> &[ProbeResult] {
        &self.results
    }

    /// Probes the next link and returns it with its index
    ///
    /// Returns None once the run has completed or been cancelled, and keeps
    /// returning None after that.
    pub async fn next(&mut self) -> Option<(usize, ProbeResult)> {
        match self.state {
            RunState::Completed | RunState::Cancelled => return None,
            RunState::Idle => {
                info!("Probing {} link(s)", self.links.len());
                self.state = RunState::Running;
            }
            RunState::Running => {}
        }

        if self.cancel.is_cancelled() {
            self.finish(RunState::Cancelled);
            return None;
        }

        let index = self.results.len();
        let Some(url) = self.links.get(index) else {
            self.finish(RunState::Completed);
            return None;
        };

        debug!("[{}/{}] {}", index + 1, self.links.len(), url);

        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = self.probe.probe(url, self.capture_body) => Some(result),
        };

        match outcome {
            Some(result) => {
                self.results.push(result.clone());
                Some((index, result))
            }
            None => {
                debug!("Dropped in-flight probe of {}", url);
                self.finish(RunState::Cancelled);
                None
            }
        }
    }

    /// Drives the run to the end, reporting progress after every probe
    pub async fn run<F>(&mut self, mut on_progress: F) -> RunState
    where
        F: FnMut(RunProgress),
    {
        while self.next().await.is_some() {
            on_progress(self.progress());
        }
        self.state
    }

    /// Turns the auditor into a lazy stream of (index, result) pairs
    pub fn into_stream(self) -> impl Stream<Item = (usize, ProbeResult)> {
        stream::unfold(self, |mut auditor| async move {
            let item = auditor.next().await;
            item.map(move |item| (item, auditor))
        })
    }

    pub fn into_report(self) -> AuditReport {
        AuditReport {
            state: self.state,
            total: self.links.len(),
            results: self.results,
        }
    }

    fn finish(&mut self, state: RunState) {
        self.state = state;
        info!(
            "Audit {:?} after {}/{} link(s)",
            state,
            self.results.len(),
            self.links.len()
        );
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does tokio::select! do?
//    - Polls several futures at once and runs the branch of the first to finish
//    - The other futures are dropped, which cancels them
//    - `biased;` polls branches top to bottom, so a cancel that is already
//      set wins over a probe that happens to be ready at the same moment
//
// 2. What is let-else?
//    - `let Some(url) = ... else { ...; return None; };`
//    - Binds on a match, otherwise runs the else block, which must exit
//
// 3. Why is Auditor generic over P?
//    - P is anything implementing LinkProbe
//    - The CLI passes HttpProbe, tests pass fakes that never touch the network
//
// 4. What is stream::unfold?
//    - Builds a Stream from a state value and an async step function
//    - Each step hands the state back along with the next item
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::StreamExt;
    use reqwest::StatusCode;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Answers 200 for every URL and remembers what it was asked
    #[derive(Clone, Default)]
    struct RecordingProbe {
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LinkProbe for RecordingProbe {
        async fn probe(&self, url: &str, _capture_body: bool) -> ProbeResult {
            self.calls.lock().unwrap().push(url.to_string());
            ProbeResult::completed(
                url.to_string(),
                StatusCode::OK,
                "OK".to_string(),
                BTreeMap::new(),
                None,
            )
        }
    }

    /// Answers 200 except for one URL, whose request never gets a response
    struct FailsOn {
        url: String,
    }

    #[async_trait]
    impl LinkProbe for FailsOn {
        async fn probe(&self, url: &str, _capture_body: bool) -> ProbeResult {
            if url == self.url {
                return ProbeResult::failed(url.to_string(), "connection refused".to_string());
            }
            ProbeResult::completed(
                url.to_string(),
                StatusCode::OK,
                "OK".to_string(),
                BTreeMap::new(),
                None,
            )
        }
    }

    /// Never finishes probing the URL it is told to hang on
    struct HangingProbe {
        hang_on: String,
    }

    #[async_trait]
    impl LinkProbe for HangingProbe {
        async fn probe(&self, url: &str, _capture_body: bool) -> ProbeResult {
            if url == self.hang_on {
                std::future::pending::<()>().await;
            }
            ProbeResult::failed(url.to_string(), "unreachable".to_string())
        }
    }

    fn links(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://example.com/{}", i)).collect()
    }

    #[tokio::test]
    async fn test_failed_link_is_recorded_and_run_continues() {
        let failing = FailsOn {
            url: links(3)[1].clone(),
        };
        let mut auditor = Auditor::new(failing, links(3), false, CancelToken::new());

        let mut seen = Vec::new();
        let state = auditor.run(|progress| seen.push(progress)).await;

        assert_eq!(state, RunState::Completed);
        assert_eq!(seen.last().map(|p| p.completed), Some(3));

        let report = auditor.into_report();
        assert_eq!(report.state, RunState::Completed);
        let urls: Vec<_> = report.results.iter().map(|r| r.url.clone()).collect();
        assert_eq!(urls, links(3));

        let middle = &report.results[1];
        assert_eq!(middle.status, 0);
        assert!(middle.error.is_some());
        assert_eq!(report.results[0].status, 200);
        assert_eq!(report.results[2].status, 200);
        assert_eq!(report.broken_count(), 1);
    }

    #[tokio::test]
    async fn test_runs_all_links_in_order() {
        let probe = RecordingProbe::default();
        let calls = probe.calls.clone();
        let mut auditor = Auditor::new(probe, links(3), false, CancelToken::new());

        let mut seen = Vec::new();
        let state = auditor.run(|progress| seen.push(progress)).await;

        assert_eq!(state, RunState::Completed);
        assert_eq!(*calls.lock().unwrap(), links(3));
        assert_eq!(
            seen.iter().map(|p| p.completed).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(seen.iter().all(|p| p.total == 3 && p.phase == Phase::Probing));

        let report = auditor.into_report();
        let urls: Vec<_> = report.results.iter().map(|r| r.url.clone()).collect();
        assert_eq!(urls, links(3));
    }

    #[tokio::test]
    async fn test_cancel_after_two_of_five() {
        let probe = RecordingProbe::default();
        let calls = probe.calls.clone();
        let cancel = CancelToken::new();
        let mut auditor = Auditor::new(probe, links(5), false, cancel.clone());

        assert_eq!(auditor.next().await.map(|(i, _)| i), Some(0));
        assert_eq!(auditor.next().await.map(|(i, _)| i), Some(1));
        assert_eq!(auditor.results().len(), 2);

        cancel.cancel();

        assert!(auditor.next().await.is_none());
        assert_eq!(auditor.state(), RunState::Cancelled);
        assert_eq!(calls.lock().unwrap().len(), 2);

        let report = auditor.into_report();
        assert_eq!(report.state, RunState::Cancelled);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.total, 5);
    }

    #[tokio::test]
    async fn test_terminal_state_is_final() {
        let mut auditor = Auditor::new(RecordingProbe::default(), links(1), false, CancelToken::new());
        assert!(auditor.next().await.is_some());
        assert!(auditor.next().await.is_none());
        assert_eq!(auditor.state(), RunState::Completed);
        assert!(auditor.next().await.is_none());
        assert_eq!(auditor.state(), RunState::Completed);
    }

    #[tokio::test]
    async fn test_empty_link_list_completes() {
        let mut auditor = Auditor::new(RecordingProbe::default(), Vec::new(), false, CancelToken::new());
        assert_eq!(auditor.state(), RunState::Idle);
        assert_eq!(auditor.run(|_| {}).await, RunState::Completed);
        assert_eq!(auditor.progress().percent(), 0.0);
    }

    #[tokio::test]
    async fn test_cancel_before_start_probes_nothing() {
        let probe = RecordingProbe::default();
        let calls = probe.calls.clone();
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut auditor = Auditor::new(probe, links(3), false, cancel);
        assert_eq!(auditor.run(|_| {}).await, RunState::Cancelled);
        assert!(calls.lock().unwrap().is_empty());
        assert!(auditor.results().is_empty());
    }

    #[tokio::test]
    async fn test_in_flight_probe_is_dropped_on_cancel() {
        let all = links(3);
        let probe = HangingProbe {
            hang_on: all[1].clone(),
        };
        let cancel = CancelToken::new();
        let mut auditor = Auditor::new(probe, all, false, cancel.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        });

        let state = tokio::time::timeout(Duration::from_secs(5), auditor.run(|_| {}))
            .await
            .expect("cancel should stop the hanging probe");
        canceller.await.unwrap();

        assert_eq!(state, RunState::Cancelled);
        assert_eq!(auditor.results().len(), 1);
        assert_eq!(auditor.progress().completed, 1);
    }

    #[tokio::test]
    async fn test_stream_yields_indexed_results() {
        let auditor = Auditor::new(RecordingProbe::default(), links(4), true, CancelToken::new());
        let items: Vec<_> = auditor.into_stream().collect().await;

        assert_eq!(
            items.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(items[3].1.url, "https://example.com/4");
    }

    #[test]
    fn test_progress_percent() {
        let progress = RunProgress {
            completed: 1,
            total: 4,
            phase: Phase::Probing,
        };
        assert_eq!(progress.percent(), 25.0);
        assert_eq!(RunProgress::discovering().phase, Phase::Discovering);
    }
}
