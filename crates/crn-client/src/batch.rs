use crn_types::Identifier;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::resolver::ObjectResolver;
use crate::transport::ObjectTransport;

/// Terminal status of one retrieval attempt.
#[derive(Debug)]
pub enum RetrievalStatus {
    /// The object was fetched; its stream has already been closed.
    Succeeded,
    /// The retrieval failed. The error kind distinguishes absence
    /// ([`ClientError::CacheMiss`]) from an operational fault.
    Failed(ClientError),
}

impl RetrievalStatus {
    /// Returns `true` for a successful retrieval.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns `true` when the object was simply absent.
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::Failed(err) if err.is_cache_miss())
    }

    /// The recorded error, if the retrieval failed.
    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Succeeded => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// Per-identifier outcome recorded by a batch run. Immutable once recorded.
#[derive(Debug)]
pub struct RetrievalOutcome {
    pub identifier: Identifier,
    pub status: RetrievalStatus,
}

/// Accounting for one batch run.
///
/// Holds exactly one outcome per input identifier, in input order, plus the
/// running success count; nothing is silently dropped. The invariant
/// `succeeded == outcomes with Succeeded status` is maintained by
/// construction.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<RetrievalOutcome>,
    succeeded: usize,
}

impl BatchReport {
    /// All outcomes, in input order.
    pub fn outcomes(&self) -> &[RetrievalOutcome] {
        &self.outcomes
    }

    /// Number of successful retrievals.
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of failed retrievals.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns `true` if the run processed no identifiers.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// The failed outcomes, in input order.
    pub fn failures(&self) -> impl Iterator<Item = &RetrievalOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_success())
    }

    fn record(&mut self, outcome: RetrievalOutcome) {
        if outcome.status.is_success() {
            self.succeeded += 1;
        }
        self.outcomes.push(outcome);
    }
}

/// Observer invoked with each outcome as it is recorded.
pub type ProgressHook = Box<dyn Fn(&RetrievalOutcome) + Send + Sync>;

/// Sequential batch retrieval with per-item failure isolation.
///
/// Identifiers are processed strictly in input order, one at a time; each is
/// fully handled, including closing its stream, before the next begins. A
/// failed item is recorded and the run continues: `run` itself never fails,
/// and a report always carries one outcome per input identifier.
///
/// Successful streams are closed immediately after counting. The pipeline's
/// job is accounting and isolation, not payload consumption; callers that
/// need content resolve identifiers directly through [`ObjectResolver`].
pub struct BatchPipeline<'c, T> {
    resolver: ObjectResolver<'c, T>,
    progress: Option<ProgressHook>,
}

impl<'c, T: ObjectTransport> BatchPipeline<'c, T> {
    /// Build a pipeline around `resolver`.
    pub fn new(resolver: ObjectResolver<'c, T>) -> Self {
        Self {
            resolver,
            progress: None,
        }
    }

    /// Observe each outcome as it is recorded.
    pub fn with_progress(mut self, hook: impl Fn(&RetrievalOutcome) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(hook));
        self
    }

    /// Retrieve every identifier, in order, isolating per-item failures.
    pub async fn run(&self, identifiers: &[Identifier]) -> BatchReport {
        let mut report = BatchReport::default();
        for identifier in identifiers {
            let status = match self.resolver.resolve(identifier).await {
                Ok(stream) => {
                    // Close without consuming; the payload is not ours.
                    drop(stream);
                    debug!(%identifier, "object retrieved");
                    RetrievalStatus::Succeeded
                }
                Err(err) => {
                    warn!(%identifier, error = %err, "retrieval failed");
                    RetrievalStatus::Failed(err)
                }
            };
            let outcome = RetrievalOutcome {
                identifier: identifier.clone(),
                status,
            };
            if let Some(hook) = &self.progress {
                hook(&outcome);
            }
            report.record(outcome);
        }
        info!(
            total = report.len(),
            succeeded = report.succeeded(),
            "batch run complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crn_config::{ConfigSource, LayeredConfig, MapSource};
    use proptest::prelude::*;

    use super::*;
    use crate::defaults;
    use crate::memory::MemoryTransport;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<Identifier> {
        names.iter().map(|n| id(n)).collect()
    }

    fn config() -> LayeredConfig {
        LayeredConfig::new(vec![
            Box::new(MapSource::new("test").with(defaults::ENDPOINT_KEY, "mem://local"))
                as Box<dyn ConfigSource>,
        ])
    }

    fn pipeline<'c>(
        config: &'c LayeredConfig,
        transport: MemoryTransport,
    ) -> BatchPipeline<'c, MemoryTransport> {
        BatchPipeline::new(ObjectResolver::new(config, transport))
    }

    #[tokio::test]
    async fn all_objects_present() {
        let config = config();
        let transport = MemoryTransport::new();
        for name in ["a", "b", "c"] {
            transport.insert(&id(name), &b"data"[..]);
        }

        let report = pipeline(&config, transport).run(&ids(&["a", "b", "c"])).await;
        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 0);
        assert!(report.outcomes().iter().all(|o| o.status.is_success()));
    }

    #[tokio::test]
    async fn outcomes_preserve_input_order() {
        let config = config();
        let transport = MemoryTransport::new();
        transport.insert(&id("b"), &b"x"[..]);

        let report = pipeline(&config, transport).run(&ids(&["c", "b", "a"])).await;
        let recorded: Vec<&str> = report
            .outcomes()
            .iter()
            .map(|o| o.identifier.as_str())
            .collect();
        assert_eq!(recorded, ["c", "b", "a"]);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_report() {
        let config = config();
        let report = pipeline(&config, MemoryTransport::new()).run(&[]).await;
        assert!(report.is_empty());
        assert_eq!(report.succeeded(), 0);
    }

    #[tokio::test]
    async fn missing_object_does_not_stop_the_run() {
        let config = config();
        let transport = MemoryTransport::new();
        transport.insert(&id("after"), &b"x"[..]);

        let report = pipeline(&config, transport)
            .run(&ids(&["missing", "after"]))
            .await;
        assert_eq!(report.len(), 2);
        assert_eq!(report.succeeded(), 1);
        assert!(report.outcomes()[0].status.is_cache_miss());
        // The identifier after the miss was still attempted.
        assert!(report.outcomes()[1].status.is_success());
    }

    #[tokio::test]
    async fn fault_is_recorded_as_operation_failure_with_cause() {
        let config = config();
        let transport = MemoryTransport::new();
        transport.insert(&id("bad"), &b"x"[..]);
        transport.inject_fault(&id("bad"), "connection refused");
        transport.insert(&id("good"), &b"x"[..]);

        let report = pipeline(&config, transport).run(&ids(&["bad", "good"])).await;
        assert_eq!(report.succeeded(), 1);

        let outcome = &report.outcomes()[0];
        assert!(!outcome.status.is_success());
        assert!(!outcome.status.is_cache_miss());

        let mut cause: &dyn std::error::Error =
            outcome.status.error().expect("recorded error");
        while let Some(next) = cause.source() {
            cause = next;
        }
        assert_eq!(cause.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn duplicates_are_processed_independently() {
        let config = config();
        let transport = MemoryTransport::new();
        transport.insert(&id("dup"), &b"x"[..]);

        let report = pipeline(&config, transport).run(&ids(&["dup", "dup"])).await;
        assert_eq!(report.len(), 2);
        assert_eq!(report.succeeded(), 2);
    }

    #[tokio::test]
    async fn failures_iterator_skips_successes() {
        let config = config();
        let transport = MemoryTransport::new();
        transport.insert(&id("ok"), &b"x"[..]);

        let report = pipeline(&config, transport)
            .run(&ids(&["ok", "gone", "also-gone"]))
            .await;
        let failed: Vec<&str> = report
            .failures()
            .map(|o| o.identifier.as_str())
            .collect();
        assert_eq!(failed, ["gone", "also-gone"]);
    }

    #[tokio::test]
    async fn progress_hook_sees_every_outcome() {
        let config = config();
        let transport = MemoryTransport::new();
        transport.insert(&id("a"), &b"x"[..]);

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let report = pipeline(&config, transport)
            .with_progress(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .run(&ids(&["a", "b"]))
            .await;

        assert_eq!(report.len(), 2);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_endpoint_fails_every_item_without_aborting() {
        let config = LayeredConfig::empty();
        let transport = MemoryTransport::new();
        transport.insert(&id("a"), &b"x"[..]);

        let report = pipeline(&config, transport).run(&ids(&["a", "b"])).await;
        assert_eq!(report.len(), 2);
        assert_eq!(report.succeeded(), 0);
        assert!(report.outcomes().iter().all(|o| !o.status.is_cache_miss()));
    }

    proptest! {
        // One outcome per input, input order, and an exact success count,
        // for any mix of present and absent objects.
        #[test]
        fn report_accounts_for_every_identifier(
            present in proptest::collection::vec(any::<bool>(), 0..32)
        ) {
            let config = config();
            let transport = MemoryTransport::new();
            let input: Vec<Identifier> = present
                .iter()
                .enumerate()
                .map(|(i, is_present)| {
                    let identifier = id(&format!("obj-{i}"));
                    if *is_present {
                        transport.insert(&identifier, &b"data"[..]);
                    }
                    identifier
                })
                .collect();

            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            let report =
                runtime.block_on(pipeline(&config, transport).run(&input));

            prop_assert_eq!(report.len(), input.len());
            let expected = present.iter().filter(|p| **p).count();
            prop_assert_eq!(report.succeeded(), expected);
            for (i, outcome) in report.outcomes().iter().enumerate() {
                prop_assert_eq!(outcome.identifier.as_str(), format!("obj-{i}"));
                prop_assert_eq!(outcome.status.is_success(), present[i]);
            }
        }
    }
}
