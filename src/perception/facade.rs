use log::{debug, info, warn};

use crate::browser::driver::SnapshotSource;
use crate::element::element_model::Element;
use crate::element::store::ElementStore;
use crate::error::PerceptionError;
use crate::perception::PerceptionConfig;
use crate::perception::format::render_lines;
use crate::perception::observation::{ChangeSummary, Observation};
use crate::reconcile::reconciler::{Reconciliation, reconcile, renumber};
use crate::snapshot::parse_candidates;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{TraceEvent, TraceKind, snapshot_fingerprint};

/// One browsing session's view of the page.
///
/// Owns the element store and the driver handle. Calls must be serialized:
/// every `take_snapshot`/`observe` rewrites the whole store.
pub struct Perception<D> {
    driver: D,
    store: ElementStore,
    config: PerceptionConfig,
    tracer: TraceLogger,
    step: u64,
}

impl<D> Perception<D> {
    pub fn new(driver: D, config: PerceptionConfig) -> Result<Self, PerceptionError> {
        config.thresholds.validate()?;

        let tracer = TraceLogger::open(config.trace_path.as_deref());

        Ok(Perception {
            driver,
            store: ElementStore::new(),
            config,
            tracer,
            step: 0,
        })
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn element(&self, id: &str) -> Result<&Element, PerceptionError> {
        self.store.get(id)
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub(crate) fn trace(&self, event: &TraceEvent) {
        self.tracer.log(event);
    }

    pub(crate) fn next_step(&mut self) -> u64 {
        self.step += 1;
        self.step
    }

    /// Match a raw snapshot against the current store without touching it.
    pub fn reconcile_text(&self, raw: &str) -> Reconciliation {
        let candidates = parse_candidates(raw, &self.config.parse);
        reconcile(
            &self.store.all(),
            self.store.high_water(),
            candidates,
            &self.config.thresholds,
        )
    }

    /// Full reset from a raw snapshot: ids `1..N` in document order.
    pub fn apply_snapshot(&mut self, raw: &str) -> Observation {
        let step = self.next_step();
        let candidates = parse_candidates(raw, &self.config.parse);
        let (elements, _) = renumber(candidates);

        self.store.reset(elements.iter().cloned());
        info!("snapshot: {} elements", elements.len());

        self.trace(
            &TraceEvent::now(step, TraceKind::Snapshot)
                .with_fingerprint(snapshot_fingerprint(raw))
                .with_elements(elements.len()),
        );

        Observation::Snapshot {
            lines: self.render(&elements),
        }
    }

    /// Reconcile a raw snapshot against the store and commit the result.
    pub fn apply_observation(&mut self, raw: &str) -> Observation {
        let step = self.next_step();
        let result = self.reconcile_text(raw);
        result.commit(&mut self.store);

        self.trace(
            &TraceEvent::now(step, TraceKind::Observe)
                .with_fingerprint(snapshot_fingerprint(raw))
                .with_reconciliation(&result),
        );

        let summary = ChangeSummary::from(&result);

        if result.is_navigation() {
            info!(
                "navigation detected (stability {:.2}); ids reset to 1..{}",
                result.stability,
                result.elements.len()
            );
            return Observation::Navigation {
                summary,
                lines: self.render(&result.elements),
            };
        }

        debug!(
            "incremental update: {} updated, {} new, {} removed",
            summary.updated_ids.len(),
            summary.new_ids.len(),
            summary.removed_ids.len()
        );

        let new_elements: Vec<Element> = result
            .new_ids
            .iter()
            .filter_map(|id| self.store.get(id).ok().cloned())
            .collect();

        Observation::Incremental {
            summary,
            new_lines: self.render(&new_elements),
        }
    }

    fn render(&self, elements: &[Element]) -> Vec<String> {
        render_lines(
            elements,
            self.config.compress_options,
            self.config.max_label_chars,
        )
    }

    fn driver_failure(&mut self, kind: TraceKind, reason: String) -> Observation {
        let step = self.next_step();
        warn!("snapshot fetch failed: {reason}");
        self.trace(&TraceEvent::now(step, kind).with_error(&reason));
        Observation::Error { reason }
    }
}

impl<D: SnapshotSource> Perception<D> {
    /// Fetch the page and rebuild the store from scratch.
    pub fn take_snapshot(&mut self) -> Observation {
        match self.driver.aria_snapshot() {
            Ok(raw) => self.apply_snapshot(&raw),
            Err(e) => self.driver_failure(TraceKind::Snapshot, e.to_string()),
        }
    }

    /// Fetch the page and reconcile it against what the agent saw last.
    pub fn observe(&mut self) -> Observation {
        match self.driver.aria_snapshot() {
            Ok(raw) => self.apply_observation(&raw),
            Err(e) => self.driver_failure(TraceKind::Observe, e.to_string()),
        }
    }
}
