use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::bail;
use cb_core::cookbook::{CookbookDesign, CookbookPatch};
use cb_core::progress::{DEFAULT_EXPECTED_DURATION, FACT_INTERVAL, TICK_INTERVAL};
use cb_core::{
    AppConfig, Cookbook, CookbookGenerator, CookbookStatus, CookbookStore, GenerationRequest, GenerationResponse,
    ProgressMode, ProgressSimulator, RepeatingTimer,
};
use indicatif::ProgressDrawTarget;
use log::{debug, info, warn};
use rand::Rng;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;

use crate::ui::LoadingView;
use crate::worker::{GenerationWorker, WorkerResponse};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick,
    RotateFact,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(String),
    Failed(String),
    Cancelled,
}

/// Everything that lives exactly as long as one generation
struct GenerationSession {
    cookbook_id: String,
    simulator: ProgressSimulator,
    view: LoadingView,
    tick_timer: Option<RepeatingTimer>,
    _fact_timer: RepeatingTimer,
}

pub struct AppState {
    pub config: AppConfig,
    pub store: CookbookStore,

    worker: GenerationWorker,
    session: Option<GenerationSession>,

    timer_tx: UnboundedSender<TimerEvent>,
    timer_rx: UnboundedReceiver<TimerEvent>,
    clock: Instant,
    show_output: bool,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn start_timer(tx: &UnboundedSender<TimerEvent>, name: &'static str, period: Duration, event: TimerEvent) -> RepeatingTimer {
    let tx = tx.clone();
    RepeatingTimer::start(name, period, move || {
        let _ = tx.send(event);
    })
}

impl AppState {
    pub fn new(config: AppConfig, store: CookbookStore, generator: Arc<dyn CookbookGenerator>) -> Self {
        let (timer_tx, timer_rx) = unbounded_channel();

        Self {
            config,
            store,
            worker: GenerationWorker::new(generator),
            session: None,
            timer_tx,
            timer_rx,
            clock: Instant::now(),
            show_output: true,
        }
    }

    /// Keeps the loading view off the terminal.
    pub fn with_hidden_output(mut self) -> Self {
        self.show_output = false;
        self
    }

    fn now_secs(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    pub fn is_generating(&self) -> bool {
        self.session.is_some()
    }

    /// Creates the draft cookbook, hands the request to the worker and starts the
    /// loading screen timers. Must be called from within the tokio runtime.
    pub fn start_generation(&mut self, request: GenerationRequest, design: CookbookDesign) -> anyhow::Result<String> {
        if self.session.is_some() {
            bail!("A generation is already in progress");
        }

        // Events queued by a previous session's timers belong to that session
        while self.timer_rx.try_recv().is_ok() {}

        let now = unix_now();
        let id = format!("cb-{}-{}", now, self.store.cookbooks.len());
        let mut cookbook = Cookbook::draft(id.clone(), &request, now);
        cookbook.status = CookbookStatus::Generating;
        cookbook.design = design;
        self.store.add_cookbook(cookbook.clone());
        self.store.set_current(Some(cookbook));
        self.store.set_generating(true, "Generating your cookbook...");

        // An untouched default adapts to the requested length
        let mut loading = self.config.loading.clone();
        if loading.expected_duration == DEFAULT_EXPECTED_DURATION {
            loading.expected_duration = self.worker.estimated_time(&request).as_secs_f64();
        }

        let simulator = ProgressSimulator::from_config(&loading, self.config.reset_policy)
            .started_at(self.now_secs());
        let fact_index = rand::rng().random_range(0..simulator.facts().len());
        let simulator = simulator.with_fact_index(fact_index);

        let target = if self.show_output {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let view = LoadingView::new(loading.variant, loading.current_message.clone(), target);

        let tick_timer = (simulator.mode() == ProgressMode::Simulated)
            .then(|| start_timer(&self.timer_tx, "progress-tick", TICK_INTERVAL, TimerEvent::Tick));
        let fact_timer = start_timer(&self.timer_tx, "fact-rotation", FACT_INTERVAL, TimerEvent::RotateFact);

        info!(
            "Generating \"{}\" (expected ~{:.0}s)",
            request.title,
            simulator.expected_duration()
        );

        self.session = Some(GenerationSession {
            cookbook_id: id.clone(),
            simulator,
            view,
            tick_timer,
            _fact_timer: fact_timer,
        });

        if let Err(e) = self.worker.send_request(request) {
            self.finish(Err(e.clone()));
            bail!(e);
        }

        self.render();
        Ok(id)
    }

    /// Drives timers and worker responses until the generation ends.
    pub async fn run_until_complete(&mut self) -> anyhow::Result<SessionOutcome> {
        if self.session.is_none() {
            bail!("No generation in progress");
        }

        loop {
            tokio::select! {
                Some(event) = self.timer_rx.recv() => self.handle_timer_event(event),
                response = self.worker.response_rx.recv() => {
                    let Some(response) = response else {
                        bail!("Generation worker stopped unexpectedly");
                    };
                    if let Some(outcome) = self.handle_worker_response(response) {
                        return Ok(outcome);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    return Ok(self.cancel());
                }
            }
        }
    }

    pub fn handle_timer_event(&mut self, event: TimerEvent) {
        let now = self.now_secs();
        // Ticks queued before the session ended are dropped
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match event {
            TimerEvent::Tick => session.simulator.tick(now),
            TimerEvent::RotateFact => session.simulator.rotate_fact(),
        }
        self.render();
    }

    pub fn handle_worker_response(&mut self, response: WorkerResponse) -> Option<SessionOutcome> {
        match response {
            WorkerResponse::Progress(p) => {
                self.store.set_progress(p);
                if let Some(session) = self.session.as_mut() {
                    session.simulator.set_real_progress(p);
                    Self::sync_tick_timer(session, &self.timer_tx);
                }
                self.render();
                None
            }
            WorkerResponse::Status(s) => {
                debug!("Service: {}", s);
                self.store.generation_message = s;
                self.render();
                None
            }
            WorkerResponse::Success(response) => {
                if self.session.is_none() {
                    debug!("Ignoring result for a finished session");
                    return None;
                }
                Some(self.finish(Ok(response)))
            }
            WorkerResponse::Error(e) => {
                if self.session.is_none() {
                    debug!("Ignoring error for a finished session: {}", e);
                    return None;
                }
                Some(self.finish(Err(e)))
            }
        }
    }

    /// The progress tick timer only runs while the curve is in charge.
    fn sync_tick_timer(session: &mut GenerationSession, tx: &UnboundedSender<TimerEvent>) {
        match (session.simulator.mode(), session.tick_timer.is_some()) {
            (ProgressMode::Real, true) => {
                session.tick_timer = None;
            }
            (ProgressMode::Simulated, false) => {
                session.tick_timer = Some(start_timer(tx, "progress-tick", TICK_INTERVAL, TimerEvent::Tick));
            }
            _ => {}
        }
    }

    pub fn cancel(&mut self) -> SessionOutcome {
        info!("Cancelling generation");
        self.worker.cancel();
        self.finish(Err("Generation cancelled".into()));
        SessionOutcome::Cancelled
    }

    fn render(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let operation = self
            .config
            .loading
            .current_operation
            .as_deref()
            .or(Some(self.store.generation_message.as_str()));
        session.view.render(&session.simulator, operation);
    }

    /// Ends the session: timers stop when it is dropped here.
    fn finish(&mut self, result: Result<GenerationResponse, String>) -> SessionOutcome {
        let Some(session) = self.session.take() else {
            return SessionOutcome::Cancelled;
        };
        let id = session.cookbook_id.clone();
        let now = unix_now();

        let outcome = match result {
            Ok(response) => {
                if let Some(mut cookbook) = self.store.get(&id).cloned() {
                    cookbook.apply_response(&response, now);
                    session.view.finish_ok(&format!(
                        "\"{}\" is ready ({} words)",
                        cookbook.title, cookbook.word_count
                    ));
                    if let Err(e) = self.store.replace_cookbook(cookbook.clone()) {
                        warn!("Could not store generated cookbook: {}", e);
                    }
                    self.store.set_current(Some(cookbook));
                }
                self.store.set_progress(100.0);
                self.store.set_generating(false, "Complete");
                SessionOutcome::Completed(id.clone())
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                session.view.finish_err(&e);
                if let Err(err) = self
                    .store
                    .update_cookbook(&id, &CookbookPatch::status(CookbookStatus::Error), now)
                {
                    warn!("Could not mark cookbook failed: {}", err);
                }
                self.store.set_generating(false, e.clone());
                SessionOutcome::Failed(e)
            }
        };

        drop(session);

        if let Err(e) = self.store.save(&self.config.store_path) {
            warn!("Failed to save cookbooks to {}: {}", self.config.store_path.display(), e);
        }
        outcome
    }
}
