use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, RecvError, Select, Sender};
use log::{debug, info, trace, warn};

use crate::controllers::interactive::config::EngineConfig;
use crate::controllers::interactive::errors::engine::EngineError;
use crate::controllers::interactive::errors::recolour::RecolourError;
use crate::controllers::interactive::events::{RenderEvent, RenderHandle, RenderOutcome, RenderState};
use crate::controllers::interactive::ports::surface::RenderSurface;
use crate::core::actions::affine_preview::{PreviewTransform, resample};
use crate::core::actions::cancellation::{CancelToken, GenerationCounter, GenerationToken};
use crate::core::actions::colourise::{colourise_buffer, colourise_chunk};
use crate::core::actions::partition_chunks::{ChunkOptions, partition_chunks};
use crate::core::colour_mapping::registry::ColourSchemeRegistry;
use crate::core::data::fractal_params::{FractalParameters, ViewAnchor};
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::workers::chunk_worker::{ChunkPool, spawn_chunk_pool};
use crate::workers::messages::{ChunkComplete, RenderChunkRequest};
use crate::workers::pool::{TaskHandle, TaskResult};

struct CachedFrame {
    image: PixelBuffer,
    anchor: ViewAnchor,
}

struct EngineState {
    params: FractalParameters,
    fractal: FractalKind,
    scheme_name: String,
    iterations: Option<IterationBuffer>,
    cache: Option<CachedFrame>,
    status: RenderState,
    progress: f64,
    subscribers: Vec<Sender<RenderEvent>>,
}

impl EngineState {
    fn publish(&mut self, event: RenderEvent) {
        self.subscribers.retain(|subscriber| subscriber.send(event).is_ok());
    }

    fn set_progress(&mut self, generation: u64, progress: f64) {
        self.progress = progress;
        self.publish(RenderEvent::Progress { generation, progress });
    }
}

/// Everything the coordinator and the public handle share. Results are
/// applied and generations advanced only while `state` is locked, so a
/// cancel that returns has already fenced off every older result.
struct Shared {
    generation: GenerationCounter,
    registry: Arc<ColourSchemeRegistry>,
    state: Mutex<EngineState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

enum Command {
    Start(Pass),
    Cancelled,
    Shutdown,
}

enum Wake {
    Command(Result<Command, RecvError>),
    Chunk {
        index: usize,
        outcome: TaskResult<ChunkComplete>,
    },
}

enum PassStatus {
    Pending,
    Complete,
    Stale,
}

/// One render pass as seen by the coordinator.
struct Pass {
    generation: u64,
    token: GenerationToken,
    surface: Arc<dyn RenderSurface>,
    width: u32,
    height: u32,
    anchor: ViewAnchor,
    max_iterations: u32,
    total: usize,
    settled: usize,
    pending: Vec<TaskHandle<ChunkComplete>>,
    done: Sender<RenderOutcome>,
}

impl Pass {
    fn apply(&mut self, shared: &Shared, outcome: TaskResult<ChunkComplete>) -> PassStatus {
        let mut state = shared.lock();

        if self.token.is_cancelled() {
            trace!("discarding chunk from stale pass {}", self.generation);
            return PassStatus::Stale;
        }

        match outcome {
            Ok(result) => self.paint(&mut state, &shared.registry, result),
            Err(err) => warn!("chunk task failed in pass {}: {}", self.generation, err),
        }

        // failed chunks still settle so the pass can finish
        self.settled += 1;
        let progress = self.settled as f64 / self.total as f64;
        state.set_progress(self.generation, progress);

        if self.settled < self.total {
            return PassStatus::Pending;
        }

        state.status = RenderState::Complete;
        state.publish(RenderEvent::Complete {
            generation: self.generation,
        });

        info!("render pass {} complete ({} chunks)", self.generation, self.total);

        PassStatus::Complete
    }

    fn paint(&mut self, state: &mut EngineState, registry: &ColourSchemeRegistry, result: ChunkComplete) {
        let ChunkComplete {
            chunk,
            chunk_index,
            buffer,
            ..
        } = result;

        if let Some(iterations) = state.iterations.as_mut() {
            if let Err(err) = iterations.store_chunk(chunk, &buffer) {
                warn!("dropping chunk {} of pass {}: {}", chunk_index, self.generation, err);
                return;
            }
        }

        let (_, scheme) = registry.resolve(&state.scheme_name);
        let rgba = colourise_chunk(&buffer, self.max_iterations, scheme.as_ref());

        // the cache is the pass frame; previews see every chunk painted so far
        let (width, height, anchor) = (self.width, self.height, self.anchor);
        let cache = state.cache.get_or_insert_with(|| CachedFrame {
            image: PixelBuffer::new(width, height),
            anchor,
        });

        if let Err(err) = cache.image.blit(chunk, &rgba) {
            warn!("chunk {} of pass {} missed the frame: {}", chunk_index, self.generation, err);
        }

        self.surface.put_region(chunk, &rgba);
        trace!("painted chunk {} of pass {}", chunk_index, self.generation);
    }

    fn finish(self, outcome: RenderOutcome) {
        debug!("render pass {} settled: {:?}", self.generation, outcome);
        let _ = self.done.send(outcome);
    }
}

/// The render orchestrator.
///
/// Splits a surface into chunks, farms them out to a [`ChunkPool`] and
/// applies results on a single coordinator thread as they arrive, in any
/// order. Completed frames are cached for [`preview`](Self::preview) and
/// iteration counts are kept for [`apply_color_scheme`](Self::apply_color_scheme).
pub struct FractalEngine {
    shared: Arc<Shared>,
    pool: ChunkPool,
    chunk_options: ChunkOptions,
    commands: Sender<Command>,
    coordinator: Option<JoinHandle<()>>,
}

impl FractalEngine {
    /// Engine with the built-in colour schemes and a pool sized by `config`.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_registry(config, Arc::new(ColourSchemeRegistry::builtin()))
    }

    pub fn with_registry(config: EngineConfig, registry: Arc<ColourSchemeRegistry>) -> Result<Self, EngineError> {
        let pool = spawn_chunk_pool(config.worker_count())?;
        Self::with_pool(config, registry, pool)
    }

    /// Uses `pool` as is; `config.workers` is ignored.
    pub fn with_pool(
        config: EngineConfig,
        registry: Arc<ColourSchemeRegistry>,
        pool: ChunkPool,
    ) -> Result<Self, EngineError> {
        let scheme_name = registry.resolve(&config.default_scheme).0.to_string();

        let shared = Arc::new(Shared {
            generation: GenerationCounter::new(),
            registry,
            state: Mutex::new(EngineState {
                params: FractalParameters::default(),
                fractal: config.fractal,
                scheme_name,
                iterations: None,
                cache: None,
                status: RenderState::Idle,
                progress: 0.0,
                subscribers: Vec::new(),
            }),
        });

        let (commands, command_rx) = channel::unbounded();
        let coordinator_shared = Arc::clone(&shared);

        let coordinator = thread::Builder::new()
            .name("render-coordinator".to_string())
            .spawn(move || coordinate(&coordinator_shared, &command_rx))
            .map_err(EngineError::Spawn)?;

        Ok(Self {
            shared,
            pool,
            chunk_options: config.chunks,
            commands,
            coordinator: Some(coordinator),
        })
    }

    /// Starts a new pass over the whole surface, superseding any pass in
    /// flight. Every chunk is dispatched before this returns.
    pub fn render(&self, surface: Arc<dyn RenderSurface>) -> RenderHandle {
        let Some((width, height)) = surface_size(surface.as_ref()) else {
            let generation = self.cancel();
            debug!("render skipped: surface has no size");
            return RenderHandle::settled(generation, RenderOutcome::Skipped);
        };

        let (done, outcome) = channel::bounded(1);
        let mut state = self.shared.lock();

        let previous = self.shared.generation.current();
        let generation = self.shared.generation.advance();

        if state.status == RenderState::Rendering {
            state.publish(RenderEvent::Cancelled { generation: previous });
        }

        let params = state.params;
        let fractal = state.fractal;

        state.iterations = Some(IterationBuffer::new(width, height, &params));
        state.cache = None;
        state.status = RenderState::Rendering;
        state.set_progress(generation, 0.0);

        let chunks = partition_chunks(width, height, self.chunk_options);
        let pending: Vec<_> = chunks
            .iter()
            .enumerate()
            .map(|(chunk_index, &chunk)| {
                self.pool.execute_with(|task_id| RenderChunkRequest {
                    chunk,
                    parameters: params,
                    canvas_width: width,
                    canvas_height: height,
                    chunk_index,
                    task_id,
                    fractal,
                })
            })
            .collect();

        debug!(
            "render pass {} started: {}x{} in {} chunks",
            generation,
            width,
            height,
            pending.len()
        );

        let pass = Pass {
            generation,
            token: self.shared.generation.token(generation),
            surface,
            width,
            height,
            anchor: params.anchor(),
            max_iterations: params.max_iterations(),
            total: pending.len(),
            settled: 0,
            pending,
            done,
        };

        // Sent under the lock so passes reach the coordinator in generation
        // order.
        if self.commands.send(Command::Start(pass)).is_err() {
            warn!("render coordinator is gone; pass {} dropped", generation);
        }

        drop(state);

        RenderHandle::new(generation, outcome)
    }

    /// Discards every result still in flight and publishes progress `0`.
    ///
    /// Workers finish the chunk they are on; their results are ignored.
    pub fn cancel_rendering(&self) {
        self.cancel();
    }

    fn cancel(&self) -> u64 {
        let mut state = self.shared.lock();

        let previous = self.shared.generation.current();
        let generation = self.shared.generation.advance();

        if state.status == RenderState::Rendering {
            state.status = RenderState::Cancelled;
            state.publish(RenderEvent::Cancelled { generation: previous });
            debug!("render pass {} cancelled", previous);
        }

        state.set_progress(generation, 0.0);
        drop(state);

        let _ = self.commands.send(Command::Cancelled);

        generation
    }

    /// Cancels any pass in flight and paints the cached frame transformed to
    /// the current parameters and surface size. The cache holds whatever the
    /// latest pass painted, complete or not.
    ///
    /// Returns `false` without painting when the latest pass has not painted
    /// a chunk yet or the surface has no size.
    pub fn preview(&self, surface: &dyn RenderSurface) -> bool {
        self.cancel();

        let Some((width, height)) = surface_size(surface) else {
            return false;
        };

        let state = self.shared.lock();

        let Some(cache) = &state.cache else {
            debug!("preview skipped: no cached frame");
            return false;
        };

        let transform = PreviewTransform::between(
            cache.image.width(),
            cache.image.height(),
            cache.anchor,
            width,
            height,
            &state.params,
        );
        let image = resample(&cache.image, width, height, &transform);
        drop(state);

        surface.put_frame(&image);

        true
    }

    /// Recolours the stored iteration counts with `scheme_name` and repaints
    /// the whole surface. The counts themselves are left untouched.
    pub fn apply_color_scheme(&self, scheme_name: &str, surface: &dyn RenderSurface) -> Result<(), RecolourError> {
        let scheme = self
            .shared
            .registry
            .get(scheme_name)
            .ok_or_else(|| RecolourError::UnknownScheme(scheme_name.to_string()))?;

        if surface_size(surface).is_none() {
            return Err(RecolourError::NoSurface);
        }

        let mut state = self.shared.lock();

        let Some(iterations) = &state.iterations else {
            return Err(RecolourError::NoIterationData);
        };

        let image = colourise_buffer(iterations, scheme.as_ref());
        let anchor = iterations.anchor();

        surface.put_frame(&image);

        state.scheme_name = scheme_name.to_string();
        state.cache = Some(CachedFrame { image, anchor });

        Ok(())
    }

    /// Selects the scheme for future passes without repainting.
    pub fn set_color_scheme(&self, scheme_name: &str) -> Result<(), RecolourError> {
        if !self.shared.registry.contains(scheme_name) {
            return Err(RecolourError::UnknownScheme(scheme_name.to_string()));
        }

        self.shared.lock().scheme_name = scheme_name.to_string();

        Ok(())
    }

    /// Takes effect on the next render or preview.
    pub fn set_parameters(&self, params: FractalParameters) {
        self.shared.lock().params = params;
    }

    #[must_use]
    pub fn parameters(&self) -> FractalParameters {
        self.shared.lock().params
    }

    #[must_use]
    pub fn fractal(&self) -> FractalKind {
        self.shared.lock().fractal
    }

    #[must_use]
    pub fn color_scheme(&self) -> String {
        self.shared.lock().scheme_name.clone()
    }

    /// Last published progress ratio.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.shared.lock().progress
    }

    #[must_use]
    pub fn state(&self) -> RenderState {
        self.shared.lock().status
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.shared.generation.current()
    }

    /// Copy of the current iteration buffer.
    #[must_use]
    pub fn iteration_buffer(&self) -> Option<IterationBuffer> {
        self.shared.lock().iterations.clone()
    }

    /// View the cached preview frame was rendered at. Cleared when a pass
    /// starts and set again by its first chunk.
    #[must_use]
    pub fn cached_anchor(&self) -> Option<ViewAnchor> {
        self.shared.lock().cache.as_ref().map(|cache| cache.anchor)
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ColourSchemeRegistry> {
        &self.shared.registry
    }

    /// A new stream of [`RenderEvent`]s. Each subscriber sees every event.
    pub fn subscribe(&self) -> Receiver<RenderEvent> {
        let (sender, receiver) = channel::unbounded();
        self.shared.lock().subscribers.push(sender);
        receiver
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    /// Blocks until every pool worker has started.
    pub fn wait_for_workers(&self) {
        self.pool.wait_for_init();
    }

    pub fn shutdown(&mut self) {
        let _ = self.commands.send(Command::Shutdown);

        if let Some(coordinator) = self.coordinator.take() {
            let _ = coordinator.join();
        }
    }
}

impl Drop for FractalEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn surface_size(surface: &dyn RenderSurface) -> Option<(u32, u32)> {
    surface.size().filter(|&(width, height)| width > 0 && height > 0)
}

fn coordinate(shared: &Shared, commands: &Receiver<Command>) {
    let mut active: Option<Pass> = None;

    loop {
        match next_wake(commands, active.as_ref()) {
            Wake::Command(Ok(Command::Start(pass))) => {
                if let Some(superseded) = active.replace(pass) {
                    superseded.finish(RenderOutcome::Cancelled);
                }
            }
            Wake::Command(Ok(Command::Cancelled)) => {
                if active.as_ref().is_some_and(|pass| pass.token.is_cancelled()) {
                    if let Some(pass) = active.take() {
                        pass.finish(RenderOutcome::Cancelled);
                    }
                }
            }
            Wake::Command(Ok(Command::Shutdown) | Err(_)) => {
                if let Some(pass) = active.take() {
                    pass.finish(RenderOutcome::Cancelled);
                }
                return;
            }
            Wake::Chunk { index, outcome } => {
                let Some(mut pass) = active.take() else {
                    continue;
                };

                pass.pending.swap_remove(index);

                match pass.apply(shared, outcome) {
                    PassStatus::Pending => active = Some(pass),
                    PassStatus::Complete => pass.finish(RenderOutcome::Complete),
                    PassStatus::Stale => pass.finish(RenderOutcome::Cancelled),
                }
            }
        }
    }
}

fn next_wake(commands: &Receiver<Command>, pass: Option<&Pass>) -> Wake {
    let handles: &[TaskHandle<ChunkComplete>] = match pass {
        Some(pass) => &pass.pending,
        None => &[],
    };

    let mut select = Select::new();
    select.recv(commands);
    for handle in handles {
        select.recv(handle.receiver());
    }

    let operation = select.select();

    match operation.index() {
        0 => Wake::Command(operation.recv(commands)),
        index => Wake::Chunk {
            index: index - 1,
            outcome: handles[index - 1].complete(operation),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::core::data::complex::Complex;
    use crate::core::data::render_chunk::RenderChunk;
    use crate::workers::chunk_worker::render_chunk;
    use crate::workers::pool::WorkerPool;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[derive(Default)]
    struct MockSurface {
        size: Option<(u32, u32)>,
        regions: Mutex<Vec<RenderChunk>>,
        frames: Mutex<Vec<PixelBuffer>>,
    }

    impl MockSurface {
        fn sized(width: u32, height: u32) -> Arc<Self> {
            Arc::new(Self {
                size: Some((width, height)),
                ..Self::default()
            })
        }

        fn regions(&self) -> Vec<RenderChunk> {
            self.regions.lock().unwrap().clone()
        }

        fn frames(&self) -> Vec<PixelBuffer> {
            self.frames.lock().unwrap().clone()
        }
    }

    impl RenderSurface for MockSurface {
        fn size(&self) -> Option<(u32, u32)> {
            self.size
        }

        fn put_region(&self, chunk: RenderChunk, _rgba: &[u8]) {
            self.regions.lock().unwrap().push(chunk);
        }

        fn put_frame(&self, frame: &PixelBuffer) {
            self.frames.lock().unwrap().push(frame.clone());
        }
    }

    fn config() -> EngineConfig {
        EngineConfig {
            workers: Some(2),
            ..EngineConfig::default()
        }
    }

    fn engine() -> FractalEngine {
        FractalEngine::new(config()).unwrap()
    }

    /// Engine whose workers each wait for one message on the returned sender,
    /// or for the sender to be dropped, before rendering a chunk.
    fn gated_engine() -> (FractalEngine, Sender<()>) {
        let (release, gate) = channel::bounded::<()>(0);
        let pool = WorkerPool::new("gated", 2, move |request: RenderChunkRequest| {
            let _ = gate.recv_timeout(TIMEOUT);
            render_chunk(request)
        })
        .unwrap();
        let engine =
            FractalEngine::with_pool(config(), Arc::new(ColourSchemeRegistry::builtin()), pool).unwrap();

        (engine, release)
    }

    fn drain(events: &Receiver<RenderEvent>) -> Vec<RenderEvent> {
        events.try_iter().collect()
    }

    fn wait_until(mut done: impl FnMut() -> bool) {
        let deadline = Instant::now() + TIMEOUT;
        while !done() {
            assert!(Instant::now() < deadline, "condition not reached in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn release_chunks(release: &Sender<()>, count: usize) {
        for _ in 0..count {
            release.send(()).unwrap();
        }
    }

    #[test]
    fn test_render_completes_and_paints_every_chunk() {
        let engine = engine();
        let surface = MockSurface::sized(64, 48);

        let outcome = engine.render(surface.clone()).wait();

        assert_eq!(outcome, RenderOutcome::Complete);
        assert_eq!(engine.state(), RenderState::Complete);
        assert_eq!(engine.progress(), 1.0);

        let mut expected = partition_chunks(64, 48, ChunkOptions::default());
        let mut painted = surface.regions();
        expected.sort_by_key(|chunk| (chunk.start_y(), chunk.start_x()));
        painted.sort_by_key(|chunk| (chunk.start_y(), chunk.start_x()));
        assert_eq!(painted, expected);
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_one() {
        let engine = engine();
        let events = engine.subscribe();

        let handle = engine.render(MockSurface::sized(120, 80));
        let generation = handle.generation();
        assert_eq!(handle.wait(), RenderOutcome::Complete);

        let progress: Vec<f64> = drain(&events)
            .into_iter()
            .filter_map(|event| match event {
                RenderEvent::Progress { generation: g, progress } if g == generation => Some(progress),
                _ => None,
            })
            .collect();

        assert_eq!(progress.first(), Some(&0.0));
        assert_eq!(progress.last(), Some(&1.0));
        assert!(progress.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_complete_event_follows_final_progress() {
        let engine = engine();
        let events = engine.subscribe();

        let handle = engine.render(MockSurface::sized(30, 30));
        let generation = handle.generation();
        handle.wait();

        let received = drain(&events);
        let tail = &received[received.len() - 2..];
        assert_eq!(
            tail,
            &[
                RenderEvent::Progress { generation, progress: 1.0 },
                RenderEvent::Complete { generation }
            ]
        );
    }

    #[test]
    fn test_every_subscriber_sees_events() {
        let engine = engine();
        let first = engine.subscribe();
        let second = engine.subscribe();

        engine.render(MockSurface::sized(20, 20)).wait();

        assert_eq!(drain(&first), drain(&second));
    }

    #[test]
    fn test_zero_sized_surface_is_skipped() {
        let engine = engine();
        let surface = MockSurface::sized(0, 10);

        assert_eq!(engine.render(surface.clone()).wait(), RenderOutcome::Skipped);
        assert!(surface.regions().is_empty());
        assert!(engine.iteration_buffer().is_none());
    }

    #[test]
    fn test_missing_surface_is_skipped() {
        let engine = engine();

        assert_eq!(engine.render(Arc::new(MockSurface::default())).wait(), RenderOutcome::Skipped);
    }

    #[test]
    fn test_cancel_discards_late_results() {
        let (engine, release) = gated_engine();
        let events = engine.subscribe();
        let surface = MockSurface::sized(100, 100);

        let handle = engine.render(surface.clone());
        engine.cancel_rendering();

        assert_eq!(handle.wait_timeout(TIMEOUT), Some(RenderOutcome::Cancelled));
        assert_eq!(engine.state(), RenderState::Cancelled);
        assert_eq!(engine.progress(), 0.0);

        drop(release);
        thread::sleep(Duration::from_millis(200));

        let iterations = engine.iteration_buffer().unwrap();
        assert!(iterations.data().iter().all(|&value| value == 0));
        assert!(surface.regions().is_empty());

        let received = drain(&events);
        let cancelled_at = received
            .iter()
            .position(|event| matches!(event, RenderEvent::Cancelled { .. }))
            .unwrap();
        assert!(matches!(received[cancelled_at + 1], RenderEvent::Progress { progress, .. } if progress == 0.0));
    }

    #[test]
    fn test_new_render_supersedes_previous_pass() {
        let (engine, release) = gated_engine();
        let surface = MockSurface::sized(50, 50);

        let first = engine.render(surface.clone());
        let second = engine.render(surface.clone());
        drop(release);

        assert_eq!(first.wait_timeout(TIMEOUT), Some(RenderOutcome::Cancelled));
        assert_eq!(second.wait_timeout(TIMEOUT), Some(RenderOutcome::Complete));
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_failed_chunk_still_completes_pass() {
        let pool = WorkerPool::new("flaky", 2, |request: RenderChunkRequest| {
            if request.chunk_index == 0 {
                Err("worker crashed".to_string())
            } else {
                render_chunk(request).map_err(|err| err.to_string())
            }
        })
        .unwrap();
        let engine =
            FractalEngine::with_pool(config(), Arc::new(ColourSchemeRegistry::builtin()), pool).unwrap();
        let surface = MockSurface::sized(100, 100);

        assert_eq!(engine.render(surface.clone()).wait(), RenderOutcome::Complete);
        assert_eq!(engine.progress(), 1.0);

        let skipped = partition_chunks(100, 100, ChunkOptions::default())[0];
        assert!(!surface.regions().contains(&skipped));

        let iterations = engine.iteration_buffer().unwrap();
        assert_eq!(iterations.get(skipped.start_x(), skipped.start_y()), Some(0));
    }

    #[test]
    fn test_preview_without_cache_is_noop() {
        let engine = engine();
        let surface = MockSurface::sized(40, 40);

        assert!(!engine.preview(surface.as_ref()));
        assert!(surface.frames().is_empty());
    }

    #[test]
    fn test_preview_paints_transformed_cache() {
        let engine = engine();
        let surface = MockSurface::sized(40, 30);
        engine.render(surface.clone()).wait();

        engine.set_parameters(FractalParameters::new(250, 2.0, Complex::new(-1.0, 0.0)).unwrap());
        let target = MockSurface::sized(80, 60);

        assert!(engine.preview(target.as_ref()));

        let frames = target.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!((frames[0].width(), frames[0].height()), (80, 60));
        assert_eq!(engine.cached_anchor().map(|anchor| anchor.zoom), Some(1.0));
    }

    #[test]
    fn test_preview_cancels_in_flight_render() {
        let (engine, release) = gated_engine();
        let handle = engine.render(MockSurface::sized(30, 30));

        assert!(!engine.preview(MockSurface::sized(30, 30).as_ref()));
        assert_eq!(handle.wait_timeout(TIMEOUT), Some(RenderOutcome::Cancelled));

        drop(release);
    }

    #[test]
    fn test_apply_color_scheme_requires_iteration_data() {
        let engine = engine();
        let surface = MockSurface::sized(10, 10);

        assert_eq!(
            engine.apply_color_scheme("Fire Palette", surface.as_ref()),
            Err(RecolourError::NoIterationData)
        );
    }

    #[test]
    fn test_apply_color_scheme_rejects_unknown_scheme() {
        let engine = engine();
        let surface = MockSurface::sized(10, 10);
        engine.render(surface.clone()).wait();

        assert_eq!(
            engine.apply_color_scheme("No Such Scheme", surface.as_ref()),
            Err(RecolourError::UnknownScheme("No Such Scheme".to_string()))
        );
        assert_eq!(engine.color_scheme(), "Fire Palette");
    }

    #[test]
    fn test_apply_color_scheme_is_idempotent_and_keeps_counts() {
        let engine = engine();
        let surface = MockSurface::sized(32, 24);
        engine.render(surface.clone()).wait();
        let before = engine.iteration_buffer().unwrap();

        engine.apply_color_scheme("Ocean Depths", surface.as_ref()).unwrap();
        engine.apply_color_scheme("Ocean Depths", surface.as_ref()).unwrap();

        let frames = surface.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frames[1]);
        assert_eq!(engine.iteration_buffer().unwrap(), before);
        assert_eq!(engine.color_scheme(), "Ocean Depths");
    }

    #[test]
    fn test_set_color_scheme_validates_name() {
        let engine = engine();

        assert!(engine.set_color_scheme("Neon Nights").is_ok());
        assert_eq!(engine.color_scheme(), "Neon Nights");
        assert!(engine.set_color_scheme("nope").is_err());
        assert_eq!(engine.color_scheme(), "Neon Nights");
    }

    #[test]
    fn test_unknown_default_scheme_falls_back() {
        let engine = FractalEngine::new(EngineConfig {
            default_scheme: "missing".to_string(),
            ..config()
        })
        .unwrap();

        assert_eq!(engine.color_scheme(), "Fire Palette");
    }

    #[test]
    fn test_new_pass_clears_cache_and_refills_it_per_chunk() {
        let (engine, release) = gated_engine();
        let first = MockSurface::sized(100, 100);

        let handle = engine.render(first.clone());
        release_chunks(&release, partition_chunks(100, 100, ChunkOptions::default()).len());
        assert_eq!(handle.wait_timeout(TIMEOUT), Some(RenderOutcome::Complete));
        assert_eq!(engine.cached_anchor(), Some(FractalParameters::default().anchor()));

        let params = FractalParameters::new(250, 2.0, Complex::new(-0.5, 0.0)).unwrap();
        engine.set_parameters(params);
        let second = MockSurface::sized(100, 100);
        let handle = engine.render(second.clone());

        assert_eq!(engine.cached_anchor(), None);

        release_chunks(&release, 1);
        wait_until(|| second.regions().len() == 1);
        assert_eq!(engine.cached_anchor(), Some(params.anchor()));

        engine.cancel_rendering();
        assert_eq!(handle.wait_timeout(TIMEOUT), Some(RenderOutcome::Cancelled));

        let target = MockSurface::sized(100, 100);
        assert!(engine.preview(target.as_ref()));

        let painted = second.regions()[0];
        let frame = &target.frames()[0];
        assert_eq!(frame.pixel(painted.start_x(), painted.start_y()).map(|p| p[3]), Some(255));
        assert!(!painted.contains_point(0, 0));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));

        drop(release);
    }

    #[test]
    fn test_recolour_mid_pass_leaves_a_single_scheme_in_the_cache() {
        let (engine, release) = gated_engine();
        let surface = MockSurface::sized(100, 100);

        let handle = engine.render(surface.clone());
        release_chunks(&release, 1);
        wait_until(|| surface.regions().len() == 1);

        engine.apply_color_scheme("Ocean Depths", surface.as_ref()).unwrap();
        drop(release);
        assert_eq!(handle.wait_timeout(TIMEOUT), Some(RenderOutcome::Complete));

        let target = MockSurface::sized(100, 100);
        assert!(engine.preview(target.as_ref()));

        let scheme = engine.registry().get("Ocean Depths").unwrap();
        let expected = colourise_buffer(&engine.iteration_buffer().unwrap(), scheme.as_ref());
        assert_eq!(target.frames()[0], expected);
    }

    #[test]
    fn test_apply_color_scheme_rejects_zero_sized_surface() {
        let engine = engine();
        let surface = MockSurface::sized(10, 10);
        engine.render(surface.clone()).wait();

        let empty = MockSurface::sized(0, 0);
        assert_eq!(
            engine.apply_color_scheme("Ocean Depths", empty.as_ref()),
            Err(RecolourError::NoSurface)
        );
        assert!(empty.frames().is_empty());
        assert_eq!(engine.color_scheme(), "Fire Palette");
    }

    #[test]
    fn test_render_uses_parameter_snapshot() {
        let (engine, release) = gated_engine();
        let handle = engine.render(MockSurface::sized(20, 20));

        engine.set_parameters(FractalParameters::new(5, 3.0, Complex::new(0.3, 0.3)).unwrap());
        drop(release);

        assert_eq!(handle.wait_timeout(TIMEOUT), Some(RenderOutcome::Complete));
        let iterations = engine.iteration_buffer().unwrap();
        assert_eq!(iterations.max_iterations(), 250);
        assert_eq!(iterations.get(10, 10), Some(250));
    }
}
