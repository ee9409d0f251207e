//! Shared test doubles for processor and scheduler tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use veloxi_models::{MeshState, TaskId, TaskPhase};
use veloxi_queue::{Notifier, QueueResult};
use veloxi_render::{RenderError, RenderResult, ThumbnailRenderer};
use veloxi_rodin::{GenerationJobClient, GenerationResult, RodinError, RodinResult};
use veloxi_store::{MeshCompletion, MeshRecord, NewTexture, ResultStore, StoreError, StoreResult};

use crate::config::WorkerConfig;
use crate::download::{DownloadResult, Downloader};
use crate::processor::ProcessingContext;

/// Notifier capturing every event in order.
pub struct RecordingNotifier {
    events: Mutex<Vec<(TaskId, TaskPhase, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<(TaskId, TaskPhase, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<TaskPhase> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, phase, _)| *phase)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, task_id: &TaskId, phase: TaskPhase, message: &str) -> QueueResult<()> {
        self.events
            .lock()
            .unwrap()
            .push((task_id.clone(), phase, message.to_string()));
        Ok(())
    }
}

/// One scripted poll outcome.
#[derive(Clone)]
pub enum ScriptedPoll {
    NotReady,
    Fatal,
    Ready(GenerationResult),
}

impl ScriptedPoll {
    fn to_result(&self) -> RodinResult<GenerationResult> {
        match self {
            ScriptedPoll::NotReady => Err(RodinError::NotReady),
            ScriptedPoll::Fatal => Err(RodinError::api(500, "upstream exploded")),
            ScriptedPoll::Ready(result) => Ok(result.clone()),
        }
    }
}

/// Job client that replays a script, then repeats a fallback outcome.
pub struct ScriptedJobClient {
    script: Mutex<VecDeque<ScriptedPoll>>,
    fallback: ScriptedPoll,
}

impl ScriptedJobClient {
    pub fn script(polls: Vec<ScriptedPoll>, fallback: ScriptedPoll) -> Self {
        Self {
            script: Mutex::new(polls.into()),
            fallback,
        }
    }

    pub fn always(outcome: ScriptedPoll) -> Self {
        Self::script(Vec::new(), outcome)
    }
}

#[async_trait]
impl GenerationJobClient for ScriptedJobClient {
    async fn result(&self, _task_id: &TaskId) -> RodinResult<GenerationResult> {
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone()).to_result()
    }
}

/// In-memory result store recording every write.
pub struct MemoryStore {
    states: Mutex<Vec<(TaskId, MeshState)>>,
    completions: Mutex<Vec<(TaskId, MeshCompletion)>>,
    textures: Mutex<Vec<(String, NewTexture)>>,
    fail_complete: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(Vec::new()),
            completions: Mutex::new(Vec::new()),
            textures: Mutex::new(Vec::new()),
            fail_complete: false,
        }
    }

    pub fn failing_complete() -> Self {
        Self {
            fail_complete: true,
            ..Self::new()
        }
    }

    pub fn states(&self) -> Vec<(TaskId, MeshState)> {
        self.states.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<(TaskId, MeshCompletion)> {
        self.completions.lock().unwrap().clone()
    }

    pub fn textures(&self) -> Vec<(String, NewTexture)> {
        self.textures.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn update_state(&self, task_id: &TaskId, state: MeshState) -> StoreResult<()> {
        self.states.lock().unwrap().push((task_id.clone(), state));
        Ok(())
    }

    async fn complete(
        &self,
        task_id: &TaskId,
        completion: &MeshCompletion,
    ) -> StoreResult<MeshRecord> {
        if self.fail_complete {
            return Err(StoreError::api(503, "store unavailable"));
        }
        self.completions
            .lock()
            .unwrap()
            .push((task_id.clone(), completion.clone()));
        Ok(MeshRecord {
            id: format!("mesh-{}", task_id),
        })
    }

    async fn add_texture(&self, mesh_id: &str, texture: &NewTexture) -> StoreResult<()> {
        self.textures
            .lock()
            .unwrap()
            .push((mesh_id.to_string(), texture.clone()));
        Ok(())
    }
}

/// Downloader recording fetched URLs without touching the network.
pub struct RecordingDownloader {
    fetched: Mutex<Vec<String>>,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self {
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

#[async_trait]
impl Downloader for RecordingDownloader {
    async fn fetch(&self, url: &str, local_path: &Path) -> DownloadResult<PathBuf> {
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(local_path.to_path_buf())
    }
}

/// Renderer with a fixed outcome, counting invocations.
pub struct FakeRenderer {
    calls: AtomicU32,
    fail: bool,
}

impl FakeRenderer {
    pub fn succeeding() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThumbnailRenderer for FakeRenderer {
    async fn render(&self, _model_url: &str, _output_path: &Path) -> RenderResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(RenderError::DeadlineExceeded { secs: 30 })
        } else {
            Ok(())
        }
    }
}

/// Build a processing context around the given fakes.
pub fn test_context(
    jobs: Arc<dyn GenerationJobClient>,
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    renderer: Arc<FakeRenderer>,
    downloader: Arc<RecordingDownloader>,
) -> Arc<ProcessingContext> {
    let config = WorkerConfig::default();
    let layout = config.asset_layout();
    Arc::new(ProcessingContext {
        config,
        layout,
        jobs,
        store,
        notifier,
        renderer,
        downloader,
    })
}
