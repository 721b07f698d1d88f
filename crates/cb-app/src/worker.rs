use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cb_core::{CookbookGenerator, Error, GenerationRequest, GenerationResponse, ProgressCallback};
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub enum WorkerCommand {
    Generate(GenerationRequest),
    Shutdown,
}

#[derive(Debug)]
pub enum WorkerResponse {
    Success(GenerationResponse),
    Error(String),
    /// Authoritative progress, 0-100
    Progress(f64),
    Status(String),
}

pub struct GenerationWorker {
    generator: Arc<dyn CookbookGenerator>,
    command_tx: Sender<WorkerCommand>,
    pub(crate) response_rx: UnboundedReceiver<WorkerResponse>,
    cancel: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl GenerationWorker {
    pub fn new(generator: Arc<dyn CookbookGenerator>) -> Self {
        let (cmd_tx, cmd_rx) = channel::<WorkerCommand>();
        let (resp_tx, resp_rx) = unbounded_channel::<WorkerResponse>();
        let cancel = Arc::new(AtomicBool::new(false));

        let thread_generator = generator.clone();
        let thread_cancel = cancel.clone();
        let thread_handle = thread::spawn(move || {
            // Worker loop
            loop {
                match cmd_rx.recv() {
                    Ok(WorkerCommand::Generate(request)) => {
                        thread_cancel.store(false, Ordering::SeqCst);
                        let _ = resp_tx.send(WorkerResponse::Status(format!(
                            "Submitting \"{}\" to {}...",
                            request.title,
                            thread_generator.name()
                        )));

                        let mut progress = ChannelProgress {
                            tx: resp_tx.clone(),
                            cancel: thread_cancel.clone(),
                        };
                        let response = match thread_generator.generate(&request, &mut progress) {
                            Ok(response) if response.success => WorkerResponse::Success(response),
                            Ok(response) => {
                                WorkerResponse::Error(response.error.unwrap_or_else(|| "Unknown error".into()))
                            }
                            Err(e) => WorkerResponse::Error(e.to_string()),
                        };
                        let _ = resp_tx.send(response);
                    }

                    Ok(WorkerCommand::Shutdown) => {
                        break;
                    }

                    Err(_) => {
                        break;
                    }
                }
            }
            debug!("Generation worker exited");
        });

        Self {
            generator,
            command_tx: cmd_tx,
            response_rx: resp_rx,
            cancel,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn send_request(&self, request: GenerationRequest) -> Result<(), String> {
        self.command_tx
            .send(WorkerCommand::Generate(request))
            .map_err(|e| format!("Failed to send request to worker: {}", e))
    }

    pub fn estimated_time(&self, request: &GenerationRequest) -> Duration {
        self.generator.estimated_time(request)
    }

    /// Asks the in-flight generation to stop at its next progress check.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn shutdown(&mut self) {
        self.cancel();
        let _ = self.command_tx.send(WorkerCommand::Shutdown);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for GenerationWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Relays generator progress to the app and carries the cancel flag back.
struct ChannelProgress {
    tx: UnboundedSender<WorkerResponse>,
    cancel: Arc<AtomicBool>,
}

impl ProgressCallback for ChannelProgress {
    fn update(&mut self, progress: f64, message: &str) {
        let _ = self.tx.send(WorkerResponse::Progress(progress));
        if !message.is_empty() {
            let _ = self.tx.send(WorkerResponse::Status(message.to_string()));
        }
    }

    fn should_cancel(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

// ============================================================================
// API Client
// ============================================================================

const POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Deserialize)]
struct JobResponse {
    job_id: String,
    status: String,
}

#[derive(Deserialize)]
struct JobStatusResponse {
    job_id: String,
    status: String,
    progress: Option<f64>,
    message: Option<String>,
    result: Option<GenerationResponse>,
    error: Option<String>,
}

/// Talks to the external generation service over HTTP
pub struct HttpGenerator {
    endpoint: String,
}

impl HttpGenerator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    /// Submit generation job and return job ID
    fn submit_job(&self, client: &reqwest::blocking::Client, request: &GenerationRequest) -> cb_core::Result<String> {
        let url = format!("{}/generate", self.endpoint);

        let response = client.post(&url).json(request).send().map_err(|e| {
            Error::GenerationFailed(format!(
                "Failed to connect to {}: {}. Make sure the generation service is running",
                url, e
            ))
        })?;

        if !response.status().is_success() {
            return Err(Error::GenerationFailed(format!(
                "Service returned error: {}",
                response.status()
            )));
        }

        let job: JobResponse = response
            .json()
            .map_err(|e| Error::GenerationFailed(format!("Failed to parse response: {}", e)))?;

        debug!("Job {} accepted with status {}", job.job_id, job.status);
        Ok(job.job_id)
    }

    /// Poll job status until complete or failed
    fn poll_job(
        &self,
        client: &reqwest::blocking::Client,
        job_id: &str,
        progress: &mut dyn ProgressCallback,
    ) -> cb_core::Result<GenerationResponse> {
        let url = format!("{}/status/{}", self.endpoint, job_id);
        let mut last_progress = 0.0;

        loop {
            thread::sleep(POLL_INTERVAL);

            if progress.should_cancel() {
                info!("Job {} cancelled", job_id);
                return Err(Error::GenerationFailed("Generation cancelled".into()));
            }

            let response = client
                .get(&url)
                .send()
                .map_err(|e| Error::GenerationFailed(format!("Failed to check status: {}", e)))?;

            if !response.status().is_success() {
                return Err(Error::GenerationFailed(format!(
                    "Status check failed: {}",
                    response.status()
                )));
            }

            let status: JobStatusResponse = response
                .json()
                .map_err(|e| Error::GenerationFailed(format!("Failed to parse status: {}", e)))?;

            // Update progress if changed
            let current = status.progress.unwrap_or(last_progress);
            if current != last_progress || status.message.is_some() {
                progress.update(current, status.message.as_deref().unwrap_or(""));
                last_progress = current;
            }

            match status.status.as_str() {
                "SUCCESS" => {
                    return status.result.ok_or_else(|| {
                        Error::GenerationFailed(format!("Job {} succeeded but returned no cookbook", status.job_id))
                    });
                }

                "FAILURE" => {
                    let error_msg = status.error.unwrap_or_else(|| "Unknown error".into());
                    return Err(Error::GenerationFailed(error_msg));
                }

                "PENDING" | "STARTED" | "RETRY" => continue,

                other => {
                    warn!("Unknown job status '{}', still polling", other);
                    continue;
                }
            }
        }
    }
}

impl CookbookGenerator for HttpGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
        progress: &mut dyn ProgressCallback,
    ) -> cb_core::Result<GenerationResponse> {
        let client = reqwest::blocking::Client::new();
        let job_id = self.submit_job(&client, request)?;
        progress.update(0.0, &format!("Job submitted (ID: {})", job_id));
        self.poll_job(&client, &job_id, progress)
    }

    fn name(&self) -> &str {
        "cookbook service"
    }
}
