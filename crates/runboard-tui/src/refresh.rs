//! Background refresh worker.
//!
//! The worker task owns the `RunnerDataManager`, so every fetch and cache
//! update happens in one place. It fetches once at startup, again on every
//! interval tick and whenever the UI asks, and forwards the manager's
//! notifications to the UI over an mpsc channel.

use std::time::Duration;

use runboard_core::{DataEvent, RunnerDataManager, RunnerSource};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Buffer size for the worker channels.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// How long shutdown waits for an in-flight fetch before aborting the task.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCommand {
    /// Fetch, serving the cache while it is fresh.
    Refresh,
    /// Drop the cached dataset and fetch.
    ForceRefresh,
    /// Clear the cache and stop the worker.
    Shutdown,
}

/// Messages from the worker to the UI.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Data(DataEvent),
    /// A refresh was answered from the cache; carries the cache age.
    CacheHit(String),
}

/// UI side of the worker: command sender, event receiver and the task itself.
pub struct RefreshHandle {
    pub(crate) commands: mpsc::Sender<RefreshCommand>,
    pub(crate) events: mpsc::Receiver<WorkerEvent>,
    pub(crate) task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    pub async fn send(&self, command: RefreshCommand) {
        if let Err(e) = self.commands.send(command).await {
            error!(error = %e, "Failed to send refresh command - worker stopped");
        }
    }

    /// Drain every event that has arrived since the last call.
    pub fn try_recv_all(&mut self) -> Vec<WorkerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Stop the periodic timer and wait briefly for the worker to finish.
    pub async fn shutdown(&mut self) {
        let _ = self.commands.send(RefreshCommand::Shutdown).await;
        self.events.close();

        if let Some(mut task) = self.task.take() {
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
                warn!("Refresh worker still busy after shutdown request, aborting");
                task.abort();
            }
        }
    }
}

/// Start the worker. The first fetch happens immediately.
pub fn spawn_refresh_worker<S>(mut manager: RunnerDataManager<S>, period: Duration) -> RefreshHandle
where
    S: RunnerSource + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let (command_tx, command_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

    let data_tx = event_tx.clone();
    manager.subscribe(move |event| {
        if let Err(e) = data_tx.try_send(WorkerEvent::Data(event.clone())) {
            debug!(error = %e, "Dropping data event");
        }
    });

    let task = tokio::spawn(run_worker(manager, period, command_rx, event_tx));

    RefreshHandle {
        commands: command_tx,
        events: event_rx,
        task: Some(task),
    }
}

async fn run_worker<S: RunnerSource>(
    mut manager: RunnerDataManager<S>,
    period: Duration,
    mut commands: mpsc::Receiver<RefreshCommand>,
    events: mpsc::Sender<WorkerEvent>,
) {
    info!(period_secs = period.as_secs(), "Refresh worker started");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                debug!("Scheduled refresh");
                load(&mut manager, false, &events).await;
            }
            command = commands.recv() => match command {
                Some(RefreshCommand::Refresh) => load(&mut manager, false, &events).await,
                Some(RefreshCommand::ForceRefresh) => load(&mut manager, true, &events).await,
                Some(RefreshCommand::Shutdown) | None => break,
            },
        }
    }

    manager.clear_cache();
    info!("Refresh worker stopped");
}

async fn load<S: RunnerSource>(
    manager: &mut RunnerDataManager<S>,
    force: bool,
    events: &mpsc::Sender<WorkerEvent>,
) {
    if !force && manager.has_fresh_data() {
        let age = manager.cache_age().unwrap_or_else(|| "just now".to_string());
        let _ = events.try_send(WorkerEvent::CacheHit(age));
    }

    let result = if force {
        manager.refresh().await
    } else {
        manager.fetch_data().await
    };

    // Failures already reached the UI through the observer
    if let Err(e) = result {
        debug!(error = %e, "Refresh attempt failed");
    }
}
