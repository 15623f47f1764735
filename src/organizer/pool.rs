use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use tracing::{debug, info};

use crate::library::{self, AudioFile};

use super::engine::{Claims, Organizer, Progress, Roots};
use super::stats::ProcessingStats;

/// Scanner thread feeding a bounded queue drained by `workers` threads.
///
/// Stats are updated and the progress callback invoked under one lock, so
/// callbacks never overlap and each sees a consistent snapshot.
pub(super) fn run<F>(
    organizer: &Organizer,
    roots: &Roots,
    total: usize,
    workers: usize,
    progress: &F,
) -> ProcessingStats
where
    F: Fn(&Progress<'_>) + Sync,
{
    let capacity = organizer.options().queue_capacity.max(1);
    let (tx, rx) = mpsc::sync_channel::<AudioFile>(capacity);
    let rx = Arc::new(Mutex::new(rx));
    let stats = Mutex::new(ProcessingStats::default());
    let claims = Claims::default();

    thread::scope(|scope| {
        for id in 0..workers {
            let rx = Arc::clone(&rx);
            let (stats, claims) = (&stats, &claims);
            scope.spawn(move || worker(id, organizer, roots, &rx, stats, claims, total, progress));
        }
        // Once every worker has exited the receiver is gone and a scanner
        // blocked on a full queue gets a send error.
        drop(rx);

        let stop = organizer.stop_handle();
        scope.spawn(move || {
            let settings = &organizer.options().library;
            let mut queued = 0usize;
            for file in library::walk(&roots.source, settings, roots.excluded.as_deref()) {
                if stop.is_stopped() {
                    info!(queued, "stop requested, scanner exiting");
                    break;
                }
                if tx.send(file).is_err() {
                    break;
                }
                queued += 1;
            }
            debug!(queued, "scanner done");
        });
    });

    stats.into_inner().unwrap_or_else(PoisonError::into_inner)
}

#[allow(clippy::too_many_arguments)]
pub(super) fn worker<F>(
    id: usize,
    organizer: &Organizer,
    roots: &Roots,
    rx: &Mutex<Receiver<AudioFile>>,
    stats: &Mutex<ProcessingStats>,
    claims: &Claims,
    total: usize,
    progress: &F,
) where
    F: Fn(&Progress<'_>) + Sync,
{
    let stop = organizer.stop_handle();
    let policy = organizer.options().year_count;

    loop {
        if stop.is_stopped() {
            break;
        }
        let next = rx.lock().unwrap_or_else(PoisonError::into_inner).recv();
        // Dequeued files always finish, even when a stop arrived meanwhile.
        let Ok(file) = next else {
            break;
        };

        let outcome = organizer.process_file(&file, &roots.source, claims);

        let mut stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
        stats.record(&file, &roots.source, &outcome, policy);
        progress(&Progress {
            processed: stats.total,
            total: total.max(stats.total),
            file: &file,
            outcome: &outcome,
            stats: &stats,
        });
    }
    debug!(worker = id, "worker exiting");
}
