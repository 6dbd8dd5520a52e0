//! Bounded worker pool for batch issuance.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use eventeye_core::{Event, Participant};
use eventeye_registry::Registry;

use crate::error::{IssueError, IssueFailure, Result};
use crate::issuer::Pipeline;
use crate::manifest::{Manifest, ManifestEntry, Outcome};

/// Issue one certificate per participant with at most `workers` renders in
/// flight.
///
/// Entries come back in input order. The first fatal error aborts the
/// remaining tasks and is returned as [`IssueError::Aborted`] with every
/// entry finished so far; certificates already registered stay registered.
pub(crate) async fn run<R: Registry + 'static>(
    pipeline: Pipeline<R>,
    event: Arc<Event>,
    participants: Vec<Participant>,
    workers: usize,
) -> Result<Manifest> {
    let total = participants.len();
    let semaphore = Arc::new(Semaphore::new(workers.clamp(1, Semaphore::MAX_PERMITS)));
    let mut tasks = JoinSet::new();

    for (index, participant) in participants.into_iter().enumerate() {
        let pipeline = pipeline.clone();
        let event = Arc::clone(&event);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => pipeline.run(&participant, &event).await,
                Err(_) => Err(IssueError::Worker("worker pool closed".to_string())),
            };
            (index, participant, outcome)
        });
    }

    let mut slots: Vec<Option<ManifestEntry>> = (0..total).map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, participant, outcome) = match joined {
            Ok(done) => done,
            Err(e) => {
                tasks.abort_all();
                return Err(aborted(&event, slots, IssueError::Worker(e.to_string())));
            }
        };

        let outcome = match outcome {
            Ok(issued) => Outcome::Issued(issued),
            Err(e) => match IssueFailure::try_from(e) {
                Ok(error) => {
                    tracing::warn!(
                        participant = %participant.name,
                        error = %error,
                        "certificate not issued"
                    );
                    Outcome::Failed { error }
                }
                Err(fatal) => {
                    tasks.abort_all();
                    return Err(aborted(&event, slots, fatal));
                }
            },
        };

        slots[index] = Some(ManifestEntry {
            participant_name: participant.name,
            email: participant.email,
            outcome,
        });
    }

    if let Some(missing) = slots.iter().position(Option::is_none) {
        let cause = IssueError::Worker(format!("no result for participant {}", missing));
        return Err(aborted(&event, slots, cause));
    }

    Ok(Manifest {
        event: (*event).clone(),
        entries: slots.into_iter().flatten().collect(),
    })
}

fn aborted(event: &Event, slots: Vec<Option<ManifestEntry>>, cause: IssueError) -> IssueError {
    IssueError::Aborted {
        cause: Box::new(cause),
        partial: Manifest {
            event: event.clone(),
            entries: slots.into_iter().flatten().collect(),
        },
    }
}
