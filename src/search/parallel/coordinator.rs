//! Parallel search coordinator that manages worker threads.

use crate::search::Generator;
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::parallel::channel::{CoordinatorChannels, WorkerMessage, create_channels};
use crate::search::parallel::config::ParallelConfig;
use crate::search::random::RandomGenerator;
use crate::search::result::{SearchOutcome, SearchResult, SearchStatistics, Solution};
use crate::search::sequence::{SearchCursor, SequenceGenerator};
use crate::search::worker::{WorkerExit, run_worker};
use crossbeam_channel::{Receiver, never, select};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run the search on a pool of workers until one finds a magic square,
/// all of them finish, or `interrupt` fires.
///
/// Random workers each own a generator seeded with `base_seed + worker_id`.
/// Sequence workers share one cursor starting after `config.start`.
pub fn run_parallel_search(
    search_config: &SearchConfig,
    parallel_config: &ParallelConfig,
    interrupt: &Receiver<()>,
) -> SearchResult {
    let cursor = Arc::new(SearchCursor::new(search_config.start));
    let max_value = search_config.max_value;
    let algorithm = search_config.algorithm;

    let factory = {
        let cursor = Arc::clone(&cursor);
        let parallel_config = parallel_config.clone();
        move |worker_id: usize| -> Box<dyn Generator> {
            match algorithm {
                Algorithm::Random => {
                    Box::new(RandomGenerator::new(parallel_config.worker_seed(worker_id)))
                }
                Algorithm::Sequence => {
                    Box::new(SequenceGenerator::new(Arc::clone(&cursor), max_value))
                }
            }
        }
    };

    let result = run_pool(search_config, parallel_config, interrupt, factory);

    match algorithm {
        Algorithm::Sequence => result.with_resume_cursor(Some(cursor.position())),
        Algorithm::Random => result,
    }
}

/// Spawn one worker per generator built by `factory` and coordinate them.
fn run_pool<F>(
    search_config: &SearchConfig,
    parallel_config: &ParallelConfig,
    interrupt: &Receiver<()>,
    factory: F,
) -> SearchResult
where
    F: Fn(usize) -> Box<dyn Generator>,
{
    let start_time = Instant::now();
    let num_workers = parallel_config.num_workers;

    let (coordinator_channels, worker_channels) = create_channels(num_workers);
    let search_config = Arc::new(search_config.clone());

    let worker_handles: Vec<_> = worker_channels
        .into_iter()
        .enumerate()
        .map(|(worker_id, channels)| {
            let search_config = Arc::clone(&search_config);
            let mut generator = factory(worker_id);

            std::thread::spawn(move || {
                let exit = run_worker(
                    worker_id,
                    generator.as_mut(),
                    &search_config,
                    &channels.shared,
                );
                let message = match exit {
                    WorkerExit::Found(solution) => WorkerMessage::Found {
                        worker_id,
                        solution,
                    },
                    exit => WorkerMessage::Finished {
                        worker_id,
                        exit,
                        position: generator.position(),
                    },
                };
                // The coordinator may already be gone after a solution
                let _ = channels.to_coordinator.send(message);
            })
        })
        .collect();

    let shared = Arc::clone(&coordinator_channels.shared);
    let outcome = run_coordinator(coordinator_channels, interrupt, num_workers);

    // Workers poll the flag once per attempt and while skipping candidates
    shared.signal_stop();
    for (worker_id, handle) in worker_handles.into_iter().enumerate() {
        if handle.join().is_err() {
            warn!(worker_id, "worker panicked");
        }
    }

    let mut statistics = SearchStatistics::new(search_config.algorithm);
    statistics.workers = num_workers;
    statistics.elapsed_time = start_time.elapsed();
    statistics.attempts = shared.attempts();

    match outcome {
        (SearchOutcome::Found, Some(solution)) => SearchResult::found(solution, statistics),
        (outcome, _) => SearchResult::stopped(outcome, statistics),
    }
}

enum Event {
    Worker(Option<WorkerMessage>),
    Interrupt(bool),
}

/// Coordinator loop: wait for a solution, the interrupt, or every worker
/// to finish.
fn run_coordinator(
    channels: CoordinatorChannels,
    interrupt: &Receiver<()>,
    total_workers: usize,
) -> (SearchOutcome, Option<Solution>) {
    let mut interrupt = interrupt.clone();
    let mut finished_count = 0;
    let mut limit_reached = false;

    loop {
        let event = select! {
            recv(channels.from_workers) -> msg => Event::Worker(msg.ok()),
            recv(interrupt) -> signal => Event::Interrupt(signal.is_ok()),
        };

        match event {
            Event::Worker(Some(WorkerMessage::Found { worker_id, solution })) => {
                info!(worker_id, "worker reported a solution");
                channels.shared.signal_stop();
                return (SearchOutcome::Found, Some(solution));
            }
            Event::Worker(Some(WorkerMessage::Finished {
                worker_id,
                exit,
                position,
            })) => {
                debug!(worker_id, ?exit, ?position, "worker finished");
                finished_count += 1;
                limit_reached |= exit == WorkerExit::LimitReached;
                if finished_count >= total_workers {
                    break;
                }
            }
            Event::Worker(None) => {
                // Every worker dropped its sender without reporting
                warn!(finished_count, total_workers, "all workers disconnected");
                break;
            }
            Event::Interrupt(true) => {
                info!("Interrupted");
                channels.shared.signal_stop();
                return (SearchOutcome::Interrupted, None);
            }
            Event::Interrupt(false) => {
                // Nobody can interrupt any more
                interrupt = never();
            }
        }
    }

    let outcome = if limit_reached {
        SearchOutcome::LimitReached
    } else {
        SearchOutcome::Exhausted
    };
    (outcome, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::error::FillError;
    use crate::search::parallel::channel::SharedState;
    use crate::square::{MAX_VALUE, Square};
    use crossbeam_channel::bounded;
    use std::time::Duration;

    /// Fills with the same rows forever
    struct FixedGenerator([[u64; 3]; 3]);

    impl Generator for FixedGenerator {
        fn algorithm(&self) -> Algorithm {
            Algorithm::Random
        }

        fn fill(&mut self, square: &mut Square, _shared: &SharedState) -> Result<(), FillError> {
            *square = Square::from_rows(self.0, MAX_VALUE);
            Ok(())
        }
    }

    fn quiet_interrupt() -> (crossbeam_channel::Sender<()>, Receiver<()>) {
        bounded(1)
    }

    #[test]
    fn test_parallel_search_reaches_limit() {
        let (_tx, rx) = quiet_interrupt();
        let search_config = SearchConfig::default().with_max_attempts(2_000);
        let parallel_config = ParallelConfig::default().with_workers(4).with_seed(42);

        let result = run_parallel_search(&search_config, &parallel_config, &rx);

        assert_eq!(result.outcome, SearchOutcome::LimitReached);
        assert!(result.solution.is_none());
        assert_eq!(result.statistics.attempts, 2_000);
        assert_eq!(result.statistics.workers, 4);
        assert_eq!(result.statistics.algorithm, Algorithm::Random);
        assert!(result.resume_cursor.is_none());
    }

    #[test]
    fn test_parallel_search_single_worker() {
        let (_tx, rx) = quiet_interrupt();
        let search_config = SearchConfig::default().with_max_attempts(100);
        let parallel_config = ParallelConfig::default().with_workers(1);

        let result = run_parallel_search(&search_config, &parallel_config, &rx);

        assert_eq!(result.outcome, SearchOutcome::LimitReached);
        assert_eq!(result.statistics.attempts, 100);
        assert!(result.statistics.elapsed_time.as_nanos() > 0);
    }

    #[test]
    fn test_parallel_search_interrupted() {
        let (tx, rx) = quiet_interrupt();
        let sender = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            tx.send(()).unwrap();
        });

        let result = run_parallel_search(&SearchConfig::default(), &ParallelConfig::default(), &rx);
        sender.join().unwrap();

        assert_eq!(result.outcome, SearchOutcome::Interrupted);
        assert!(result.solution.is_none());
        assert!(result.statistics.attempts > 0);
        assert!(result.to_string().contains("Interrupted."));
    }

    #[test]
    fn test_sequence_search_interrupted_while_skipping() {
        // From cursor 0 no worker reaches a legal cursor before the interrupt
        let (tx, rx) = quiet_interrupt();
        let sender = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            tx.send(()).unwrap();
        });
        let search_config = SearchConfig::default().with_algorithm(Algorithm::Sequence);

        let result = run_parallel_search(&search_config, &ParallelConfig::default(), &rx);
        sender.join().unwrap();

        assert_eq!(result.outcome, SearchOutcome::Interrupted);
        assert!(result.solution.is_none());
        assert!(result.statistics.attempts <= 4);
        assert!(result.resume_cursor.is_some());
        let text = result.to_string();
        assert!(text.starts_with("Interrupted."));
        assert!(text.contains("Throughput:"));
    }

    #[test]
    fn test_dropped_interrupt_sender_is_ignored() {
        let (tx, rx) = quiet_interrupt();
        drop(tx);
        let search_config = SearchConfig::default().with_max_attempts(500);

        let result = run_parallel_search(&search_config, &ParallelConfig::default(), &rx);

        assert_eq!(result.outcome, SearchOutcome::LimitReached);
        assert_eq!(result.statistics.attempts, 500);
    }

    #[test]
    fn test_parallel_sequence_exhausts_small_space() {
        let (_tx, rx) = quiet_interrupt();
        let search_config = SearchConfig::default()
            .with_algorithm(Algorithm::Sequence)
            .with_max_value(4);
        let parallel_config = ParallelConfig::default().with_workers(2);

        let result = run_parallel_search(&search_config, &parallel_config, &rx);

        assert_eq!(result.outcome, SearchOutcome::Exhausted);
        assert_eq!(result.statistics.attempts, 2);
        assert!(result.resume_cursor.is_some_and(|c| c >= 262_144));
    }

    #[test]
    fn test_sequence_resume_cursor_after_limit() {
        let (_tx, rx) = quiet_interrupt();
        let start = 90_807_060_504_030_200;
        let search_config = SearchConfig::default()
            .with_algorithm(Algorithm::Sequence)
            .with_start(start)
            .with_max_attempts(1);
        let parallel_config = ParallelConfig::default().with_workers(1);

        let result = run_parallel_search(&search_config, &parallel_config, &rx);

        assert_eq!(result.outcome, SearchOutcome::LimitReached);
        assert_eq!(result.resume_cursor, Some(start + 1));
        assert!(result.to_string().contains("Resume from: 90807060504030201"));
    }

    #[test]
    fn test_pool_reports_solution() {
        let (_tx, rx) = quiet_interrupt();
        let factory = |worker_id: usize| -> Box<dyn Generator> {
            if worker_id == 1 {
                Box::new(FixedGenerator([[3; 3]; 3]))
            } else {
                Box::new(FixedGenerator([[1, 2, 3], [2, 3, 1], [3, 1, 2]]))
            }
        };

        let result = run_pool(
            &SearchConfig::default(),
            &ParallelConfig::default().with_workers(3),
            &rx,
            factory,
        );

        assert_eq!(result.outcome, SearchOutcome::Found);
        let solution = result.solution.expect("solution");
        assert_eq!(solution.worker_id, 1);
        assert_eq!(solution.square.rows(), &[[9; 3]; 3]);
        assert_eq!(solution.magic_sum, 27);
        assert!(result.statistics.attempts >= 1);
    }
}
