//! Per-worker generate → square → validate loop

use crate::search::Generator;
use crate::search::config::{Algorithm, SearchConfig};
use crate::search::error::FillError;
use crate::search::parallel::channel::SharedState;
use crate::search::result::Solution;
use crate::search::validate::magic_sum;
use crate::square::Square;
use tracing::{debug, info};

/// Why a worker loop returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerExit {
    /// This worker found a magic square
    Found(Solution),
    /// The shared stop flag was raised
    Stopped,
    /// The generator ran out of candidates
    Exhausted,
    /// The shared attempt limit was reached
    LimitReached,
}

/// Run the search loop until a solution, a stop signal, the attempt limit,
/// or generator exhaustion.
///
/// The stop flag is polled once per attempt and again by generators while
/// they skip illegal candidates, so a stop request takes effect within one
/// generate-square-validate cycle.
pub fn run_worker<G>(
    worker_id: usize,
    generator: &mut G,
    config: &SearchConfig,
    shared: &SharedState,
) -> WorkerExit
where
    G: Generator + ?Sized,
{
    let mut square = Square::new(config.max_value);
    let algorithm = generator.algorithm();
    debug!(worker_id, %algorithm, "worker started");

    loop {
        if shared.should_stop() {
            return WorkerExit::Stopped;
        }
        if !shared.try_record_attempt(config.max_attempts) {
            return WorkerExit::LimitReached;
        }

        match generator.fill(&mut square, shared) {
            Ok(()) => {}
            Err(FillError::Stopped) => return WorkerExit::Stopped,
            Err(FillError::Exhausted(_)) => {
                info!(worker_id, "No more values for worker {}", worker_id);
                return WorkerExit::Exhausted;
            }
        }
        let roots = square;
        square.square();

        if let Some(magic_sum) = magic_sum(&square) {
            let cursor = generator.position();
            info!(worker_id, magic_sum, ?cursor, "Magic square found: {}", square);
            return WorkerExit::Found(Solution {
                worker_id,
                roots,
                square,
                magic_sum,
                cursor,
            });
        }

        if algorithm == Algorithm::Sequence {
            debug!(
                worker_id,
                cursor = generator.position(),
                "Not magic {}",
                square
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::error::Exhausted;
    use crate::search::random::RandomGenerator;
    use crate::search::sequence::{SearchCursor, SequenceGenerator};
    use crate::square::MAX_VALUE;
    use std::sync::Arc;

    /// Replays a fixed list of squares, then reports exhaustion
    struct ScriptedGenerator {
        squares: Vec<[[u64; 3]; 3]>,
        fills: usize,
    }

    impl ScriptedGenerator {
        fn new(squares: Vec<[[u64; 3]; 3]>) -> Self {
            Self { squares, fills: 0 }
        }
    }

    impl Generator for ScriptedGenerator {
        fn algorithm(&self) -> Algorithm {
            Algorithm::Random
        }

        fn fill(&mut self, square: &mut Square, _shared: &SharedState) -> Result<(), FillError> {
            let rows = self.squares.get(self.fills).ok_or(Exhausted { limit: 0 })?;
            *square = Square::from_rows(*rows, MAX_VALUE);
            self.fills += 1;
            Ok(())
        }
    }

    #[test]
    fn test_worker_finds_scripted_solution() {
        let mut generator = ScriptedGenerator::new(vec![
            [[1, 2, 3], [2, 3, 1], [3, 1, 2]],
            [[1, 2, 3], [4, 5, 6], [7, 8, 9]],
            [[5, 5, 5], [5, 5, 5], [5, 5, 5]],
        ]);
        let shared = SharedState::default();

        let exit = run_worker(3, &mut generator, &SearchConfig::default(), &shared);

        match exit {
            WorkerExit::Found(solution) => {
                assert_eq!(solution.worker_id, 3);
                assert_eq!(solution.roots.rows(), &[[5; 3]; 3]);
                assert_eq!(solution.square.rows(), &[[25; 3]; 3]);
                assert_eq!(solution.magic_sum, 75);
                assert_eq!(solution.cursor, None);
            }
            other => panic!("unexpected exit {:?}", other),
        }
        assert_eq!(shared.attempts(), 3);
    }

    #[test]
    fn test_worker_squares_once_per_attempt() {
        // Lo Shu is magic before squaring but not after, so it must be rejected
        let mut generator = ScriptedGenerator::new(vec![[[4, 9, 2], [3, 5, 7], [8, 1, 6]]]);
        let shared = SharedState::default();

        let exit = run_worker(0, &mut generator, &SearchConfig::default(), &shared);

        assert_eq!(exit, WorkerExit::Exhausted);
        // Exhaustion is discovered on the second attempt
        assert_eq!(shared.attempts(), 2);
    }

    #[test]
    fn test_worker_respects_attempt_limit() {
        let mut generator = RandomGenerator::new(Some(9));
        let shared = SharedState::default();
        let config = SearchConfig::default().with_max_attempts(250);

        let exit = run_worker(0, &mut generator, &config, &shared);

        assert_eq!(exit, WorkerExit::LimitReached);
        assert_eq!(shared.attempts(), 250);
    }

    #[test]
    fn test_worker_honours_stop_flag() {
        let mut generator = RandomGenerator::new(Some(9));
        let shared = SharedState::default();
        shared.signal_stop();

        let exit = run_worker(0, &mut generator, &SearchConfig::default(), &shared);

        assert_eq!(exit, WorkerExit::Stopped);
        assert_eq!(shared.attempts(), 0);
    }

    #[test]
    fn test_sequence_worker_exhausts() {
        let config = SearchConfig::default()
            .with_algorithm(Algorithm::Sequence)
            .with_max_value(4);
        let mut generator =
            SequenceGenerator::new(Arc::new(SearchCursor::default()), config.max_value);
        let shared = SharedState::default();

        let exit = run_worker(0, &mut generator, &config, &shared);

        assert_eq!(exit, WorkerExit::Exhausted);
        assert_eq!(shared.attempts(), 1);
    }

    #[test]
    fn test_sequence_worker_stops_while_skipping() {
        let config = SearchConfig::default().with_algorithm(Algorithm::Sequence);
        let mut generator =
            SequenceGenerator::new(Arc::new(SearchCursor::default()), config.max_value);
        let shared = Arc::new(SharedState::default());

        let stopper = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(20));
                shared.signal_stop();
            })
        };
        let exit = run_worker(0, &mut generator, &config, &shared);
        stopper.join().unwrap();

        // The only attempt was still skipping toward the first legal cursor
        assert_eq!(exit, WorkerExit::Stopped);
        assert_eq!(shared.attempts(), 1);
    }
}
