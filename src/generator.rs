use crate::error::GenerateError;
use crate::formula::text::write_clause;
use crate::formula::{Clause, Literal, Variable};
use log::{debug, info, trace};
use rand::seq::index;
use rand::Rng;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Below this the clause size range `1..=variable_count / 10` is empty.
pub const MIN_VARIABLES: usize = 10;
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GeneratorConfig {
    pub variable_count: usize,
    pub clause_count: usize,
    /// Report progress on every `progress_interval`-th clause.
    pub progress_interval: usize,
}

impl GeneratorConfig {
    pub fn new(variable_count: usize, clause_count: usize) -> Self {
        Self {
            variable_count,
            clause_count,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    pub fn with_progress_interval(self, progress_interval: usize) -> Self {
        Self {
            progress_interval,
            ..self
        }
    }

    pub fn max_clause_size(&self) -> usize {
        self.variable_count / 10
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.variable_count < MIN_VARIABLES {
            return Err(GenerateError::InvalidConfiguration(format!(
                "need at least {} variables, got {}",
                MIN_VARIABLES, self.variable_count
            )));
        }
        if self.progress_interval == 0 {
            return Err(GenerateError::InvalidConfiguration(
                "progress interval must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parses a non-negative count supplied by a caller, e.g. from the command line.
pub fn parse_count(name: &str, text: &str) -> Result<usize, GenerateError> {
    let text = text.trim();
    match text.parse::<usize>() {
        Ok(count) => Ok(count),
        Err(_) if text.parse::<i64>().map_or(false, |c| c < 0) => Err(GenerateError::InvalidConfiguration(
            format!("{} must be non-negative, got {}", name, text),
        )),
        Err(_) => Err(GenerateError::InvalidConfiguration(format!(
            "{} must be an integer, got {:?}",
            name, text
        ))),
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Summary {
    pub clauses: usize,
    pub literals: usize,
}

/// Side channel for a generation run.
pub trait Observer {
    /// Called after clause number `iteration` (counting from 1) is written, on
    /// every multiple of the configured progress interval.
    fn progress(&mut self, _iteration: usize) {}

    /// Called once, after the last clause has been written and the sink flushed.
    fn finished(&mut self, _summary: &Summary) {}

    /// Checked before each clause; returning true aborts the run.
    fn should_stop(&self) -> bool {
        false
    }
}

impl Observer for () {}

/// Reports progress through the `log` facade.
#[derive(Clone, Copy, Default, Debug)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn progress(&mut self, iteration: usize) {
        info!("Wrote clause {}", iteration);
    }

    fn finished(&mut self, summary: &Summary) {
        info!("Done. {} clauses, {} literals", summary.clauses, summary.literals);
    }
}

/// Wraps another observer and stops generation once `flag` is raised.
pub struct Cancel<O> {
    inner: O,
    flag: Arc<AtomicBool>,
}

impl<O> Cancel<O> {
    pub fn new(inner: O, flag: Arc<AtomicBool>) -> Self {
        Self { inner, flag }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: Observer> Observer for Cancel<O> {
    fn progress(&mut self, iteration: usize) {
        self.inner.progress(iteration)
    }

    fn finished(&mut self, summary: &Summary) {
        self.inner.finished(summary)
    }

    fn should_stop(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.inner.should_stop()
    }
}

/// Samples random clauses over the variables `0..variable_count`.
///
/// Each clause has a size drawn uniformly from `1..=variable_count / 10`, its
/// variables drawn uniformly without replacement, and each literal negated
/// with probability 1/2.
pub struct Generator<R> {
    config: GeneratorConfig,
    rng: R,
}

impl<R: Rng> Generator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn next_clause(&mut self) -> Result<Clause, GenerateError> {
        let pool = self.config.variable_count;
        let size = self.rng.gen_range(1, self.config.max_clause_size() + 1);
        if size > pool {
            return Err(GenerateError::SamplingImpossible {
                requested: size,
                available: pool,
            });
        }

        let chosen = index::sample(&mut self.rng, pool, size);
        let rng = &mut self.rng;
        Ok(Clause::new(
            chosen.iter().map(|i| Literal::new(Variable(i), rng.gen_bool(0.5))),
        ))
    }

    /// Writes `clause_count` clauses to `sink`, one per line, in the order they
    /// are sampled. Nothing is retained between clauses.
    pub fn generate<W, O>(&mut self, sink: &mut W, observer: &mut O) -> Result<Summary, GenerateError>
    where
        W: Write + ?Sized,
        O: Observer + ?Sized,
    {
        debug!(
            "generating {} clauses over {} variables, clause size 1..={}",
            self.config.clause_count,
            self.config.variable_count,
            self.config.max_clause_size()
        );

        let mut summary = Summary::default();
        for iteration in 1..=self.config.clause_count {
            if observer.should_stop() {
                debug!("stopped before clause {}", iteration);
                return Err(GenerateError::Cancelled {
                    written: summary.clauses,
                });
            }

            let clause = self.next_clause()?;
            trace!("clause {}: {}", iteration, clause);
            write_clause(sink, &clause)?;
            summary.clauses += 1;
            summary.literals += clause.len();

            if iteration % self.config.progress_interval == 0 {
                observer.progress(iteration);
            }
        }
        sink.flush()?;

        observer.finished(&summary);
        Ok(summary)
    }
}

/// Validates `config` and streams its clauses to `sink`.
pub fn generate<R, W, O>(
    config: GeneratorConfig,
    rng: R,
    sink: &mut W,
    observer: &mut O,
) -> Result<Summary, GenerateError>
where
    R: Rng,
    W: Write + ?Sized,
    O: Observer + ?Sized,
{
    Generator::new(config, rng)?.generate(sink, observer)
}
