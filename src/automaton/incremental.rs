//! Non-blocking incremental stepping with chunked work distribution.
//!
//! Splits a generation step into bounded work quanta (runs of `CHUNK_SIZE` target
//! indices) that can be processed across several calls without blocking the
//! caller for a whole generation.
//!
//! Core invariant: the current field is the read-only source for the whole step.
//! All writes go to the next generation's buffer, which is only installed once
//! every chunk is done. Chunk order doesn't affect the result.

use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::bounds::Region;
use super::field::Field;
use super::rule::Rule;
use super::stepping::{next_cell, Scratch};
use crate::error::{Error, Result};

pub const CHUNK_SIZE: usize = 4096;

/// Tracks the state of an in-progress incremental generation step.
pub struct IncrementalStep {
    /// Region of the generation being produced.
    pub region: Region,

    /// Accumulating output for generation N+1.
    pub target: Vec<bool>,

    /// Index of the next chunk to process.
    pub next_chunk: usize,

    pub total_chunks: usize,
}

/// Manages the lifecycle of incremental steps for a Field.
pub struct StepController {
    /// The field being stepped. Read-only while a step is active.
    pub field: Field,

    pub rule: Rule,

    /// In-progress step state, or None if idle.
    pub active_step: Option<IncrementalStep>,

    pub thread_pool: rayon::ThreadPool,
}

fn build_pool(num_threads: u8) -> rayon::ThreadPool {
    let num_threads = num_threads.max(1) as usize;
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
    {
        Ok(pool) => pool,
        Err(err) => {
            log::warn!(
                "could not build {}-thread pool ({}), falling back to 1 thread",
                num_threads,
                err
            );
            rayon::ThreadPoolBuilder::new()
                .num_threads(1)
                .build()
                .unwrap_or_else(|err| panic!("cannot build any rayon pool: {}", err))
        }
    }
}

/// Compute one chunk of the target buffer on the pool.
fn process_chunk(
    pool: &rayon::ThreadPool,
    source: &Field,
    rule: &Rule,
    step: &mut IncrementalStep,
    chunk: usize,
) {
    let start = chunk * CHUNK_SIZE;
    let end = (start + CHUNK_SIZE).min(step.target.len());
    let dimensions = step.region.dimensions();
    let region = &step.region;
    let target = &mut step.target[start..end];

    pool.install(|| {
        target.par_iter_mut().enumerate().for_each_init(
            || Scratch::new(dimensions),
            |scratch, (offset, cell)| {
                *cell = next_cell(source, region, rule, start + offset, scratch);
            },
        );
    });
}

impl StepController {
    /// Create a step controller from a field, a rule, and a thread pool size.
    /// A size of 0 means one thread.
    pub fn new(field: Field, rule: Rule, num_threads: u8) -> Self {
        StepController {
            field,
            rule,
            active_step: None,
            thread_pool: build_pool(num_threads),
        }
    }

    /// Extract the inner field.
    pub fn into_field(self) -> Field {
        self.field
    }

    /// Query whether a step is currently in progress.
    pub fn is_stepping(&self) -> bool {
        self.active_step.is_some()
    }

    /// Fraction of the active step that is done, or 1.0 when idle.
    pub fn progress(&self) -> f64 {
        match &self.active_step {
            Some(step) if step.total_chunks > 0 => {
                step.next_chunk as f64 / step.total_chunks as f64
            }
            _ => 1.0,
        }
    }

    /// Begin a new incremental step.
    pub fn begin_step(&mut self) -> Result<()> {
        if self.is_stepping() {
            return Err(Error::StepInProgress);
        }

        let region = self.field.region.grow()?;
        let size = region.size();
        let total_chunks = (size + CHUNK_SIZE - 1) / CHUNK_SIZE;

        self.active_step = Some(IncrementalStep {
            region,
            target: vec![false; size],
            next_chunk: 0,
            total_chunks,
        });
        Ok(())
    }

    /// Do bounded work within the given time budget (microseconds).
    /// Returns true if the step completed during this tick, false if more work remains.
    pub fn tick(&mut self, budget_us: u64) -> bool {
        let step = match &mut self.active_step {
            Some(s) => s,
            None => return true,
        };

        let deadline = Instant::now().checked_add(Duration::from_micros(budget_us));

        loop {
            if step.next_chunk >= step.total_chunks {
                self.finalize_step();
                return true;
            }

            let chunk = step.next_chunk;
            process_chunk(&self.thread_pool, &self.field, &self.rule, step, chunk);
            step.next_chunk += 1;
            log::trace!(
                "generation {}: chunk {}/{}",
                self.field.generation + 1,
                step.next_chunk,
                step.total_chunks
            );

            if deadline.map_or(false, |d| Instant::now() >= d) {
                return false;
            }
        }
    }

    /// Blocking full step (begin + tick until done).
    pub fn step_blocking(&mut self) -> Result<()> {
        if !self.is_stepping() {
            self.begin_step()?;
        }
        while !self.tick(u64::MAX) {}
        Ok(())
    }

    /// Run `generations` blocking steps.
    pub fn run(&mut self, generations: u64) -> Result<()> {
        for _ in 0..generations {
            self.step_blocking()?;
        }
        Ok(())
    }

    /// Install the finished target as the current field.
    fn finalize_step(&mut self) {
        if let Some(step) = self.active_step.take() {
            self.field = Field {
                region: step.region,
                cells: step.target,
                generation: self.field.generation + 1,
            };
            log::debug!(
                "generation {}: {} cells (incremental)",
                self.field.generation,
                self.field.cells.len()
            );
        }
    }
}
