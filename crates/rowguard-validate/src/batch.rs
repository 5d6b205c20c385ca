//! Batch processing over a whole dataset.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use rowguard_model::{BatchResult, Row, Schema};
use tracing::{debug, info, info_span};

use crate::row::validate_row;
use crate::table::ValidatorTable;

/// Rows validated between two chunk boundaries unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// How chunks are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// One chunk after another on the calling thread.
    #[default]
    Sequential,
    /// Up to this many chunks at a time on scoped worker threads.
    Threads(NonZeroUsize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub chunk_size: NonZeroUsize,
    pub parallelism: Parallelism,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN),
            parallelism: Parallelism::Sequential,
        }
    }
}

impl BatchOptions {
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }
}

/// Drives row validation over a dataset and folds the outcomes.
///
/// Chunk size and parallelism never change the result: `details` always
/// comes out in dataset order with 1-based row indexes.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: BatchOptions,
    table: ValidatorTable,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            table: ValidatorTable::standard(),
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: ValidatorTable) -> Self {
        self.table = table;
        self
    }

    pub fn options(&self) -> BatchOptions {
        self.options
    }

    /// Validate every row against the schema.
    pub fn process(&self, rows: &[Row], schema: &Schema) -> BatchResult {
        self.process_with_progress(rows, schema, |_| {})
    }

    /// Like [`process`](Self::process), calling `on_chunk` at every chunk
    /// boundary with the number of rows processed so far.
    pub fn process_with_progress<F>(
        &self,
        rows: &[Row],
        schema: &Schema,
        mut on_chunk: F,
    ) -> BatchResult
    where
        F: FnMut(usize),
    {
        let span = info_span!("batch", total_rows = rows.len(), columns = schema.len());
        let _guard = span.enter();
        let start = Instant::now();

        let chunk_size = self.options.chunk_size.get();
        let chunks: Vec<(usize, &[Row])> = rows
            .chunks(chunk_size)
            .enumerate()
            .map(|(index, chunk)| (index * chunk_size, chunk))
            .collect();

        let mut result = BatchResult::new(rows.len());
        match self.options.parallelism {
            Parallelism::Sequential => {
                for &(offset, chunk) in &chunks {
                    result.merge(self.validate_chunk(offset, chunk, schema));
                    self.chunk_done(offset, chunk.len(), &mut on_chunk);
                }
            }
            Parallelism::Threads(threads) => {
                for wave in chunks.chunks(threads.get()) {
                    let parts = thread::scope(|scope| {
                        let handles: Vec<_> = wave
                            .iter()
                            .map(|&(offset, chunk)| {
                                scope.spawn(move || self.validate_chunk(offset, chunk, schema))
                            })
                            .collect();
                        handles
                            .into_iter()
                            .map(|handle| {
                                handle
                                    .join()
                                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                            })
                            .collect::<Vec<_>>()
                    });
                    // Handles are joined in spawn order, which is dataset order.
                    for (part, &(offset, chunk)) in parts.into_iter().zip(wave) {
                        result.merge(part);
                        self.chunk_done(offset, chunk.len(), &mut on_chunk);
                    }
                }
            }
        }

        debug_assert!(result.is_consistent());
        info!(
            total_rows = result.total_rows,
            valid_rows = result.valid_rows,
            invalid_rows = result.invalid_rows,
            duration_ms = start.elapsed().as_millis(),
            "batch validated"
        );
        result
    }

    fn validate_chunk(&self, offset: usize, chunk: &[Row], schema: &Schema) -> BatchResult {
        let mut part = BatchResult::new(chunk.len());
        for (position, row) in chunk.iter().enumerate() {
            let outcome = validate_row(row, schema, &self.table);
            part.record(offset + position + 1, outcome, row);
        }
        part
    }

    fn chunk_done<F>(&self, offset: usize, len: usize, on_chunk: &mut F)
    where
        F: FnMut(usize),
    {
        let processed = offset + len;
        debug!(
            chunk_index = offset / self.options.chunk_size.get(),
            processed, "chunk validated"
        );
        on_chunk(processed);
    }
}
