use crate::config::SortConfig;
use crate::error::{SortContext, SortError, SortResult};
use crate::input;
use crate::sorter::LineSorter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Where one input's lines start in the concatenated sequence
struct InputSource {
    name: String,
    start: usize,
}

/// Drives one run: read every input, sort or check, write the result
pub struct CoreSort {
    config: SortConfig,
}

impl CoreSort {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    fn sorter(&self) -> LineSorter {
        LineSorter::new(self.config.mode, self.config.sort_order())
    }

    pub fn run(&self) -> SortResult<()> {
        self.config.validate()?;
        let (lines, sources) = self.read_input()?;

        let threads = self.config.effective_thread_count();
        debug!(
            mode = %self.config.mode,
            order = ?self.config.sort_order(),
            lines = lines.len(),
            threads,
            "starting sort"
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SortError::thread_pool_error(&e.to_string()))?;

        if self.config.check {
            return match pool.install(|| self.sorter().first_unsorted(&lines))? {
                None => Ok(()),
                Some(index) => Err(Self::disorder_at(&sources, index)),
            };
        }

        let sorted = pool.install(|| self.sorter().sort(&lines))?;
        self.write_output(&sorted)
    }

    /// Map a zero-based index into the concatenated input back to its file
    fn disorder_at(sources: &[InputSource], index: usize) -> SortError {
        match sources.iter().rev().find(|source| source.start <= index) {
            Some(source) => SortError::not_sorted(&source.name, index - source.start + 1),
            None => SortError::not_sorted("-", index + 1),
        }
    }

    /// Concatenate all inputs in command line order
    fn read_input(&self) -> SortResult<(Vec<String>, Vec<InputSource>)> {
        let delimiter = self.config.delimiter();
        if self.config.reading_from_stdin() {
            let lines = input::read_lines_from(io::stdin().lock(), delimiter, "-")?;
            let sources = vec![InputSource { name: "-".to_string(), start: 0 }];
            return Ok((lines, sources));
        }

        let mut lines = Vec::new();
        let mut sources = Vec::with_capacity(self.config.input_files.len());
        for file in &self.config.input_files {
            sources.push(InputSource {
                name: file.clone(),
                start: lines.len(),
            });
            if file == "-" {
                lines.extend(input::read_lines_from(io::stdin().lock(), delimiter, "-")?);
            } else {
                lines.extend(input::read_lines(Path::new(file), delimiter)?);
            }
        }
        Ok((lines, sources))
    }

    fn write_output(&self, lines: &[String]) -> SortResult<()> {
        let name = self.config.output_file.as_deref().unwrap_or("-");
        let mut output: Box<dyn Write> = match &self.config.output_file {
            Some(output_file) => Box::new(BufWriter::new(
                File::create(output_file).with_file_context(name)?,
            )),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        let delimiter = [self.config.delimiter()];
        for line in lines {
            output.write_all(line.as_bytes())?;
            output.write_all(&delimiter)?;
        }

        output.flush()?;
        Ok(())
    }
}
