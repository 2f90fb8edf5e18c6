//! Single-owner report output.
//!
//! Render branches never touch stdout or the report file directly: they send
//! finished [`ReportBlock`]s over a channel to one writer task, which writes
//! each block whole, so blocks from concurrent events cannot interleave.
//!
//! Console and file writes are blocking `std::io` calls, so the writer runs
//! on tokio's blocking pool and never stalls a runtime worker.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{Result, ScraperError};
use crate::output::renderer::ReportBlock;

const CHANNEL_CAPACITY: usize = 100;

/// Report file opened for this run
pub struct ReportFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReportFile {
    /// Create `dir` if needed and open a file named after `started_at` (UTC)
    pub fn create(dir: &Path, started_at: DateTime<Utc>) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(report_file_name(started_at));
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn report_file_name(started_at: DateTime<Utc>) -> String {
    format!("report_{}_UTC.txt", started_at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Cloneable handle render branches use to hand off finished blocks
#[derive(Clone)]
pub struct ReportSink {
    tx: mpsc::Sender<ReportBlock>,
}

impl ReportSink {
    /// Queue a finished block, waiting while the writer is backed up
    pub async fn emit(&self, block: ReportBlock) -> Result<()> {
        self.tx
            .send(block)
            .await
            .map_err(|_| ScraperError::ReportClosed)
    }
}

/// What the writer produced once it shut down
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    pub blocks_written: usize,
    pub file_path: Option<PathBuf>,
}

/// Awaitable end of the writer task
pub struct ReportHandle {
    task: JoinHandle<WriterStats>,
}

impl ReportHandle {
    /// Wait until every sink is dropped and the writer has drained, flushed and closed.
    pub async fn finish(self) -> Result<WriterStats> {
        Ok(self.task.await?)
    }
}

/// Worker owning the console and (optional) report file
pub struct ReportWriter {
    console: Box<dyn Write + Send>,
    file: Option<ReportFile>,
    rx: mpsc::Receiver<ReportBlock>,
    file_path: Option<PathBuf>,
    blocks_written: usize,
}

impl ReportWriter {
    /// Start the writer task and return the sink feeding it
    pub fn spawn(
        console: Box<dyn Write + Send>,
        file: Option<ReportFile>,
    ) -> (ReportSink, ReportHandle) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let file_path = file.as_ref().map(|f| f.path.clone());

        let writer = Self {
            console,
            file,
            rx,
            file_path,
            blocks_written: 0,
        };
        let task = tokio::task::spawn_blocking(move || writer.run());

        (ReportSink { tx }, ReportHandle { task })
    }

    fn run(mut self) -> WriterStats {
        debug!("Report writer started");

        while let Some(block) = self.rx.blocking_recv() {
            self.write_block(&block);
        }

        self.close();
        WriterStats {
            blocks_written: self.blocks_written,
            file_path: self.file_path,
        }
    }

    fn write_block(&mut self, block: &ReportBlock) {
        let text = block.to_text();

        if let Err(e) = self
            .console
            .write_all(text.as_bytes())
            .and_then(|_| self.console.flush())
        {
            error!("Failed to write report to console: {}", e);
        }

        if let Some(file) = self.file.as_mut() {
            let result = file
                .writer
                .write_all(text.as_bytes())
                .and_then(|_| file.writer.flush());
            if let Err(e) = result {
                error!(
                    "Failed to write report file {}: {}, continuing on console only",
                    file.path.display(),
                    e
                );
                self.file = None;
            }
        }

        self.blocks_written += 1;
    }

    fn close(&mut self) {
        if let Some(mut file) = self.file.take() {
            match file.writer.flush() {
                Ok(()) => info!("Report written to {}", file.path.display()),
                Err(e) => error!("Failed to flush report file {}: {}", file.path.display(), e),
            }
        }
    }
}
