use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::message::Message;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cache::RecordCache;
use crate::output::format::{format_query, format_record};

/// Session controller: timestamps and prints every decoded message, and
/// feeds each record through to the cache.
///
/// Output goes to the injected sink so tests can capture it; in production
/// that sink is stdout (tracing goes to stderr and stays out of the way).
pub struct Monitor<W: Write> {
    out: W,
    color: bool,
    started: DateTime<Utc>,
    cache: RecordCache,
}

impl<W: Write> Monitor<W> {
    pub fn new(out: W, color: bool, cache: RecordCache) -> Self {
        Self {
            out,
            color,
            started: Utc::now(),
            cache,
        }
    }

    /// One-time startup banner: when the session began and whether
    /// highlighting uses color.
    pub fn print_banner(&mut self) -> Result<()> {
        writeln!(self.out, "Initialization complete")?;
        writeln!(self.out, "  {}", self.started.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(
            self.out,
            "  color support? {}",
            if self.color { "yes" } else { "no" }
        )?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    /// Handle one decoded message: header, queries, records, blank line.
    /// Queries and records are printed in delivery order; every record is
    /// forwarded to the cache.
    pub fn handle_message(&mut self, message: &Message) -> Result<()> {
        self.render_at(message, Utc::now())
    }

    fn render_at(&mut self, message: &Message, now: DateTime<Utc>) -> Result<()> {
        let elapsed = (now - self.started).num_seconds().max(0);
        writeln!(
            self.out,
            "[{elapsed:010}] message ({}) from {}",
            if message.is_response {
                "response"
            } else {
                "query"
            },
            message.source
        )?;

        if !message.queries.is_empty() {
            writeln!(self.out, "  {} query(s):", message.queries.len())?;
            for query in &message.queries {
                for line in format_query(query, self.color) {
                    writeln!(self.out, "{line}")?;
                }
            }
        }

        if !message.records.is_empty() {
            writeln!(self.out, "  {} record(s):", message.records.len())?;
            for record in &message.records {
                for line in format_record(record, self.color) {
                    writeln!(self.out, "{line}")?;
                }
                self.cache.add_record(record.clone());
            }
        }

        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn prune_cache(&mut self) {
        self.cache.prune(Utc::now());
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }
}

/// Monitor event loop: consume decoded messages in delivery order, prune
/// the cache on a fixed interval, stop on cancellation.
pub async fn run<W: Write + Send>(
    mut monitor: Monitor<W>,
    mut rx: mpsc::Receiver<Message>,
    prune_interval_secs: u64,
    cancel: CancellationToken,
) -> Result<()> {
    let mut prune_interval =
        tokio::time::interval(Duration::from_secs(prune_interval_secs.max(1)));

    loop {
        tokio::select! {
            Some(message) = rx.recv() => {
                if let Err(e) = monitor.handle_message(&message) {
                    tracing::error!("Failed to write monitor output: {}", e);
                }
            }
            _ = prune_interval.tick() => {
                monitor.prune_cache();
            }
            _ = cancel.cancelled() => {
                if monitor.cache().is_empty() {
                    tracing::info!("Monitor shutting down");
                } else {
                    tracing::info!(
                        "Monitor shutting down, {} record(s) still cached",
                        monitor.cache().len()
                    );
                    for record in monitor.cache().records() {
                        tracing::debug!("  cached: {} ({:?})", record.name, record.rtype);
                    }
                }
                break;
            }
        }
    }

    Ok(())
}
