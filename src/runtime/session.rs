use std::future::Future;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    calendar::DateParts,
    callsign::{extract_callsign, is_general_call},
    context::SessionContext,
    core::{
        IndexError,
        index::ActivityIndex,
        recency::highlight_level,
        updater::{LoggedContact, record_contact},
    },
    history::band::band_for_frequency,
    persist::IndexSink,
};

use super::{
    events::{DecodeFields, Highlight, MonitorEvent},
    monitor::Monitor,
};

/// Fatal session failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A logged contact could not be recorded or persisted.
    #[error("recording logged contact: {0}")]
    Index(#[from] IndexError),
}

/// Why a session stopped. Every variant is an ordinary shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The radio application closed.
    Closed,
    /// No event within the receive timeout.
    TimedOut,
    /// The transport failed.
    SocketError,
    /// The shutdown signal fired.
    Interrupted,
}

/// Event loop tying the monitor to the activity index.
pub struct Session<M, S> {
    monitor: M,
    sink: S,
    index: ActivityIndex,
    ctx: SessionContext,
    clock: fn() -> DateParts,
    logged: usize,
    highlighted: usize,
}

impl<M: Monitor, S: IndexSink> Session<M, S> {
    /// Session over a loaded index.
    pub fn new(monitor: M, sink: S, index: ActivityIndex, ctx: SessionContext) -> Self {
        Self {
            monitor,
            sink,
            index,
            ctx,
            clock: DateParts::today_utc,
            logged: 0,
            highlighted: 0,
        }
    }

    /// Replaces the wall clock consulted on heartbeats.
    pub fn with_clock(mut self, clock: fn() -> DateParts) -> Self {
        self.clock = clock;
        self
    }

    /// Current index.
    pub fn index(&self) -> &ActivityIndex {
        &self.index
    }

    /// Current context.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// The monitor.
    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    /// The backing-store sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Contacts recorded from QSO-logged events.
    pub fn logged_count(&self) -> usize {
        self.logged
    }

    /// Highlight commands issued.
    pub fn highlighted_count(&self) -> usize {
        self.highlighted
    }

    /// Runs until a terminal event or until `shutdown` completes.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<SessionEnd, SessionError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let event = tokio::select! {
                event = self.monitor.recv() => event,
                _ = &mut shutdown => {
                    info!("interrupted");
                    return Ok(SessionEnd::Interrupted);
                }
            };

            if let Some(end) = self.handle_event(event).await? {
                return Ok(end);
            }
        }
    }

    /// Applies one event; returns the end reason for terminal events.
    pub async fn handle_event(&mut self, event: MonitorEvent) -> Result<Option<SessionEnd>, SessionError> {
        match event {
            MonitorEvent::Decode(fields) => self.on_decode(&fields).await,
            MonitorEvent::Status { frequency_hz, mode } => {
                self.ctx.set_operating(band_for_frequency(frequency_hz), &mode);
                debug!(band = %self.ctx.band, mode = %self.ctx.mode, "status");
            }
            MonitorEvent::Heartbeat => {
                if self.ctx.set_today((self.clock)()) {
                    info!(year = self.ctx.today.year, day = self.ctx.today.julian, "date rolled over");
                }
            }
            MonitorEvent::QsoLogged { date, call } => {
                let record = record_contact(
                    LoggedContact {
                        callsign: &call,
                        mode: &self.ctx.mode,
                        band: &self.ctx.band,
                        date_stamp: &date,
                    },
                    &mut self.index,
                    &mut self.sink,
                )?;
                self.logged += 1;
                info!(call = %record.callsign, band = %record.band, mode = %record.mode, logged = self.logged, "contact recorded");
            }
            MonitorEvent::Close => {
                info!("radio application closed");
                return Ok(Some(SessionEnd::Closed));
            }
            MonitorEvent::Timeout => {
                info!("monitor receive timed out");
                return Ok(Some(SessionEnd::TimedOut));
            }
            MonitorEvent::SocketError { reason } => {
                warn!(%reason, "monitor socket error");
                return Ok(Some(SessionEnd::SocketError));
            }
        }
        Ok(None)
    }

    async fn on_decode(&mut self, fields: &DecodeFields) {
        let message = fields.message.as_str();
        let call = extract_callsign(message);
        if !is_general_call(message) || call.is_empty() {
            return;
        }

        let level = highlight_level(call, &self.index, &self.ctx);
        let Some(cmd) = Highlight::for_level(call, level) else {
            return;
        };
        match self.monitor.highlight(&cmd).await {
            Ok(()) => {
                self.highlighted += 1;
                debug!(call, level = level.as_u8(), "highlight sent");
            }
            Err(err) => warn!(call, error = %err, "highlight not sent"),
        }
    }
}
