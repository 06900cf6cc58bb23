//! Syslog over UDP.
//!
//! # Responsibilities
//! - Resolve the remote address and open a connectionless transport
//! - Expose it as a level-aware [`MakeWriter`] so formatting layers stay transport-agnostic
//! - Map record levels onto syslog severities
//!
//! # Design Decisions
//! - One datagram per record; nothing is buffered or retried
//! - RFC 3164 framing, facility `kern`, tag `<service>-<environment>`
//! - The transport is shared behind a `Mutex`: sending needs `&mut` access

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::{Arc, Mutex};

use syslog::{Facility, Formatter3164, LoggerBackend};
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

use crate::error::RemoteSetupError;
use crate::logger::level::LogLevel;

type Transport = syslog::Logger<LoggerBackend, Formatter3164>;

/// Shared handle to an open syslog transport.
#[derive(Clone)]
pub struct SyslogMakeWriter {
    transport: Arc<Mutex<Transport>>,
    server: SocketAddr,
}

impl std::fmt::Debug for SyslogMakeWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyslogMakeWriter")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

impl SyslogMakeWriter {
    /// Open a UDP syslog transport to `address` (`host:port`), tagging records with `tag`.
    pub fn connect(address: &str, tag: &str) -> Result<Self, RemoteSetupError> {
        let server = address
            .to_socket_addrs()
            .map_err(|source| RemoteSetupError::Resolve {
                address: address.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| RemoteSetupError::NoAddress(address.to_string()))?;

        let local: SocketAddr = if server.is_ipv6() {
            SocketAddr::from(([0u16; 8], 0))
        } else {
            SocketAddr::from(([0u8; 4], 0))
        };

        let formatter = Formatter3164 {
            facility: Facility::LOG_KERN,
            process: tag.to_string(),
            ..Formatter3164::default()
        };

        let transport =
            syslog::udp(formatter, local, server).map_err(|e| RemoteSetupError::Transport {
                address: address.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            transport: Arc::new(Mutex::new(transport)),
            server,
        })
    }

    /// Resolved address datagrams are sent to.
    pub fn server(&self) -> SocketAddr {
        self.server
    }
}

impl<'a> MakeWriter<'a> for SyslogMakeWriter {
    type Writer = SyslogWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SyslogWriter {
            transport: &self.transport,
            level: LogLevel::Info,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        SyslogWriter {
            transport: &self.transport,
            level: LogLevel::from_tracing(meta.level()),
        }
    }
}

/// Writer for a single record. Each `write` sends one datagram.
pub struct SyslogWriter<'a> {
    transport: &'a Mutex<Transport>,
    level: LogLevel,
}

impl io::Write for SyslogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        let line = line.trim_end_matches(['\r', '\n']);

        let mut transport = self
            .transport
            .lock()
            .map_err(|_| io::Error::other("syslog transport lock poisoned"))?;

        let sent = match self.level {
            LogLevel::Debug => transport.debug(line),
            LogLevel::Info => transport.info(line),
            LogLevel::Warn => transport.warning(line),
            LogLevel::Error => transport.err(line),
        };
        sent.map_err(|e| io::Error::other(e.to_string()))?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
