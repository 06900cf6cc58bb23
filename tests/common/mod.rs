//! Shared utilities for integration tests.

use std::io;
use std::net::UdpSocket;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

/// In-memory stand-in for stdout / stderr.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.0))
    }
}

#[allow(dead_code)]
impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }

    /// Every line parsed as a JSON object.
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// Loopback UDP socket standing in for a syslog collector.
#[allow(dead_code)]
pub struct SyslogReceiver {
    socket: UdpSocket,
}

#[allow(dead_code)]
impl SyslogReceiver {
    pub fn bind() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_millis(500)))
            .unwrap();
        Self { socket }
    }

    pub fn address(&self) -> String {
        self.socket.local_addr().unwrap().to_string()
    }

    /// Next datagram, or `None` once the read times out.
    pub fn recv(&self) -> Option<String> {
        let mut buf = [0u8; 8192];
        match self.socket.recv(&mut buf) {
            Ok(len) => Some(String::from_utf8_lossy(&buf[..len]).into_owned()),
            Err(_) => None,
        }
    }

    /// Drain everything that arrives before the read timeout.
    pub fn recv_all(&self) -> Vec<String> {
        std::iter::from_fn(|| self.recv()).collect()
    }
}

/// `<pri>` prefix and JSON payload of an RFC 3164 datagram carrying a JSON record.
#[allow(dead_code)]
pub fn split_datagram(datagram: &str) -> (u8, Value) {
    let end = datagram.find('>').unwrap();
    let priority = datagram[1..end].parse().unwrap();
    let start = datagram.find('{').unwrap();
    (priority, serde_json::from_str(&datagram[start..]).unwrap())
}
