//! Remote syslog delivery, checked against a loopback UDP collector.

use serde_json::{json, Value};
use service_logger::sink::SinkFormat;
use service_logger::{meta, LoggerBuilder};

mod common;

use common::{split_datagram, Capture, SyslogReceiver};

#[test]
fn every_level_reaches_the_collector() {
    let collector = SyslogReceiver::bind();
    let stdout = Capture::default();
    let logger = LoggerBuilder::new("svc")
        .environment("production")
        .remote_address(collector.address())
        .level("debug")
        .remote_log_only(false)
        .stdout(stdout.clone())
        .build();
    assert!(logger.has_remote());
    assert_eq!(logger.remote_sink().map(|sink| sink.format()), Some(SinkFormat::Json));

    let failure = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    logger.debug("d", None);
    logger.info("i", Some(&meta! { "k" => "v" }));
    logger.warn("w", None);
    logger.error("e", Some(&failure), None);

    let datagrams = collector.recv_all();
    assert_eq!(datagrams.len(), 4, "{datagrams:?}");
    for datagram in &datagrams {
        assert!(datagram.contains("svc-production"), "{datagram}");
    }

    let parsed: Vec<(u8, Value)> = datagrams.iter().map(|d| split_datagram(d)).collect();
    let priorities: Vec<u8> = parsed.iter().map(|(priority, _)| *priority).collect();
    assert_eq!(priorities, vec![7, 6, 4, 3]);

    assert_eq!(parsed[0].1["message"], "d");
    assert_eq!(parsed[1].1["meta"], json!({ "k": "v" }));
    assert_eq!(parsed[2].1["level"], "warn");
    assert_eq!(parsed[3].1["error"], "boom");
    for (_, record) in &parsed {
        assert_eq!(record["app"], "svc");
    }

    // The local sink saw the startup trace plus the same four records.
    assert_eq!(stdout.records().len(), 5);
}

#[test]
fn remote_only_mode_silences_local_output() {
    let collector = SyslogReceiver::bind();
    let stdout = Capture::default();
    let logger = LoggerBuilder::new("svc")
        .environment("production")
        .remote_address(collector.address())
        .remote_log_only(true)
        .stdout(stdout.clone())
        .build();

    logger.info("remote only", None);
    logger.error("still remote only", None, None);

    assert!(stdout.is_empty());
    let datagrams = collector.recv_all();
    assert_eq!(datagrams.len(), 2);
    let (priority, record) = split_datagram(&datagrams[1]);
    assert_eq!(priority, 3);
    assert_eq!(record["error"], Value::Null);
}

#[test]
fn remote_respects_the_threshold() {
    let collector = SyslogReceiver::bind();
    let logger = LoggerBuilder::new("svc")
        .environment("production")
        .remote_address(collector.address())
        .remote_log_only(true)
        .build();

    logger.debug("below threshold", None);
    logger.info("above threshold", None);

    let datagrams = collector.recv_all();
    assert_eq!(datagrams.len(), 1);
    assert_eq!(split_datagram(&datagrams[0]).1["message"], "above threshold");
}

#[test]
fn development_remote_is_human_readable() {
    let collector = SyslogReceiver::bind();
    let stderr = Capture::default();
    let logger = LoggerBuilder::new("svc")
        .environment("development")
        .remote_address(collector.address())
        .remote_log_only(true)
        .stderr(stderr.clone())
        .build();

    let remote_format = logger.remote_sink().map(|sink| sink.format());
    assert_eq!(remote_format, Some(SinkFormat::Console { ansi: false }));

    logger.warn("careful", Some(&meta! { "attempt" => 2 }));

    let datagrams = collector.recv_all();
    assert_eq!(datagrams.len(), 1);
    let datagram = &datagrams[0];
    assert!(datagram.starts_with("<4>"), "{datagram}");
    assert!(datagram.contains("svc-development"));
    assert!(datagram.contains("WARN"));
    assert!(datagram.contains("careful"));
    assert!(datagram.contains(r#"meta={"attempt":2}"#));
    assert!(!datagram.contains('\u{1b}'));

    // Only the startup trace reached the console.
    assert_eq!(stderr.lines().len(), 1);
}

#[test]
fn unresolvable_remote_falls_back_to_local() {
    let stdout = Capture::default();
    let logger = LoggerBuilder::new("svc")
        .environment("production")
        .remote_address("not-an-address")
        .remote_log_only(false)
        .stdout(stdout.clone())
        .build();
    assert!(!logger.has_remote());

    let records = stdout.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "error");
    assert_eq!(records[0]["message"], "Failed to set up remote logger!");
    assert!(records[0]["error"]
        .as_str()
        .is_some_and(|e| e.contains("not-an-address")));

    logger.info("local only now", None);
    let records = stdout.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["message"], "local only now");
}

#[test]
fn empty_address_never_goes_remote() {
    let stdout = Capture::default();
    let logger = LoggerBuilder::new("svc")
        .environment("production")
        .remote_address("")
        .remote_log_only(true)
        .stdout(stdout.clone())
        .build();

    logger.error("nowhere to go", None, None);

    assert!(!logger.has_remote());
    assert!(logger.remote_sink().is_none());
    assert!(stdout.is_empty());
}
