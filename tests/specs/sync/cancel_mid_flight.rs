//! Scenario 4: `cancel` while a transfer for that pair may still be
//! in-flight. The in-flight job still completes; the pair is deactivated
//! for any future `add`; a different pair is unaffected.

use std::time::Duration;

use serial_test::serial;

use crate::support::{console_command, port, wait_until, FileServer, Manager};

#[test]
#[serial]
fn cancel_deactivates_the_pair_without_aborting_in_flight_work() {
    let src_root = tempfile::tempdir().expect("tempdir");
    let dst_root = tempfile::tempdir().expect("tempdir");
    std::fs::write(src_root.path().join("only.txt"), "payload").unwrap();

    let other_src_root = tempfile::tempdir().expect("tempdir");
    let other_dst_root = tempfile::tempdir().expect("tempdir");
    std::fs::write(other_src_root.path().join("other.txt"), "other-payload").unwrap();

    let src_port = port(31);
    let dst_port = port(32);
    let other_src_port = port(33);
    let other_dst_port = port(34);
    let mgr_port = port(35);

    let _source = FileServer::spawn(src_root.path(), src_port);
    let _target = FileServer::spawn(dst_root.path(), dst_port);
    let _other_source = FileServer::spawn(other_src_root.path(), other_src_port);
    let _other_target = FileServer::spawn(other_dst_root.path(), other_dst_port);

    let workdir = tempfile::tempdir().expect("tempdir");
    let config_path = workdir.path().join("sync.conf");
    std::fs::write(&config_path, "").unwrap();
    let log_path = workdir.path().join("manager.log");

    let manager = Manager::spawn(&log_path, &config_path, 2, mgr_port, 8);

    let source_spec = format!("/.@127.0.0.1:{src_port}");
    let add_reply = console_command(manager.port, &format!("add {source_spec} /.@127.0.0.1:{dst_port}"));
    assert!(add_reply.starts_with("Added"), "unexpected reply: {add_reply}");

    let cancel_reply = console_command(manager.port, &format!("cancel {source_spec}"));
    assert!(cancel_reply.starts_with("Synchronization stopped"), "unexpected reply: {cancel_reply}");

    // The job already enqueued before `cancel` still completes normally.
    let dst_file = dst_root.path().join("only.txt");
    let arrived = wait_until(Duration::from_secs(5), || dst_file.exists());
    assert!(arrived, "in-flight transfer should still complete after cancel");
    assert_eq!(std::fs::read_to_string(&dst_file).unwrap(), "payload");

    // Re-adding the same source while still cancelled starts a fresh sync;
    // a wholly different pair is unaffected by the earlier cancel.
    let other_reply = console_command(
        manager.port,
        &format!("add /.@127.0.0.1:{other_src_port} /.@127.0.0.1:{other_dst_port}"),
    );
    assert!(other_reply.starts_with("Added"), "unexpected reply: {other_reply}");

    let other_dst_file = other_dst_root.path().join("other.txt");
    let other_arrived = wait_until(Duration::from_secs(5), || other_dst_file.exists());
    assert!(other_arrived, "an unrelated pair should sync normally after another pair is cancelled");

    let status = console_command(manager.port, "status");
    let line = status.lines().find(|l| l.contains(&src_port.to_string())).expect("status line for cancelled pair");
    assert!(line.contains("active=false"), "cancelled pair should show active=false: {line}");
}
