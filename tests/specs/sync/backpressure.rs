//! Scenario 3: queue capacity 2, one worker, `add` of 5 files. The producer
//! (the console session running `add`) blocks on `enqueue` once the queue
//! fills, but the whole thing still finishes — no deadlock.

use std::time::{Duration, Instant};

use serial_test::serial;

use crate::support::{console_command, port, wait_until, FileServer, Manager};

#[test]
#[serial]
fn add_of_five_files_with_queue_capacity_two_completes_without_deadlock() {
    let src_root = tempfile::tempdir().expect("tempdir");
    let dst_root = tempfile::tempdir().expect("tempdir");
    for i in 0..5 {
        std::fs::write(src_root.path().join(format!("f{i}.txt")), format!("contents-{i}")).unwrap();
    }

    let src_port = port(21);
    let dst_port = port(22);
    let mgr_port = port(23);

    let _source = FileServer::spawn(src_root.path(), src_port);
    let _target = FileServer::spawn(dst_root.path(), dst_port);

    let workdir = tempfile::tempdir().expect("tempdir");
    let config_path = workdir.path().join("sync.conf");
    std::fs::write(&config_path, "").unwrap();
    let log_path = workdir.path().join("manager.log");

    let manager = Manager::spawn(&log_path, &config_path, 1, mgr_port, 2);

    let started = Instant::now();
    let reply = console_command(manager.port, &format!("add /.@127.0.0.1:{src_port} /.@127.0.0.1:{dst_port}"));
    assert!(reply.starts_with("Added"), "unexpected reply: {reply}");
    // The console session's `add` blocked on `enqueue` while the bounded
    // queue drained, so the reply already implies some transfers ran.
    assert!(started.elapsed() < Duration::from_secs(10), "add should not hang indefinitely");

    let all_arrived = wait_until(Duration::from_secs(10), || {
        (0..5).all(|i| dst_root.path().join(format!("f{i}.txt")).exists())
    });
    assert!(all_arrived, "all five files should eventually replicate");

    for i in 0..5 {
        let got = std::fs::read_to_string(dst_root.path().join(format!("f{i}.txt"))).unwrap();
        assert_eq!(got, format!("contents-{i}"));
    }
}
