//! Scenario 1 from the end-to-end test plan: two file-servers, a manager,
//! and a plain `add` that replicates every file in the source directory.

use std::time::Duration;

use serial_test::serial;

use crate::support::{console_command, port, wait_until, FileServer, Manager};

#[test]
#[serial]
fn add_replicates_every_file_from_source_to_target() {
    let src_root = tempfile::tempdir().expect("tempdir");
    let dst_root = tempfile::tempdir().expect("tempdir");
    std::fs::write(src_root.path().join("a.txt"), "hello").unwrap();
    std::fs::write(src_root.path().join("b.txt"), "world").unwrap();

    let src_port = port(1);
    let dst_port = port(2);
    let mgr_port = port(3);

    let _source = FileServer::spawn(src_root.path(), src_port);
    let _target = FileServer::spawn(dst_root.path(), dst_port);

    let workdir = tempfile::tempdir().expect("tempdir");
    let config_path = workdir.path().join("sync.conf");
    std::fs::write(&config_path, "").unwrap();
    let log_path = workdir.path().join("manager.log");

    let manager = Manager::spawn(&log_path, &config_path, 2, mgr_port, 8);

    let reply = console_command(manager.port, &format!("add /.@127.0.0.1:{src_port} /.@127.0.0.1:{dst_port}"));
    assert!(reply.starts_with("Added"), "unexpected reply: {reply}");

    let a_dst = dst_root.path().join("a.txt");
    let b_dst = dst_root.path().join("b.txt");
    let arrived = wait_until(Duration::from_secs(5), || a_dst.exists() && b_dst.exists());
    assert!(arrived, "target files never arrived");

    assert_eq!(std::fs::read_to_string(&a_dst).unwrap(), "hello");
    assert_eq!(std::fs::read_to_string(&b_dst).unwrap(), "world");
}
