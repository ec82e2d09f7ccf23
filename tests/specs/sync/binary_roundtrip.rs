//! Scenario 6: a 1 MiB binary file round-trips byte-for-byte, verified by
//! SHA-256 rather than a full-content comparison.

use std::time::Duration;

use serial_test::serial;
use sha2::{Digest, Sha256};

use crate::support::{console_command, port, wait_until, FileServer, Manager};

fn random_bytes(len: usize) -> Vec<u8> {
    // A small xorshift PRNG seeded from the process ID: deterministic
    // enough for a stable test, with no dependency on a `rand` crate this
    // workspace doesn't otherwise need.
    let mut state: u64 = (std::process::id() as u64) << 1 | 1;
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.extend_from_slice(&state.to_le_bytes());
    }
    out.truncate(len);
    out
}

#[test]
#[serial]
fn one_megabyte_binary_file_matches_by_sha256_after_transfer() {
    let src_root = tempfile::tempdir().expect("tempdir");
    let dst_root = tempfile::tempdir().expect("tempdir");

    let payload = random_bytes(1024 * 1024);
    std::fs::write(src_root.path().join("blob.bin"), &payload).unwrap();
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    let expected = hasher.finalize();

    let src_port = port(51);
    let dst_port = port(52);
    let mgr_port = port(53);

    let _source = FileServer::spawn(src_root.path(), src_port);
    let _target = FileServer::spawn(dst_root.path(), dst_port);

    let workdir = tempfile::tempdir().expect("tempdir");
    let config_path = workdir.path().join("sync.conf");
    std::fs::write(&config_path, "").unwrap();
    let log_path = workdir.path().join("manager.log");

    let manager = Manager::spawn(&log_path, &config_path, 2, mgr_port, 8);

    let reply = console_command(manager.port, &format!("add /.@127.0.0.1:{src_port} /.@127.0.0.1:{dst_port}"));
    assert!(reply.starts_with("Added"), "unexpected reply: {reply}");

    let dst_file = dst_root.path().join("blob.bin");
    let arrived = wait_until(Duration::from_secs(10), || {
        dst_file.exists() && std::fs::metadata(&dst_file).map(|m| m.len() as usize).unwrap_or(0) == payload.len()
    });
    assert!(arrived, "1 MiB file should fully replicate");

    let got = std::fs::read(&dst_file).unwrap();
    let mut hasher = Sha256::new();
    hasher.update(&got);
    let got_hash = hasher.finalize();
    assert_eq!(got_hash, expected, "SHA-256 mismatch after transfer");
}
