//! Shared process-harness helpers for the end-to-end sync specs: spawning
//! real `sfs`/`sfmgr` binaries as child processes, waiting for their ports
//! to come up, and talking to the manager's console protocol directly over
//! a `TcpStream`.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

fn bin_path(name: &str) -> std::path::PathBuf {
    assert_cmd::cargo::cargo_bin(name)
}

fn wait_for_port(port: u16, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    loop {
        if TcpStream::connect(("127.0.0.1", port)).is_ok() {
            return;
        }
        if Instant::now() >= deadline {
            panic!("nothing listening on 127.0.0.1:{port} after {timeout:?}");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

/// A running `sfs` file-server process, serving `root` as its working
/// directory. Killed when dropped.
pub struct FileServer {
    child: Child,
    pub port: u16,
}

impl FileServer {
    pub fn spawn(root: &Path, port: u16) -> Self {
        let child = Command::new(bin_path("sfs"))
            .arg("-p")
            .arg(port.to_string())
            .current_dir(root)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn sfs");
        wait_for_port(port, Duration::from_secs(5));
        Self { child, port }
    }
}

impl Drop for FileServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// A running `sfmgr` manager process.
pub struct Manager {
    child: Child,
    pub port: u16,
}

impl Manager {
    pub fn spawn(log_path: &Path, config_path: &Path, workers: u32, port: u16, queue_capacity: u32) -> Self {
        let child = Command::new(bin_path("sfmgr"))
            .arg("-l")
            .arg(log_path)
            .arg("-c")
            .arg(config_path)
            .arg("-n")
            .arg(workers.to_string())
            .arg("-p")
            .arg(port.to_string())
            .arg("-b")
            .arg(queue_capacity.to_string())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn sfmgr");
        wait_for_port(port, Duration::from_secs(5));
        Self { child, port }
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Wait (bounded) for the process to exit on its own, returning the exit
    /// status if it did before the timeout.
    pub fn wait_for_exit(&mut self, timeout: Duration) -> Option<std::process::ExitStatus> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(Some(status)) = self.child.try_wait() {
                return Some(status);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Send one console command line to a manager and return its reply
/// (stripped of the trailing newline the manager appends).
pub fn console_command(port: u16, line: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).expect("connect to manager");
    stream.write_all(line.as_bytes()).expect("write command");
    stream.write_all(b"\n").expect("write newline");

    let mut buf = vec![0u8; 16384];
    let n = stream.read(&mut buf).expect("read reply");
    String::from_utf8_lossy(&buf[..n]).trim_end().to_string()
}

/// Poll `predicate` until it returns true or `timeout` elapses, sleeping
/// briefly between attempts. Used to wait for asynchronous transfer
/// completion without a fixed sleep.
pub fn wait_until(timeout: Duration, mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if predicate() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

/// A free-ish TCP port derived from a base plus an offset, kept away from
/// well-known ranges. Tests that use this also run under `#[serial]` so
/// fixed ports across the suite never collide.
pub fn port(offset: u16) -> u16 {
    19000 + offset
}
