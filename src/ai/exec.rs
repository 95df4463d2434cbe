use std::env;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to talk to {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Failed(String),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// Spawn `program`, feed it `stdin`, and return its stdout.
///
/// Blocks until the child exits. With a timeout the child is killed and
/// reaped once the deadline passes.
pub fn run(
    program: &str,
    args: &[String],
    stdin: Option<&str>,
    timeout: Option<Duration>,
) -> Result<String, ExecError> {
    debug!(program, ?args, "spawning");

    let mut child = Command::new(program)
        .args(args)
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExecError::Spawn {
            program: program.to_string(),
            source,
        })?;

    // Written from a helper thread so a large prompt cannot deadlock against
    // a child that is already filling its stdout pipe.
    let writer = match (stdin, child.stdin.take()) {
        (Some(input), Some(mut pipe)) => {
            let input = input.to_owned();
            Some(thread::spawn(move || pipe.write_all(input.as_bytes())))
        }
        _ => None,
    };

    let captured = match timeout {
        None => child
            .wait_with_output()
            .map(|o| (o.status, o.stdout, o.stderr)),
        Some(limit) => wait_with_deadline(child, limit),
    };

    let write_result = writer.map(|handle| handle.join());

    let (status, stdout, stderr) = match captured {
        Ok(captured) => captured,
        Err(e) if e.kind() == io::ErrorKind::TimedOut => {
            return Err(ExecError::TimedOut(timeout.unwrap_or_default()))
        }
        Err(source) => {
            return Err(ExecError::Io {
                program: program.to_string(),
                source,
            })
        }
    };

    if !status.success() {
        return Err(ExecError::Failed(failure_detail(status, &stdout, &stderr)));
    }

    // A child that exits successfully without reading all of stdin closes the
    // pipe early; that is not an error.
    if let Some(Ok(Err(e))) = write_result {
        if e.kind() != io::ErrorKind::BrokenPipe {
            return Err(ExecError::Io {
                program: program.to_string(),
                source: e,
            });
        }
    }

    Ok(String::from_utf8_lossy(&stdout).into_owned())
}

fn wait_with_deadline(
    mut child: Child,
    limit: Duration,
) -> io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);
    let deadline = Instant::now() + limit;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            debug!(?limit, "deadline passed, killing child");
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(io::ErrorKind::TimedOut, "deadline passed"));
        }
        thread::sleep(POLL_INTERVAL);
    };

    let collect = |handle: Option<thread::JoinHandle<Vec<u8>>>| {
        handle.and_then(|h| h.join().ok()).unwrap_or_default()
    };

    Ok((status, collect(stdout), collect(stderr)))
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

/// Prefer stderr, then stdout, then the bare exit code
fn failure_detail(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let stdout = String::from_utf8_lossy(stdout);

    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else if !stdout.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        match status.code() {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// True if `program` resolves to an executable file on PATH
pub fn is_on_path(program: &str) -> bool {
    find_in_path(program, env::var_os("PATH")).is_some()
}

fn find_in_path(program: &str, path: Option<OsString>) -> Option<PathBuf> {
    let path = path?;

    env::split_paths(&path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    std::iter::once(dir.join(program))
        .chain(
            exts.split(';')
                .filter(|e| !e.is_empty())
                .map(|ext| dir.join(format!("{}{}", program, ext))),
        )
        .collect()
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
