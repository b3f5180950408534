use std::fs::File;
use std::io::Read;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use thiserror::Error;

/// How often a running process is checked for termination.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// The result of a process that terminated on its own.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// The exit status of the process.
    pub status: ExitStatus,
    /// Everything the process wrote to its standard output.
    pub stdout: Vec<u8>,
    /// Everything the process wrote to its standard error.
    pub stderr: Vec<u8>,
}

/// Failures in running a process. A process that terminates with a non-zero exit status is not a
/// failure at this level.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// The program that was started.
        program: String,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The file to use as standard input cannot be opened.
    #[error("failed to open {} as standard input: {source}", .path.display())]
    Stdin {
        /// The path to the input file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The process did not terminate in time and has been killed.
    #[error("{program} did not terminate within {limit:?}")]
    Timeout {
        /// The program that was started.
        program: String,
        /// The time limit that has been exceeded.
        limit: Duration,
    },
    /// Waiting for the process failed.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        /// The program that was started.
        program: String,
        /// The underlying error.
        source: std::io::Error,
    },
}

/// Run `command` to completion, feeding it the content of `stdin` (or nothing) and capturing its
/// standard output and error. When `timeout` is set the process is killed after that amount of
/// time.
///
/// The pipes are drained by two helper threads while this thread waits for the process, so a
/// process that writes a lot cannot block on a full pipe. The process is the leader of a new
/// process group: the time limit also covers the processes it leaves in background holding the
/// pipes, and on timeout the whole group is killed.
pub fn run_process(
    mut command: Command,
    stdin: Option<&Path>,
    timeout: Option<Duration>,
) -> Result<ProcessOutput, ProcessError> {
    let program = command.get_program().to_string_lossy().to_string();
    match stdin {
        Some(path) => {
            let file = File::open(path).map_err(|source| ProcessError::Stdin {
                path: path.into(),
                source,
            })?;
            command.stdin(Stdio::from(file));
        }
        None => {
            command.stdin(Stdio::null());
        }
    }
    command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0);

    debug!("Running {:?}", command);
    let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
        program: program.clone(),
        source,
    })?;
    let (sender, receiver) = channel();
    drain(Pipe::Stdout, child.stdout.take(), sender.clone());
    drain(Pipe::Stderr, child.stderr.take(), sender);

    let start = Instant::now();
    let deadline = timeout.map(|limit| start + limit);
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(source) => {
                kill(&mut child);
                return Err(ProcessError::Wait { program, source });
            }
        }
        if let (Some(limit), Some(deadline)) = (timeout, deadline) {
            if Instant::now() >= deadline {
                warn!("Killing {} after {:?}", program, limit);
                kill(&mut child);
                return Err(ProcessError::Timeout { program, limit });
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    };
    trace!("{} exited with {} after {:?}", program, status, start.elapsed());

    let mut output = ProcessOutput {
        status,
        stdout: vec![],
        stderr: vec![],
    };
    // the pipes stay open until every process of the group that inherited them exits
    for _ in 0..2 {
        let message = match deadline {
            Some(deadline) => {
                receiver.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => receiver.recv().map_err(RecvTimeoutError::from),
        };
        match message {
            Ok((Pipe::Stdout, content)) => output.stdout = content,
            Ok((Pipe::Stderr, content)) => output.stderr = content,
            Err(RecvTimeoutError::Timeout) => {
                let limit = timeout.unwrap_or_default();
                warn!("Killing the processes left by {} after {:?}", program, limit);
                kill_group(&child);
                return Err(ProcessError::Timeout { program, limit });
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(output)
}

/// The pipes of a process.
#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Read the whole content of a pipe in a separate thread, sending it to `sender` when the pipe is
/// closed.
fn drain<R: Read + Send + 'static>(pipe: Pipe, reader: Option<R>, sender: Sender<(Pipe, Vec<u8>)>) {
    std::thread::spawn(move || {
        let mut content = vec![];
        if let Some(mut reader) = reader {
            if let Err(e) = reader.read_to_end(&mut content) {
                warn!("Failed to read from the process {:?}: {:?}", pipe, e);
            }
        }
        // the receiver is gone if the process timed out
        let _ = sender.send((pipe, content));
    });
}

/// Kill the process group of `child` and reap `child`.
fn kill(child: &mut Child) {
    kill_group(child);
    let _ = child.kill();
    let _ = child.wait();
}

/// Send `SIGKILL` to every process in the group led by `child`.
fn kill_group(child: &Child) {
    let group = Pid::from_raw(child.id() as i32);
    match killpg(group, Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(e) => warn!("Failed to kill the process group {}: {:?}", group, e),
    }
}
