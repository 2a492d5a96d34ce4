use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

const ENV_OVERRIDES: [&str; 5] = [
    "HOWLITE_TARGET",
    "HOWLITE_DURATION",
    "HOWLITE_RPS",
    "HOWLITE_VUS",
    "HOWLITE_TIMEOUT",
];

/// One request as seen by the recording server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ServerHandle {
    /// Snapshot of everything received so far.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler thread poisoned the record lock.
    pub fn recorded(&self) -> Result<Vec<RecordedRequest>, String> {
        self.recorded
            .lock()
            .map(|requests| requests.clone())
            .map_err(|err| format!("record lock poisoned: {}", err))
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a recording HTTP server, or `None` when sockets are unavailable.
///
/// # Errors
///
/// Returns an error if the listener cannot be configured.
pub fn spawn_recording_server_or_skip() -> Result<Option<(String, ServerHandle)>, String> {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("Skipping test, cannot bind local socket: {}", err);
            return Ok(None);
        }
        Err(err) => return Err(format!("bind test server failed: {}", err)),
    };
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&recorded);

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let sink = Arc::clone(&sink);
                    thread::spawn(move || handle_client(stream, &sink));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok(Some((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
            recorded,
        },
    )))
}

fn handle_client(stream: TcpStream, sink: &Mutex<Vec<RecordedRequest>>) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let Some(request) = read_request(read_half) else {
        return;
    };
    if let Ok(mut requests) = sink.lock() {
        requests.push(request);
    }

    let mut stream = stream;
    if stream
        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK")
        .is_err()
    {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_owned();
    let path = parts.next()?.to_owned();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_owned(), value.trim().to_owned()));
        }
    }

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Run the `howlite-loadtest` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_loadtest<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = loadtest_bin()?;
    let mut command = Command::new(bin);
    command.args(args).env("HOWLITE_LOG", "error");
    for name in ENV_OVERRIDES {
        command.env_remove(name);
    }
    command
        .output()
        .map_err(|err| format!("run howlite-loadtest failed: {}", err))
}

/// `^/[A-Za-z0-9]{len}$`
pub fn is_token_path(path: &str, len: usize) -> bool {
    path.strip_prefix('/').is_some_and(|token| {
        token.len() == len && token.chars().all(|ch| ch.is_ascii_alphanumeric())
    })
}

fn loadtest_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_howlite-loadtest").map_or_else(
        || Err("CARGO_BIN_EXE_howlite-loadtest missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
