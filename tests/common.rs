#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use raccesslog::core::clock::FixedClock;
use raccesslog::core::entry::EntryLogic;
use raccesslog::db::initialize::init_db;
use raccesslog::db::pool::DbPool;
use raccesslog::errors::{AppError, AppResult};
use raccesslog::models::access_record::AccessRecord;
use raccesslog::models::access_result::AccessResult;
use raccesslog::sync::client::{ArchiveAck, ArchiveClient};
use std::cell::RefCell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

pub fn rai() -> Command {
    cargo_bin_cmd!("raccesslog")
}

/// Isolated database + config file inside a temp dir.
pub struct TestEnv {
    pub dir: TempDir,
    pub db: String,
    pub config: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir.path().join("raccesslog.sqlite").to_string_lossy().to_string();
        let config = dir.path().join("raccesslog.conf").to_string_lossy().to_string();
        Self { dir, db, config }
    }

    /// Binary invocation pointed at this environment.
    pub fn cmd(&self) -> Command {
        let mut c = rai();
        c.args(["--db", &self.db, "--config", &self.config]);
        c
    }

    /// Initialized pool on the environment's database file.
    pub fn pool(&self) -> DbPool {
        let pool = DbPool::new(&self.db).expect("open db");
        init_db(&pool.conn).expect("init db");
        pool
    }
}

/// Fresh, migrated in-memory store.
pub fn memory_pool() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn clock_at(date: &str, time: &str) -> FixedClock {
    FixedClock::at(date, time)
}

pub fn allow(pool: &mut DbPool, clock: &FixedClock, name: &str) -> AccessRecord {
    EntryLogic::apply(pool, clock, name, AccessResult::Allowed, None).expect("allowed entry")
}

pub fn deny(pool: &mut DbPool, clock: &FixedClock, name: &str, reason: &str) -> AccessRecord {
    EntryLogic::apply(pool, clock, name, AccessResult::Denied, Some(reason)).expect("denied entry")
}

/// Insert an allowed entry `days_ago` days before `clock`'s current day,
/// leaving the clock where it was.
pub fn allow_days_ago(pool: &mut DbPool, clock: &FixedClock, name: &str, days_ago: i64) -> AccessRecord {
    use raccesslog::core::clock::Clock;
    let now = clock.now();
    clock.set(now - chrono::Duration::days(days_ago));
    let rec = allow(pool, clock, name);
    clock.set(now);
    rec
}

pub fn count(pool: &DbPool) -> i64 {
    pool.conn
        .query_row("SELECT COUNT(*) FROM access_log", [], |row| row.get(0))
        .expect("count rows")
}

/// How the fake archive answers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    Accept,
    Fail,
    Disabled,
}

/// In-process archive that records every batch it is handed.
pub struct MockArchive {
    pub mode: MockMode,
    pub batches: RefCell<Vec<(Vec<i64>, String)>>,
}

impl MockArchive {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            batches: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.batches.borrow().len()
    }
}

impl ArchiveClient for MockArchive {
    fn check_ready(&self) -> AppResult<()> {
        match self.mode {
            MockMode::Disabled => Err(AppError::SyncDisabled),
            _ => Ok(()),
        }
    }

    fn send_batch(&self, records: &[AccessRecord], sync_date: &str) -> AppResult<ArchiveAck> {
        self.batches
            .borrow_mut()
            .push((records.iter().map(|r| r.id).collect(), sync_date.to_string()));

        match self.mode {
            MockMode::Accept => Ok(ArchiveAck {
                diagnostic: Some("stored".to_string()),
            }),
            _ => Err(AppError::Remote {
                status: Some(500),
                message: "storage unavailable".to_string(),
            }),
        }
    }

    fn target(&self) -> String {
        "mock".to_string()
    }
}

/// What the one-shot server saw.
pub struct Captured {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Serve exactly one request with the given status line and body.
pub fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/access-logs", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_lowercase(), v.trim().to_string()));
            }
        }

        let len: usize = headers
            .iter()
            .find(|(k, _)| k == "content-length")
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).unwrap();

        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        Captured {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(buf).unwrap(),
        }
    });

    (url, handle)
}
