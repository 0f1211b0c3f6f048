// ABOUTME: Credential records, the parsed store, and the file loader for netrc files
// ABOUTME: Reads only; every call returns a freshly owned store with no caching

use super::error::NetrcError;
use super::parser::{assemble_machines, strip_comments, tokenize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zeroize::Zeroize;

const NETRC_FILE_NAME: &str = ".netrc";

/// Password value that is redacted in debug output and wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(*** {} bytes ***)", self.0.len())
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// One `machine` entry: host name, login and password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    name: String,
    login: String,
    password: Secret,
}

impl Machine {
    pub(crate) fn new(name: String, login: String, password: Secret) -> Self {
        Self { name, login, password }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        self.password.expose()
    }
}

/// Parsed credentials in source order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Netrc {
    machines: Vec<Machine>,
}

impl Netrc {
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// First record whose host name matches exactly.
    pub fn machine(&self, host: &str) -> Option<&Machine> {
        self.machines.iter().find(|machine| machine.name == host)
    }

    pub fn lookup(&self, host: &str) -> Option<&str> {
        self.machine(host).map(Machine::password)
    }
}

impl FromStr for Netrc {
    type Err = NetrcError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        parse(content)
    }
}

pub fn parse(content: &str) -> Result<Netrc, NetrcError> {
    let stripped = strip_comments(content);
    let tokens = tokenize(&stripped);

    let machines = assemble_machines(&tokens)?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    // Re-checked in case segment filtering ever drops candidates
    if machines.is_empty() {
        return Err(NetrcError::MachineNotFound);
    }

    tracing::debug!(machines = machines.len(), "parsed netrc content");
    Ok(Netrc { machines })
}

pub fn default_netrc_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(NETRC_FILE_NAME))
}

/// Loads and parses the file at `path`, or `~/.netrc` when `path` is `None`.
pub fn load(path: Option<&Path>) -> Result<Netrc, NetrcError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_netrc_path()
            .ok_or_else(|| NetrcError::FileNotFound(PathBuf::from(NETRC_FILE_NAME)))?,
    };

    let content = read_source(&path)?;
    parse(&content)
}

pub fn read_source(path: &Path) -> Result<String, NetrcError> {
    tracing::debug!("Reading netrc file: {}", path.display());

    if let Err(e) = fs::metadata(path) {
        return Err(classify_io_error(path, e));
    }

    fs::read_to_string(path).map_err(|e| classify_io_error(path, e))
}

fn classify_io_error(path: &Path, error: std::io::Error) -> NetrcError {
    match error.kind() {
        ErrorKind::NotFound => NetrcError::FileNotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => NetrcError::Unreadable(path.to_path_buf()),
        _ => NetrcError::Io(error),
    }
}
