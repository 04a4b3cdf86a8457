use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use sha2::{Digest as _, Sha256, Sha512};
use thiserror::Error;

use crate::constants::MANIFEST_PREFIX;

/// Digest-related errors.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("at least one digest algorithm is required")]
    NoAlgorithms,
}

impl DigestError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DigestError::Io { path: path.into(), source }
    }
}

/// Supported manifest algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DigestAlg {
    Md5 = 0x0001,
    Sha256 = 0x0002,
    Sha512 = 0x0003,
}

impl DigestAlg {
    pub const ALL: &'static [DigestAlg] = &[DigestAlg::Md5, DigestAlg::Sha256, DigestAlg::Sha512];

    /// Lowercase name used in manifest file names.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlg::Md5 => "md5",
            DigestAlg::Sha256 => "sha256",
            DigestAlg::Sha512 => "sha512",
        }
    }

    /// `manifest-<alg>.txt`
    pub fn manifest_file_name(self) -> String {
        format!("{}{}.txt", MANIFEST_PREFIX, self.name())
    }

    /// Length of the lowercase hex digest.
    pub fn hex_len(self) -> usize {
        match self {
            DigestAlg::Md5 => 32,
            DigestAlg::Sha256 => 64,
            DigestAlg::Sha512 => 128,
        }
    }
}

impl Default for DigestAlg {
    fn default() -> Self {
        DigestAlg::Md5
    }
}

impl fmt::Display for DigestAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlg {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(DigestAlg::Md5),
            "sha256" | "sha-256" => Ok(DigestAlg::Sha256),
            "sha512" | "sha-512" => Ok(DigestAlg::Sha512),
            _ => Err(DigestError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Internal hashing state.
pub enum DigestState {
    Md5(md5::Context),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl DigestState {
    pub fn new(alg: DigestAlg) -> Self {
        match alg {
            DigestAlg::Md5 => DigestState::Md5(md5::Context::new()),
            DigestAlg::Sha256 => DigestState::Sha256(Sha256::new()),
            DigestAlg::Sha512 => DigestState::Sha512(Sha512::new()),
        }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        match self {
            DigestState::Md5(h) => h.consume(data),
            DigestState::Sha256(h) => h.update(data),
            DigestState::Sha512(h) => h.update(data),
        }
    }

    #[inline]
    pub fn finalize(self) -> Vec<u8> {
        match self {
            DigestState::Md5(h) => h.compute().0.to_vec(),
            DigestState::Sha256(h) => h.finalize().to_vec(),
            DigestState::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

/// Feeds the same bytes into one state per requested algorithm.
pub struct MultiDigest {
    states: Vec<(DigestAlg, DigestState)>,
}

impl MultiDigest {
    pub fn new(algs: &[DigestAlg]) -> Self {
        Self {
            states: algs.iter().map(|&alg| (alg, DigestState::new(alg))).collect(),
        }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        for (_, state) in self.states.iter_mut() {
            state.update(data);
        }
    }

    /// Lowercase hex digests, in the order the algorithms were given.
    pub fn finalize_hex(self) -> Vec<(DigestAlg, String)> {
        self.states
            .into_iter()
            .map(|(alg, state)| (alg, hex::encode(state.finalize())))
            .collect()
    }
}

/// Digests and exact byte count of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub digests: Vec<(DigestAlg, String)>,
    pub bytes: u64,
}

impl FileDigest {
    pub fn hex(&self, alg: DigestAlg) -> Option<&str> {
        self.digests
            .iter()
            .find(|(a, _)| *a == alg)
            .map(|(_, hex)| hex.as_str())
    }
}

/// Deduplicate while keeping the caller's order; an empty list is an error.
pub fn normalize_algorithms(algs: &[DigestAlg]) -> Result<Vec<DigestAlg>, DigestError> {
    let mut out: Vec<DigestAlg> = Vec::with_capacity(algs.len());
    for alg in algs {
        if !out.contains(alg) {
            out.push(*alg);
        }
    }
    if out.is_empty() {
        return Err(DigestError::NoAlgorithms);
    }
    Ok(out)
}
