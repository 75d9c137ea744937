//! Deterministic fingerprint of an enumeration run.
//!
//! Two runs over equal authority tuples produce equal digests; any change in
//! content or emission order changes the digest.

use crate::enumerate::{Enumerator, UccaSink};
use crate::ucca::Ucca;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::ops::ControlFlow;

/// Hex SHA-256 over the canonical lines of a UCCA stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumerationDigest(pub String);

impl std::fmt::Display for EnumerationDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sink that folds every accepted UCCA into a running hash.
#[derive(Clone)]
pub struct DigestSink {
    hasher: Sha256,
    count: usize,
}

impl Default for DigestSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestSink {
    pub fn new() -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"ucca-stream:v1\n");
        Self { hasher, count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn update(&mut self, ucca: &Ucca) {
        self.count += 1;
        self.hasher.update(ucca.tag().as_bytes());
        self.hasher.update(b"|");
        self.hasher.update(ucca.action().as_str().as_bytes());
        self.hasher.update(b"|");
        if let Some(controller) = ucca.controller() {
            self.hasher.update(controller.as_str().as_bytes());
        }
        self.hasher.update(b"|");
        match ucca {
            Ucca::TeamProvided(u) => {
                self.update_peers(u.other_actions.iter().map(|a| a.as_str()))
            }
            Ucca::TeamTemporal(u) => {
                self.update_peers(u.other_actions.iter().map(|a| a.as_str()))
            }
            Ucca::ControllerProvided(u) => {
                self.update_peers(u.other_controllers.iter().map(|c| c.as_str()))
            }
            Ucca::ControllerTemporal(u) => {
                self.update_peers(u.other_controllers.iter().map(|c| c.as_str()))
            }
        }
        self.hasher.update(b"|");
        self.hasher.update(ucca.action_state().as_str().as_bytes());
        self.hasher.update(b"|");
        self.hasher.update(ucca.other_actions_state().as_str().as_bytes());
        self.hasher.update(b"\n");
    }

    pub fn finish(self) -> EnumerationDigest {
        let hash = self.hasher.finalize();
        EnumerationDigest(format!("{hash:x}"))
    }

    fn update_peers<'a>(&mut self, peers: impl Iterator<Item = &'a str>) {
        for (i, peer) in peers.enumerate() {
            if i > 0 {
                self.hasher.update(b",");
            }
            self.hasher.update(peer.as_bytes());
        }
    }
}

impl UccaSink for DigestSink {
    fn accept(&mut self, ucca: Ucca) -> ControlFlow<()> {
        self.update(&ucca);
        ControlFlow::Continue(())
    }
}

/// Digest of an arbitrary sequence of UCCAs.
pub fn digest_uccas<'a>(uccas: impl IntoIterator<Item = &'a Ucca>) -> EnumerationDigest {
    let mut sink = DigestSink::new();
    for ucca in uccas {
        sink.update(ucca);
    }
    sink.finish()
}

impl Enumerator {
    /// Digest of the full enumeration, computed without retaining UCCAs.
    pub fn digest(&self) -> EnumerationDigest {
        let mut sink = DigestSink::new();
        self.enumerate(&mut sink);
        sink.finish()
    }
}
