/// Routing key derivation and canonical content identifiers
///
/// A routing key is the CIDv1 naming the content a peer announces under a
/// pubsub topic. Collaborating peers derive the same key independently, so
/// the derivation is fixed: sha2-256 over `"floodsub:" + topic`, wrapped as
/// a raw-codec CIDv1. The hash is one-way; only the canonical string round
/// trips.
use crate::error::{RouterError, RouterResult};
use libipld::multihash::Multihash;
use libipld::Cid;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Namespace prefix mixed into every topic before hashing
const TOPIC_NAMESPACE: &str = "floodsub:";

/// Multihash code for sha2-256
const SHA2_256_CODE: u64 = 0x12;

/// Multicodec content type for raw binary
const RAW_CODEC: u64 = 0x55;

/// Canonical content identifier used as the directory lookup key
///
/// Two keys are equal iff their canonical serializations are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingKey(Cid);

impl RoutingKey {
    /// Derive the routing key for a pubsub topic name
    ///
    /// Pure and deterministic: the same topic always yields the same key.
    pub fn from_topic(topic: &str) -> Self {
        let namespaced = format!("{}{}", TOPIC_NAMESPACE, topic);
        let digest = Sha256::digest(namespaced.as_bytes());
        let multihash = Multihash::wrap(SHA2_256_CODE, digest.as_slice())
            .expect("sha2-256 digest fits the multihash size bound");
        Self(Cid::new_v1(RAW_CODEC, multihash))
    }

    /// Parse an externally-supplied identifier string
    pub fn parse(input: &str) -> RouterResult<Self> {
        let cid = Cid::try_from(input)
            .map_err(|e| RouterError::InvalidIdentifier(e.to_string()))?;
        Ok(Self(cid))
    }

    /// Canonical textual form, stable under re-parsing
    pub fn canonical(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoutingKey {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
