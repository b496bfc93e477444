use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::AirdropError;

/// A 32-byte Keccak-256 digest: a leaf, an inner node, a root or a proof element.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MerkleHash {
    bytes: [u8; 32],
}

impl MerkleHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> MerkleHash {
        MerkleHash { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Keccak-256 over the concatenation of `parts`, with no padding or length prefixes.
    pub fn from_parts(parts: &[&[u8]]) -> MerkleHash {
        let mut hasher = Keccak256::new();
        for part in parts {
            hasher.update(part);
        }
        MerkleHash {
            bytes: hasher.finalize().into(),
        }
    }

    pub fn from_pair(a: &MerkleHash, b: &MerkleHash) -> MerkleHash {
        if a.bytes <= b.bytes {
            MerkleHash::from_parts(&[&a.bytes, &b.bytes])
        } else {
            MerkleHash::from_parts(&[&b.bytes, &a.bytes])
        }
    }

    /// Replays `merkle_proof` from `merkle_leaf` and checks it lands on `self`.
    pub fn is_valid_proof(&self, merkle_leaf: &MerkleHash, merkle_proof: &[MerkleHash]) -> bool {
        let mut merkle_hash = *merkle_leaf;
        for merkle_node in merkle_proof {
            merkle_hash = MerkleHash::from_pair(&merkle_hash, merkle_node);
        }
        merkle_hash == *self
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }
}

impl From<[u8; 32]> for MerkleHash {
    fn from(bytes: [u8; 32]) -> Self {
        MerkleHash { bytes }
    }
}

impl FromStr for MerkleHash {
    type Err = AirdropError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| AirdropError::InvalidMerkleHash(text.to_string()))?;
        Ok(MerkleHash { bytes })
    }
}

impl fmt::Display for MerkleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for MerkleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.bytes.iter().map(|b| format!("{:02X}", b));
        write!(f, "{}", parts.collect::<String>())
    }
}

impl Serialize for MerkleHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for MerkleHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_is_plain_keccak() {
        assert_eq!(
            MerkleHash::from_parts(&[]).to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            MerkleHash::from_parts(&[b"ab", b"c"]).to_hex(),
            "0x4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_from_pair_is_order_independent() {
        let a = MerkleHash::from_bytes([1u8; 32]);
        let b = MerkleHash::from_bytes([2u8; 32]);
        assert_eq!(MerkleHash::from_pair(&a, &b), MerkleHash::from_pair(&b, &a));
        assert_eq!(
            MerkleHash::from_pair(&a, &b),
            MerkleHash::from_parts(&[&[1u8; 32], &[2u8; 32]])
        );
    }

    #[test]
    fn test_is_valid_proof() {
        let leaves: Vec<MerkleHash> = (0u8..4).map(|i| MerkleHash::from_parts(&[&[i]])).collect();
        let left = MerkleHash::from_pair(&leaves[0], &leaves[1]);
        let right = MerkleHash::from_pair(&leaves[2], &leaves[3]);
        let root = MerkleHash::from_pair(&left, &right);

        assert!(root.is_valid_proof(&leaves[2], &[leaves[3], left]));
        assert!(!root.is_valid_proof(&leaves[2], &[leaves[1], left]));
        assert!(!root.is_valid_proof(&leaves[2], &[]));
        assert!(left.is_valid_proof(&left, &[]));
    }

    #[test]
    fn test_hex_round_trip() {
        let hash = MerkleHash::from_parts(&[b"launch"]);
        assert_eq!(hash.to_hex().parse::<MerkleHash>().unwrap(), hash);
        assert_eq!(
            hash.to_hex()[2..].to_uppercase().parse::<MerkleHash>().unwrap(),
            hash
        );
        assert!("0x1234".parse::<MerkleHash>().is_err());
        assert!(format!("0x{}", "zz".repeat(32)).parse::<MerkleHash>().is_err());
    }
}
