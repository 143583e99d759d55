use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Fixed-size output of a hash function.
///
/// A `Digest` is a compact fingerprint of some input bytes. Its length `N` is
/// fixed by the producing algorithm (32 bytes for the 256-bit schemes used
/// throughout mtree). Digests are plain values: copying one never aliases
/// another, and there is no partially-populated state.
///
/// Ordering is byte-lexicographic. It exists for deterministic ordering in
/// tests and diagnostics; tree construction never compares digests by order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest<const N: usize = 32>([u8; N]);

/// A 256-bit digest.
pub type Digest256 = Digest<32>;

impl<const N: usize> Digest<N> {
    /// Byte length of this digest type.
    pub const LEN: usize = N;

    /// Wrap a pre-computed hash output.
    pub const fn from_hash(hash: [u8; N]) -> Self {
        Self(hash)
    }

    /// The raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Byte-exact equality.
    pub fn equals(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    /// Total order over the digest bytes, compared lexicographically.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    /// Lowercase hex rendering, two characters per byte, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..N.min(4)])
    }

    /// Parse from a hex string produced by [`Digest::to_hex`].
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != N {
            return Err(TypeError::InvalidLength {
                expected: N,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; N];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl<const N: usize> fmt::Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short_hex())
    }
}

impl<const N: usize> fmt::Display for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl<const N: usize> From<[u8; N]> for Digest<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<Digest<N>> for [u8; N] {
    fn from(digest: Digest<N>) -> Self {
        digest.0
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Digests render as hex strings; there is no binary encoding.
impl<const N: usize> Serialize for Digest<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Digest<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled(byte: u8) -> Digest256 {
        Digest::from_hash([byte; 32])
    }

    #[test]
    fn hex_is_lowercase_and_fixed_length() {
        let d = filled(0xab);
        let hex = d.to_hex();
        assert_eq!(hex.len(), 2 * Digest256::LEN);
        assert_eq!(hex, "ab".repeat(32));
    }

    #[test]
    fn hex_keeps_leading_zeros() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        bytes[31] = 0x0f;
        let hex = Digest::from_hash(bytes).to_hex();
        assert!(hex.starts_with("01"));
        assert!(hex.ends_with("0f"));
        assert_eq!(hex.len(), 64);
    }

    #[test]
    fn hex_roundtrip() {
        let d = filled(0x5a);
        let parsed = Digest256::from_hex(&d.to_hex()).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            Digest256::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
        assert_eq!(
            Digest256::from_hex("abcd"),
            Err(TypeError::InvalidLength {
                expected: 32,
                actual: 2
            })
        );
    }

    #[test]
    fn short_hex_is_8_chars() {
        assert_eq!(filled(7).short_hex(), "07070707");
    }

    #[test]
    fn short_hex_on_tiny_digest() {
        let d: Digest<2> = Digest::from_hash([0xde, 0xad]);
        assert_eq!(d.short_hex(), "dead");
        assert_eq!(d.to_hex().len(), 4);
    }

    #[test]
    fn display_is_full_hex() {
        let d = filled(1);
        let display = format!("{d}");
        assert_eq!(display, d.to_hex());
    }

    #[test]
    fn debug_is_short() {
        assert_eq!(format!("{:?}", filled(0xff)), "Digest(ffffffff)");
    }

    #[test]
    fn equals_is_byte_exact() {
        let mut bytes = [3u8; 32];
        let a = Digest::from_hash(bytes);
        bytes[31] = 4;
        let b = Digest::from_hash(bytes);
        assert!(a.equals(&a));
        assert!(!a.equals(&b));
    }

    #[test]
    fn ordering_is_consistent() {
        let lo = filled(0);
        let hi = filled(1);
        assert_eq!(lo.compare(&hi), Ordering::Less);
        assert_eq!(hi.compare(&lo), Ordering::Greater);
        assert_eq!(lo.compare(&lo), Ordering::Equal);
        assert!(lo < hi);
    }

    #[test]
    fn serde_as_hex_string() {
        let d = filled(0x10);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{}\"", d.to_hex()));
        let parsed: Digest256 = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn serde_rejects_wrong_length() {
        let result: Result<Digest256, _> = serde_json::from_str("\"abcd\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn compare_matches_slice_order(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let da = Digest::from_hash(a);
            let db = Digest::from_hash(b);
            prop_assert_eq!(da.compare(&db), a.as_slice().cmp(b.as_slice()));
            prop_assert_eq!(da.equals(&db), a == b);
        }
    }
}
