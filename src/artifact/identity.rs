use sha2::Digest as _;

/// Deterministic SHA-256 digest of an artifact's logical value.
///
/// Computed only from dimensions, bytes and content type, so it is stable across processes and
/// platforms and can key an external cache.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering of the digest.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

/// Field-by-field writer feeding the digest. Variable-length fields are length-prefixed so that
/// adjacent fields can never alias.
pub(crate) struct ContentHasher(sha2::Sha256);

impl ContentHasher {
    pub(crate) fn new(kind_tag: &[u8]) -> Self {
        let mut hasher = Self(sha2::Sha256::new());
        hasher.write_bytes(kind_tag);
        hasher
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.0.update(v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.0.update((bytes.len() as u64).to_le_bytes());
        self.0.update(bytes);
    }

    pub(crate) fn finish(self) -> ContentHash {
        ContentHash(self.0.finalize().into())
    }
}
