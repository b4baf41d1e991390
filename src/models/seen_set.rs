use std::collections::HashSet;

/// Token addresses already announced during this process lifetime.
///
/// Entries are only ever added. Nothing is persisted, so a restart announces
/// every currently boosted token again.
#[derive(Debug, Default, Clone)]
pub struct SeenSet {
    addresses: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token_address: &str) -> bool {
        self.addresses.contains(token_address)
    }

    /// Returns false if the address was already present
    pub fn insert(&mut self, token_address: &str) -> bool {
        if self.addresses.contains(token_address) {
            return false;
        }
        self.addresses.insert(token_address.to_string())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut seen = SeenSet::new();
        assert!(seen.is_empty());
        assert!(seen.insert("0xabc"));
        assert!(!seen.insert("0xabc"));
        assert!(seen.contains("0xabc"));
        assert!(!seen.contains("0xdef"));
        assert_eq!(seen.len(), 1);
    }
}
