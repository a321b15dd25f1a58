//! Retained input buffer
//!
//! Holds the code points that earlier feeds did not consume. A scan pass
//! reads by index, may rewrite in place (SGML name lowercasing) and finally
//! consumes the scanned prefix.

/// Code point buffer with consume-prefix semantics
#[derive(Debug, Default)]
pub struct ScanBuffer {
    data: Vec<char>,
}

impl ScanBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a chunk of input
    pub fn append(&mut self, chunk: &str) {
        self.data.extend(chunk.chars());
    }

    /// Drop the first `n` code points, keeping the rest for the next pass
    pub fn consume(&mut self, n: usize) {
        self.data.drain(..n);
    }

    /// Drop everything and release the allocation
    pub fn clear(&mut self) {
        self.data = Vec::new();
    }

    pub fn get(&self, index: usize) -> char {
        self.data[index]
    }

    pub fn set(&mut self, index: usize, c: char) {
        self.data[index] = c;
    }

    /// Materialize a span. An inverted span yields the empty string.
    pub fn string(&self, start: usize, end: usize) -> String {
        if start >= end {
            return String::new();
        }
        self.data[start..end].iter().collect()
    }
}
