//! src/policy.rs
//! Partial-head policy: which leading span of the body goes through the cipher.

use std::num::NonZeroU64;

/// Resolved encryption span for one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadSplit {
    /// Every body byte is ciphertext. Header marker 0.
    Whole,
    /// Only the first `n` body bytes are ciphertext; the rest is stored verbatim.
    Head(NonZeroU64),
}

impl HeadSplit {
    /// Resolve a caller's requested head size against the input length.
    ///
    /// - `requested == 0` → [`HeadSplit::Whole`]
    /// - `requested >= total_len` → clamped to [`HeadSplit::Whole`]
    /// - otherwise → [`HeadSplit::Head`]
    pub fn resolve(requested: u64, total_len: u64) -> Self {
        match NonZeroU64::new(requested) {
            Some(n) if requested < total_len => HeadSplit::Head(n),
            _ => HeadSplit::Whole,
        }
    }

    /// Decode the header marker. Never inferred from content.
    pub fn from_marker(marker: u64) -> Self {
        NonZeroU64::new(marker).map_or(HeadSplit::Whole, HeadSplit::Head)
    }

    pub fn marker(self) -> u64 {
        match self {
            HeadSplit::Whole => 0,
            HeadSplit::Head(n) => n.get(),
        }
    }

    pub fn cursor(self) -> HeadCursor {
        HeadCursor {
            remaining: match self {
                HeadSplit::Whole => None,
                HeadSplit::Head(n) => Some(n.get()),
            },
        }
    }
}

/// Tracks how much of the cipher span is left while the body streams past.
#[derive(Debug, Clone, Copy)]
pub struct HeadCursor {
    remaining: Option<u64>,
}

impl HeadCursor {
    /// Of the next `len` body bytes, how many belong to the cipher span.
    ///
    /// Advances the cursor; bytes past the returned count are plaintext tail.
    pub fn take(&mut self, len: usize) -> usize {
        match self.remaining.as_mut() {
            None => len,
            Some(left) => {
                let n = usize::try_from(*left).map_or(len, |l| l.min(len));
                *left -= n as u64;
                n
            }
        }
    }
}
