//! # Secure-Gate Type Aliases
//!
//! Every secret the engine touches lives in one of these wrappers. They hold
//! a [`secure-gate`](https://github.com/Slurp9187/secure-gate) container, so
//! reading one always goes through an explicit `.expose_secret()`, and their
//! `Drop` impl zeroizes the contents (`zeroize` crate) before memory is freed.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - container tag
//! - [`HmacSha512`] - PBKDF2 PRF
//!
//! ### Wiping Wrappers
//! - [`FixedSecret<N>`] - fixed-size byte array
//! - [`DynamicSecret<T>`] - heap value (`String`, `Vec<u8>`)
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - caller password, copied in for one call and dropped once keys are derived
//! - [`ChunkBuffer`] - streaming work buffer (holds plaintext between reads and writes)
//!
//! ### Fixed-Size Secrets
//! - [`Aes256Key32`] - AES-256-CTR key
//! - [`HmacKey32`] - HMAC-SHA256 key
//! - [`KdfOutput64`] - raw PBKDF2 output before it is split

use hmac::Hmac;
use secure_gate::{Dynamic, Fixed};
use sha2::{Sha256, Sha512};
use zeroize::Zeroize;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitives
// ─────────────────────────────────────────────────────────────────────────────
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha512 = Hmac<Sha512>;

// ─────────────────────────────────────────────────────────────────────────────
// Wiping wrappers
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-size secret, zeroized on drop.
pub struct FixedSecret<const N: usize>(Fixed<[u8; N]>);

impl<const N: usize> FixedSecret<N> {
    pub fn new(bytes: [u8; N]) -> Self {
        Self(Fixed::new(bytes))
    }

    #[inline]
    pub fn expose_secret(&self) -> &[u8; N] {
        self.0.expose_secret()
    }

    #[inline]
    pub fn expose_secret_mut(&mut self) -> &mut [u8; N] {
        self.0.expose_secret_mut()
    }
}

impl<const N: usize> Drop for FixedSecret<N> {
    fn drop(&mut self) {
        self.0.expose_secret_mut().zeroize();
    }
}

/// Heap secret, zeroized (full capacity) on drop.
pub struct DynamicSecret<T: Zeroize>(Dynamic<T>);

impl<T: Zeroize> DynamicSecret<T> {
    pub fn new(value: T) -> Self {
        Self(Dynamic::new(value))
    }

    #[inline]
    pub fn expose_secret(&self) -> &T {
        self.0.expose_secret()
    }

    #[inline]
    pub fn expose_secret_mut(&mut self) -> &mut T {
        self.0.expose_secret_mut()
    }
}

impl<T: Zeroize + Clone> Clone for DynamicSecret<T> {
    fn clone(&self) -> Self {
        Self::new(self.expose_secret().clone())
    }
}

impl<T: Zeroize> Drop for DynamicSecret<T> {
    fn drop(&mut self) {
        self.0.expose_secret_mut().zeroize();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type PasswordString = DynamicSecret<String>;
pub type ChunkBuffer = DynamicSecret<Vec<u8>>;

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-size secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type Aes256Key32 = FixedSecret<32>; // CTR key
pub type HmacKey32 = FixedSecret<32>; // tag key
pub type KdfOutput64 = FixedSecret<64>; // cipher key || mac key

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_secret_type_runs_drop() {
        assert!(std::mem::needs_drop::<PasswordString>());
        assert!(std::mem::needs_drop::<ChunkBuffer>());
        assert!(std::mem::needs_drop::<Aes256Key32>());
        assert!(std::mem::needs_drop::<KdfOutput64>());
    }

    #[test]
    fn clone_is_independent() {
        let a = PasswordString::new("pw".to_string());
        let mut b = a.clone();
        b.expose_secret_mut().push('!');
        assert_eq!(a.expose_secret(), "pw");
        assert_eq!(b.expose_secret(), "pw!");
    }
}
