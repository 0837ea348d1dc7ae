//! Property tests for sealing: round-trips and tamper detection.

use flashpaper_cipher::{open, seal, CipherError, SnippetCipher};
use proptest::prelude::*;

const KEY: [u8; 32] = [9u8; 32];

proptest! {
    /// Property: open(seal(m)) == m for arbitrary content
    #[test]
    fn test_roundtrip_arbitrary_content(content in any::<Vec<u8>>()) {
        let blob = seal(&content, &KEY).unwrap();
        prop_assert_eq!(open(&blob, &KEY).unwrap(), content);
    }

    /// Property: flipping any single byte makes open fail
    #[test]
    fn test_single_flipped_byte_rejected(
        content in "\\PC{0,256}",
        position in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let cipher = SnippetCipher::new(&KEY).unwrap();
        let mut blob = cipher.seal_str(&content).unwrap();
        let i = position.index(blob.len());
        blob[i] ^= mask;

        match cipher.open(&blob) {
            Err(CipherError::Tampered(_)) => {}
            other => prop_assert!(false, "tampered blob opened: {:?}", other.map(|p| p.len())),
        }
    }

    /// Property: string content survives the UTF-8 helpers
    #[test]
    fn test_string_roundtrip(content in "\\PC*") {
        let cipher = SnippetCipher::new(&KEY).unwrap();
        let blob = cipher.seal_str(&content).unwrap();
        prop_assert_eq!(cipher.open_to_string(&blob).unwrap(), content);
    }
}
