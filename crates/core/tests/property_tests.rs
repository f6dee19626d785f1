use aricode_core::{decode_text, encode_text};
use proptest::prelude::*;

proptest! {
    #[test]
    fn roundtrip_arbitrary_text(chars in prop::collection::vec(any::<char>(), 1..300)) {
        let text: String = chars.into_iter().collect();

        let container = encode_text(&text).unwrap();
        prop_assert_eq!(decode_text(&container).unwrap(), text);
    }

    #[test]
    fn roundtrip_small_alphabet(indices in prop::collection::vec(0usize..4, 1..600)) {
        let alphabet = ['a', 'b', 'c', 'd'];
        let text: String = indices.into_iter().map(|i| alphabet[i]).collect();

        let container = encode_text(&text).unwrap();
        prop_assert_eq!(decode_text(&container).unwrap(), text);
    }

    #[test]
    fn encoding_is_deterministic(chars in prop::collection::vec(any::<char>(), 1..200)) {
        let text: String = chars.into_iter().collect();

        prop_assert_eq!(encode_text(&text).unwrap(), encode_text(&text).unwrap());
    }

    #[test]
    fn arbitrary_bytes_never_panic_the_parser(bytes in prop::collection::vec(any::<u8>(), 0..400)) {
        // Any outcome is acceptable; a panic is not.
        let _ = decode_text(&bytes);
    }
}
