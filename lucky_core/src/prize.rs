use crate::rng::RandomSource;

const TOKEN_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedFlag {
    pub cipher_hex: String,
    pub mask_len: usize,
}

/// XORs the flag with a one-time pad drawn from the shared generator.
pub fn mask_flag(rng: &RandomSource, flag: &str) -> MaskedFlag {
    let bytes = flag.as_bytes();
    let mut pad = vec![0u8; bytes.len()];
    rng.fill_bytes(&mut pad);
    let cipher: Vec<u8> = bytes.iter().zip(&pad).map(|(b, k)| b ^ k).collect();
    MaskedFlag {
        cipher_hex: hex::encode(cipher),
        mask_len: pad.len(),
    }
}

pub fn issue_token(rng: &RandomSource) -> String {
    let mut buf = [0u8; TOKEN_LEN];
    rng.fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_unmasks_with_same_stream() {
        let flag = "crypto{demo_flag}";
        let masked = mask_flag(&RandomSource::new(77), flag);
        assert_eq!(masked.mask_len, flag.len());

        let mut pad = vec![0u8; flag.len()];
        RandomSource::new(77).fill_bytes(&mut pad);
        let cipher = hex::decode(&masked.cipher_hex).unwrap();
        let plain: Vec<u8> = cipher.iter().zip(&pad).map(|(c, k)| c ^ k).collect();
        assert_eq!(plain, flag.as_bytes());
    }

    #[test]
    fn tokens_are_hex_and_distinct() {
        let rng = RandomSource::new(1);
        let a = issue_token(&rng);
        let b = issue_token(&rng);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }
}
