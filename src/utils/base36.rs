//! Base36 encoding used for time-derived shortcodes.

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encodes an unsigned 64-bit integer using digits then lowercase letters.
/// Zero encodes to "0".
pub fn encode_u64(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    // 36^13 > 2^64, so 13 digits always suffice
    let mut buf = [0u8; 13];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = ALPHABET[(n % 36) as usize];
        n /= 36;
    }
    buf[i..].iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_vectors() {
        assert_eq!(encode_u64(0), "0");
        assert_eq!(encode_u64(35), "z");
        assert_eq!(encode_u64(36), "10");
        assert_eq!(encode_u64(1295), "zz");
        assert_eq!(encode_u64(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn encodes_max_value() {
        assert_eq!(encode_u64(u64::MAX), "3w5e11264sgsf");
    }
}
