//! NMEA checksum: XOR of every byte between `$` and `*`, written as two
//! uppercase hex digits after the `*`.

/// Result of checking a sentence's trailing checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumStatus {
    /// Checksum present and correct
    Valid,
    /// No `*` suffix
    Missing,
    /// Suffix is not two hex digits
    Malformed,
    /// Checksum present and wrong
    Mismatch { expected: u8, found: u8 },
}

/// XOR checksum of a sentence body
pub fn compute(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Split `$BODY*HH` into `BODY` and the checksum text, if any
pub fn split(sentence: &str) -> (&str, Option<&str>) {
    let sentence = sentence.strip_prefix('$').unwrap_or(sentence);
    match sentence.split_once('*') {
        Some((body, sum)) => (body, Some(sum)),
        None => (sentence, None),
    }
}

/// Verify the checksum of a framed sentence
pub fn verify(sentence: &str) -> ChecksumStatus {
    let (body, sum) = split(sentence);
    let Some(sum) = sum else {
        return ChecksumStatus::Missing;
    };
    let Some(found) = parse_hex_byte(sum) else {
        return ChecksumStatus::Malformed;
    };

    let expected = compute(body);
    if expected == found {
        ChecksumStatus::Valid
    } else {
        ChecksumStatus::Mismatch { expected, found }
    }
}

fn parse_hex_byte(text: &str) -> Option<u8> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    Some(hex_digit(bytes[0])? << 4 | hex_digit(bytes[1])?)
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_known_good() {
        assert_eq!(
            verify("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47"),
            ChecksumStatus::Valid
        );
        assert_eq!(verify("$PMTK104*37"), ChecksumStatus::Valid);
    }

    #[test]
    fn test_verify_lowercase_hex() {
        assert_eq!(
            verify("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6a"),
            ChecksumStatus::Valid
        );
    }

    #[test]
    fn test_verify_mismatch() {
        assert_eq!(
            verify("$PMTK104*38"),
            ChecksumStatus::Mismatch {
                expected: 0x37,
                found: 0x38
            }
        );
    }

    #[test]
    fn test_verify_missing_and_malformed() {
        assert_eq!(verify("$GPVTG,054.7,T"), ChecksumStatus::Missing);
        assert_eq!(verify("$GPVTG,054.7,T*"), ChecksumStatus::Malformed);
        assert_eq!(verify("$GPVTG,054.7,T*4G"), ChecksumStatus::Malformed);
        assert_eq!(verify("$GPVTG,054.7,T*123"), ChecksumStatus::Malformed);
    }

    #[test]
    fn test_split_without_dollar() {
        assert_eq!(split("GPVTG,1*00"), ("GPVTG,1", Some("00")));
    }
}
