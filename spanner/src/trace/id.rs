use std::fmt;
use std::num::ParseIntError;

/// A 16-byte value which identifies a given trace.
///
/// The id is valid if it contains at least one non-zero byte.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TraceId([u8; 16]);

impl TraceId {
    /// Invalid trace id
    pub const INVALID: TraceId = TraceId([0; 16]);

    /// Create a trace id from its representation as a byte array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        TraceId(bytes)
    }

    /// Return the representation of this trace id as a byte array.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Borrow the bytes of this trace id.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Whether this id has at least one non-zero byte.
    pub fn is_valid(&self) -> bool {
        *self != TraceId::INVALID
    }

    /// Converts a string in base 16 to a trace id.
    ///
    /// # Examples
    ///
    /// ```
    /// use spanner::trace::TraceId;
    ///
    /// assert!(TraceId::from_hex("42").is_ok());
    /// assert!(TraceId::from_hex("58406520a006649127e371903a2de979").is_ok());
    ///
    /// assert!(TraceId::from_hex("not_hex").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ParseIntError> {
        u128::from_str_radix(hex, 16).map(|id| TraceId(id.to_be_bytes()))
    }
}

impl From<[u8; 16]> for TraceId {
    fn from(bytes: [u8; 16]) -> Self {
        TraceId::from_bytes(bytes)
    }
}

impl From<u128> for TraceId {
    fn from(value: u128) -> Self {
        TraceId(value.to_be_bytes())
    }
}

impl fmt::Debug for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl fmt::LowerHex for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&u128::from_be_bytes(self.0), f)
    }
}

/// An 8-byte value which identifies a given span.
///
/// The id is valid if it contains at least one non-zero byte.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SpanId([u8; 8]);

impl SpanId {
    /// Invalid span id
    pub const INVALID: SpanId = SpanId([0; 8]);

    /// Create a span id from its representation as a byte array.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        SpanId(bytes)
    }

    /// Return the representation of this span id as a byte array.
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0
    }

    /// Borrow the bytes of this span id.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Whether this id has at least one non-zero byte.
    pub fn is_valid(&self) -> bool {
        *self != SpanId::INVALID
    }

    /// Converts a string in base 16 to a span id.
    ///
    /// # Examples
    ///
    /// ```
    /// use spanner::trace::SpanId;
    ///
    /// assert!(SpanId::from_hex("42").is_ok());
    /// assert!(SpanId::from_hex("58406520a0066491").is_ok());
    ///
    /// assert!(SpanId::from_hex("not_hex").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ParseIntError> {
        u64::from_str_radix(hex, 16).map(|id| SpanId(id.to_be_bytes()))
    }
}

impl From<[u8; 8]> for SpanId {
    fn from(bytes: [u8; 8]) -> Self {
        SpanId::from_bytes(bytes)
    }
}

impl From<u64> for SpanId {
    fn from(value: u64) -> Self {
        SpanId(value.to_be_bytes())
    }
}

impl fmt::Debug for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", u64::from_be_bytes(self.0))
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", u64::from_be_bytes(self.0))
    }
}

impl fmt::LowerHex for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&u64::from_be_bytes(self.0), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn trace_bytes(low: u64, high: u64) -> [u8; 16] {
        let mut bytes = [0; 16];
        bytes[..8].copy_from_slice(&low.to_le_bytes());
        bytes[8..].copy_from_slice(&high.to_le_bytes());
        bytes
    }

    #[rstest]
    #[case([0; 16], "00000000000000000000000000000000")]
    #[case([0xde, 0xad, 0xbe, 0xef, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01], "deadbeef000000000000000000000001")]
    #[case(trace_bytes(1, 2), "01000000000000000200000000000000")]
    #[case(trace_bytes(u64::MAX, 0x10), "ffffffffffffffff1000000000000000")]
    fn trace_id_prints_its_bytes_in_order(#[case] bytes: [u8; 16], #[case] hex: &str) {
        let id = TraceId::from_bytes(bytes);
        assert_eq!(id.to_string(), hex);
        assert_eq!(format!("{id:032x}"), hex);
        assert_eq!(format!("{id:?}"), hex);
        assert_eq!(id.as_bytes(), &bytes);
        assert_eq!(TraceId::from_hex(hex).unwrap(), id);
        assert_eq!(TraceId::from(u128::from_be_bytes(bytes)), id);
    }

    #[rstest]
    #[case([0; 8], "0000000000000000")]
    #[case([0xca, 0xfe, 0, 0, 0, 0, 0xba, 0xbe], "cafe00000000babe")]
    #[case(3u64.to_le_bytes(), "0300000000000000")]
    #[case(0x0102u64.to_le_bytes(), "0201000000000000")]
    fn span_id_prints_its_bytes_in_order(#[case] bytes: [u8; 8], #[case] hex: &str) {
        let id = SpanId::from_bytes(bytes);
        assert_eq!(id.to_string(), hex);
        assert_eq!(format!("{id:016x}"), hex);
        assert_eq!(format!("{id:?}"), hex);
        assert_eq!(id.to_bytes(), bytes);
        assert_eq!(SpanId::from_hex(hex).unwrap(), id);
        assert_eq!(SpanId::from(u64::from_be_bytes(bytes)), id);
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(TraceId::from_hex("not-hex").is_err());
        assert!(SpanId::from_hex("zz").is_err());
    }

    #[test]
    fn validity() {
        assert!(!TraceId::INVALID.is_valid());
        assert!(!SpanId::INVALID.is_valid());
        assert!(TraceId::from(1u128).is_valid());
        assert!(SpanId::from_bytes([0, 0, 0, 0, 0, 0, 0, 1]).is_valid());
    }
}
