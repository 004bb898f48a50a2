/// Complement a single IUPAC nucleotide code, keeping its case.
///
/// Bytes that are not nucleotide codes (gaps, `N`, digits) are returned as-is.
#[inline]
pub fn complement_base(base: u8) -> u8 {
    let comp = match base.to_ascii_lowercase() {
        b'a' => b't',
        b't' | b'u' => b'a',
        b'g' => b'c',
        b'c' => b'g',
        b'r' => b'y', // A/G -> T/C
        b'y' => b'r',
        b'k' => b'm', // G/T -> C/A
        b'm' => b'k',
        b'b' => b'v', // not A -> not T
        b'v' => b'b',
        b'd' => b'h', // not C -> not G
        b'h' => b'd',
        _ => return base, // s, w, n and non-bases map to themselves
    };
    if base.is_ascii_uppercase() {
        comp.to_ascii_uppercase()
    } else {
        comp
    }
}

/// Complement every base of a sequence, keeping base order.
pub fn complement_bytes(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| complement_base(b)).collect()
}

/// Reverse a sequence and complement every base.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement_base(b)).collect()
}
