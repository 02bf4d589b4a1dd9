/// Compares two byte strings in time independent of where they differ.
///
/// Length is not hidden: the shared secret's length is not considered sensitive.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
