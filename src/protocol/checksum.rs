/// Computes the IEC 61162 checksum of a sentence or tag block body
///
/// The result is the XOR of every byte, as two upper case hex digits. A
/// single leading `'!'` is not part of the checksummed text and is skipped.
pub fn checksum(text: &str) -> String {
    let body = text.strip_prefix('!').unwrap_or(text);
    format!("{:02X}", body.bytes().fold(0u8, |acc, b| acc ^ b))
}
