/*!
    seeded 16 bit checksum used to seal and verify frames

    this is CRC-16/CCITT-FALSE (polynomial 0x1021, no reflection, no final
    xor). the seed parameter is what makes the two-phase computation across
    the ring buffer's wrap boundary possible: the remainder of the first run
    seeds the second run and the result equals a single pass over the
    logically contiguous bytes.
*/

/// initial remainder for a fresh computation
pub const CRC_SEED: u16 = 0xFFFF;

const POLYNOMIAL: u16 = 0x1021;

/**
    checksum of `bytes` continued from `seed`

    a frame sealed with its own checksum appended big-endian checksums to
    exactly zero, which is how reception validates.
*/
pub fn crc16(bytes: &[u8], seed: u16) -> u16 {
    let mut crc = seed;
    for &byte in bytes {
        crc ^= u16::from(byte) << 8;
        for _ in 0 .. 8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            }
            else {
                crc <<= 1;
            }
        }
    }
    crc
}
