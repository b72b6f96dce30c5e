use digest::Digest;
use num::BigUint;

/// Hash a sequence of integers with `D`, reading the digest back as an integer.
///
/// Each input is fed as its big-endian byte length followed by its big-endian bytes, so that
/// `[0x01, 0x0203]` and `[0x0102, 0x03]` hash differently.
pub fn hash_uints<D: Digest>(inputs: &[&BigUint]) -> BigUint {
    let hash = inputs
        .iter()
        .map(|x| x.to_bytes_be())
        .fold(D::new(), |d, bytes| {
            d.chain_update((bytes.len() as u64).to_be_bytes())
                .chain_update(bytes)
        })
        .finalize();

    BigUint::from_bytes_be(hash.as_slice())
}
