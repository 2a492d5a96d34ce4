use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;

use crate::args::PathAlphabet;

const LOWER_ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Draws a random token of `length` characters from `alphabet`.
pub fn random_token<R: Rng>(rng: &mut R, alphabet: PathAlphabet, length: usize) -> String {
    match alphabet {
        PathAlphabet::LowerAlnum => (0..length)
            .map(|_| LOWER_ALNUM.choose(rng).map_or('0', |byte| char::from(*byte)))
            .collect(),
        PathAlphabet::Alnum => (0..length)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect(),
    }
}
