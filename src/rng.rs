//! Ambient RNG handle for callers who don't want to thread their own
//! source through every sampling or BSP call.

use rand::rngs::ThreadRng;

/// Returns the thread-local RNG, ready to pass to any `&mut impl Rng`
/// parameter in this crate.
pub fn thread_rng_handle() -> ThreadRng {
    rand::thread_rng()
}
