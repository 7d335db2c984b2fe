//! Parameter validation.
//!
//! Checks run in a fixed order and stop at the first violation, so a given
//! parameter set always reports the same cause:
//!
//! 1. password length
//! 2. salt length
//! 3. output length
//! 4. memory cost (absolute bounds first, then the per-thread minimum)
//! 5. time cost
//! 6. thread count

use crate::config::{MAX_LENGTH, MAX_THREADS, MEMORY_PER_THREAD, MIN_MEMORY, MIN_OUTPUT_LEN, MIN_SALT_LEN, MIN_THREADS, MIN_TIME};
use crate::error::Violation;
use crate::limits::Limits;
use crate::parameter::HashParameters;

/// Validates `params` against the Argon2 bounds and the platform `limits`.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn validate(params: &HashParameters<'_>, limits: &Limits) -> Result<(), Violation> {
    if params.password.is_empty() {
        return Err(Violation::PasswordTooShort);
    }

    if exceeds_max_length(params.password.len()) {
        return Err(Violation::PasswordTooLong);
    }

    if params.salt.len() < MIN_SALT_LEN {
        return Err(Violation::SaltTooShort);
    }

    if exceeds_max_length(params.salt.len()) {
        return Err(Violation::SaltTooLong);
    }

    if params.output_len < MIN_OUTPUT_LEN {
        return Err(Violation::SecretTooShort);
    }

    if exceeds_max_length(params.output_len) {
        return Err(Violation::SecretTooLong);
    }

    validate_memory(params.memory_cost, params.threads, limits)?;

    // The upper time bound is u32::MAX, enforced by the field type.
    if params.time_cost < MIN_TIME {
        return Err(Violation::TimeTooSmall);
    }

    if params.threads < MIN_THREADS {
        return Err(Violation::ThreadsTooFew);
    }

    if params.threads > MAX_THREADS {
        return Err(Violation::ThreadsTooMany);
    }

    Ok(())
}

fn validate_memory(memory_cost: u32, threads: u32, limits: &Limits) -> Result<(), Violation> {
    if memory_cost < MIN_MEMORY {
        return Err(Violation::MemoryTooLittle);
    }

    if u64::from(memory_cost) > limits.max_memory() {
        return Err(Violation::MemoryTooMuch);
    }

    if u64::from(memory_cost) < MEMORY_PER_THREAD * u64::from(threads) {
        return Err(Violation::MemoryTooLittle);
    }

    Ok(())
}

#[inline]
pub(crate) fn exceeds_max_length(len: usize) -> bool {
    len as u64 > MAX_LENGTH
}
