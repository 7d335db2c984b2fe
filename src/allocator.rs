//! Global allocator.
//!
//! Every digest allocates `memory_cost` KiB in one go and releases it when
//! the call returns. mimalloc serves these large, short-lived blocks with
//! less fragmentation than the system allocator.

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
