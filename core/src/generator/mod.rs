//! Seeded layout helpers built on [`Lcg`](crate::Lcg).

pub use shuffle::*;

mod shuffle;
