// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod owners;
pub mod product_repo;
pub mod slug_repo;
pub mod time;
pub mod util;

pub use owners::Named;
pub use product_repo::InMemoryProductRepo;
pub use slug_repo::{CountingSlugRepo, InMemorySlugRepo, RacingSlugRepo};
pub use time::{SteppingClock, fixed_now};
pub use util::{DummyClock, DummySlug};
