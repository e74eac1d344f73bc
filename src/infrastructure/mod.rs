pub mod crypto;
pub mod database;
pub mod logging;
pub mod markdown;
pub mod repositories;
pub mod time;
pub mod util;
