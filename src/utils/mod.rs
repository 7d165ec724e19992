pub mod parallel;
pub mod time;

pub use self::parallel::parallel_map_unordered;
pub use self::time::timestamp_slug;
