pub mod loader;

pub use loader::{load_file, load_route_set, parse_route_list};
