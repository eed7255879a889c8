pub mod plate_loader;

pub use plate_loader::{load_plates_from_file, parse_plate_list};
