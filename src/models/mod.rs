pub mod loaders;
pub mod plate;
pub mod search_result;

pub use loaders::{load_plates_from_file, parse_plate_list};
pub use plate::{PlateQuery, MAX_PLATE_LEN};
pub use search_result::{Availability, ResultSet, SearchResult, Status};
