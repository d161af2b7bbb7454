mod error;
pub use error::*;

mod tool;
pub use tool::*;

mod runtime;
pub use runtime::*;

mod schema;
pub use schema::*;

mod registry;
pub use registry::*;

mod find_area;
pub use find_area::*;

mod specialist;
pub use specialist::*;

mod update_state;
pub use update_state::*;

mod web_search;
pub use web_search::*;
