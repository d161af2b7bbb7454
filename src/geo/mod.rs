//! Postcode geocoding, midpoint calculation and reverse area resolution.

mod error;
pub use error::*;

mod postcode;
pub use postcode::*;

mod coordinate;
pub use coordinate::*;

mod lookup;
pub use lookup::*;

mod postcodes_io;
pub use postcodes_io::*;

mod resolver;
pub use resolver::*;

#[cfg(test)]
pub(crate) mod testing;
