//! Basis Units - Dimensional records and the unit table
//!
//! Every quantity is reduced to a coefficient and the exponents of seven base
//! units, in this order:
//!
//! | index | symbol | dimension          |
//! |-------|--------|--------------------|
//! | 0     | s      | time               |
//! | 1     | m      | length             |
//! | 2     | kg     | mass               |
//! | 3     | mol    | amount of substance|
//! | 4     | C      | electric charge    |
//! | 5     | K      | temperature        |
//! | 6     | cd     | luminous intensity |
//!
//! The unit table maps symbols to records and is loaded from a CSV database.

mod dimension;
mod load;
mod record;
mod table;

pub use dimension::{Dimension, BASE_UNITS};
pub use load::LoadError;
pub use record::DimensionalRecord;
pub use table::{UnitEntry, UnitTable};
