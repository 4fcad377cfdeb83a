pub mod anomalies;
pub mod basin;
pub mod climatology;
pub mod data_structures;
pub mod error;
pub mod oni;
pub mod phases;
pub mod regional;
pub mod synthetic;
pub mod table;
pub mod transition;
pub mod utils;

pub use anomalies::*;
pub use basin::*;
pub use climatology::*;
pub use data_structures::*;
pub use error::*;
pub use oni::*;
pub use phases::*;
pub use regional::*;
pub use synthetic::*;
pub use table::*;
pub use transition::*;
pub use utils::*;
