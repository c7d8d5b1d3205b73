// Operations
mod operations;
pub use operations::*;

mod validation;
pub use validation::*;

// Models
mod members;
pub use members::*;

mod profile;
pub use profile::*;

mod meetings;
pub use meetings::*;
