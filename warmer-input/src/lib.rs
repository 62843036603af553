//! Readers for the warmer's input files
//!
//! URL lists come from CSV files (first column of each row); request
//! profiles come from a JSON array of `{name, headers, cookies}` objects.

pub mod error;
pub mod profiles;
pub mod urls;

pub use error::{InputError, InputResult};
pub use profiles::load_profiles;
pub use urls::{read_url_files, read_urls_from_csv};
