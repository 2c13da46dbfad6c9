pub mod date_utils;
pub mod log_utils;

pub use date_utils::{formato_hora, parse_fecha, parse_hora};
pub use log_utils::init_logging;
