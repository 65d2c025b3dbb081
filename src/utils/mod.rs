pub(crate) mod date;
pub(crate) mod debug;
pub(crate) mod timezone;

pub(crate) use date::{parse_date, parse_month};
pub(crate) use debug::{load_debug_enabled, set_load_debug};
pub(crate) use timezone::Timezone;
