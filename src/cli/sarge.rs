use sarge::ArgumentType;

use super::{UnknownMode, parse_mode};
use crate::format::RecordFormat;

impl ArgumentType for RecordFormat {
    type Error = UnknownMode;

    const REPEATABLE: bool = false;

    fn from_value(val: Option<&str>) -> sarge::ArgResult<Self> {
        Some(parse_mode(val?.trim()))
    }

    fn default_value() -> Option<Self> {
        Some(RecordFormat::Line)
    }
}
