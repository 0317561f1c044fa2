mod chapters;
mod character;
mod side;

pub(crate) use chapters::chapter_stats;
pub(crate) use character::character_stats;

pub const AREAS_TAG: &str = "Areas";
pub const AREA_STATS_TAG: &str = "AreaStats";
pub const AREA_MODE_STATS_TAG: &str = "AreaModeStats";
