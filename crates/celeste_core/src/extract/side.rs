use crate::core_api::SideStats;
use crate::document::Element;
use crate::duration::format_ticks;

/// Read one `AreaModeStats` node. Absent attributes become empty strings,
/// except the two durations, which format an absent value as zero.
pub(crate) fn side_stats(node: &Element) -> SideStats {
    let raw = |name: &str| node.attribute(name).unwrap_or_default().to_string();

    SideStats {
        strawberries: raw("TotalStrawberries"),
        completed: raw("Completed"),
        deaths: raw("Deaths"),
        time: format_ticks(node.attribute("TimePlayed")),
        best_time: format_ticks(node.attribute("BestTime")),
        best_dashes: raw("BestDashes"),
        best_deaths: raw("BestDeaths"),
        heart_gem: raw("HeartGem"),
    }
}
