use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::driver::DriverRecord;
use crate::modules::report::store::ReportStore;

/// number of drivers above the separator line in the ascending ranking
pub const SEPARATOR_POSITION: usize = 15;
pub const SEPARATOR_WIDTH: usize = 60;

pub struct RankingView {}

impl RankingView {
    /// # rank drivers
    /// the formatted ranking of the current report by best lap.
    ///
    /// the descending ranking is the ascending one turned around, so drivers with equal
    /// lap times swap places compared to the ascending ranking. the ascending ranking has
    /// a separator line after the 15th driver when there are more than 15 drivers.
    ///
    /// ## Arguments
    /// * `store` - the current report
    /// * `ascending` - fastest driver first when true
    ///
    /// ## Returns
    /// * `Vec<String>` - one line per driver, empty when no report was built
    pub fn rank(store: &ReportStore, ascending: bool) -> Vec<String> {
        let mut lines: Vec<String> = RankingView::by_best_lap(store.drivers())
            .iter()
            .enumerate()
            .map(|(index, driver)| RankingView::format_line(index + 1, driver))
            .collect();

        if ascending {
            if lines.len() > SEPARATOR_POSITION {
                lines.insert(SEPARATOR_POSITION, RankingView::separator());
            }
        } else {
            lines.reverse();
        }

        lines
    }

    /// the drivers ordered fastest first, equal lap times keep their report order
    pub fn by_best_lap(drivers: &[DriverRecord]) -> Vec<DriverRecord> {
        let mut sorted = drivers.to_vec();
        sorted.sort_by_key(|driver| driver.best_lap);
        sorted
    }

    pub fn format_line(rank: usize, driver: &DriverRecord) -> String {
        format!(
            "{:2}. {:<20.20} | {:<25.25} | {}",
            rank,
            driver.name,
            driver.team,
            TimeHelper::format_lap(&driver.best_lap)
        )
    }

    pub fn separator() -> String {
        "-".repeat(SEPARATOR_WIDTH)
    }
}
