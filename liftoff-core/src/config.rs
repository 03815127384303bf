// Where tables and charts live. Everything is passed in explicitly; there is
// no config file and nothing is read from the environment.

use crate::charts::Chart;
use liftoff_scanner::Horizon;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = ".";
pub const PAST_TABLE_FILE: &str = "launches_past.csv";
pub const FUTURE_TABLE_FILE: &str = "launches_future.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    data_dir: PathBuf,
    chart_dir: PathBuf,
}

impl DataPaths {
    /// Tables and charts both go to `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            chart_dir: data_dir.clone(),
            data_dir,
        }
    }

    pub fn with_chart_dir(mut self, chart_dir: impl Into<PathBuf>) -> Self {
        self.chart_dir = chart_dir.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn chart_dir(&self) -> &Path {
        &self.chart_dir
    }

    pub fn table(&self, horizon: Horizon) -> PathBuf {
        let file = match horizon {
            Horizon::Past => PAST_TABLE_FILE,
            Horizon::Future => FUTURE_TABLE_FILE,
        };
        self.data_dir.join(file)
    }

    pub fn chart(&self, chart: Chart) -> PathBuf {
        self.chart_dir.join(chart.file_name())
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_paths() {
        let paths = DataPaths::new("/tmp/launches");
        assert_eq!(paths.table(Horizon::Past), Path::new("/tmp/launches/launches_past.csv"));
        assert_eq!(paths.table(Horizon::Future), Path::new("/tmp/launches/launches_future.csv"));
    }

    #[test]
    fn test_chart_dir_override() {
        let paths = DataPaths::new("data").with_chart_dir("charts");
        assert_eq!(paths.chart(Chart::ByCountry), Path::new("charts/by_country.svg"));
        assert_eq!(paths.table(Horizon::Past), Path::new("data/launches_past.csv"));
    }
}
