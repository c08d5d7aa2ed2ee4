use crate::domain::model::{AirportRecord, AirportTable};
use crate::domain::ports::AirportDataset;
use crate::utils::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Curated subset of airportsdata shipped inside the binary. The full table
/// (about 28k rows) has to be supplied as a file.
const BUNDLED_AIRPORTS: &str = include_str!("../../data/airports.csv");

/// Airport table in the airportsdata CSV layout
/// (`icao,iata,name,city,subd,country,elevation,lat,lon,tz,lid`).
#[derive(Debug, Clone)]
pub enum CsvAirports {
    Bundled,
    File(PathBuf),
}

impl CsvAirports {
    pub fn bundled() -> Self {
        CsvAirports::Bundled
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        CsvAirports::File(path.as_ref().to_path_buf())
    }

    /// Bundled table unless a file is configured.
    pub fn from_config(airports_file: Option<&str>) -> Self {
        match airports_file {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    /// 依優先順序選擇資料來源：命令列 > 設定檔 > 環境變數 > 內建表
    pub fn select(
        cli_file: Option<&str>,
        config_file: Option<&str>,
        env_file: Option<&str>,
    ) -> Self {
        Self::from_config(cli_file.or(config_file).or(env_file))
    }
}

impl AirportDataset for CsvAirports {
    fn load(&self) -> Result<AirportTable> {
        match self {
            CsvAirports::Bundled => {
                tracing::debug!("Loading bundled airport table");
                parse_airports(BUNDLED_AIRPORTS.as_bytes())
            }
            CsvAirports::File(path) => {
                tracing::debug!("Loading airport table from {}", path.display());
                let file = File::open(path)?;
                parse_airports(file)
            }
        }
    }

    fn is_partial(&self) -> bool {
        matches!(self, CsvAirports::Bundled)
    }
}

/// Reads every row keyed by ICAO identifier. Any malformed row fails the whole load.
pub fn parse_airports<R: Read>(reader: R) -> Result<AirportTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let mut airports = AirportTable::new();
    for row in csv_reader.deserialize() {
        let record: AirportRecord = row?;
        airports.insert(record.icao.clone(), record);
    }

    tracing::debug!("Loaded {} airports", airports.len());
    Ok(airports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FinderError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "icao,iata,name,city,subd,country,elevation,lat,lon,tz,lid\n";

    #[test]
    fn test_bundled_table_contains_sydney() {
        let airports = CsvAirports::bundled().load().unwrap();

        let sydney = airports.get("YSSY").unwrap();
        assert_eq!(sydney.iata, "SYD");
        assert_eq!(sydney.city, "Sydney");
        assert_eq!(sydney.country, "AU");
        assert_eq!(sydney.elevation, Some(21.0));
    }

    #[test]
    fn test_bundled_table_covers_regional_airports() {
        let airports = CsvAirports::bundled().load().unwrap();

        let gold_coast = airports.get("YBCG").unwrap();
        assert_eq!(gold_coast.iata, "OOL");
        assert_eq!(gold_coast.city, "Gold Coast");
        assert!(airports.len() > 200);
    }

    #[test]
    fn test_only_bundled_table_is_partial() {
        assert!(CsvAirports::bundled().is_partial());
        assert!(!CsvAirports::from_path("airports.csv").is_partial());
    }

    #[test]
    fn test_select_precedence() {
        let source = CsvAirports::select(Some("cli.csv"), Some("config.csv"), Some("env.csv"));
        assert!(matches!(source, CsvAirports::File(path) if path == Path::new("cli.csv")));

        let source = CsvAirports::select(None, Some("config.csv"), Some("env.csv"));
        assert!(matches!(source, CsvAirports::File(path) if path == Path::new("config.csv")));

        let source = CsvAirports::select(None, None, Some("env.csv"));
        assert!(matches!(source, CsvAirports::File(path) if path == Path::new("env.csv")));

        assert!(matches!(CsvAirports::select(None, None, None), CsvAirports::Bundled));
    }

    #[test]
    fn test_bundled_table_keeps_blank_iata() {
        let airports = CsvAirports::bundled().load().unwrap();
        let holsworthy = airports.get("YSHW").unwrap();
        assert!(!holsworthy.has_iata());
    }

    #[test]
    fn test_parse_minimal_columns() {
        let csv = "icao,iata,city,country\nXXAA,AAA,Springfield,USA\n";
        let airports = parse_airports(csv.as_bytes()).unwrap();

        let record = airports.get("XXAA").unwrap();
        assert_eq!(record.country, "USA");
        assert!(record.name.is_empty());
        assert!(record.lat.is_none());
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let csv = format!(
            "{}YSSY,SYD,Sydney,Sydney,NSW,AU,high,-33.9,151.1,Australia/Sydney,\n",
            HEADER
        );
        let result = parse_airports(csv.as_bytes());
        assert!(matches!(result, Err(FinderError::CsvError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}NZQN,ZQN,Queenstown International Airport,Queenstown,Otago,NZ,1171,-45.0211,168.739,Pacific/Auckland,\n",
            HEADER
        )
        .unwrap();

        let airports = CsvAirports::from_path(file.path()).load().unwrap();
        assert_eq!(airports.len(), 1);
        assert_eq!(airports["NZQN"].iata, "ZQN");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dataset = CsvAirports::from_path("/nonexistent/airports.csv");
        assert!(matches!(dataset.load(), Err(FinderError::IoError(_))));
    }

    #[test]
    fn test_from_config_defaults_to_bundled() {
        assert!(matches!(CsvAirports::from_config(None), CsvAirports::Bundled));
        assert!(matches!(
            CsvAirports::from_config(Some("airports.csv")),
            CsvAirports::File(_)
        ));
    }
}
