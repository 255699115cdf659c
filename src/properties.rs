use std::{collections::HashMap, fs::File, io::{BufReader, BufWriter, Write}, path::Path, str::FromStr};

use java_properties::PropertiesWriter;
use serde::{Serialize, Deserialize};

use crate::{error::HuffmanError, huffman::{CodeTable, Compressed}};

/// Size statistics of one compression run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionReport {
    pub original_bytes: usize,
    pub compressed_bytes: usize,
    pub total_bits: usize,
    /// Coded symbols, end-of-stream included.
    pub distinct_symbols: usize,
    pub max_code_len: u8,
}

impl CompressionReport {
    pub fn new(original_bytes: usize, compressed: &Compressed, codes: &CodeTable) -> Self {
        Self {
            original_bytes,
            compressed_bytes: compressed.len(),
            total_bits: compressed.bit_len(),
            distinct_symbols: codes.len(),
            max_code_len: codes.max_len(),
        }
    }

    /// `original / compressed`, 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 || self.compressed_bytes == 0 {
            return 0.0;
        }
        self.original_bytes as f64 / self.compressed_bytes as f64
    }

    /// Percentage of the input saved, negative when the output is larger.
    /// 0 for an empty input.
    pub fn space_savings(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_bytes as f64 / self.original_bytes as f64) * 100.0
    }

    /// Writes the report to `<basename>.properties`.
    pub fn store(&self, basename: &str) -> Result<(), HuffmanError> {
        let file = File::create(format!("{}.properties", basename))?;
        self.write(BufWriter::new(file))
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), HuffmanError> {
        let mut w = PropertiesWriter::new(writer);

        w.write_comment("huffpack compression report")?;
        w.write("version", "0")?;
        w.write("originalbytes", &self.original_bytes.to_string())?;
        w.write("compressedbytes", &self.compressed_bytes.to_string())?;
        w.write("totalbits", &self.total_bits.to_string())?;
        w.write("distinctsymbols", &self.distinct_symbols.to_string())?;
        w.write("maxcodelength", &self.max_code_len.to_string())?;
        w.finish()?;

        Ok(())
    }

    /// Reads `<basename>.properties`.
    pub fn load(basename: &str) -> Result<Self, HuffmanError> {
        let file = File::open(format!("{}.properties", basename))?;
        let p = java_properties::read(BufReader::new(file))?;
        Self::try_from(p)
    }
}

impl TryFrom<HashMap<String, String>> for CompressionReport {
    type Error = HuffmanError;

    fn try_from(value: HashMap<String, String>) -> Result<Self, Self::Error> {
        Ok(Self {
            original_bytes: required(&value, "originalbytes")?,
            compressed_bytes: required(&value, "compressedbytes")?,
            total_bits: required(&value, "totalbits")?,
            distinct_symbols: required(&value, "distinctsymbols")?,
            max_code_len: required(&value, "maxcodelength")?,
        })
    }
}

/// Defaults for the command line flags, read from a `.properties` file.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub print_codes: bool,
    pub print_bits: bool,
    pub json: bool,
    pub sample: Option<usize>,
    pub seed: Option<u64>,
}

impl CliConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HuffmanError> {
        let file = File::open(path)?;
        let p = java_properties::read(BufReader::new(file))?;
        Self::try_from(p)
    }
}

impl TryFrom<HashMap<String, String>> for CliConfig {
    type Error = HuffmanError;

    fn try_from(value: HashMap<String, String>) -> Result<Self, Self::Error> {
        Ok(Self {
            print_codes: optional(&value, "print_codes")?.unwrap_or(false),
            print_bits: optional(&value, "print_bits")?.unwrap_or(false),
            json: optional(&value, "json")?.unwrap_or(false),
            sample: optional(&value, "sample")?,
            seed: optional(&value, "seed")?,
        })
    }
}

fn optional<T: FromStr>(props: &HashMap<String, String>, key: &str) -> Result<Option<T>, HuffmanError> {
    match props.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(v) => v.parse()
            .map(Some)
            .map_err(|_| HuffmanError::Properties(format!("Malformed value {:?} for {}", v, key))),
    }
}

fn required<T: FromStr>(props: &HashMap<String, String>, key: &str) -> Result<T, HuffmanError> {
    optional(props, key)?.ok_or_else(|| HuffmanError::Properties(format!("Failed in reading {} from properties", key)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::compress_with_table;

    fn sample_report() -> CompressionReport {
        let (compressed, codes) = compress_with_table(&[0x41, 0x41, 0x41, 0x42]).unwrap();
        CompressionReport::new(4, &compressed, &codes)
    }

    #[test]
    fn test_report_values() {
        let report = sample_report();

        assert_eq!(report.compressed_bytes, 1);
        assert_eq!(report.total_bits, 7);
        assert_eq!(report.distinct_symbols, 3);
        assert_eq!(report.max_code_len, 2);
        assert_eq!(report.ratio(), 4.0);
        assert_eq!(report.space_savings(), 75.0);
    }

    #[test]
    fn test_report_properties_round_trip() {
        let report = sample_report();

        let mut buf = Vec::new();
        report.write(&mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.contains("totalbits=7"));

        let p = java_properties::read(Cursor::new(buf)).unwrap();
        assert_eq!(CompressionReport::try_from(p).unwrap(), report);
    }

    #[test]
    fn test_report_json() {
        let json = serde_json::to_string(&sample_report()).unwrap();

        assert!(json.contains("\"compressed_bytes\":1"));
    }

    #[test]
    fn test_missing_report_key() {
        let mut p = HashMap::new();
        p.insert("originalbytes".to_string(), "4".to_string());

        assert!(matches!(CompressionReport::try_from(p), Err(HuffmanError::Properties(_))));
    }

    #[test]
    fn test_cli_config() {
        let text = "# defaults\nprint_codes=true\nsample = 128\nseed=7\n";
        let p = java_properties::read(Cursor::new(text)).unwrap();
        let config = CliConfig::try_from(p).unwrap();

        assert!(config.print_codes);
        assert!(!config.print_bits);
        assert_eq!(config.sample, Some(128));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_cli_config_flags() {
        let text = "print_bits=true\njson = true\n";
        let p = java_properties::read(Cursor::new(text)).unwrap();
        let config = CliConfig::try_from(p).unwrap();

        assert!(!config.print_codes);
        assert!(config.print_bits);
        assert!(config.json);
        assert_eq!(config.sample, None);
    }

    #[test]
    fn test_empty_input_report() {
        let (compressed, codes) = compress_with_table(&[]).unwrap();
        let report = CompressionReport::new(0, &compressed, &codes);

        assert_eq!(report.compressed_bytes, 1);
        assert_eq!(report.ratio(), 0.0);
        assert_eq!(report.space_savings(), 0.0);
    }

    #[test]
    fn test_cli_config_malformed() {
        let p = java_properties::read(Cursor::new("json=maybe\n")).unwrap();

        assert!(CliConfig::try_from(p).is_err());
    }
}
