//! CSV 읽기 단계 모듈
//!
//! 입력 파일을 한 행씩 읽어 레코드로 변환하고 채널로 내보냅니다.

use colored::Colorize;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use std::sync::mpsc::SyncSender;

use crate::cli::Separator;
use crate::error::{CConvertError, Result};
use crate::record::Record;
use crate::stats::Statistics;

/// 변환 파이프라인의 생산자 단계
///
/// 생성 시점에 헤더 행을 읽어 검증하므로, 빈 입력 파일은
/// 출력 파일이 만들어지기 전에 에러로 반환됩니다.
pub struct CsvReader {
    reader: csv::Reader<File>,
    headers: Vec<String>,
}

impl CsvReader {
    /// 입력 파일을 열고 헤더 행을 읽음
    ///
    /// # Arguments
    /// * `path` - 입력 CSV 파일 경로
    /// * `separator` - 필드 구분자
    ///
    /// # Returns
    /// 헤더까지 읽힌 `CsvReader` 또는 에러 (열기 실패, 빈 파일 등)
    pub fn open(path: &Path, separator: Separator) -> Result<Self> {
        let file = File::open(path).map_err(|e| CConvertError::FileOpenError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // flexible: 필드 수가 다른 행도 파서 단계에서는 통과시키고
        // 레코드 생성 시점에 직접 검사한다
        let mut reader = ReaderBuilder::new()
            .delimiter(separator.as_byte())
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| CConvertError::ReadError {
                reason: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(CConvertError::EmptyInput {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { reader, headers })
    }

    /// 정리된 헤더 이름 목록 반환
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 데이터 행을 순서대로 읽어 채널로 전송
    ///
    /// 전송은 수신 측이 준비될 때까지 블로킹됩니다 (배압).
    /// 필드 수가 맞지 않는 행은 진단 메시지만 남기고 건너뛰며,
    /// 그 외의 읽기 오류는 전체 변환을 중단시킵니다.
    /// 입력이 끝나면 송신자가 드롭되어 채널이 닫힙니다.
    pub fn stream(self, tx: SyncSender<Record>, stats: &Statistics, verbose: bool) -> Result<()> {
        let CsvReader {
            mut reader,
            headers,
        } = self;

        for (index, result) in reader.records().enumerate() {
            let row = result.map_err(|e| CConvertError::ReadError {
                reason: e.to_string(),
            })?;
            stats.increment_read();

            let line = row
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);

            match Record::from_row(&headers, &row) {
                Ok(record) => {
                    tx.send(record)
                        .map_err(|_| CConvertError::ChannelDisconnected)?;
                }
                Err(e) => {
                    eprintln!("  {} {}번째 줄 건너뜀: {}", "⚠️".yellow(), line, e);
                    if verbose {
                        eprintln!("    {}", format!("{:?}", row).dimmed());
                    }
                    stats.increment_skipped();
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn create_csv_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_reads_headers() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "test.csv", "COL1,COL2,COL3\n1,2,3\n");

        let reader = CsvReader::open(&path, Separator::Comma).unwrap();

        assert_eq!(reader.headers(), &["COL1", "COL2", "COL3"]);
    }

    #[test]
    fn test_open_trims_header_names() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "test.csv", " name , city \nJohn,Seoul\n");

        let reader = CsvReader::open(&path, Separator::Comma).unwrap();

        assert_eq!(reader.headers(), &["name", "city"]);
    }

    #[test]
    fn test_open_empty_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "empty.csv", "");

        let result = CsvReader::open(&path, Separator::Comma);

        assert!(matches!(result, Err(CConvertError::EmptyInput { .. })));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = CsvReader::open(Path::new("nowhere/test.csv"), Separator::Comma);
        assert!(matches!(result, Err(CConvertError::FileOpenError { .. })));
    }

    #[test]
    fn test_stream_sends_records_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "test.csv", "COL1,COL2\n1,2\n3,4\n");

        let reader = CsvReader::open(&path, Separator::Comma).unwrap();
        let stats = Statistics::new();
        let (tx, rx) = mpsc::sync_channel::<Record>(16);

        reader.stream(tx, &stats, false).unwrap();

        let records: Vec<Record> = rx.iter().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("COL1"), Some(&serde_json::json!("1")));
        assert_eq!(records[1].get("COL1"), Some(&serde_json::json!("3")));
        assert_eq!(stats.get_rows_read(), 2);
    }

    #[test]
    fn test_stream_semicolon_separator() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(temp_dir.path(), "test.csv", "COL1;COL2\n1;2\n");

        let reader = CsvReader::open(&path, Separator::Semicolon).unwrap();
        let stats = Statistics::new();
        let (tx, rx) = mpsc::sync_channel::<Record>(16);

        reader.stream(tx, &stats, false).unwrap();

        let records: Vec<Record> = rx.iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("COL2"), Some(&serde_json::json!("2")));
    }

    #[test]
    fn test_stream_skips_mismatched_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_csv_file(
            temp_dir.path(),
            "test.csv",
            "COL1,COL2,COL3\n1,2,3\n4,5\n6,7,8\n",
        );

        let reader = CsvReader::open(&path, Separator::Comma).unwrap();
        let stats = Statistics::new();
        let (tx, rx) = mpsc::sync_channel::<Record>(16);

        reader.stream(tx, &stats, false).unwrap();

        let records: Vec<Record> = rx.iter().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("COL1"), Some(&serde_json::json!("6")));
        assert_eq!(stats.get_rows_read(), 3);
        assert_eq!(stats.get_rows_skipped(), 1);
    }
}
