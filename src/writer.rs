//! JSON 쓰기 단계 모듈
//!
//! 채널에서 레코드를 받아 JSON 배열 파일을 점진적으로 작성합니다.
//! 배열 괄호와 쉼표를 직접 써서 전체 결과를 메모리에 모으지 않습니다.

use indicatif::ProgressBar;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use crate::error::{CConvertError, Result};
use crate::record::Record;
use crate::stats::Statistics;

/// 입력 경로로부터 출력 파일 경로 유도
///
/// 입력 확장자를 떼고 모드 접미사와 `.json`을 붙여
/// 입력과 같은 디렉토리에 둡니다.
///
/// # Examples
/// ```
/// use cconvert::writer::output_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     output_path(Path::new("data.csv"), false),
///     PathBuf::from("data-compact.json")
/// );
/// assert_eq!(
///     output_path(Path::new("data.csv"), true),
///     PathBuf::from("data-pretty.json")
/// );
/// ```
pub fn output_path(input: &Path, pretty: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let suffix = if pretty { "pretty" } else { "compact" };
    input.with_file_name(format!("{}-{}.json", stem, suffix))
}

/// 레코드 한 건을 JSON 문자열로 렌더링
///
/// Compact 모드는 공백 없는 한 줄, Pretty 모드는 2칸 들여쓰기에
/// 배열 요소 깊이만큼의 접두 들여쓰기를 더합니다.
fn render(record: &Record, pretty: bool) -> Result<String> {
    if pretty {
        let body = serde_json::to_string_pretty(record).map_err(|e| {
            CConvertError::SerializeError {
                reason: e.to_string(),
            }
        })?;
        let indented: Vec<String> = body.lines().map(|line| format!("  {}", line)).collect();
        Ok(indented.join("\n"))
    } else {
        serde_json::to_string(record).map_err(|e| CConvertError::SerializeError {
            reason: e.to_string(),
        })
    }
}

/// 변환 파이프라인의 소비자 단계
///
/// 출력 파일 핸들을 소유하며, `write_records`가 모든 종료 경로에서
/// 핸들을 닫습니다 (드롭).
pub struct JsonWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    pretty: bool,
    bytes_written: u64,
}

impl JsonWriter {
    /// 출력 파일 생성
    pub fn create(input: &Path, pretty: bool) -> Result<Self> {
        let path = output_path(input, pretty);
        let file = File::create(&path).map_err(|e| CConvertError::OutputCreateError {
            file: path.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            pretty,
            bytes_written: 0,
        })
    }

    /// 채널이 닫힐 때까지 레코드를 받아 JSON 배열 작성
    ///
    /// 여는 괄호를 먼저 쓰고, 도착하는 요소를 쉼표로 구분해 즉시 쓰고,
    /// 채널이 닫히면 닫는 괄호를 쓴 뒤 플러시합니다.
    /// 작성한 출력 파일 경로를 반환하며, 반환 자체가 완료 신호입니다.
    pub fn write_records(
        mut self,
        rx: Receiver<Record>,
        stats: &Statistics,
        progress: &ProgressBar,
    ) -> Result<PathBuf> {
        let break_line = if self.pretty { "\n" } else { "" };

        self.write_str("[")?;
        self.write_str(break_line)?;

        let mut first = true;
        for record in rx {
            if !first {
                self.write_str(",")?;
                self.write_str(break_line)?;
            }
            first = false;

            let json = render(&record, self.pretty)?;
            self.write_str(&json)?;

            stats.increment_converted();
            progress.inc(1);
        }

        self.write_str(break_line)?;
        self.write_str("]")?;

        self.writer
            .flush()
            .map_err(|e| CConvertError::WriteError {
                reason: e.to_string(),
            })?;
        stats.add_bytes_written(self.bytes_written);

        Ok(self.path)
    }

    fn write_str(&mut self, data: &str) -> Result<()> {
        self.writer
            .write_all(data.as_bytes())
            .map_err(|e| CConvertError::WriteError {
                reason: e.to_string(),
            })?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }
}
