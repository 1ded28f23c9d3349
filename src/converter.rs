//! 변환 파이프라인 모듈
//!
//! 읽기 단계와 쓰기 단계를 스레드로 띄우고 채널로 연결합니다.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::cli::Separator;
use crate::error::{CConvertError, Result};
use crate::reader::CsvReader;
use crate::record::Record;
use crate::stats::Statistics;
use crate::writer::JsonWriter;

/// 변환 옵션
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// 필드 구분자
    pub separator: Separator,
    /// Pretty 출력 여부
    pub pretty: bool,
    /// 건너뛴 행의 내용까지 출력
    pub verbose: bool,
}

impl ConvertOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 구분자 설정
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Pretty 출력 설정
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// 상세 출력 설정
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// CSV 파일 하나를 JSON 배열 파일로 변환
///
/// 읽기/쓰기 스레드를 동시에 실행하고, 둘 다 끝날 때까지 블로킹합니다.
/// 두 단계는 용량 1의 동기 채널로 연결되어 읽기 속도가
/// 쓰기 속도에 맞춰 조절됩니다. 행 순서는 입력 순서 그대로 유지됩니다.
///
/// # Arguments
/// * `input` - 입력 CSV 파일 경로
/// * `options` - 변환 옵션
/// * `stats` - 공유 통계 카운터
///
/// # Returns
/// 작성된 출력 파일 경로 또는 에러
pub fn convert(input: &Path, options: &ConvertOptions, stats: &Arc<Statistics>) -> Result<PathBuf> {
    // 헤더 검증이 출력 파일 생성보다 먼저 일어난다:
    // 빈 입력이면 출력 파일 없이 종료
    let reader = CsvReader::open(input, options.separator)?;
    let writer = JsonWriter::create(input, options.pretty)?;

    let (tx, rx) = mpsc::sync_channel::<Record>(1);
    let progress = create_spinner();

    let reader_stats = Arc::clone(stats);
    let verbose = options.verbose;
    let reader_handle = thread::spawn(move || reader.stream(tx, &reader_stats, verbose));

    let writer_stats = Arc::clone(stats);
    let writer_progress = progress.clone();
    let writer_handle =
        thread::spawn(move || writer.write_records(rx, &writer_stats, &writer_progress));

    // 쓰기 스레드의 종료가 완료 신호
    let write_result = writer_handle.join().map_err(|_| CConvertError::ThreadError {
        reason: "쓰기 스레드가 비정상 종료되었습니다".to_string(),
    })?;
    let read_result = reader_handle.join().map_err(|_| CConvertError::ThreadError {
        reason: "읽기 스레드가 비정상 종료되었습니다".to_string(),
    })?;

    progress.finish_and_clear();

    // 쓰기 실패가 원인이면 읽기 쪽의 채널 단절보다 우선해서 보고
    let output = write_result?;
    read_result?;

    Ok(output)
}

/// 진행률 스피너 생성
fn create_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} 행 변환됨")
            .unwrap(),
    );
    pb
}
