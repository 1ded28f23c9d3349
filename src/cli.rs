//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 필드 구분자
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
pub enum Separator {
    /// 쉼표(,)로 구분된 CSV
    #[default]
    Comma,
    /// 세미콜론(;)으로 구분된 CSV
    Semicolon,
}

impl Separator {
    /// CSV 파서에 넘길 구분자 바이트 반환
    pub fn as_byte(&self) -> u8 {
        match self {
            Separator::Comma => b',',
            Separator::Semicolon => b';',
        }
    }
}

impl std::fmt::Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Separator::Comma => write!(f, "comma"),
            Separator::Semicolon => write!(f, "semicolon"),
        }
    }
}

/// cconvert CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "cconvert",
    author = "YourName <your@email.com>",
    version,
    about = "CSV TO JSON CONVERTER - CSV 파일을 스트리밍 방식으로 JSON 배열로 변환하는 CLI 도구",
    long_about = r#"
CSV TO JSON CONVERTER
=====================

CSV 파일을 한 행씩 읽어 JSON 배열 파일로 변환합니다.
읽기 단계와 쓰기 단계가 채널로 연결되어 동시에 동작하므로
입력 크기와 무관하게 메모리 사용량이 일정합니다.

특징:
  • 스트리밍 변환으로 대용량 파일도 일정한 메모리 사용
  • 쉼표/세미콜론 구분자 지원
  • Pretty / Compact 출력 모드
  • 형식이 맞지 않는 행은 건너뛰고 계속 진행
  • 진행률 표시 및 상세 통계

예제:
  cconvert data.csv
  cconvert data.csv --pretty
  cconvert data.csv -s semicolon
  cconvert data.csv -p -s semicolon --verbose
"#
)]
pub struct Args {
    /// 변환할 CSV 파일 경로
    pub input: PathBuf,

    /// 필드 구분자
    #[arg(short, long, value_enum, default_value_t = Separator::Comma)]
    pub separator: Separator,

    /// 들여쓰기된 JSON 출력 (기본값: 압축)
    #[arg(short, long)]
    pub pretty: bool,

    /// 상세 출력 모드 (건너뛴 행의 내용 표시)
    #[arg(short, long)]
    pub verbose: bool,
}
